// Copyright  (C) 2020, Kisio Digital and/or its affiliates. All rights reserved.
//
// This file is part of Navitia,
// the software to build cool stuff with public transport.
//
// Hope you'll enjoy and contribute to this project,
// powered by Kisio Digital (www.kisio.com).
// Help us simplify mobility and open public transport:
// a non ending quest to the responsive locomotion way of traveling!
//
// This contribution is a part of the research and development work of the
// IVA Project which aims to enhance traveler information and is carried out
// under the leadership of the Technological Research Institute SystemX,
// with the partnership and support of the transport organization authority
// Ile-De-France Mobilités (IDFM), SNCF, and public funds
// under the scope of the French Program "Investissements d’Avenir".
//
// LICENCE: This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.
//
// Stay tuned using
// twitter @navitia
// channel `#navitia` on riot https://riot.im/app/#/room/#navitia:matrix.org
// https://groups.google.com/d/forum/navitia
// www.navitia.io

use std::cell::Cell;
use std::rc::Rc;

use crate::config::{RaptorTuningParameters, SearchDirection, SearchParams, SearchProfile};
use crate::debug::DebugLogger;
use crate::engine::access_egress::{AccessEgress, AccessPaths, EgressPaths};
use crate::engine::calculator::{
    ForwardTransitCalculator, RangeRaptorMinutes, ReverseTransitCalculator, TransitCalculator,
};
use crate::engine::cost::DefaultCostCalculator;
use crate::engine::lifecycle::{LifeCycleEventPublisher, LifeCycleSubscriptions};
use crate::engine::round_tracker::RoundTracker;
use crate::engine::slack::{ForwardSlackProvider, ReverseSlackProvider, SlackProvider};
use crate::engine::trip_search::TripScheduleSearch;
use crate::engine::trip_times_search::{find_trip_times, BoardAndAlightTime};
use crate::error::{ConfigError, InvariantViolation};
use crate::request::SearchRequest;
use crate::tracing::debug;
use crate::transit_data::{TransitDataProvider, TripSchedule};

/// Everything one search needs, built from a [`SearchRequest`].
///
/// The context belongs to a single search: it holds round dependent state
/// shared with the lifecycle listeners, and is neither `Send` nor `Sync`.
/// Only the transit data is shared between searches.
///
/// For a reverse search the access and egress legs are swapped, so that the
/// worker always starts from `access_paths()`.
pub struct SearchContext<'a, T, D>
where
    T: TripSchedule + 'a,
    D: TransitDataProvider<T>,
{
    search_params: SearchParams,
    profile: SearchProfile,
    direction: SearchDirection,
    tuning: RaptorTuningParameters,
    transit_data: &'a D,
    calculator: Box<dyn TransitCalculator<T> + 'a>,
    cost_calculator: Option<DefaultCostCalculator>,
    slack_provider: Box<dyn SlackProvider>,
    round_tracker: RoundTracker,
    access_paths: AccessPaths,
    egress_paths: EgressPaths,
    lifecycle: LifeCycleEventPublisher,
    debug_logger: Box<dyn DebugLogger>,
    first_iteration_done: Rc<Cell<bool>>,
    has_time_dependent_access: Cell<bool>,
}

impl<'a, T, D> SearchContext<'a, T, D>
where
    T: TripSchedule + 'a,
    D: TransitDataProvider<T>,
    D::Timetable: 'a,
{
    /// Fails if the request misses the time bound of its direction, or if
    /// its parameters do not match `transit_data`.
    pub fn new(
        request: SearchRequest,
        tuning: RaptorTuningParameters,
        transit_data: &'a D,
    ) -> Result<Self, ConfigError> {
        let SearchRequest {
            search_params,
            profile,
            direction,
            access_paths,
            egress_paths,
            slack_provider,
            mc_cost_params,
            stop_visit_cost,
            debug_logger,
        } = request;
        let search_forward = direction.is_forward();

        let calculator: Box<dyn TransitCalculator<T> + 'a> = if search_forward {
            Box::new(ForwardTransitCalculator::new(&search_params, &tuning)?)
        } else {
            Box::new(ReverseTransitCalculator::new(&search_params, &tuning)?)
        };

        if let Some(costs) = &stop_visit_cost {
            if costs.len() != transit_data.number_of_stops() {
                return Err(ConfigError::StopVisitCostSize {
                    given: costs.len(),
                    expected: transit_data.number_of_stops(),
                });
            }
        }

        let mut subscriptions = LifeCycleSubscriptions::new();
        let round_tracker = RoundTracker::new(
            search_params.number_of_rounds(&tuning),
            search_params.number_of_additional_transfers,
            &mut subscriptions,
        )?;
        let slack_provider: Box<dyn SlackProvider> = if search_forward {
            Box::new(ForwardSlackProvider::new(slack_provider, &mut subscriptions)?)
        } else {
            Box::new(ReverseSlackProvider::new(slack_provider, &mut subscriptions)?)
        };
        let cost_calculator = if profile.is_multi_criteria() {
            Some(DefaultCostCalculator::new(
                &mc_cost_params,
                stop_visit_cost.as_deref(),
                &mut subscriptions,
            )?)
        } else {
            None
        };
        let first_iteration_done = Rc::new(Cell::new(false));
        let on_iteration_complete = Rc::clone(&first_iteration_done);
        subscriptions.on_iteration_complete(move || on_iteration_complete.set(true))?;
        let lifecycle = subscriptions.close();

        let (access_paths, egress_paths) = if search_forward {
            (access_paths, egress_paths)
        } else {
            (egress_paths, access_paths)
        };
        let access_paths = AccessPaths::create(&access_paths, profile);
        let egress_paths = EgressPaths::create(&egress_paths, profile);

        debug!(
            "Search context created for a {} {} search with {} access legs and {} egress legs : {}",
            profile,
            direction,
            access_paths.list_all().len(),
            egress_paths.list_all().len(),
            search_params
        );

        Ok(Self {
            search_params,
            profile,
            direction,
            tuning,
            transit_data,
            calculator,
            cost_calculator,
            slack_provider,
            round_tracker,
            access_paths,
            egress_paths,
            lifecycle,
            debug_logger,
            first_iteration_done,
            has_time_dependent_access: Cell::new(false),
        })
    }

    pub fn search_params(&self) -> &SearchParams {
        &self.search_params
    }

    pub fn profile(&self) -> SearchProfile {
        self.profile
    }

    pub fn direction(&self) -> SearchDirection {
        self.direction
    }

    pub fn search_forward(&self) -> bool {
        self.direction.is_forward()
    }

    pub fn tuning(&self) -> &RaptorTuningParameters {
        &self.tuning
    }

    pub fn transit_data(&self) -> &'a D {
        self.transit_data
    }

    pub fn number_of_stops(&self) -> usize {
        self.transit_data.number_of_stops()
    }

    pub fn calculator(&self) -> &dyn TransitCalculator<T> {
        self.calculator.as_ref()
    }

    /// Set for the multi-criteria profile only.
    pub fn cost_calculator(&self) -> Option<&DefaultCostCalculator> {
        self.cost_calculator.as_ref()
    }

    pub fn slack_provider(&self) -> &dyn SlackProvider {
        self.slack_provider.as_ref()
    }

    pub fn round_tracker(&self) -> &RoundTracker {
        &self.round_tracker
    }

    pub fn access_paths(&self) -> &AccessPaths {
        &self.access_paths
    }

    pub fn egress_paths(&self) -> &EgressPaths {
        &self.egress_paths
    }

    pub fn debug_logger(&self) -> &dyn DebugLogger {
        self.debug_logger.as_ref()
    }

    /// Departure (or arrival) minutes of the Range-RAPTOR iterations.
    pub fn iteration_minutes(&self) -> RangeRaptorMinutes {
        self.calculator.range_raptor_minutes()
    }

    /// Departure time (arrival time for a reverse search) of `access` when
    /// the iteration starts at `iteration_time`, `None` if the leg is closed.
    ///
    /// A leg whose opening hours shift this time makes the search time
    /// dependent, which disables the exact trip search for the rest of the
    /// search.
    pub fn access_departure_time(&self, access: &AccessEgress, iteration_time: i32) -> Option<i32> {
        let departure_time = self.calculator.departure_time(access, iteration_time)?;
        if departure_time != iteration_time && !self.has_time_dependent_access.get() {
            debug!("Time dependent access {}, exact trip search disabled", access);
            self.has_time_dependent_access.set(true);
        }
        Some(departure_time)
    }

    pub fn has_time_dependent_access(&self) -> bool {
        self.has_time_dependent_access.get()
    }

    /// `true` when the current round boards with the exact trip search.
    ///
    /// In the first round of every iteration but the first, boarding is
    /// restricted to one iteration step after the iteration time: later trips
    /// were already found by the previous iteration.
    pub fn uses_exact_trip_search(&self) -> bool {
        self.first_iteration_done.get()
            && self.round_tracker.is_first_round()
            && !self.has_time_dependent_access.get()
    }

    /// The trip search to use on the timetable of `pattern_index` in the
    /// current round.
    pub fn trip_search(&self, pattern_index: usize) -> Box<dyn TripScheduleSearch<'a, T> + 'a> {
        let transit_data: &'a D = self.transit_data;
        let timetable = transit_data.timetable(pattern_index);
        if self.uses_exact_trip_search() {
            self.calculator.create_exact_trip_search(timetable)
        } else {
            self.calculator.create_trip_search(timetable)
        }
    }

    /// Recovers the board and alight positions of a leg of `trip`.
    /// `bound_time` is the arrival time at `to_stop` for a forward search,
    /// the departure time from `from_stop` for a reverse search.
    pub fn recover_trip_times<'t>(
        &self,
        trip: &'t T,
        from_stop: usize,
        to_stop: usize,
        bound_time: i32,
    ) -> Result<BoardAndAlightTime<'t, T>, InvariantViolation> {
        find_trip_times(self.search_forward(), trip, from_stop, to_stop, bound_time)
    }

    pub fn route_search_start(&mut self) {
        let search_forward = self.search_forward();
        self.lifecycle.route_search_start(search_forward);
    }

    pub fn setup_iteration(&mut self, iteration_time: i32) {
        if self.debug_logger.is_enabled() {
            self.debug_logger
                .debug(&format!("Setup iteration {}", crate::time::time_to_str(iteration_time)));
        }
        self.lifecycle.setup_iteration(iteration_time);
    }

    pub fn prepare_for_next_round(&mut self, round: u8) {
        self.lifecycle.prepare_for_next_round(round);
    }

    /// Moves the round tracker to the next round and prepares the round
    /// dependent values for it. Returns `None` once the last round is done.
    pub fn next_round(&mut self) -> Option<u8> {
        if !self.round_tracker.try_next_round() {
            return None;
        }
        let round = self.round_tracker.round();
        self.lifecycle.prepare_for_next_round(round);
        Some(round)
    }

    pub fn round_complete(&mut self, destination_reached: bool) {
        self.lifecycle.round_complete(destination_reached);
    }

    pub fn iteration_complete(&mut self) {
        self.lifecycle.iteration_complete();
    }
}

impl<'a, T, D> std::fmt::Debug for SearchContext<'a, T, D>
where
    T: TripSchedule + 'a,
    D: TransitDataProvider<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchContext")
            .field("search_params", &self.search_params)
            .field("profile", &self.profile)
            .field("direction", &self.direction)
            .field("calculator", &self.calculator)
            .field("round_tracker", &self.round_tracker)
            .field("access_paths", &self.access_paths)
            .field("egress_paths", &self.egress_paths)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::McCostParams;
    use crate::engine::access_egress::{AccessEgress, OpeningHours};
    use crate::engine::cost::CostCalculator;
    use crate::time::PositiveDuration;
    use crate::transit_data::in_memory::{InMemoryTimetable, InMemoryTransitData, Pattern, Schedule};
    use rstest::rstest;
    use std::sync::Arc;

    fn transit_data() -> InMemoryTransitData {
        let pattern = Arc::new(Pattern::new("P1", vec![0, 1, 2]));
        let trips = [36_000, 36_600, 37_200]
            .iter()
            .map(|time| Schedule::with_times(&pattern, &[*time, time + 300, time + 600]).unwrap())
            .collect();
        let mut data = InMemoryTransitData::new(3);
        data.add_timetable(InMemoryTimetable::new(&pattern, trips).unwrap())
            .unwrap();
        data
    }

    fn request(direction: SearchDirection) -> SearchRequest {
        SearchRequest::new(
            SearchParams::depart_after(36_000)
                .with_latest_arrival_time(43_200)
                .with_search_window_in_seconds(600),
        )
        .with_direction(direction)
        .with_access_paths(vec![AccessEgress::walk(0, PositiveDuration::from_seconds(120))])
        .with_egress_paths(vec![AccessEgress::walk(2, PositiveDuration::from_seconds(60))])
    }

    #[test]
    fn reverse_search_swaps_access_and_egress() {
        let data = transit_data();
        let forward =
            SearchContext::new(request(SearchDirection::Forward), RaptorTuningParameters::default(), &data)
                .unwrap();
        assert_eq!(forward.access_paths().stops(), vec![0]);
        assert_eq!(forward.egress_paths().stops(), vec![2]);

        let reverse =
            SearchContext::new(request(SearchDirection::Reverse), RaptorTuningParameters::default(), &data)
                .unwrap();
        assert!(!reverse.search_forward());
        assert_eq!(reverse.access_paths().stops(), vec![2]);
        assert_eq!(reverse.egress_paths().stops(), vec![0]);
        assert_eq!(
            reverse.iteration_minutes().collect::<Vec<_>>(),
            (0..10).map(|step| 42_660 + 60 * step).collect::<Vec<_>>()
        );
    }

    #[test]
    fn cost_calculator_is_only_built_for_multi_criteria() {
        let data = transit_data();
        let standard =
            SearchContext::new(request(SearchDirection::Forward), RaptorTuningParameters::default(), &data)
                .unwrap();
        assert!(standard.cost_calculator().is_none());

        let multi_criteria = SearchContext::new(
            request(SearchDirection::Forward)
                .with_profile(SearchProfile::MultiCriteria)
                .with_mc_cost_params(McCostParams::default()),
            RaptorTuningParameters::default(),
            &data,
        )
        .unwrap();
        let cost_calculator = multi_criteria.cost_calculator().unwrap();
        assert_eq!(cost_calculator.board_cost(true), 60_000);
    }

    #[test]
    fn stop_visit_cost_must_cover_every_stop() {
        let data = transit_data();
        let result = SearchContext::new(
            request(SearchDirection::Forward)
                .with_profile(SearchProfile::MultiCriteria)
                .with_stop_visit_cost(vec![10, 20]),
            RaptorTuningParameters::default(),
            &data,
        );
        assert_eq!(
            result.err(),
            Some(ConfigError::StopVisitCostSize {
                given: 2,
                expected: 3
            })
        );
    }

    #[test]
    fn lifecycle_drives_the_round_dependent_components() {
        let data = transit_data();
        let mut context =
            SearchContext::new(request(SearchDirection::Forward), RaptorTuningParameters::default(), &data)
                .unwrap();
        context.route_search_start();
        context.setup_iteration(36_000);
        assert_eq!(context.round_tracker().round(), 0);

        assert_eq!(context.next_round(), Some(1));
        assert_eq!(context.slack_provider().board_slack(0), 0);
        context.round_complete(false);

        assert_eq!(context.next_round(), Some(2));
        assert_eq!(context.slack_provider().board_slack(0), 60);
        assert_eq!(context.slack_provider().accumulated_slack(0), 60);
        context.iteration_complete();
    }

    fn boarded_trip(context: &SearchContext<Schedule, InMemoryTransitData>, time: i32) -> Option<usize> {
        context
            .trip_search(0)
            .search(time, 0, None)
            .map(|event| event.trip_index)
    }

    #[rstest]
    #[case(SearchProfile::Standard)]
    #[case(SearchProfile::NoWaitBestTime)]
    #[case(SearchProfile::MultiCriteria)]
    fn exact_trip_search_is_used_in_first_round_after_first_iteration(#[case] profile: SearchProfile) {
        let data = transit_data();
        let mut context = SearchContext::new(
            request(SearchDirection::Forward).with_profile(profile),
            RaptorTuningParameters::default(),
            &data,
        )
        .unwrap();

        context.setup_iteration(36_060);
        context.next_round();
        assert!(!context.uses_exact_trip_search());
        assert_eq!(boarded_trip(&context, 36_500), Some(1));
        context.round_complete(false);
        context.iteration_complete();

        context.setup_iteration(36_000);
        assert_eq!(context.next_round(), Some(1));
        assert!(context.uses_exact_trip_search());
        // the next trip leaves more than one iteration step later
        assert_eq!(boarded_trip(&context, 36_500), None);
        assert_eq!(boarded_trip(&context, 36_550), Some(1));
        context.round_complete(false);

        assert_eq!(context.next_round(), Some(2));
        assert!(!context.uses_exact_trip_search());
        assert_eq!(boarded_trip(&context, 36_500), Some(1));
    }

    #[test]
    fn time_dependent_access_disables_the_exact_trip_search() {
        let data = transit_data();
        let opening_hours = OpeningHours::new(36_300, 37_000).unwrap();
        let mut context = SearchContext::new(
            request(SearchDirection::Forward),
            RaptorTuningParameters::default(),
            &data,
        )
        .unwrap();
        context.setup_iteration(36_060);
        context.iteration_complete();

        let walk = AccessEgress::walk(0, PositiveDuration::from_seconds(120));
        assert_eq!(context.access_departure_time(&walk, 36_000), Some(36_000));
        assert!(!context.has_time_dependent_access());

        let opening = walk.with_opening_hours(opening_hours);
        context.setup_iteration(36_000);
        assert_eq!(context.access_departure_time(&opening, 36_000), Some(36_300));
        assert!(context.has_time_dependent_access());
        context.next_round();
        assert!(!context.uses_exact_trip_search());
        assert_eq!(boarded_trip(&context, 36_500), Some(1));
    }

    #[test]
    fn trip_times_are_recovered_in_the_search_direction() {
        let data = transit_data();
        let context =
            SearchContext::new(request(SearchDirection::Forward), RaptorTuningParameters::default(), &data)
                .unwrap();
        let trip = data.timetable(0).schedules()[1].clone();
        let leg = context.recover_trip_times(&trip, 0, 2, 37_200).unwrap();
        assert_eq!((leg.board_stop_pos, leg.alight_stop_pos), (0, 2));
    }
}
