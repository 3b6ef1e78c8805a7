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

use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

use super::forward::{checked_step, checked_threshold, checked_window};
use super::{nb_of_iterations, PatternStopIterator, RangeRaptorMinutes, TransitCalculator};
use crate::config::{RaptorTuningParameters, SearchParams};
use crate::engine::access_egress::AccessEgress;
use crate::engine::trip_search::{
    TripScheduleAlightSearch, TripScheduleExactMatchSearch, TripScheduleSearch,
};
use crate::error::ConfigError;
use crate::time::{time_to_str, REVERSE_UNREACHED};
use crate::transit_data::{Timetable, TripPattern, TripSchedule};

/// Time arithmetic of an arrive-before search: the search starts at the
/// destination and moves backward in time, later departures are better.
///
/// Trips are "boarded" at their arrival side and "alighted" at their
/// departure side.
pub struct ReverseTransitCalculator<T> {
    trip_search_binary_search_threshold: usize,
    latest_arrival_time: i32,
    search_window_in_seconds: i32,
    earliest_acceptable_departure_time: i32,
    iteration_step: i32,
    _trip: PhantomData<fn() -> T>,
}

impl<T> ReverseTransitCalculator<T> {
    /// Fails if the latest arrival time is not set. An unset earliest
    /// departure time means departures are never rejected.
    pub fn new(
        search_params: &SearchParams,
        tuning: &RaptorTuningParameters,
    ) -> Result<Self, ConfigError> {
        let latest_arrival_time = search_params
            .latest_arrival_time
            .ok_or(ConfigError::LatestArrivalTimeNotSet)?;
        let search_window_in_seconds = checked_window(search_params)?;
        let iteration_step = checked_step(tuning)?;
        let trip_search_binary_search_threshold = checked_threshold(tuning)?;
        Ok(Self {
            trip_search_binary_search_threshold,
            latest_arrival_time,
            search_window_in_seconds,
            earliest_acceptable_departure_time: search_params
                .earliest_departure_time
                .unwrap_or(REVERSE_UNREACHED),
            iteration_step,
            _trip: PhantomData,
        })
    }

    pub fn latest_arrival_time(&self) -> i32 {
        self.latest_arrival_time
    }

    pub fn earliest_acceptable_departure_time(&self) -> i32 {
        self.earliest_acceptable_departure_time
    }

    pub fn iteration_step(&self) -> i32 {
        self.iteration_step
    }
}

impl<T> Clone for ReverseTransitCalculator<T> {
    fn clone(&self) -> Self {
        Self {
            trip_search_binary_search_threshold: self.trip_search_binary_search_threshold,
            latest_arrival_time: self.latest_arrival_time,
            search_window_in_seconds: self.search_window_in_seconds,
            earliest_acceptable_departure_time: self.earliest_acceptable_departure_time,
            iteration_step: self.iteration_step,
            _trip: PhantomData,
        }
    }
}

impl<T> Debug for ReverseTransitCalculator<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReverseTransitCalculator")
            .field("latest_arrival_time", &time_to_str(self.latest_arrival_time))
            .field("search_window_in_seconds", &self.search_window_in_seconds)
            .field(
                "earliest_acceptable_departure_time",
                &time_to_str(self.earliest_acceptable_departure_time),
            )
            .field("iteration_step", &self.iteration_step)
            .finish()
    }
}

impl<T: TripSchedule> TransitCalculator<T> for ReverseTransitCalculator<T> {
    fn search_forward(&self) -> bool {
        false
    }

    fn plus_duration(&self, time: i32, duration: i32) -> i32 {
        time - duration
    }

    fn minus_duration(&self, time: i32, duration: i32) -> i32 {
        time + duration
    }

    fn duration(&self, time_a: i32, time_b: i32) -> i32 {
        time_a - time_b
    }

    // The "arrival" of a reverse search is the departure of the trip.
    fn stop_arrival_time(&self, trip: &T, stop_position_in_pattern: usize, alight_slack: i32) -> i32 {
        trip.departure(stop_position_in_pattern) - alight_slack
    }

    fn stop_departure_time(&self, trip: &T, stop_position_in_pattern: usize, board_slack: i32) -> i32 {
        trip.arrival(stop_position_in_pattern) + board_slack
    }

    fn is_best(&self, subject: i32, candidate: i32) -> bool {
        subject > candidate
    }

    fn unreached_time(&self) -> i32 {
        REVERSE_UNREACHED
    }

    fn exceeds_time_limit(&self, time: i32) -> bool {
        time < self.earliest_acceptable_departure_time
    }

    fn exceeds_time_limit_reason(&self) -> String {
        format!(
            "The departure time exceeds the time limit, depart to early: {}.",
            time_to_str(self.earliest_acceptable_departure_time)
        )
    }

    fn range_raptor_minutes(&self) -> RangeRaptorMinutes {
        let count = if self.one_iteration_only() {
            1
        } else {
            nb_of_iterations(self.search_window_in_seconds, self.iteration_step)
        };
        let first = self.latest_arrival_time - (count as i32 - 1) * self.iteration_step;
        RangeRaptorMinutes::new(first, self.iteration_step, count)
    }

    fn one_iteration_only(&self) -> bool {
        self.search_window_in_seconds <= self.iteration_step
    }

    fn pattern_stop_iterator(&self, nb_of_stops: usize) -> PatternStopIterator {
        PatternStopIterator::Descending((0..nb_of_stops).rev())
    }

    fn pattern_stop_iterator_after(
        &self,
        stop_position_in_pattern: usize,
        nb_of_stops: usize,
    ) -> PatternStopIterator {
        let end = stop_position_in_pattern.min(nb_of_stops);
        PatternStopIterator::Descending((0..end).rev())
    }

    fn boarding_possible_at(&self, pattern: &T::Pattern, stop_position_in_pattern: usize) -> bool {
        pattern.alighting_possible_at(stop_position_in_pattern)
    }

    fn alighting_possible_at(&self, pattern: &T::Pattern, stop_position_in_pattern: usize) -> bool {
        pattern.boarding_possible_at(stop_position_in_pattern)
    }

    fn departure_time(&self, access: &AccessEgress, time: i32) -> Option<i32> {
        access.latest_arrival_time(time)
    }

    fn create_trip_search<'t>(
        &self,
        timetable: &'t dyn Timetable<T>,
    ) -> Box<dyn TripScheduleSearch<'t, T> + 't>
    where
        T: 't,
    {
        Box::new(TripScheduleAlightSearch::new(
            timetable,
            self.trip_search_binary_search_threshold,
        ))
    }

    fn create_exact_trip_search<'t>(
        &self,
        timetable: &'t dyn Timetable<T>,
    ) -> Box<dyn TripScheduleSearch<'t, T> + 't>
    where
        T: 't,
    {
        Box::new(TripScheduleExactMatchSearch::new(
            self.create_trip_search(timetable),
            self.clone(),
            self.iteration_step,
        ))
    }
}
