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

use std::marker::PhantomData;

use super::{BoardOrAlightEvent, TripScheduleSearch};
use crate::engine::calculator::TransitCalculator;
use crate::transit_data::TripSchedule;

/// Wraps a trip search and only accepts trips that do not force a wait
/// longer than one iteration step.
///
/// A trip is kept only if its time is strictly better than the time limit
/// shifted by `slack` in the search direction. Trips found beyond that bound
/// belong to a previous Range-RAPTOR iteration.
pub struct TripScheduleExactMatchSearch<'t, T, C> {
    delegate: Box<dyn TripScheduleSearch<'t, T> + 't>,
    calculator: C,
    slack: i32,
    _trip: PhantomData<&'t T>,
}

impl<'t, T, C> TripScheduleExactMatchSearch<'t, T, C>
where
    T: TripSchedule + 't,
    C: TransitCalculator<T>,
{
    pub fn new(delegate: Box<dyn TripScheduleSearch<'t, T> + 't>, calculator: C, slack: i32) -> Self {
        Self {
            delegate,
            calculator,
            slack,
            _trip: PhantomData,
        }
    }
}

impl<'t, T, C> TripScheduleSearch<'t, T> for TripScheduleExactMatchSearch<'t, T, C>
where
    T: TripSchedule + 't,
    C: TransitCalculator<T>,
{
    fn search(
        &self,
        time_limit: i32,
        stop_position_in_pattern: usize,
        trip_index_limit: Option<usize>,
    ) -> Option<BoardOrAlightEvent<'t, T>> {
        let bound = self.calculator.plus_duration(time_limit, self.slack);
        self.delegate
            .search(time_limit, stop_position_in_pattern, trip_index_limit)
            .filter(|event| self.calculator.is_best(event.time, bound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RaptorTuningParameters, SearchParams};
    use crate::engine::calculator::{ForwardTransitCalculator, ReverseTransitCalculator};
    use crate::transit_data::in_memory::{InMemoryTimetable, Pattern, Schedule};
    use std::sync::Arc;

    fn timetable() -> InMemoryTimetable {
        let pattern = Arc::new(Pattern::new("P1", vec![0, 1]));
        let trips = [36_000, 36_060, 36_300]
            .iter()
            .map(|time| Schedule::with_times(&pattern, &[*time, time + 600]).unwrap())
            .collect();
        InMemoryTimetable::new(&pattern, trips).unwrap()
    }

    #[test]
    fn forward_exact_match_rejects_trips_departing_one_step_later() {
        let timetable = timetable();
        let calculator: ForwardTransitCalculator<Schedule> = ForwardTransitCalculator::new(
            &SearchParams::depart_after(36_000),
            &RaptorTuningParameters::default(),
        )
        .unwrap();
        let search = calculator.create_exact_trip_search(&timetable);
        assert_eq!(search.search(36_000, 0, None).unwrap().trip_index, 0);
        assert_eq!(search.search(36_001, 0, None).unwrap().trip_index, 1);
        // 36_300 is more than one step after the limit
        assert!(search.search(36_061, 0, None).is_none());
    }

    #[test]
    fn reverse_exact_match_rejects_trips_arriving_one_step_earlier() {
        let timetable = timetable();
        let calculator: ReverseTransitCalculator<Schedule> = ReverseTransitCalculator::new(
            &SearchParams::arrive_before(43_200),
            &RaptorTuningParameters::default(),
        )
        .unwrap();
        let search = calculator.create_exact_trip_search(&timetable);
        assert_eq!(search.search(36_700, 1, None).unwrap().trip_index, 1);
        assert!(search.search(36_720, 1, None).is_none());
    }
}
