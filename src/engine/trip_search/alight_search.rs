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

use super::{BoardOrAlightEvent, TripScheduleSearch};
use crate::transit_data::{Timetable, TripSchedule};

/// Finds the last trip arriving at or before the latest alight time.
///
/// This is the trip search of a reverse search, mirroring
/// [`TripScheduleBoardSearch`](super::TripScheduleBoardSearch).
pub struct TripScheduleAlightSearch<'t, T> {
    timetable: &'t dyn Timetable<T>,
    binary_search_threshold: usize,
}

impl<'t, T: TripSchedule> TripScheduleAlightSearch<'t, T> {
    /// A threshold below 1 is raised to 1, the binary search needs two
    /// trips to split the range.
    pub fn new(timetable: &'t dyn Timetable<T>, binary_search_threshold: usize) -> Self {
        Self {
            timetable,
            binary_search_threshold: binary_search_threshold.max(1),
        }
    }

    fn arrival(&self, trip_index: usize, stop_position_in_pattern: usize) -> i32 {
        self.timetable
            .trip_schedule(trip_index)
            .arrival(stop_position_in_pattern)
    }

    fn event(
        &self,
        trip_index: usize,
        stop_position_in_pattern: usize,
        time_limit: i32,
    ) -> BoardOrAlightEvent<'t, T> {
        let trip = self.timetable.trip_schedule(trip_index);
        BoardOrAlightEvent {
            trip_index,
            trip,
            time: trip.arrival(stop_position_in_pattern),
            stop_position_in_pattern,
            time_limit,
        }
    }

    // Scans trips with index in `[lower_bound, upper_bound)` from the first
    // one up, keeping the latest trip that can be alighted.
    fn find_alight_forward(
        &self,
        lower_bound: usize,
        upper_bound: usize,
        latest_alight_time: i32,
        stop_position_in_pattern: usize,
    ) -> Option<usize> {
        let mut candidate = None;
        for trip_index in lower_bound..upper_bound {
            if self.arrival(trip_index, stop_position_in_pattern) > latest_alight_time {
                break;
            }
            if self.timetable.is_trip_in_service(trip_index) {
                candidate = Some(trip_index);
            }
        }
        candidate
    }

    fn find_alight_backward(
        &self,
        upper_bound: usize,
        latest_alight_time: i32,
        stop_position_in_pattern: usize,
    ) -> Option<usize> {
        (0..upper_bound).rev().find(|trip_index| {
            self.timetable.is_trip_in_service(*trip_index)
                && self.arrival(*trip_index, stop_position_in_pattern) <= latest_alight_time
        })
    }

    fn find_alight_with_binary_search(
        &self,
        latest_alight_time: i32,
        stop_position_in_pattern: usize,
    ) -> Option<usize> {
        let mut lower = 0;
        let mut upper = self.timetable.number_of_trip_schedules();

        while upper - lower > self.binary_search_threshold {
            let middle = (lower + upper) / 2;
            if self.arrival(middle, stop_position_in_pattern) > latest_alight_time {
                upper = middle;
            } else {
                lower = middle;
            }
        }

        if self.arrival(lower, stop_position_in_pattern) <= latest_alight_time {
            self.find_alight_forward(lower, upper, latest_alight_time, stop_position_in_pattern)
                .or_else(|| {
                    self.find_alight_backward(lower, latest_alight_time, stop_position_in_pattern)
                })
        } else {
            self.find_alight_backward(lower, latest_alight_time, stop_position_in_pattern)
        }
    }
}

impl<'t, T: TripSchedule + 't> TripScheduleSearch<'t, T> for TripScheduleAlightSearch<'t, T> {
    fn search(
        &self,
        latest_alight_time: i32,
        stop_position_in_pattern: usize,
        trip_index_limit: Option<usize>,
    ) -> Option<BoardOrAlightEvent<'t, T>> {
        let nb_of_trips = self.timetable.number_of_trip_schedules();
        let found = match trip_index_limit {
            Some(limit) => self.find_alight_forward(
                limit.saturating_add(1),
                nb_of_trips,
                latest_alight_time,
                stop_position_in_pattern,
            ),
            None if nb_of_trips > self.binary_search_threshold => {
                self.find_alight_with_binary_search(latest_alight_time, stop_position_in_pattern)
            }
            None => self.find_alight_backward(nb_of_trips, latest_alight_time, stop_position_in_pattern),
        };
        found.map(|trip_index| self.event(trip_index, stop_position_in_pattern, latest_alight_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transit_data::in_memory::{InMemoryTimetable, Pattern, Schedule};
    use rstest::rstest;
    use std::sync::Arc;

    fn timetable(last_stop_arrivals: &[i32]) -> InMemoryTimetable {
        let pattern = Arc::new(Pattern::new("P1", vec![0, 1]));
        let trips = last_stop_arrivals
            .iter()
            .map(|time| Schedule::with_times(&pattern, &[time - 1_200, *time]).unwrap())
            .collect();
        InMemoryTimetable::new(&pattern, trips).unwrap()
    }

    #[test]
    fn alight_last_arrival_before_latest_alight_time() {
        let timetable = timetable(&[35_700, 35_900, 36_100]);
        let search = TripScheduleAlightSearch::new(&timetable, 50);
        let event = search.search(36_000, 1, None).unwrap();
        assert_eq!(event.trip_index, 1);
        assert_eq!(event.time, 35_900);
        assert_eq!(event.time_limit, 36_000);
    }

    #[test]
    fn nothing_to_alight_before_the_first_arrival() {
        let timetable = timetable(&[35_700, 35_900, 36_100]);
        let search = TripScheduleAlightSearch::new(&timetable, 50);
        assert!(search.search(35_699, 1, None).is_none());
        assert_eq!(search.search(35_700, 1, None).unwrap().trip_index, 0);
    }

    #[test]
    fn trip_index_limit_is_exclusive() {
        let timetable = timetable(&[35_700, 35_900, 36_100]);
        let search = TripScheduleAlightSearch::new(&timetable, 50);
        assert_eq!(search.search(36_000, 1, Some(0)).unwrap().trip_index, 1);
        assert!(search.search(36_000, 1, Some(1)).is_none());
        assert!(search.search(36_200, 1, Some(2)).is_none());
    }

    #[test]
    fn out_of_service_trips_are_skipped_by_linear_scan() {
        let pattern = Arc::new(Pattern::new("P1", vec![0, 1]));
        let trips = vec![
            Schedule::with_times(&pattern, &[34_500, 35_700]).unwrap(),
            Schedule::with_times(&pattern, &[34_700, 35_900]).unwrap().not_in_service(),
        ];
        let timetable = InMemoryTimetable::new(&pattern, trips).unwrap();
        let search = TripScheduleAlightSearch::new(&timetable, 50);
        assert_eq!(search.search(36_000, 1, None).unwrap().trip_index, 0);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn tiny_threshold_still_finds_the_trip(#[case] threshold: usize) {
        let single = timetable(&[36_000]);
        let search = TripScheduleAlightSearch::new(&single, threshold);
        assert_eq!(search.search(36_100, 1, None).unwrap().trip_index, 0);
        assert!(search.search(35_900, 1, None).is_none());

        let arrivals: Vec<i32> = (0..7).map(|index| 36_000 + 60 * index).collect();
        let timetable = timetable(&arrivals);
        let search = TripScheduleAlightSearch::new(&timetable, threshold);
        assert_eq!(search.search(36_100, 1, None).unwrap().trip_index, 1);
        assert_eq!(search.search(40_000, 1, None).unwrap().trip_index, 6);
    }

    #[rstest]
    #[case(0, None)]
    #[case(36_000, Some(0))]
    #[case(36_059, Some(0))]
    #[case(36_000 + 60 * 50, Some(50))]
    #[case(36_000 + 60 * 99, Some(99))]
    #[case(i32::MAX, Some(99))]
    fn binary_search_gives_same_result_as_linear_scan(
        #[case] latest_alight_time: i32,
        #[case] expected: Option<usize>,
    ) {
        let arrivals: Vec<i32> = (0..100).map(|index| 36_000 + 60 * index).collect();
        let timetable = timetable(&arrivals);
        let binary = TripScheduleAlightSearch::new(&timetable, 4);
        let linear = TripScheduleAlightSearch::new(&timetable, 1_000);
        let binary_result = binary
            .search(latest_alight_time, 1, None)
            .map(|event| event.trip_index);
        let linear_result = linear
            .search(latest_alight_time, 1, None)
            .map(|event| event.trip_index);
        assert_eq!(binary_result, expected);
        assert_eq!(linear_result, expected);
    }
}
