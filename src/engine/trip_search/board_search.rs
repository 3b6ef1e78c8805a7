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

/// Finds the first trip departing at or after the earliest board time.
///
/// Small timetables are scanned linearly. For timetables with more than
/// `binary_search_threshold` trips, a binary search first narrows the range
/// to scan, relying on trips never overtaking one another.
pub struct TripScheduleBoardSearch<'t, T> {
    timetable: &'t dyn Timetable<T>,
    binary_search_threshold: usize,
}

impl<'t, T: TripSchedule> TripScheduleBoardSearch<'t, T> {
    /// A threshold below 1 is raised to 1, the binary search needs two
    /// trips to split the range.
    pub fn new(timetable: &'t dyn Timetable<T>, binary_search_threshold: usize) -> Self {
        Self {
            timetable,
            binary_search_threshold: binary_search_threshold.max(1),
        }
    }

    fn departure(&self, trip_index: usize, stop_position_in_pattern: usize) -> i32 {
        self.timetable
            .trip_schedule(trip_index)
            .departure(stop_position_in_pattern)
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
            time: trip.departure(stop_position_in_pattern),
            stop_position_in_pattern,
            time_limit,
        }
    }

    // Scans trips with index in `[lower_bound, upper_bound)` from the last
    // one down, keeping the earliest trip that can be boarded.
    fn find_board_backward(
        &self,
        lower_bound: usize,
        upper_bound: usize,
        earliest_board_time: i32,
        stop_position_in_pattern: usize,
    ) -> Option<usize> {
        let mut candidate = None;
        for trip_index in (lower_bound..upper_bound).rev() {
            if self.departure(trip_index, stop_position_in_pattern) < earliest_board_time {
                break;
            }
            if self.timetable.is_trip_in_service(trip_index) {
                candidate = Some(trip_index);
            }
        }
        candidate
    }

    fn find_board_forward(
        &self,
        lower_bound: usize,
        earliest_board_time: i32,
        stop_position_in_pattern: usize,
    ) -> Option<usize> {
        (lower_bound..self.timetable.number_of_trip_schedules()).find(|trip_index| {
            self.timetable.is_trip_in_service(*trip_index)
                && self.departure(*trip_index, stop_position_in_pattern) >= earliest_board_time
        })
    }

    fn find_board_with_binary_search(
        &self,
        earliest_board_time: i32,
        stop_position_in_pattern: usize,
    ) -> Option<usize> {
        let nb_of_trips = self.timetable.number_of_trip_schedules();
        let mut lower = 0;
        let mut upper = nb_of_trips;

        while upper - lower > self.binary_search_threshold {
            let middle = (lower + upper) / 2;
            if self.departure(middle, stop_position_in_pattern) < earliest_board_time {
                lower = middle;
            } else {
                upper = middle;
            }
        }

        let guess = if upper < nb_of_trips { upper } else { lower };
        if self.departure(guess, stop_position_in_pattern) >= earliest_board_time {
            self.find_board_backward(lower, guess + 1, earliest_board_time, stop_position_in_pattern)
                .or_else(|| {
                    self.find_board_forward(guess + 1, earliest_board_time, stop_position_in_pattern)
                })
        } else {
            self.find_board_forward(guess + 1, earliest_board_time, stop_position_in_pattern)
        }
    }
}

impl<'t, T: TripSchedule + 't> TripScheduleSearch<'t, T> for TripScheduleBoardSearch<'t, T> {
    fn search(
        &self,
        earliest_board_time: i32,
        stop_position_in_pattern: usize,
        trip_index_limit: Option<usize>,
    ) -> Option<BoardOrAlightEvent<'t, T>> {
        let nb_of_trips = self.timetable.number_of_trip_schedules();
        let found = match trip_index_limit {
            Some(limit) => self.find_board_backward(
                0,
                limit.min(nb_of_trips),
                earliest_board_time,
                stop_position_in_pattern,
            ),
            None if nb_of_trips > self.binary_search_threshold => {
                self.find_board_with_binary_search(earliest_board_time, stop_position_in_pattern)
            }
            None => self.find_board_forward(0, earliest_board_time, stop_position_in_pattern),
        };
        found.map(|trip_index| self.event(trip_index, stop_position_in_pattern, earliest_board_time))
    }
}
