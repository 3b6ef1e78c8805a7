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

//! Direction-agnostic time arithmetic.
//!
//! A Range-RAPTOR search runs either forward in time (depart after) or
//! backward in time (arrive before). The round-by-round algorithm is written
//! once against [`TransitCalculator`], and the forward and reverse
//! implementations map every operation onto the right time direction.

mod forward;
mod reverse;

pub use forward::ForwardTransitCalculator;
pub use reverse::ReverseTransitCalculator;

use std::fmt::Debug;
use std::iter::Rev;
use std::ops::Range;

use crate::engine::access_egress::AccessEgress;
use crate::engine::trip_search::TripScheduleSearch;
use crate::transit_data::{Timetable, TripSchedule};

pub trait TransitCalculator<T: TripSchedule>: Debug {
    /// `true` for a depart-after search.
    fn search_forward(&self) -> bool;

    /// Moves `time` by `duration` in the search direction.
    fn plus_duration(&self, time: i32, duration: i32) -> i32;

    /// Moves `time` by `duration` against the search direction.
    fn minus_duration(&self, time: i32, duration: i32) -> i32;

    /// Elapsed time from `time_a` to `time_b` in the search direction.
    fn duration(&self, time_a: i32, time_b: i32) -> i32;

    /// Earliest time at which a trip may be boarded after reaching its stop
    /// at `prev_stop_arrival_time`.
    fn earliest_board_time(&self, prev_stop_arrival_time: i32, board_slack: i32) -> i32 {
        self.plus_duration(prev_stop_arrival_time, board_slack)
    }

    /// Time at which the stop is reached when leaving `trip` at
    /// `stop_position_in_pattern`, slack included.
    fn stop_arrival_time(&self, trip: &T, stop_position_in_pattern: usize, alight_slack: i32) -> i32;

    /// Time at which the traveler must be at the stop to board `trip` at
    /// `stop_position_in_pattern`, slack included.
    fn stop_departure_time(&self, trip: &T, stop_position_in_pattern: usize, board_slack: i32) -> i32;

    /// Returns `true` if `subject` is strictly better than `candidate`.
    fn is_best(&self, subject: i32, candidate: i32) -> bool;

    /// The time used for stops that are not reached, worse than any real time.
    fn unreached_time(&self) -> i32;

    /// Returns `true` if `time` is beyond the opposite bound of the search.
    fn exceeds_time_limit(&self, time: i32) -> bool;

    /// Human readable reason for a time rejected by `exceeds_time_limit`.
    fn exceeds_time_limit_reason(&self) -> String;

    /// The departure (or arrival) minutes iterated by Range-RAPTOR, from the
    /// last one in search order to the first.
    fn range_raptor_minutes(&self) -> RangeRaptorMinutes;

    /// `true` when the search window is not larger than the iteration step.
    fn one_iteration_only(&self) -> bool;

    /// Positions of a pattern with `nb_of_stops` stops, in search order.
    fn pattern_stop_iterator(&self, nb_of_stops: usize) -> PatternStopIterator;

    /// Positions following `stop_position_in_pattern` in search order.
    fn pattern_stop_iterator_after(
        &self,
        stop_position_in_pattern: usize,
        nb_of_stops: usize,
    ) -> PatternStopIterator;

    /// Whether a search in this direction may board at `stop_position_in_pattern`.
    fn boarding_possible_at(&self, pattern: &T::Pattern, stop_position_in_pattern: usize) -> bool;

    /// Whether a search in this direction may alight at `stop_position_in_pattern`.
    fn alighting_possible_at(&self, pattern: &T::Pattern, stop_position_in_pattern: usize) -> bool;

    /// Adjusts `time` to the opening hours of `access`.
    /// Returns `None` when the leg cannot be used at all.
    fn departure_time(&self, access: &AccessEgress, time: i32) -> Option<i32>;

    /// The trip search boarding (forward) or alighting (reverse) on `timetable`.
    fn create_trip_search<'t>(
        &self,
        timetable: &'t dyn Timetable<T>,
    ) -> Box<dyn TripScheduleSearch<'t, T> + 't>
    where
        T: 't;

    /// Like `create_trip_search`, but the search only accepts a trip when it
    /// is strictly better than the time limit shifted by one iteration step.
    /// Used in the first round of every iteration but the first one.
    fn create_exact_trip_search<'t>(
        &self,
        timetable: &'t dyn Timetable<T>,
    ) -> Box<dyn TripScheduleSearch<'t, T> + 't>
    where
        T: 't;
}

/// Iteration minutes of a Range-RAPTOR search.
#[derive(Debug, Clone)]
pub struct RangeRaptorMinutes {
    next: i32,
    delta: i32,
    remaining: usize,
}

impl RangeRaptorMinutes {
    pub(crate) fn new(first: i32, delta: i32, count: usize) -> Self {
        Self {
            next: first,
            delta,
            remaining: count,
        }
    }
}

impl Iterator for RangeRaptorMinutes {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.next = current + self.delta;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RangeRaptorMinutes {}

/// Stop positions of a pattern in search order.
#[derive(Debug, Clone)]
pub enum PatternStopIterator {
    Ascending(Range<usize>),
    Descending(Rev<Range<usize>>),
}

impl Iterator for PatternStopIterator {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self {
            PatternStopIterator::Ascending(range) => range.next(),
            PatternStopIterator::Descending(range) => range.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            PatternStopIterator::Ascending(range) => range.size_hint(),
            PatternStopIterator::Descending(range) => range.size_hint(),
        }
    }
}

impl ExactSizeIterator for PatternStopIterator {}

// Number of iterations covering `window` with `step`. The window end is
// exclusive: a window of one hour with a one minute step gives 60 minutes.
pub(crate) fn nb_of_iterations(window: i32, step: i32) -> usize {
    if window <= step {
        return 1;
    }
    let count = (i64::from(window) + i64::from(step) - 1) / i64::from(step);
    count as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 60, 1)]
    #[case(60, 60, 1)]
    #[case(61, 60, 2)]
    #[case(3600, 60, 60)]
    #[case(3630, 60, 61)]
    fn iterations_cover_the_window(#[case] window: i32, #[case] step: i32, #[case] expected: usize) {
        assert_eq!(nb_of_iterations(window, step), expected);
    }

    #[test]
    fn minutes_iterator_is_exact_size() {
        let minutes = RangeRaptorMinutes::new(300, -60, 3);
        assert_eq!(minutes.len(), 3);
        assert_eq!(minutes.collect::<Vec<_>>(), vec![300, 240, 180]);
    }
}
