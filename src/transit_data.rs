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

//! Read-only view of the timetable data consumed by the search core.
//!
//! The data is owned by the caller and shared by all concurrent searches;
//! nothing in the core mutates it.

pub mod in_memory;

use std::fmt::Debug;

/// An ordered sequence of stops served by trips.
pub trait TripPattern: Debug {
    /// Number of stop visits in this pattern.
    fn number_of_stops_in_pattern(&self) -> usize;

    /// Returns the index of the stop visited at `stop_position_in_pattern`.
    ///
    /// A pattern may visit the same stop more than once.
    ///
    /// Panics if `stop_position_in_pattern` is not a valid position.
    fn stop_index(&self, stop_position_in_pattern: usize) -> usize;

    /// Returns `true` if passengers may board at `stop_position_in_pattern`.
    fn boarding_possible_at(&self, _stop_position_in_pattern: usize) -> bool {
        true
    }

    /// Returns `true` if passengers may alight at `stop_position_in_pattern`.
    fn alighting_possible_at(&self, _stop_position_in_pattern: usize) -> bool {
        true
    }

    /// Index used to look up board and alight slack for this pattern.
    fn slack_index(&self) -> usize {
        0
    }

    /// A short human readable identification, used in error messages.
    fn debug_info(&self) -> String;
}

/// One run of a vehicle along a `TripPattern`.
pub trait TripSchedule: Debug {
    type Pattern: TripPattern;

    /// Arrival time at `stop_position_in_pattern`.
    ///
    /// Panics if `stop_position_in_pattern` is not a valid position.
    fn arrival(&self, stop_position_in_pattern: usize) -> i32;

    /// Departure time at `stop_position_in_pattern`.
    ///
    /// Panics if `stop_position_in_pattern` is not a valid position.
    fn departure(&self, stop_position_in_pattern: usize) -> i32;

    fn pattern(&self) -> &Self::Pattern;
}

/// The trips of one pattern.
///
/// Precondition: trips are sorted by increasing departure time at the first
/// stop of the pattern, and trips running on the same day never overtake one
/// another. Hence the order holds for the departure and arrival times at every
/// stop position. The core does not check this, and trip searches return
/// wrong trips when it does not hold.
pub trait Timetable<T: TripSchedule> {
    fn number_of_trip_schedules(&self) -> usize;

    /// Panics if `trip_index >= number_of_trip_schedules()`.
    fn trip_schedule(&self, trip_index: usize) -> &T;

    /// Returns `false` if the trip at `trip_index` does not run on the
    /// searched day. Such trips are skipped by the linear part of trip searches.
    fn is_trip_in_service(&self, _trip_index: usize) -> bool {
        true
    }
}

/// Entry point of the transit data for one search.
pub trait TransitDataProvider<T: TripSchedule> {
    type Timetable: Timetable<T>;

    /// An upper bound on stop indices: every stop index is `< number_of_stops()`.
    fn number_of_stops(&self) -> usize;

    fn number_of_patterns(&self) -> usize;

    /// Panics if `pattern_index >= number_of_patterns()`.
    fn timetable(&self, pattern_index: usize) -> &Self::Timetable;
}
