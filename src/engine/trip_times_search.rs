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

//! Recovers the board and alight positions of a transit leg when a path is
//! built from the search state, which only records stops and times.
//!
//! A pattern may visit the same stop more than once. The position whose time
//! is known is found first, then the other position is searched from there,
//! so that both positions belong to the same run along the pattern.

use crate::error::InvariantViolation;
use crate::time::time_to_str;
use crate::transit_data::{TripPattern, TripSchedule};

/// Board and alight positions of a leg on `trip`.
#[derive(Debug)]
pub struct BoardAndAlightTime<'t, T> {
    pub trip: &'t T,
    pub board_stop_pos: usize,
    pub alight_stop_pos: usize,
}

impl<'t, T: TripSchedule> BoardAndAlightTime<'t, T> {
    pub fn board_time(&self) -> i32 {
        self.trip.departure(self.board_stop_pos)
    }

    pub fn alight_time(&self) -> i32 {
        self.trip.arrival(self.alight_stop_pos)
    }
}

impl<'t, T> Clone for BoardAndAlightTime<'t, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'t, T> Copy for BoardAndAlightTime<'t, T> {}

/// Finds the leg from `from_stop` to `to_stop` on `trip` for a path built by
/// a forward search, where the arrival at `to_stop` is at most
/// `latest_arrival_time`.
pub fn find_trip_forward_search<'t, T: TripSchedule>(
    trip: &'t T,
    from_stop: usize,
    to_stop: usize,
    latest_arrival_time: i32,
) -> Result<BoardAndAlightTime<'t, T>, InvariantViolation> {
    let pattern = trip.pattern();
    let not_found = || trip_times_not_found(trip, from_stop, to_stop, "latest arrival time", latest_arrival_time);

    let alight_stop_pos = (0..pattern.number_of_stops_in_pattern())
        .rev()
        .find(|position| {
            pattern.stop_index(*position) == to_stop && trip.arrival(*position) <= latest_arrival_time
        })
        .ok_or_else(not_found)?;

    let board_stop_pos = (0..alight_stop_pos)
        .rev()
        .find(|position| pattern.stop_index(*position) == from_stop)
        .ok_or_else(not_found)?;

    Ok(BoardAndAlightTime {
        trip,
        board_stop_pos,
        alight_stop_pos,
    })
}

/// Finds the leg from `from_stop` to `to_stop` on `trip` for a path built by
/// a reverse search, where the departure from `from_stop` is at least
/// `earliest_departure_time`.
pub fn find_trip_reverse_search<'t, T: TripSchedule>(
    trip: &'t T,
    from_stop: usize,
    to_stop: usize,
    earliest_departure_time: i32,
) -> Result<BoardAndAlightTime<'t, T>, InvariantViolation> {
    let pattern = trip.pattern();
    let nb_of_stops = pattern.number_of_stops_in_pattern();
    let not_found = || {
        trip_times_not_found(trip, from_stop, to_stop, "earliest departure time", earliest_departure_time)
    };

    let board_stop_pos = (0..nb_of_stops)
        .find(|position| {
            pattern.stop_index(*position) == from_stop
                && trip.departure(*position) >= earliest_departure_time
        })
        .ok_or_else(not_found)?;

    let alight_stop_pos = (board_stop_pos + 1..nb_of_stops)
        .find(|position| pattern.stop_index(*position) == to_stop)
        .ok_or_else(not_found)?;

    Ok(BoardAndAlightTime {
        trip,
        board_stop_pos,
        alight_stop_pos,
    })
}

/// Dispatches to the forward or reverse recovery. `bound_time` is the
/// latest arrival time of a forward search, or the earliest departure time
/// of a reverse search.
pub fn find_trip_times<'t, T: TripSchedule>(
    search_forward: bool,
    trip: &'t T,
    from_stop: usize,
    to_stop: usize,
    bound_time: i32,
) -> Result<BoardAndAlightTime<'t, T>, InvariantViolation> {
    if search_forward {
        find_trip_forward_search(trip, from_stop, to_stop, bound_time)
    } else {
        find_trip_reverse_search(trip, from_stop, to_stop, bound_time)
    }
}

fn trip_times_not_found<T: TripSchedule>(
    trip: &T,
    from_stop: usize,
    to_stop: usize,
    bound_kind: &'static str,
    bound_time: i32,
) -> InvariantViolation {
    InvariantViolation::TripTimesNotFound {
        from_stop,
        to_stop,
        bound_kind,
        bound_time: time_to_str(bound_time),
        pattern: trip.pattern().debug_info(),
    }
}
