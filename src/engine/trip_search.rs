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

//! Searches for the trip to board (or alight, in a reverse search) in the
//! timetable of one pattern.

mod alight_search;
mod board_search;
mod exact_match;

pub use alight_search::TripScheduleAlightSearch;
pub use board_search::TripScheduleBoardSearch;
pub use exact_match::TripScheduleExactMatchSearch;

use std::fmt::{Debug, Formatter};

use crate::time::time_to_str;
use crate::transit_data::TripSchedule;

pub trait TripScheduleSearch<'t, T: TripSchedule + 't> {
    /// Finds the best trip at `stop_position_in_pattern` given `time_limit`.
    ///
    /// When `trip_index_limit` is set, only trips strictly better than the
    /// trip at this index are considered: a trip already boarded in a
    /// previous round bounds the search.
    ///
    /// Returns `None` if no trip matches.
    fn search(
        &self,
        time_limit: i32,
        stop_position_in_pattern: usize,
        trip_index_limit: Option<usize>,
    ) -> Option<BoardOrAlightEvent<'t, T>>;
}

/// The trip found by a [`TripScheduleSearch`].
pub struct BoardOrAlightEvent<'t, T> {
    pub trip_index: usize,
    pub trip: &'t T,
    /// departure time for a board search, arrival time for an alight search
    pub time: i32,
    pub stop_position_in_pattern: usize,
    pub time_limit: i32,
}

impl<'t, T> Clone for BoardOrAlightEvent<'t, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'t, T> Copy for BoardOrAlightEvent<'t, T> {}

impl<'t, T: TripSchedule> Debug for BoardOrAlightEvent<'t, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardOrAlightEvent")
            .field("trip_index", &self.trip_index)
            .field("time", &time_to_str(self.time))
            .field("stop_position_in_pattern", &self.stop_position_in_pattern)
            .field("time_limit", &time_to_str(self.time_limit))
            .finish()
    }
}
