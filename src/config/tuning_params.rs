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

use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const DEFAULT_MAX_NUMBER_OF_TRANSFERS: u8 = 12;
pub const DEFAULT_SCHEDULED_TRIP_BINARY_SEARCH_THRESHOLD: usize = 50;
pub const DEFAULT_ITERATION_DEPARTURE_STEP_IN_SECONDS: i32 = 60;

/// Parameters tuning the performance of the search.
///
/// They do not change the set of optimal journeys found.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RaptorTuningParameters {
    /// maximum number of transfers, used when the request does not set one
    #[serde(default = "default_max_number_of_transfers")]
    pub max_number_of_transfers: u8,

    /// above this number of trips in a timetable, trip searches
    /// start with a binary search before scanning linearly
    #[serde(default = "default_scheduled_trip_binary_search_threshold")]
    pub scheduled_trip_binary_search_threshold: usize,

    /// step between two iterations of Range-RAPTOR, in seconds
    #[serde(default = "default_iteration_departure_step_in_seconds")]
    pub iteration_departure_step_in_seconds: i32,
}

pub fn default_max_number_of_transfers() -> u8 {
    DEFAULT_MAX_NUMBER_OF_TRANSFERS
}

pub fn default_scheduled_trip_binary_search_threshold() -> usize {
    DEFAULT_SCHEDULED_TRIP_BINARY_SEARCH_THRESHOLD
}

pub fn default_iteration_departure_step_in_seconds() -> i32 {
    DEFAULT_ITERATION_DEPARTURE_STEP_IN_SECONDS
}

impl Default for RaptorTuningParameters {
    fn default() -> Self {
        Self {
            max_number_of_transfers: DEFAULT_MAX_NUMBER_OF_TRANSFERS,
            scheduled_trip_binary_search_threshold: DEFAULT_SCHEDULED_TRIP_BINARY_SEARCH_THRESHOLD,
            iteration_departure_step_in_seconds: DEFAULT_ITERATION_DEPARTURE_STEP_IN_SECONDS,
        }
    }
}

impl Display for RaptorTuningParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "--max_number_of_transfers {} --scheduled_trip_binary_search_threshold {} --iteration_departure_step_in_seconds {}",
            self.max_number_of_transfers,
            self.scheduled_trip_binary_search_threshold,
            self.iteration_departure_step_in_seconds
        )
    }
}
