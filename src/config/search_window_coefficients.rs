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

pub const DEFAULT_MIN_TRANSIT_TIME_COEFFICIENT: f64 = 0.5;
pub const DEFAULT_MIN_WIN_TIME_MINUTES: i32 = 40;
pub const DEFAULT_MAX_WIN_TIME_MINUTES: i32 = 180;
pub const DEFAULT_STEP_MINUTES: i32 = 10;

/// Coefficients used to compute the search window when the request does not
/// set one.
///
/// The window is `min_win_time + min_transit_time_coefficient * min_travel_time`,
/// rounded to `step_minutes` and capped by `max_win_time_minutes`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DynamicSearchWindowCoefficients {
    #[serde(default = "default_min_transit_time_coefficient")]
    pub min_transit_time_coefficient: f64,

    #[serde(default = "default_min_win_time_minutes")]
    pub min_win_time_minutes: i32,

    #[serde(default = "default_max_win_time_minutes")]
    pub max_win_time_minutes: i32,

    #[serde(default = "default_step_minutes")]
    pub step_minutes: i32,
}

pub fn default_min_transit_time_coefficient() -> f64 {
    DEFAULT_MIN_TRANSIT_TIME_COEFFICIENT
}

pub fn default_min_win_time_minutes() -> i32 {
    DEFAULT_MIN_WIN_TIME_MINUTES
}

pub fn default_max_win_time_minutes() -> i32 {
    DEFAULT_MAX_WIN_TIME_MINUTES
}

pub fn default_step_minutes() -> i32 {
    DEFAULT_STEP_MINUTES
}

impl Default for DynamicSearchWindowCoefficients {
    fn default() -> Self {
        Self {
            min_transit_time_coefficient: DEFAULT_MIN_TRANSIT_TIME_COEFFICIENT,
            min_win_time_minutes: DEFAULT_MIN_WIN_TIME_MINUTES,
            max_win_time_minutes: DEFAULT_MAX_WIN_TIME_MINUTES,
            step_minutes: DEFAULT_STEP_MINUTES,
        }
    }
}
