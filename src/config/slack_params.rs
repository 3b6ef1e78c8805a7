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

use crate::time::PositiveDuration;

pub const DEFAULT_TRANSFER_SLACK: PositiveDuration = PositiveDuration::from_hms(0, 1, 0);
pub const DEFAULT_BOARD_SLACK: PositiveDuration = PositiveDuration::zero();
pub const DEFAULT_ALIGHT_SLACK: PositiveDuration = PositiveDuration::zero();

/// Minimum buffers around vehicle boardings and alightings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlackParams {
    /// minimum time between alighting a vehicle and boarding the next one
    #[serde(default = "default_transfer_slack")]
    pub transfer_slack: PositiveDuration,

    /// minimum time to wait at a stop before boarding
    #[serde(default = "default_board_slack")]
    pub board_slack: PositiveDuration,

    /// minimum time spent at a stop after alighting
    #[serde(default = "default_alight_slack")]
    pub alight_slack: PositiveDuration,

    /// board slack overrides, indexed by the pattern slack index
    #[serde(default)]
    pub board_slack_by_index: Vec<PositiveDuration>,

    /// alight slack overrides, indexed by the pattern slack index
    #[serde(default)]
    pub alight_slack_by_index: Vec<PositiveDuration>,
}

pub fn default_transfer_slack() -> PositiveDuration {
    DEFAULT_TRANSFER_SLACK
}

pub fn default_board_slack() -> PositiveDuration {
    DEFAULT_BOARD_SLACK
}

pub fn default_alight_slack() -> PositiveDuration {
    DEFAULT_ALIGHT_SLACK
}

impl Default for SlackParams {
    fn default() -> Self {
        Self {
            transfer_slack: DEFAULT_TRANSFER_SLACK,
            board_slack: DEFAULT_BOARD_SLACK,
            alight_slack: DEFAULT_ALIGHT_SLACK,
            board_slack_by_index: Vec::new(),
            alight_slack_by_index: Vec::new(),
        }
    }
}
