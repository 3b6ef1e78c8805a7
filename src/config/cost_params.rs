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

use crate::error::ConfigError;

pub const DEFAULT_BOARD_COST: i32 = 600;
pub const DEFAULT_TRANSFER_COST: i32 = 0;
pub const DEFAULT_WALK_RELUCTANCE_FACTOR: f64 = 4.0;
pub const DEFAULT_WAIT_RELUCTANCE_FACTOR: f64 = 1.0;
pub const DEFAULT_TRANSIT_RELUCTANCE_FACTOR: f64 = 1.0;

/// Which lower bound `calculate_min_cost` uses to prune the search.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CostPruning {
    /// `board_cost * (min_transfers + 1) + transit_factor * min_travel_time`
    BoardCount,
    /// `transit_factor * min_travel_time + min_transfers * min_transfer_cost`
    MinTransferCost,
}

impl Default for CostPruning {
    fn default() -> Self {
        Self::BoardCount
    }
}

impl std::str::FromStr for CostPruning {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "board_count" => Ok(CostPruning::BoardCount),
            "min_transfer_cost" => Ok(CostPruning::MinTransferCost),
            _ => Err(ConfigError::UnknownCostPruning(s.to_string())),
        }
    }
}

impl std::fmt::Display for CostPruning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CostPruning::BoardCount => write!(f, "board_count"),
            CostPruning::MinTransferCost => write!(f, "min_transfer_cost"),
        }
    }
}

/// Weights of the generalized cost used by the multi-criteria search.
///
/// Costs are given in seconds-equivalent, factors are plain multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct McCostParams {
    /// cost added for each boarding
    #[serde(default = "default_board_cost")]
    pub board_cost: i32,

    /// cost added for each transfer, on top of `board_cost`
    #[serde(default = "default_transfer_cost")]
    pub transfer_cost: i32,

    /// multiplier applied to walking time
    #[serde(default = "default_walk_reluctance_factor")]
    pub walk_reluctance_factor: f64,

    /// multiplier applied to waiting time, from the second boarding on
    #[serde(default = "default_wait_reluctance_factor")]
    pub wait_reluctance_factor: f64,

    /// multiplier applied to in-vehicle time
    #[serde(default = "default_transit_reluctance_factor")]
    pub transit_reluctance_factor: f64,

    #[serde(default)]
    pub cost_pruning: CostPruning,
}

pub fn default_board_cost() -> i32 {
    DEFAULT_BOARD_COST
}

pub fn default_transfer_cost() -> i32 {
    DEFAULT_TRANSFER_COST
}

pub fn default_walk_reluctance_factor() -> f64 {
    DEFAULT_WALK_RELUCTANCE_FACTOR
}

pub fn default_wait_reluctance_factor() -> f64 {
    DEFAULT_WAIT_RELUCTANCE_FACTOR
}

pub fn default_transit_reluctance_factor() -> f64 {
    DEFAULT_TRANSIT_RELUCTANCE_FACTOR
}

impl Default for McCostParams {
    fn default() -> Self {
        Self {
            board_cost: DEFAULT_BOARD_COST,
            transfer_cost: DEFAULT_TRANSFER_COST,
            walk_reluctance_factor: DEFAULT_WALK_RELUCTANCE_FACTOR,
            wait_reluctance_factor: DEFAULT_WAIT_RELUCTANCE_FACTOR,
            transit_reluctance_factor: DEFAULT_TRANSIT_RELUCTANCE_FACTOR,
            cost_pruning: CostPruning::default(),
        }
    }
}
