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

//! Board, alight and transfer slack.
//!
//! The caller configures the slack with a [`SlackProvider`], usually the
//! [`DefaultSlackProvider`]. The search wraps it in a direction specific
//! provider which folds the transfer slack into the board slack from the
//! second boarding on, so the search only has to add board and alight slack.

mod forward;
mod reverse;

pub use forward::ForwardSlackProvider;
pub use reverse::ReverseSlackProvider;

use std::fmt::Debug;

use crate::config::SlackParams;

pub trait SlackProvider: Debug {
    /// Minimum time between reaching a stop and boarding a vehicle,
    /// for patterns with the given slack index.
    fn board_slack(&self, slack_index: usize) -> i32;

    /// Minimum time between alighting a vehicle and being able to leave
    /// the stop, for patterns with the given slack index.
    fn alight_slack(&self, slack_index: usize) -> i32;

    /// Minimum time between two vehicles.
    fn transfer_slack(&self) -> i32;

    /// Total slack of one transit leg with a transfer before it, the same
    /// in both search directions.
    fn accumulated_slack(&self, slack_index: usize) -> i32 {
        self.board_slack(slack_index) + self.alight_slack(slack_index) + self.transfer_slack()
    }
}

/// Slack read from [`SlackParams`].
///
/// Board and alight slack may be overridden per slack index, the default
/// value applies to any index without override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultSlackProvider {
    transfer_slack: i32,
    board_slack: i32,
    alight_slack: i32,
    board_slack_by_index: Vec<i32>,
    alight_slack_by_index: Vec<i32>,
}

impl DefaultSlackProvider {
    pub fn new(params: &SlackParams) -> Self {
        Self {
            transfer_slack: params.transfer_slack.as_time_seconds(),
            board_slack: params.board_slack.as_time_seconds(),
            alight_slack: params.alight_slack.as_time_seconds(),
            board_slack_by_index: params
                .board_slack_by_index
                .iter()
                .map(|slack| slack.as_time_seconds())
                .collect(),
            alight_slack_by_index: params
                .alight_slack_by_index
                .iter()
                .map(|slack| slack.as_time_seconds())
                .collect(),
        }
    }
}

impl Default for DefaultSlackProvider {
    fn default() -> Self {
        Self::new(&SlackParams::default())
    }
}

impl SlackProvider for DefaultSlackProvider {
    fn board_slack(&self, slack_index: usize) -> i32 {
        self.board_slack_by_index
            .get(slack_index)
            .copied()
            .unwrap_or(self.board_slack)
    }

    fn alight_slack(&self, slack_index: usize) -> i32 {
        self.alight_slack_by_index
            .get(slack_index)
            .copied()
            .unwrap_or(self.alight_slack)
    }

    fn transfer_slack(&self) -> i32 {
        self.transfer_slack
    }
}

// Transfer slack applies from the second boarding on.
pub(crate) fn transfer_slack_for_round(transfer_slack: i32, round: u8) -> i32 {
    if round < 2 {
        0
    } else {
        transfer_slack
    }
}
