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

use super::{transfer_slack_for_round, SlackProvider};
use crate::engine::lifecycle::{LifeCycleSubscriptions, RoundDependent};
use crate::error::ConfigError;

/// Slack of a forward search: the transfer slack is added to the board
/// slack of every boarding but the first.
#[derive(Debug)]
pub struct ForwardSlackProvider {
    source: Box<dyn SlackProvider>,
    round_transfer_slack: RoundDependent<i32>,
}

impl ForwardSlackProvider {
    pub fn new(
        source: Box<dyn SlackProvider>,
        subscriptions: &mut LifeCycleSubscriptions,
    ) -> Result<Self, ConfigError> {
        let transfer_slack = source.transfer_slack();
        let round_transfer_slack = RoundDependent::new(
            move |round| transfer_slack_for_round(transfer_slack, round),
            subscriptions,
        )?;
        Ok(Self {
            source,
            round_transfer_slack,
        })
    }
}

impl SlackProvider for ForwardSlackProvider {
    fn board_slack(&self, slack_index: usize) -> i32 {
        self.source.board_slack(slack_index) + self.round_transfer_slack.get()
    }

    fn alight_slack(&self, slack_index: usize) -> i32 {
        self.source.alight_slack(slack_index)
    }

    fn transfer_slack(&self) -> i32 {
        self.source.transfer_slack()
    }

    fn accumulated_slack(&self, slack_index: usize) -> i32 {
        self.source.accumulated_slack(slack_index)
    }
}
