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


use crate::config::{McCostParams, SearchDirection, SearchParams, SearchProfile, SlackParams};
use crate::debug::{DebugLogger, TracingDebugLogger};
use crate::engine::access_egress::AccessEgress;
use crate::engine::slack::{DefaultSlackProvider, SlackProvider};

/// Everything a caller gives to build a
/// [`SearchContext`](crate::engine::search_context::SearchContext).
///
/// Access and egress legs are always given from the traveler's point of
/// view: access legs start at the origin, egress legs end at the destination.
#[derive(Debug)]
pub struct SearchRequest {
    pub search_params: SearchParams,
    pub profile: SearchProfile,
    pub direction: SearchDirection,
    pub access_paths: Vec<AccessEgress>,
    pub egress_paths: Vec<AccessEgress>,
    pub slack_provider: Box<dyn SlackProvider>,
    pub mc_cost_params: McCostParams,
    /// extra cost of boarding at each stop, in seconds-equivalent
    pub stop_visit_cost: Option<Vec<i32>>,
    pub debug_logger: Box<dyn DebugLogger>,
}

impl SearchRequest {
    pub fn new(search_params: SearchParams) -> Self {
        Self {
            search_params,
            profile: SearchProfile::default(),
            direction: SearchDirection::default(),
            access_paths: Vec::new(),
            egress_paths: Vec::new(),
            slack_provider: Box::new(DefaultSlackProvider::default()),
            mc_cost_params: McCostParams::default(),
            stop_visit_cost: None,
            debug_logger: Box::new(TracingDebugLogger),
        }
    }

    pub fn with_profile(mut self, profile: SearchProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_direction(mut self, direction: SearchDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_access_paths(mut self, access_paths: Vec<AccessEgress>) -> Self {
        self.access_paths = access_paths;
        self
    }

    pub fn with_egress_paths(mut self, egress_paths: Vec<AccessEgress>) -> Self {
        self.egress_paths = egress_paths;
        self
    }

    pub fn with_slack_params(self, slack_params: &SlackParams) -> Self {
        self.with_slack_provider(Box::new(DefaultSlackProvider::new(slack_params)))
    }

    pub fn with_slack_provider(mut self, slack_provider: Box<dyn SlackProvider>) -> Self {
        self.slack_provider = slack_provider;
        self
    }

    pub fn with_mc_cost_params(mut self, mc_cost_params: McCostParams) -> Self {
        self.mc_cost_params = mc_cost_params;
        self
    }

    pub fn with_stop_visit_cost(mut self, stop_visit_cost: Vec<i32>) -> Self {
        self.stop_visit_cost = Some(stop_visit_cost);
        self
    }

    pub fn with_debug_logger(mut self, debug_logger: Box<dyn DebugLogger>) -> Self {
        self.debug_logger = debug_logger;
        self
    }
}
