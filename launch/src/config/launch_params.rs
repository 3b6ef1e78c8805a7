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

use std::num::NonZeroUsize;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Error};
use range_raptor::tracing::info;
use range_raptor::{
    DynamicSearchWindowCoefficients, McCostParams, PositiveDuration, RaptorTuningParameters,
    SearchParams, SearchRequest, SlackParams,
};
use serde::{Deserialize, Serialize};

use super::parse_env_var;

pub const MAX_NUMBER_OF_TRANSFERS_ENV_VAR: &str = "RANGE_RAPTOR_MAX_NUMBER_OF_TRANSFERS";
pub const ITERATION_STEP_ENV_VAR: &str = "RANGE_RAPTOR_ITERATION_DEPARTURE_STEP_IN_SECONDS";
pub const BINARY_SEARCH_THRESHOLD_ENV_VAR: &str = "RANGE_RAPTOR_BINARY_SEARCH_THRESHOLD";
pub const TRANSFER_SLACK_ENV_VAR: &str = "RANGE_RAPTOR_TRANSFER_SLACK";

/// Everything configurable about the search core, as read from a
/// configuration file. Every section is optional and falls back to defaults.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct LaunchParams {
    #[serde(default)]
    pub tuning: RaptorTuningParameters,

    #[serde(default)]
    pub search_window: DynamicSearchWindowCoefficients,

    #[serde(default)]
    pub mc_cost: McCostParams,

    #[serde(default)]
    pub slack: SlackParams,
}

impl LaunchParams {
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).context("Could not parse launch parameters")
    }

    /// Overrides values with the `RANGE_RAPTOR_*` environment variables
    /// that are set.
    pub fn with_env_overrides(mut self) -> Self {
        self.tuning.max_number_of_transfers = parse_env_var(
            MAX_NUMBER_OF_TRANSFERS_ENV_VAR,
            self.tuning.max_number_of_transfers,
            u8::from_str,
        );
        self.tuning.iteration_departure_step_in_seconds = parse_env_var(
            ITERATION_STEP_ENV_VAR,
            self.tuning.iteration_departure_step_in_seconds,
            i32::from_str,
        );
        self.tuning.scheduled_trip_binary_search_threshold = parse_env_var(
            BINARY_SEARCH_THRESHOLD_ENV_VAR,
            self.tuning.scheduled_trip_binary_search_threshold,
            |s| NonZeroUsize::from_str(s).map(NonZeroUsize::get),
        );
        self.slack.transfer_slack = parse_env_var(
            TRANSFER_SLACK_ENV_VAR,
            self.slack.transfer_slack,
            PositiveDuration::from_str,
        );
        self
    }

    /// A request using the cost and slack parameters of this configuration.
    pub fn search_request(&self, search_params: SearchParams) -> SearchRequest {
        SearchRequest::new(search_params)
            .with_slack_params(&self.slack)
            .with_mc_cost_params(self.mc_cost)
    }
}

/// Reads launch parameters from a json file, then applies environment
/// overrides.
pub fn read_launch_params<P: AsRef<Path>>(path: P) -> Result<LaunchParams, Error> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read launch parameters file {}", path.display()))?;
    let params = LaunchParams::from_json_str(&content)
        .with_context(|| format!("Invalid launch parameters in {}", path.display()))?
        .with_env_overrides();
    info!("Launch parameters read from {} : {:?}", path.display(), params);
    Ok(params)
}
