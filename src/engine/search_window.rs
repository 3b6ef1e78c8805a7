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

//! Fills in the search window and the missing time bound of a request from
//! the minimum travel time found by a heuristic search.

use crate::config::{DynamicSearchWindowCoefficients, SearchParams};
use crate::error::ConfigError;
use crate::time::SECONDS_IN_MINUTE;
use crate::tracing::debug;

/// Computes the unset values of a [`SearchParams`].
///
/// The calculator is used once: `calculate` consumes it.
#[derive(Debug, Clone)]
pub struct SearchWindowCalculator {
    min_win_time_seconds: i32,
    max_win_time_seconds: i32,
    min_transit_time_coefficient: f64,
    step_seconds: i32,
    min_travel_time: Option<i32>,
    params: SearchParams,
}

impl SearchWindowCalculator {
    pub fn new(coefficients: &DynamicSearchWindowCoefficients) -> Self {
        Self {
            min_win_time_seconds: coefficients.min_win_time_minutes * SECONDS_IN_MINUTE,
            max_win_time_seconds: coefficients.max_win_time_minutes * SECONDS_IN_MINUTE,
            min_transit_time_coefficient: coefficients.min_transit_time_coefficient,
            step_seconds: coefficients.step_minutes * SECONDS_IN_MINUTE,
            min_travel_time: None,
            params: SearchParams::default(),
        }
    }

    /// The minimum travel time, in seconds, from the origin to the destination.
    pub fn with_heuristics(mut self, min_travel_time: i32) -> Self {
        self.min_travel_time = Some(min_travel_time);
        self
    }

    pub fn with_search_params(mut self, params: &SearchParams) -> Self {
        self.params = params.clone();
        self
    }

    /// Returns the search parameters with the search window and both time
    /// bounds set. Values given by the caller are kept.
    pub fn calculate(self) -> Result<SearchParams, ConfigError> {
        let min_travel_time = self.min_travel_time.ok_or(ConfigError::MinTravelTimeNotSet)?;
        let mut params = self.params.clone();
        if params.earliest_departure_time.is_none() && params.latest_arrival_time.is_none() {
            return Err(ConfigError::NoTimeBoundSet);
        }

        let search_window = match params.search_window_in_seconds {
            Some(search_window) => search_window,
            None => self.dynamic_search_window(min_travel_time)?,
        };
        params.search_window_in_seconds = Some(search_window);

        let travel_window = search_window + round_up_to_nearest_minute(min_travel_time)?;
        match (params.earliest_departure_time, params.latest_arrival_time) {
            (Some(earliest_departure_time), None) => {
                params.latest_arrival_time = Some(earliest_departure_time + travel_window);
            }
            (None, Some(latest_arrival_time)) => {
                params.earliest_departure_time = Some(latest_arrival_time - travel_window);
            }
            _ => {}
        }
        debug!(
            "Search window computed from a minimum travel time of {}s : {}",
            min_travel_time, params
        );
        Ok(params)
    }

    fn dynamic_search_window(&self, min_travel_time: i32) -> Result<i32, ConfigError> {
        let raw = f64::from(self.min_win_time_seconds)
            + self.min_transit_time_coefficient * f64::from(min_travel_time);
        let window = round_to_step(raw, self.step_seconds)?;
        Ok(window.min(self.max_win_time_seconds))
    }
}

/// Rounds a duration up to the next whole minute.
pub fn round_up_to_nearest_minute(seconds: i32) -> Result<i32, ConfigError> {
    if seconds < 0 {
        return Err(ConfigError::NegativeDuration {
            value: i64::from(seconds),
        });
    }
    let minutes = (i64::from(seconds) + i64::from(SECONDS_IN_MINUTE) - 1) / i64::from(SECONDS_IN_MINUTE);
    Ok((minutes * i64::from(SECONDS_IN_MINUTE)) as i32)
}

/// Rounds `value` to the nearest multiple of `step`, half up.
pub fn round_to_step(value: f64, step: i32) -> Result<i32, ConfigError> {
    if step <= 0 {
        return Err(ConfigError::NonPositiveValue {
            name: "search window step",
            value: i64::from(step),
        });
    }
    if value < 0.0 {
        return Err(ConfigError::NegativeDuration {
            value: value.floor() as i64,
        });
    }
    let step = f64::from(step);
    Ok(((value / step + 0.5).floor() * step) as i32)
}
