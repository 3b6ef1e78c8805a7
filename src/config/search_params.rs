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

use crate::config::RaptorTuningParameters;
use crate::time::time_to_str;

pub const DEFAULT_NUMBER_OF_ADDITIONAL_TRANSFERS: u8 = 5;

/// Time bounds and transfer limits of one search request.
///
/// Times are seconds on the search clock. A forward search needs
/// `earliest_departure_time`, a reverse search needs `latest_arrival_time`.
/// The missing bound and the search window can be derived with
/// [`SearchWindowCalculator`](crate::engine::search_window::SearchWindowCalculator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchParams {
    #[serde(default)]
    pub earliest_departure_time: Option<i32>,

    #[serde(default)]
    pub latest_arrival_time: Option<i32>,

    /// length of the window of departure (or arrival) times, in seconds
    #[serde(default)]
    pub search_window_in_seconds: Option<i32>,

    /// maximum number of transfers, the tuning default applies when unset
    #[serde(default)]
    pub max_number_of_transfers: Option<u8>,

    /// number of extra transfers explored after the destination is first reached
    #[serde(default = "default_number_of_additional_transfers")]
    pub number_of_additional_transfers: u8,
}

pub fn default_number_of_additional_transfers() -> u8 {
    DEFAULT_NUMBER_OF_ADDITIONAL_TRANSFERS
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            earliest_departure_time: None,
            latest_arrival_time: None,
            search_window_in_seconds: None,
            max_number_of_transfers: None,
            number_of_additional_transfers: DEFAULT_NUMBER_OF_ADDITIONAL_TRANSFERS,
        }
    }
}

impl SearchParams {
    pub fn depart_after(earliest_departure_time: i32) -> Self {
        Self {
            earliest_departure_time: Some(earliest_departure_time),
            ..Self::default()
        }
    }

    pub fn arrive_before(latest_arrival_time: i32) -> Self {
        Self {
            latest_arrival_time: Some(latest_arrival_time),
            ..Self::default()
        }
    }

    pub fn with_earliest_departure_time(mut self, time: i32) -> Self {
        self.earliest_departure_time = Some(time);
        self
    }

    pub fn with_latest_arrival_time(mut self, time: i32) -> Self {
        self.latest_arrival_time = Some(time);
        self
    }

    pub fn with_search_window_in_seconds(mut self, seconds: i32) -> Self {
        self.search_window_in_seconds = Some(seconds);
        self
    }

    pub fn with_max_number_of_transfers(mut self, max_number_of_transfers: u8) -> Self {
        self.max_number_of_transfers = Some(max_number_of_transfers);
        self
    }

    pub fn with_number_of_additional_transfers(mut self, number: u8) -> Self {
        self.number_of_additional_transfers = number;
        self
    }

    pub fn is_search_window_set(&self) -> bool {
        self.search_window_in_seconds.is_some()
    }

    /// Number of rounds the search may run, round 0 (access) excluded.
    ///
    /// Each round is one more boarding, hence `max_number_of_transfers + 1`.
    pub fn number_of_rounds(&self, tuning: &RaptorTuningParameters) -> u8 {
        self.max_number_of_transfers
            .unwrap_or(tuning.max_number_of_transfers)
            .saturating_add(1)
    }
}

impl Display for SearchParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let time_or_unset = |time: Option<i32>| match time {
            Some(time) => time_to_str(time),
            None => "unset".to_string(),
        };
        let window = match self.search_window_in_seconds {
            Some(seconds) => format!("{}s", seconds),
            None => "unset".to_string(),
        };
        write!(
            f,
            "earliest departure {}, latest arrival {}, search window {}, additional transfers {}",
            time_or_unset(self.earliest_departure_time),
            time_or_unset(self.latest_arrival_time),
            window,
            self.number_of_additional_transfers
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_of_rounds_falls_back_on_tuning() {
        let tuning = RaptorTuningParameters::default();
        let params = SearchParams::depart_after(36_000);
        assert_eq!(
            params.number_of_rounds(&tuning),
            tuning.max_number_of_transfers + 1
        );
        let params = params.with_max_number_of_transfers(4);
        assert_eq!(params.number_of_rounds(&tuning), 5);
    }

    #[test]
    fn deserialize_with_defaults() {
        let params: SearchParams =
            serde_json::from_str(r#"{ "latest_arrival_time" : 43200 }"#).unwrap();
        assert_eq!(params.earliest_departure_time, None);
        assert_eq!(params.latest_arrival_time, Some(43_200));
        assert_eq!(
            params.number_of_additional_transfers,
            DEFAULT_NUMBER_OF_ADDITIONAL_TRANSFERS
        );
    }
}
