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

/// The flavour of Range-RAPTOR to run.
///
/// `Standard`, `BestTime` and `NoWaitBestTime` keep a single arrival per
/// stop and round, while `MultiCriteria` keeps a pareto set of arrivals.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SearchProfile {
    Standard,
    BestTime,
    NoWaitBestTime,
    MultiCriteria,
}

impl SearchProfile {
    pub fn is(&self, other: SearchProfile) -> bool {
        *self == other
    }

    pub fn is_one_of(&self, candidates: &[SearchProfile]) -> bool {
        candidates.contains(self)
    }

    pub fn is_multi_criteria(&self) -> bool {
        self.is(SearchProfile::MultiCriteria)
    }

    /// `true` if the search state can hold only one arrival per stop and round.
    pub fn keeps_single_arrival_per_stop(&self) -> bool {
        !self.is_multi_criteria()
    }
}

impl Default for SearchProfile {
    fn default() -> Self {
        Self::Standard
    }
}

impl std::str::FromStr for SearchProfile {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let profile = match s {
            "standard" => SearchProfile::Standard,
            "best_time" => SearchProfile::BestTime,
            "no_wait_best_time" => SearchProfile::NoWaitBestTime,
            "multi_criteria" => SearchProfile::MultiCriteria,
            _ => return Err(ConfigError::UnknownSearchProfile(s.to_string())),
        };
        Ok(profile)
    }
}

impl std::fmt::Display for SearchProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchProfile::Standard => write!(f, "standard"),
            SearchProfile::BestTime => write!(f, "best_time"),
            SearchProfile::NoWaitBestTime => write!(f, "no_wait_best_time"),
            SearchProfile::MultiCriteria => write!(f, "multi_criteria"),
        }
    }
}

/// Direction of the search clock.
///
/// `Forward` searches journeys departing after a given time,
/// `Reverse` searches journeys arriving before a given time.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SearchDirection {
    Forward,
    Reverse,
}

impl SearchDirection {
    pub fn is_forward(&self) -> bool {
        *self == SearchDirection::Forward
    }
}

impl Default for SearchDirection {
    fn default() -> Self {
        Self::Forward
    }
}

impl std::str::FromStr for SearchDirection {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let direction = match s {
            "forward" | "depart_after" => SearchDirection::Forward,
            "reverse" | "arrive_before" => SearchDirection::Reverse,
            _ => return Err(ConfigError::UnknownSearchDirection(s.to_string())),
        };
        Ok(direction)
    }
}

impl std::fmt::Display for SearchDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchDirection::Forward => write!(f, "forward"),
            SearchDirection::Reverse => write!(f, "reverse"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("standard", SearchProfile::Standard)]
    #[case("best_time", SearchProfile::BestTime)]
    #[case("no_wait_best_time", SearchProfile::NoWaitBestTime)]
    #[case("multi_criteria", SearchProfile::MultiCriteria)]
    fn parse_profile(#[case] input: &str, #[case] expected: SearchProfile) {
        let profile = SearchProfile::from_str(input).unwrap();
        assert_eq!(profile, expected);
        assert_eq!(profile.to_string(), input);
    }

    #[test]
    fn unknown_profile_is_a_config_error() {
        assert_eq!(
            SearchProfile::from_str("fastest"),
            Err(ConfigError::UnknownSearchProfile("fastest".to_string()))
        );
    }

    #[test]
    fn direction_aliases() {
        assert_eq!(
            SearchDirection::from_str("arrive_before"),
            Ok(SearchDirection::Reverse)
        );
        assert!(SearchDirection::from_str("depart_after").unwrap().is_forward());
        assert!(SearchDirection::from_str("sideways").is_err());
    }
}
