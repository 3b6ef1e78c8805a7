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

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Sentinel for a time that was never reached by a forward search.
///
/// Forward searches look for the earliest arrival, so "unreached" is the
/// greatest possible time.
pub const FORWARD_UNREACHED: i32 = i32::MAX;

/// Sentinel for a time that was never reached by a reverse search.
///
/// Reverse searches look for the latest departure, so "unreached" is the
/// smallest possible time.
pub const REVERSE_UNREACHED: i32 = i32::MIN;

pub const SECONDS_IN_MINUTE: i32 = 60;

/// A non negative duration, stored in seconds.
///
/// In configuration files, durations are written as `HH:MM:SS`.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Ord, PartialOrd, Hash, Default)]
pub struct PositiveDuration {
    pub(crate) seconds: u32,
}

impl PositiveDuration {
    pub const fn zero() -> Self {
        Self { seconds: 0 }
    }

    pub const fn from_hms(hours: u32, minutes: u32, seconds: u32) -> PositiveDuration {
        let total_seconds = seconds + 60 * minutes + 60 * 60 * hours;
        PositiveDuration {
            seconds: total_seconds,
        }
    }

    /// Like `from_hms`, but returns `None` instead of overflowing.
    pub fn checked_from_hms(hours: u32, minutes: u32, seconds: u32) -> Option<PositiveDuration> {
        let total_seconds = hours
            .checked_mul(60 * 60)?
            .checked_add(minutes.checked_mul(60)?)?
            .checked_add(seconds)?;
        Some(PositiveDuration {
            seconds: total_seconds,
        })
    }

    pub const fn from_seconds(seconds: u32) -> PositiveDuration {
        PositiveDuration { seconds }
    }

    /// Builds a duration from a signed number of seconds.
    ///
    /// Returns `None` when `seconds` is negative.
    pub fn from_signed_seconds(seconds: i32) -> Option<PositiveDuration> {
        if seconds < 0 {
            None
        } else {
            Some(PositiveDuration {
                seconds: seconds as u32,
            })
        }
    }

    pub fn total_seconds(&self) -> u64 {
        u64::from(self.seconds)
    }

    /// The duration as seconds on the search clock.
    ///
    /// Saturates at `i32::MAX`, which no meaningful duration reaches.
    pub fn as_time_seconds(&self) -> i32 {
        if self.seconds > i32::MAX as u32 {
            i32::MAX
        } else {
            self.seconds as i32
        }
    }

    fn to_hms_string(self) -> String {
        let hours = self.seconds / (60 * 60);
        let minutes = (self.seconds % (60 * 60)) / 60;
        let seconds = self.seconds % 60;
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

impl Display for PositiveDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let hours = self.seconds / (60 * 60);
        let minutes_in_secs = self.seconds % (60 * 60);
        let minutes = minutes_in_secs / 60;
        let seconds = minutes_in_secs % 60;
        if hours != 0 {
            write!(f, "{}h{:02}m{:02}s", hours, minutes, seconds)
        } else if minutes != 0 {
            write!(f, "{}m{:02}s", minutes, seconds)
        } else {
            write!(f, "{}s", seconds)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationParseError {
    input: String,
}

impl Display for DurationParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unable to parse `{}` as a duration. Expected format is HH:MM:SS",
            self.input
        )
    }
}

impl std::error::Error for DurationParseError {}

impl FromStr for PositiveDuration {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || DurationParseError {
            input: s.to_string(),
        };
        let mut parts = s.trim().split(':');
        let mut next_part = || -> Result<u32, DurationParseError> {
            parts
                .next()
                .ok_or_else(error)?
                .parse::<u32>()
                .map_err(|_| error())
        };
        let hours = next_part()?;
        let minutes = next_part()?;
        let seconds = next_part()?;
        if parts.next().is_some() || minutes >= 60 || seconds >= 60 {
            return Err(error());
        }
        PositiveDuration::checked_from_hms(hours, minutes, seconds).ok_or_else(error)
    }
}

impl Serialize for PositiveDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hms_string())
    }
}

impl<'de> Deserialize<'de> for PositiveDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PositiveDuration::from_str(&s).map_err(de::Error::custom)
    }
}

/// Formats a time of the search clock as `HH:MM:SS`, prefixed by `-` for
/// times before the reference day start.
///
/// The unreached sentinels of both search directions are rendered as `unbounded`.
pub fn time_to_str(time: i32) -> String {
    if time == FORWARD_UNREACHED || time == REVERSE_UNREACHED {
        return "unbounded".to_string();
    }
    let sign = if time < 0 { "-" } else { "" };
    let seconds = i64::from(time).abs();
    format!(
        "{}{:02}:{:02}:{:02}",
        sign,
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_format_duration() {
        let duration = PositiveDuration::from_str("01:02:03").unwrap();
        assert_eq!(duration.total_seconds(), 3723);
        assert_eq!(duration.to_string(), "1h02m03s");
        assert_eq!(duration.to_hms_string(), "01:02:03");

        assert!(PositiveDuration::from_str("01:62:03").is_err());
        assert!(PositiveDuration::from_str("01:02").is_err());
        assert!(PositiveDuration::from_str("-01:02:03").is_err());
        assert!(PositiveDuration::from_str("01:02:03:04").is_err());
    }

    #[test]
    fn too_long_durations_are_rejected() {
        let max_hours = u32::MAX / 3_600;
        assert_eq!(
            PositiveDuration::from_str(&format!("{}:00:00", max_hours)),
            Ok(PositiveDuration::from_seconds(max_hours * 3_600))
        );
        assert!(PositiveDuration::from_str(&format!("{}:00:00", max_hours + 1)).is_err());
        assert!(PositiveDuration::from_str("1200000:00:00").is_err());
        assert_eq!(PositiveDuration::checked_from_hms(max_hours, 59, 59), None);
    }

    #[test]
    fn negative_seconds_are_rejected() {
        assert_eq!(PositiveDuration::from_signed_seconds(-1), None);
        assert_eq!(
            PositiveDuration::from_signed_seconds(90),
            Some(PositiveDuration::from_hms(0, 1, 30))
        );
    }

    #[test]
    fn format_times() {
        assert_eq!(time_to_str(0), "00:00:00");
        assert_eq!(time_to_str(36_060), "10:01:00");
        assert_eq!(time_to_str(-90), "-00:01:30");
        assert_eq!(time_to_str(90_000), "25:00:00");
        assert_eq!(time_to_str(FORWARD_UNREACHED), "unbounded");
        assert_eq!(time_to_str(REVERSE_UNREACHED), "unbounded");
    }
}
