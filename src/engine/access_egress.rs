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

//! Street legs connecting the origin and the destination to the transit
//! network.
//!
//! An access leg goes from the origin to a stop, an egress leg from a stop
//! to the destination. Some legs contain rides themselves (flexible
//! transport), and may only be used within opening hours.

mod access_paths;
mod egress_paths;
mod functions;

pub use access_paths::AccessPaths;
pub use egress_paths::EgressPaths;
pub use functions::{group_by_round, group_by_stop, remove_non_optimal_paths_for_standard_raptor};

use std::fmt::Display;

use crate::error::ConfigError;
use crate::time::{time_to_str, PositiveDuration};

/// Times of the day during which a leg can be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningHours {
    opening: i32,
    closing: i32,
}

impl OpeningHours {
    pub fn new(opening: i32, closing: i32) -> Result<Self, ConfigError> {
        if closing < opening {
            return Err(ConfigError::InvalidOpeningHours { opening, closing });
        }
        Ok(Self { opening, closing })
    }

    pub fn opening(&self) -> i32 {
        self.opening
    }

    pub fn closing(&self) -> i32 {
        self.closing
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessEgress {
    stop: usize,
    duration_in_seconds: i32,
    number_of_rides: u8,
    stop_reached_on_board: bool,
    opening_hours: Option<OpeningHours>,
    c1: Option<i32>,
}

impl AccessEgress {
    /// A leg walked from (or to) `stop`.
    pub fn walk(stop: usize, duration: PositiveDuration) -> Self {
        Self {
            stop,
            duration_in_seconds: duration.as_time_seconds(),
            number_of_rides: 0,
            stop_reached_on_board: false,
            opening_hours: None,
            c1: None,
        }
    }

    /// A leg containing `number_of_rides` rides. When `stop_reached_on_board`
    /// is `true` the leg ends on board, and a transfer is needed before
    /// boarding a trip at `stop`.
    pub fn flex(
        stop: usize,
        duration: PositiveDuration,
        number_of_rides: u8,
        stop_reached_on_board: bool,
    ) -> Self {
        Self {
            number_of_rides,
            stop_reached_on_board,
            ..Self::walk(stop, duration)
        }
    }

    pub fn with_opening_hours(mut self, opening_hours: OpeningHours) -> Self {
        self.opening_hours = Some(opening_hours);
        self
    }

    /// Sets the generalized cost of the leg, in raptor cost units.
    pub fn with_c1(mut self, c1: i32) -> Self {
        self.c1 = Some(c1);
        self
    }

    pub fn stop(&self) -> usize {
        self.stop
    }

    pub fn duration_in_seconds(&self) -> i32 {
        self.duration_in_seconds
    }

    pub fn number_of_rides(&self) -> u8 {
        self.number_of_rides
    }

    pub fn has_rides(&self) -> bool {
        self.number_of_rides > 0
    }

    pub fn stop_reached_on_board(&self) -> bool {
        self.stop_reached_on_board
    }

    pub fn stop_reached_on_foot(&self) -> bool {
        !self.stop_reached_on_board
    }

    pub fn opening_hours(&self) -> Option<OpeningHours> {
        self.opening_hours
    }

    pub fn has_opening_hours(&self) -> bool {
        self.opening_hours.is_some()
    }

    pub fn c1(&self) -> Option<i32> {
        self.c1
    }

    /// The earliest time, at or after `requested_departure_time`, at which
    /// the leg can be started. `None` if the leg is closed for the rest of
    /// the day.
    pub fn earliest_departure_time(&self, requested_departure_time: i32) -> Option<i32> {
        match self.opening_hours {
            None => Some(requested_departure_time),
            Some(hours) if requested_departure_time < hours.opening => Some(hours.opening),
            Some(hours) if requested_departure_time <= hours.closing => Some(requested_departure_time),
            Some(_) => None,
        }
    }

    /// The latest time, at or before `requested_arrival_time`, at which the
    /// leg can end. `None` if the leg cannot be started early enough.
    pub fn latest_arrival_time(&self, requested_arrival_time: i32) -> Option<i32> {
        let hours = match self.opening_hours {
            None => return Some(requested_arrival_time),
            Some(hours) => hours,
        };
        let departure_time = requested_arrival_time - self.duration_in_seconds;
        if departure_time < hours.opening {
            None
        } else if departure_time > hours.closing {
            Some(hours.closing + self.duration_in_seconds)
        } else {
            Some(requested_arrival_time)
        }
    }

    /// `true` if `self` is better than `other` on at least one of the
    /// criteria of a single-arrival search: ending on board, having no
    /// opening hours, fewer rides or a shorter duration.
    pub fn standard_dominance_exist(&self, other: &AccessEgress) -> bool {
        (self.stop_reached_on_board && !other.stop_reached_on_board)
            || (!self.has_opening_hours() && other.has_opening_hours())
            || self.number_of_rides < other.number_of_rides
            || self.duration_in_seconds < other.duration_in_seconds
    }
}

impl Display for AccessEgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let duration = PositiveDuration::from_signed_seconds(self.duration_in_seconds)
            .unwrap_or_else(PositiveDuration::zero);
        if self.has_rides() {
            write!(f, "Flex {} {}x ~ {}", duration, self.number_of_rides, self.stop)?;
        } else {
            write!(f, "Walk {} ~ {}", duration, self.stop)?;
        }
        if let Some(hours) = self.opening_hours {
            write!(f, " Open({} {})", time_to_str(hours.opening), time_to_str(hours.closing))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opening_hours() -> OpeningHours {
        OpeningHours::new(36_000, 39_600).unwrap()
    }

    #[test]
    fn opening_hours_must_be_ordered() {
        assert_eq!(
            OpeningHours::new(100, 50),
            Err(ConfigError::InvalidOpeningHours {
                opening: 100,
                closing: 50
            })
        );
    }

    #[test]
    fn earliest_departure_time_waits_for_opening() {
        let leg = AccessEgress::walk(1, PositiveDuration::from_seconds(300))
            .with_opening_hours(opening_hours());
        assert_eq!(leg.earliest_departure_time(30_000), Some(36_000));
        assert_eq!(leg.earliest_departure_time(37_000), Some(37_000));
        assert_eq!(leg.earliest_departure_time(39_600), Some(39_600));
        assert_eq!(leg.earliest_departure_time(39_601), None);
    }

    #[test]
    fn latest_arrival_time_ends_before_closing() {
        let leg = AccessEgress::walk(1, PositiveDuration::from_seconds(300))
            .with_opening_hours(opening_hours());
        assert_eq!(leg.latest_arrival_time(45_000), Some(39_900));
        assert_eq!(leg.latest_arrival_time(37_000), Some(37_000));
        assert_eq!(leg.latest_arrival_time(36_299), None);
    }

    #[test]
    fn legs_without_opening_hours_are_always_open() {
        let leg = AccessEgress::walk(1, PositiveDuration::from_seconds(300));
        assert_eq!(leg.earliest_departure_time(-3_600), Some(-3_600));
        assert_eq!(leg.latest_arrival_time(100_000), Some(100_000));
    }

    #[test]
    fn display_describes_the_leg() {
        let walk = AccessEgress::walk(3, PositiveDuration::from_seconds(90));
        assert_eq!(walk.to_string(), "Walk 1m30s ~ 3");
        let flex = AccessEgress::flex(4, PositiveDuration::from_hms(0, 10, 0), 1, true)
            .with_opening_hours(opening_hours());
        assert_eq!(flex.to_string(), "Flex 10m00s 1x ~ 4 Open(10:00:00 11:00:00)");
    }
}
