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

use thiserror::Error;

/// Misuse of the search core by its caller.
///
/// These errors are raised as soon as an inconsistent configuration is
/// detected and are never recovered inside the core.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("The earliest departure time must be set for a forward search.")]
    EarliestDepartureTimeNotSet,

    #[error("The latest arrival time must be set for a reverse search.")]
    LatestArrivalTimeNotSet,

    #[error("At least one of the earliest departure time and the latest arrival time must be set.")]
    NoTimeBoundSet,

    #[error("The minTravelTime is not initialized.")]
    MinTravelTimeNotSet,

    #[error("This operation is not defined for negative numbers, got {value}.")]
    NegativeDuration { value: i64 },

    #[error("The {name} must be strictly positive, got {value}.")]
    NonPositiveValue { name: &'static str, value: i64 },

    #[error("The search window must not be negative, got {0} seconds.")]
    NegativeSearchWindow(i32),

    #[error("Lifecycle subscriptions are closed, no subscriber can be added once the search context is built.")]
    SubscriptionsClosed,

    #[error("Bad search profile given : `{0}`")]
    UnknownSearchProfile(String),

    #[error("Bad search direction given : `{0}`")]
    UnknownSearchDirection(String),

    #[error("Bad cost pruning given : `{0}`")]
    UnknownCostPruning(String),

    #[error("Opening hours must not close before they open, got {opening} - {closing}.")]
    InvalidOpeningHours { opening: i32, closing: i32 },

    #[error("The stop visit costs cover {given} stops, but the transit data has {expected} stops.")]
    StopVisitCostSize { given: usize, expected: usize },
}

/// An internal inconsistency detected while reconstructing a journey.
///
/// Such an error means that a previous step of the search produced data that
/// cannot be mapped back onto the timetable. It is a bug signal and must be
/// propagated as is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error(
        "Trip not found: from stop {from_stop} to stop {to_stop} with {bound_kind} {bound_time} on pattern {pattern}."
    )]
    TripTimesNotFound {
        from_stop: usize,
        to_stop: usize,
        bound_kind: &'static str,
        bound_time: String,
        pattern: String,
    },
}
