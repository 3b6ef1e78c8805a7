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

use std::collections::{BTreeMap, BTreeSet};

use super::{group_by_round, remove_non_optimal_paths_for_standard_raptor, AccessEgress};
use crate::config::SearchProfile;

/// Access legs of a search, grouped by the round in which they reach their
/// stop.
///
/// Legs that reach the stop on board are kept apart from legs that reach it
/// on foot, since a transfer is needed after the former.
#[derive(Debug, Clone, Default)]
pub struct AccessPaths {
    arrived_on_street_by_num_of_rides: BTreeMap<u8, Vec<AccessEgress>>,
    arrived_on_board_by_num_of_rides: BTreeMap<u8, Vec<AccessEgress>>,
}

impl AccessPaths {
    /// For single-arrival profiles, legs that are not optimal for their
    /// stop are dropped. The multi-criteria profile keeps every leg.
    pub fn create(paths: &[AccessEgress], profile: SearchProfile) -> Self {
        let reduced;
        let paths = if profile.keeps_single_arrival_per_stop() {
            reduced = remove_non_optimal_paths_for_standard_raptor(paths);
            &reduced[..]
        } else {
            paths
        };
        Self {
            arrived_on_street_by_num_of_rides: group_by_round(paths, AccessEgress::stop_reached_on_foot),
            arrived_on_board_by_num_of_rides: group_by_round(paths, AccessEgress::stop_reached_on_board),
        }
    }

    pub fn arrived_on_street_by_num_of_rides(&self, number_of_rides: u8) -> &[AccessEgress] {
        self.arrived_on_street_by_num_of_rides
            .get(&number_of_rides)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn arrived_on_board_by_num_of_rides(&self, number_of_rides: u8) -> &[AccessEgress] {
        self.arrived_on_board_by_num_of_rides
            .get(&number_of_rides)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Stops reached by at least one access leg, in increasing order.
    pub fn stops(&self) -> Vec<usize> {
        self.iter()
            .map(AccessEgress::stop)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccessEgress> + '_ {
        self.arrived_on_street_by_num_of_rides
            .values()
            .chain(self.arrived_on_board_by_num_of_rides.values())
            .flatten()
    }

    pub fn list_all(&self) -> Vec<AccessEgress> {
        self.iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn calculate_max_number_of_rides(&self) -> u8 {
        self.iter().map(AccessEgress::number_of_rides).max().unwrap_or(0)
    }
}
