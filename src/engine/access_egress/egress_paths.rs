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

use std::collections::BTreeMap;

use super::{group_by_stop, remove_non_optimal_paths_for_standard_raptor, AccessEgress};
use crate::config::SearchProfile;

/// Egress legs of a search, grouped by the stop where they start.
#[derive(Debug, Clone, Default)]
pub struct EgressPaths {
    paths_by_stop: BTreeMap<usize, Vec<AccessEgress>>,
}

impl EgressPaths {
    /// For single-arrival profiles, legs that are not optimal for their
    /// stop are dropped. The multi-criteria profile keeps every leg.
    pub fn create(paths: &[AccessEgress], profile: SearchProfile) -> Self {
        let paths_by_stop = if profile.keeps_single_arrival_per_stop() {
            group_by_stop(&remove_non_optimal_paths_for_standard_raptor(paths))
        } else {
            group_by_stop(paths)
        };
        Self { paths_by_stop }
    }

    pub fn by_stop(&self) -> &BTreeMap<usize, Vec<AccessEgress>> {
        &self.paths_by_stop
    }

    /// Egress legs starting at `stop`, empty if there is none.
    pub fn at_stop(&self, stop: usize) -> &[AccessEgress] {
        self.paths_by_stop
            .get(&stop)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Stops where at least one egress leg starts, in increasing order.
    pub fn stops(&self) -> Vec<usize> {
        self.paths_by_stop.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccessEgress> + '_ {
        self.paths_by_stop.values().flatten()
    }

    pub fn list_all(&self) -> Vec<AccessEgress> {
        self.iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.paths_by_stop.is_empty()
    }

    /// Stops where some egress leg can be started on foot, so the stop may be
    /// reached by a transit ride.
    pub fn egresses_which_start_by_walking(&self) -> Vec<usize> {
        self.stops_where(AccessEgress::stop_reached_on_foot)
    }

    /// Stops where some egress leg starts with a ride, so the stop may be
    /// reached by a transfer.
    pub fn egresses_which_start_by_a_ride(&self) -> Vec<usize> {
        self.stops_where(AccessEgress::stop_reached_on_board)
    }

    fn stops_where<F>(&self, predicate: F) -> Vec<usize>
    where
        F: Fn(&AccessEgress) -> bool,
    {
        self.paths_by_stop
            .iter()
            .filter(|(_, paths)| paths.iter().any(|path| predicate(path)))
            .map(|(stop, _)| *stop)
            .collect()
    }

    pub fn calculate_max_number_of_rides(&self) -> u8 {
        self.iter().map(AccessEgress::number_of_rides).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::PositiveDuration;

    fn paths() -> Vec<AccessEgress> {
        vec![
            AccessEgress::walk(7, PositiveDuration::from_seconds(60)),
            AccessEgress::walk(7, PositiveDuration::from_seconds(30)),
            AccessEgress::flex(8, PositiveDuration::from_seconds(600), 2, true),
            AccessEgress::walk(9, PositiveDuration::from_seconds(45)),
        ]
    }

    #[test]
    fn egresses_are_grouped_by_stop() {
        let egress = EgressPaths::create(&paths(), SearchProfile::Standard);
        assert_eq!(egress.stops(), vec![7, 8, 9]);
        assert_eq!(
            egress.at_stop(7),
            &[AccessEgress::walk(7, PositiveDuration::from_seconds(30))][..]
        );
        assert!(egress.at_stop(1).is_empty());
        assert_eq!(egress.egresses_which_start_by_walking(), vec![7, 9]);
        assert_eq!(egress.egresses_which_start_by_a_ride(), vec![8]);
        assert_eq!(egress.calculate_max_number_of_rides(), 2);
    }

    #[test]
    fn multi_criteria_keeps_equivalent_egresses() {
        let egress = EgressPaths::create(&paths(), SearchProfile::MultiCriteria);
        assert_eq!(egress.at_stop(7).len(), 2);
        assert_eq!(egress.list_all().len(), 4);
    }
}
