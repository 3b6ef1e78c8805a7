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

use super::AccessEgress;
use crate::engine::pareto_set::ParetoSet;

/// Groups `paths` by stop, keeping the input order within a stop.
pub fn group_by_stop<'a, I>(paths: I) -> BTreeMap<usize, Vec<AccessEgress>>
where
    I: IntoIterator<Item = &'a AccessEgress>,
{
    let mut by_stop: BTreeMap<usize, Vec<AccessEgress>> = BTreeMap::new();
    for path in paths {
        by_stop.entry(path.stop()).or_default().push(path.clone());
    }
    by_stop
}

/// Groups the paths accepted by `filter` by their number of rides.
pub fn group_by_round<'a, I, F>(paths: I, filter: F) -> BTreeMap<u8, Vec<AccessEgress>>
where
    I: IntoIterator<Item = &'a AccessEgress>,
    F: Fn(&AccessEgress) -> bool,
{
    let mut by_round: BTreeMap<u8, Vec<AccessEgress>> = BTreeMap::new();
    for path in paths.into_iter().filter(|path| filter(path)) {
        by_round
            .entry(path.number_of_rides())
            .or_default()
            .push(path.clone());
    }
    by_round
}

/// Keeps, for each stop, only the paths that are optimal for a search
/// holding a single arrival per stop.
///
/// Among equivalent paths the first one given is kept.
pub fn remove_non_optimal_paths_for_standard_raptor(paths: &[AccessEgress]) -> Vec<AccessEgress> {
    let mut result = Vec::with_capacity(paths.len());
    for (_, paths_at_stop) in group_by_stop(paths) {
        let mut pareto_set = ParetoSet::new(AccessEgress::standard_dominance_exist);
        for path in paths_at_stop {
            pareto_set.add(path);
        }
        result.extend(pareto_set.into_vec());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::access_egress::OpeningHours;
    use crate::time::PositiveDuration;

    fn walk(stop: usize, seconds: u32) -> AccessEgress {
        AccessEgress::walk(stop, PositiveDuration::from_seconds(seconds))
    }

    #[test]
    fn shorter_walk_to_same_stop_wins() {
        let paths = vec![walk(1, 300), walk(1, 120), walk(2, 600)];
        let optimal = remove_non_optimal_paths_for_standard_raptor(&paths);
        assert_eq!(optimal, vec![walk(1, 120), walk(2, 600)]);
    }

    #[test]
    fn ride_and_walk_are_both_optimal_when_they_trade_off() {
        let flex = AccessEgress::flex(1, PositiveDuration::from_seconds(60), 1, false);
        let paths = vec![walk(1, 600), flex.clone()];
        let optimal = remove_non_optimal_paths_for_standard_raptor(&paths);
        assert_eq!(optimal, vec![walk(1, 600), flex]);
    }

    #[test]
    fn opening_hours_are_a_criterion() {
        let hours = OpeningHours::new(0, 3_600).unwrap();
        let restricted = walk(1, 60).with_opening_hours(hours);
        let paths = vec![restricted.clone(), walk(1, 60)];
        assert_eq!(
            remove_non_optimal_paths_for_standard_raptor(&paths),
            vec![walk(1, 60)]
        );
        let paths = vec![restricted.clone(), walk(1, 120)];
        assert_eq!(
            remove_non_optimal_paths_for_standard_raptor(&paths),
            vec![restricted, walk(1, 120)]
        );
    }

    #[test]
    fn reducing_twice_gives_the_same_paths() {
        let hours = OpeningHours::new(36_000, 39_600).unwrap();
        let paths = vec![
            walk(1, 300),
            walk(1, 120),
            walk(1, 120),
            walk(1, 60).with_opening_hours(hours),
            AccessEgress::flex(1, PositiveDuration::from_seconds(60), 1, false),
            AccessEgress::flex(1, PositiveDuration::from_seconds(90), 2, true),
            AccessEgress::flex(2, PositiveDuration::from_seconds(600), 1, true),
            walk(2, 900),
            walk(3, 30).with_c1(1_000),
            walk(3, 30),
        ];
        let once = remove_non_optimal_paths_for_standard_raptor(&paths);
        assert!(once.len() < paths.len());
        let twice = remove_non_optimal_paths_for_standard_raptor(&once);
        assert_eq!(twice, once);
    }

    #[test]
    fn group_by_round_filters_and_groups() {
        let flex = AccessEgress::flex(3, PositiveDuration::from_seconds(600), 2, true);
        let paths = vec![walk(1, 60), flex.clone(), walk(2, 30)];
        let on_foot = group_by_round(&paths, AccessEgress::stop_reached_on_foot);
        assert_eq!(on_foot.len(), 1);
        assert_eq!(on_foot[&0], vec![walk(1, 60), walk(2, 30)]);
        let on_board = group_by_round(&paths, AccessEgress::stop_reached_on_board);
        assert_eq!(on_board[&2], vec![flex]);
    }
}
