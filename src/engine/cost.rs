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

//! Generalized cost of the multi-criteria search.
//!
//! Costs are integers in hundredths of a second-equivalent, so that
//! configured factors like `1.5` keep two decimals without floating point
//! arithmetic in the search loop.

use static_assertions::const_assert;

use crate::config::{CostPruning, McCostParams};
use crate::engine::access_egress::AccessEgress;
use crate::engine::lifecycle::{LifeCycleSubscriptions, RoundDependent};
use crate::error::ConfigError;

/// Number of raptor cost units in one second-equivalent.
pub const PRECISION: i32 = 100;
const_assert!(PRECISION > 0);

/// Converts a factor or a cost expressed in seconds-equivalent into raptor
/// cost units, rounding to the nearest unit.
pub fn to_raptor_cost(value: f64) -> i32 {
    (value * f64::from(PRECISION)).round() as i32
}

/// Converts raptor cost units back to seconds-equivalent, rounding half up.
pub fn to_otp_domain_cost(raptor_cost: i32) -> i32 {
    let precision = i64::from(PRECISION);
    // |result| <= |raptor_cost| / PRECISION + 1, which fits in i32
    ((i64::from(raptor_cost) + precision / 2).div_euclid(precision)) as i32
}

pub trait CostCalculator {
    /// Cost of riding a trip after waiting `wait_time` seconds at the
    /// boarding stop and spending `transit_time` seconds on board.
    fn transit_arrival_cost(&self, wait_time: i32, transit_time: i32) -> i32;

    /// Cost of one boarding, with the transfer cost for all but the first.
    fn board_cost(&self, first_boarding: bool) -> i32;

    /// Extra cost of boarding at `stop`, zero when no per-stop costs are set.
    fn stop_visit_cost(&self, stop: usize) -> i32;

    fn walk_cost(&self, walk_time: i32) -> i32;

    /// Cost of waiting `wait_time` seconds with the configured wait factor,
    /// whatever the round.
    fn wait_cost(&self, wait_time: i32) -> i32;

    /// Cost of an access or egress leg.
    fn access_egress_cost(&self, leg: &AccessEgress) -> i32;

    /// A lower bound of the cost of any journey with at least
    /// `min_travel_time` seconds in vehicles and `min_nb_of_transfers`
    /// transfers. Never overestimates, so it can be used for pruning.
    fn calculate_min_cost(&self, min_travel_time: i32, min_nb_of_transfers: u32) -> i32;
}

#[derive(Debug)]
pub struct DefaultCostCalculator {
    board_cost: i32,
    transfer_cost: i32,
    walk_factor: i32,
    wait_factor: i32,
    transit_factor: i32,
    round_wait_factor: RoundDependent<i32>,
    stop_visit_cost: Option<Vec<i32>>,
    cost_pruning: CostPruning,
}

impl DefaultCostCalculator {
    /// `stop_visit_cost` is given in seconds-equivalent, indexed by stop.
    pub fn new(
        params: &McCostParams,
        stop_visit_cost: Option<&[i32]>,
        subscriptions: &mut LifeCycleSubscriptions,
    ) -> Result<Self, ConfigError> {
        let wait_factor = to_raptor_cost(params.wait_reluctance_factor);
        // Waiting before the first boarding is free: the access leg can be
        // shifted in time to remove it.
        let round_wait_factor = RoundDependent::new(
            move |round| if round < 2 { 0 } else { wait_factor },
            subscriptions,
        )?;
        Ok(Self {
            board_cost: params.board_cost * PRECISION,
            transfer_cost: params.transfer_cost * PRECISION,
            walk_factor: to_raptor_cost(params.walk_reluctance_factor),
            wait_factor,
            transit_factor: to_raptor_cost(params.transit_reluctance_factor),
            round_wait_factor,
            stop_visit_cost: stop_visit_cost
                .map(|costs| costs.iter().map(|cost| cost * PRECISION).collect()),
            cost_pruning: params.cost_pruning,
        })
    }

    pub fn cost_pruning(&self) -> CostPruning {
        self.cost_pruning
    }
}

impl CostCalculator for DefaultCostCalculator {
    fn transit_arrival_cost(&self, wait_time: i32, transit_time: i32) -> i32 {
        self.round_wait_factor.get() * wait_time + self.transit_factor * transit_time + self.board_cost
    }

    fn board_cost(&self, first_boarding: bool) -> i32 {
        if first_boarding {
            self.board_cost
        } else {
            self.board_cost + self.transfer_cost
        }
    }

    fn stop_visit_cost(&self, stop: usize) -> i32 {
        self.stop_visit_cost
            .as_ref()
            .and_then(|costs| costs.get(stop))
            .copied()
            .unwrap_or(0)
    }

    fn walk_cost(&self, walk_time: i32) -> i32 {
        self.walk_factor * walk_time
    }

    fn wait_cost(&self, wait_time: i32) -> i32 {
        self.wait_factor * wait_time
    }

    fn access_egress_cost(&self, leg: &AccessEgress) -> i32 {
        leg.c1()
            .unwrap_or_else(|| self.walk_cost(leg.duration_in_seconds()))
    }

    fn calculate_min_cost(&self, min_travel_time: i32, min_nb_of_transfers: u32) -> i32 {
        let min_nb_of_transfers = min_nb_of_transfers as i32;
        match self.cost_pruning {
            CostPruning::BoardCount => {
                self.board_cost * (min_nb_of_transfers + 1) + self.transit_factor * min_travel_time
            }
            CostPruning::MinTransferCost => {
                self.transit_factor * min_travel_time
                    + min_nb_of_transfers * (self.board_cost + self.transfer_cost)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::PositiveDuration;
    use rstest::rstest;

    fn params() -> McCostParams {
        McCostParams {
            board_cost: 600,
            transfer_cost: 120,
            walk_reluctance_factor: 2.0,
            wait_reluctance_factor: 0.5,
            transit_reluctance_factor: 1.0,
            cost_pruning: CostPruning::BoardCount,
        }
    }

    #[test]
    fn waiting_is_free_until_the_second_boarding() {
        let mut subscriptions = LifeCycleSubscriptions::new();
        let calculator = DefaultCostCalculator::new(&params(), None, &mut subscriptions).unwrap();
        let mut publisher = subscriptions.close();

        publisher.prepare_for_next_round(1);
        assert_eq!(calculator.transit_arrival_cost(600, 1_200), 1_200 * 100 + 600 * 100);

        publisher.prepare_for_next_round(2);
        assert_eq!(
            calculator.transit_arrival_cost(600, 1_200),
            300 * 100 + 1_200 * 100 + 600 * 100
        );
    }

    #[test]
    fn walk_and_wait_costs_use_their_factors() {
        let mut subscriptions = LifeCycleSubscriptions::new();
        let calculator = DefaultCostCalculator::new(&params(), None, &mut subscriptions).unwrap();
        assert_eq!(calculator.walk_cost(60), 12_000);
        assert_eq!(calculator.wait_cost(60), 3_000);
        assert_eq!(calculator.board_cost(true), 60_000);
        assert_eq!(calculator.board_cost(false), 72_000);
    }

    #[test]
    fn street_legs_use_their_own_cost_when_set() {
        let mut subscriptions = LifeCycleSubscriptions::new();
        let calculator = DefaultCostCalculator::new(&params(), None, &mut subscriptions).unwrap();
        let walk = AccessEgress::walk(3, PositiveDuration::from_seconds(100));
        let flex = AccessEgress::flex(3, PositiveDuration::from_seconds(100), 1, true).with_c1(5_000);
        assert_eq!(calculator.access_egress_cost(&walk), 20_000);
        assert_eq!(calculator.access_egress_cost(&flex), 5_000);
    }

    #[test]
    fn stop_visit_cost_is_optional() {
        let mut subscriptions = LifeCycleSubscriptions::new();
        let without = DefaultCostCalculator::new(&params(), None, &mut subscriptions).unwrap();
        let with = DefaultCostCalculator::new(&params(), Some(&[0, 30, 0][..]), &mut subscriptions).unwrap();
        assert_eq!(without.stop_visit_cost(1), 0);
        assert_eq!(with.stop_visit_cost(1), 3_000);
        assert_eq!(with.stop_visit_cost(2), 0);
    }

    #[rstest]
    #[case(CostPruning::BoardCount, 600 * 100 * 3 + 1_000 * 100)]
    #[case(CostPruning::MinTransferCost, 1_000 * 100 + 2 * (600 + 120) * 100)]
    fn min_cost_follows_the_pruning_strategy(#[case] cost_pruning: CostPruning, #[case] expected: i32) {
        let mut subscriptions = LifeCycleSubscriptions::new();
        let params = McCostParams {
            cost_pruning,
            ..params()
        };
        let calculator = DefaultCostCalculator::new(&params, None, &mut subscriptions).unwrap();
        assert_eq!(calculator.calculate_min_cost(1_000, 2), expected);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(49, 0)]
    #[case(50, 1)]
    #[case(149, 1)]
    #[case(150, 2)]
    #[case(-50, 0)]
    #[case(-51, -1)]
    #[case(i32::MAX - 10, 21_474_836)]
    #[case(i32::MAX, 21_474_836)]
    #[case(i32::MIN, -21_474_836)]
    fn otp_domain_cost_rounds_half_up(#[case] raptor_cost: i32, #[case] expected: i32) {
        assert_eq!(to_otp_domain_cost(raptor_cost), expected);
    }

    #[test]
    fn raptor_cost_round_trip() {
        for cost in [0, 1, 17, 600, 3_600].iter() {
            assert_eq!(to_otp_domain_cost(to_raptor_cost(f64::from(*cost))), *cost);
        }
        assert_eq!(to_raptor_cost(1.234), 123);
    }

    #[test]
    fn otp_domain_cost_is_within_one_of_the_exact_value() {
        let costs = (0..20_000)
            .chain((0..1_000).map(|step| step * 2_147_483))
            .chain((i32::MAX - 1_000)..=i32::MAX);
        for raptor_cost in costs {
            let exact = f64::from(raptor_cost) / f64::from(PRECISION);
            let converted = f64::from(to_otp_domain_cost(raptor_cost));
            assert!(
                (converted - exact).abs() <= 1.0,
                "{} gave {}",
                raptor_cost,
                converted
            );
        }
    }
}
