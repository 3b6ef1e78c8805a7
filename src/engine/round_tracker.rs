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

use std::cell::Cell;
use std::rc::Rc;

use crate::engine::lifecycle::LifeCycleSubscriptions;
use crate::error::ConfigError;
use crate::tracing::trace;

#[derive(Debug)]
struct RoundState {
    round: Cell<u8>,
    round_max_limit: Cell<u8>,
}

/// Keeps track of the current round of an iteration and of the last round
/// to run.
///
/// Round 0 is the access round, round `k` reaches stops with `k` boardings.
/// Once the destination is reached, the search runs at most
/// `number_of_additional_transfers` more rounds.
#[derive(Debug)]
pub struct RoundTracker {
    state: Rc<RoundState>,
    number_of_rounds: u8,
}

impl RoundTracker {
    pub fn new(
        number_of_rounds: u8,
        number_of_additional_transfers: u8,
        subscriptions: &mut LifeCycleSubscriptions,
    ) -> Result<Self, ConfigError> {
        let state = Rc::new(RoundState {
            round: Cell::new(0),
            round_max_limit: Cell::new(number_of_rounds),
        });

        let on_setup = Rc::clone(&state);
        subscriptions.on_setup_iteration(move |_| {
            on_setup.round.set(0);
            on_setup.round_max_limit.set(number_of_rounds);
        })?;

        let on_round_complete = Rc::clone(&state);
        subscriptions.on_round_complete(move |destination_reached| {
            if destination_reached {
                let round = on_round_complete.round.get();
                let limit = round
                    .saturating_add(number_of_additional_transfers)
                    .saturating_add(1);
                let new_limit = on_round_complete.round_max_limit.get().min(limit);
                trace!("Destination reached in round {}, last round is now {}", round, new_limit);
                on_round_complete.round_max_limit.set(new_limit);
            }
        })?;

        Ok(Self {
            state,
            number_of_rounds,
        })
    }

    pub fn round(&self) -> u8 {
        self.state.round.get()
    }

    pub fn round_max_limit(&self) -> u8 {
        self.state.round_max_limit.get()
    }

    pub fn number_of_rounds(&self) -> u8 {
        self.number_of_rounds
    }

    /// Returns `true` if the round following the current one may run.
    pub fn has_more_rounds(&self) -> bool {
        self.round() < self.round_max_limit()
    }

    /// Moves to the next round and returns it.
    pub fn next_round(&self) -> u8 {
        let next = self.round().saturating_add(1);
        self.state.round.set(next);
        next
    }

    /// Moves to the next round if there is one. Returns `false`, leaving the
    /// round unchanged, when the last round was reached.
    pub fn try_next_round(&self) -> bool {
        if self.has_more_rounds() {
            self.next_round();
            true
        } else {
            false
        }
    }

    /// `true` in the round of the first boarding.
    pub fn is_first_round(&self) -> bool {
        self.round() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_reached_limits_the_remaining_rounds() {
        let mut subscriptions = LifeCycleSubscriptions::new();
        let tracker = RoundTracker::new(5, 1, &mut subscriptions).unwrap();
        let mut publisher = subscriptions.close();

        publisher.setup_iteration(36_000);
        assert_eq!(tracker.round(), 0);
        assert_eq!(tracker.round_max_limit(), 5);

        assert!(tracker.try_next_round());
        assert!(tracker.is_first_round());
        publisher.round_complete(false);

        assert!(tracker.try_next_round());
        assert!(!tracker.is_first_round());
        publisher.round_complete(true);
        assert_eq!(tracker.round_max_limit(), 4);

        assert!(tracker.try_next_round());
        assert_eq!(tracker.round(), 3);
        publisher.round_complete(false);
        assert!(tracker.try_next_round());
        assert_eq!(tracker.round(), 4);
        assert!(!tracker.has_more_rounds());
        assert!(!tracker.try_next_round());
        assert_eq!(tracker.round(), 4);
    }

    #[test]
    fn limit_never_increases_within_an_iteration() {
        let mut subscriptions = LifeCycleSubscriptions::new();
        let tracker = RoundTracker::new(10, 3, &mut subscriptions).unwrap();
        let mut publisher = subscriptions.close();

        publisher.setup_iteration(0);
        tracker.next_round();
        publisher.round_complete(true);
        assert_eq!(tracker.round_max_limit(), 5);
        tracker.next_round();
        publisher.round_complete(true);
        assert_eq!(tracker.round_max_limit(), 5);
    }

    #[test]
    fn setup_iteration_resets_the_tracker() {
        let mut subscriptions = LifeCycleSubscriptions::new();
        let tracker = RoundTracker::new(3, 0, &mut subscriptions).unwrap();
        let mut publisher = subscriptions.close();

        publisher.setup_iteration(60);
        tracker.next_round();
        publisher.round_complete(true);
        assert_eq!(tracker.round_max_limit(), 2);
        assert!(tracker.has_more_rounds());
        tracker.next_round();
        assert!(!tracker.has_more_rounds());

        publisher.setup_iteration(0);
        assert_eq!(tracker.round(), 0);
        assert_eq!(tracker.round_max_limit(), 3);
        assert!(tracker.has_more_rounds());
    }
}
