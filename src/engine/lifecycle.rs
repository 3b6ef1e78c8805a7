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

//! Lifecycle events of a Range-RAPTOR search.
//!
//! Components that depend on the iteration or on the round register
//! callbacks in [`LifeCycleSubscriptions`] while the search context is built.
//! Once every component is registered, the subscriptions are closed into a
//! [`LifeCycleEventPublisher`] which the worker uses to fire events.
//! Events are delivered synchronously, in subscription order.

use std::cell::Cell;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

use crate::error::ConfigError;
use crate::tracing::trace;

type SetupIterationListener = Box<dyn FnMut(i32)>;
type PrepareForNextRoundListener = Box<dyn FnMut(u8)>;
type RoundCompleteListener = Box<dyn FnMut(bool)>;
type IterationCompleteListener = Box<dyn FnMut()>;
type RouteSearchStartListener = Box<dyn FnMut(bool)>;

#[derive(Default)]
pub struct LifeCycleSubscriptions {
    closed: bool,
    setup_iteration: Vec<SetupIterationListener>,
    prepare_for_next_round: Vec<PrepareForNextRoundListener>,
    round_complete: Vec<RoundCompleteListener>,
    iteration_complete: Vec<IterationCompleteListener>,
    route_search_start: Vec<RouteSearchStartListener>,
}

impl LifeCycleSubscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_open(&self) -> Result<(), ConfigError> {
        if self.closed {
            Err(ConfigError::SubscriptionsClosed)
        } else {
            Ok(())
        }
    }

    /// Called with the departure (or arrival, for a reverse search) minute
    /// at the start of each Range-RAPTOR iteration.
    pub fn on_setup_iteration<F>(&mut self, listener: F) -> Result<(), ConfigError>
    where
        F: FnMut(i32) + 'static,
    {
        self.check_open()?;
        self.setup_iteration.push(Box::new(listener));
        Ok(())
    }

    /// Called with the round about to start.
    pub fn on_prepare_for_next_round<F>(&mut self, listener: F) -> Result<(), ConfigError>
    where
        F: FnMut(u8) + 'static,
    {
        self.check_open()?;
        self.prepare_for_next_round.push(Box::new(listener));
        Ok(())
    }

    /// Called at the end of a round, with `true` if the destination was reached.
    pub fn on_round_complete<F>(&mut self, listener: F) -> Result<(), ConfigError>
    where
        F: FnMut(bool) + 'static,
    {
        self.check_open()?;
        self.round_complete.push(Box::new(listener));
        Ok(())
    }

    pub fn on_iteration_complete<F>(&mut self, listener: F) -> Result<(), ConfigError>
    where
        F: FnMut() + 'static,
    {
        self.check_open()?;
        self.iteration_complete.push(Box::new(listener));
        Ok(())
    }

    /// Called once before the first iteration, with `true` for a forward search.
    pub fn on_route_search_start<F>(&mut self, listener: F) -> Result<(), ConfigError>
    where
        F: FnMut(bool) + 'static,
    {
        self.check_open()?;
        self.route_search_start.push(Box::new(listener));
        Ok(())
    }

    /// Seals the subscriptions. Later subscription attempts on `self` fail
    /// with [`ConfigError::SubscriptionsClosed`].
    pub fn close(&mut self) -> LifeCycleEventPublisher {
        self.closed = true;
        LifeCycleEventPublisher {
            setup_iteration: std::mem::take(&mut self.setup_iteration),
            prepare_for_next_round: std::mem::take(&mut self.prepare_for_next_round),
            round_complete: std::mem::take(&mut self.round_complete),
            iteration_complete: std::mem::take(&mut self.iteration_complete),
            route_search_start: std::mem::take(&mut self.route_search_start),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Debug for LifeCycleSubscriptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifeCycleSubscriptions")
            .field("closed", &self.closed)
            .field("setup_iteration", &self.setup_iteration.len())
            .field("prepare_for_next_round", &self.prepare_for_next_round.len())
            .field("round_complete", &self.round_complete.len())
            .field("iteration_complete", &self.iteration_complete.len())
            .field("route_search_start", &self.route_search_start.len())
            .finish()
    }
}

/// Fires lifecycle events to the listeners registered before the
/// subscriptions were closed.
pub struct LifeCycleEventPublisher {
    setup_iteration: Vec<SetupIterationListener>,
    prepare_for_next_round: Vec<PrepareForNextRoundListener>,
    round_complete: Vec<RoundCompleteListener>,
    iteration_complete: Vec<IterationCompleteListener>,
    route_search_start: Vec<RouteSearchStartListener>,
}

impl LifeCycleEventPublisher {
    pub fn route_search_start(&mut self, search_forward: bool) {
        trace!("Route search start, forward : {}", search_forward);
        for listener in self.route_search_start.iter_mut() {
            listener(search_forward);
        }
    }

    pub fn setup_iteration(&mut self, iteration_time: i32) {
        for listener in self.setup_iteration.iter_mut() {
            listener(iteration_time);
        }
    }

    pub fn prepare_for_next_round(&mut self, round: u8) {
        for listener in self.prepare_for_next_round.iter_mut() {
            listener(round);
        }
    }

    pub fn round_complete(&mut self, destination_reached: bool) {
        for listener in self.round_complete.iter_mut() {
            listener(destination_reached);
        }
    }

    pub fn iteration_complete(&mut self) {
        for listener in self.iteration_complete.iter_mut() {
            listener();
        }
    }
}

impl Debug for LifeCycleEventPublisher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifeCycleEventPublisher")
            .field("setup_iteration", &self.setup_iteration.len())
            .field("prepare_for_next_round", &self.prepare_for_next_round.len())
            .field("round_complete", &self.round_complete.len())
            .field("iteration_complete", &self.iteration_complete.len())
            .field("route_search_start", &self.route_search_start.len())
            .finish()
    }
}

/// A value that changes with the round, like the transfer slack which only
/// applies from the second boarding on.
///
/// The value is recomputed by `transition(round)` each time the
/// prepare-for-next-round event fires, and starts at `transition(0)`.
#[derive(Debug, Clone)]
pub struct RoundDependent<V: Copy> {
    value: Rc<Cell<V>>,
}

impl<V: Copy + 'static> RoundDependent<V> {
    pub fn new<F>(transition: F, subscriptions: &mut LifeCycleSubscriptions) -> Result<Self, ConfigError>
    where
        F: Fn(u8) -> V + 'static,
    {
        let value = Rc::new(Cell::new(transition(0)));
        let shared = Rc::clone(&value);
        subscriptions.on_prepare_for_next_round(move |round| shared.set(transition(round)))?;
        Ok(Self { value })
    }

    /// A value that never changes, not bound to any lifecycle.
    pub fn constant(value: V) -> Self {
        Self {
            value: Rc::new(Cell::new(value)),
        }
    }

    pub fn get(&self) -> V {
        self.value.get()
    }
}
