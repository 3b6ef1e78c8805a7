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

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{bail, Context, Error};
use launch::range_raptor::transit_data::in_memory::{
    InMemoryTimetable, InMemoryTransitData, Pattern, Schedule,
};
use launch::range_raptor::PositiveDuration;

/// Parses a `HH:MM:SS` time of the service day.
pub fn time(hms: &str) -> i32 {
    PositiveDuration::from_str(hms)
        .unwrap_or_else(|err| panic!("bad time {} : {}", hms, err))
        .as_time_seconds()
}

/// Builder used to easily create an `InMemoryTransitData`.
/// Stops are referred to by name, and numbered in order of first use.
/// All the vehicle journeys of a route must visit the same stops.
///
/// ```ignore
/// let network = NetworkBuilder::default()
///     .vj("toto", |vj| {
///         vj.route("1")
///             .st("A", "10:00:00", "10:00:01")
///             .st("B", "10:05:00", "10:05:01");
///     })
///     .build()?;
/// ```
#[derive(Default)]
pub struct NetworkBuilder {
    stops: Vec<String>,
    routes: BTreeMap<String, RouteBuilder>,
}

#[derive(Default)]
struct RouteBuilder {
    stops: Vec<usize>,
    vehicle_journeys: Vec<(String, Vec<(i32, i32)>, bool)>,
}

pub struct VehicleJourneyBuilder<'a> {
    network: &'a mut NetworkBuilder,
    route: Option<String>,
    stop_times: Vec<(usize, i32, i32)>,
    in_service: bool,
}

impl<'a> VehicleJourneyBuilder<'a> {
    pub fn route(&mut self, route: &str) -> &mut Self {
        self.route = Some(route.to_string());
        self
    }

    /// Adds a stop time, with arrival and departure as `HH:MM:SS`.
    pub fn st(&mut self, stop: &str, arrival: &str, departure: &str) -> &mut Self {
        let stop_idx = self.network.stop_idx(stop);
        self.stop_times.push((stop_idx, time(arrival), time(departure)));
        self
    }

    pub fn not_in_service(&mut self) -> &mut Self {
        self.in_service = false;
        self
    }
}

pub struct Network {
    pub data: InMemoryTransitData,
    stops: Vec<String>,
    route_indices: BTreeMap<String, usize>,
}

impl Network {
    pub fn stop_idx(&self, name: &str) -> usize {
        self.stops
            .iter()
            .position(|stop| stop == name)
            .unwrap_or_else(|| panic!("unknown stop {}", name))
    }

    pub fn pattern_idx(&self, route: &str) -> usize {
        self.route_indices[route]
    }
}

impl NetworkBuilder {
    fn stop_idx(&mut self, name: &str) -> usize {
        match self.stops.iter().position(|stop| stop == name) {
            Some(idx) => idx,
            None => {
                self.stops.push(name.to_string());
                self.stops.len() - 1
            }
        }
    }

    /// Adds a stop without any vehicle journey, for access and egress legs.
    pub fn stop(mut self, name: &str) -> Self {
        self.stop_idx(name);
        self
    }

    /// Add a new vehicle journey. Without an explicit route, the vehicle
    /// journey gets a route of its own, named after it.
    pub fn vj<F>(mut self, name: &str, vj_initer: F) -> Self
    where
        F: FnOnce(&mut VehicleJourneyBuilder),
    {
        let mut builder = VehicleJourneyBuilder {
            network: &mut self,
            route: None,
            stop_times: Vec::new(),
            in_service: true,
        };
        vj_initer(&mut builder);
        let route = builder.route.take().unwrap_or_else(|| name.to_string());
        let stop_times = std::mem::take(&mut builder.stop_times);
        let in_service = builder.in_service;

        let route_builder = self.routes.entry(route).or_default();
        let stops: Vec<usize> = stop_times.iter().map(|(stop, _, _)| *stop).collect();
        if route_builder.vehicle_journeys.is_empty() {
            route_builder.stops = stops;
        }
        route_builder.vehicle_journeys.push((
            name.to_string(),
            stop_times
                .iter()
                .map(|(_, arrival, departure)| (*arrival, *departure))
                .collect(),
            in_service,
        ));
        self
    }

    pub fn build(self) -> Result<Network, Error> {
        let mut data = InMemoryTransitData::new(self.stops.len());
        let mut route_indices = BTreeMap::new();
        for (route_name, route) in self.routes {
            let pattern = Arc::new(Pattern::new(&route_name, route.stops.clone()));
            let mut schedules = Vec::new();
            for (vj_name, times, in_service) in route.vehicle_journeys {
                if times.len() != route.stops.len() {
                    bail!(
                        "vehicle journey {} does not visit the stops of route {}",
                        vj_name,
                        route_name
                    );
                }
                let (arrivals, departures) = times.into_iter().unzip();
                let schedule = Schedule::new(&pattern, arrivals, departures)
                    .with_context(|| format!("invalid vehicle journey {}", vj_name))?;
                schedules.push(if in_service {
                    schedule
                } else {
                    schedule.not_in_service()
                });
            }
            let timetable = InMemoryTimetable::new(&pattern, schedules)?;
            let idx = data.add_timetable(timetable)?;
            route_indices.insert(route_name, idx);
        }
        Ok(Network {
            data,
            stops: self.stops,
            route_indices,
        })
    }
}
