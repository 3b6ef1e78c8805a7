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

//! A simple in-memory implementation of the transit data traits.
//!
//! Used by tests and by callers that build timetables on the fly.

use std::sync::Arc;

use thiserror::Error;

use super::{Timetable, TransitDataProvider, TripPattern, TripSchedule};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    name: String,
    stops: Vec<usize>,
    slack_index: usize,
    no_boarding: Vec<usize>,
    no_alighting: Vec<usize>,
}

impl Pattern {
    pub fn new(name: &str, stops: Vec<usize>) -> Self {
        Self {
            name: name.to_string(),
            stops,
            slack_index: 0,
            no_boarding: Vec::new(),
            no_alighting: Vec::new(),
        }
    }

    pub fn with_slack_index(mut self, slack_index: usize) -> Self {
        self.slack_index = slack_index;
        self
    }

    pub fn forbid_boarding_at(mut self, stop_position_in_pattern: usize) -> Self {
        self.no_boarding.push(stop_position_in_pattern);
        self
    }

    pub fn forbid_alighting_at(mut self, stop_position_in_pattern: usize) -> Self {
        self.no_alighting.push(stop_position_in_pattern);
        self
    }
}

impl TripPattern for Pattern {
    fn number_of_stops_in_pattern(&self) -> usize {
        self.stops.len()
    }

    fn stop_index(&self, stop_position_in_pattern: usize) -> usize {
        self.stops[stop_position_in_pattern]
    }

    fn boarding_possible_at(&self, stop_position_in_pattern: usize) -> bool {
        !self.no_boarding.contains(&stop_position_in_pattern)
    }

    fn alighting_possible_at(&self, stop_position_in_pattern: usize) -> bool {
        !self.no_alighting.contains(&stop_position_in_pattern)
    }

    fn slack_index(&self) -> usize {
        self.slack_index
    }

    fn debug_info(&self) -> String {
        let stops: Vec<String> = self.stops.iter().map(|stop| stop.to_string()).collect();
        format!("{} [{}]", self.name, stops.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pattern: Arc<Pattern>,
    arrivals: Vec<i32>,
    departures: Vec<i32>,
    in_service: bool,
}

impl Schedule {
    pub fn new(
        pattern: &Arc<Pattern>,
        arrivals: Vec<i32>,
        departures: Vec<i32>,
    ) -> Result<Self, TimetableError> {
        let nb_of_positions = pattern.number_of_stops_in_pattern();
        if arrivals.len() != nb_of_positions || departures.len() != nb_of_positions {
            return Err(TimetableError::WrongNumberOfTimes {
                pattern: pattern.debug_info(),
                expected: nb_of_positions,
                arrivals: arrivals.len(),
                departures: departures.len(),
            });
        }
        inspect(&arrivals, &departures).map_err(|position| TimetableError::DecreasingTimes {
            pattern: pattern.debug_info(),
            position,
        })?;
        Ok(Self {
            pattern: Arc::clone(pattern),
            arrivals,
            departures,
            in_service: true,
        })
    }

    /// A schedule where arrival and departure are equal at each stop.
    pub fn with_times(pattern: &Arc<Pattern>, times: &[i32]) -> Result<Self, TimetableError> {
        Self::new(pattern, times.to_vec(), times.to_vec())
    }

    /// Marks this trip as not running on the searched day.
    pub fn not_in_service(mut self) -> Self {
        self.in_service = false;
        self
    }

    pub fn is_in_service(&self) -> bool {
        self.in_service
    }
}

impl TripSchedule for Schedule {
    type Pattern = Pattern;

    fn arrival(&self, stop_position_in_pattern: usize) -> i32 {
        self.arrivals[stop_position_in_pattern]
    }

    fn departure(&self, stop_position_in_pattern: usize) -> i32 {
        self.departures[stop_position_in_pattern]
    }

    fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

// Returns Err(position) for the first position where times decrease
// along the trip.
fn inspect(arrivals: &[i32], departures: &[i32]) -> Result<(), usize> {
    for (position, (arrival, departure)) in arrivals.iter().zip(departures.iter()).enumerate() {
        if departure < arrival {
            return Err(position);
        }
        if position > 0 && *arrival < departures[position - 1] {
            return Err(position);
        }
    }
    Ok(())
}

#[derive(Debug)]
pub struct InMemoryTimetable {
    pattern: Arc<Pattern>,
    schedules: Vec<Schedule>,
}

impl InMemoryTimetable {
    /// Builds the timetable of `pattern`, sorting `schedules` by departure at
    /// the first stop.
    pub fn new(pattern: &Arc<Pattern>, mut schedules: Vec<Schedule>) -> Result<Self, TimetableError> {
        if pattern.number_of_stops_in_pattern() == 0 {
            return Err(TimetableError::EmptyPattern {
                pattern: pattern.debug_info(),
            });
        }
        if let Some(schedule) = schedules.iter().find(|schedule| schedule.pattern != *pattern) {
            return Err(TimetableError::ForeignSchedule {
                pattern: pattern.debug_info(),
                schedule_pattern: schedule.pattern.debug_info(),
            });
        }
        schedules.sort_by_key(|schedule| schedule.departure(0));
        Ok(Self {
            pattern: Arc::clone(pattern),
            schedules,
        })
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }
}

impl Timetable<Schedule> for InMemoryTimetable {
    fn number_of_trip_schedules(&self) -> usize {
        self.schedules.len()
    }

    fn trip_schedule(&self, trip_index: usize) -> &Schedule {
        &self.schedules[trip_index]
    }

    fn is_trip_in_service(&self, trip_index: usize) -> bool {
        self.schedules[trip_index].in_service
    }
}

#[derive(Debug, Default)]
pub struct InMemoryTransitData {
    nb_of_stops: usize,
    timetables: Vec<InMemoryTimetable>,
}

impl InMemoryTransitData {
    pub fn new(nb_of_stops: usize) -> Self {
        Self {
            nb_of_stops,
            timetables: Vec::new(),
        }
    }

    pub fn add_timetable(&mut self, timetable: InMemoryTimetable) -> Result<usize, TimetableError> {
        let pattern = timetable.pattern();
        let max_stop = (0..pattern.number_of_stops_in_pattern())
            .map(|position| pattern.stop_index(position))
            .max();
        if let Some(stop) = max_stop.filter(|stop| *stop >= self.nb_of_stops) {
            return Err(TimetableError::UnknownStop {
                pattern: pattern.debug_info(),
                stop,
            });
        }
        self.timetables.push(timetable);
        Ok(self.timetables.len() - 1)
    }
}

impl TransitDataProvider<Schedule> for InMemoryTransitData {
    type Timetable = InMemoryTimetable;

    fn number_of_stops(&self) -> usize {
        self.nb_of_stops
    }

    fn number_of_patterns(&self) -> usize {
        self.timetables.len()
    }

    fn timetable(&self, pattern_index: usize) -> &InMemoryTimetable {
        &self.timetables[pattern_index]
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimetableError {
    #[error("Pattern {pattern} has {expected} stops, but the schedule has {arrivals} arrivals and {departures} departures.")]
    WrongNumberOfTimes {
        pattern: String,
        expected: usize,
        arrivals: usize,
        departures: usize,
    },
    #[error("Times decrease at position {position} of a schedule of pattern {pattern}.")]
    DecreasingTimes { pattern: String, position: usize },
    #[error("A schedule of pattern {schedule_pattern} was given to the timetable of {pattern}.")]
    ForeignSchedule {
        pattern: String,
        schedule_pattern: String,
    },
    #[error("Pattern {pattern} visits no stop.")]
    EmptyPattern { pattern: String },
    #[error("Pattern {pattern} visits stop {stop} which is out of the transit data.")]
    UnknownStop { pattern: String, stop: usize },
}
