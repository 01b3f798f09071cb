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

//! An in-memory implementation of `TransitDataProvider`.

use std::fmt;

use crate::time::{PositiveDuration, SecondsSinceDayStart};
use crate::traits::{Pattern, PatternIdx, Stop, Transfer, TransitDataProvider, TripSchedule};

#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub name: String,
    pub arrivals: Vec<SecondsSinceDayStart>,
    pub departures: Vec<SecondsSinceDayStart>,
    pub transit_reluctance_index: usize,
    pub priority_group: u32,
    // position of the trip in its pattern, set when the trip is inserted
    sort_index: usize,
}

impl Trip {
    pub fn new(
        name: &str,
        arrivals: Vec<SecondsSinceDayStart>,
        departures: Vec<SecondsSinceDayStart>,
    ) -> Self {
        Self {
            name: name.to_string(),
            arrivals,
            departures,
            transit_reluctance_index: 0,
            priority_group: 0,
            sort_index: 0,
        }
    }

    fn nb_of_positions(&self) -> usize {
        self.arrivals.len()
    }
}

impl TripSchedule for Trip {
    fn trip_sort_index(&self) -> usize {
        self.sort_index
    }

    fn arrival(&self, stop_position: usize) -> SecondsSinceDayStart {
        self.arrivals[stop_position]
    }

    fn departure(&self, stop_position: usize) -> SecondsSinceDayStart {
        self.departures[stop_position]
    }

    fn transit_reluctance_index(&self) -> usize {
        self.transit_reluctance_index
    }

    fn priority_group(&self) -> u32 {
        self.priority_group
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransitDataError {
    UnknownStop(usize),
    EmptyPattern(String),
    BadNumberOfTimes {
        trip: String,
        expected: usize,
        found: usize,
    },
    DecreasingTimes {
        trip: String,
        position: usize,
    },
    OvertakingTrips {
        trip: String,
        other_trip: String,
    },
}

impl std::error::Error for TransitDataError {}

impl fmt::Display for TransitDataError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TransitDataError::UnknownStop(idx) => write!(f, "Unknown stop {}", idx),
            TransitDataError::EmptyPattern(name) => {
                write!(f, "The pattern {} must have at least two stops", name)
            }
            TransitDataError::BadNumberOfTimes {
                trip,
                expected,
                found,
            } => write!(
                f,
                "The trip {} has {} stop times, but its pattern has {} stops",
                trip, found, expected
            ),
            TransitDataError::DecreasingTimes { trip, position } => write!(
                f,
                "The trip {} goes back in time at stop position {}",
                trip, position
            ),
            TransitDataError::OvertakingTrips { trip, other_trip } => write!(
                f,
                "The trips {} and {} overtake each other",
                trip, other_trip
            ),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransitData {
    stop_names: Vec<String>,
    stop_costs: Vec<Option<i32>>,
    patterns: Vec<Pattern>,
    trips: Vec<Vec<Trip>>,
    patterns_at_stop: Vec<Vec<PatternIdx>>,
    transfers_from: Vec<Vec<Transfer>>,
    transfers_to: Vec<Vec<Transfer>>,
}

impl TransitData {
    pub fn new(stop_names: Vec<String>) -> Self {
        let nb_of_stops = stop_names.len();
        Self {
            stop_names,
            stop_costs: vec![None; nb_of_stops],
            patterns: Vec::new(),
            trips: Vec::new(),
            patterns_at_stop: vec![Vec::new(); nb_of_stops],
            transfers_from: vec![Vec::new(); nb_of_stops],
            transfers_to: vec![Vec::new(); nb_of_stops],
        }
    }

    pub fn stop_idx(&self, name: &str) -> Option<Stop> {
        self.stop_names
            .iter()
            .position(|stop_name| stop_name == name)
            .map(Stop::new)
    }

    pub fn nb_of_trips(&self) -> usize {
        self.trips.iter().map(Vec::len).sum()
    }

    pub fn nb_of_transfers(&self) -> usize {
        self.transfers_from.iter().map(Vec::len).sum()
    }

    fn check_stop(&self, stop: Stop) -> Result<(), TransitDataError> {
        if stop.idx >= self.stop_names.len() {
            Err(TransitDataError::UnknownStop(stop.idx))
        } else {
            Ok(())
        }
    }

    /// Adds a pattern with its trips. The trips are sorted by departure time.
    pub fn add_pattern(
        &mut self,
        pattern: Pattern,
        mut trips: Vec<Trip>,
    ) -> Result<PatternIdx, TransitDataError> {
        if pattern.nb_of_positions() < 2 {
            return Err(TransitDataError::EmptyPattern(pattern.name));
        }
        for stop in pattern.stops.iter() {
            self.check_stop(*stop)?;
        }
        for trip in trips.iter() {
            check_trip(trip, pattern.nb_of_positions())?;
        }
        trips.sort_by(|left, right| {
            left.departures[0]
                .cmp(&right.departures[0])
                .then(left.arrivals[0].cmp(&right.arrivals[0]))
        });
        for pair in trips.windows(2) {
            let (first, second) = (&pair[0], &pair[1]);
            let overtaken = (0..first.nb_of_positions()).any(|position| {
                first.arrivals[position] > second.arrivals[position]
                    || first.departures[position] > second.departures[position]
            });
            if overtaken {
                return Err(TransitDataError::OvertakingTrips {
                    trip: first.name.clone(),
                    other_trip: second.name.clone(),
                });
            }
        }
        for (sort_index, trip) in trips.iter_mut().enumerate() {
            trip.sort_index = sort_index;
        }

        let pattern_idx = PatternIdx::new(self.patterns.len());
        let mut stops = pattern.stops.clone();
        stops.sort();
        stops.dedup();
        for stop in stops {
            self.patterns_at_stop[stop.idx].push(pattern_idx);
        }
        self.patterns.push(pattern);
        self.trips.push(trips);
        Ok(pattern_idx)
    }

    pub fn add_transfer(
        &mut self,
        from: Stop,
        to: Stop,
        duration: PositiveDuration,
        c1: i32,
    ) -> Result<(), TransitDataError> {
        self.check_stop(from)?;
        self.check_stop(to)?;
        self.transfers_from[from.idx].push(Transfer::new(to, duration, c1));
        self.transfers_to[to.idx].push(Transfer::new(from, duration, c1));
        Ok(())
    }

    pub fn set_stop_board_alight_cost(
        &mut self,
        stop: Stop,
        cost: i32,
    ) -> Result<(), TransitDataError> {
        self.check_stop(stop)?;
        self.stop_costs[stop.idx] = Some(cost);
        Ok(())
    }
}

fn check_trip(trip: &Trip, nb_of_positions: usize) -> Result<(), TransitDataError> {
    let found = trip.arrivals.len().max(trip.departures.len());
    if trip.arrivals.len() != nb_of_positions || trip.departures.len() != nb_of_positions {
        return Err(TransitDataError::BadNumberOfTimes {
            trip: trip.name.clone(),
            expected: nb_of_positions,
            found,
        });
    }
    for position in 0..nb_of_positions {
        let goes_back = trip.departures[position] < trip.arrivals[position]
            || (position > 0 && trip.arrivals[position] < trip.departures[position - 1]);
        if goes_back {
            return Err(TransitDataError::DecreasingTimes {
                trip: trip.name.clone(),
                position,
            });
        }
    }
    Ok(())
}

impl TransitDataProvider for TransitData {
    type Trip = Trip;

    fn nb_of_stops(&self) -> usize {
        self.stop_names.len()
    }

    fn nb_of_patterns(&self) -> usize {
        self.patterns.len()
    }

    fn stop_name(&self, stop: Stop) -> &str {
        &self.stop_names[stop.idx]
    }

    fn patterns_at(&self, stop: Stop) -> &[PatternIdx] {
        &self.patterns_at_stop[stop.idx]
    }

    fn pattern(&self, pattern: PatternIdx) -> &Pattern {
        &self.patterns[pattern.idx]
    }

    fn trips(&self, pattern: PatternIdx) -> &[Trip] {
        &self.trips[pattern.idx]
    }

    fn transfers_from(&self, stop: Stop) -> &[Transfer] {
        &self.transfers_from[stop.idx]
    }

    fn transfers_to(&self, stop: Stop) -> &[Transfer] {
        &self.transfers_to[stop.idx]
    }

    fn stop_board_alight_cost(&self, stop: Stop) -> Option<i32> {
        self.stop_costs[stop.idx]
    }
}
