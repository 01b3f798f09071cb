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

use crate::engine::cost::to_cost;
use crate::time::{PositiveDuration, SecondsSinceDayStart};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Identifies a stop of the transit data. Stops are numbered from 0 to `nb_of_stops() - 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Stop {
    pub(crate) idx: usize,
}

impl Stop {
    pub fn new(idx: usize) -> Self {
        Self { idx }
    }

    pub fn idx(&self) -> usize {
        self.idx
    }
}

/// Identifies a pattern of the transit data, that is a sequence of stops
/// with the trips that serve this sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatternIdx {
    pub(crate) idx: usize,
}

impl PatternIdx {
    pub fn new(idx: usize) -> Self {
        Self { idx }
    }

    pub fn idx(&self) -> usize {
        self.idx
    }
}

/// The timetable of one vehicle along the stops of its pattern.
pub trait TripSchedule: Debug {
    /// The position of this trip in the timetable of its pattern.
    ///
    /// Two rides on trips with different sort index are never compared.
    fn trip_sort_index(&self) -> usize;

    /// Arrival time at the `stop_position`-th stop of the pattern.
    ///
    /// Panics if `stop_position` is not a valid position in the pattern.
    fn arrival(&self, stop_position: usize) -> SecondsSinceDayStart;

    /// Departure time from the `stop_position`-th stop of the pattern.
    ///
    /// Panics if `stop_position` is not a valid position in the pattern.
    fn departure(&self, stop_position: usize) -> SecondsSinceDayStart;

    /// Which of the request's transit reluctances applies to this trip.
    fn transit_reluctance_index(&self) -> usize {
        0
    }

    /// Priority group(s) of this trip, used as a second criterion
    /// when a `DominanceFunction` is given in the request.
    fn priority_group(&self) -> u32 {
        0
    }

    fn name(&self) -> &str;
}

/// A sequence of stops. All trips of a pattern serve these stops in this order.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub name: String,
    pub mode: String,
    pub stops: Vec<Stop>,
    pub board_allowed: Vec<bool>,
    pub alight_allowed: Vec<bool>,
}

impl Pattern {
    pub fn new(name: &str, mode: &str, stops: Vec<Stop>) -> Self {
        let nb_of_stops = stops.len();
        Self {
            name: name.to_string(),
            mode: mode.to_string(),
            stops,
            board_allowed: vec![true; nb_of_stops],
            alight_allowed: vec![true; nb_of_stops],
        }
    }

    pub fn nb_of_positions(&self) -> usize {
        self.stops.len()
    }

    pub fn stop_at(&self, position: usize) -> Stop {
        self.stops[position]
    }

    pub fn can_board(&self, position: usize) -> bool {
        self.board_allowed[position]
    }

    pub fn can_alight(&self, position: usize) -> bool {
        self.alight_allowed[position]
    }
}

/// Read-only view of the transit network used by a search.
///
/// Implementors must guarantee that the trips of a pattern are sorted,
/// and that they do not overtake each other : if a trip departs before another one
/// from the first stop, it departs before it and arrives before it at every stop.
pub trait TransitDataProvider {
    type Trip: TripSchedule;

    fn nb_of_stops(&self) -> usize;

    fn nb_of_patterns(&self) -> usize;

    fn stop_name(&self, stop: Stop) -> &str;

    /// All patterns that contain `stop`
    fn patterns_at(&self, stop: Stop) -> &[PatternIdx];

    fn pattern(&self, pattern: PatternIdx) -> &Pattern;

    fn trips(&self, pattern: PatternIdx) -> &[Self::Trip];

    /// Transfers starting at `stop`. The `stop` of each transfer is its destination.
    fn transfers_from(&self, stop: Stop) -> &[Transfer];

    /// Transfers arriving at `stop`. The `stop` of each transfer is its origin.
    fn transfers_to(&self, stop: Stop) -> &[Transfer];

    /// Extra generalized cost for boarding or alighting at `stop`.
    fn stop_board_alight_cost(&self, _stop: Stop) -> Option<i32> {
        None
    }
}

/// A walking leg between two stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub stop: Stop,
    pub duration: PositiveDuration,
    pub c1: i32,
}

impl Transfer {
    pub fn new(stop: Stop, duration: PositiveDuration, c1: i32) -> Self {
        Self { stop, duration, c1 }
    }

    pub fn walk(stop: Stop, duration: PositiveDuration, walk_reluctance: f64) -> Self {
        let c1 = to_cost(f64::from(duration.total_seconds()) * walk_reluctance);
        Self { stop, duration, c1 }
    }
}

/// The time window during which an access or egress leg can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub open: SecondsSinceDayStart,
    pub close: SecondsSinceDayStart,
}

/// A leg from the origin to a stop (access) or from a stop to the destination (egress).
#[derive(Debug, Clone, PartialEq)]
pub struct AccessEgress {
    pub stop: Stop,
    pub duration: PositiveDuration,
    pub c1: i32,
    pub opening_hours: Option<OpeningHours>,
}

impl AccessEgress {
    pub fn new(stop: Stop, duration: PositiveDuration, c1: i32) -> Self {
        Self {
            stop,
            duration,
            c1,
            opening_hours: None,
        }
    }

    pub fn walk(stop: Stop, duration: PositiveDuration, walk_reluctance: f64) -> Self {
        let c1 = to_cost(f64::from(duration.total_seconds()) * walk_reluctance);
        Self::new(stop, duration, c1)
    }

    pub fn with_opening_hours(
        mut self,
        open: SecondsSinceDayStart,
        close: SecondsSinceDayStart,
    ) -> Self {
        self.opening_hours = Some(OpeningHours { open, close });
        self
    }

    /// The earliest time, not before `requested_departure_time`, at which this leg can start.
    /// Returns `None` if the leg is closed for the rest of the day.
    pub fn earliest_departure_time(
        &self,
        requested_departure_time: SecondsSinceDayStart,
    ) -> Option<SecondsSinceDayStart> {
        match &self.opening_hours {
            None => Some(requested_departure_time),
            Some(opening_hours) => {
                if requested_departure_time < opening_hours.open {
                    Some(opening_hours.open)
                } else if requested_departure_time > opening_hours.close {
                    None
                } else {
                    Some(requested_departure_time)
                }
            }
        }
    }

    /// The latest time, not after `requested_arrival_time`, at which this leg can end.
    /// Returns `None` if the leg opens after `requested_arrival_time - duration`.
    pub fn latest_arrival_time(
        &self,
        requested_arrival_time: SecondsSinceDayStart,
    ) -> Option<SecondsSinceDayStart> {
        match &self.opening_hours {
            None => Some(requested_arrival_time),
            Some(opening_hours) => {
                let departure_time = requested_arrival_time - self.duration;
                if departure_time > opening_hours.close {
                    Some(opening_hours.close + self.duration)
                } else if departure_time < opening_hours.open {
                    None
                } else {
                    Some(requested_arrival_time)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(hours: i32, minutes: i32) -> SecondsSinceDayStart {
        SecondsSinceDayStart::from_hms(hours, minutes, 0)
    }

    #[test]
    fn opening_hours_shift_departure() {
        let access = AccessEgress::new(Stop::new(0), PositiveDuration::from_hms(0, 5, 0), 600)
            .with_opening_hours(time(8, 0), time(9, 0));
        assert_eq!(access.earliest_departure_time(time(7, 30)), Some(time(8, 0)));
        assert_eq!(access.earliest_departure_time(time(8, 30)), Some(time(8, 30)));
        assert_eq!(access.earliest_departure_time(time(9, 1)), None);
    }

    #[test]
    fn opening_hours_shift_arrival() {
        let egress = AccessEgress::new(Stop::new(0), PositiveDuration::from_hms(0, 5, 0), 600)
            .with_opening_hours(time(8, 0), time(9, 0));
        assert_eq!(egress.latest_arrival_time(time(10, 0)), Some(time(9, 5)));
        assert_eq!(egress.latest_arrival_time(time(8, 30)), Some(time(8, 30)));
        assert_eq!(egress.latest_arrival_time(time(8, 4)), None);
    }

    #[test]
    fn always_open_without_opening_hours() {
        let access = AccessEgress::walk(Stop::new(3), PositiveDuration::from_seconds(30), 2.0);
        assert_eq!(access.c1, 6000);
        assert_eq!(access.earliest_departure_time(time(23, 0)), Some(time(23, 0)));
        assert_eq!(access.latest_arrival_time(time(1, 0)), Some(time(1, 0)));
    }
}
