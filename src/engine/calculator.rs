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

use crate::request::SearchDirection;
use crate::time::{PositiveDuration, SecondsSinceDayStart};
use crate::traits::{AccessEgress, Pattern, TripSchedule};

/// Time arithmetic and timetable lookups for a search in a given direction.
///
/// A forward search explores the network from the origin, and the "time" of a stop
/// is the earliest arrival at this stop.
/// A reverse search explores the network from the destination, and the "time" of a stop
/// is the latest departure from this stop that still reaches the destination.
/// In a reverse search, boarding a trip means alighting from it in the real journey.
#[derive(Debug, Clone)]
pub struct TransitCalculator {
    direction: SearchDirection,
    board_slack: PositiveDuration,
    alight_slack: PositiveDuration,
    transfer_slack: PositiveDuration,
}

type Time = SecondsSinceDayStart;

impl TransitCalculator {
    /// Slacks are given as they apply to the real journey, they are swapped
    /// for a reverse search.
    pub fn new(
        direction: SearchDirection,
        board_slack: PositiveDuration,
        alight_slack: PositiveDuration,
        transfer_slack: PositiveDuration,
    ) -> Self {
        let (board_slack, alight_slack) = match direction {
            SearchDirection::Forward => (board_slack, alight_slack),
            SearchDirection::Reverse => (alight_slack, board_slack),
        };
        Self {
            direction,
            board_slack,
            alight_slack,
            transfer_slack,
        }
    }

    pub fn direction(&self) -> SearchDirection {
        self.direction
    }

    pub fn is_forward(&self) -> bool {
        self.direction == SearchDirection::Forward
    }

    /// Slack applied before boarding, in search order
    pub fn board_slack(&self) -> PositiveDuration {
        self.board_slack
    }

    /// Slack applied after alighting, in search order
    pub fn alight_slack(&self) -> PositiveDuration {
        self.alight_slack
    }

    pub fn plus(&self, time: Time, duration: PositiveDuration) -> Time {
        match self.direction {
            SearchDirection::Forward => time + duration,
            SearchDirection::Reverse => time - duration,
        }
    }

    pub fn minus(&self, time: Time, duration: PositiveDuration) -> Time {
        match self.direction {
            SearchDirection::Forward => time - duration,
            SearchDirection::Reverse => time + duration,
        }
    }

    /// True if `left` is strictly better than `right`
    pub fn is_before(&self, left: Time, right: Time) -> bool {
        match self.direction {
            SearchDirection::Forward => left < right,
            SearchDirection::Reverse => left > right,
        }
    }

    pub fn unreached_time(&self) -> Time {
        match self.direction {
            SearchDirection::Forward => Time::unreached_late(),
            SearchDirection::Reverse => Time::unreached_early(),
        }
    }

    /// Positive duration between two times in search order
    pub fn duration_between(&self, from: Time, to: Time) -> PositiveDuration {
        from.distance(&to)
    }

    /// Start times of the successive iterations of a range raptor search,
    /// from the worst one to the best one : the first iteration of a forward search
    /// starts at `start_time + search_window - step`, the last one at `start_time`.
    pub fn iteration_departure_times(
        &self,
        start_time: Time,
        search_window: PositiveDuration,
        step: PositiveDuration,
    ) -> Vec<Time> {
        if step.is_zero() || search_window.is_zero() {
            return vec![start_time];
        }
        let nb_of_iterations = (search_window.total_seconds() + step.total_seconds() - 1)
            / step.total_seconds();
        (0..nb_of_iterations)
            .rev()
            .map(|iteration| self.plus(start_time, step * iteration))
            .collect()
    }

    /// Positions of the stops of a pattern, in search order
    pub fn stop_positions(&self, nb_of_positions: usize) -> impl Iterator<Item = usize> {
        let forward = self.is_forward();
        (0..nb_of_positions).map(move |idx| {
            if forward {
                idx
            } else {
                nb_of_positions - 1 - idx
            }
        })
    }

    pub fn boarding_possible(&self, pattern: &Pattern, position: usize) -> bool {
        match self.direction {
            SearchDirection::Forward => pattern.can_board(position),
            SearchDirection::Reverse => pattern.can_alight(position),
        }
    }

    pub fn alighting_possible(&self, pattern: &Pattern, position: usize) -> bool {
        match self.direction {
            SearchDirection::Forward => pattern.can_alight(position),
            SearchDirection::Reverse => pattern.can_board(position),
        }
    }

    pub fn board_time<Trip: TripSchedule>(&self, trip: &Trip, position: usize) -> Time {
        match self.direction {
            SearchDirection::Forward => trip.departure(position),
            SearchDirection::Reverse => trip.arrival(position),
        }
    }

    pub fn alight_time<Trip: TripSchedule>(&self, trip: &Trip, position: usize) -> Time {
        match self.direction {
            SearchDirection::Forward => trip.arrival(position),
            SearchDirection::Reverse => trip.departure(position),
        }
    }

    /// Earliest time at which a trip can be boarded at a stop reached at `stop_time`
    pub fn earliest_board_time(&self, stop_time: Time, first_boarding: bool) -> Time {
        let slack = if first_boarding {
            self.board_slack
        } else {
            self.board_slack + self.transfer_slack
        };
        self.plus(stop_time, slack)
    }

    /// Time of the stop after alighting at `alight_time`
    pub fn stop_arrival_time(&self, alight_time: Time) -> Time {
        self.plus(alight_time, self.alight_slack)
    }

    /// Find the best trip that can be boarded at `position` not before `earliest_board_time`.
    ///
    /// When `better_than` is given, only trips strictly better than the trip
    /// at this index are considered.
    /// `trips` must be sorted and must not overtake each other.
    pub fn find_trip<'trips, Trip: TripSchedule>(
        &self,
        trips: &'trips [Trip],
        position: usize,
        earliest_board_time: Time,
        better_than: Option<usize>,
    ) -> Option<(usize, &'trips Trip)> {
        match self.direction {
            SearchDirection::Forward => {
                let idx = trips
                    .partition_point(|trip| trip.departure(position) < earliest_board_time);
                let upper_bound = better_than.unwrap_or(trips.len());
                if idx < upper_bound && idx < trips.len() {
                    Some((idx, &trips[idx]))
                } else {
                    None
                }
            }
            SearchDirection::Reverse => {
                let nb_of_candidates =
                    trips.partition_point(|trip| trip.arrival(position) <= earliest_board_time);
                if nb_of_candidates == 0 {
                    return None;
                }
                let idx = nb_of_candidates - 1;
                match better_than {
                    Some(current) if idx <= current => None,
                    _ => Some((idx, &trips[idx])),
                }
            }
        }
    }

    /// When the access leg starts (at the origin in a forward search, at the destination in a
    /// reverse search) and the time at its stop, for an iteration starting at `iteration_time`.
    ///
    /// Returns `None` if the leg cannot be used during this iteration.
    pub fn access_times(
        &self,
        access: &AccessEgress,
        iteration_time: Time,
    ) -> Option<(Time, Time)> {
        match self.direction {
            SearchDirection::Forward => {
                let departure = access.earliest_departure_time(iteration_time)?;
                Some((departure, departure + access.duration))
            }
            SearchDirection::Reverse => {
                let arrival = access.latest_arrival_time(iteration_time)?;
                Some((arrival, arrival - access.duration))
            }
        }
    }

    /// When an egress leg starts at its stop reached at `stop_time`, and when it ends
    /// (at the destination in a forward search, at the origin in a reverse search).
    pub fn egress_times(&self, egress: &AccessEgress, stop_time: Time) -> Option<(Time, Time)> {
        match self.direction {
            SearchDirection::Forward => {
                let departure = egress.earliest_departure_time(stop_time)?;
                Some((departure, departure + egress.duration))
            }
            SearchDirection::Reverse => {
                let arrival = egress.latest_arrival_time(stop_time)?;
                Some((arrival, arrival - egress.duration))
            }
        }
    }

    /// Sign used to compute the cost of riding a trip relative to the boarding time
    pub(crate) fn time_sign(&self) -> f64 {
        match self.direction {
            SearchDirection::Forward => 1.0,
            SearchDirection::Reverse => -1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Trip {
        times: Vec<Time>,
    }

    impl TripSchedule for Trip {
        fn trip_sort_index(&self) -> usize {
            0
        }
        fn arrival(&self, position: usize) -> Time {
            self.times[position]
        }
        fn departure(&self, position: usize) -> Time {
            self.times[position]
        }
        fn name(&self) -> &str {
            "trip"
        }
    }

    fn hms(h: i32, m: i32, s: i32) -> Time {
        Time::from_hms(h, m, s)
    }

    fn trips() -> Vec<Trip> {
        (0..3)
            .map(|i| Trip {
                times: vec![hms(10, 10 * i, 0), hms(10, 10 * i + 5, 0)],
            })
            .collect()
    }

    fn calculator(direction: SearchDirection) -> TransitCalculator {
        TransitCalculator::new(
            direction,
            PositiveDuration::from_seconds(30),
            PositiveDuration::from_seconds(10),
            PositiveDuration::from_seconds(60),
        )
    }

    #[test]
    fn forward_trip_search() {
        let calculator = calculator(SearchDirection::Forward);
        let trips = trips();
        let found = calculator.find_trip(&trips, 0, hms(10, 5, 0), None);
        assert_eq!(found.map(|(idx, _)| idx), Some(1));
        let found = calculator.find_trip(&trips, 0, hms(10, 10, 0), None);
        assert_eq!(found.map(|(idx, _)| idx), Some(1));
        let found = calculator.find_trip(&trips, 0, hms(10, 5, 0), Some(1));
        assert!(found.is_none());
        let found = calculator.find_trip(&trips, 0, hms(10, 21, 0), None);
        assert!(found.is_none());
    }

    #[test]
    fn reverse_trip_search() {
        let calculator = calculator(SearchDirection::Reverse);
        let trips = trips();
        let found = calculator.find_trip(&trips, 1, hms(10, 20, 0), None);
        assert_eq!(found.map(|(idx, _)| idx), Some(1));
        let found = calculator.find_trip(&trips, 1, hms(10, 25, 0), None);
        assert_eq!(found.map(|(idx, _)| idx), Some(2));
        let found = calculator.find_trip(&trips, 1, hms(10, 25, 0), Some(2));
        assert!(found.is_none());
        let found = calculator.find_trip(&trips, 1, hms(10, 4, 0), None);
        assert!(found.is_none());
    }

    #[test]
    fn iteration_times() {
        let calculator = calculator(SearchDirection::Forward);
        let times = calculator.iteration_departure_times(
            hms(0, 0, 0),
            PositiveDuration::from_hms(0, 10, 0),
            PositiveDuration::from_seconds(60),
        );
        assert_eq!(times.len(), 10);
        assert_eq!(times[0], hms(0, 9, 0));
        assert_eq!(times[9], hms(0, 0, 0));

        let calculator = calculator_reverse();
        let times = calculator.iteration_departure_times(
            hms(1, 0, 0),
            PositiveDuration::from_hms(0, 3, 0),
            PositiveDuration::from_seconds(60),
        );
        assert_eq!(times, vec![hms(0, 58, 0), hms(0, 59, 0), hms(1, 0, 0)]);
    }

    fn calculator_reverse() -> TransitCalculator {
        calculator(SearchDirection::Reverse)
    }

    #[test]
    fn slacks_are_swapped_in_reverse() {
        let forward = calculator(SearchDirection::Forward);
        assert_eq!(forward.earliest_board_time(hms(10, 0, 0), true), hms(10, 0, 30));
        assert_eq!(forward.earliest_board_time(hms(10, 0, 0), false), hms(10, 1, 30));
        assert_eq!(forward.stop_arrival_time(hms(10, 0, 0)), hms(10, 0, 10));

        let reverse = calculator(SearchDirection::Reverse);
        assert_eq!(reverse.earliest_board_time(hms(10, 0, 0), true), hms(9, 59, 50));
        assert_eq!(reverse.stop_arrival_time(hms(10, 0, 0)), hms(9, 59, 30));
    }

    #[test]
    fn stop_positions_follow_direction() {
        let forward: Vec<_> = calculator(SearchDirection::Forward).stop_positions(3).collect();
        assert_eq!(forward, vec![0, 1, 2]);
        let reverse: Vec<_> = calculator(SearchDirection::Reverse).stop_positions(3).collect();
        assert_eq!(reverse, vec![2, 1, 0]);
    }
}
