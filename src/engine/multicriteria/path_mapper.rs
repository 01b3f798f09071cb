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

use crate::engine::calculator::TransitCalculator;
use crate::engine::multicriteria::arrival::{ArrivalKind, McStopArrival};
use crate::path::{Path, PathLeg};
use crate::time::SecondsSinceDayStart;
use crate::traits::{AccessEgress, PatternIdx, Stop, TransitDataProvider, TripSchedule};

type Time = SecondsSinceDayStart;

/// A leg from the last stop of a journey to the destination
/// (to the origin for a reverse search).
pub struct DestinationArrival {
    /// when the leg leaves the stop, in search order
    pub departure_time: Time,
    pub arrival_time: Time,
    pub c1: i32,
    pub c2: Option<u32>,
}

/// Builds the legs of a journey from a chain of stop arrivals.
///
/// The access leg is time-shifted, so that it arrives at the first stop just in
/// time for the first boarding. The journey is always given in the real order,
/// from the origin to the destination, whatever the direction of the search.
pub struct PathMapper<'a, Data> {
    data: &'a Data,
    calculator: &'a TransitCalculator,
    access_paths: &'a [AccessEgress],
}

impl<'a, Data: TransitDataProvider> PathMapper<'a, Data> {
    pub fn new(
        data: &'a Data,
        calculator: &'a TransitCalculator,
        access_paths: &'a [AccessEgress],
    ) -> Self {
        Self {
            data,
            calculator,
            access_paths,
        }
    }

    /// `chain` goes from the last arrival to the access arrival.
    pub fn map(
        &self,
        iteration_departure_time: Time,
        chain: &[McStopArrival],
        destination: &DestinationArrival,
    ) -> Path {
        let legs = if self.calculator.is_forward() {
            self.forward_legs(chain, destination)
        } else {
            self.reverse_legs(chain, destination)
        };
        let mut stops: Vec<Stop> = chain.iter().map(|arrival| arrival.stop).collect();
        stops.sort();
        stops.dedup();
        let stop_names = stops
            .into_iter()
            .map(|stop| (stop, self.data.stop_name(stop).to_string()))
            .collect();
        Path::new(
            iteration_departure_time,
            legs,
            destination.c1,
            destination.c2,
            stop_names,
        )
    }

    fn forward_legs(
        &self,
        chain: &[McStopArrival],
        destination: &DestinationArrival,
    ) -> Vec<PathLeg> {
        let mut legs = Vec::with_capacity(chain.len() + 1);
        let mut previous: Option<&McStopArrival> = None;
        for (position, arrival) in chain.iter().enumerate().rev() {
            let leg = match (arrival.kind, previous) {
                (ArrivalKind::Access { access_idx, .. }, _) => {
                    // the next arrival in journey order follows the access leg
                    let next = position.checked_sub(1).map(|next| &chain[next]);
                    let (departure_time, arrival_time) =
                        self.shifted_access(access_idx, arrival, next);
                    PathLeg::Access {
                        to_stop: arrival.stop,
                        departure_time,
                        arrival_time,
                    }
                }
                (
                    ArrivalKind::Transit {
                        pattern,
                        trip_idx,
                        board_time,
                        alight_time,
                        ..
                    },
                    Some(from),
                ) => self.transit_leg(
                    from.stop,
                    arrival.stop,
                    pattern,
                    trip_idx,
                    (board_time, alight_time),
                ),
                (ArrivalKind::Transfer { .. }, Some(from)) => PathLeg::Transfer {
                    from_stop: from.stop,
                    to_stop: arrival.stop,
                    departure_time: from.arrival_time,
                    arrival_time: arrival.arrival_time,
                },
                (_, None) => continue,
            };
            legs.push(leg);
            previous = Some(arrival);
        }
        if let Some(last) = chain.first() {
            legs.push(PathLeg::Egress {
                from_stop: last.stop,
                departure_time: destination.departure_time,
                arrival_time: destination.arrival_time,
            });
        }
        legs
    }

    fn reverse_legs(
        &self,
        chain: &[McStopArrival],
        destination: &DestinationArrival,
    ) -> Vec<PathLeg> {
        let mut legs = Vec::with_capacity(chain.len() + 1);
        if let Some(first) = chain.first() {
            // the egress leg of a reverse search leaves the origin
            legs.push(PathLeg::Access {
                to_stop: first.stop,
                departure_time: destination.arrival_time,
                arrival_time: destination.departure_time,
            });
        }
        for (position, arrival) in chain.iter().enumerate() {
            let next = chain.get(position + 1);
            let leg = match (arrival.kind, next) {
                (ArrivalKind::Access { access_idx, .. }, _) => {
                    let previous = position.checked_sub(1).map(|previous| &chain[previous]);
                    let (departure_time, arrival_time) =
                        self.shifted_access(access_idx, arrival, previous);
                    PathLeg::Egress {
                        from_stop: arrival.stop,
                        departure_time,
                        arrival_time,
                    }
                }
                (
                    ArrivalKind::Transit {
                        pattern,
                        trip_idx,
                        board_time,
                        alight_time,
                        ..
                    },
                    Some(to),
                ) => self.transit_leg(
                    arrival.stop,
                    to.stop,
                    pattern,
                    trip_idx,
                    (alight_time, board_time),
                ),
                (ArrivalKind::Transfer { .. }, Some(to)) => PathLeg::Transfer {
                    from_stop: arrival.stop,
                    to_stop: to.stop,
                    departure_time: arrival.arrival_time,
                    arrival_time: to.arrival_time,
                },
                (_, None) => continue,
            };
            legs.push(leg);
        }
        legs
    }

    // `times` are the departure and arrival times in the real order
    fn transit_leg(
        &self,
        from_stop: Stop,
        to_stop: Stop,
        pattern: PatternIdx,
        trip_idx: usize,
        times: (Time, Time),
    ) -> PathLeg {
        let trip_name = self
            .data
            .trips(pattern)
            .get(trip_idx)
            .map(|trip| trip.name().to_string())
            .unwrap_or_default();
        PathLeg::Transit {
            from_stop,
            to_stop,
            pattern_name: self.data.pattern(pattern).name.clone(),
            trip_name,
            departure_time: times.0,
            arrival_time: times.1,
        }
    }

    /// Times of the access leg, in the real order (departure, arrival), moved
    /// as close as possible to the first boarding.
    fn shifted_access(
        &self,
        access_idx: usize,
        access_arrival: &McStopArrival,
        next: Option<&McStopArrival>,
    ) -> (Time, Time) {
        let access = &self.access_paths[access_idx];
        let stop_time = access_arrival.arrival_time;
        let target = match next.map(|arrival| arrival.kind) {
            Some(ArrivalKind::Transit { board_time, .. }) => {
                self.calculator.minus(board_time, self.calculator.board_slack())
            }
            _ => stop_time,
        };
        if self.calculator.is_forward() {
            let arrival_time = access
                .latest_arrival_time(target)
                .filter(|time| *time >= stop_time)
                .unwrap_or(stop_time);
            (arrival_time - access.duration, arrival_time)
        } else {
            let departure_time = access
                .earliest_departure_time(target)
                .filter(|time| *time <= stop_time)
                .unwrap_or(stop_time);
            (departure_time, departure_time + access.duration)
        }
    }
}
