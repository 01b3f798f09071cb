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
use crate::engine::heuristics::Heuristics;
use crate::time::SecondsSinceDayStart;
use crate::traits::Stop;

/// Rejects the arrivals of the main search that cannot lead to the destination
/// in time, using a heuristic computed in the opposite direction.
#[derive(Debug, Clone)]
pub struct DestinationPruning {
    // best times of the opposite heuristic : the latest time at which a stop can be
    // left to reach the destination (for a forward main search)
    bounds: Vec<Option<SecondsSinceDayStart>>,
    // smallest number of trips from the stop to the destination
    rounds_to_destination: Vec<Option<u8>>,
    max_nb_of_transfers: u8,
}

impl DestinationPruning {
    pub fn new(
        opposite_heuristics: &Heuristics,
        nb_of_stops: usize,
        max_nb_of_transfers: u8,
    ) -> Self {
        let stops = (0..nb_of_stops).map(Stop::new);
        Self {
            bounds: stops
                .clone()
                .map(|stop| opposite_heuristics.best_time(stop))
                .collect(),
            rounds_to_destination: stops
                .map(|stop| opposite_heuristics.min_nb_of_rounds(stop))
                .collect(),
            max_nb_of_transfers,
        }
    }

    /// True if an arrival at `stop` during `round` at `time` cannot be part
    /// of a journey to the destination
    pub fn reject(
        &self,
        stop: Stop,
        round: u8,
        time: SecondsSinceDayStart,
        calculator: &TransitCalculator,
    ) -> bool {
        let (bound, rounds_to_destination) = match (
            self.bounds[stop.idx],
            self.rounds_to_destination[stop.idx],
        ) {
            (Some(bound), Some(rounds)) => (bound, rounds),
            _ => return true,
        };
        let min_nb_of_trips = i32::from(round) + i32::from(rounds_to_destination);
        if min_nb_of_trips - 1 > i32::from(self.max_nb_of_transfers) {
            return true;
        }
        calculator.is_before(bound, time)
    }
}
