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

//! A fast single-criterion search, used to compute heuristics.
//!
//! Each stop only keeps its best time, over all rounds. When boarding,
//! the best time of the stop is used even if it was found during the
//! current round : the search is a relaxation of a real raptor search,
//! so its times are optimistic and its number of rounds are lower bounds.

use crate::engine::calculator::TransitCalculator;
use crate::engine::heuristics::Heuristics;
use crate::engine::pareto_set::ParetoSet;
use crate::engine::worker::RoutingStrategy;
use crate::path::{Path, PathComparator};
use crate::time::SecondsSinceDayStart;
use crate::traits::{AccessEgress, PatternIdx, Stop, TransitDataProvider};

type Time = SecondsSinceDayStart;

const UNREACHED_ROUND: u8 = u8::MAX;

pub struct BestTimesStrategy<'data, Data> {
    data: &'data Data,
    calculator: TransitCalculator,
    access_paths: Vec<AccessEgress>,
    egress_by_stop: Vec<Vec<AccessEgress>>,

    best_times: Vec<Time>,
    best_transit_times: Vec<Time>,
    min_rounds: Vec<u8>,

    stop_touched_current_round: Vec<bool>,
    stops_touched_current_round: Vec<Stop>,
    stop_touched_previous_round: Vec<bool>,
    stops_touched_previous_round: Vec<Stop>,

    iteration_departure_time: Time,
    round: u8,

    destination_time: Time,
    destination_min_nb_of_transfers: Option<u8>,
    destination_paths: ParetoSet<Path, PathComparator>,
}

impl<'data, Data: TransitDataProvider> BestTimesStrategy<'data, Data> {
    pub fn new(
        data: &'data Data,
        calculator: TransitCalculator,
        access_paths: &[AccessEgress],
        egress_paths: &[AccessEgress],
    ) -> Self {
        let nb_of_stops = data.nb_of_stops();
        let mut egress_by_stop = vec![Vec::new(); nb_of_stops];
        for egress in egress_paths {
            egress_by_stop[egress.stop.idx].push(egress.clone());
        }
        let unreached = calculator.unreached_time();
        let direction = calculator.direction();
        Self {
            data,
            access_paths: access_paths.to_vec(),
            egress_by_stop,
            best_times: vec![unreached; nb_of_stops],
            best_transit_times: vec![unreached; nb_of_stops],
            min_rounds: vec![UNREACHED_ROUND; nb_of_stops],
            stop_touched_current_round: vec![false; nb_of_stops],
            stops_touched_current_round: Vec::new(),
            stop_touched_previous_round: vec![false; nb_of_stops],
            stops_touched_previous_round: Vec::new(),
            iteration_departure_time: Time::zero(),
            round: 0,
            destination_time: unreached,
            destination_min_nb_of_transfers: None,
            destination_paths: ParetoSet::new(PathComparator::standard(direction)),
            calculator,
        }
    }

    fn touch(&mut self, stop: Stop) {
        let flag = &mut self.stop_touched_current_round[stop.idx];
        if !*flag {
            *flag = true;
            self.stops_touched_current_round.push(stop);
        }
        let min_round = &mut self.min_rounds[stop.idx];
        if self.round < *min_round {
            *min_round = self.round;
        }
    }

    // returns true if the stop time improved
    fn update_best_time(&mut self, stop: Stop, time: Time) -> bool {
        if self.calculator.is_before(time, self.best_times[stop.idx]) {
            self.best_times[stop.idx] = time;
            self.touch(stop);
            true
        } else {
            false
        }
    }

    fn transit_arrival(&mut self, stop: Stop, time: Time) {
        if !self
            .calculator
            .is_before(time, self.best_transit_times[stop.idx])
        {
            return;
        }
        self.best_transit_times[stop.idx] = time;
        if !self.update_best_time(stop, time) {
            // transfers start from transit arrivals
            self.touch(stop);
        }
        self.arrive_at_destination(stop, time);
    }

    fn arrive_at_destination(&mut self, stop: Stop, stop_time: Time) {
        let nb_of_transfers = self.round.saturating_sub(1);
        for egress in self.egress_by_stop[stop.idx].iter() {
            let end_time = match self.calculator.egress_times(egress, stop_time) {
                Some((_, end_time)) => end_time,
                None => continue,
            };
            if self.calculator.is_before(end_time, self.destination_time) {
                self.destination_time = end_time;
            }
            self.destination_min_nb_of_transfers = Some(
                self.destination_min_nb_of_transfers
                    .map_or(nb_of_transfers, |current| current.min(nb_of_transfers)),
            );
            let (start_time, end_time) = if self.calculator.is_forward() {
                (self.iteration_departure_time, end_time)
            } else {
                (end_time, self.iteration_departure_time)
            };
            self.destination_paths.add(Path::unknown(
                self.iteration_departure_time,
                start_time,
                end_time,
                nb_of_transfers,
            ));
        }
    }

    pub fn into_heuristics(self) -> Heuristics {
        let destination_time = if self.destination_time.is_unreached() {
            None
        } else {
            Some(self.destination_time)
        };
        Heuristics::new(
            self.calculator.direction(),
            self.iteration_departure_time,
            self.best_times,
            self.min_rounds,
            destination_time,
            self.destination_min_nb_of_transfers,
            self.destination_paths.into_vec(),
        )
    }
}

impl<'data, Data: TransitDataProvider> RoutingStrategy for BestTimesStrategy<'data, Data> {
    fn setup_iteration(&mut self, iteration_departure_time: Time) {
        self.iteration_departure_time = iteration_departure_time;
        self.round = 0;
        for stop in self.stops_touched_current_round.drain(..) {
            self.stop_touched_current_round[stop.idx] = false;
        }
        for stop in self.stops_touched_previous_round.drain(..) {
            self.stop_touched_previous_round[stop.idx] = false;
        }
    }

    fn add_access_arrivals(&mut self) {
        for idx in 0..self.access_paths.len() {
            let access = &self.access_paths[idx];
            let stop = access.stop;
            if let Some((_, arrival_time)) = self
                .calculator
                .access_times(access, self.iteration_departure_time)
            {
                self.update_best_time(stop, arrival_time);
            }
        }
    }

    fn is_new_round_available(&self) -> bool {
        !self.stops_touched_current_round.is_empty()
    }

    fn prepare_for_next_round(&mut self, round: u8) {
        self.round = round;
        for stop in self.stops_touched_previous_round.drain(..) {
            self.stop_touched_previous_round[stop.idx] = false;
        }
        for stop in self.stops_touched_current_round.drain(..) {
            self.stop_touched_current_round[stop.idx] = false;
            self.stop_touched_previous_round[stop.idx] = true;
            self.stops_touched_previous_round.push(stop);
        }
    }

    fn stops_touched_previous_round(&self) -> &[Stop] {
        &self.stops_touched_previous_round
    }

    fn route_pattern(&mut self, pattern_idx: PatternIdx) {
        let data = self.data;
        let pattern = data.pattern(pattern_idx);
        let trips = data.trips(pattern_idx);
        let first_boarding = self.round == 1;
        let mut on_board: Option<usize> = None;

        for position in self.calculator.stop_positions(pattern.nb_of_positions()) {
            let stop = pattern.stop_at(position);
            if let Some(trip_idx) = on_board {
                if self.calculator.alighting_possible(pattern, position) {
                    let alight_time = self.calculator.alight_time(&trips[trip_idx], position);
                    let arrival_time = self.calculator.stop_arrival_time(alight_time);
                    self.transit_arrival(stop, arrival_time);
                }
            }
            if self.stop_touched_previous_round[stop.idx]
                && self.calculator.boarding_possible(pattern, position)
            {
                let earliest_board_time = self
                    .calculator
                    .earliest_board_time(self.best_times[stop.idx], first_boarding);
                if let Some((trip_idx, _)) =
                    self.calculator
                        .find_trip(trips, position, earliest_board_time, on_board)
                {
                    on_board = Some(trip_idx);
                }
            }
        }
    }

    fn transits_for_round_complete(&mut self) {}

    fn transfer_to_stops(&mut self) {
        let data = self.data;
        let transit_stops: Vec<Stop> = self.stops_touched_current_round.clone();
        for stop in transit_stops {
            let departure_time = self.best_transit_times[stop.idx];
            if departure_time.is_unreached() {
                continue;
            }
            let transfers = if self.calculator.is_forward() {
                data.transfers_from(stop)
            } else {
                data.transfers_to(stop)
            };
            for transfer in transfers {
                if transfer.stop == stop {
                    continue;
                }
                let arrival_time = self.calculator.plus(departure_time, transfer.duration);
                self.update_best_time(transfer.stop, arrival_time);
            }
        }
    }

    fn transfers_for_round_complete(&mut self) {}
}
