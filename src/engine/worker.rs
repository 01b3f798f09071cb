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

use std::sync::Arc;

use tracing::trace;

use crate::debug::SearchEventListener;
use crate::request::AbortHandle;
use crate::time::SecondsSinceDayStart;
use crate::traits::{PatternIdx, Stop, TransitDataProvider};

/// What is computed at each step of a range raptor search.
///
/// The worker drives the rounds and decides which patterns must be routed,
/// the strategy owns the state (best times, pareto sets of arrivals, ...).
pub trait RoutingStrategy {
    /// Called before each iteration, the state of the previous iterations is kept.
    fn setup_iteration(&mut self, iteration_departure_time: SecondsSinceDayStart);

    /// Arrivals of round 0
    fn add_access_arrivals(&mut self);

    fn is_new_round_available(&self) -> bool;

    fn prepare_for_next_round(&mut self, round: u8);

    /// Stops reached during the previous round, the patterns going
    /// through them will be routed during the current round.
    fn stops_touched_previous_round(&self) -> &[Stop];

    fn route_pattern(&mut self, pattern: PatternIdx);

    fn transits_for_round_complete(&mut self);

    fn transfer_to_stops(&mut self);

    fn transfers_for_round_complete(&mut self);

    fn iteration_complete(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerOutcome {
    Completed,
    Aborted,
}

pub struct RangeRaptorWorker<'data, Data, Strategy> {
    data: &'data Data,
    strategy: Strategy,
    max_nb_of_rounds: u8,
    abort_handle: AbortHandle,
    event_listener: Option<Arc<dyn SearchEventListener>>,

    pattern_has_new_arrival: Vec<bool>,
    patterns_with_new_arrival: Vec<PatternIdx>,
}

impl<'data, Data, Strategy> RangeRaptorWorker<'data, Data, Strategy>
where
    Data: TransitDataProvider,
    Strategy: RoutingStrategy,
{
    pub fn new(
        data: &'data Data,
        strategy: Strategy,
        max_nb_of_rounds: u8,
        abort_handle: AbortHandle,
        event_listener: Option<Arc<dyn SearchEventListener>>,
    ) -> Self {
        Self {
            data,
            strategy,
            max_nb_of_rounds,
            abort_handle,
            event_listener,
            pattern_has_new_arrival: vec![false; data.nb_of_patterns()],
            patterns_with_new_arrival: Vec::new(),
        }
    }

    /// Runs one iteration per departure time, in the given order.
    ///
    /// The abort handle is checked before each iteration and before each round.
    pub fn route(&mut self, iteration_departure_times: &[SecondsSinceDayStart]) -> WorkerOutcome {
        for (idx, departure_time) in iteration_departure_times.iter().enumerate() {
            let iteration = idx + 1;
            if self.abort_handle.is_aborted() {
                trace!("Search aborted before iteration {}", iteration);
                return WorkerOutcome::Aborted;
            }
            if let Some(listener) = &self.event_listener {
                listener.iteration_start(iteration, *departure_time);
            }
            self.strategy.setup_iteration(*departure_time);
            self.strategy.add_access_arrivals();

            let mut round = 0;
            while round < self.max_nb_of_rounds && self.strategy.is_new_round_available() {
                if self.abort_handle.is_aborted() {
                    trace!(
                        "Search aborted at iteration {} before round {}",
                        iteration,
                        round + 1
                    );
                    return WorkerOutcome::Aborted;
                }
                round += 1;
                self.strategy.prepare_for_next_round(round);

                self.identify_patterns_with_new_arrival();
                for pattern in self.patterns_with_new_arrival.drain(..) {
                    self.pattern_has_new_arrival[pattern.idx] = false;
                    self.strategy.route_pattern(pattern);
                }
                self.strategy.transits_for_round_complete();

                self.strategy.transfer_to_stops();
                self.strategy.transfers_for_round_complete();

                if let Some(listener) = &self.event_listener {
                    listener.round_complete(iteration, round);
                }
            }
            self.strategy.iteration_complete();
        }
        WorkerOutcome::Completed
    }

    fn identify_patterns_with_new_arrival(&mut self) {
        debug_assert!(self.patterns_with_new_arrival.is_empty());
        for stop in self.strategy.stops_touched_previous_round() {
            for pattern in self.data.patterns_at(*stop) {
                let has_new_arrival = &mut self.pattern_has_new_arrival[pattern.idx];
                if !*has_new_arrival {
                    *has_new_arrival = true;
                    self.patterns_with_new_arrival.push(*pattern);
                }
            }
        }
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn into_strategy(self) -> Strategy {
        self.strategy
    }
}
