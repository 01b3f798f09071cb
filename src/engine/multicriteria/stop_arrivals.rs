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

use crate::debug::{ArrivalAction, SearchEventListener};
use crate::engine::calculator::TransitCalculator;
use crate::engine::multicriteria::arrival::{ArrivalComparator, ArrivalIdx, McStopArrival};
use crate::engine::pareto_set::{ParetoSetEventListener, ParetoSetWithMarker};
use crate::engine::summary::StopArrivals;
use crate::traits::Stop;

impl ArrivalIdx {
    /// Id of an arrival that is not stored yet
    pub(crate) const UNASSIGNED: ArrivalIdx = ArrivalIdx { idx: usize::MAX };
}

// keeps track of the arrivals dropped from a stop
#[derive(Debug, Default)]
struct DroppedArrivals {
    dropped: Vec<McStopArrival>,
}

impl ParetoSetEventListener<McStopArrival> for DroppedArrivals {
    fn dropped(&mut self, element: &McStopArrival, _dropped_by: &McStopArrival) {
        self.dropped.push(*element);
    }
}

type StopSet = ParetoSetWithMarker<McStopArrival, ArrivalComparator, DroppedArrivals>;

/// The pareto sets of arrivals of every stop, and the arena that stores all
/// arrivals, so that journeys can be rebuilt by following `previous` links.
///
/// New arrivals are first cached, and only committed at the end of a phase
/// (after all patterns are routed, after all transfers are done),
/// so that an arrival is never used in the same round it was created.
pub struct McStopArrivals {
    arena: Vec<McStopArrival>,
    stops: Vec<StopSet>,
    pending: Vec<McStopArrival>,

    stop_touched_current_round: Vec<bool>,
    stops_touched_current_round: Vec<Stop>,
    stops_touched_previous_round: Vec<Stop>,

    event_listener: Option<Arc<dyn SearchEventListener>>,
}

impl McStopArrivals {
    pub fn new(
        nb_of_stops: usize,
        comparator: ArrivalComparator,
        event_listener: Option<Arc<dyn SearchEventListener>>,
    ) -> Self {
        let stops = (0..nb_of_stops)
            .map(|_| StopSet::with_listener(comparator, DroppedArrivals::default()))
            .collect();
        Self {
            arena: Vec::new(),
            stops,
            pending: Vec::new(),
            stop_touched_current_round: vec![false; nb_of_stops],
            stops_touched_current_round: Vec::new(),
            stops_touched_previous_round: Vec::new(),
            event_listener,
        }
    }

    /// Arrivals of previous iterations are kept, but will not be explored again.
    pub fn setup_iteration(&mut self) {
        for set in self.stops.iter_mut() {
            set.mark_at_end();
        }
        self.pending.clear();
        self.clear_touched_current_round();
        self.stops_touched_previous_round.clear();
    }

    pub fn prepare_for_next_round(&mut self) {
        self.stops_touched_previous_round.clear();
        self.stops_touched_previous_round
            .append(&mut self.stops_touched_current_round);
        for stop in self.stops_touched_previous_round.iter() {
            self.stop_touched_current_round[stop.idx] = false;
        }
    }

    fn clear_touched_current_round(&mut self) {
        for stop in self.stops_touched_current_round.drain(..) {
            self.stop_touched_current_round[stop.idx] = false;
        }
    }

    pub fn is_new_round_available(&self) -> bool {
        !self.stops_touched_current_round.is_empty()
    }

    pub fn stops_touched_previous_round(&self) -> &[Stop] {
        &self.stops_touched_previous_round
    }

    pub fn stops_touched_current_round(&self) -> &[Stop] {
        &self.stops_touched_current_round
    }

    /// Arrivals at `stop` that were accepted during the previous phase
    pub fn arrivals_after_marker(&self, stop: Stop) -> impl Iterator<Item = &McStopArrival> {
        self.stops[stop.idx].iter_after_marker()
    }

    pub fn arrivals(&self, stop: Stop) -> impl Iterator<Item = &McStopArrival> {
        self.stops[stop.idx].iter()
    }

    pub fn get(&self, id: ArrivalIdx) -> &McStopArrival {
        &self.arena[id.idx]
    }

    /// The arrivals that lead to `last`, from `last` to the access arrival.
    pub fn chain(&self, last: &McStopArrival) -> Vec<McStopArrival> {
        let mut chain = vec![*last];
        let mut current = last.previous();
        while let Some(id) = current {
            let arrival = self.get(id);
            chain.push(*arrival);
            current = arrival.previous();
        }
        chain
    }

    /// Stores `arrival`, it will be added to its stop by the next commit.
    pub fn cache(&mut self, arrival: McStopArrival) {
        self.pending.push(arrival);
    }

    pub fn notify_pruned(&self, arrival: &McStopArrival) {
        if let Some(listener) = &self.event_listener {
            listener.stop_arrival(&arrival.to_event(), ArrivalAction::Pruned);
        }
    }

    /// Commits the arrivals created by riding trips. The arrivals of the previous
    /// round become invisible to `arrivals_after_marker()`.
    ///
    /// Returns the accepted arrivals.
    pub fn commit_transits(&mut self) -> Vec<McStopArrival> {
        for stop in self.stops_touched_previous_round.iter() {
            self.stops[stop.idx].mark_at_end();
        }
        self.commit()
    }

    /// Commits the arrivals of the access legs or of the transfers.
    pub fn commit(&mut self) -> Vec<McStopArrival> {
        let pending = std::mem::take(&mut self.pending);
        let mut accepted = Vec::new();
        for mut arrival in pending.into_iter() {
            let id = ArrivalIdx {
                idx: self.arena.len(),
            };
            arrival.id = id;
            self.arena.push(arrival);
            let stop_set = &mut self.stops[arrival.stop.idx];
            let is_accepted = stop_set.add(arrival);
            let dropped = std::mem::take(&mut stop_set.listener_mut().dropped);
            if let Some(listener) = &self.event_listener {
                for element in dropped.iter() {
                    listener.stop_arrival(&element.to_event(), ArrivalAction::Dropped);
                }
                let action = if is_accepted {
                    ArrivalAction::Accepted
                } else {
                    ArrivalAction::Rejected
                };
                listener.stop_arrival(&arrival.to_event(), action);
            }
            if is_accepted {
                if !self.stop_touched_current_round[arrival.stop.idx] {
                    self.stop_touched_current_round[arrival.stop.idx] = true;
                    self.stops_touched_current_round.push(arrival.stop);
                }
                accepted.push(arrival);
            } else {
                // nothing can refer to an arrival that was just rejected
                self.arena.pop();
            }
        }
        accepted
    }

    pub fn summary(&self, calculator: &TransitCalculator) -> StopArrivals {
        let mut summary = StopArrivals::new(self.stops.len(), calculator.unreached_time());
        for (idx, set) in self.stops.iter().enumerate() {
            let stop = Stop::new(idx);
            for arrival in set.iter() {
                summary.update(stop, arrival.arrival_time, arrival.nb_of_transfers(), calculator);
            }
        }
        summary
    }
}
