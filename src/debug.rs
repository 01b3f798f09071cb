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

//! Hooks to observe a running search.
//!
//! Listeners never change the result of a search.

use crate::engine::cost::C1Display;
use crate::path::Path;
use crate::time::SecondsSinceDayStart;
use crate::traits::Stop;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalMode {
    Access,
    Transit,
    Transfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalAction {
    Accepted,
    Rejected,
    Dropped,
    Pruned,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopArrivalEvent {
    pub stop: Stop,
    pub round: u8,
    pub arrival_time: SecondsSinceDayStart,
    pub c1: i32,
    pub mode: ArrivalMode,
}

pub trait SearchEventListener: Send + Sync {
    /// `iteration` starts at 1
    fn iteration_start(&self, _iteration: usize, _departure_time: SecondsSinceDayStart) {}

    fn round_complete(&self, _iteration: usize, _round: u8) {}

    fn stop_arrival(&self, _event: &StopArrivalEvent, _action: ArrivalAction) {}

    fn path(&self, _path: &Path, _accepted: bool) {}
}

/// Logs every event with `tracing`, at the trace level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventListener;

impl SearchEventListener for TracingEventListener {
    fn iteration_start(&self, iteration: usize, departure_time: SecondsSinceDayStart) {
        trace!("Iteration {} starts at {}", iteration, departure_time);
    }

    fn round_complete(&self, iteration: usize, round: u8) {
        trace!("Iteration {} : round {} complete", iteration, round);
    }

    fn stop_arrival(&self, event: &StopArrivalEvent, action: ArrivalAction) {
        trace!(
            "{:?} {:?} arrival at stop {} : round {}, time {}, {}",
            action,
            event.mode,
            event.stop.idx(),
            event.round,
            event.arrival_time,
            C1Display(event.c1)
        );
    }

    fn path(&self, path: &Path, accepted: bool) {
        let action = if accepted { "Accepted" } else { "Rejected" };
        trace!("{} path {}", action, path);
    }
}
