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
use crate::time::SecondsSinceDayStart;
use crate::traits::Stop;

/// Best arrival time and smallest number of transfers found for each stop
/// by a search, whatever the journey that reached it.
#[derive(Debug, Clone)]
pub struct StopArrivals {
    best_times: Vec<SecondsSinceDayStart>,
    min_nb_of_transfers: Vec<Option<u8>>,
}

impl StopArrivals {
    pub(crate) fn new(nb_of_stops: usize, unreached_time: SecondsSinceDayStart) -> Self {
        Self {
            best_times: vec![unreached_time; nb_of_stops],
            min_nb_of_transfers: vec![None; nb_of_stops],
        }
    }

    pub(crate) fn update(
        &mut self,
        stop: Stop,
        time: SecondsSinceDayStart,
        nb_of_transfers: u8,
        calculator: &TransitCalculator,
    ) {
        let best_time = &mut self.best_times[stop.idx];
        if calculator.is_before(time, *best_time) {
            *best_time = time;
        }
        let min_nb_of_transfers = &mut self.min_nb_of_transfers[stop.idx];
        match min_nb_of_transfers {
            Some(current) if *current <= nb_of_transfers => (),
            _ => *min_nb_of_transfers = Some(nb_of_transfers),
        }
    }

    pub fn nb_of_stops(&self) -> usize {
        self.best_times.len()
    }

    pub fn reached(&self, stop: Stop) -> bool {
        self.min_nb_of_transfers
            .get(stop.idx)
            .map_or(false, |transfers| transfers.is_some())
    }

    pub fn best_time(&self, stop: Stop) -> Option<SecondsSinceDayStart> {
        if self.reached(stop) {
            Some(self.best_times[stop.idx])
        } else {
            None
        }
    }

    pub fn min_nb_of_transfers(&self, stop: Stop) -> Option<u8> {
        self.min_nb_of_transfers.get(stop.idx).copied().flatten()
    }

    pub fn nb_of_reached_stops(&self) -> usize {
        self.min_nb_of_transfers
            .iter()
            .filter(|transfers| transfers.is_some())
            .count()
    }
}
