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

use crate::engine::cost::DominanceFunction;
use crate::engine::multicriteria::arrival::ArrivalIdx;
use crate::engine::pareto_set::ParetoComparator;
use crate::time::SecondsSinceDayStart;

/// A trip boarded while routing a pattern, waiting to be alighted at
/// the next stops of the pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternRide {
    pub boarded_from: ArrivalIdx,
    pub pareto_round: u8,
    pub board_position: usize,
    pub board_time: SecondsSinceDayStart,
    pub board_c1: i32,
    /// c1 at boarding minus the cost of riding the trip from the start of the day.
    /// Two rides of the same trip can be compared with it, whatever their boarding stop.
    pub relative_c1: i64,
    pub trip_idx: usize,
    pub trip_sort_index: usize,
    pub c2: u32,
}

impl PatternRide {
    pub fn relative_cost(
        board_c1: i32,
        board_time: SecondsSinceDayStart,
        transit_factor: f64,
        time_sign: f64,
    ) -> i64 {
        let seconds = f64::from(board_time.total_seconds());
        let ride_cost = (time_sign * transit_factor * seconds * 100.0).round() as i64;
        i64::from(board_c1) - ride_cost
    }
}

/// Rides of different trips never dominate each other.
#[derive(Debug, Clone, Copy)]
pub struct PatternRideComparator {
    dominance_c2: Option<DominanceFunction>,
}

impl PatternRideComparator {
    pub fn new(dominance_c2: Option<DominanceFunction>) -> Self {
        Self { dominance_c2 }
    }
}

impl ParetoComparator<PatternRide> for PatternRideComparator {
    fn left_dominance_exist(&self, left: &PatternRide, right: &PatternRide) -> bool {
        if left.trip_sort_index != right.trip_sort_index || left.relative_c1 < right.relative_c1 {
            return true;
        }
        match self.dominance_c2 {
            Some(dominance) => dominance.left_dominate_right(left.c2, right.c2),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::pareto_set::ParetoSet;

    fn ride(trip_sort_index: usize, board_seconds: i32, board_c1: i32) -> PatternRide {
        let board_time = SecondsSinceDayStart::from_hms(0, 0, board_seconds);
        PatternRide {
            boarded_from: ArrivalIdx { idx: 0 },
            pareto_round: 1,
            board_position: 0,
            board_time,
            board_c1,
            relative_c1: PatternRide::relative_cost(board_c1, board_time, 1.0, 1.0),
            trip_idx: trip_sort_index,
            trip_sort_index,
            c2: 0,
        }
    }

    #[test]
    fn rides_of_the_same_trip_compare_relative_costs() {
        let mut rides = ParetoSet::new(PatternRideComparator::new(None));
        // boarded at the first stop at 0:00:00
        assert!(rides.add(ride(0, 0, 1000)));
        // boarded at the second stop 60s later, a cost of 6000 is equivalent
        assert!(!rides.add(ride(0, 60, 7000)));
        assert!(rides.add(ride(0, 60, 6500)));
        assert_eq!(rides.len(), 1);
        // another trip is always kept
        assert!(rides.add(ride(1, 60, 100_000)));
        assert_eq!(rides.len(), 2);
    }

    #[test]
    fn reverse_relative_cost() {
        let board_time = SecondsSinceDayStart::from_hms(0, 1, 0);
        assert_eq!(PatternRide::relative_cost(100, board_time, 1.0, -1.0), 6100);
        assert_eq!(PatternRide::relative_cost(100, board_time, 0.5, 1.0), -2900);
    }
}
