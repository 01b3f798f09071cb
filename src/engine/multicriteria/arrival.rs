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

use crate::debug::{ArrivalMode, StopArrivalEvent};
use crate::engine::cost::{DominanceFunction, RelaxFunction};
use crate::engine::pareto_set::ParetoComparator;
use crate::request::SearchDirection;
use crate::time::{PositiveDuration, SecondsSinceDayStart};
use crate::traits::{PatternIdx, Stop};

type Time = SecondsSinceDayStart;

/// Position of an arrival in the arena of all arrivals created during a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrivalIdx {
    pub(crate) idx: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrivalKind {
    Access {
        access_idx: usize,
        /// when the access leg starts, before any time-shifting
        departure_time: Time,
    },
    Transit {
        previous: ArrivalIdx,
        pattern: PatternIdx,
        trip_idx: usize,
        board_position: usize,
        alight_position: usize,
        board_time: Time,
        alight_time: Time,
    },
    Transfer {
        previous: ArrivalIdx,
        duration: PositiveDuration,
    },
}

/// A way to reach a stop, with its criteria.
///
/// The `pareto_round` counts the legs of the journey : an access is 0,
/// a transfer adds 1, riding a trip adds 1 when boarding after a walk and 2 when
/// boarding right after another trip. Hence transit and transfer arrivals
/// of the same round do not have the same pareto round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct McStopArrival {
    pub id: ArrivalIdx,
    pub stop: Stop,
    pub pareto_round: u8,
    pub arrival_time: Time,
    pub c1: i32,
    pub c2: u32,
    pub kind: ArrivalKind,
}

impl McStopArrival {
    pub fn round(&self) -> u8 {
        (self.pareto_round + 1) / 2
    }

    pub fn nb_of_transfers(&self) -> u8 {
        self.round().saturating_sub(1)
    }

    pub fn arrived_on_board(&self) -> bool {
        matches!(self.kind, ArrivalKind::Transit { .. })
    }

    pub fn is_access(&self) -> bool {
        matches!(self.kind, ArrivalKind::Access { .. })
    }

    pub fn previous(&self) -> Option<ArrivalIdx> {
        match self.kind {
            ArrivalKind::Access { .. } => None,
            ArrivalKind::Transit { previous, .. } | ArrivalKind::Transfer { previous, .. } => {
                Some(previous)
            }
        }
    }

    /// Pareto round of an arrival that rides a trip boarded at `self`
    pub fn next_transit_pareto_round(&self) -> u8 {
        if self.arrived_on_board() {
            self.pareto_round + 2
        } else {
            self.pareto_round + 1
        }
    }

    pub fn to_event(&self) -> StopArrivalEvent {
        let mode = match self.kind {
            ArrivalKind::Access { .. } => ArrivalMode::Access,
            ArrivalKind::Transit { .. } => ArrivalMode::Transit,
            ArrivalKind::Transfer { .. } => ArrivalMode::Transfer,
        };
        StopArrivalEvent {
            stop: self.stop,
            round: self.round(),
            arrival_time: self.arrival_time,
            c1: self.c1,
            mode,
        }
    }
}

/// Dominance between two arrivals at the same stop.
///
/// An arrival is better if it is earlier (later for a reverse search), if it has
/// a lower pareto round, if it arrived on board, or if it is cheaper when c1 is included.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalComparator {
    direction: SearchDirection,
    include_c1: bool,
    relax_c1: RelaxFunction,
    dominance_c2: Option<DominanceFunction>,
}

impl ArrivalComparator {
    /// Time, number of legs and on board flag.
    pub fn standard(direction: SearchDirection) -> Self {
        Self {
            direction,
            include_c1: false,
            relax_c1: RelaxFunction::NORMAL,
            dominance_c2: None,
        }
    }

    /// Only `DominanceFunction::LessThan` is used without c1.
    pub fn with_dominance_c2(mut self, dominance_c2: Option<DominanceFunction>) -> Self {
        self.dominance_c2 = dominance_c2;
        self
    }

    pub fn multi_criteria(
        direction: SearchDirection,
        relax_c1: RelaxFunction,
        dominance_c2: Option<DominanceFunction>,
    ) -> Self {
        Self {
            direction,
            include_c1: true,
            relax_c1,
            dominance_c2,
        }
    }

    fn c1_dominance(&self, left: &McStopArrival, right: &McStopArrival) -> bool {
        match self.dominance_c2 {
            // arrivals with different transit groups compete with a relaxed c1
            Some(DominanceFunction::Different) if left.c2 != right.c2 => {
                left.c1 < self.relax_c1.relax(right.c1)
            }
            Some(DominanceFunction::Different) => left.c1 < right.c1,
            _ => left.c1 < self.relax_c1.relax(right.c1),
        }
    }
}

impl ParetoComparator<McStopArrival> for ArrivalComparator {
    fn left_dominance_exist(&self, left: &McStopArrival, right: &McStopArrival) -> bool {
        let better_time = match self.direction {
            SearchDirection::Forward => left.arrival_time < right.arrival_time,
            SearchDirection::Reverse => left.arrival_time > right.arrival_time,
        };
        if better_time || left.pareto_round < right.pareto_round {
            return true;
        }
        if self.include_c1 && self.c1_dominance(left, right) {
            return true;
        }
        if self.dominance_c2 == Some(DominanceFunction::LessThan) && left.c2 < right.c2 {
            return true;
        }
        left.arrived_on_board() && !right.arrived_on_board()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(seconds: i32) -> Time {
        Time::from_hms(0, 0, seconds)
    }

    fn transfer(arrival_time: i32, pareto_round: u8, c1: i32, c2: u32) -> McStopArrival {
        McStopArrival {
            id: ArrivalIdx { idx: 0 },
            stop: Stop::new(0),
            pareto_round,
            arrival_time: time(arrival_time),
            c1,
            c2,
            kind: ArrivalKind::Transfer {
                previous: ArrivalIdx { idx: 0 },
                duration: PositiveDuration::zero(),
            },
        }
    }

    fn transit(arrival_time: i32, pareto_round: u8, c1: i32) -> McStopArrival {
        McStopArrival {
            kind: ArrivalKind::Transit {
                previous: ArrivalIdx { idx: 0 },
                pattern: PatternIdx::new(0),
                trip_idx: 0,
                board_position: 0,
                alight_position: 1,
                board_time: time(0),
                alight_time: time(arrival_time),
            },
            ..transfer(arrival_time, pareto_round, c1, 0)
        }
    }

    #[test]
    fn rounds_from_pareto_rounds() {
        assert_eq!(transfer(0, 0, 0, 0).round(), 0);
        assert_eq!(transit(0, 1, 0).round(), 1);
        assert_eq!(transfer(0, 2, 0, 0).round(), 1);
        assert_eq!(transit(0, 3, 0).round(), 2);
        assert_eq!(transit(0, 3, 0).nb_of_transfers(), 1);
        assert_eq!(transit(0, 1, 0).next_transit_pareto_round(), 3);
        assert_eq!(transfer(0, 2, 0, 0).next_transit_pareto_round(), 3);
    }

    #[test]
    fn standard_comparator_ignores_costs() {
        let comparator = ArrivalComparator::standard(SearchDirection::Forward);
        let cheap = transit(10, 1, 100);
        let expensive = transit(10, 1, 200);
        assert!(!comparator.left_dominance_exist(&cheap, &expensive));
        assert!(!comparator.left_dominance_exist(&expensive, &cheap));

        let walked = transfer(10, 1, 100, 0);
        assert!(comparator.left_dominance_exist(&cheap, &walked));
        assert!(!comparator.left_dominance_exist(&walked, &cheap));
    }

    #[test]
    fn multi_criteria_comparator() {
        let comparator = ArrivalComparator::multi_criteria(
            SearchDirection::Forward,
            RelaxFunction::NORMAL,
            None,
        );
        let early_expensive = transit(10, 1, 200);
        let late_cheap = transit(20, 1, 100);
        assert!(comparator.left_dominance_exist(&early_expensive, &late_cheap));
        assert!(comparator.left_dominance_exist(&late_cheap, &early_expensive));

        let late_expensive = transit(20, 1, 300);
        assert!(!comparator.left_dominance_exist(&late_expensive, &late_cheap));
    }

    #[test]
    fn reverse_comparator_prefers_late_times() {
        let comparator = ArrivalComparator::standard(SearchDirection::Reverse);
        let late = transit(20, 1, 0);
        let early = transit(10, 1, 0);
        assert!(comparator.left_dominance_exist(&late, &early));
        assert!(!comparator.left_dominance_exist(&early, &late));
    }

    #[test]
    fn transit_groups_relax_c1() {
        let relax = RelaxFunction::new(1.5, 0).unwrap();
        let comparator = ArrivalComparator::multi_criteria(
            SearchDirection::Forward,
            relax,
            Some(DominanceFunction::Different),
        );
        let group_a = transfer(10, 2, 100, 0b01);
        let group_b = transfer(10, 2, 140, 0b10);
        // different groups : 140 < relax(100)
        assert!(comparator.left_dominance_exist(&group_b, &group_a));
        let same_group = transfer(10, 2, 140, 0b01);
        assert!(!comparator.left_dominance_exist(&same_group, &group_a));
    }

    #[test]
    fn c2_penalty() {
        let comparator = ArrivalComparator::multi_criteria(
            SearchDirection::Forward,
            RelaxFunction::NORMAL,
            Some(DominanceFunction::LessThan),
        );
        let penalized = transfer(10, 2, 100, 3);
        let preferred = transfer(10, 2, 100, 1);
        assert!(comparator.left_dominance_exist(&preferred, &penalized));
        assert!(!comparator.left_dominance_exist(&penalized, &preferred));
    }
}
