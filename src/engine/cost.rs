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

//! Generalized cost of a journey.
//!
//! Costs are integers expressed in "cents" : one second of travel with
//! a reluctance of 1.0 costs 100.

use crate::config::CostParams;
use crate::time::PositiveDuration;
use crate::traits::TripSchedule;
use crate::BadRequest;
use std::fmt::{Display, Formatter};
use thousands::{digits, Separable, SeparatorPolicy};

pub const ZERO_COST: i32 = 0;

const UNDERSCORE_SEPARATOR: SeparatorPolicy<'static> = SeparatorPolicy {
    separator: "_",
    groups: &[3],
    digits: digits::ASCII_DECIMAL,
};

/// Converts a number of (weighted) seconds into cents.
pub fn to_cost(seconds: f64) -> i32 {
    (seconds * 100.0).round() as i32
}

pub fn duration_to_cost(duration: PositiveDuration, reluctance: f64) -> i32 {
    to_cost(f64::from(duration.total_seconds()) * reluctance)
}

/// Displays a generalized cost in seconds, rounded, with `_` as thousand separator,
/// i.e. `C₁8_154` for a cost of 815_420 cents.
pub struct C1Display(pub i32);

impl Display for C1Display {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let seconds = (i64::from(self.0) + 50).div_euclid(100);
        write!(f, "C₁{}", seconds.separate_by_policy(UNDERSCORE_SEPARATOR))
    }
}

/// Computes the generalized cost of each step of a journey.
///
/// All functions return non negative costs, and are pure.
pub trait CostCalculator {
    /// Cost added when boarding a trip.
    ///
    /// `wait` is the time between the arrival at the boarding stop and the boarding,
    /// it is ignored for the first boarding, since the access leg is time-shifted
    /// to arrive just in time.
    fn boarding_cost<Trip: TripSchedule>(
        &self,
        first_boarding: bool,
        wait: PositiveDuration,
        board_stop_cost: Option<i32>,
        trip: &Trip,
    ) -> i32;

    /// Cost of riding `trip` during `ride_duration`, then alighting at a stop.
    fn transit_arrival_cost<Trip: TripSchedule>(
        &self,
        ride_duration: PositiveDuration,
        alight_slack: PositiveDuration,
        alight_stop_cost: Option<i32>,
        trip: &Trip,
    ) -> i32;

    /// Cost of one second on board `trip`, in cents.
    fn transit_factor<Trip: TripSchedule>(&self, trip: &Trip) -> f64;

    fn wait_cost(&self, wait: PositiveDuration) -> i32;

    /// Cost of the egress leg, `wait` being the time spent waiting
    /// for the egress leg to open.
    fn egress_cost(&self, egress_c1: i32, wait: PositiveDuration) -> i32 {
        egress_c1 + self.wait_cost(wait)
    }

    /// A lower bound of the cost of any journey lasting at least `min_travel_duration`
    /// with at least `min_nb_of_transfers` transfers.
    fn min_cost(&self, min_travel_duration: PositiveDuration, min_nb_of_transfers: u8) -> i32;
}

#[derive(Debug, Clone)]
pub struct DefaultCostCalculator {
    board_cost: i32,
    board_and_transfer_cost: i32,
    wait_reluctance: f64,
    transit_reluctances: Vec<f64>,
    min_transit_reluctance: f64,
}

impl DefaultCostCalculator {
    pub fn new(params: &CostParams) -> Self {
        let board_cost = duration_to_cost(params.board_cost, 1.0);
        let transfer_cost = duration_to_cost(params.transfer_cost, 1.0);
        let transit_reluctances = if params.transit_reluctances.is_empty() {
            vec![1.0]
        } else {
            params.transit_reluctances.clone()
        };
        let min_transit_reluctance = transit_reluctances
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min)
            .min(params.wait_reluctance);
        Self {
            board_cost,
            board_and_transfer_cost: board_cost + transfer_cost,
            wait_reluctance: params.wait_reluctance,
            transit_reluctances,
            min_transit_reluctance,
        }
    }
}

impl CostCalculator for DefaultCostCalculator {
    fn boarding_cost<Trip: TripSchedule>(
        &self,
        first_boarding: bool,
        wait: PositiveDuration,
        board_stop_cost: Option<i32>,
        _trip: &Trip,
    ) -> i32 {
        let cost = if first_boarding {
            self.board_cost
        } else {
            self.board_and_transfer_cost + self.wait_cost(wait)
        };
        cost + board_stop_cost.unwrap_or(ZERO_COST)
    }

    fn transit_arrival_cost<Trip: TripSchedule>(
        &self,
        ride_duration: PositiveDuration,
        alight_slack: PositiveDuration,
        alight_stop_cost: Option<i32>,
        trip: &Trip,
    ) -> i32 {
        duration_to_cost(ride_duration, self.transit_factor(trip))
            + self.wait_cost(alight_slack)
            + alight_stop_cost.unwrap_or(ZERO_COST)
    }

    fn transit_factor<Trip: TripSchedule>(&self, trip: &Trip) -> f64 {
        // an unknown index falls back on the first reluctance
        self.transit_reluctances
            .get(trip.transit_reluctance_index())
            .copied()
            .unwrap_or(self.transit_reluctances[0])
    }

    fn wait_cost(&self, wait: PositiveDuration) -> i32 {
        duration_to_cost(wait, self.wait_reluctance)
    }

    fn min_cost(&self, min_travel_duration: PositiveDuration, min_nb_of_transfers: u8) -> i32 {
        self.board_cost
            + i32::from(min_nb_of_transfers) * self.board_and_transfer_cost
            + duration_to_cost(min_travel_duration, self.min_transit_reluctance)
    }
}

/// Makes a cost look worse, so that slightly more expensive alternatives
/// are kept in a pareto set : `relax(cost) = round(cost * ratio) + slack`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelaxFunction {
    ratio: f64,
    slack: i32,
}

const MIN_RATIO: f64 = 1.0;
const MAX_RATIO: f64 = 4.0;

impl RelaxFunction {
    /// Does not relax anything.
    pub const NORMAL: RelaxFunction = RelaxFunction {
        ratio: 1.0,
        slack: 0,
    };

    /// `ratio` must belong to [1.0, 4.0] and `slack` must be non negative.
    pub fn new(ratio: f64, slack: i32) -> Result<Self, BadRequest> {
        if !(MIN_RATIO..=MAX_RATIO).contains(&ratio) || slack < 0 {
            return Err(BadRequest::InvalidRelaxFunction { ratio, slack });
        }
        Ok(Self { ratio, slack })
    }

    pub fn additive(slack: i32) -> Result<Self, BadRequest> {
        Self::new(1.0, slack)
    }

    pub fn relax(&self, cost: i32) -> i32 {
        if self.is_normal() {
            return cost;
        }
        (f64::from(cost) * self.ratio).round() as i32 + self.slack
    }

    pub fn is_normal(&self) -> bool {
        self.ratio == 1.0 && self.slack == 0
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn slack(&self) -> i32 {
        self.slack
    }
}

impl Default for RelaxFunction {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl Display for RelaxFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_normal() {
            write!(f, "NORMAL")
        } else {
            write!(f, "f(x) = {:.2} * x + {}", self.ratio, C1Display(self.slack))
        }
    }
}

/// How the second criterion (c2) of two arrivals compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DominanceFunction {
    /// c2 is a set of transit priority groups : two arrivals that used different
    /// groups are compared with a relaxed c1.
    Different,
    /// c2 is a penalty : the lower the better.
    LessThan,
}

impl DominanceFunction {
    pub fn left_dominate_right(&self, left: u32, right: u32) -> bool {
        match self {
            DominanceFunction::Different => left != right,
            DominanceFunction::LessThan => left < right,
        }
    }

    /// The c2 after riding a trip of the given `priority_group`
    pub fn merge(&self, c2: u32, priority_group: u32) -> u32 {
        match self {
            DominanceFunction::Different => c2 | priority_group,
            DominanceFunction::LessThan => c2.saturating_add(priority_group),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug)]
    struct TestTrip {
        reluctance_index: usize,
    }

    impl TripSchedule for TestTrip {
        fn trip_sort_index(&self) -> usize {
            0
        }
        fn arrival(&self, _: usize) -> crate::time::SecondsSinceDayStart {
            crate::time::SecondsSinceDayStart::zero()
        }
        fn departure(&self, _: usize) -> crate::time::SecondsSinceDayStart {
            crate::time::SecondsSinceDayStart::zero()
        }
        fn transit_reluctance_index(&self) -> usize {
            self.reluctance_index
        }
        fn name(&self) -> &str {
            "test"
        }
    }

    fn calculator() -> DefaultCostCalculator {
        DefaultCostCalculator::new(&CostParams {
            board_cost: PositiveDuration::from_seconds(60),
            transfer_cost: PositiveDuration::from_seconds(120),
            wait_reluctance: 0.8,
            transit_reluctances: vec![1.0, 0.89],
            walk_reluctance: 2.0,
        })
    }

    #[test]
    fn boarding_cost_ignores_wait_on_first_boarding() {
        let calculator = calculator();
        let trip = TestTrip {
            reluctance_index: 0,
        };
        let wait = PositiveDuration::from_seconds(100);
        assert_eq!(calculator.boarding_cost(true, wait, None, &trip), 6000);
        // board + transfer + 0.8 * wait
        assert_eq!(
            calculator.boarding_cost(false, wait, None, &trip),
            6000 + 12000 + 8000
        );
        assert_eq!(
            calculator.boarding_cost(true, wait, Some(500), &trip),
            6500
        );
    }

    #[test]
    fn transit_cost_uses_trip_reluctance() {
        let calculator = calculator();
        let ride = PositiveDuration::from_seconds(91);
        let zero = PositiveDuration::zero();
        let normal = TestTrip {
            reluctance_index: 0,
        };
        let preferred = TestTrip {
            reluctance_index: 1,
        };
        let unknown = TestTrip {
            reluctance_index: 7,
        };
        assert_eq!(calculator.transit_arrival_cost(ride, zero, None, &normal), 9100);
        assert_eq!(calculator.transit_arrival_cost(ride, zero, None, &preferred), 8099);
        assert_eq!(calculator.transit_arrival_cost(ride, zero, None, &unknown), 9100);
    }

    #[rstest]
    #[case(79_900, "C₁799")]
    #[case(78_899, "C₁789")]
    #[case(815_420, "C₁8_154")]
    #[case(0, "C₁0")]
    fn display_cost(#[case] cost: i32, #[case] expected: &str) {
        assert_eq!(C1Display(cost).to_string(), expected);
    }

    #[test]
    fn relax_functions() {
        assert_eq!(RelaxFunction::NORMAL.relax(1000), 1000);
        let relax = RelaxFunction::new(1.25, 300).unwrap();
        assert_eq!(relax.relax(1000), 1550);
        let relax = RelaxFunction::additive(200).unwrap();
        assert_eq!(relax.relax(1000), 1200);
    }

    #[rstest]
    #[case(0.99, 0)]
    #[case(4.01, 0)]
    #[case(1.0, -1)]
    fn invalid_relax_functions(#[case] ratio: f64, #[case] slack: i32) {
        assert!(RelaxFunction::new(ratio, slack).is_err());
    }

    #[test]
    fn relaxed_cost_is_never_better() {
        let functions = [
            RelaxFunction::NORMAL,
            RelaxFunction::new(1.1, 0).unwrap(),
            RelaxFunction::new(2.0, 1000).unwrap(),
            RelaxFunction::additive(50).unwrap(),
        ];
        for relax in functions.iter() {
            for cost in [0, 1, 99, 12_345, 1_000_000].iter() {
                assert!(relax.relax(*cost) >= *cost, "{} {}", relax, cost);
            }
        }
    }

    #[test]
    fn dominance_functions() {
        assert!(DominanceFunction::Different.left_dominate_right(1, 2));
        assert!(!DominanceFunction::Different.left_dominate_right(3, 3));
        assert!(DominanceFunction::LessThan.left_dominate_right(1, 2));
        assert!(!DominanceFunction::LessThan.left_dominate_right(2, 1));
        assert_eq!(DominanceFunction::Different.merge(0b01, 0b10), 0b11);
        assert_eq!(DominanceFunction::LessThan.merge(2, 3), 5);
    }
}
