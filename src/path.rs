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

use std::fmt::{Display, Formatter};

use crate::engine::cost::{C1Display, DominanceFunction, RelaxFunction};
use crate::engine::pareto_set::ParetoComparator;
use crate::request::SearchDirection;
use crate::time::{PositiveDuration, SecondsSinceDayStart};
use crate::traits::Stop;

type Time = SecondsSinceDayStart;

#[derive(Debug, Clone, PartialEq)]
pub enum PathLeg {
    Access {
        to_stop: Stop,
        departure_time: Time,
        arrival_time: Time,
    },
    Transit {
        from_stop: Stop,
        to_stop: Stop,
        pattern_name: String,
        trip_name: String,
        departure_time: Time,
        arrival_time: Time,
    },
    Transfer {
        from_stop: Stop,
        to_stop: Stop,
        departure_time: Time,
        arrival_time: Time,
    },
    Egress {
        from_stop: Stop,
        departure_time: Time,
        arrival_time: Time,
    },
}

impl PathLeg {
    pub fn departure_time(&self) -> Time {
        match self {
            PathLeg::Access { departure_time, .. }
            | PathLeg::Transit { departure_time, .. }
            | PathLeg::Transfer { departure_time, .. }
            | PathLeg::Egress { departure_time, .. } => *departure_time,
        }
    }

    pub fn arrival_time(&self) -> Time {
        match self {
            PathLeg::Access { arrival_time, .. }
            | PathLeg::Transit { arrival_time, .. }
            | PathLeg::Transfer { arrival_time, .. }
            | PathLeg::Egress { arrival_time, .. } => *arrival_time,
        }
    }

    pub fn duration(&self) -> PositiveDuration {
        self.departure_time().distance(&self.arrival_time())
    }

    pub fn is_transit(&self) -> bool {
        matches!(self, PathLeg::Transit { .. })
    }

    /// The stop where this leg ends, if it does not end at the destination
    pub fn to_stop(&self) -> Option<Stop> {
        match self {
            PathLeg::Access { to_stop, .. }
            | PathLeg::Transit { to_stop, .. }
            | PathLeg::Transfer { to_stop, .. } => Some(*to_stop),
            PathLeg::Egress { .. } => None,
        }
    }
}

/// A journey from the origin to the destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// departure time of the range raptor iteration that found this path
    pub iteration_departure_time: Time,
    pub start_time: Time,
    pub end_time: Time,
    pub nb_of_transfers: u8,
    pub c1: i32,
    pub c2: Option<u32>,
    /// empty for paths computed by a heuristic search
    pub legs: Vec<PathLeg>,
    /// names of the stops, indexed by stop, used for display
    stop_names: Vec<(Stop, String)>,
    approximate: bool,
}

impl Path {
    pub fn new(
        iteration_departure_time: Time,
        legs: Vec<PathLeg>,
        c1: i32,
        c2: Option<u32>,
        stop_names: Vec<(Stop, String)>,
    ) -> Self {
        let start_time = legs
            .first()
            .map(PathLeg::departure_time)
            .unwrap_or(iteration_departure_time);
        let end_time = legs
            .last()
            .map(PathLeg::arrival_time)
            .unwrap_or(iteration_departure_time);
        let nb_of_transit_legs = legs.iter().filter(|leg| leg.is_transit()).count();
        let nb_of_transfers = nb_of_transit_legs.saturating_sub(1) as u8;
        Self {
            iteration_departure_time,
            start_time,
            end_time,
            nb_of_transfers,
            c1,
            c2,
            legs,
            stop_names,
            approximate: false,
        }
    }

    /// A path without legs computed by a heuristic search.
    /// Only its times and number of transfers are meaningful.
    pub fn unknown(
        iteration_departure_time: Time,
        start_time: Time,
        end_time: Time,
        nb_of_transfers: u8,
    ) -> Self {
        Self {
            iteration_departure_time,
            start_time,
            end_time,
            nb_of_transfers,
            c1: 0,
            c2: None,
            legs: Vec::new(),
            stop_names: Vec::new(),
            approximate: true,
        }
    }

    pub fn is_approximate(&self) -> bool {
        self.approximate
    }

    pub fn duration(&self) -> PositiveDuration {
        self.start_time.distance(&self.end_time)
    }

    pub fn nb_of_transit_legs(&self) -> usize {
        self.legs.iter().filter(|leg| leg.is_transit()).count()
    }

    pub fn stop_name(&self, stop: Stop) -> Option<&str> {
        self.stop_names
            .iter()
            .find(|(candidate, _)| *candidate == stop)
            .map(|(_, name)| name.as_str())
    }

    fn fmt_stop(&self, f: &mut Formatter<'_>, stop: Stop) -> std::fmt::Result {
        match self.stop_name(stop) {
            Some(name) => write!(f, " ~ {} ~ ", name),
            None => write!(f, " ~ {} ~ ", stop.idx()),
        }
    }
}

/// `Walk 30s ~ B ~ R2 0:01:00 0:02:31 ~ D ~ Walk 24s [0:00:30 0:02:55 2m25s Tₓ0 C₁789]`
impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for leg in self.legs.iter() {
            match leg {
                PathLeg::Access { to_stop, .. } => {
                    write!(f, "Walk {}", leg.duration())?;
                    self.fmt_stop(f, *to_stop)?;
                }
                PathLeg::Transit {
                    to_stop,
                    pattern_name,
                    departure_time,
                    arrival_time,
                    ..
                } => {
                    write!(f, "{} {} {}", pattern_name, departure_time, arrival_time)?;
                    self.fmt_stop(f, *to_stop)?;
                }
                PathLeg::Transfer { to_stop, .. } => {
                    write!(f, "Walk {}", leg.duration())?;
                    self.fmt_stop(f, *to_stop)?;
                }
                PathLeg::Egress { .. } => {
                    write!(f, "Walk {} ", leg.duration())?;
                }
            }
        }
        write!(
            f,
            "[{} {} {} Tₓ{}",
            self.start_time,
            self.end_time,
            self.duration(),
            self.nb_of_transfers
        )?;
        if !self.approximate {
            write!(f, " {}", C1Display(self.c1))?;
        }
        if let Some(c2) = self.c2 {
            write!(f, " C₂{}", c2)?;
        }
        write!(f, "]")
    }
}

/// Dominance between paths of the destination pareto set.
#[derive(Debug, Clone, Copy)]
pub struct PathComparator {
    direction: SearchDirection,
    timetable: bool,
    include_c1: bool,
    relax_c1: RelaxFunction,
    dominance_c2: Option<DominanceFunction>,
}

impl PathComparator {
    /// Arrival time (departure time for a reverse search) and number of transfers
    pub fn standard(direction: SearchDirection) -> Self {
        Self {
            direction,
            timetable: false,
            include_c1: false,
            relax_c1: RelaxFunction::NORMAL,
            dominance_c2: None,
        }
    }

    /// Also compares the duration and the generalized cost
    pub fn with_c1(direction: SearchDirection, relax_c1: RelaxFunction) -> Self {
        Self {
            include_c1: true,
            relax_c1,
            ..Self::standard(direction)
        }
    }

    /// Also compares the departure time of the iteration, so that each
    /// iteration keeps its own paths
    pub fn timetable(mut self, timetable: bool) -> Self {
        self.timetable = timetable;
        self
    }

    pub fn dominance_c2(mut self, dominance_c2: Option<DominanceFunction>) -> Self {
        self.dominance_c2 = dominance_c2;
        self
    }

    /// The same comparator, without relaxation of the generalized cost
    pub fn strict(&self) -> Self {
        Self {
            relax_c1: RelaxFunction::NORMAL,
            ..*self
        }
    }
}

impl ParetoComparator<Path> for PathComparator {
    fn left_dominance_exist(&self, left: &Path, right: &Path) -> bool {
        let better_time = match self.direction {
            SearchDirection::Forward => left.end_time < right.end_time,
            SearchDirection::Reverse => left.start_time > right.start_time,
        };
        if better_time || left.nb_of_transfers < right.nb_of_transfers {
            return true;
        }
        if self.timetable {
            let better_iteration = match self.direction {
                SearchDirection::Forward => {
                    left.iteration_departure_time > right.iteration_departure_time
                }
                SearchDirection::Reverse => {
                    left.iteration_departure_time < right.iteration_departure_time
                }
            };
            if better_iteration {
                return true;
            }
        }
        if self.include_c1
            && (left.duration() < right.duration() || left.c1 < self.relax_c1.relax(right.c1))
        {
            return true;
        }
        match (self.dominance_c2, left.c2, right.c2) {
            (Some(dominance), Some(left_c2), Some(right_c2)) => {
                dominance.left_dominate_right(left_c2, right_c2)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::pareto_set::ParetoSet;
    use rstest::rstest;

    fn time(minutes: i32) -> Time {
        Time::from_hms(0, minutes, 0)
    }

    fn path(iteration: i32, start: i32, end: i32, nb_of_transfers: u8, c1: i32) -> Path {
        let mut path = Path::unknown(time(iteration), time(start), time(end), nb_of_transfers);
        path.c1 = c1;
        path
    }

    #[rstest]
    // arrival time
    #[case(path(0, 0, 10, 1, 100), path(0, 0, 11, 1, 100), true, false)]
    // number of transfers
    #[case(path(0, 0, 10, 0, 100), path(0, 0, 10, 1, 100), true, false)]
    // equivalent
    #[case(path(0, 0, 10, 1, 100), path(0, 0, 10, 1, 50), false, false)]
    // mutual
    #[case(path(0, 0, 10, 2, 100), path(0, 0, 11, 1, 100), true, true)]
    fn standard_comparator(
        #[case] left: Path,
        #[case] right: Path,
        #[case] left_dominance: bool,
        #[case] right_dominance: bool,
    ) {
        let comparator = PathComparator::standard(SearchDirection::Forward);
        assert_eq!(comparator.left_dominance_exist(&left, &right), left_dominance);
        assert_eq!(comparator.left_dominance_exist(&right, &left), right_dominance);
    }

    #[test]
    fn c1_comparator() {
        let comparator = PathComparator::with_c1(SearchDirection::Forward, RelaxFunction::NORMAL);
        let cheap = path(0, 0, 10, 1, 100);
        let expensive = path(0, 0, 10, 1, 200);
        assert!(comparator.left_dominance_exist(&cheap, &expensive));
        assert!(!comparator.left_dominance_exist(&expensive, &cheap));

        let shorter = path(0, 5, 10, 1, 100);
        assert!(comparator.left_dominance_exist(&shorter, &cheap));
        assert!(!comparator.left_dominance_exist(&cheap, &shorter));
    }

    #[test]
    fn relaxed_c1_comparator() {
        let relax = RelaxFunction::new(1.5, 0).unwrap();
        let comparator = PathComparator::with_c1(SearchDirection::Forward, relax);
        let cheap = path(0, 0, 10, 1, 100);
        let expensive = path(0, 0, 10, 1, 149);
        assert!(comparator.left_dominance_exist(&cheap, &expensive));
        assert!(comparator.left_dominance_exist(&expensive, &cheap));
        assert!(!comparator.strict().left_dominance_exist(&expensive, &cheap));
    }

    #[test]
    fn timetable_comparator_keeps_later_iterations() {
        let comparator = PathComparator::standard(SearchDirection::Forward).timetable(true);
        let late = path(9, 9, 20, 0, 0);
        let early = path(8, 8, 19, 0, 0);
        assert!(comparator.left_dominance_exist(&late, &early));
        assert!(comparator.left_dominance_exist(&early, &late));

        let mut set = ParetoSet::new(PathComparator::standard(SearchDirection::Forward));
        set.add(late);
        set.add(early);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn reverse_comparator_prefers_late_departures() {
        let comparator = PathComparator::standard(SearchDirection::Reverse);
        let late = path(0, 5, 20, 0, 0);
        let early = path(0, 4, 19, 0, 0);
        assert!(comparator.left_dominance_exist(&late, &early));
        assert!(!comparator.left_dominance_exist(&early, &late));
    }

    #[test]
    fn c2_comparator() {
        let comparator = PathComparator::with_c1(SearchDirection::Forward, RelaxFunction::NORMAL)
            .dominance_c2(Some(DominanceFunction::LessThan));
        let mut left = path(0, 0, 10, 1, 100);
        let mut right = path(0, 0, 10, 1, 100);
        left.c2 = Some(1);
        right.c2 = Some(2);
        assert!(comparator.left_dominance_exist(&left, &right));
        assert!(!comparator.left_dominance_exist(&right, &left));
    }

    #[test]
    fn display_path() {
        let b = Stop::new(1);
        let d = Stop::new(3);
        let legs = vec![
            PathLeg::Access {
                to_stop: b,
                departure_time: Time::from_hms(0, 0, 30),
                arrival_time: Time::from_hms(0, 1, 0),
            },
            PathLeg::Transit {
                from_stop: b,
                to_stop: d,
                pattern_name: "R2".to_string(),
                trip_name: "R2-1".to_string(),
                departure_time: Time::from_hms(0, 1, 0),
                arrival_time: Time::from_hms(0, 2, 31),
            },
            PathLeg::Egress {
                from_stop: d,
                departure_time: Time::from_hms(0, 2, 31),
                arrival_time: Time::from_hms(0, 2, 55),
            },
        ];
        let names = vec![(b, "B".to_string()), (d, "D".to_string())];
        let path = Path::new(Time::zero(), legs, 78_899, None, names);
        assert_eq!(
            path.to_string(),
            "Walk 30s ~ B ~ R2 0:01:00 0:02:31 ~ D ~ Walk 24s [0:00:30 0:02:55 2m25s Tₓ0 C₁789]"
        );
        assert_eq!(path.nb_of_transfers, 0);
        assert_eq!(path.duration(), PositiveDuration::from_seconds(145));
    }
}
