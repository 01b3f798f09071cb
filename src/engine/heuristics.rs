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

use tracing::debug;

use crate::engine::best_times::BestTimesStrategy;
use crate::engine::calculator::TransitCalculator;
use crate::engine::worker::{RangeRaptorWorker, WorkerOutcome};
use crate::path::Path;
use crate::request::{RaptorRequest, SearchDirection};
use crate::time::{PositiveDuration, SecondsSinceDayStart};
use crate::traits::{Stop, TransitDataProvider};

type Time = SecondsSinceDayStart;

/// Results of a single iteration search without costs, run before the main search.
///
/// Times are optimistic and numbers of rounds are lower bounds : they can be used to
/// compute the search window and to prune the main search.
#[derive(Debug, Clone)]
pub struct Heuristics {
    direction: SearchDirection,
    iteration_departure_time: Time,
    best_times: Vec<Time>,
    min_rounds: Vec<u8>,
    destination_time: Option<Time>,
    min_nb_of_transfers: Option<u8>,
    paths: Vec<Path>,
}

impl Heuristics {
    pub(crate) fn new(
        direction: SearchDirection,
        iteration_departure_time: Time,
        best_times: Vec<Time>,
        min_rounds: Vec<u8>,
        destination_time: Option<Time>,
        min_nb_of_transfers: Option<u8>,
        paths: Vec<Path>,
    ) -> Self {
        Self {
            direction,
            iteration_departure_time,
            best_times,
            min_rounds,
            destination_time,
            min_nb_of_transfers,
            paths,
        }
    }

    pub fn direction(&self) -> SearchDirection {
        self.direction
    }

    pub fn iteration_departure_time(&self) -> Time {
        self.iteration_departure_time
    }

    pub fn destination_reached(&self) -> bool {
        self.destination_time.is_some()
    }

    /// Best arrival time at the destination (best departure time from the origin
    /// for a reverse search)
    pub fn destination_time(&self) -> Option<Time> {
        self.destination_time
    }

    pub fn min_travel_duration(&self) -> Option<PositiveDuration> {
        self.destination_time
            .map(|time| time.distance(&self.iteration_departure_time))
    }

    pub fn min_nb_of_transfers(&self) -> Option<u8> {
        self.min_nb_of_transfers
    }

    pub fn best_time(&self, stop: Stop) -> Option<Time> {
        self.best_times
            .get(stop.idx)
            .filter(|time| !time.is_unreached())
            .copied()
    }

    /// Smallest number of trips needed to reach `stop`
    pub fn min_nb_of_rounds(&self, stop: Stop) -> Option<u8> {
        self.min_rounds
            .get(stop.idx)
            .filter(|round| **round != u8::MAX)
            .copied()
    }

    pub fn nb_of_reached_stops(&self) -> usize {
        self.best_times
            .iter()
            .filter(|time| !time.is_unreached())
            .count()
    }

    /// Approximate paths to the destination : no legs, and a cost of zero
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }
}

/// A heuristic search to run before the main search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicSearchTask {
    pub direction: SearchDirection,
    pub start_time: Time,
    /// The search window or the departure time of the main search cannot
    /// be computed without this heuristic.
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeuristicsToRun {
    pub forward: Option<HeuristicSearchTask>,
    pub reverse: Option<HeuristicSearchTask>,
}

/// Decides which heuristics are needed by a request.
pub struct HeuristicToRunResolver;

impl HeuristicToRunResolver {
    pub fn resolve(request: &RaptorRequest) -> HeuristicsToRun {
        let params = request.search_params();
        let window_fixed = params.search_window.is_some();
        let pruning = request.destination_pruning();
        let (same_direction, opposite_direction) = match request.direction() {
            SearchDirection::Forward => {
                let departure_fixed = params.earliest_departure_time.is_some();
                (!window_fixed, pruning || !departure_fixed)
            }
            SearchDirection::Reverse => {
                let arrival_fixed = params.latest_arrival_time.is_some();
                (!window_fixed, pruning || !arrival_fixed)
            }
        };
        // an opposite heuristic started from a given time also gives a minimum travel duration
        let opposite_time_given = match request.direction() {
            SearchDirection::Forward => params.latest_arrival_time.is_some(),
            SearchDirection::Reverse => params.earliest_departure_time.is_some(),
        };
        // Without a fixed window, the same direction heuristic runs even when the
        // opposite one is scheduled, unless the opposite one starts from a time
        // given by the request : a derived start time would give a wrong travel duration.
        let run_same = same_direction && !(opposite_direction && opposite_time_given);
        let opposite_required = match request.direction() {
            SearchDirection::Forward => params.earliest_departure_time.is_none() || !window_fixed,
            SearchDirection::Reverse => params.latest_arrival_time.is_none() || !window_fixed,
        };

        let main = request.direction();
        let task = |direction: SearchDirection, required: bool| HeuristicSearchTask {
            direction,
            start_time: heuristic_start_time(request, direction),
            required,
        };
        let same = if run_same { Some(task(main, true)) } else { None };
        let opposite = if opposite_direction {
            Some(task(main.opposite(), opposite_required))
        } else {
            None
        };
        match main {
            SearchDirection::Forward => HeuristicsToRun {
                forward: same,
                reverse: opposite,
            },
            SearchDirection::Reverse => HeuristicsToRun {
                forward: opposite,
                reverse: same,
            },
        }
    }
}

/// A forward heuristic starts at the earliest departure time, a reverse one
/// at the latest arrival time. When this time is not given, it is derived from
/// the other one, so that no journey of the search window is missed.
fn heuristic_start_time(request: &RaptorRequest, direction: SearchDirection) -> Time {
    let params = request.search_params();
    let window = params
        .search_window
        .unwrap_or(request.search_window_params().max_window);
    let margin = window + params.max_journey_duration;
    match direction {
        SearchDirection::Forward => params
            .earliest_departure_time
            .or_else(|| params.latest_arrival_time.map(|time| time - margin))
            .unwrap_or_else(Time::zero),
        SearchDirection::Reverse => params
            .latest_arrival_time
            .or_else(|| params.earliest_departure_time.map(|time| time + margin))
            .unwrap_or_else(Time::zero),
    }
}

/// Runs a best times search for `task`.
///
/// Returns `None` if the search was aborted.
pub fn run_heuristic<Data: TransitDataProvider>(
    data: &Data,
    request: &RaptorRequest,
    task: &HeuristicSearchTask,
) -> Option<Heuristics> {
    let params = request.search_params();
    let calculator = TransitCalculator::new(
        task.direction,
        params.board_slack,
        params.alight_slack,
        params.transfer_slack,
    );
    // a reverse search starts from the egress paths, whatever the main search direction
    let (access_paths, egress_paths) = match task.direction {
        SearchDirection::Forward => (&params.access_paths, &params.egress_paths),
        SearchDirection::Reverse => (&params.egress_paths, &params.access_paths),
    };
    let strategy = BestTimesStrategy::new(data, calculator, access_paths, egress_paths);
    let mut worker = RangeRaptorWorker::new(
        data,
        strategy,
        params.max_nb_of_rounds(),
        request.abort_handle().clone(),
        None,
    );
    debug!(
        "Start {} heuristic search at {}",
        task.direction, task.start_time
    );
    match worker.route(&[task.start_time]) {
        WorkerOutcome::Aborted => None,
        WorkerOutcome::Completed => {
            let heuristics = worker.into_strategy().into_heuristics();
            debug!(
                "{} heuristic search reached {} stops, min travel duration {}",
                task.direction,
                heuristics.nb_of_reached_stops(),
                heuristics
                    .min_travel_duration()
                    .map_or_else(|| "-".to_string(), |duration| duration.to_string())
            );
            Some(heuristics)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RaptorRequestBuilder;
    use crate::traits::AccessEgress;

    fn builder() -> RaptorRequestBuilder {
        let leg = AccessEgress::new(Stop::new(0), PositiveDuration::from_seconds(30), 0);
        RaptorRequestBuilder::new().access(leg.clone()).egress(leg)
    }

    #[test]
    fn nothing_to_run_when_everything_is_fixed() {
        let request = builder()
            .earliest_departure_time(Time::from_hms(8, 0, 0))
            .search_window(PositiveDuration::from_hms(1, 0, 0))
            .destination_pruning(false)
            .build()
            .unwrap();
        assert_eq!(
            HeuristicToRunResolver::resolve(&request),
            HeuristicsToRun::default()
        );
    }

    #[test]
    fn pruning_needs_the_opposite_heuristic() {
        let request = builder()
            .earliest_departure_time(Time::from_hms(8, 0, 0))
            .search_window(PositiveDuration::from_hms(1, 0, 0))
            .destination_pruning(true)
            .build()
            .unwrap();
        let to_run = HeuristicToRunResolver::resolve(&request);
        assert!(to_run.forward.is_none());
        let reverse = to_run.reverse.unwrap();
        assert!(!reverse.required);
        // 8:00 + 1h window + 24h max journey duration
        assert_eq!(reverse.start_time, Time::from_hms(33, 0, 0));
    }

    #[test]
    fn pruning_with_dynamic_window_runs_both_heuristics() {
        let request = builder()
            .earliest_departure_time(Time::from_hms(8, 0, 0))
            .destination_pruning(true)
            .build()
            .unwrap();
        let to_run = HeuristicToRunResolver::resolve(&request);
        assert!(to_run.forward.unwrap().required);
        assert!(to_run.reverse.is_some());
    }

    #[test]
    fn dynamic_window_needs_a_heuristic() {
        let request = builder()
            .earliest_departure_time(Time::from_hms(8, 0, 0))
            .destination_pruning(false)
            .build()
            .unwrap();
        let to_run = HeuristicToRunResolver::resolve(&request);
        let forward = to_run.forward.unwrap();
        assert!(forward.required);
        assert_eq!(forward.start_time, Time::from_hms(8, 0, 0));
        assert!(to_run.reverse.is_none());
    }

    #[test]
    fn missing_departure_time_needs_the_reverse_heuristic() {
        let request = builder()
            .latest_arrival_time(Time::from_hms(10, 0, 0))
            .search_window(PositiveDuration::from_hms(1, 0, 0))
            .destination_pruning(false)
            .build()
            .unwrap();
        let to_run = HeuristicToRunResolver::resolve(&request);
        assert!(to_run.forward.is_none());
        let reverse = to_run.reverse.unwrap();
        assert!(reverse.required);
        assert_eq!(reverse.start_time, Time::from_hms(10, 0, 0));
    }

    #[test]
    fn reverse_search_mirrors_forward_search() {
        let request = builder()
            .direction(SearchDirection::Reverse)
            .latest_arrival_time(Time::from_hms(10, 0, 0))
            .destination_pruning(false)
            .build()
            .unwrap();
        let to_run = HeuristicToRunResolver::resolve(&request);
        assert!(to_run.reverse.unwrap().required);
        assert!(to_run.forward.is_none());
    }
}
