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

use tracing::{debug, trace};

use crate::engine::calculator::TransitCalculator;
use crate::engine::cost::DefaultCostCalculator;
use crate::engine::heuristics::{run_heuristic, HeuristicToRunResolver, Heuristics};
use crate::engine::multicriteria::McStrategy;
use crate::engine::pareto_set::filter_with_min_limit;
use crate::engine::pruning::DestinationPruning;
use crate::engine::search_window::SearchWindowCalculator;
use crate::engine::worker::{RangeRaptorWorker, WorkerOutcome};
use crate::path::Path;
use crate::request::{BadRequest, RaptorRequest, SearchDirection};
use crate::response::{RaptorResponse, SearchError};
use crate::traits::TransitDataProvider;

/// Entry point of the router : runs the heuristics needed by a request,
/// then the main range raptor search.
pub struct RaptorService<'data, Data> {
    data: &'data Data,
}

impl<'data, Data: TransitDataProvider> RaptorService<'data, Data> {
    pub fn new(data: &'data Data) -> Self {
        Self { data }
    }

    pub fn route(&self, request: &RaptorRequest) -> Result<RaptorResponse, SearchError> {
        self.check_stops(request)?;
        debug!(
            "Start computing {} {} journeys",
            request.profile(),
            request.direction()
        );
        let params = request.search_params();
        let main_direction = request.direction();
        let mut response = RaptorResponse::empty();

        let to_run = HeuristicToRunResolver::resolve(request);
        for task in [to_run.forward, to_run.reverse].iter().flatten() {
            let heuristics = match run_heuristic(self.data, request, task) {
                Some(heuristics) => heuristics,
                None => {
                    debug!("Search aborted during the {} heuristic", task.direction);
                    response.aborted = true;
                    return Ok(response);
                }
            };
            if task.required && !heuristics.destination_reached() {
                return Err(SearchError::DestinationNotReached {
                    direction: task.direction,
                });
            }
            match task.direction {
                SearchDirection::Forward => response.forward_heuristics = Some(heuristics),
                SearchDirection::Reverse => response.reverse_heuristics = Some(heuristics),
            }
        }

        let opposite_heuristics = response.heuristics(main_direction.opposite());
        if let Some(heuristics) = opposite_heuristics {
            if !heuristics.destination_reached() {
                debug!("The destination cannot be reached, no journey to compute");
                return Ok(response);
            }
        }
        let min_travel_duration = response
            .heuristics(main_direction)
            .or(opposite_heuristics)
            .and_then(Heuristics::min_travel_duration);

        let search_window = SearchWindowCalculator::new(request.search_window_params())
            .calculate(
                main_direction,
                params.earliest_departure_time,
                params.latest_arrival_time,
                params.search_window,
                min_travel_duration,
            )
            .ok_or(SearchError::DestinationNotReached {
                direction: main_direction.opposite(),
            })?;
        debug!(
            "Search window of {} starting at {}",
            search_window.search_window, search_window.start_time
        );

        let pruning = if request.destination_pruning() {
            opposite_heuristics.map(|heuristics| {
                DestinationPruning::new(
                    heuristics,
                    self.data.nb_of_stops(),
                    params.max_nb_of_transfers,
                )
            })
        } else {
            None
        };

        let calculator = TransitCalculator::new(
            main_direction,
            params.board_slack,
            params.alight_slack,
            params.transfer_slack,
        );
        let (access_paths, egress_paths) = match main_direction {
            SearchDirection::Forward => (&params.access_paths, &params.egress_paths),
            SearchDirection::Reverse => (&params.egress_paths, &params.access_paths),
        };
        let strategy = McStrategy::new(
            self.data,
            request,
            calculator.clone(),
            DefaultCostCalculator::new(&request.multi_criteria().cost),
            access_paths,
            egress_paths,
            pruning,
        );
        let mut worker = RangeRaptorWorker::new(
            self.data,
            strategy,
            params.max_nb_of_rounds(),
            request.abort_handle().clone(),
            request.event_listener().cloned(),
        );
        let iteration_departure_times = calculator.iteration_departure_times(
            search_window.start_time,
            search_window.search_window,
            params.iteration_step,
        );
        trace!("{} iterations to run", iteration_departure_times.len());
        let outcome = worker.route(&iteration_departure_times);

        let strategy = worker.into_strategy();
        let strict_comparator = strategy.path_comparator().strict();
        response.stop_arrivals = Some(strategy.stop_arrivals());
        let mut paths: Vec<Path> = strategy
            .into_paths()
            .into_iter()
            .filter(|path| within_time_bounds(path, request))
            .collect();
        let relax_c1 = request.multi_criteria().relax_c1;
        if !relax_c1.is_normal() {
            let nb_of_relaxed_paths = paths.len();
            paths = filter_with_min_limit(
                paths,
                &strict_comparator,
                request.multi_criteria().min_nb_of_paths,
            );
            trace!(
                "{} paths kept out of {} found with relaxed c1 {}",
                paths.len(),
                nb_of_relaxed_paths,
                relax_c1
            );
        }
        paths.sort_by_key(|path| path.start_time);

        response.aborted = outcome == WorkerOutcome::Aborted;
        response.paths = paths;
        response.start_time = Some(search_window.start_time);
        response.search_window = Some(search_window.search_window);
        debug!(
            "Found {} journeys{}",
            response.paths.len(),
            if response.aborted { ", search aborted" } else { "" }
        );
        Ok(response)
    }

    fn check_stops(&self, request: &RaptorRequest) -> Result<(), BadRequest> {
        let nb_of_stops = self.data.nb_of_stops();
        let params = request.search_params();
        let legs = params.access_paths.iter().chain(params.egress_paths.iter());
        for leg in legs {
            if leg.stop.idx() >= nb_of_stops {
                return Err(BadRequest::InvalidStop {
                    stop_idx: leg.stop.idx(),
                    nb_of_stops,
                });
            }
        }
        Ok(())
    }
}

// a forward search cannot arrive after the latest arrival time,
// a reverse search cannot depart before the earliest departure time
fn within_time_bounds(path: &Path, request: &RaptorRequest) -> bool {
    let params = request.search_params();
    match request.direction() {
        SearchDirection::Forward => params
            .latest_arrival_time
            .map_or(true, |latest| path.end_time <= latest),
        SearchDirection::Reverse => params
            .earliest_departure_time
            .map_or(true, |earliest| path.start_time >= earliest),
    }
}
