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
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::request_params::MAX_NB_OF_TRANSFERS;
use crate::config::{CostParams, RequestParams, SearchWindowParams};
use crate::debug::SearchEventListener;
use crate::engine::cost::{DominanceFunction, RelaxFunction};
use crate::time::{PositiveDuration, SecondsSinceDayStart};
use crate::traits::AccessEgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchDirection {
    Forward,
    Reverse,
}

impl SearchDirection {
    pub fn opposite(&self) -> Self {
        match self {
            SearchDirection::Forward => SearchDirection::Reverse,
            SearchDirection::Reverse => SearchDirection::Forward,
        }
    }
}

impl Display for SearchDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchDirection::Forward => write!(f, "forward"),
            SearchDirection::Reverse => write!(f, "reverse"),
        }
    }
}

/// Which criteria are optimized by the main search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// arrival time and number of transfers
    Standard,
    /// arrival time, number of transfers, journey duration and generalized cost
    MultiCriteria,
}

impl Display for Profile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Profile::Standard => write!(f, "standard"),
            Profile::MultiCriteria => write!(f, "multi_criteria"),
        }
    }
}

/// Can be cloned and given to another thread to stop a running search.
///
/// The search checks it between two iterations and between two rounds,
/// and returns the paths found so far.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle {
    aborted: Arc<AtomicBool>,
}

impl AbortHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abort(&self) {
        self.aborted.store(true, Ordering::Relaxed);
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BadRequest {
    NoAccessPaths,
    NoEgressPaths,
    NoTimeGiven,
    InvalidIterationStep,
    InvalidRelaxFunction { ratio: f64, slack: i32 },
    InvalidStop { stop_idx: usize, nb_of_stops: usize },
    TooManyTransfers { max_nb_of_transfers: u8 },
    InconsistentCriteria(&'static str),
}

impl std::error::Error for BadRequest {}

impl Display for BadRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BadRequest::NoAccessPaths => write!(f, "No access path given."),
            BadRequest::NoEgressPaths => write!(f, "No egress path given."),
            BadRequest::NoTimeGiven => write!(
                f,
                "Neither an earliest departure time nor a latest arrival time were given."
            ),
            BadRequest::InvalidIterationStep => {
                write!(f, "The iteration step must be strictly positive.")
            }
            BadRequest::InvalidRelaxFunction { ratio, slack } => write!(
                f,
                "Invalid relax function f(x) = {} * x + {}. The ratio must be in [1.0, 4.0] and the slack must be positive.",
                ratio, slack
            ),
            BadRequest::InvalidStop {
                stop_idx,
                nb_of_stops,
            } => write!(
                f,
                "The stop {} does not exist, the data has {} stops.",
                stop_idx, nb_of_stops
            ),
            BadRequest::TooManyTransfers {
                max_nb_of_transfers,
            } => write!(
                f,
                "Asked for at most {} transfers, but at most {} are allowed.",
                max_nb_of_transfers, MAX_NB_OF_TRANSFERS
            ),
            BadRequest::InconsistentCriteria(reason) => {
                write!(f, "Inconsistent criteria : {}", reason)
            }
        }
    }
}

/// Time bounds and legs of a search.
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub earliest_departure_time: Option<SecondsSinceDayStart>,
    pub latest_arrival_time: Option<SecondsSinceDayStart>,
    pub search_window: Option<PositiveDuration>,
    pub access_paths: Vec<AccessEgress>,
    pub egress_paths: Vec<AccessEgress>,
    pub max_nb_of_transfers: u8,
    pub iteration_step: PositiveDuration,
    pub max_journey_duration: PositiveDuration,
    pub board_slack: PositiveDuration,
    pub alight_slack: PositiveDuration,
    pub transfer_slack: PositiveDuration,
    /// keep one path per iteration, i.e. a path departing later is never dominated
    pub timetable: bool,
}

impl SearchParams {
    pub fn max_nb_of_rounds(&self) -> u8 {
        self.max_nb_of_transfers + 1
    }
}

#[derive(Debug, Clone)]
pub struct MultiCriteriaParams {
    pub cost: CostParams,
    pub relax_c1: RelaxFunction,
    pub dominance_c2: Option<DominanceFunction>,
    /// when c1 is relaxed, the paths are filtered with an exact comparison
    /// that keeps at least this number of paths
    pub min_nb_of_paths: usize,
}

impl Default for MultiCriteriaParams {
    fn default() -> Self {
        Self {
            cost: CostParams::default(),
            relax_c1: RelaxFunction::NORMAL,
            dominance_c2: None,
            min_nb_of_paths: 0,
        }
    }
}

/// A validated routing request. Built with `RaptorRequestBuilder`.
#[derive(Clone)]
pub struct RaptorRequest {
    pub(crate) profile: Profile,
    pub(crate) direction: SearchDirection,
    pub(crate) search_params: SearchParams,
    pub(crate) multi_criteria: MultiCriteriaParams,
    pub(crate) search_window_params: SearchWindowParams,
    pub(crate) destination_pruning: bool,
    pub(crate) abort_handle: AbortHandle,
    pub(crate) event_listener: Option<Arc<dyn SearchEventListener>>,
}

impl RaptorRequest {
    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn direction(&self) -> SearchDirection {
        self.direction
    }

    pub fn search_params(&self) -> &SearchParams {
        &self.search_params
    }

    pub fn multi_criteria(&self) -> &MultiCriteriaParams {
        &self.multi_criteria
    }

    pub fn search_window_params(&self) -> &SearchWindowParams {
        &self.search_window_params
    }

    pub fn destination_pruning(&self) -> bool {
        self.destination_pruning
    }

    pub fn abort_handle(&self) -> &AbortHandle {
        &self.abort_handle
    }

    pub fn event_listener(&self) -> Option<&Arc<dyn SearchEventListener>> {
        self.event_listener.as_ref()
    }
}

impl std::fmt::Debug for RaptorRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RaptorRequest")
            .field("profile", &self.profile)
            .field("direction", &self.direction)
            .field("search_params", &self.search_params)
            .field("multi_criteria", &self.multi_criteria)
            .field("destination_pruning", &self.destination_pruning)
            .finish()
    }
}

pub struct RaptorRequestBuilder {
    request: RaptorRequest,
}

impl Default for RaptorRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RaptorRequestBuilder {
    pub fn new() -> Self {
        let params = RequestParams::default();
        let builder = Self {
            request: RaptorRequest {
                profile: Profile::MultiCriteria,
                direction: SearchDirection::Forward,
                search_params: SearchParams {
                    earliest_departure_time: None,
                    latest_arrival_time: None,
                    search_window: None,
                    access_paths: Vec::new(),
                    egress_paths: Vec::new(),
                    max_nb_of_transfers: 0,
                    iteration_step: PositiveDuration::zero(),
                    max_journey_duration: PositiveDuration::zero(),
                    board_slack: PositiveDuration::zero(),
                    alight_slack: PositiveDuration::zero(),
                    transfer_slack: PositiveDuration::zero(),
                    timetable: false,
                },
                multi_criteria: MultiCriteriaParams::default(),
                search_window_params: SearchWindowParams::default(),
                destination_pruning: false,
                abort_handle: AbortHandle::new(),
                event_listener: None,
            },
        };
        builder.request_params(&params)
    }

    /// Copies all fields of `params` into the request
    pub fn request_params(mut self, params: &RequestParams) -> Self {
        let search_params = &mut self.request.search_params;
        search_params.max_nb_of_transfers = params.max_nb_of_transfers;
        search_params.search_window = params.search_window;
        search_params.iteration_step = params.iteration_step;
        search_params.max_journey_duration = params.max_journey_duration;
        search_params.board_slack = params.board_slack;
        search_params.alight_slack = params.alight_slack;
        search_params.transfer_slack = params.transfer_slack;
        self
    }

    pub fn profile(mut self, profile: Profile) -> Self {
        self.request.profile = profile;
        self
    }

    pub fn direction(mut self, direction: SearchDirection) -> Self {
        self.request.direction = direction;
        self
    }

    pub fn earliest_departure_time(mut self, time: SecondsSinceDayStart) -> Self {
        self.request.search_params.earliest_departure_time = Some(time);
        self
    }

    pub fn latest_arrival_time(mut self, time: SecondsSinceDayStart) -> Self {
        self.request.search_params.latest_arrival_time = Some(time);
        self
    }

    pub fn search_window(mut self, search_window: PositiveDuration) -> Self {
        self.request.search_params.search_window = Some(search_window);
        self
    }

    pub fn access(mut self, access: AccessEgress) -> Self {
        self.request.search_params.access_paths.push(access);
        self
    }

    pub fn egress(mut self, egress: AccessEgress) -> Self {
        self.request.search_params.egress_paths.push(egress);
        self
    }

    pub fn max_nb_of_transfers(mut self, max_nb_of_transfers: u8) -> Self {
        self.request.search_params.max_nb_of_transfers = max_nb_of_transfers;
        self
    }

    pub fn iteration_step(mut self, step: PositiveDuration) -> Self {
        self.request.search_params.iteration_step = step;
        self
    }

    pub fn max_journey_duration(mut self, duration: PositiveDuration) -> Self {
        self.request.search_params.max_journey_duration = duration;
        self
    }

    pub fn slacks(
        mut self,
        board_slack: PositiveDuration,
        alight_slack: PositiveDuration,
        transfer_slack: PositiveDuration,
    ) -> Self {
        let search_params = &mut self.request.search_params;
        search_params.board_slack = board_slack;
        search_params.alight_slack = alight_slack;
        search_params.transfer_slack = transfer_slack;
        self
    }

    pub fn timetable(mut self, timetable: bool) -> Self {
        self.request.search_params.timetable = timetable;
        self
    }

    pub fn cost_params(mut self, cost: CostParams) -> Self {
        self.request.multi_criteria.cost = cost;
        self
    }

    pub fn relax_c1(mut self, relax_c1: RelaxFunction) -> Self {
        self.request.multi_criteria.relax_c1 = relax_c1;
        self
    }

    pub fn dominance_c2(mut self, dominance_c2: DominanceFunction) -> Self {
        self.request.multi_criteria.dominance_c2 = Some(dominance_c2);
        self
    }

    pub fn min_nb_of_paths(mut self, min_nb_of_paths: usize) -> Self {
        self.request.multi_criteria.min_nb_of_paths = min_nb_of_paths;
        self
    }

    pub fn search_window_params(mut self, params: SearchWindowParams) -> Self {
        self.request.search_window_params = params;
        self
    }

    pub fn destination_pruning(mut self, enabled: bool) -> Self {
        self.request.destination_pruning = enabled;
        self
    }

    pub fn abort_handle(mut self, abort_handle: AbortHandle) -> Self {
        self.request.abort_handle = abort_handle;
        self
    }

    pub fn event_listener(mut self, listener: Arc<dyn SearchEventListener>) -> Self {
        self.request.event_listener = Some(listener);
        self
    }

    pub fn build(self) -> Result<RaptorRequest, BadRequest> {
        let request = self.request;
        let search_params = &request.search_params;
        if search_params.access_paths.is_empty() {
            return Err(BadRequest::NoAccessPaths);
        }
        if search_params.egress_paths.is_empty() {
            return Err(BadRequest::NoEgressPaths);
        }
        if search_params.earliest_departure_time.is_none()
            && search_params.latest_arrival_time.is_none()
        {
            return Err(BadRequest::NoTimeGiven);
        }
        if search_params.iteration_step.is_zero() {
            return Err(BadRequest::InvalidIterationStep);
        }
        if search_params.max_nb_of_transfers > MAX_NB_OF_TRANSFERS {
            return Err(BadRequest::TooManyTransfers {
                max_nb_of_transfers: search_params.max_nb_of_transfers,
            });
        }
        let relax_c1 = request.multi_criteria.relax_c1;
        // a relax function may have been built without validation through `Default`
        RelaxFunction::new(relax_c1.ratio(), relax_c1.slack())?;
        if request.profile == Profile::Standard {
            if !relax_c1.is_normal() {
                return Err(BadRequest::InconsistentCriteria(
                    "c1 cannot be relaxed with the standard profile, which does not use c1",
                ));
            }
            if request.multi_criteria.dominance_c2 == Some(DominanceFunction::Different) {
                return Err(BadRequest::InconsistentCriteria(
                    "transit priority groups relax c1, which is not used by the standard profile",
                ));
            }
        }
        Ok(request)
    }
}
