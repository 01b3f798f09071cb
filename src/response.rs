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

use std::fmt;

use crate::engine::heuristics::Heuristics;
use crate::engine::summary::StopArrivals;
use crate::path::Path;
use crate::request::{BadRequest, SearchDirection};
use crate::time::{PositiveDuration, SecondsSinceDayStart};

/// Result of a search.
#[derive(Debug, Clone)]
pub struct RaptorResponse {
    /// Pareto optimal paths, sorted by departure time
    pub paths: Vec<Path>,
    /// Time at which the first iteration of the main search started
    pub start_time: Option<SecondsSinceDayStart>,
    pub search_window: Option<PositiveDuration>,
    pub forward_heuristics: Option<Heuristics>,
    pub reverse_heuristics: Option<Heuristics>,
    pub stop_arrivals: Option<StopArrivals>,
    pub(crate) aborted: bool,
}

impl RaptorResponse {
    pub(crate) fn empty() -> Self {
        Self {
            paths: Vec::new(),
            start_time: None,
            search_window: None,
            forward_heuristics: None,
            reverse_heuristics: None,
            stop_arrivals: None,
            aborted: false,
        }
    }

    /// True if the search was stopped by its abort handle. The paths found
    /// before the abort are still given.
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    pub fn heuristics(&self, direction: SearchDirection) -> Option<&Heuristics> {
        match direction {
            SearchDirection::Forward => self.forward_heuristics.as_ref(),
            SearchDirection::Reverse => self.reverse_heuristics.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    BadRequest(BadRequest),
    /// A heuristic needed to compute the search window, or a missing time,
    /// did not reach the destination.
    DestinationNotReached { direction: SearchDirection },
}

impl From<BadRequest> for SearchError {
    fn from(error: BadRequest) -> Self {
        SearchError::BadRequest(error)
    }
}

impl std::error::Error for SearchError {}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SearchError::BadRequest(error) => write!(f, "Bad request : {}", error),
            SearchError::DestinationNotReached { direction } => write!(
                f,
                "The destination is not reachable : the {} heuristic search did not reach it",
                direction
            ),
        }
    }
}
