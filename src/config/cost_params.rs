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

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::PositiveDuration;

/// Parameters of the generalized cost, used by the multicriteria profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CostParams {
    /// cost of each boarding, expressed as an equivalent riding time
    #[serde(default = "default_board_cost")]
    pub board_cost: PositiveDuration,

    /// extra cost of each boarding but the first one
    #[serde(default = "default_transfer_cost")]
    pub transfer_cost: PositiveDuration,

    /// cost of one second of waiting, relative to one second on board
    #[serde(default = "default_wait_reluctance")]
    pub wait_reluctance: f64,

    /// cost of one second on board, indexed by the trips' reluctance index
    #[serde(default = "default_transit_reluctances")]
    pub transit_reluctances: Vec<f64>,

    /// cost of one second of walking, relative to one second on board
    #[serde(default = "default_walk_reluctance")]
    pub walk_reluctance: f64,
}

pub const DEFAULT_BOARD_COST: &str = "00:01:00";
pub const DEFAULT_TRANSFER_COST: &str = "00:00:00";
pub const DEFAULT_WAIT_RELUCTANCE: f64 = 1.0;
pub const DEFAULT_WALK_RELUCTANCE: f64 = 2.0;

pub fn default_board_cost() -> PositiveDuration {
    PositiveDuration::from_str(DEFAULT_BOARD_COST).unwrap()
}

pub fn default_transfer_cost() -> PositiveDuration {
    PositiveDuration::from_str(DEFAULT_TRANSFER_COST).unwrap()
}

pub fn default_wait_reluctance() -> f64 {
    DEFAULT_WAIT_RELUCTANCE
}

pub fn default_transit_reluctances() -> Vec<f64> {
    vec![1.0]
}

pub fn default_walk_reluctance() -> f64 {
    DEFAULT_WALK_RELUCTANCE
}

impl Default for CostParams {
    fn default() -> Self {
        Self {
            board_cost: default_board_cost(),
            transfer_cost: default_transfer_cost(),
            wait_reluctance: default_wait_reluctance(),
            transit_reluctances: default_transit_reluctances(),
            walk_reluctance: default_walk_reluctance(),
        }
    }
}
