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

/// How the search window is computed when the request does not give one :
/// `min_window + travel_duration_coefficient * min_travel_duration`,
/// rounded up to a multiple of `step` and capped by `max_window`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SearchWindowParams {
    #[serde(default = "default_min_window")]
    pub min_window: PositiveDuration,

    #[serde(default = "default_max_window")]
    pub max_window: PositiveDuration,

    #[serde(default = "default_travel_duration_coefficient")]
    pub travel_duration_coefficient: f64,

    #[serde(default = "default_step")]
    pub step: PositiveDuration,
}

pub const DEFAULT_MIN_WINDOW: &str = "00:40:00";
pub const DEFAULT_MAX_WINDOW: &str = "03:00:00";
pub const DEFAULT_TRAVEL_DURATION_COEFFICIENT: f64 = 0.5;
pub const DEFAULT_STEP: &str = "00:10:00";

pub fn default_min_window() -> PositiveDuration {
    PositiveDuration::from_str(DEFAULT_MIN_WINDOW).unwrap()
}

pub fn default_max_window() -> PositiveDuration {
    PositiveDuration::from_str(DEFAULT_MAX_WINDOW).unwrap()
}

pub fn default_travel_duration_coefficient() -> f64 {
    DEFAULT_TRAVEL_DURATION_COEFFICIENT
}

pub fn default_step() -> PositiveDuration {
    PositiveDuration::from_str(DEFAULT_STEP).unwrap()
}

impl Default for SearchWindowParams {
    fn default() -> Self {
        Self {
            min_window: default_min_window(),
            max_window: default_max_window(),
            travel_duration_coefficient: default_travel_duration_coefficient(),
            step: default_step(),
        }
    }
}
