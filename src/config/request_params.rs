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

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RequestParams {
    /// maximum number of transfers in a journey
    #[serde(default = "default_max_nb_of_transfers")]
    pub max_nb_of_transfers: u8,

    /// width of the departure time window explored by the search.
    /// If not given, it is computed from the duration of the fastest journey
    #[serde(default)]
    pub search_window: Option<PositiveDuration>,

    /// gap between two departure times explored by the search
    #[serde(default = "default_iteration_step")]
    pub iteration_step: PositiveDuration,

    /// maximum duration of a journey
    #[serde(default = "default_max_journey_duration")]
    pub max_journey_duration: PositiveDuration,

    /// minimum time between the arrival at a stop and the boarding of a vehicle
    #[serde(default = "default_board_slack")]
    pub board_slack: PositiveDuration,

    /// time between the alighting from a vehicle and the arrival at the stop
    #[serde(default = "default_alight_slack")]
    pub alight_slack: PositiveDuration,

    /// extra time needed to board a vehicle, applied to every boarding but the first one
    #[serde(default = "default_transfer_slack")]
    pub transfer_slack: PositiveDuration,
}

pub const DEFAULT_MAX_NB_OF_TRANSFERS: &str = "10";
pub const DEFAULT_ITERATION_STEP: &str = "00:01:00";
pub const DEFAULT_MAX_JOURNEY_DURATION: &str = "24:00:00";
pub const DEFAULT_BOARD_SLACK: &str = "00:00:00";
pub const DEFAULT_ALIGHT_SLACK: &str = "00:00:00";
pub const DEFAULT_TRANSFER_SLACK: &str = "00:00:00";

/// The search never explores more rounds than this
pub const MAX_NB_OF_TRANSFERS: u8 = 20;

pub fn default_max_nb_of_transfers() -> u8 {
    u8::from_str(DEFAULT_MAX_NB_OF_TRANSFERS).unwrap()
}

pub fn default_iteration_step() -> PositiveDuration {
    PositiveDuration::from_str(DEFAULT_ITERATION_STEP).unwrap()
}

pub fn default_max_journey_duration() -> PositiveDuration {
    PositiveDuration::from_str(DEFAULT_MAX_JOURNEY_DURATION).unwrap()
}

pub fn default_board_slack() -> PositiveDuration {
    PositiveDuration::from_str(DEFAULT_BOARD_SLACK).unwrap()
}

pub fn default_alight_slack() -> PositiveDuration {
    PositiveDuration::from_str(DEFAULT_ALIGHT_SLACK).unwrap()
}

pub fn default_transfer_slack() -> PositiveDuration {
    PositiveDuration::from_str(DEFAULT_TRANSFER_SLACK).unwrap()
}

impl Default for RequestParams {
    fn default() -> Self {
        Self {
            max_nb_of_transfers: default_max_nb_of_transfers(),
            search_window: None,
            iteration_step: default_iteration_step(),
            max_journey_duration: default_max_journey_duration(),
            board_slack: default_board_slack(),
            alight_slack: default_alight_slack(),
            transfer_slack: default_transfer_slack(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_parsable() {
        let params = RequestParams::default();
        assert_eq!(params.max_nb_of_transfers, 10);
        assert_eq!(params.iteration_step, PositiveDuration::from_hms(0, 1, 0));
        assert_eq!(params.max_journey_duration, PositiveDuration::from_hms(24, 0, 0));
        assert!(params.board_slack.is_zero());
    }
}
