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
use structopt::StructOpt;

use raptor::config::cost_params::{
    default_board_cost, default_transfer_cost, default_transit_reluctances, DEFAULT_BOARD_COST,
    DEFAULT_TRANSFER_COST,
};
use raptor::config::request_params::{
    default_alight_slack, default_board_slack, default_iteration_step,
    default_max_journey_duration, default_max_nb_of_transfers, default_transfer_slack,
    DEFAULT_ALIGHT_SLACK, DEFAULT_BOARD_SLACK, DEFAULT_ITERATION_STEP,
    DEFAULT_MAX_JOURNEY_DURATION, DEFAULT_MAX_NB_OF_TRANSFERS, DEFAULT_TRANSFER_SLACK,
};
use raptor::engine::cost::duration_to_cost;
use raptor::{BadRequest, CostParams, PositiveDuration, RelaxFunction};

use super::ProfileType;

#[derive(Debug, Clone, Serialize, Deserialize, StructOpt)]
#[structopt(rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
pub struct RequestParams {
    /// standard : arrival time and number of transfers,
    /// multi_criteria : adds the journey duration and the generalized cost
    #[structopt(long, default_value = DEFAULT_PROFILE)]
    #[serde(default)]
    pub profile: ProfileType,

    /// maximum number of transfers in a journey
    #[structopt(long, default_value = DEFAULT_MAX_NB_OF_TRANSFERS)]
    #[serde(default = "default_max_nb_of_transfers")]
    pub max_nb_of_transfers: u8,

    /// width of the explored departure window,
    /// computed from the fastest journey when not given
    #[structopt(long)]
    #[serde(default)]
    pub search_window: Option<PositiveDuration>,

    /// gap between two explored departure times
    #[structopt(long, default_value = DEFAULT_ITERATION_STEP)]
    #[serde(default = "default_iteration_step")]
    pub iteration_step: PositiveDuration,

    /// maximum duration of a journey
    #[structopt(long, default_value = DEFAULT_MAX_JOURNEY_DURATION)]
    #[serde(default = "default_max_journey_duration")]
    pub max_journey_duration: PositiveDuration,

    #[structopt(long, default_value = DEFAULT_BOARD_SLACK)]
    #[serde(default = "default_board_slack")]
    pub board_slack: PositiveDuration,

    #[structopt(long, default_value = DEFAULT_ALIGHT_SLACK)]
    #[serde(default = "default_alight_slack")]
    pub alight_slack: PositiveDuration,

    #[structopt(long, default_value = DEFAULT_TRANSFER_SLACK)]
    #[serde(default = "default_transfer_slack")]
    pub transfer_slack: PositiveDuration,

    /// cost of each boarding, as an equivalent riding time
    #[structopt(long, default_value = DEFAULT_BOARD_COST)]
    #[serde(default = "default_board_cost")]
    pub board_cost: PositiveDuration,

    /// extra cost of each boarding but the first one
    #[structopt(long, default_value = DEFAULT_TRANSFER_COST)]
    #[serde(default = "default_transfer_cost")]
    pub transfer_cost: PositiveDuration,

    #[structopt(long, default_value = DEFAULT_WAIT_RELUCTANCE)]
    #[serde(default = "default_wait_reluctance")]
    pub wait_reluctance: f64,

    /// also used to compute the cost of the access and egress legs
    #[structopt(long, default_value = DEFAULT_WALK_RELUCTANCE)]
    #[serde(default = "default_walk_reluctance")]
    pub walk_reluctance: f64,

    /// keep journeys whose cost is below `relax_c1_ratio * best_cost + relax_c1_slack`
    #[structopt(long, default_value = DEFAULT_RELAX_C1_RATIO)]
    #[serde(default = "default_relax_c1_ratio")]
    pub relax_c1_ratio: f64,

    #[structopt(long, default_value = DEFAULT_RELAX_C1_SLACK)]
    #[serde(default = "default_relax_c1_slack")]
    pub relax_c1_slack: PositiveDuration,

    /// number of journeys kept when the relaxed journeys are filtered out
    #[structopt(long, default_value = DEFAULT_MIN_NB_OF_PATHS)]
    #[serde(default = "default_min_nb_of_paths")]
    pub min_nb_of_paths: usize,

    /// prune the arrivals that cannot improve the journeys to the destination
    #[structopt(long)]
    #[serde(default)]
    pub destination_pruning: bool,
}

pub const DEFAULT_PROFILE: &str = "multi_criteria";
pub const DEFAULT_WAIT_RELUCTANCE: &str = "1.0";
pub const DEFAULT_WALK_RELUCTANCE: &str = "2.0";
pub const DEFAULT_RELAX_C1_RATIO: &str = "1.0";
pub const DEFAULT_RELAX_C1_SLACK: &str = "00:00:00";
pub const DEFAULT_MIN_NB_OF_PATHS: &str = "0";

pub fn default_wait_reluctance() -> f64 {
    f64::from_str(DEFAULT_WAIT_RELUCTANCE).unwrap()
}

pub fn default_walk_reluctance() -> f64 {
    f64::from_str(DEFAULT_WALK_RELUCTANCE).unwrap()
}

pub fn default_relax_c1_ratio() -> f64 {
    f64::from_str(DEFAULT_RELAX_C1_RATIO).unwrap()
}

pub fn default_relax_c1_slack() -> PositiveDuration {
    PositiveDuration::from_str(DEFAULT_RELAX_C1_SLACK).unwrap()
}

pub fn default_min_nb_of_paths() -> usize {
    usize::from_str(DEFAULT_MIN_NB_OF_PATHS).unwrap()
}

impl Default for RequestParams {
    fn default() -> Self {
        Self {
            profile: ProfileType::default(),
            max_nb_of_transfers: default_max_nb_of_transfers(),
            search_window: None,
            iteration_step: default_iteration_step(),
            max_journey_duration: default_max_journey_duration(),
            board_slack: default_board_slack(),
            alight_slack: default_alight_slack(),
            transfer_slack: default_transfer_slack(),
            board_cost: default_board_cost(),
            transfer_cost: default_transfer_cost(),
            wait_reluctance: default_wait_reluctance(),
            walk_reluctance: default_walk_reluctance(),
            relax_c1_ratio: default_relax_c1_ratio(),
            relax_c1_slack: default_relax_c1_slack(),
            min_nb_of_paths: default_min_nb_of_paths(),
            destination_pruning: false,
        }
    }
}

impl RequestParams {
    pub fn engine_params(&self) -> raptor::RequestParams {
        raptor::RequestParams {
            max_nb_of_transfers: self.max_nb_of_transfers,
            search_window: self.search_window,
            iteration_step: self.iteration_step,
            max_journey_duration: self.max_journey_duration,
            board_slack: self.board_slack,
            alight_slack: self.alight_slack,
            transfer_slack: self.transfer_slack,
        }
    }

    pub fn cost_params(&self) -> CostParams {
        CostParams {
            board_cost: self.board_cost,
            transfer_cost: self.transfer_cost,
            wait_reluctance: self.wait_reluctance,
            transit_reluctances: default_transit_reluctances(),
            walk_reluctance: self.walk_reluctance,
        }
    }

    /// The slack is converted to a cost with a unit reluctance
    pub fn relax_c1(&self) -> Result<RelaxFunction, BadRequest> {
        RelaxFunction::new(
            self.relax_c1_ratio,
            duration_to_cost(self.relax_c1_slack, 1.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_partial_json() {
        let params: RequestParams =
            serde_json::from_str(r#"{"profile": "standard", "board_slack": "00:01:00"}"#).unwrap();
        assert_eq!(params.profile, ProfileType::Standard);
        assert_eq!(params.board_slack, PositiveDuration::from_seconds(60));
        assert_eq!(params.max_nb_of_transfers, default_max_nb_of_transfers());
        assert!(params.relax_c1().unwrap().is_normal());
    }

    #[test]
    fn parse_command_line() {
        let params = RequestParams::from_iter(&[
            "raptor_cli",
            "--relax_c1_ratio",
            "1.5",
            "--search_window",
            "01:00:00",
            "--destination_pruning",
        ]);
        assert_eq!(params.search_window, Some(PositiveDuration::from_hms(1, 0, 0)));
        assert!(params.destination_pruning);
        assert_eq!(params.relax_c1().unwrap().ratio(), 1.5);
        assert_eq!(params.profile, ProfileType::MultiCriteria);
    }

    #[test]
    fn invalid_relax_ratio() {
        let params = RequestParams {
            relax_c1_ratio: 0.5,
            ..RequestParams::default()
        };
        assert!(params.relax_c1().is_err());
    }
}
