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

#![allow(dead_code)]

use anyhow::{format_err, Error};
use launch::config;
use launch::datetime::{parse_datetime, DateTimeRepresent};
use launch::raptor::tracing::debug;
use launch::raptor::{
    AccessEgress, PositiveDuration, RaptorResponse, SecondsSinceDayStart, Stop, TransitData,
};
use launch::solver::{self, RequestInput};

pub struct Config {
    pub request_params: config::RequestParams,

    /// formatted like 20200101T085900
    pub datetime: String,

    pub datetime_represent: DateTimeRepresent,

    /// name of the start stop, and walking duration to reach it
    pub start: (String, PositiveDuration),

    /// name of the end stop, and walking duration from it
    pub end: (String, PositiveDuration),
}

impl Config {
    pub fn new(datetime: &str, start: &str, end: &str) -> Self {
        Config {
            request_params: Default::default(),
            datetime: datetime.to_string(),
            datetime_represent: Default::default(),
            start: (start.to_string(), PositiveDuration::zero()),
            end: (end.to_string(), PositiveDuration::zero()),
        }
    }

    pub fn with_fallbacks(mut self, access: &str, egress: &str) -> Self {
        self.start.1 = duration(access);
        self.end.1 = duration(egress);
        self
    }
}

fn make_request_from_config(config: &Config) -> Result<RequestInput, Error> {
    Ok(RequestInput {
        datetime: parse_datetime(&config.datetime)?,
        datetime_represent: config.datetime_represent,
        departures_stop_point_and_fallback_duration: vec![config.start.clone()],
        arrivals_stop_point_and_fallback_duration: vec![config.end.clone()],
    })
}

pub fn build_and_solve(data: &TransitData, config: &Config) -> Result<RaptorResponse, Error> {
    let request_input = make_request_from_config(config)?;
    let response = solver::solve_request(data, &request_input, &config.request_params)?;
    for path in response.paths.iter() {
        debug!("{}", path);
    }
    Ok(response)
}

pub fn time(time: &str) -> SecondsSinceDayStart {
    time.parse().expect("invalid time format")
}

pub fn duration(duration: &str) -> PositiveDuration {
    duration.parse().expect("invalid duration format")
}

pub fn stop(data: &TransitData, name: &str) -> Result<Stop, Error> {
    data.stop_idx(name)
        .ok_or_else(|| format_err!("stop {} not found", name))
}

/// A walking leg from the origin to `name`, or from `name` to the destination
pub fn walk(data: &TransitData, name: &str, walk_duration: &str) -> Result<AccessEgress, Error> {
    Ok(AccessEgress::walk(
        stop(data, name)?,
        duration(walk_duration),
        config::request_params::default_walk_reluctance(),
    ))
}
