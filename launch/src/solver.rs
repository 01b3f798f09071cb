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

use std::time::SystemTime;

use anyhow::{format_err, Error};
use chrono::NaiveDateTime;
use raptor::tracing::{debug, info};
use raptor::{
    AbortHandle, AccessEgress, PositiveDuration, RaptorRequest, RaptorRequestBuilder,
    RaptorResponse, RaptorService, Stop, TransitData,
};

use crate::config;
use crate::datetime::{time_of_day, DateTimeRepresent};
use crate::timer;

/// A request on stop names, before it is checked against the data
#[derive(Debug, Clone)]
pub struct RequestInput {
    pub datetime: NaiveDateTime,
    pub datetime_represent: DateTimeRepresent,
    pub departures_stop_point_and_fallback_duration: Vec<(String, PositiveDuration)>,
    pub arrivals_stop_point_and_fallback_duration: Vec<(String, PositiveDuration)>,
}

pub fn make_request(
    data: &TransitData,
    request_input: &RequestInput,
    request_params: &config::RequestParams,
    abort_handle: AbortHandle,
) -> Result<RaptorRequest, Error> {
    let time = time_of_day(&request_input.datetime);
    let cost_params = request_params.cost_params();
    let walk_reluctance = cost_params.walk_reluctance;
    let mut builder = RaptorRequestBuilder::new()
        .request_params(&request_params.engine_params())
        .profile(request_params.profile.into())
        .direction(request_input.datetime_represent.search_direction())
        .cost_params(cost_params)
        .relax_c1(request_params.relax_c1()?)
        .min_nb_of_paths(request_params.min_nb_of_paths)
        .destination_pruning(request_params.destination_pruning)
        .abort_handle(abort_handle);
    builder = match request_input.datetime_represent {
        DateTimeRepresent::Departure => builder.earliest_departure_time(time),
        DateTimeRepresent::Arrival => builder.latest_arrival_time(time),
    };

    for (stop_name, duration) in &request_input.departures_stop_point_and_fallback_duration {
        let stop = find_stop(data, stop_name)?;
        builder = builder.access(AccessEgress::walk(stop, *duration, walk_reluctance));
    }
    for (stop_name, duration) in &request_input.arrivals_stop_point_and_fallback_duration {
        let stop = find_stop(data, stop_name)?;
        builder = builder.egress(AccessEgress::walk(stop, *duration, walk_reluctance));
    }
    let request = builder.build()?;
    Ok(request)
}

fn find_stop(data: &TransitData, stop_name: &str) -> Result<Stop, Error> {
    data.stop_idx(stop_name)
        .ok_or_else(|| format_err!("Stop {} not found in the data", stop_name))
}

pub fn solve_request(
    data: &TransitData,
    request_input: &RequestInput,
    request_params: &config::RequestParams,
) -> Result<RaptorResponse, Error> {
    let request = make_request(data, request_input, request_params, AbortHandle::new())?;
    solve(data, &request)
}

pub fn solve(data: &TransitData, request: &RaptorRequest) -> Result<RaptorResponse, Error> {
    let compute_timer = SystemTime::now();
    let response = RaptorService::new(data).route(request)?;
    info!(
        "Search computed in {} ms, {} paths found",
        timer::duration_since(compute_timer),
        response.paths.len()
    );
    if let (Some(start_time), Some(search_window)) = (response.start_time, response.search_window)
    {
        debug!(
            "Departures explored from {} during {}",
            start_time, search_window
        );
    }
    for path in response.paths.iter() {
        debug!("{}", path);
    }
    Ok(response)
}
