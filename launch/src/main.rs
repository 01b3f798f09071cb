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

use std::path::PathBuf;

use anyhow::Error;
use launch::config::launch_params::DEFAULT_TRANSFER_DURATION;
use launch::config::{self, LaunchParams};
use launch::datetime::{parse_datetime, DateTimeRepresent};
use launch::raptor::tracing::{error, info};
use launch::raptor::PositiveDuration;
use launch::solver::{self, RequestInput};
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "raptor_cli", rename_all = "snake_case")]
pub struct Options {
    /// json file describing the network
    #[structopt(long, parse(from_os_str))]
    input_data_path: PathBuf,

    /// name of the departure stop
    #[structopt(long)]
    from: String,

    /// name of the arrival stop
    #[structopt(long)]
    to: String,

    /// formatted like 20190628T163215
    #[structopt(long)]
    datetime: String,

    /// is the datetime the departure or the arrival of the journeys ?
    #[structopt(long, default_value = "departure")]
    datetime_represent: DateTimeRepresent,

    /// walking duration from the origin to the departure stop,
    /// and from the arrival stop to the destination
    #[structopt(long, default_value = "00:00:00")]
    fallback_duration: PositiveDuration,

    /// duration of the transfers given without duration in the network file
    #[structopt(long, default_value = DEFAULT_TRANSFER_DURATION)]
    default_transfer_duration: PositiveDuration,

    #[structopt(flatten)]
    request_params: config::RequestParams,
}

fn run(options: Options) -> Result<(), Error> {
    let launch_params = LaunchParams {
        input_data_path: options.input_data_path.clone(),
        default_transfer_duration: options.default_transfer_duration,
    };
    let data = launch::read(&launch_params)?;

    let request_input = RequestInput {
        datetime: parse_datetime(&options.datetime)?,
        datetime_represent: options.datetime_represent,
        departures_stop_point_and_fallback_duration: vec![(
            options.from.clone(),
            options.fallback_duration,
        )],
        arrivals_stop_point_and_fallback_duration: vec![(
            options.to.clone(),
            options.fallback_duration,
        )],
    };
    info!(
        "Searching journeys from {} to {} with {} at {}",
        options.from, options.to, options.datetime_represent, options.datetime
    );
    let response = solver::solve_request(&data, &request_input, &options.request_params)?;
    if response.is_aborted() {
        info!("The search was aborted, the journeys may not be optimal");
    }
    for path in response.paths.iter() {
        println!("{}", path);
    }
    Ok(())
}

fn main() {
    launch::logger::init_logger();
    let options = Options::from_args();
    if let Err(err) = run(options) {
        error!("{:?}", err);
        std::process::exit(1);
    }
}
