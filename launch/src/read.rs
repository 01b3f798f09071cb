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

use std::fs::File;
use std::io::{BufReader, Read};
use std::time::SystemTime;

use anyhow::{Context, Error};
use raptor::modelbuilder::TransitDataBuilder;
use raptor::tracing::info;
use raptor::{PositiveDuration, SecondsSinceDayStart, TransitData, TransitDataProvider};
use serde::{Deserialize, Serialize};

use crate::config::LaunchParams;
use crate::timer;

/// A network stored as json.
///
/// Stops are named by the stop times and transfers using them,
/// `stops` is only needed to fix the stop indexes or to add isolated stops.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkFile {
    #[serde(default)]
    pub stops: Vec<String>,
    #[serde(default)]
    pub routes: Vec<RouteRecord>,
    pub trips: Vec<TripRecord>,
    #[serde(default)]
    pub transfers: Vec<TransferRecord>,
    #[serde(default)]
    pub stop_costs: Vec<StopCostRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteRecord {
    pub id: String,
    pub mode: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TripRecord {
    pub name: String,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub reluctance_index: usize,
    #[serde(default)]
    pub priority_group: u32,
    pub stop_times: Vec<StopTimeRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StopTimeRecord {
    pub stop: String,
    pub arrival: SecondsSinceDayStart,
    /// same as the arrival when not given
    #[serde(default)]
    pub departure: Option<SecondsSinceDayStart>,
    #[serde(default = "allowed")]
    pub board: bool,
    #[serde(default = "allowed")]
    pub alight: bool,
}

fn allowed() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransferRecord {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub duration: Option<PositiveDuration>,
    /// computed from the duration when not given
    #[serde(default)]
    pub c1: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StopCostRecord {
    pub stop: String,
    pub c1: i32,
}

pub fn read(launch_params: &LaunchParams) -> Result<TransitData, Error> {
    let path = &launch_params.input_data_path;
    let file = File::open(path)
        .with_context(|| format!("Could not open network file {}", path.display()))?;
    read_network(
        BufReader::new(file),
        launch_params.default_transfer_duration,
    )
    .with_context(|| format!("Could not read network file {}", path.display()))
}

pub fn read_network<R: Read>(
    reader: R,
    default_transfer_duration: PositiveDuration,
) -> Result<TransitData, Error> {
    let network: NetworkFile =
        serde_json::from_reader(reader).context("Badly formed network json")?;
    info!("Network file loaded");
    build_transit_data(&network, default_transfer_duration)
}

pub fn build_transit_data(
    network: &NetworkFile,
    default_transfer_duration: PositiveDuration,
) -> Result<TransitData, Error> {
    info!("Number of trips in network file : {}", network.trips.len());
    let data_timer = SystemTime::now();

    let mut builder = TransitDataBuilder::default();
    for stop in network.stops.iter() {
        builder = builder.stop(stop);
    }
    for route in network.routes.iter() {
        builder = builder.route(&route.id, |r| r.mode = route.mode.clone());
    }
    for trip in network.trips.iter() {
        builder = builder.trip(&trip.name, |trip_builder| {
            let mut trip_builder = trip_builder
                .reluctance_index(trip.reluctance_index)
                .priority_group(trip.priority_group);
            if let Some(route) = &trip.route {
                trip_builder = trip_builder.route(route);
            }
            for stop_time in trip.stop_times.iter() {
                let departure = stop_time.departure.unwrap_or(stop_time.arrival);
                trip_builder =
                    trip_builder.st_mut(&stop_time.stop, stop_time.arrival, departure, |st| {
                        st.board_allowed = stop_time.board;
                        st.alight_allowed = stop_time.alight;
                    });
            }
        });
    }
    for transfer in network.transfers.iter() {
        let duration = transfer.duration.unwrap_or(default_transfer_duration);
        builder = match transfer.c1 {
            Some(c1) => builder.transfer_with_cost(&transfer.from, &transfer.to, duration, c1),
            None => builder.transfer(&transfer.from, &transfer.to, duration),
        };
    }
    for stop_cost in network.stop_costs.iter() {
        builder = builder.stop_cost(&stop_cost.stop, stop_cost.c1);
    }
    let data = builder.build().context("Invalid network")?;

    info!("Data constructed in {} ms", timer::duration_since(data_timer));
    info!("Number of stops {} ", data.nb_of_stops());
    info!("Number of patterns {} ", data.nb_of_patterns());
    info!("Number of trips {} ", data.nb_of_trips());
    info!("Number of transfers {} ", data.nb_of_transfers());
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NETWORK: &str = r#"{
        "routes": [{"id": "R1", "mode": "Bus"}],
        "trips": [
            {
                "name": "R1-1",
                "route": "R1",
                "stop_times": [
                    {"stop": "A", "arrival": "10:00:00"},
                    {"stop": "B", "arrival": "10:10:00", "departure": "10:11:00"},
                    {"stop": "C", "arrival": "10:20:00", "board": false}
                ]
            }
        ],
        "transfers": [{"from": "C", "to": "D"}]
    }"#;

    #[test]
    fn read_json_network() {
        let data = read_network(NETWORK.as_bytes(), PositiveDuration::from_seconds(90)).unwrap();
        assert_eq!(data.nb_of_stops(), 4);
        assert_eq!(data.nb_of_patterns(), 1);
        let c = data.stop_idx("C").unwrap();
        assert_eq!(
            data.transfers_from(c)[0].duration,
            PositiveDuration::from_seconds(90)
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = read_network(
            r#"{"trips": [], "lines": []}"#.as_bytes(),
            PositiveDuration::from_seconds(60),
        );
        assert!(result.is_err());
    }
}
