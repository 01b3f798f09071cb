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

mod utils;

use std::fs;

use anyhow::Error;
use launch::config::LaunchParams;
use launch::raptor::TransitDataProvider;
use launch::read::read_network;
use utils::{build_and_solve, duration, time, Config};

const NETWORK: &str = r#"{
    "routes": [
        {"id": "bus", "mode": "Bus"},
        {"id": "tram", "mode": "Tram"}
    ],
    "trips": [
        {
            "name": "bus-1",
            "route": "bus",
            "stop_times": [
                {"stop": "A", "arrival": "10:00:00"},
                {"stop": "B", "arrival": "10:10:00", "departure": "10:11:00"},
                {"stop": "C", "arrival": "10:20:00"}
            ]
        },
        {
            "name": "tram-1",
            "route": "tram",
            "stop_times": [
                {"stop": "D", "arrival": "10:25:00"},
                {"stop": "E", "arrival": "10:40:00", "board": false}
            ]
        }
    ],
    "transfers": [{"from": "C", "to": "D", "duration": "00:03:00"}]
}"#;

#[test]
fn test_read_and_route() -> Result<(), Error> {
    let _log_guard = launch::logger::init_test_logger();

    let data = read_network(NETWORK.as_bytes(), duration("00:01:00"))?;
    assert_eq!(data.nb_of_stops(), 5);
    assert_eq!(data.nb_of_patterns(), 2);
    assert_eq!(data.nb_of_transfers(), 1);

    let config = Config::new("20210615T100000", "A", "E");
    let response = build_and_solve(&data, &config)?;

    assert_eq!(response.paths.len(), 1);
    let path = &response.paths[0];
    assert_eq!(path.nb_of_transfers, 1);
    assert_eq!(path.start_time, time("10:00:00"));
    assert_eq!(path.end_time, time("10:40:00"));

    Ok(())
}

#[test]
fn test_read_from_file() -> Result<(), Error> {
    let _log_guard = launch::logger::init_test_logger();

    let path = std::env::temp_dir().join("raptor_read_network_test.json");
    fs::write(&path, NETWORK)?;
    let data = launch::read(&LaunchParams::new(path.clone()));
    fs::remove_file(&path)?;

    assert_eq!(data?.nb_of_trips(), 2);

    let missing = LaunchParams::new(std::env::temp_dir().join("raptor_missing_network.json"));
    assert!(launch::read(&missing).is_err());

    Ok(())
}

#[test]
fn test_invalid_network() -> Result<(), Error> {
    let _log_guard = launch::logger::init_test_logger();

    // the vehicle goes back in time
    let network = r#"{
        "trips": [
            {
                "name": "bad",
                "stop_times": [
                    {"stop": "A", "arrival": "10:00:00"},
                    {"stop": "B", "arrival": "09:00:00"}
                ]
            }
        ]
    }"#;
    assert!(read_network(network.as_bytes(), duration("00:01:00")).is_err());

    Ok(())
}
