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

use std::sync::{Arc, Mutex};

use anyhow::Error;
use launch::raptor::modelbuilder::TransitDataBuilder;
use launch::raptor::{
    AbortHandle, Profile, RaptorRequestBuilder, RaptorService, SearchEventListener,
    SecondsSinceDayStart, TransitData,
};
use utils::{duration, time, walk};

// a trip from A to B every minute, from 10:00 to 10:09
fn frequent_network() -> Result<TransitData, Error> {
    let mut builder = TransitDataBuilder::default();
    for minute in 0..10 {
        builder = builder.trip(&format!("R1-{}", minute), |trip| {
            trip.route("R1")
                .st("A", SecondsSinceDayStart::from_hms(10, minute, 0))
                .st("B", SecondsSinceDayStart::from_hms(10, minute + 10, 0));
        });
    }
    Ok(builder.build()?)
}

fn request_builder(data: &TransitData) -> Result<RaptorRequestBuilder, Error> {
    let builder = RaptorRequestBuilder::new()
        .profile(Profile::Standard)
        .timetable(true)
        .earliest_departure_time(time("10:00:00"))
        .search_window(duration("00:10:00"))
        .iteration_step(duration("00:01:00"))
        .access(walk(data, "A", "00:00:00")?)
        .egress(walk(data, "B", "00:00:00")?);
    Ok(builder)
}

/// Aborts the search once a given round of a given iteration is done
struct AbortAfterRound {
    abort_handle: AbortHandle,
    iteration: usize,
    round: u8,
    iterations_started: Mutex<Vec<usize>>,
}

impl SearchEventListener for AbortAfterRound {
    fn iteration_start(&self, iteration: usize, _departure_time: SecondsSinceDayStart) {
        if let Ok(mut iterations) = self.iterations_started.lock() {
            iterations.push(iteration);
        }
    }

    fn round_complete(&self, iteration: usize, round: u8) {
        if iteration == self.iteration && round == self.round {
            self.abort_handle.abort();
        }
    }
}

#[test]
fn test_complete_search() -> Result<(), Error> {
    let _log_guard = launch::logger::init_test_logger();

    let data = frequent_network()?;
    let request = request_builder(&data)?.build()?;
    let response = RaptorService::new(&data).route(&request)?;

    assert!(!response.is_aborted());
    // each iteration keeps its own departure
    assert_eq!(response.paths.len(), 10);
    assert_eq!(response.paths[0].start_time, time("10:00:00"));
    assert_eq!(response.paths[9].start_time, time("10:09:00"));

    Ok(())
}

#[test]
fn test_abort_during_search() -> Result<(), Error> {
    let _log_guard = launch::logger::init_test_logger();

    let data = frequent_network()?;
    let abort_handle = AbortHandle::new();
    let listener = Arc::new(AbortAfterRound {
        abort_handle: abort_handle.clone(),
        iteration: 3,
        round: 1,
        iterations_started: Mutex::new(Vec::new()),
    });
    let request = request_builder(&data)?
        .abort_handle(abort_handle)
        .event_listener(listener.clone())
        .build()?;
    let response = RaptorService::new(&data).route(&request)?;

    assert!(response.is_aborted());
    assert_eq!(
        listener.iterations_started.lock().map(|it| it.clone()).ok(),
        Some(vec![1, 2, 3])
    );
    // iterations run from the latest departure time to the earliest
    assert_eq!(response.paths.len(), 3);
    for path in response.paths.iter() {
        assert!(path.iteration_departure_time >= time("10:07:00"));
    }

    Ok(())
}

#[test]
fn test_abort_before_search() -> Result<(), Error> {
    let _log_guard = launch::logger::init_test_logger();

    let data = frequent_network()?;
    let abort_handle = AbortHandle::new();
    abort_handle.abort();
    let request = request_builder(&data)?
        .abort_handle(abort_handle)
        .build()?;
    let response = RaptorService::new(&data).route(&request)?;

    assert!(response.is_aborted());
    assert!(response.paths.is_empty());

    Ok(())
}
