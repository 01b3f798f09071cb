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
#![feature(test)]

#[path = "../tests/utils/mod.rs"]
mod utils;

extern crate test;
use launch::config::ProfileType;
use launch::raptor::modelbuilder::TransitDataBuilder;
use launch::raptor::TransitData;
use test::Bencher;
use utils::{build_and_solve, Config};

fn network() -> TransitData {
    TransitDataBuilder::default()
        .trip("toto", |trip| {
            trip.st("A", "10:00:00").st("B", "10:05:00").st("C", "10:10:00");
        })
        .trip("tutu", |trip| {
            trip.st("A", "10:05:00").st("B", "10:10:00").st("C", "10:20:00");
        })
        .trip("tata", |trip| {
            trip.st("E", "10:05:00").st("F", "10:20:00").st("G", "10:30:00");
        })
        .transfer("B", "F", "00:02:00")
        .build()
        .unwrap()
}

fn bench_profile(bencher: &mut Bencher, profile: ProfileType) {
    let data = network();
    let mut config = Config::new("20200101T095900", "A", "G");
    config.request_params.profile = profile;

    bencher.iter(|| {
        build_and_solve(&data, &config).unwrap();
    });
}

#[bench]
fn routing_standard_bench(bencher: &mut Bencher) {
    bench_profile(bencher, ProfileType::Standard);
}

#[bench]
fn routing_multi_criteria_bench(bencher: &mut Bencher) {
    bench_profile(bencher, ProfileType::MultiCriteria);
}
