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

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use raptor::{SearchDirection, SecondsSinceDayStart};

/// Is the datetime of a request the departure or the arrival of the journeys ?
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum DateTimeRepresent {
    Departure,
    Arrival,
}

impl Default for DateTimeRepresent {
    fn default() -> Self {
        DateTimeRepresent::Departure
    }
}

impl DateTimeRepresent {
    /// Departure datetimes are explored forward, arrival datetimes backward
    pub fn search_direction(&self) -> SearchDirection {
        match self {
            DateTimeRepresent::Departure => SearchDirection::Forward,
            DateTimeRepresent::Arrival => SearchDirection::Reverse,
        }
    }
}

impl std::fmt::Display for DateTimeRepresent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateTimeRepresent::Departure => write!(f, "departure"),
            DateTimeRepresent::Arrival => write!(f, "arrival"),
        }
    }
}

impl std::str::FromStr for DateTimeRepresent {
    type Err = DateTimeRepresentConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let represent = match s {
            "departure" => DateTimeRepresent::Departure,
            "arrival" => DateTimeRepresent::Arrival,
            _ => {
                return Err(DateTimeRepresentConfigError {
                    datetime_represent_name: s.to_string(),
                })
            }
        };
        Ok(represent)
    }
}

pub fn parse_datetime(string_datetime: &str) -> Result<NaiveDateTime, BadDateTime> {
    NaiveDateTime::parse_from_str(string_datetime, "%Y%m%dT%H%M%S").map_err(|_| BadDateTime {
        string_datetime: string_datetime.to_string(),
    })
}

/// The timetables are the same every day : only the time of day is used by the search
pub fn time_of_day(datetime: &NaiveDateTime) -> SecondsSinceDayStart {
    let time = datetime.time();
    SecondsSinceDayStart::from_hms(time.hour() as i32, time.minute() as i32, time.second() as i32)
}

#[derive(Debug)]
pub struct BadDateTime {
    string_datetime: String,
}

impl std::error::Error for BadDateTime {}

impl std::fmt::Display for BadDateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Unable to parse {} as a datetime. Expected format is 20190628T163215",
            self.string_datetime
        )
    }
}

#[derive(Debug)]
pub struct DateTimeRepresentConfigError {
    datetime_represent_name: String,
}

impl std::error::Error for DateTimeRepresentConfigError {}

impl std::fmt::Display for DateTimeRepresentConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Bad datetime_represent : `{}`",
            self.datetime_represent_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datetime_to_time_of_day() {
        let datetime = parse_datetime("20200101T085900").unwrap();
        assert_eq!(time_of_day(&datetime), SecondsSinceDayStart::from_hms(8, 59, 0));
        assert!(parse_datetime("2020-01-01 08:59").is_err());
    }
}
