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

//! Fluent construction of a `TransitData`, mostly used by tests.
//!
//! ```
//! # use raptor::modelbuilder::TransitDataBuilder;
//! # use raptor::traits::TransitDataProvider;
//!
//! # fn main() {
//! let data = TransitDataBuilder::default()
//!     .route("R1", |route| route.mode = "Bus".to_string())
//!     .trip("R1-1", |trip| {
//!         trip.route("R1")
//!             .st("A", "10:00:00")
//!             .st("B", "10:10:00");
//!     })
//!     .transfer("B", "C", "00:02:00")
//!     .build()
//!     .unwrap();
//! assert_eq!(data.nb_of_stops(), 3);
//! assert_eq!(data.nb_of_patterns(), 1);
//! # }
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::config::cost_params::default_walk_reluctance;
use crate::engine::cost::duration_to_cost;
use crate::time::{PositiveDuration, SecondsSinceDayStart, TimeParseError};
use crate::traits::{Pattern, Stop};
use crate::transit_data::{TransitData, TransitDataError, Trip};

const DEFAULT_ROUTE_ID: &str = "default_route";
const DEFAULT_MODE: &str = "Bus";

#[derive(Debug, Clone)]
pub enum ModelBuilderError {
    UnknownRoute(String),
    UnknownStop(String),
    InvalidTime(TimeParseError),
    InvalidData(TransitDataError),
}

impl std::error::Error for ModelBuilderError {}

impl fmt::Display for ModelBuilderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ModelBuilderError::UnknownRoute(route) => write!(f, "Unknown route {}", route),
            ModelBuilderError::UnknownStop(stop) => write!(f, "Unknown stop {}", stop),
            ModelBuilderError::InvalidTime(error) => write!(f, "Invalid time : {}", error),
            ModelBuilderError::InvalidData(error) => write!(f, "Invalid data : {}", error),
        }
    }
}

impl From<TimeParseError> for ModelBuilderError {
    fn from(error: TimeParseError) -> Self {
        ModelBuilderError::InvalidTime(error)
    }
}

impl From<TransitDataError> for ModelBuilderError {
    fn from(error: TransitDataError) -> Self {
        ModelBuilderError::InvalidData(error)
    }
}

#[derive(Debug, Clone)]
pub struct Route {
    pub mode: String,
}

impl Default for Route {
    fn default() -> Self {
        Self {
            mode: DEFAULT_MODE.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StopTime {
    pub arrival: SecondsSinceDayStart,
    pub departure: SecondsSinceDayStart,
    pub board_allowed: bool,
    pub alight_allowed: bool,
}

#[derive(Debug, Clone)]
struct TripInfo {
    name: String,
    route: String,
    transit_reluctance_index: usize,
    priority_group: u32,
    stop_times: Vec<(String, StopTime)>,
}

struct TransferInfo {
    from: String,
    to: String,
    duration: PositiveDuration,
    c1: Option<i32>,
}

/// Builder used to easily create a `TransitData`.
///
/// Stops are created the first time they are named. Trips of the same route
/// that serve the same stops with the same boarding and alighting permissions
/// end up in the same pattern.
pub struct TransitDataBuilder {
    stops: Vec<String>,
    routes: HashMap<String, Route>,
    trips: Vec<TripInfo>,
    transfers: Vec<TransferInfo>,
    stop_costs: Vec<(String, i32)>,
    walk_reluctance: f64,
    errors: Vec<ModelBuilderError>,
}

/// Builder used to fill a trip, see `TransitDataBuilder::trip`.
pub struct TripBuilder<'a> {
    model: &'a mut TransitDataBuilder,
    trip_idx: usize,
}

impl Default for TransitDataBuilder {
    fn default() -> Self {
        let mut routes = HashMap::new();
        routes.insert(DEFAULT_ROUTE_ID.to_string(), Route::default());
        Self {
            stops: Vec::new(),
            routes,
            trips: Vec::new(),
            transfers: Vec::new(),
            stop_costs: Vec::new(),
            walk_reluctance: default_walk_reluctance(),
            errors: Vec::new(),
        }
    }
}

impl TransitDataBuilder {
    /// Declares a stop. Useful for stops only reached by transfers,
    /// or to control the stop indexes.
    pub fn stop(mut self, name: &str) -> Self {
        self.find_or_create_stop(name);
        self
    }

    /// Add a new Route, or change an existing one
    pub fn route<F>(mut self, id: &str, route_initer: F) -> Self
    where
        F: FnOnce(&mut Route),
    {
        let route = self.routes.entry(id.to_string()).or_default();
        route_initer(route);
        self
    }

    /// Add a new trip.
    ///
    /// ```
    /// # use raptor::modelbuilder::TransitDataBuilder;
    ///
    /// # fn main() {
    /// let data = TransitDataBuilder::default()
    ///     .trip("toto", |trip| {
    ///         trip.reluctance_index(1)
    ///             .st("A", "10:00:00")
    ///             .st_mut("B", "10:30:00", "10:31:00", |st| st.board_allowed = false)
    ///             .st("C", "11:00:00");
    ///     })
    ///     .build();
    /// assert!(data.is_ok());
    /// # }
    /// ```
    pub fn trip<F>(mut self, name: &str, trip_initer: F) -> Self
    where
        F: FnOnce(TripBuilder),
    {
        self.trips.push(TripInfo {
            name: name.to_string(),
            route: DEFAULT_ROUTE_ID.to_string(),
            transit_reluctance_index: 0,
            priority_group: 0,
            stop_times: Vec::new(),
        });
        let trip_idx = self.trips.len() - 1;
        trip_initer(TripBuilder {
            model: &mut self,
            trip_idx,
        });
        self
    }

    /// Add a walking transfer. Its cost is the duration weighted by the walk reluctance.
    pub fn transfer(mut self, from: &str, to: &str, duration: impl IntoDuration) -> Self {
        self.push_transfer(from, to, duration, None);
        self
    }

    pub fn transfer_with_cost(
        mut self,
        from: &str,
        to: &str,
        duration: impl IntoDuration,
        c1: i32,
    ) -> Self {
        self.push_transfer(from, to, duration, Some(c1));
        self
    }

    /// Extra cost to board or alight at `stop`
    pub fn stop_cost(mut self, stop: &str, c1: i32) -> Self {
        self.stop_costs.push((stop.to_string(), c1));
        self
    }

    pub fn walk_reluctance(mut self, walk_reluctance: f64) -> Self {
        self.walk_reluctance = walk_reluctance;
        self
    }

    fn push_transfer(
        &mut self,
        from: &str,
        to: &str,
        duration: impl IntoDuration,
        c1: Option<i32>,
    ) {
        match duration.into_duration() {
            Ok(duration) => self.transfers.push(TransferInfo {
                from: from.to_string(),
                to: to.to_string(),
                duration,
                c1,
            }),
            Err(error) => self.errors.push(error.into()),
        }
    }

    fn find_or_create_stop(&mut self, name: &str) -> Stop {
        let idx = match self.stops.iter().position(|stop| stop == name) {
            Some(idx) => idx,
            None => {
                self.stops.push(name.to_string());
                self.stops.len() - 1
            }
        };
        Stop::new(idx)
    }

    fn find_stop(&self, name: &str) -> Result<Stop, ModelBuilderError> {
        self.stops
            .iter()
            .position(|stop| stop == name)
            .map(Stop::new)
            .ok_or_else(|| ModelBuilderError::UnknownStop(name.to_string()))
    }

    /// Consume the builder to create a `TransitData`
    pub fn build(mut self) -> Result<TransitData, ModelBuilderError> {
        if let Some(error) = self.errors.pop() {
            return Err(error);
        }
        // stops only named in transfers or costs are created too
        let named_stops: Vec<String> = self
            .transfers
            .iter()
            .flat_map(|transfer| vec![transfer.from.clone(), transfer.to.clone()])
            .chain(self.stop_costs.iter().map(|(stop, _)| stop.clone()))
            .collect();
        for stop in named_stops.iter() {
            self.find_or_create_stop(stop);
        }

        let mut patterns: Vec<(Pattern, Vec<Trip>)> = Vec::new();
        for trip_info in self.trips.iter() {
            let route = self
                .routes
                .get(&trip_info.route)
                .ok_or_else(|| ModelBuilderError::UnknownRoute(trip_info.route.clone()))?;
            let mut stops = Vec::with_capacity(trip_info.stop_times.len());
            for (stop, _) in trip_info.stop_times.iter() {
                stops.push(self.find_stop(stop)?);
            }
            let mut pattern = Pattern::new(&trip_info.route, &route.mode, stops);
            pattern.board_allowed = stop_time_flags(trip_info, |st| st.board_allowed);
            pattern.alight_allowed = stop_time_flags(trip_info, |st| st.alight_allowed);

            let mut trip = Trip::new(
                &trip_info.name,
                trip_info.stop_times.iter().map(|(_, st)| st.arrival).collect(),
                trip_info.stop_times.iter().map(|(_, st)| st.departure).collect(),
            );
            trip.transit_reluctance_index = trip_info.transit_reluctance_index;
            trip.priority_group = trip_info.priority_group;

            let same_pattern = patterns.iter_mut().find(|(other, _)| {
                other.name == pattern.name
                    && other.stops == pattern.stops
                    && other.board_allowed == pattern.board_allowed
                    && other.alight_allowed == pattern.alight_allowed
            });
            match same_pattern {
                Some((_, trips)) => trips.push(trip),
                None => patterns.push((pattern, vec![trip])),
            }
        }

        let mut data = TransitData::new(self.stops.clone());
        for (pattern, trips) in patterns {
            data.add_pattern(pattern, trips)?;
        }
        for transfer in self.transfers.iter() {
            let from = self.find_stop(&transfer.from)?;
            let to = self.find_stop(&transfer.to)?;
            let c1 = transfer
                .c1
                .unwrap_or_else(|| duration_to_cost(transfer.duration, self.walk_reluctance));
            data.add_transfer(from, to, transfer.duration, c1)?;
        }
        for (stop, c1) in self.stop_costs.iter() {
            data.set_stop_board_alight_cost(self.find_stop(stop)?, *c1)?;
        }
        Ok(data)
    }
}

fn stop_time_flags<F>(trip: &TripInfo, flag: F) -> Vec<bool>
where
    F: Fn(&StopTime) -> bool,
{
    trip.stop_times.iter().map(|(_, st)| flag(st)).collect()
}

impl<'a> TripBuilder<'a> {
    /// Add a stop time where the vehicle arrives and departs at the same time
    pub fn st(self, name: &str, time: impl IntoTime) -> Self {
        let time = time.into_time();
        self.stop_time(name, time.clone(), time, |_| {})
    }

    pub fn st_mut<F>(
        self,
        name: &str,
        arrival: impl IntoTime,
        departure: impl IntoTime,
        st_muter: F,
    ) -> Self
    where
        F: FnOnce(&mut StopTime),
    {
        self.stop_time(name, arrival.into_time(), departure.into_time(), st_muter)
    }

    /// Set the route of the trip. The route is created with a default mode if needed.
    pub fn route(self, id: &str) -> Self {
        self.model.routes.entry(id.to_string()).or_default();
        self.model.trips[self.trip_idx].route = id.to_string();
        self
    }

    pub fn reluctance_index(self, transit_reluctance_index: usize) -> Self {
        self.model.trips[self.trip_idx].transit_reluctance_index = transit_reluctance_index;
        self
    }

    pub fn priority_group(self, priority_group: u32) -> Self {
        self.model.trips[self.trip_idx].priority_group = priority_group;
        self
    }

    fn stop_time<F>(
        self,
        name: &str,
        arrival: Result<SecondsSinceDayStart, TimeParseError>,
        departure: Result<SecondsSinceDayStart, TimeParseError>,
        st_muter: F,
    ) -> Self
    where
        F: FnOnce(&mut StopTime),
    {
        let (arrival, departure) = match (arrival, departure) {
            (Ok(arrival), Ok(departure)) => (arrival, departure),
            (Err(error), _) | (_, Err(error)) => {
                self.model.errors.push(error.into());
                return self;
            }
        };
        self.model.find_or_create_stop(name);
        let mut stop_time = StopTime {
            arrival,
            departure,
            board_allowed: true,
            alight_allowed: true,
        };
        st_muter(&mut stop_time);
        self.model.trips[self.trip_idx]
            .stop_times
            .push((name.to_string(), stop_time));
        self
    }
}

pub trait IntoTime {
    fn into_time(&self) -> Result<SecondsSinceDayStart, TimeParseError>;
}

impl IntoTime for SecondsSinceDayStart {
    fn into_time(&self) -> Result<SecondsSinceDayStart, TimeParseError> {
        Ok(*self)
    }
}

impl IntoTime for &str {
    fn into_time(&self) -> Result<SecondsSinceDayStart, TimeParseError> {
        self.parse()
    }
}

pub trait IntoDuration {
    fn into_duration(&self) -> Result<PositiveDuration, TimeParseError>;
}

impl IntoDuration for PositiveDuration {
    fn into_duration(&self) -> Result<PositiveDuration, TimeParseError> {
        Ok(*self)
    }
}

impl IntoDuration for &str {
    fn into_duration(&self) -> Result<PositiveDuration, TimeParseError> {
        self.parse()
    }
}
