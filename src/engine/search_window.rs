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

use crate::config::SearchWindowParams;
use crate::request::SearchDirection;
use crate::time::{PositiveDuration, SecondsSinceDayStart};

/// Time bounds of the main search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    /// departure time of the first iteration of a forward search, arrival time
    /// of the first iteration of a reverse search
    pub start_time: SecondsSinceDayStart,
    pub search_window: PositiveDuration,
}

pub struct SearchWindowCalculator<'a> {
    params: &'a SearchWindowParams,
}

impl<'a> SearchWindowCalculator<'a> {
    pub fn new(params: &'a SearchWindowParams) -> Self {
        Self { params }
    }

    /// `min_window + coefficient * min_travel_duration`, rounded up
    /// to the step and capped by the max window.
    pub fn dynamic_window(&self, min_travel_duration: PositiveDuration) -> PositiveDuration {
        let travel_part = (f64::from(min_travel_duration.total_seconds())
            * self.params.travel_duration_coefficient)
            .round()
            .max(0.0) as u32;
        let window = (self.params.min_window + PositiveDuration::from_seconds(travel_part))
            .round_up_to(self.params.step);
        window.min(self.params.max_window)
    }

    /// Computes the start time and the window of a search in `direction`.
    ///
    /// When the window is not given, or when the start time must be derived from
    /// the other bound, `min_travel_duration` is needed and `None` is returned without it.
    pub fn calculate(
        &self,
        direction: SearchDirection,
        earliest_departure_time: Option<SecondsSinceDayStart>,
        latest_arrival_time: Option<SecondsSinceDayStart>,
        search_window: Option<PositiveDuration>,
        min_travel_duration: Option<PositiveDuration>,
    ) -> Option<SearchWindow> {
        let search_window = match search_window {
            Some(window) => window,
            None => self.dynamic_window(min_travel_duration?),
        };
        let start_time = match direction {
            SearchDirection::Forward => match earliest_departure_time {
                Some(time) => time,
                None => latest_arrival_time? - min_travel_duration? - search_window,
            },
            SearchDirection::Reverse => match latest_arrival_time {
                Some(time) => time,
                None => earliest_departure_time? + min_travel_duration? + search_window,
            },
        };
        Some(SearchWindow {
            start_time,
            search_window,
        })
    }
}
