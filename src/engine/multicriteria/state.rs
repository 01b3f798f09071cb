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

use std::sync::Arc;

use crate::debug::SearchEventListener;
use crate::engine::calculator::TransitCalculator;
use crate::engine::cost::{CostCalculator, DominanceFunction};
use crate::engine::multicriteria::arrival::{
    ArrivalComparator, ArrivalIdx, ArrivalKind, McStopArrival,
};
use crate::engine::multicriteria::path_mapper::{DestinationArrival, PathMapper};
use crate::engine::multicriteria::pattern_ride::{PatternRide, PatternRideComparator};
use crate::engine::multicriteria::stop_arrivals::McStopArrivals;
use crate::engine::pareto_set::ParetoSet;
use crate::engine::pruning::DestinationPruning;
use crate::engine::summary::StopArrivals;
use crate::engine::worker::RoutingStrategy;
use crate::path::{Path, PathComparator};
use crate::request::{Profile, RaptorRequest};
use crate::time::{PositiveDuration, SecondsSinceDayStart};
use crate::traits::{AccessEgress, PatternIdx, Stop, TransitDataProvider, TripSchedule};

type Time = SecondsSinceDayStart;

// rejects arrivals that cannot be part of a result
struct ArrivalFilter {
    pruning: Option<DestinationPruning>,
    max_journey_duration: PositiveDuration,
    iteration_departure_time: Time,
}

impl ArrivalFilter {
    fn reject(&self, arrival: &McStopArrival, calculator: &TransitCalculator) -> bool {
        let duration =
            calculator.duration_between(self.iteration_departure_time, arrival.arrival_time);
        if duration > self.max_journey_duration {
            return true;
        }
        match &self.pruning {
            Some(pruning) => pruning.reject(
                arrival.stop,
                arrival.round(),
                arrival.arrival_time,
                calculator,
            ),
            None => false,
        }
    }
}

/// Range raptor state keeping, at each stop, the pareto set of arrivals
/// (time, number of legs, and generalized cost for the multi criteria profile).
pub struct McStrategy<'data, Data, Cost> {
    data: &'data Data,
    calculator: TransitCalculator,
    cost: Cost,
    dominance_c2: Option<DominanceFunction>,

    access_paths: Vec<AccessEgress>,
    egress_by_stop: Vec<Vec<AccessEgress>>,

    arrivals: McStopArrivals,
    rides: ParetoSet<PatternRide, PatternRideComparator>,
    destination: ParetoSet<Path, PathComparator>,
    filter: ArrivalFilter,

    event_listener: Option<Arc<dyn SearchEventListener>>,
}

impl<'data, Data, Cost> McStrategy<'data, Data, Cost>
where
    Data: TransitDataProvider,
    Cost: CostCalculator,
{
    /// `access_paths` start the search : for a reverse search,
    /// they are the egress paths of the request.
    pub fn new(
        data: &'data Data,
        request: &RaptorRequest,
        calculator: TransitCalculator,
        cost: Cost,
        access_paths: &[AccessEgress],
        egress_paths: &[AccessEgress],
        pruning: Option<DestinationPruning>,
    ) -> Self {
        let direction = calculator.direction();
        let multi_criteria = request.multi_criteria();
        let dominance_c2 = multi_criteria.dominance_c2;
        let relax_c1 = multi_criteria.relax_c1;
        let (arrival_comparator, path_comparator) = match request.profile() {
            Profile::Standard => (
                ArrivalComparator::standard(direction).with_dominance_c2(dominance_c2),
                PathComparator::standard(direction),
            ),
            Profile::MultiCriteria => (
                ArrivalComparator::multi_criteria(direction, relax_c1, dominance_c2),
                PathComparator::with_c1(direction, relax_c1),
            ),
        };
        let path_comparator = path_comparator
            .timetable(request.search_params().timetable)
            .dominance_c2(dominance_c2);

        let nb_of_stops = data.nb_of_stops();
        let mut egress_by_stop = vec![Vec::new(); nb_of_stops];
        for egress in egress_paths {
            egress_by_stop[egress.stop.idx].push(egress.clone());
        }
        let event_listener = request.event_listener().cloned();
        Self {
            data,
            cost,
            dominance_c2,
            access_paths: access_paths.to_vec(),
            egress_by_stop,
            arrivals: McStopArrivals::new(nb_of_stops, arrival_comparator, event_listener.clone()),
            rides: ParetoSet::new(PatternRideComparator::new(dominance_c2)),
            destination: ParetoSet::new(path_comparator),
            filter: ArrivalFilter {
                pruning,
                max_journey_duration: request.search_params().max_journey_duration,
                iteration_departure_time: Time::zero(),
            },
            event_listener,
            calculator,
        }
    }

    fn cache_or_prune(&mut self, arrival: McStopArrival) {
        if self.filter.reject(&arrival, &self.calculator) {
            self.arrivals.notify_pruned(&arrival);
        } else {
            self.arrivals.cache(arrival);
        }
    }

    fn arrive_at_destination(&mut self, arrival: &McStopArrival) {
        let egresses = &self.egress_by_stop[arrival.stop.idx];
        if egresses.is_empty() {
            return;
        }
        let chain = self.arrivals.chain(arrival);
        let mapper = PathMapper::new(self.data, &self.calculator, &self.access_paths);
        let iteration_departure_time = self.filter.iteration_departure_time;
        for egress in egresses.iter() {
            let (departure_time, arrival_time) =
                match self.calculator.egress_times(egress, arrival.arrival_time) {
                    Some(times) => times,
                    None => continue,
                };
            let duration = self
                .calculator
                .duration_between(iteration_departure_time, arrival_time);
            if duration > self.filter.max_journey_duration {
                continue;
            }
            let wait = arrival.arrival_time.distance(&departure_time);
            let destination = DestinationArrival {
                departure_time,
                arrival_time,
                c1: arrival.c1 + self.cost.egress_cost(egress.c1, wait),
                c2: self.dominance_c2.map(|_| arrival.c2),
            };
            let path = mapper.map(iteration_departure_time, &chain, &destination);
            match &self.event_listener {
                Some(listener) => {
                    let accepted = self.destination.add(path.clone());
                    listener.path(&path, accepted);
                }
                None => {
                    self.destination.add(path);
                }
            }
        }
    }

    pub fn stop_arrivals(&self) -> StopArrivals {
        self.arrivals.summary(&self.calculator)
    }

    pub fn path_comparator(&self) -> PathComparator {
        *self.destination.comparator()
    }

    pub fn into_paths(self) -> Vec<Path> {
        self.destination.into_vec()
    }
}

impl<'data, Data, Cost> RoutingStrategy for McStrategy<'data, Data, Cost>
where
    Data: TransitDataProvider,
    Cost: CostCalculator,
{
    fn setup_iteration(&mut self, iteration_departure_time: Time) {
        self.filter.iteration_departure_time = iteration_departure_time;
        self.arrivals.setup_iteration();
    }

    fn add_access_arrivals(&mut self) {
        let iteration_departure_time = self.filter.iteration_departure_time;
        for access_idx in 0..self.access_paths.len() {
            let access = &self.access_paths[access_idx];
            let (departure_time, arrival_time) =
                match self.calculator.access_times(access, iteration_departure_time) {
                    Some(times) => times,
                    None => continue,
                };
            let arrival = McStopArrival {
                id: ArrivalIdx::UNASSIGNED,
                stop: access.stop,
                pareto_round: 0,
                arrival_time,
                c1: access.c1,
                c2: 0,
                kind: ArrivalKind::Access {
                    access_idx,
                    departure_time,
                },
            };
            self.cache_or_prune(arrival);
        }
        self.arrivals.commit();
    }

    fn is_new_round_available(&self) -> bool {
        self.arrivals.is_new_round_available()
    }

    fn prepare_for_next_round(&mut self, _round: u8) {
        self.arrivals.prepare_for_next_round();
    }

    fn stops_touched_previous_round(&self) -> &[Stop] {
        self.arrivals.stops_touched_previous_round()
    }

    fn route_pattern(&mut self, pattern_idx: PatternIdx) {
        let data = self.data;
        let pattern = data.pattern(pattern_idx);
        let trips = data.trips(pattern_idx);
        let calculator = &self.calculator;
        let cost = &self.cost;
        let filter = &self.filter;
        let dominance_c2 = self.dominance_c2;
        let arrivals = &mut self.arrivals;
        let rides = &mut self.rides;
        rides.clear();

        for position in calculator.stop_positions(pattern.nb_of_positions()) {
            let stop = pattern.stop_at(position);
            let stop_cost = data.stop_board_alight_cost(stop);

            if !rides.is_empty() && calculator.alighting_possible(pattern, position) {
                for ride in rides.iter() {
                    let trip = &trips[ride.trip_idx];
                    let alight_time = calculator.alight_time(trip, position);
                    let ride_duration = ride.board_time.distance(&alight_time);
                    let c1 = ride.board_c1
                        + cost.transit_arrival_cost(
                            ride_duration,
                            calculator.alight_slack(),
                            stop_cost,
                            trip,
                        );
                    let arrival = McStopArrival {
                        id: ArrivalIdx::UNASSIGNED,
                        stop,
                        pareto_round: ride.pareto_round,
                        arrival_time: calculator.stop_arrival_time(alight_time),
                        c1,
                        c2: ride.c2,
                        kind: ArrivalKind::Transit {
                            previous: ride.boarded_from,
                            pattern: pattern_idx,
                            trip_idx: ride.trip_idx,
                            board_position: ride.board_position,
                            alight_position: position,
                            board_time: ride.board_time,
                            alight_time,
                        },
                    };
                    if filter.reject(&arrival, calculator) {
                        arrivals.notify_pruned(&arrival);
                    } else {
                        arrivals.cache(arrival);
                    }
                }
            }

            if !calculator.boarding_possible(pattern, position) {
                continue;
            }
            for previous in arrivals.arrivals_after_marker(stop) {
                let first_boarding = previous.is_access();
                let earliest_board_time =
                    calculator.earliest_board_time(previous.arrival_time, first_boarding);
                let (trip_idx, trip) =
                    match calculator.find_trip(trips, position, earliest_board_time, None) {
                        Some(found) => found,
                        None => continue,
                    };
                let board_time = calculator.board_time(trip, position);
                let wait = previous.arrival_time.distance(&board_time);
                let board_c1 =
                    previous.c1 + cost.boarding_cost(first_boarding, wait, stop_cost, trip);
                let c2 = match dominance_c2 {
                    Some(dominance) => dominance.merge(previous.c2, trip.priority_group()),
                    None => previous.c2,
                };
                rides.add(PatternRide {
                    boarded_from: previous.id,
                    pareto_round: previous.next_transit_pareto_round(),
                    board_position: position,
                    board_time,
                    board_c1,
                    relative_c1: PatternRide::relative_cost(
                        board_c1,
                        board_time,
                        cost.transit_factor(trip),
                        calculator.time_sign(),
                    ),
                    trip_idx,
                    trip_sort_index: trip.trip_sort_index(),
                    c2,
                });
            }
        }
    }

    fn transits_for_round_complete(&mut self) {
        let accepted = self.arrivals.commit_transits();
        for arrival in accepted.iter() {
            self.arrive_at_destination(arrival);
        }
    }

    fn transfer_to_stops(&mut self) {
        let data = self.data;
        let forward = self.calculator.is_forward();
        let stops = self.arrivals.stops_touched_current_round().to_vec();
        let mut new_arrivals = Vec::new();
        for stop in stops {
            let transfers = if forward {
                data.transfers_from(stop)
            } else {
                data.transfers_to(stop)
            };
            if transfers.is_empty() {
                continue;
            }
            let on_board_arrivals = self
                .arrivals
                .arrivals_after_marker(stop)
                .filter(|arrival| arrival.arrived_on_board());
            for previous in on_board_arrivals {
                for transfer in transfers.iter().filter(|transfer| transfer.stop != stop) {
                    let arrival_time =
                        self.calculator.plus(previous.arrival_time, transfer.duration);
                    new_arrivals.push(McStopArrival {
                        id: ArrivalIdx::UNASSIGNED,
                        stop: transfer.stop,
                        pareto_round: previous.pareto_round + 1,
                        arrival_time,
                        c1: previous.c1 + transfer.c1,
                        c2: previous.c2,
                        kind: ArrivalKind::Transfer {
                            previous: previous.id,
                            duration: transfer.duration,
                        },
                    });
                }
            }
        }
        for arrival in new_arrivals {
            self.cache_or_prune(arrival);
        }
    }

    fn transfers_for_round_complete(&mut self) {
        self.arrivals.commit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cost::DefaultCostCalculator;
    use crate::engine::worker::{RangeRaptorWorker, WorkerOutcome};
    use crate::modelbuilder::TransitDataBuilder;
    use crate::request::{AbortHandle, RaptorRequestBuilder, SearchDirection};
    use crate::transit_data::TransitData;

    // A -r1-> B ~walk~> C -r2-> D -r3-> E
    fn three_trips_network() -> TransitData {
        TransitDataBuilder::default()
            .trip("r1", |trip| {
                trip.route("r1").st("A", "10:00:00").st("B", "10:10:00");
            })
            .trip("r2", |trip| {
                trip.route("r2").st("C", "10:15:00").st("D", "10:25:00");
            })
            .trip("r3", |trip| {
                trip.route("r3").st("D", "10:30:00").st("E", "10:40:00");
            })
            .transfer("B", "C", "00:02:00")
            .build()
            .unwrap()
    }

    #[test]
    fn rounds_increase_along_each_journey() {
        let data = three_trips_network();
        let stop = |name: &str| data.stop_idx(name).unwrap();
        let zero = PositiveDuration::zero();
        let request = RaptorRequestBuilder::new()
            .earliest_departure_time(Time::from_hms(10, 0, 0))
            .search_window(PositiveDuration::from_hms(0, 2, 0))
            .access(AccessEgress::new(stop("A"), zero, 0))
            .egress(AccessEgress::new(stop("E"), zero, 0))
            .build()
            .unwrap();
        let calculator = TransitCalculator::new(SearchDirection::Forward, zero, zero, zero);
        let strategy = McStrategy::new(
            &data,
            &request,
            calculator,
            DefaultCostCalculator::new(&request.multi_criteria().cost),
            &request.search_params().access_paths,
            &request.search_params().egress_paths,
            None,
        );
        let mut worker = RangeRaptorWorker::new(
            &data,
            strategy,
            request.search_params().max_nb_of_rounds(),
            AbortHandle::new(),
            None,
        );
        let iterations = [
            Time::from_hms(10, 2, 0),
            Time::from_hms(10, 1, 0),
            Time::from_hms(10, 0, 0),
        ];
        assert_eq!(worker.route(&iterations), WorkerOutcome::Completed);
        let strategy = worker.into_strategy();

        let mut max_round = 0;
        for idx in 0..data.nb_of_stops() {
            for arrival in strategy.arrivals.arrivals(Stop::new(idx)) {
                let chain = strategy.arrivals.chain(arrival);
                for pair in chain.windows(2) {
                    assert!(pair[1].pareto_round < pair[0].pareto_round);
                    assert!(pair[1].round() <= pair[0].round());
                }
                assert!(chain.last().map_or(false, McStopArrival::is_access));
                let nb_of_transits = chain
                    .iter()
                    .filter(|arrival| arrival.arrived_on_board())
                    .count();
                assert_eq!(usize::from(arrival.round()), nb_of_transits);
                max_round = max_round.max(arrival.round());
            }
        }
        assert_eq!(max_round, 3);

        let paths = strategy.into_paths();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].nb_of_transfers, 2);
    }
}
