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

use anyhow::Error;
use launch::logger::init_test_logger;
use launch::range_raptor::engine::access_egress::AccessEgress;
use launch::range_raptor::engine::cost::CostCalculator;
use launch::range_raptor::engine::search_window::SearchWindowCalculator;
use launch::range_raptor::{
    ConfigError, PositiveDuration, RaptorTuningParameters, SearchContext, SearchDirection,
    SearchParams, SearchProfile, SearchRequest,
};
use launch::LaunchParams;
use rstest::{fixture, rstest};
use utils::{time, Network, NetworkBuilder};

#[fixture]
fn network() -> Network {
    NetworkBuilder::default()
        .vj("early", |vj| {
            vj.route("1")
                .st("A", "09:58:00", "09:58:00")
                .st("B", "10:05:00", "10:05:00")
                .st("C", "10:10:00", "10:10:00");
        })
        .vj("toto", |vj| {
            vj.route("1")
                .st("A", "10:01:00", "10:01:00")
                .st("B", "10:08:00", "10:08:00")
                .st("C", "10:13:00", "10:13:00");
        })
        .vj("late", |vj| {
            vj.route("1")
                .st("A", "10:05:00", "10:05:00")
                .st("B", "10:12:00", "10:12:00")
                .st("C", "10:17:00", "10:17:00");
        })
        .vj("tata", |vj| {
            vj.route("2")
                .st("C", "10:20:00", "10:20:00")
                .st("D", "10:30:00", "10:30:00");
        })
        .stop("Origin")
        .build()
        .unwrap()
}

fn walk(stop: usize, seconds: u32) -> AccessEgress {
    AccessEgress::walk(stop, PositiveDuration::from_seconds(seconds))
}

#[rstest]
fn forward_search_boards_first_trip_after_access(network: Network) -> Result<(), Error> {
    let _log_guard = init_test_logger();

    let request = SearchRequest::new(SearchParams::depart_after(time("10:00:00")))
        .with_access_paths(vec![walk(network.stop_idx("A"), 30)])
        .with_egress_paths(vec![walk(network.stop_idx("C"), 60)]);
    let mut context = SearchContext::new(request, RaptorTuningParameters::default(), &network.data)?;

    context.route_search_start();
    let minutes: Vec<i32> = context.iteration_minutes().collect();
    assert_eq!(minutes, vec![time("10:00:00")]);
    context.setup_iteration(minutes[0]);

    let access = &context.access_paths().arrived_on_street_by_num_of_rides(0)[0];
    let arrival_at_a = context
        .calculator()
        .plus_duration(minutes[0], access.duration_in_seconds());

    let round = context.next_round();
    assert_eq!(round, Some(1));
    let board_slack = context.slack_provider().board_slack(0);
    let board_time = context
        .calculator()
        .earliest_board_time(arrival_at_a, board_slack);
    let event = context
        .trip_search(network.pattern_idx("1"))
        .search(board_time, 0, None)
        .expect("a trip should be boarded");
    assert_eq!(event.time, time("10:01:00"));

    let alight_time = context.calculator().stop_arrival_time(
        event.trip,
        2,
        context.slack_provider().alight_slack(0),
    );
    assert_eq!(alight_time, time("10:13:00"));
    assert!(!context.calculator().exceeds_time_limit(alight_time));

    let leg = context.recover_trip_times(event.trip, network.stop_idx("A"), network.stop_idx("C"), alight_time)?;
    assert_eq!((leg.board_stop_pos, leg.alight_stop_pos), (0, 2));

    context.round_complete(true);
    context.iteration_complete();
    Ok(())
}

#[rstest]
fn reverse_search_mirrors_forward_search(network: Network) -> Result<(), Error> {
    let _log_guard = init_test_logger();

    let request = SearchRequest::new(SearchParams::arrive_before(time("10:15:00")))
        .with_direction(SearchDirection::Reverse)
        .with_access_paths(vec![walk(network.stop_idx("A"), 30)])
        .with_egress_paths(vec![walk(network.stop_idx("C"), 60)]);
    let mut context = SearchContext::new(request, RaptorTuningParameters::default(), &network.data)?;

    // the reverse search starts from the destination
    assert_eq!(context.access_paths().stops(), vec![network.stop_idx("C")]);

    context.route_search_start();
    context.setup_iteration(time("10:15:00"));
    let egress = &context.access_paths().arrived_on_street_by_num_of_rides(0)[0];
    let arrival_at_c = context
        .calculator()
        .plus_duration(time("10:15:00"), egress.duration_in_seconds());
    assert_eq!(arrival_at_c, time("10:14:00"));

    assert_eq!(context.next_round(), Some(1));
    let event = context
        .trip_search(network.pattern_idx("1"))
        .search(arrival_at_c, 2, None)
        .expect("a trip should be alighted");
    assert_eq!(event.time, time("10:13:00"));

    let departure_from_a = context.calculator().stop_arrival_time(event.trip, 0, 0);
    assert_eq!(departure_from_a, time("10:01:00"));

    let leg = context.recover_trip_times(
        event.trip,
        network.stop_idx("A"),
        network.stop_idx("C"),
        departure_from_a,
    )?;
    assert_eq!((leg.board_stop_pos, leg.alight_stop_pos), (0, 2));
    Ok(())
}

#[rstest]
#[case(SearchProfile::Standard, 1)]
#[case(SearchProfile::BestTime, 1)]
#[case(SearchProfile::MultiCriteria, 2)]
fn access_legs_are_reduced_for_single_arrival_profiles(
    network: Network,
    #[case] profile: SearchProfile,
    #[case] expected_legs: usize,
) -> Result<(), Error> {
    let _log_guard = init_test_logger();

    let stop_a = network.stop_idx("A");
    let request = SearchRequest::new(SearchParams::depart_after(time("10:00:00")))
        .with_profile(profile)
        .with_access_paths(vec![walk(stop_a, 60), walk(stop_a, 120).with_c1(0)]);
    let context = SearchContext::new(request, RaptorTuningParameters::default(), &network.data)?;
    assert_eq!(context.access_paths().list_all().len(), expected_legs);
    Ok(())
}

#[rstest]
fn multi_criteria_costs_follow_the_rounds(network: Network) -> Result<(), Error> {
    let _log_guard = init_test_logger();

    let launch_params = LaunchParams::default();
    let request = launch_params
        .search_request(SearchParams::depart_after(time("10:00:00")))
        .with_profile(SearchProfile::MultiCriteria);
    let mut context = SearchContext::new(request, launch_params.tuning, &network.data)?;

    context.setup_iteration(time("10:00:00"));
    context.next_round();
    let first_ride = context
        .cost_calculator()
        .map(|costs| costs.transit_arrival_cost(300, 600));
    context.round_complete(false);
    context.next_round();
    let second_ride = context
        .cost_calculator()
        .map(|costs| costs.transit_arrival_cost(300, 600));

    assert_eq!(first_ride, Some((600 + 600) * 100));
    assert_eq!(second_ride, Some((300 + 600 + 600) * 100));
    Ok(())
}

#[rstest]
fn search_window_then_context(network: Network) -> Result<(), Error> {
    let _log_guard = init_test_logger();

    let launch_params = LaunchParams::default();
    let search_params = SearchWindowCalculator::new(&launch_params.search_window)
        .with_heuristics(20 * 60)
        .with_search_params(&SearchParams::depart_after(time("10:00:00")))
        .calculate()?;
    // 40 minutes + 0.5 * 20 minutes, rounded to 10 minutes
    assert_eq!(search_params.search_window_in_seconds, Some(50 * 60));
    assert_eq!(search_params.latest_arrival_time, Some(time("11:10:00")));

    let context = SearchContext::new(
        SearchRequest::new(search_params),
        launch_params.tuning,
        &network.data,
    )?;
    let minutes: Vec<i32> = context.iteration_minutes().collect();
    assert_eq!(minutes.len(), 50);
    assert_eq!(minutes.first(), Some(&time("10:49:00")));
    assert_eq!(minutes.last(), Some(&time("10:00:00")));
    Ok(())
}

#[rstest]
fn round_tracker_stops_after_additional_transfers(network: Network) -> Result<(), Error> {
    let _log_guard = init_test_logger();

    let search_params = SearchParams::depart_after(time("10:00:00"))
        .with_max_number_of_transfers(4)
        .with_number_of_additional_transfers(1);
    let mut context = SearchContext::new(
        SearchRequest::new(search_params),
        RaptorTuningParameters::default(),
        &network.data,
    )?;

    context.setup_iteration(time("10:00:00"));
    let mut rounds = Vec::new();
    while let Some(round) = context.next_round() {
        rounds.push(round);
        let destination_reached = round == 2;
        context.round_complete(destination_reached);
    }
    assert_eq!(rounds, vec![1, 2, 3, 4]);
    Ok(())
}

#[rstest]
fn missing_time_bound_is_a_config_error(network: Network) {
    let _log_guard = init_test_logger();

    let request = SearchRequest::new(SearchParams::depart_after(time("10:00:00")))
        .with_direction(SearchDirection::Reverse);
    let result = SearchContext::new(request, RaptorTuningParameters::default(), &network.data);
    assert_eq!(result.err(), Some(ConfigError::LatestArrivalTimeNotSet));
}

#[rstest]
fn zero_binary_search_threshold_is_a_config_error(network: Network) -> Result<(), Error> {
    let _log_guard = init_test_logger();

    let launch_params =
        LaunchParams::from_json_str(r#"{ "tuning": { "scheduled_trip_binary_search_threshold": 0 } }"#)?;
    let request = launch_params.search_request(SearchParams::depart_after(time("10:00:00")));
    let result = SearchContext::new(request, launch_params.tuning, &network.data);
    assert_eq!(
        result.err(),
        Some(ConfigError::NonPositiveValue {
            name: "scheduled trip binary search threshold",
            value: 0
        })
    );
    Ok(())
}
