//! Query and path-search tests over small built networks.

use super::*;
use crate::domain::RouteId;
use crate::sources::NetworkSources;
use crate::sources::fixtures::{complex, ids, line_network, routes, stop};

fn snapshot(network: &NetworkSources, policy: EdgePolicy) -> GraphSnapshot {
    let outcome = build_network(network, &BuildConfig::new(policy));
    assert!(outcome.failures.is_empty(), "{:?}", outcome.failures);
    outcome.snapshot
}

/// Three routes meeting in a Y: 1 runs X-Y-Z, 2 runs X-W-Z, 3 runs Y-Z.
fn y_junction() -> NetworkSources {
    line_network(&[
        ("1", vec!["X", "Y", "Z"]),
        ("2", vec!["X", "W", "Z"]),
        ("3", vec!["Y", "Z"]),
    ])
}

fn chain() -> NetworkSources {
    line_network(&[("1", vec!["101", "102", "103", "104", "105"])])
}

#[test]
fn shortest_path_counts_stations_under_adjacency() {
    let graph = snapshot(&chain(), EdgePolicy::Adjacency);

    assert_eq!(
        graph.shortest_path(&complex("101"), &complex("105")),
        Some(ids(&["101", "102", "103", "104", "105"]))
    );
    assert_eq!(
        graph.shortest_path(&complex("104"), &complex("102")),
        Some(ids(&["104", "103", "102"]))
    );
}

#[test]
fn shortest_path_counts_rides_under_all_pairs() {
    let graph = snapshot(&chain(), EdgePolicy::AllPairsForward);

    assert_eq!(
        graph.shortest_path(&complex("101"), &complex("105")),
        Some(ids(&["101", "105"]))
    );
}

#[test]
fn path_to_self_is_single_node() {
    let graph = snapshot(&chain(), EdgePolicy::Adjacency);

    assert_eq!(
        graph.shortest_path(&complex("103"), &complex("103")),
        Some(ids(&["103"]))
    );
    assert_eq!(
        graph.all_shortest_paths(&complex("103"), &complex("103")),
        vec![ids(&["103"])]
    );
}

#[test]
fn disconnected_pair_has_no_path() {
    let network = line_network(&[("1", vec!["101", "102"]), ("2", vec!["201", "202"])]);

    for policy in [EdgePolicy::Adjacency, EdgePolicy::AllPairsForward] {
        let graph = snapshot(&network, policy);
        let (a, b) = (complex("101"), complex("202"));

        assert_eq!(graph.shortest_path(&a, &b), None);
        assert!(graph.all_shortest_paths(&a, &b).is_empty());
        assert_eq!(graph.shortest_path_with_lines(&a, &b), None);
        assert_eq!(graph.directions(&a, &b), None);
        assert!(graph.all_directions(&a, &b).is_empty());
    }
}

#[test]
fn unknown_complexes_are_not_found() {
    let graph = snapshot(&chain(), EdgePolicy::Adjacency);
    let unknown = complex("999");

    assert_eq!(graph.successors(&unknown), None);
    assert_eq!(graph.shortest_path(&unknown, &complex("101")), None);
    assert_eq!(graph.shortest_path(&complex("101"), &unknown), None);
    assert!(graph.lines_at(&unknown).is_empty());
    assert!(graph.connecting_lines(&unknown, &complex("101")).is_empty());
    assert_eq!(graph.complex_id_to_name(&unknown), None);
}

#[test]
fn one_way_edges_only_run_forward_in_search() {
    // A single trip in one direction only
    let network = crate::sources::fixtures::sources(
        "stop_id,stop_name\n101,One\n102,Two\n",
        "route_id,trip_id,direction_id\n1,t,0\n",
        "trip_id,stop_id,stop_sequence\nt,101N,1\nt,102N,2\n",
        "Complex ID,Number Of Stations In Complex,GTFS Stop IDs\n101,1,101\n102,1,102\n",
    );
    let graph = snapshot(&network, EdgePolicy::AllPairsForward);

    assert!(graph.shortest_path(&complex("101"), &complex("102")).is_some());
    assert_eq!(graph.shortest_path(&complex("102"), &complex("101")), None);
    assert_eq!(graph.successors(&complex("102")), Some(vec![]));
    assert_eq!(graph.lines_at(&complex("102")), routes(&["1"]));
}

#[test]
fn directions_text_matches_format() {
    let network = line_network(&[("1", vec!["101", "102", "103"]), ("2", vec!["103", "104"])]);
    let (a, b) = (complex("101"), complex("104"));

    let adjacent = snapshot(&network, EdgePolicy::Adjacency);
    assert_eq!(
        adjacent.directions(&a, &b).unwrap(),
        "Start at 101 St (101)\n\
         Take the 1 trains to 102 St (102)\n\
         Take the 1 trains to 103 St (103)\n\
         Take the 2 trains to 104 St (104)"
    );

    let all_pairs = snapshot(&network, EdgePolicy::AllPairsForward);
    assert_eq!(
        all_pairs.directions(&a, &b).unwrap(),
        "Start at 101 St (101)\n\
         Take the 1 trains to 103 St (103)\n\
         Take the 2 trains to 104 St (104)"
    );
}

#[test]
fn hop_without_lines_renders_as_transfer() {
    let graph = snapshot(&chain(), EdgePolicy::Adjacency);
    let steps = vec![
        PathStep {
            complex: complex("101"),
            lines: Vec::new(),
        },
        PathStep {
            complex: complex("999"),
            lines: Vec::new(),
        },
    ];

    assert_eq!(
        graph.format_directions(&steps),
        "Start at 101 St (101)\nTransfer at Unknown (999)"
    );
    assert_eq!(graph.format_directions(&[]), "");
}

#[test]
fn directions_for_a_ride_then_a_transfer() {
    let network = crate::sources::fixtures::sources(
        "stop_id,stop_name\nidA,A\nidB,B\nidC,C\n",
        "route_id,trip_id,direction_id\nQ,q,0\nN,n,0\nS,s,0\n",
        "trip_id,stop_id,stop_sequence\n\
         q,idAN,1\nq,idBN,2\n\
         n,idAN,1\nn,idBN,2\n\
         s,idBN,1\ns,idCN,2\n",
        "Complex ID,Number Of Stations In Complex,GTFS Stop IDs\n\
         idA,1,idA\nidB,1,idB\nidC,1,idC\n",
    );
    let graph = snapshot(&network, EdgePolicy::Adjacency);
    let (a, b, c) = (complex("idA"), complex("idB"), complex("idC"));

    let steps = vec![
        PathStep {
            lines: graph.connecting_lines(&a, &b).to_vec(),
            complex: a,
        },
        PathStep {
            complex: b,
            lines: Vec::new(),
        },
        PathStep {
            complex: c,
            lines: Vec::new(),
        },
    ];

    assert_eq!(
        graph.format_directions(&steps),
        "Start at A (idA)\nTake the N, Q trains to B (idB)\nTransfer at C (idC)"
    );
}

#[test]
fn path_with_lines_ends_without_lines() {
    let graph = snapshot(&chain(), EdgePolicy::Adjacency);
    let steps = graph
        .shortest_path_with_lines(&complex("101"), &complex("103"))
        .unwrap();

    let lines: Vec<&[RouteId]> = steps.iter().map(|s| s.lines.as_slice()).collect();
    assert_eq!(steps.len(), 3);
    assert_eq!(lines[0], &routes(&["1"])[..]);
    assert_eq!(lines[1], &routes(&["1"])[..]);
    assert!(lines[2].is_empty());
}

#[test]
fn y_junction_under_adjacency() {
    let network = y_junction();
    let graph = snapshot(&network, EdgePolicy::Adjacency);
    let (x, y, z) = (complex("X"), complex("Y"), complex("Z"));

    assert_eq!(graph.connecting_lines(&y, &z), &routes(&["1", "3"])[..]);
    assert_eq!(graph.connecting_lines(&z, &y), &routes(&["1", "3"])[..]);
    assert_eq!(graph.lines_at(&y), routes(&["1", "3"]));
    assert_eq!(graph.lines_at(&z), routes(&["1", "2", "3"]));
    assert_eq!(graph.successors(&x), Some(ids(&["W", "Y"])));

    assert_eq!(
        graph.all_shortest_paths(&x, &z),
        vec![ids(&["X", "W", "Z"]), ids(&["X", "Y", "Z"])]
    );
}

#[test]
fn y_junction_under_all_pairs() {
    let network = y_junction();
    let graph = snapshot(&network, EdgePolicy::AllPairsForward);
    let (x, y, z) = (complex("X"), complex("Y"), complex("Z"));

    assert_eq!(graph.shortest_path(&x, &z), Some(ids(&["X", "Z"])));
    assert_eq!(graph.connecting_lines(&x, &z), &routes(&["1", "2"])[..]);
    assert_eq!(graph.all_shortest_paths(&x, &z), vec![ids(&["X", "Z"])]);
    assert_eq!(graph.successors(&z), Some(ids(&["W", "X", "Y"])));
    assert_eq!(graph.lines_at(&y), routes(&["1", "3"]));
    assert_eq!(
        graph.directions(&x, &z).unwrap(),
        "Start at X St (X)\nTake the 1, 2 trains to Z St (Z)"
    );
}

#[test]
fn all_directions_lists_every_shortest_path() {
    let network = y_junction();
    let graph = snapshot(&network, EdgePolicy::Adjacency);

    let all = graph.all_directions(&complex("X"), &complex("Z"));

    assert_eq!(all.len(), 2);
    assert_eq!(
        all[0],
        vec![
            PathSegment {
                from: complex("X"),
                from_name: "X St".to_string(),
                to: complex("W"),
                to_name: "W St".to_string(),
                lines: routes(&["2"]),
            },
            PathSegment {
                from: complex("W"),
                from_name: "W St".to_string(),
                to: complex("Z"),
                to_name: "Z St".to_string(),
                lines: routes(&["2"]),
            },
        ]
    );
    assert_eq!(all[1][1].lines, routes(&["1", "3"]));
}

#[test]
fn lines_at_stop_resolves_raw_ids() {
    let network = y_junction();
    let graph = snapshot(&network, EdgePolicy::Adjacency);

    assert_eq!(graph.lines_at_stop(&network.resolver, &stop("YS")), routes(&["1", "3"]));
    assert_eq!(graph.lines_at_stop(&network.resolver, &stop("Y")), routes(&["1", "3"]));
    assert!(graph.lines_at_stop(&network.resolver, &stop("Q99")).is_empty());
}

#[test]
fn names_and_ids_round_trip() {
    let graph = snapshot(&y_junction(), EdgePolicy::Adjacency);

    assert_eq!(graph.name_to_complex_id("Y St"), Some(&complex("Y")));
    assert_eq!(graph.name_to_complex_id("Nowhere"), None);
    assert_eq!(graph.complex_id_to_name(&complex("W")), Some("W St"));
}

#[test]
fn route_listing() {
    let graph = snapshot(&y_junction(), EdgePolicy::Adjacency);

    let listed: Vec<&str> = graph.routes().into_iter().map(RouteId::as_str).collect();
    assert_eq!(listed, vec!["1", "2", "3"]);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_lines() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
        prop::collection::vec(prop::collection::vec(0..8usize, 2..6), 1..4).prop_map(|lines| {
            lines
                .into_iter()
                .enumerate()
                .map(|(i, stops)| {
                    let stops = stops.into_iter().map(|s| format!("S{s}")).collect();
                    (format!("R{i}"), stops)
                })
                .collect()
        })
    }

    fn arb_policy() -> impl Strategy<Value = EdgePolicy> {
        prop_oneof![Just(EdgePolicy::Adjacency), Just(EdgePolicy::AllPairsForward)]
    }

    proptest! {
        #[test]
        fn shortest_paths_follow_edges(
            lines in arb_lines(),
            policy in arb_policy(),
            from in 0..8usize,
            to in 0..8usize,
        ) {
            let network = line_network(&lines);
            let graph = snapshot(&network, policy);
            let (from, to) = (complex(&format!("S{from}")), complex(&format!("S{to}")));

            let shortest = graph.shortest_path(&from, &to);
            let all = graph.all_shortest_paths(&from, &to);
            prop_assert_eq!(shortest.is_none(), all.is_empty());

            if let Some(path) = shortest {
                prop_assert_eq!(path.first(), Some(&from));
                prop_assert_eq!(path.last(), Some(&to));
                prop_assert!(all.contains(&path));

                for candidate in &all {
                    prop_assert_eq!(candidate.len(), path.len());
                    for hop in candidate.windows(2) {
                        prop_assert!(!graph.connecting_lines(&hop[0], &hop[1]).is_empty());
                    }
                }
            }
        }
    }
}
