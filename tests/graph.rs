//! Graph integration tests.
//!
//! These tests drive the public API end to end:
//! 1. Build graphs through the chainable mutators
//! 2. Query adjacency (sources, sinks, predecessors, incident edges)
//! 3. Remove nodes and edges and check nothing dangles
//! 4. Exercise the strict edge insertions and construction options

use std::{
    collections::BTreeSet,
    sync::{Arc, RwLock},
    thread,
};

use keygraph::{Edge, Endpoint, Error, Graph, GraphOptions, Predecessors, Result, Successors};

/// Collect keys into a sorted set so unordered views compare cleanly.
fn key_set<'a>(keys: impl Iterator<Item = &'a str>) -> BTreeSet<String> {
    keys.map(str::to_owned).collect()
}

fn edge_set<'a>(edges: impl Iterator<Item = &'a Edge>) -> BTreeSet<Edge> {
    edges.cloned().collect()
}

/// The nine-edge diamond used by several tests.
///
/// ```text
///        1
///       / \
///      2   3
///      |   |
///      4   7
///     / \  |
///    5   6 |
///     \ /  |
///      8 --+
/// ```
fn diamond() -> Graph<u32, ()> {
    let mut graph = Graph::new();
    for (source, target) in [
        ("1", "2"),
        ("1", "3"),
        ("2", "4"),
        ("3", "7"),
        ("4", "5"),
        ("4", "6"),
        ("5", "8"),
        ("6", "8"),
        ("7", "8"),
    ] {
        graph.add_edge(source, target);
    }
    graph
}

#[test]
fn diamond_sources_and_sinks() {
    let graph = diamond();

    assert_eq!(graph.node_count(), 8);
    assert_eq!(graph.edge_count(), 9);
    assert_eq!(graph.sources().collect::<Vec<_>>(), vec!["1"]);
    assert_eq!(graph.sinks().collect::<Vec<_>>(), vec!["8"]);
    assert_eq!(
        key_set(graph.predecessors("8").unwrap()),
        key_set(["5", "6", "7"].into_iter())
    );
    assert_eq!(
        key_set(graph.successors("4").unwrap()),
        key_set(["5", "6"].into_iter())
    );
}

#[test]
fn diamond_remove_hub() {
    let mut graph = diamond();
    graph.remove_node("4");

    assert_eq!(graph.node_count(), 7);
    assert_eq!(graph.edge_count(), 6);
    assert!(graph.is_leaf("2"));

    // 5 and 6 lost their only predecessor and become sources.
    assert_eq!(
        key_set(graph.sources()),
        key_set(["1", "5", "6"].into_iter())
    );

    for key in graph.nodes() {
        assert!(graph.predecessors(key).unwrap().all(|pred| pred != "4"));
        assert!(graph.successors(key).unwrap().all(|succ| succ != "4"));
    }
}

#[test]
fn linear_chain() {
    let mut graph: Graph<(), ()> = Graph::new();
    graph.set_path(&["a", "b", "c"], None);

    assert_eq!(graph.sources().collect::<Vec<_>>(), vec!["a"]);
    assert_eq!(graph.sinks().collect::<Vec<_>>(), vec!["c"]);
    assert_eq!(
        graph.in_edges("b", None).unwrap().collect::<Vec<_>>(),
        vec![&Edge::new("a", "b")]
    );
    assert_eq!(
        graph.out_edges("b", None).unwrap().collect::<Vec<_>>(),
        vec![&Edge::new("b", "c")]
    );
}

#[test]
fn isolated_node_with_chain() {
    let mut graph: Graph<(), ()> = Graph::new();
    graph.add_node("x").add_edge("c", "d");

    let sources = key_set(graph.sources());
    let sinks = key_set(graph.sinks());
    assert!(sources.contains("x") && sources.contains("c"));
    assert!(sinks.contains("x") && sinks.contains("d"));
    assert!(!sources.contains("d"));
    assert!(!sinks.contains("c"));
}

#[test]
fn node_edges_between_pair_is_symmetric() {
    let mut graph: Graph<(), ()> = Graph::new();
    graph
        .add_edge("a", "b")
        .add_edge("a", "c")
        .add_edge("b", "c")
        .add_edge("z", "a")
        .add_edge("z", "b");

    let expected = vec![Edge::new("a", "b")];
    let ab: Vec<Edge> = graph.node_edges("a", Some("b")).unwrap().cloned().collect();
    let ba: Vec<Edge> = graph.node_edges("b", Some("a")).unwrap().cloned().collect();
    assert_eq!(ab, expected);
    assert_eq!(ba, expected);

    assert_eq!(
        edge_set(graph.node_edges("a", None).unwrap()),
        edge_set(
            [Edge::new("a", "b"), Edge::new("a", "c"), Edge::new("z", "a")].iter()
        )
    );
}

#[test]
fn values_survive_structure_changes() {
    let mut graph: Graph<String, f64> = Graph::new();
    graph
        .set_node("a", "first".to_owned())
        .set_edge("a", "b", 0.5)
        .set_edge("b", "c", 1.5);

    graph.remove_node("c");
    assert_eq!(graph.node("a"), Some(Some(&"first".to_owned())));
    assert_eq!(graph.edge("a", "b"), Some(Some(&0.5)));

    // Omitting the value keeps the stored one.
    graph.add_node("a").add_edge("a", "b");
    assert_eq!(graph.node("a").flatten().map(String::as_str), Some("first"));
    assert_eq!(graph.edge("a", "b"), Some(Some(&0.5)));
}

#[test]
fn unknown_keys_are_none_not_errors() {
    let graph = diamond();

    assert_eq!(graph.node("nope"), None);
    assert_eq!(graph.edge("1", "8"), None);
    assert!(graph.predecessors("nope").is_none());
    assert!(graph.successors("nope").is_none());
    assert!(graph.neighbors("nope").is_none());
    assert!(graph.in_edges("nope", None).is_none());
    assert!(graph.out_edges("nope", None).is_none());
    assert!(graph.node_edges("nope", None).is_none());
    assert_eq!(graph.in_degree("nope"), None);
    assert!(!graph.is_leaf("nope"));
    assert!(!graph.has_node("nope"));
}

#[test]
fn strict_insertion_leaves_graph_untouched() {
    let mut graph = diamond();
    let nodes_before: Vec<String> = graph.nodes().map(str::to_owned).collect();
    let edges_before: Vec<Edge> = graph.edges().cloned().collect();

    let err = graph.try_set_edge("8", "9", ()).unwrap_err();
    assert_eq!(
        err,
        Error::MissingEndpoint {
            endpoint: Endpoint::Target,
            key: "9".to_owned()
        }
    );
    assert_eq!(err.to_string(), "missing target node '9'");

    let err = graph.try_add_edge("0", "1").unwrap_err();
    assert!(matches!(
        err,
        Error::MissingEndpoint {
            endpoint: Endpoint::Source,
            ..
        }
    ));

    assert_eq!(graph.node_count(), 8);
    assert_eq!(graph.edge_count(), 9);
    assert_eq!(graph.nodes().map(str::to_owned).collect::<Vec<_>>(), nodes_before);
    assert_eq!(graph.edges().cloned().collect::<Vec<_>>(), edges_before);
    assert_eq!(graph.successors("8").unwrap().count(), 0);
    assert_eq!(graph.predecessors("1").unwrap().count(), 0);
}

#[test]
fn strict_insertion_with_question_mark() -> Result<()> {
    let mut graph: Graph<(), &str> = Graph::new();
    graph.set_nodes(["a", "b", "c"], None);

    graph.try_set_edge("a", "b", "ab")?.try_add_edge("b", "c")?;

    assert_eq!(graph.edge("a", "b"), Some(Some(&"ab")));
    assert_eq!(graph.edge("b", "c"), Some(None));
    Ok(())
}

#[test]
fn options_from_json() {
    let options: GraphOptions =
        serde_json::from_str(r#"{ "label": "pipeline", "node_capacity": 16 }"#).unwrap();
    let graph: Graph<(), ()> = Graph::with_options(options);

    assert_eq!(graph.label(), Some("pipeline"));
    assert!(graph.is_empty());
}

#[test]
fn options_with_huge_capacities_from_json() {
    let options: GraphOptions = serde_json::from_str(
        r#"{ "node_capacity": 18446744073709551615, "edge_capacity": 18446744073709551615 }"#,
    )
    .unwrap();
    assert_eq!(options.node_capacity, usize::MAX);

    let mut graph: Graph<(), ()> = Graph::with_options(options);
    assert!(graph.is_empty());

    graph.set_path(&["a", "b", "c"], None).add_edge("c", "a");
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.successors("c").unwrap().collect::<Vec<_>>(), vec!["a"]);
}

#[test]
fn filter_nodes_keeps_induced_edges() {
    let graph = diamond();
    let upper = graph.filter_nodes(|key, _| key.parse::<u32>().is_ok_and(|n| n <= 4));

    assert_eq!(
        key_set(upper.nodes()),
        key_set(["1", "2", "3", "4"].into_iter())
    );
    assert_eq!(
        edge_set(upper.edges()),
        edge_set([Edge::new("1", "2"), Edge::new("1", "3"), Edge::new("2", "4")].iter())
    );
    assert_eq!(key_set(upper.sinks()), key_set(["3", "4"].into_iter()));
}

/// Topological order written against the adjacency traits only.
fn topological_order<G: Successors + Predecessors>(graph: &G) -> Option<Vec<String>> {
    let mut remaining: std::collections::HashMap<&str, usize> = graph
        .node_keys()
        .map(|key| (key, graph.predecessors_of(key).count()))
        .collect();
    let mut ready: BTreeSet<&str> = remaining
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(key, _)| *key)
        .collect();
    let mut order = Vec::new();

    while let Some(key) = ready.pop_first() {
        order.push(key.to_owned());
        for next in graph.successors_of(key) {
            if let Some(degree) = remaining.get_mut(next) {
                *degree -= 1;
                if *degree == 0 {
                    ready.insert(next);
                }
            }
        }
    }

    (order.len() == graph.node_count()).then_some(order)
}

#[test]
fn traits_drive_external_algorithms() {
    let graph = diamond();
    let order = topological_order(&graph).unwrap();
    assert_eq!(order.len(), 8);
    assert_eq!(order.first().map(String::as_str), Some("1"));
    assert_eq!(order.last().map(String::as_str), Some("8"));

    let mut cyclic = diamond();
    cyclic.add_edge("8", "1");
    assert!(topological_order(&cyclic).is_none());
}

#[test]
fn shared_behind_rwlock() {
    let graph: Arc<RwLock<Graph<usize, ()>>> = Arc::new(RwLock::new(Graph::new()));

    let writers: Vec<_> = (0..4)
        .map(|worker| {
            let graph = Arc::clone(&graph);
            thread::spawn(move || {
                for i in 0..25 {
                    let key = format!("w{worker}-{i}");
                    let mut guard = graph.write().unwrap();
                    guard.set_node(&key, i).add_edge("root", &key);
                }
            })
        })
        .collect();
    for handle in writers {
        handle.join().unwrap();
    }

    let guard = graph.read().unwrap();
    assert_eq!(guard.node_count(), 101);
    assert_eq!(guard.edge_count(), 100);
    assert_eq!(guard.out_degree("root"), Some(100));
    assert_eq!(guard.sources().collect::<Vec<_>>(), vec!["root"]);
}
