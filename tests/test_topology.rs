use cascade_sim::domain::topology::edge::{Edge, EdgeRelation};
use cascade_sim::domain::topology::node::{Node, NodeCategory, NodeId};
use cascade_sim::domain::topology::topology::Topology;
use cascade_sim::error::{Error, TopologyError};
use cascade_sim::loader::parser::load_topology;

use std::collections::BTreeSet;
use std::io::Write;

fn fixture(name: &str) -> String {
    format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn ids(raw: &[i64]) -> Vec<NodeId> {
    raw.iter().map(|&id| NodeId(id)).collect()
}

#[test]
fn test_load_sample_graph() {
    let topology = load_topology(fixture("sample_graph.json")).expect("sample graph should load");

    assert_eq!(topology.node_count(), 14);
    assert_eq!(topology.edge_count(), 16);

    // Parallel edges are kept, one neighbor entry per edge.
    let from_1: Vec<NodeId> = topology.neighbors(NodeId(1)).unwrap().collect();
    assert_eq!(from_1, ids(&[4, 2, 2]));

    // Self-loop.
    let from_3: Vec<NodeId> = topology.neighbors(NodeId(3)).unwrap().collect();
    assert_eq!(from_3, ids(&[7, 3]));

    // Sinks have no outgoing edges.
    assert_eq!(topology.neighbors(NodeId(9)).unwrap().count(), 0);
}

#[test]
fn test_neighbors_are_outgoing_only() {
    let topology = load_topology(fixture("three_node_chain.json")).unwrap();

    let from_2: Vec<NodeId> = topology.neighbors(NodeId(2)).unwrap().collect();
    assert_eq!(from_2, ids(&[3]), "node 1 points at node 2 but must not show up as its neighbor");
}

#[test]
fn test_categories_and_relations() {
    let topology = load_topology(fixture("sample_graph.json")).unwrap();

    let users = topology.nodes_by_category(&NodeCategory::User);
    assert_eq!(users, ids(&[10, 11, 12, 13]).into_iter().collect::<BTreeSet<_>>());

    assert_eq!(topology.nodes_by_category(&NodeCategory::CloudRegion).len(), 1);
    assert!(topology.nodes_by_category(&NodeCategory::Other("unknown".to_string())).is_empty());

    let probe = topology.node(NodeId(14)).unwrap();
    assert_eq!(probe.category, NodeCategory::Other("synthetic_probe".to_string()));
    assert_eq!(probe.label, "probe_00");

    let relations: Vec<&EdgeRelation> = topology.edges().iter().map(|e| &e.relation).collect();
    assert_eq!(relations[0], &EdgeRelation::DependsOn);
    assert_eq!(relations[2], &EdgeRelation::Monitors);
    assert_eq!(relations[15], &EdgeRelation::Other("health_check".to_string()));
}

#[test]
fn test_extra_attributes_are_kept() {
    let topology = load_topology(fixture("sample_graph.json")).unwrap();

    let model = topology.node(NodeId(7)).unwrap();
    assert_eq!(model.attributes.get("owner").and_then(|v| v.as_str()), Some("ml-platform"));
    assert!(!model.attributes.contains_key("label"));

    let replication = &topology.edges()[10];
    assert_eq!(replication.attributes.get("latency_ms").and_then(|v| v.as_i64()), Some(12));
    assert!(!replication.attributes.contains_key("type"));
}

#[test]
fn test_dangling_edge_is_rejected() {
    let nodes = vec![Node::new(1, "a", NodeCategory::Service), Node::new(2, "b", NodeCategory::Service)];
    let edges = vec![Edge::new(1, 2, EdgeRelation::Calls), Edge::new(2, 42, EdgeRelation::DependsOn)];

    let err = Topology::load(nodes, edges).unwrap_err();
    assert_eq!(err, TopologyError::DanglingEdge { from: NodeId(2), to: NodeId(42), missing: NodeId(42) });
}

#[test]
fn test_dangling_source_is_rejected() {
    let nodes = vec![Node::new(1, "a", NodeCategory::Service)];
    let edges = vec![Edge::new(7, 1, EdgeRelation::Calls)];

    let err = Topology::load(nodes, edges).unwrap_err();
    assert_eq!(err, TopologyError::DanglingEdge { from: NodeId(7), to: NodeId(1), missing: NodeId(7) });
}

#[test]
fn test_dangling_edge_file() {
    let result = load_topology(fixture("dangling_edge.json"));

    match result {
        Err(Error::Topology(TopologyError::DanglingEdge { missing, .. })) => assert_eq!(missing, NodeId(42)),
        other => panic!("Expected a dangling edge error, got {:?}", other),
    }
}

#[test]
fn test_duplicate_node_is_rejected() {
    let nodes = vec![Node::new(5, "a", NodeCategory::Service), Node::new(5, "b", NodeCategory::User)];

    assert_eq!(Topology::load(nodes, vec![]).unwrap_err(), TopologyError::DuplicateNode(NodeId(5)));
}

#[test]
fn test_unknown_node_lookup() {
    let topology = load_topology(fixture("three_node_chain.json")).unwrap();

    assert!(matches!(topology.neighbors(NodeId(99)), Err(TopologyError::UnknownNode(NodeId(99)))));
    assert!(topology.node(NodeId(99)).is_none());
    assert!(!topology.contains(NodeId(99)));
}

#[test]
fn test_ids_need_not_start_at_one() {
    let nodes = vec![Node::new(-3, "a", NodeCategory::Service), Node::new(1000, "b", NodeCategory::DataStore)];
    let edges = vec![Edge::new(-3, 1000, EdgeRelation::DependsOn)];

    let topology = Topology::load(nodes, edges).unwrap();
    assert_eq!(topology.neighbors(NodeId(-3)).unwrap().collect::<Vec<_>>(), ids(&[1000]));
}

#[test]
fn test_empty_topology() {
    let topology = Topology::load(vec![], vec![]).unwrap();

    assert!(topology.is_empty());
    assert_eq!(topology.edge_count(), 0);
    assert!(topology.nodes_by_category(&NodeCategory::User).is_empty());
}

#[test]
fn test_error_file_not_found() {
    let result = load_topology("non_existent_file.json");

    assert!(matches!(result, Err(Error::IoError(_))), "Expected IoError, got {:?}", result);
}

#[test]
fn test_error_malformed_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{\"nodes\": [{{\"id\": \"not-a-number\"}}], \"edges\": []}}").unwrap();

    let result = load_topology(file.path());

    assert!(matches!(result, Err(Error::DeserializationError(_))), "Expected DeserializationError, got {:?}", result);
}
