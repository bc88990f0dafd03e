use cascade_sim::api::batch_config_dto::BatchConfigDto;
use cascade_sim::domain::monte_carlo::batch_config::BatchConfig;
use cascade_sim::domain::monte_carlo::cancellation::CancellationToken;
use cascade_sim::domain::monte_carlo::orchestrator::{MonteCarloRunner, run, user_impact_pct};
use cascade_sim::domain::monte_carlo::parameter_grid::ParameterGrid;
use cascade_sim::domain::topology::edge::{Edge, EdgeRelation};
use cascade_sim::domain::topology::node::{Node, NodeCategory, NodeId};
use cascade_sim::domain::topology::topology::Topology;
use cascade_sim::error::{Error, ParameterError};
use cascade_sim::loader::parser::load_topology;

use std::collections::BTreeSet;

fn chain() -> Topology {
    let nodes = (1..=3).map(|id| Node::new(id, format!("service_{:02}", id), NodeCategory::Service)).collect();
    let edges = vec![Edge::new(1, 2, EdgeRelation::DependsOn), Edge::new(2, 3, EdgeRelation::DependsOn)];
    Topology::load(nodes, edges).unwrap()
}

fn sample_graph() -> Topology {
    load_topology(format!("{}/tests/data/sample_graph.json", env!("CARGO_MANIFEST_DIR"))).unwrap()
}

fn config(failure_probs: Vec<f64>, capacities: Vec<usize>, n_sims: usize) -> BatchConfig {
    BatchConfig {
        grid: ParameterGrid::new(failure_probs, capacities, n_sims),
        p_propagate: 0.3,
        arrival_rate: 10.0,
        service_rate: 12.0,
        queue_horizon: 20.0,
        base_seed: Some(1234),
        threads: Some(2),
    }
}

#[test]
fn test_boundary_probabilities_sweep() {
    let topology = chain();
    let config = config(vec![0.0, 1.0], vec![1], 2);

    let records = run(&topology, &config).unwrap();

    assert_eq!(records.len(), 4);
    for record in records.iter().filter(|r| r.p_node == 0.0) {
        assert_eq!(record.failed_nodes, 0);
        assert_eq!(record.recovery_time, 0);
    }
    for record in records.iter().filter(|r| r.p_node == 1.0) {
        assert_eq!(record.failed_nodes, topology.node_count());
        assert_eq!(record.recovery_time, 1);
    }
    assert_eq!(records.iter().filter(|r| r.p_node == 0.0).count(), 2);
}

#[test]
fn test_batch_size_and_trial_ids() {
    let topology = sample_graph();
    let config = config(vec![0.05, 0.1, 0.2], vec![1, 2], 4);

    let records = run(&topology, &config).unwrap();

    assert_eq!(records.len(), 3 * 2 * 4);
    for (position, record) in config.grid.positions().zip(&records) {
        assert_eq!(record.trial_id, position.trial_id);
        assert_eq!(record.p_node, position.p_node);
        assert_eq!(record.capacity, position.capacity);
    }
    let ids: Vec<u64> = records.iter().map(|r| r.trial_id).collect();
    assert_eq!(ids, (1..=24).collect::<Vec<u64>>());
}

#[test]
fn test_reproducible_regardless_of_worker_count() {
    let topology = sample_graph();
    let mut single = config(vec![0.1, 0.5], vec![1, 3], 5);
    single.threads = Some(1);
    let mut many = single.clone();
    many.threads = Some(4);

    let a = run(&topology, &single).unwrap();
    let b = run(&topology, &many).unwrap();
    let c = run(&topology, &many).unwrap();

    assert_eq!(a, b);
    assert_eq!(b, c);
}

#[test]
fn test_base_seed_changes_outcomes() {
    let topology = sample_graph();
    let first = config(vec![0.5], vec![2], 10);
    let mut second = first.clone();
    second.base_seed = Some(4321);

    assert_ne!(run(&topology, &first).unwrap(), run(&topology, &second).unwrap());
}

#[test]
fn test_unseeded_batch_runs() {
    let topology = chain();
    let mut config = config(vec![0.5], vec![1, 2], 3);
    config.base_seed = None;

    let records = run(&topology, &config).unwrap();

    assert_eq!(records.len(), 6);
}

#[test]
fn test_user_impact_bounds() {
    let topology = sample_graph();
    let records = run(&topology, &config(vec![0.0, 0.3, 1.0], vec![1], 10)).unwrap();

    for record in &records {
        assert!((0.0..=100.0).contains(&record.user_impact_pct), "{:?}", record);
        if record.p_node == 0.0 {
            assert_eq!(record.user_impact_pct, 0.0);
        }
        if record.p_node == 1.0 {
            assert_eq!(record.user_impact_pct, 100.0);
        }
    }
}

#[test]
fn test_no_user_nodes_means_no_user_impact() {
    let topology = chain();
    let records = run(&topology, &config(vec![1.0], vec![1], 3)).unwrap();

    assert!(records.iter().all(|r| r.user_impact_pct == 0.0));
}

#[test]
fn test_user_impact_pct() {
    let users: BTreeSet<NodeId> = [10, 11, 12, 13].into_iter().map(NodeId).collect();
    let failed: BTreeSet<NodeId> = [1, 10, 4].into_iter().map(NodeId).collect();

    assert_eq!(user_impact_pct(&failed, &users), 25.0);
    assert_eq!(user_impact_pct(&failed, &BTreeSet::new()), 0.0);
    assert_eq!(user_impact_pct(&BTreeSet::new(), &users), 0.0);
}

#[test]
fn test_empty_lists_yield_no_records() {
    let topology = chain();

    assert!(run(&topology, &config(vec![], vec![1, 2], 3)).unwrap().is_empty());
    assert!(run(&topology, &config(vec![0.1], vec![], 3)).unwrap().is_empty());
}

#[test]
fn test_bad_probability_aborts_batch() {
    let topology = chain();

    let result = run(&topology, &config(vec![0.1, 1.5], vec![2], 3));

    match result {
        Err(Error::Trial { trial_id, p_node, capacity, source }) => {
            assert!((4..=6).contains(&trial_id), "trial {} is not in the 1.5 block", trial_id);
            assert_eq!(p_node, 1.5);
            assert_eq!(capacity, 2);
            assert_eq!(source, ParameterError::ProbabilityOutOfRange { name: "p_node", value: 1.5 });
        }
        other => panic!("Expected the batch to abort, got {:?}", other),
    }
}

#[test]
fn test_bad_capacity_aborts_batch() {
    let topology = chain();

    let result = run(&topology, &config(vec![0.1], vec![1, 0], 2));

    assert!(matches!(
        result,
        Err(Error::Trial { capacity: 0, source: ParameterError::NonPositive { name: "capacity", .. }, .. })
    ));
}

#[test]
fn test_bad_rate_aborts_batch() {
    let topology = chain();
    let mut config = config(vec![0.1], vec![1], 2);
    config.arrival_rate = -1.0;

    let result = run(&topology, &config);

    assert!(matches!(result, Err(Error::Trial { source: ParameterError::NonPositive { name: "arrival_rate", .. }, .. })));
}

#[test]
fn test_cancelled_batch() {
    let topology = chain();
    let config = config(vec![0.1, 0.2], vec![1, 2], 5);
    let token = CancellationToken::new();
    token.cancel();

    let result = MonteCarloRunner::new(&topology, &config).with_cancellation(token.clone()).run();

    assert!(token.is_cancelled());
    assert!(matches!(result, Err(Error::Cancelled { completed: 0 })), "got {:?}", result);
}

#[test]
fn test_config_defaults() {
    let config = BatchConfig::from_dto(BatchConfigDto::default()).unwrap();

    assert_eq!(config.grid.failure_probs, vec![0.05, 0.1, 0.2]);
    assert_eq!(config.grid.capacities, vec![1, 2, 3]);
    assert_eq!(config.grid.n_sims, 50);
    assert_eq!(config.p_propagate, 0.3);
    assert_eq!(config.arrival_rate, 10.0);
    assert_eq!(config.service_rate, 12.0);
    assert_eq!(config.queue_horizon, 100.0);
    assert_eq!(config.base_seed, None);
    assert_eq!(config.threads, None);
    assert_eq!(config, BatchConfig::default());
}

#[test]
fn test_config_rejects_bad_batch_settings() {
    let zero_sims = BatchConfigDto { n_sims: Some(0), ..Default::default() };
    assert_eq!(BatchConfig::from_dto(zero_sims).unwrap_err(), ParameterError::NonPositive { name: "n_sims", value: 0.0 });

    let zero_threads = BatchConfigDto { threads: Some(0), ..Default::default() };
    assert!(BatchConfig::from_dto(zero_threads).is_err());

    let negative_horizon = BatchConfigDto { queue_horizon: Some(-5.0), ..Default::default() };
    assert_eq!(
        BatchConfig::from_dto(negative_horizon).unwrap_err(),
        ParameterError::NonPositive { name: "queue_horizon", value: -5.0 }
    );
}
