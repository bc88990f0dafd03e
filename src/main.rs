use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use cascade_sim::domain::monte_carlo::aggregator::summarize;
use cascade_sim::domain::monte_carlo::batch_config::BatchConfig;
use cascade_sim::domain::monte_carlo::orchestrator;
use cascade_sim::error::ParameterError;
use cascade_sim::loader::parser::{load_batch_config, load_topology};
use cascade_sim::loader::writer::{write_records_file, write_summary_file};
use cascade_sim::logger;

/// Monte Carlo resilience sweep: cascading failures over a dependency graph plus M/M/c queue backpressure.
#[derive(Parser, Debug)]
#[command(name = "cascade-sim", version)]
struct Args {
    /// Topology JSON (`nodes` and `edges`).
    #[arg(long, default_value = "data/sample_graph.json")]
    graph_path: PathBuf,

    /// Batch configuration JSON. Missing keys use the built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Repetitions per parameter combination (overrides the configuration).
    #[arg(long)]
    n_sims: Option<usize>,

    /// Base seed for reproducible runs (overrides the configuration).
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (overrides the configuration).
    #[arg(long)]
    threads: Option<usize>,

    /// Where to write the per-trial result table.
    #[arg(long, default_value = "sim_results.csv")]
    output_csv: PathBuf,

    /// Where to write the means per (p_node, capacity), if wanted.
    #[arg(long)]
    summary_csv: Option<PathBuf>,

    /// Directory for the log file. Console logging is always on.
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(Some(&args.log_dir));

    let topology = load_topology(&args.graph_path).with_context(|| format!("loading topology {}", args.graph_path.display()))?;

    let mut config = match &args.config {
        Some(path) => load_batch_config(path).with_context(|| format!("loading configuration {}", path.display()))?,
        None => BatchConfig::default(),
    };
    if let Some(n_sims) = args.n_sims {
        if n_sims == 0 {
            return Err(ParameterError::NonPositive { name: "n_sims", value: 0.0 }.into());
        }
        config.grid.n_sims = n_sims;
    }
    if let Some(seed) = args.seed {
        config.base_seed = Some(seed);
    }
    if let Some(threads) = args.threads {
        if threads == 0 {
            return Err(ParameterError::NonPositive { name: "threads", value: 0.0 }.into());
        }
        config.threads = Some(threads);
    }

    let records = orchestrator::run(&topology, &config)?;
    write_records_file(&args.output_csv, &records)?;

    let summary = summarize(&records);
    for group in &summary {
        log::info!(
            "p_node={} capacity={}: {} trials, recovery {:.2} rounds, {:.1} failed, {:.1}% users impacted, avg wait {:.4}",
            group.p_node.map_or_else(|| "*".to_string(), |p| p.to_string()),
            group.capacity.map_or_else(|| "*".to_string(), |c| c.to_string()),
            group.trials,
            group.mean_recovery_time,
            group.mean_failed_nodes,
            group.mean_user_impact_pct,
            group.mean_avg_wait
        );
    }
    if let Some(path) = &args.summary_csv {
        write_summary_file(path, &summary)?;
    }

    Ok(())
}
