use std::path::PathBuf;

use clap::Parser;

use belote_bench::config::{BenchmarkConfig, ResolvedOutputs};
use belote_bench::logging::init_logging;
use belote_bench::runner::BenchRunner;

/// Headless harness that plays all-bot Belote rounds.
#[derive(Debug, Parser)]
#[command(
    name = "belote-bench",
    author,
    version,
    about = "Deterministic all-bot Belote round harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of rounds to play.
    #[arg(long, value_name = "ROUNDS")]
    rounds: Option<usize>,

    /// Override the RNG seed for deal generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration.
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(rounds) = cli.rounds {
        config.deals.rounds = rounds;
    }

    if let Some(seed) = cli.seed {
        config.deals.seed = Some(seed);
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let rounds = config.deals.rounds;
    let seats = config
        .seats
        .iter()
        .map(|seat| format!("{} ({})", seat.name, seat.kind.policy()))
        .collect::<Vec<_>>()
        .join(", ");

    println!("Loaded configuration '{run_id}': {rounds} rounds, seats {seats}");

    if cli.validate_only {
        println!("Validation-only mode: no rounds played.");
        return Ok(());
    }

    let logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = BenchRunner::new(config, outputs)?;
    let summary = runner.run()?;

    println!(
        "Run '{run_id}' complete: {} rounds, {} rows at {}",
        summary.rounds_played,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
