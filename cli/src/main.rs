//! Command-line entry point for the train boarding simulator.
//!
//! Runs every configured scenario, writes one CSV row per trial and logs a
//! per-scenario summary. With no arguments it reproduces the reference run:
//! 6 cars, 10 s per passenger, 500 runs per scenario, seed 42.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use train_boarding_sim_core::{CsvSink, SimulationConfig, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "train-sim",
    version,
    about = "Compare train departure times with and without queue balancing"
)]
struct Cli {
    /// JSON config file. Defaults are used for anything it omits.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of cars in the train.
    #[arg(long)]
    cars: Option<u32>,

    /// Seconds needed to board one passenger.
    #[arg(long)]
    board_secs: Option<u64>,

    /// Trials per scenario.
    #[arg(long)]
    runs: Option<u32>,

    /// Random seed.
    #[arg(long)]
    seed: Option<u64>,

    /// CSV output path.
    #[arg(long, short, default_value = "train_sim.csv")]
    output: PathBuf,

    /// Optional JSON summary output path.
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Log every trial.
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    fn load_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                SimulationConfig::from_json(&raw)
                    .with_context(|| format!("failed to parse config {}", path.display()))?
            }
            None => SimulationConfig::default(),
        };

        if let Some(cars) = self.cars {
            config.cars = cars;
        }
        if let Some(board_secs) = self.board_secs {
            config.board_secs = board_secs;
        }
        if let Some(runs) = self.runs {
            config.runs = runs;
        }
        if let Some(seed) = self.seed {
            config.rng_seed = seed;
        }

        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.load_config()?;
    let mut simulator = Simulator::new(config).context("invalid simulation config")?;

    let mut sink = CsvSink::create(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    let summary = simulator
        .run(&mut sink)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    for scenario in &summary.scenarios {
        info!(
            "{:<14} mu={:<5} sigma={:<5} mean saving {:.1}s ({:.2}%), max {:.2}%, no gain in {}/{} runs",
            scenario.name,
            scenario.mean,
            scenario.stddev,
            scenario.mean_improvement_secs,
            scenario.mean_improvement_pct,
            scenario.max_improvement_pct,
            scenario.zero_improvement_runs,
            scenario.runs
        );
    }
    info!(
        rows = sink.rows_written(),
        path = %cli.output.display(),
        "CSV written"
    );

    if let Some(path) = &cli.summary {
        let json = summary.to_json_pretty()?;
        fs::write(path, json)
            .with_context(|| format!("failed to write summary {}", path.display()))?;
        info!(path = %path.display(), config_hash = %summary.config_hash, "Summary written");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use train_boarding_sim_core::SimulationError;

    /// Write `json` to a fresh file in the temp dir.
    fn write_config(tag: &str, json: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "train_sim_cli_{}_{}.json",
            tag,
            std::process::id()
        ));
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_no_flags_loads_defaults() {
        let cli = Cli::try_parse_from(["train-sim"]).unwrap();
        assert_eq!(cli.load_config().unwrap(), SimulationConfig::default());
        assert_eq!(cli.output, PathBuf::from("train_sim.csv"));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let path = write_config(
            "overrides",
            r#"{
                "cars": 8,
                "board_secs": 12,
                "runs": 40,
                "rng_seed": 1,
                "scenarios": [{"name": "Weekend", "mean": 12, "stddev": 4}]
            }"#,
        );
        let config_arg = path.to_string_lossy().into_owned();

        let cli = Cli::try_parse_from([
            "train-sim",
            "--config",
            config_arg.as_str(),
            "--cars",
            "4",
            "--runs",
            "7",
            "--seed",
            "99",
        ])
        .unwrap();
        let config = cli.load_config().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.cars, 4);
        assert_eq!(config.runs, 7);
        assert_eq!(config.rng_seed, 99);
        // Not overridden: kept from the file
        assert_eq!(config.board_secs, 12);
        assert_eq!(config.scenarios.len(), 1);
        assert_eq!(config.scenarios[0].name, "Weekend");
    }

    #[test]
    fn test_board_secs_override_without_file() {
        let cli = Cli::try_parse_from(["train-sim", "--board-secs", "15"]).unwrap();
        let config = cli.load_config().unwrap();

        assert_eq!(config.board_secs, 15);
        assert_eq!(config.cars, 6);
    }

    #[test]
    fn test_zero_cars_override_rejected_by_simulator() {
        let cli = Cli::try_parse_from(["train-sim", "--cars", "0"]).unwrap();
        let config = cli.load_config().unwrap();
        assert_eq!(config.cars, 0);

        match Simulator::new(config) {
            Err(SimulationError::InvalidConfig(msg)) => assert!(msg.contains("cars")),
            Err(other) => panic!("Expected InvalidConfig, got {:?}", other),
            Ok(_) => panic!("Expected zero cars to be rejected"),
        }
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from([
            "train-sim",
            "--config",
            "/nonexistent/train_sim_config.json",
        ])
        .unwrap();
        let err = cli.load_config().unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
