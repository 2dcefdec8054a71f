// File: crates/grapher-cli/src/main.rs
// Summary: `simple-grapher` entry point; YAML config + CSV data in, one image file out.

mod logger;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use grapher_core::{Config, DataProcessor, GraphBuilder};

/// A simple command line tool for creating graphs and visualizations.
#[derive(Parser, Debug)]
#[command(name = "simple-grapher", version, about)]
struct Cli {
    /// YAML configuration file
    #[arg(value_name = "CONFIG", required_unless_present = "input", conflicts_with = "input")]
    config: Option<PathBuf>,

    /// YAML configuration file (alternative to the positional argument)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write the graph here instead of output.save_path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Validate the configuration and data without writing anything
    #[arg(long)]
    check: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli
        .config
        .or(cli.input)
        .context("a configuration file is required")?;
    tracing::debug!(path = %config_path.display(), "loading configuration");

    let mut config = Config::from_yaml_file(&config_path)
        .with_context(|| format!("failed to load configuration '{}'", config_path.display()))?;
    if let Some(output) = cli.output {
        config.output.save_path = output.to_string_lossy().into_owned();
    }
    config.ensure_valid().context("configuration is invalid")?;

    let datasets = DataProcessor::new()
        .load_sources(&config.data.sources)
        .context("failed to load data")?;
    let builder = GraphBuilder::new();
    let chart = builder.build(&config, &datasets).context("failed to build graph")?;

    if cli.check {
        println!(
            "Configuration OK: {} data source(s), {} graph",
            datasets.len(),
            config.graph.chart_type
        );
        return Ok(());
    }

    let path = builder
        .save(&chart, &config)
        .with_context(|| format!("failed to save graph to '{}'", config.output.save_path))?;
    println!("Graph saved to: {}", path.display());
    Ok(())
}
