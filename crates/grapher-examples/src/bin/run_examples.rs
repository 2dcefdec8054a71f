// File: crates/grapher-examples/src/bin/run_examples.rs
// Summary: Renders every demo config with generated sine/cosine data instead of CSV files.

use std::f64::consts::PI;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use grapher_core::{Config, Dataset, GraphBuilder, XValues};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Render the bundled demo configurations.
#[derive(Parser, Debug)]
#[command(name = "run-examples", version, about)]
struct Args {
    /// Directory holding the demo *.yaml files
    #[arg(long, default_value = "demos")]
    demos: PathBuf,

    /// Directory the images are written to
    #[arg(long, default_value = "target/out/demos")]
    out: PathBuf,
}

const SAMPLES: usize = 50;

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("run_examples=info,grapher_core=info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
        .init();

    let mut configs: Vec<PathBuf> = std::fs::read_dir(&args.demos)
        .with_context(|| format!("failed to read demo directory '{}'", args.demos.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|e| e == "yaml" || e == "yml"))
        .collect();
    configs.sort();
    if configs.is_empty() {
        bail!("no demo configs found in '{}'", args.demos.display());
    }

    let mut failed = 0usize;
    for path in &configs {
        match run_demo(path, &args.out) {
            Ok(written) => println!("Wrote {}", written.display()),
            Err(err) => {
                failed += 1;
                tracing::error!(demo = %path.display(), "{err:#}");
            }
        }
    }
    if failed > 0 {
        bail!("{failed} of {} demos failed", configs.len());
    }
    Ok(())
}

fn run_demo(path: &Path, out_dir: &Path) -> Result<PathBuf> {
    let mut config = Config::from_yaml_file(path)?;
    tracing::info!(title = %config.graph.title, kind = %config.graph.chart_type, "rendering demo");

    // keep the configured file name, relocate it under `out_dir`
    let file_name = config
        .output
        .path()
        .file_name()
        .map(|n| n.to_os_string())
        .with_context(|| format!("output.save_path in '{}' has no file name", path.display()))?;
    config.output.save_path = out_dir.join(file_name).to_string_lossy().into_owned();

    let datasets: Vec<Dataset> = config
        .data
        .sources
        .iter()
        .enumerate()
        .map(|(i, source)| generated(&source.label, i, source.color.clone()))
        .collect();

    let builder = GraphBuilder::new();
    let chart = builder.build(&config, &datasets)?;
    Ok(builder.save(&chart, &config)?)
}

/// Six fixed waves (sin, cos, each shifted by pi/4 and pi/2), then further phase shifts.
fn generated(label: &str, index: usize, color: Option<String>) -> Dataset {
    let x: Vec<f64> = (0..SAMPLES).map(|i| 10.0 * i as f64 / (SAMPLES - 1) as f64).collect();
    let phase = match index {
        0..=5 => (index / 2) as f64 * PI / 4.0,
        _ => index as f64 * PI / 6.0,
    };
    let y = x
        .iter()
        .map(|&v| if index < 6 && index % 2 == 1 { (v + phase).cos() } else { (v + phase).sin() })
        .collect();
    Dataset {
        label: label.to_string(),
        x_name: "x".to_string(),
        y_name: "y".to_string(),
        x: XValues::Numeric(x),
        y,
        color,
    }
}
