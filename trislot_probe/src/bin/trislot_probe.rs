//! # trislot Delivery Probe Binary
//!
//! Measures loss and delay of a latest-value exchange under a paced writer and
//! a polling reader.
//!
//! # Usage
//!
//! ```bash
//! # Defaults: 1000 packages, writer every 4 ms, reader back-off 2 ms
//! trislot_probe
//!
//! # From a config file, with per-package CSV rows
//! trislot_probe --config config/probe.toml --csv
//!
//! # Flat-out writer, machine-readable summary
//! trislot_probe --packages 100000 --writer-interval-ms 0 --json
//! ```

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tracing::{error, info};
use trislot_common::config::LogLevel;
use trislot_common::logging::init_tracing;
use trislot_probe::{ProbeConfig, ProbeResult, run_delivery};

/// trislot delivery probe - latest-value exchange loss/delay measurement
#[derive(Parser, Debug)]
#[command(name = "trislot_probe")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Measure loss and delay across a non-blocking latest-value exchange")]
struct Args {
    /// Path to probe configuration TOML. Defaults apply when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of packages to publish.
    #[arg(long)]
    packages: Option<u32>,

    /// Writer pacing interval [ms]; 0 publishes flat out.
    #[arg(long)]
    writer_interval_ms: Option<u64>,

    /// Reader back-off after an empty poll [ms]; 0 busy-polls.
    #[arg(long)]
    reader_interval_ms: Option<u64>,

    /// Quiet period before and after publishing [ms].
    #[arg(long)]
    settle_ms: Option<u64>,

    /// Print one CSV row per package before the summary.
    #[arg(long)]
    csv: bool,

    /// Print the summary (and logs) as JSON.
    #[arg(long)]
    json: bool,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        error!("probe failed: {e}");
        eprintln!("trislot_probe: {e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> ProbeResult<()> {
    let mut config = match &args.config {
        Some(path) => ProbeConfig::load_validated(path)?,
        None => ProbeConfig::default(),
    };
    apply_overrides(&mut config, args);
    config.validate()?;

    let level = if args.verbose {
        LogLevel::Debug
    } else {
        config.shared.log_level
    };
    init_tracing(level, args.json);

    info!(
        "{} v{} starting...",
        config.shared.service_name,
        env!("CARGO_PKG_VERSION")
    );

    let report = run_delivery(&config.delivery)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.csv {
        report.write_csv(&mut out)?;
    }
    if args.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", report.summary_line())?;
    }
    Ok(())
}

fn apply_overrides(config: &mut ProbeConfig, args: &Args) {
    let delivery = &mut config.delivery;
    if let Some(packages) = args.packages {
        delivery.packages = packages;
    }
    if let Some(ms) = args.writer_interval_ms {
        delivery.writer_interval_ms = ms;
    }
    if let Some(ms) = args.reader_interval_ms {
        delivery.reader_interval_ms = ms;
    }
    if let Some(ms) = args.settle_ms {
        delivery.settle_ms = ms;
    }
}
