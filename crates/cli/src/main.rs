//! Memory hierarchy simulator CLI.
//!
//! This binary replays an access trace against a configured hierarchy. It performs:
//! 1. **Run:** Loads a configuration and a trace, prints one row per access and
//!    the final statistics (or a single JSON report with `--json`).
//! 2. **Plan:** Validates a configuration and prints its derived bit widths.
//!
//! Diagnostics go to stderr through `tracing`. Set `RUST_LOG=info` for load
//! messages, or `RUST_LOG=debug` for per-structure eviction logs.

use clap::{Parser, Subcommand};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

use memhier_core::core::access::TRACE_HEADER;
use memhier_core::core::plan::BitPlan;
use memhier_core::sim::loader;
use memhier_core::stats::STATS_SECTIONS;
use memhier_core::{Config, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "memhier",
    author,
    version,
    about = "Trace-driven TLB, page table, and data cache simulator",
    long_about = "Replay a memory access trace through a data TLB, page table, L1 data cache, and optional L2 cache.\n\nThe configuration is the sectioned `Key: value` text format or JSON (files ending in .json).\nTrace lines are `R:<hex>` or `W:<hex>`.\n\nExamples:\n  memhier run --config trace.config --trace trace.dat\n  memhier run -c trace.config < trace.dat\n  memhier run -c cfg.json -t trace.dat --json\n  memhier plan -c trace.config"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a trace and report per-access results and statistics.
    Run {
        /// Configuration file (text or .json).
        #[arg(short, long)]
        config: PathBuf,

        /// Trace file; `-` reads stdin.
        #[arg(short, long, default_value = "-")]
        trace: PathBuf,

        /// Emit a single JSON report instead of the text tables.
        #[arg(long)]
        json: bool,

        /// Suppress the configuration summary and per-access rows.
        #[arg(short, long)]
        quiet: bool,

        /// Statistics sections to print (comma separated); all by default.
        #[arg(long, value_delimiter = ',')]
        sections: Vec<String>,
    },

    /// Validate a configuration and print its derived bit widths.
    Plan {
        /// Configuration file (text or .json).
        #[arg(short, long)]
        config: PathBuf,

        /// Print the bit plan as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            trace,
            json,
            quiet,
            sections,
        } => cmd_run(&config, &trace, json, quiet, &sections),
        Commands::Plan { config, json } => cmd_plan(&config, json),
    }
}

/// Prints `err` to stderr and exits with code 1.
fn fail(err: impl Display) -> ! {
    eprintln!("Error: {err}");
    process::exit(1);
}

fn load_config(path: &Path) -> Config {
    let config = loader::load_config(path).unwrap_or_else(|e| fail(e));
    tracing::info!(path = %path.display(), "configuration loaded");
    config
}

/// Replays `trace_path` against the hierarchy described by `config_path`.
///
/// Rows are printed as they are produced. Malformed trace lines are reported
/// on stderr and skipped. Exits with code 1 on configuration or I/O errors.
fn cmd_run(config_path: &Path, trace_path: &Path, json: bool, quiet: bool, sections: &[String]) {
    if let Some(bad) = sections
        .iter()
        .find(|s| !STATS_SECTIONS.contains(&s.as_str()))
    {
        fail(format!(
            "unknown stats section '{bad}' (expected one of: {})",
            STATS_SECTIONS.join(", ")
        ));
    }

    let config = load_config(config_path);
    let records = loader::load_trace(trace_path).unwrap_or_else(|e| fail(e));
    tracing::info!(path = %trace_path.display(), records = records.len(), "trace loaded");
    let mut sim = Simulator::new(&config).unwrap_or_else(|e| fail(e));

    if json {
        sim.run(records);
        let report = sim.finish();
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(e) => fail(e),
        }
        return;
    }

    let show_rows = !quiet;
    if show_rows {
        print!("{config}");
        println!();
        println!("{TRACE_HEADER}");
    }
    for record in records {
        if let Some(row) = sim.step(record) {
            if show_rows {
                println!("{row}");
            }
        }
    }

    let skipped = sim.skipped().len();
    if skipped > 0 {
        tracing::warn!(skipped, "malformed trace records skipped");
    }
    sim.hierarchy().stats().print_sections(sections);
}

/// Validates a configuration and prints its summary and bit plan.
fn cmd_plan(config_path: &Path, json: bool) {
    let config = load_config(config_path);
    let plan = BitPlan::new(&config).unwrap_or_else(|e| fail(e));

    if json {
        match serde_json::to_string_pretty(&plan) {
            Ok(text) => println!("{text}"),
            Err(e) => fail(e),
        }
    } else {
        print!("{config}");
        println!();
        println!("{plan:#?}");
    }
}
