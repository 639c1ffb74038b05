#![deny(unsafe_code)]
#![allow(clippy::print_stdout)]

//! Command-line entry point: runs the registered KAT suite and prints a summary.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use kat_validation::logging::{DEFAULT_FILTER, init_tracing};
use kat_validation::{HarnessConfig, KatRunner, TestRegistry, VectorExecutor};

#[derive(Parser, Debug)]
#[command(name = "kat-runner", about = "Run hash known-answer test vectors")]
struct Args {
    /// JSON harness configuration
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Only run vectors whose test case or vector name contains this string
    #[arg(short, long, value_name = "STR")]
    filter: Option<String>,

    /// Skip the one-shot digest pass
    #[arg(long, action = clap::ArgAction::SetTrue)]
    no_one_shot: bool,

    /// Do not time the streaming pass
    #[arg(long, action = clap::ArgAction::SetTrue)]
    no_timing: bool,

    /// Write the summary as JSON to this path
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// List registered test cases and vectors, then exit
    #[arg(long, action = clap::ArgAction::SetTrue)]
    list: bool,
}

fn load_config(args: &Args) -> Result<HarnessConfig> {
    let mut config = match &args.config {
        Some(path) => HarnessConfig::from_json_file(path)?,
        None => HarnessConfig::new(),
    };
    if let Some(filter) = &args.filter {
        config = config.with_name_filter(filter.clone());
    }
    if args.no_one_shot {
        config = config.with_verify_one_shot(false);
    }
    if args.no_timing {
        config = config.with_measure_time(false);
    }
    Ok(config.build()?)
}

fn list(registry: &TestRegistry) {
    for case in registry.iter() {
        println!("{}", case.name);
        for vector in case.vectors {
            println!("  {} ({} bytes)", vector.name, vector.input.message_len());
        }
    }
}

fn run(args: &Args) -> Result<bool> {
    init_tracing(DEFAULT_FILTER).map_err(|e| anyhow!("initializing logging: {e}"))?;

    let registry = TestRegistry::with_defaults();
    if args.list {
        list(&registry);
        return Ok(true);
    }

    let config = load_config(args)?;
    let mut executor = VectorExecutor::new(config);
    let mut runner = KatRunner::new();
    runner.run_suite(&registry, &mut executor);

    let summary = runner.finish();
    summary.print();

    if let Some(path) = &args.json {
        let json = summary.to_json().context("serializing summary")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }

    Ok(summary.all_passed())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("kat-runner: {e:#}");
            ExitCode::from(2)
        }
    }
}
