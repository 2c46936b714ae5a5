// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use clap::{Parser, ValueEnum};
use grading_core::{
    ConfigError, FastrandRandom, Orchestrator, ShutdownPolicy, SimulationConfig,
    SimulationReport, TokioTimer,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Drain,
    Discard,
}

impl From<PolicyArg> for ShutdownPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Drain => ShutdownPolicy::Drain,
            PolicyArg::Discard => ShutdownPolicy::Discard,
        }
    }
}

/// Simulates students submitting assignments to a pool of grading assistants
#[derive(Debug, Parser)]
#[command(name = "grading-simulator", version)]
struct Args {
    /// JSON configuration file; defaults are used when it does not exist
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    #[arg(long)]
    students: Option<u32>,

    #[arg(long)]
    assistants: Option<usize>,

    /// Upper bound of a student's think time in milliseconds
    #[arg(long)]
    max_think_ms: Option<u64>,

    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,
}

fn load_config(args: &Args) -> Result<SimulationConfig, ConfigError> {
    let mut config = match SimulationConfig::load(&args.config) {
        Ok(config) => config,
        Err(ConfigError::Io(e)) => {
            warn!(
                "Failed to read {}: {}, using default configuration",
                args.config.display(),
                e
            );
            SimulationConfig::default()
        }
        Err(e) => return Err(e),
    };

    if let Some(students) = args.students {
        config.num_students = students;
    }
    if let Some(assistants) = args.assistants {
        config.num_assistants = assistants;
    }
    if let Some(max_think_ms) = args.max_think_ms {
        config.max_think_time_ms = max_think_ms;
    }
    if let Some(policy) = args.policy {
        config.shutdown_policy = policy.into();
    }

    config.validate()?;
    Ok(config)
}

fn print_report(report: &SimulationReport) {
    println!("\n=== RESULTS ===");
    for worker in &report.workers {
        println!("{}: {} graded", worker.name, worker.completed);
    }
    println!("\nSubmitted: {}", report.submitted);
    println!("Graded: {}", report.graded);
    if report.abandoned > 0 {
        println!("Abandoned in queue: {}", report.abandoned);
    }
    if report.dropped > 0 {
        println!("Dropped after finalize: {}", report.dropped);
    }
    if report.failed_workers > 0 {
        println!("Assistants terminated abnormally: {}", report.failed_workers);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let start_time = Instant::now();
    let args = Args::parse();
    let config = load_config(&args)?;

    info!(
        students = config.num_students,
        assistants = config.num_assistants,
        max_think_ms = config.max_think_time_ms,
        policy = ?config.shutdown_policy,
        "configuration loaded"
    );

    let orchestrator = Orchestrator::new(config, Arc::new(TokioTimer), Arc::new(FastrandRandom));

    let ctrl_c_token = orchestrator.cancellation_token();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                warn!("Ctrl+C received, finalizing grading");
                ctrl_c_token.cancel();
            }
            Err(e) => warn!("Failed to listen for Ctrl+C: {}", e),
        }
    });

    let report = orchestrator.run().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    info!("Total time: {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}
