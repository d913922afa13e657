//! Prime gap CLI
//!
//! Demonstration harness and command-line front end for the deterministic
//! prime gap predictor.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prime_gap_core::{
    evaluate, load_scenarios, Calibration, GapPredictor, LockOutcome, LockReport, Scenario,
};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const RULE_WIDTH: usize = 80;

#[derive(Parser)]
#[command(name = "prime-gap")]
#[command(about = "Deterministic prime gap prediction (LGO hybrid model)")]
struct Cli {
    /// Calibration set (JSON); defaults to the published constants
    #[arg(long, global = true)]
    calibration: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the two calibration scenarios and report the deterministic lock
    Demo,

    /// Predict the gap after a single prime
    Predict {
        /// Prime value p_n
        #[arg(long = "p-n", allow_hyphen_values = true)]
        p_n: i128,

        /// Index of p_n in the prime sequence
        #[arg(long, allow_hyphen_values = true)]
        index: i64,

        /// Previous prime (unused by the formula)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        prev: i128,

        /// Print the prediction as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate a scenario file of observed gaps
    Batch {
        /// Scenario file (JSON)
        file: PathBuf,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("❌ {:#}", e);
            std::process::exit(2);
        }
    }
}

/// Returns Ok(false) when the predictor rejected an input
fn run(cli: Cli) -> Result<bool> {
    let predictor = GapPredictor::new(load_calibration(cli.calibration.as_ref())?);

    match cli.command {
        Commands::Demo => {
            demo(&predictor);
            Ok(true)
        }
        Commands::Predict { p_n, index, prev, json } => predict(&predictor, p_n, index, prev, json),
        Commands::Batch { file, json } => {
            let scenarios = load_scenarios(&file)
                .with_context(|| format!("loading scenarios from {}", file.display()))?;
            let report = evaluate(&predictor, &scenarios);
            if json {
                println!("{}", report.to_json()?);
            } else {
                print_report(&report);
            }
            Ok(report.rejected == 0)
        }
    }
}

fn load_calibration(path: Option<&PathBuf>) -> Result<Calibration> {
    let Some(path) = path else {
        return Ok(Calibration::default());
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading calibration {}", path.display()))?;
    let calibration = Calibration::from_json(&json)
        .with_context(|| format!("parsing calibration {}", path.display()))?;

    anyhow::ensure!(calibration.is_finite(), "calibration values must be finite");
    tracing::info!(?calibration, "loaded calibration");
    Ok(calibration)
}

fn demo(predictor: &GapPredictor) {
    let rule = "=".repeat(RULE_WIDTH);

    println!("\n{}", rule);
    println!("--- LGO HYBRID DETERMINISTIC MODEL (LGO 6.0) ---");
    println!(
        "--- Calibration using GOUFT Constant C_ROOT={} ---",
        predictor.calibration().root_scaling
    );
    println!("{}", rule);

    for scenario in Scenario::demo_scenarios() {
        print_outcome(&LockOutcome::run(predictor, &scenario));
    }

    println!("\n{}", rule);
}

fn print_outcome(outcome: &LockOutcome) {
    let s = &outcome.scenario;
    println!("\n--- PRIME P_N = {} (Index={}) ---", s.p_n, s.n_index);

    let Some(p) = &outcome.prediction else {
        println!("Observed Gap (Target): {}", s.observed_gap);
        println!(
            "DETERMINISTIC LOCK: FAILURE ({})",
            outcome.error.as_deref().unwrap_or("prediction rejected")
        );
        return;
    };

    println!("PNT Baseline Gap (ln({})): {:.4}", s.p_n, p.axes.pnt_baseline());
    println!("Field Determined: {}", p.field_type);
    println!("Observed Gap (Target): {}", s.observed_gap);
    println!("Deterministic Magnitude (Psi_n): {:.10}", p.psi_n);
    println!("LGO Predicted Integer Gap: {}", p.predicted_gap);
    if p.precision.is_degraded() {
        println!("Precision: degraded (p_n exceeds 2^53)");
    }
    println!(
        "DETERMINISTIC LOCK: {}",
        if outcome.locked {
            "SUCCESS"
        } else {
            "FAILURE (Simulation Failure to Match Simple PNT Rounding)"
        }
    );
}

fn predict(predictor: &GapPredictor, p_n: i128, index: i64, prev: i128, json: bool) -> Result<bool> {
    match predictor.predict(p_n, index, prev) {
        Ok(p) if json => {
            println!("{}", serde_json::to_string_pretty(&p)?);
            Ok(true)
        }
        Ok(p) => {
            println!("PNT Baseline Gap (ln({})): {:.4}", p_n, p.axes.pnt_baseline());
            println!("Field Determined: {}", p.field_type);
            println!("Deterministic Magnitude (Psi_n): {:.10}", p.psi_n);
            println!("Predicted Gap: {}", p.predicted_gap);
            if p.precision.is_degraded() {
                println!("Precision: degraded (p_n exceeds 2^53)");
            }
            Ok(true)
        }
        Err(e) => {
            println!("FAILURE: {}", e);
            Ok(false)
        }
    }
}

fn print_report(report: &LockReport) {
    for outcome in &report.outcomes {
        print_outcome(outcome);
    }

    println!("\n{}", "=".repeat(RULE_WIDTH));
    println!(
        "Locked: {}/{} ({:.1}%), rejected: {}",
        report.locked(),
        report.total(),
        report.lock_rate() * 100.0,
        report.rejected
    );
    for field in prime_gap_core::FieldType::all() {
        let tally = report.tally(field);
        println!("  {}: {} locked, {} missed", field, tally.locked, tally.missed);
    }
    if let Some(mae) = report.mean_abs_residual() {
        println!("Mean |predicted - observed|: {:.3}", mae);
    }
}
