//! Rotor Sentinel - vibration condition monitoring CLI
//!
//! # Usage
//!
//! ```bash
//! # Analyze a metric history (JSON array or JSON lines); empty input uses
//! # a synthetic fallback history
//! rotor-sentinel analyze --input metrics.jsonl --fleet
//!
//! # Spectrum and envelope of a synthesized capture
//! rotor-sentinel spectrum --state bearing_fault --full
//!
//! # Machine-type profile with its signature spectrum
//! rotor-sentinel profile --machine motor-07 --signature
//!
//! # Recompute every few seconds from a file the simulator appends to
//! ./simulation --speed 0 --ticks 0 > metrics.jsonl &
//! rotor-sentinel watch --input metrics.jsonl
//! ```
//!
//! # Environment Variables
//!
//! - `ROTOR_SENTINEL_CONFIG`: Path to the engine config (default: ./rotor_sentinel.toml)
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use rotor_sentinel::engine::{read_markers, MarkerReading};
use rotor_sentinel::processing::WaveformSummary;
use rotor_sentinel::{
    load_histories, summarize_fleet, ConditionEngine, ConditionState, EngineConfig, EnvelopePoint,
    FaultScores, FleetSummary, MachineReport, MachineTypeProfile, MetricSample, SpectralBin,
};

/// Machine used for records without a `machine_id`
const DEFAULT_MACHINE: &str = "machine_01";

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "rotor-sentinel")]
#[command(about = "Vibration condition monitoring for rotating machinery")]
#[command(version)]
struct CliArgs {
    /// Engine config file (overrides $ROTOR_SENTINEL_CONFIG and ./rotor_sentinel.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Random seed for synthesis and fallback history
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Health, RUL, fault fingerprint and machine profile from a metric history
    Analyze {
        /// Metric records file ("-" for stdin). Omit to use the fallback history.
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Only analyze this machine
        #[arg(short, long)]
        machine: Option<String>,
        /// Append a fleet summary
        #[arg(long)]
        fleet: bool,
    },

    /// Spectrum, envelope and dominant peaks of a synthesized capture
    Spectrum {
        /// Condition state to synthesize (healthy, imbalance, misalignment, bearing_fault)
        #[arg(short, long)]
        state: Option<ConditionState>,
        /// Read markers for this machine; without --state, synthesize its dominant condition
        #[arg(short, long)]
        machine: Option<String>,
        /// Metric records for --machine ("-" for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Include the full display spectrum and envelope
        #[arg(long)]
        full: bool,
    },

    /// Machine-type classification, sub-scores and reference markers
    Profile {
        #[arg(short, long)]
        machine: String,
        /// Metric records ("-" for stdin). Omit to use the fallback history.
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Include the synthetic signature spectrum
        #[arg(long)]
        signature: bool,
    },

    /// Re-read a metric file and recompute on a fixed cadence
    Watch {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        machine: Option<String>,
        /// Seconds between recomputations (default: scheduler.refresh_interval_secs)
        #[arg(long)]
        interval: Option<u64>,
        /// Stop after this many recomputations (default: run until Ctrl+C)
        #[arg(long)]
        iterations: Option<u64>,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Print built-in defaults instead of the loaded config
        #[arg(long)]
        defaults: bool,
    },
}

// ============================================================================
// Output Shapes
// ============================================================================

#[derive(Serialize)]
struct AnalyzeOutput {
    reports: Vec<MachineReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fleet: Option<FleetSummary>,
}

#[derive(Serialize)]
struct SpectrumOutput {
    state: ConditionState,
    description: &'static str,
    summary: WaveformSummary,
    dominant_peaks: Vec<SpectralBin>,
    reference_markers: Vec<MarkerReading>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    marker_readings: Vec<MarkerReading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    spectrum: Option<Vec<SpectralBin>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    envelope: Option<Vec<EnvelopePoint>>,
}

#[derive(Serialize)]
struct ProfileOutput {
    machine_id: String,
    used_fallback: bool,
    fault_scores: FaultScores,
    profile: MachineTypeProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    signature: Option<Vec<SpectralBin>>,
}

// ============================================================================
// Helpers
// ============================================================================

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(p) => {
            let config = EngineConfig::load_from_file(p)
                .with_context(|| format!("Failed to load config {}", p.display()))?;
            info!(path = %p.display(), "Loaded engine config");
            Ok(config)
        }
        None => Ok(EngineConfig::load()),
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Read a records document from a file, from stdin ("-"), or nothing.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        None => Ok(String::new()),
        Some(p) if p.as_os_str() == "-" => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read metric records from stdin")?;
            Ok(text)
        }
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read metric records from {}", p.display())),
    }
}

/// Per-machine histories, narrowed to `machine` when given. A requested
/// machine with no records, or an empty document, yields an empty history
/// (the engine then substitutes its fallback).
fn histories_for(text: &str, machine: Option<&str>) -> Result<BTreeMap<String, Vec<MetricSample>>> {
    let default_machine = machine.unwrap_or(DEFAULT_MACHINE);
    let mut histories =
        load_histories(text, default_machine).context("Invalid metric records")?;

    if let Some(m) = machine {
        histories.retain(|id, _| id == m);
        histories.entry(m.to_string()).or_default();
    } else if histories.is_empty() {
        histories.insert(DEFAULT_MACHINE.to_string(), Vec::new());
    }
    Ok(histories)
}

fn analyze_one(
    engine: &ConditionEngine,
    machine_id: &str,
    samples: &[MetricSample],
    rng: &mut StdRng,
) -> Result<MachineReport> {
    engine
        .analyze_at(machine_id, samples, Utc::now(), rng)
        .with_context(|| format!("No insight for {machine_id}: history and fallback are both empty"))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ============================================================================
// Subcommands
// ============================================================================

fn run_analyze(
    engine: &ConditionEngine,
    input: Option<&Path>,
    machine: Option<&str>,
    fleet: bool,
    rng: &mut StdRng,
) -> Result<()> {
    let text = read_input(input)?;
    let histories = histories_for(&text, machine)?;

    let reports = histories
        .iter()
        .map(|(id, samples)| analyze_one(engine, id, samples, rng))
        .collect::<Result<Vec<_>>>()?;

    let fleet = fleet.then(|| summarize_fleet(&reports));
    print_json(&AnalyzeOutput { reports, fleet })
}

fn run_spectrum(
    engine: &ConditionEngine,
    state: Option<ConditionState>,
    machine: Option<&str>,
    input: Option<&Path>,
    full: bool,
    rng: &mut StdRng,
) -> Result<()> {
    let report = match machine {
        Some(m) => {
            let text = read_input(input)?;
            let histories = histories_for(&text, Some(m))?;
            let samples = histories.get(m).map(Vec::as_slice).unwrap_or_default();
            Some(analyze_one(engine, m, samples, rng)?)
        }
        None => None,
    };

    let state = state
        .or_else(|| report.as_ref().map(|r| r.dominant_condition))
        .unwrap_or_default();
    info!(state = %state, "Synthesizing capture");

    let view = engine
        .spectral_view_with_rng(state, rng)
        .context("Failed to build spectral view")?;
    let marker_readings = report
        .as_ref()
        .map(|r| read_markers(&view.spectrum, &r.profile.frequency_markers))
        .unwrap_or_default();

    print_json(&SpectrumOutput {
        state,
        description: state.description(),
        summary: view.summary,
        dominant_peaks: view.dominant_peaks,
        reference_markers: view.reference_markers,
        marker_readings,
        spectrum: full.then_some(view.spectrum),
        envelope: full.then_some(view.envelope),
    })
}

fn run_profile(
    engine: &ConditionEngine,
    machine: &str,
    input: Option<&Path>,
    signature: bool,
    rng: &mut StdRng,
) -> Result<()> {
    let text = read_input(input)?;
    let histories = histories_for(&text, Some(machine))?;
    let samples = histories.get(machine).map(Vec::as_slice).unwrap_or_default();
    let report = analyze_one(engine, machine, samples, rng)?;

    let signature = signature.then(|| engine.signature(&report.profile, rng));
    print_json(&ProfileOutput {
        machine_id: report.machine_id,
        used_fallback: report.used_fallback,
        fault_scores: report.insights.fault_scores,
        profile: report.profile,
        signature,
    })
}

async fn run_watch(
    engine: &ConditionEngine,
    input: &Path,
    machine: Option<&str>,
    interval_secs: u64,
    iterations: Option<u64>,
    rng: &mut StdRng,
    cancel: CancellationToken,
) -> Result<()> {
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    let mut completed = 0u64;

    info!(
        input = %input.display(),
        interval_secs,
        "Watching metric file (Ctrl+C to stop)"
    );

    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let text = match tokio::fs::read_to_string(input).await {
            Ok(text) => text,
            Err(e) => {
                warn!(input = %input.display(), error = %e, "Failed to read metric file, will retry");
                continue;
            }
        };

        let histories = match histories_for(&text, machine) {
            Ok(h) => h,
            Err(e) => {
                warn!(error = %e, "Rejected metric file contents, will retry");
                continue;
            }
        };

        let mut reports = Vec::with_capacity(histories.len());
        for (id, samples) in &histories {
            let report = analyze_one(engine, id, samples, rng)?;
            println!("{}", serde_json::to_string(&report)?);
            reports.push(report);
        }

        let fleet = summarize_fleet(&reports);
        info!(
            machines = fleet.total_machines,
            healthy = fleet.healthy,
            warning = fleet.warning,
            critical = fleet.critical,
            avg_health = %format!("{:.1}", fleet.avg_health),
            "Recomputed"
        );

        completed += 1;
        if iterations.is_some_and(|n| completed >= n) {
            break;
        }
    }

    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    if let SubCommand::Config { defaults: true } = &args.command {
        print!("{}", EngineConfig::default().to_toml()?);
        return Ok(());
    }

    let config = load_config(args.config.as_deref())?;
    let engine = ConditionEngine::new(config);
    let mut rng = make_rng(args.seed);

    match &args.command {
        SubCommand::Analyze {
            input,
            machine,
            fleet,
        } => run_analyze(&engine, input.as_deref(), machine.as_deref(), *fleet, &mut rng),
        SubCommand::Spectrum {
            state,
            machine,
            input,
            full,
        } => run_spectrum(
            &engine,
            *state,
            machine.as_deref(),
            input.as_deref(),
            *full,
            &mut rng,
        ),
        SubCommand::Profile {
            machine,
            input,
            signature,
        } => run_profile(&engine, machine, input.as_deref(), *signature, &mut rng),
        SubCommand::Watch {
            input,
            machine,
            interval,
            iterations,
        } => {
            let cancel = CancellationToken::new();
            let shutdown = cancel.clone();
            tokio::spawn(async move {
                tokio::signal::ctrl_c().await.ok();
                info!("Received Ctrl+C, stopping watch");
                shutdown.cancel();
            });

            let interval_secs =
                interval.unwrap_or(engine.config().scheduler.refresh_interval_secs);
            run_watch(
                &engine,
                input,
                machine.as_deref(),
                interval_secs,
                *iterations,
                &mut rng,
                cancel,
            )
            .await
        }
        SubCommand::Config { .. } => {
            print!("{}", engine.config().to_toml()?);
            Ok(())
        }
    }
}
