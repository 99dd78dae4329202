//! Vibration Fleet Simulation
//!
//! Generates summary-metric records for a small fleet of machines, for
//! exercising `rotor-sentinel` without real sensors. Every tick each machine
//! captures a synthesized waveform for its current condition state and
//! reduces it to RMS, peak and crest factor.
//!
//! - machine_05 starts with a bearing fault, the rest healthy
//! - each machine has a 1% chance per tick of switching to a random state
//!
//! # Usage
//! ```bash
//! ./simulation --ticks 60 --speed 0 --seed 7 > metrics.jsonl
//! ./rotor-sentinel analyze --input metrics.jsonl --fleet
//! ```

use anyhow::Result;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use clap::Parser;
use rand::prelude::*;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::info;

use rotor_sentinel::config::SynthesisConfig;
use rotor_sentinel::processing::{summarize_waveform, synthesize_waveform_with_rng, WaveformSummary};
use rotor_sentinel::{ConditionState, MetricRecord};

// ============================================================================
// Simulation Constants
// ============================================================================

/// Capture sample rate (Hz)
const SAMPLE_RATE_HZ: f64 = 2_000.0;
/// Imbalance gain of the field simulator
const SIM_IMBALANCE_GAIN: f64 = 1.5;
/// Measurement noise standard deviation
const SIM_NOISE_SCALE: f64 = 0.1;
/// Per-tick probability that a machine changes condition state
const STATE_CHANGE_PROBABILITY: f64 = 0.01;
/// Machine that starts out faulty
const FAULTY_MACHINE: &str = "machine_05";

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "vibration-simulation")]
#[command(about = "Vibration metric simulation for rotor-sentinel testing")]
#[command(version = "1.0")]
struct Args {
    /// Number of machines (machine_01 .. machine_NN)
    #[arg(short, long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..=99))]
    machines: u32,

    /// Number of ticks to simulate (0 = run forever)
    #[arg(short, long, default_value = "30")]
    ticks: u64,

    /// Simulated seconds between ticks
    #[arg(long, default_value = "2")]
    interval: u64,

    /// Time compression factor (1 = real-time, 0 = no delay)
    #[arg(short, long, default_value = "1")]
    speed: u32,

    /// Capture length in seconds
    #[arg(long, default_value = "1.0")]
    capture_secs: f64,

    /// Output format: json or csv
    #[arg(short, long, default_value = "json")]
    format: String,

    /// Suppress progress log (only output metric records)
    #[arg(short, long)]
    quiet: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,
}

// ============================================================================
// Simulation State
// ============================================================================

struct Machine {
    id: String,
    state: ConditionState,
}

struct SimulationState {
    rng: StdRng,
    machines: Vec<Machine>,
    synthesis: SynthesisConfig,
    clock: DateTime<Utc>,
    records_generated: u64,
    state_changes: u64,
}

impl SimulationState {
    fn new(machine_count: u32, capture_secs: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        let machines = (1..=machine_count)
            .map(|i| {
                let id = format!("machine_{i:02}");
                let state = if id == FAULTY_MACHINE {
                    ConditionState::BearingFault
                } else {
                    ConditionState::Healthy
                };
                Machine { id, state }
            })
            .collect();

        Self {
            rng,
            machines,
            synthesis: SynthesisConfig {
                sample_rate_hz: SAMPLE_RATE_HZ,
                duration_secs: capture_secs,
                imbalance_gain: SIM_IMBALANCE_GAIN,
                noise_scale: SIM_NOISE_SCALE,
            },
            clock: Utc::now(),
            records_generated: 0,
            state_changes: 0,
        }
    }

    /// Advance every machine by one tick and return its record.
    fn tick(&mut self) -> Result<Vec<MetricRecord>> {
        let mut records = Vec::with_capacity(self.machines.len());

        for machine in &mut self.machines {
            if self.rng.gen_bool(STATE_CHANGE_PROBABILITY) {
                if let Some(&next) = ConditionState::ALL.choose(&mut self.rng) {
                    info!(machine_id = %machine.id, from = %machine.state, to = %next, "State changed");
                    machine.state = next;
                    self.state_changes += 1;
                }
            }

            let waveform = synthesize_waveform_with_rng(machine.state, &self.synthesis, &mut self.rng)?;
            let summary = summarize_waveform(&waveform);
            let rounded = WaveformSummary {
                rms: round4(summary.rms),
                peak: round4(summary.peak),
                crest_factor: round4(summary.crest_factor),
            };

            records.push(MetricRecord {
                machine_id: Some(machine.id.clone()),
                sample: rounded.into_sample(self.clock, machine.state.as_str()).into(),
            });
        }

        self.records_generated += records.len() as u64;
        Ok(records)
    }
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(if args.quiet {
            tracing_subscriber::EnvFilter::new("warn")
        } else {
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        })
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let mut state = SimulationState::new(args.machines, args.capture_secs, args.seed);
    let tick_interval_sim = ChronoDuration::seconds(i64::try_from(args.interval)?);
    let tick_interval_real = (args.speed > 0)
        .then(|| Duration::from_secs_f64(args.interval as f64 / f64::from(args.speed)));

    info!(
        machines = args.machines,
        ticks = args.ticks,
        interval_secs = args.interval,
        speed = args.speed,
        seed = ?args.seed,
        "Vibration simulation start"
    );

    let start_time = Instant::now();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.format == "csv" {
        writeln!(out, "machine_id,timestamp,rms,peak,crest_factor,status")?;
    }

    let mut tick = 0u64;
    while args.ticks == 0 || tick < args.ticks {
        let loop_start = Instant::now();

        for record in state.tick()? {
            match args.format.as_str() {
                "csv" => {
                    let s = &record.sample;
                    writeln!(
                        out,
                        "{},{},{:.4},{:.4},{:.4},{}",
                        record.machine_id.as_deref().unwrap_or_default(),
                        s.timestamp.as_deref().unwrap_or_default(),
                        s.rms.unwrap_or_default(),
                        s.peak.unwrap_or_default(),
                        s.crest_factor.unwrap_or_default(),
                        s.status.as_deref().unwrap_or_default(),
                    )?;
                }
                _ => writeln!(out, "{}", serde_json::to_string(&record)?)?,
            }
        }
        out.flush()?;

        tick += 1;
        state.clock += tick_interval_sim;

        if let Some(interval) = tick_interval_real {
            let elapsed = loop_start.elapsed();
            if elapsed < interval {
                std::thread::sleep(interval - elapsed);
            }
        }
    }

    info!(
        records = state.records_generated,
        state_changes = state.state_changes,
        real_secs = format!("{:.1}", start_time.elapsed().as_secs_f64()),
        "Simulation complete"
    );

    Ok(())
}
