//! Headless driver for a snakepit session.
//!
//! Owns the fixed-rate loop: it builds a session from flags and an optional
//! JSON config, feeds the human's input each tick, logs the leaderboard, and
//! can dump the final world as JSON.

mod cli;
mod pilot;

use std::fs::File;
use std::io::BufWriter;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use snakepit_core::{HumanStatus, Simulation, World};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::pilot::Pilot;

/// Rows shown in the periodic leaderboard.
const LEADERBOARD_ROWS: usize = 10;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = args.arena_config()?;

    info!("snakepit v{}", env!("CARGO_PKG_VERSION"));

    let mut sim = Simulation::new(&config).context("failed to create session")?;
    let mut pilot = if args.autopilot {
        Pilot::autopilot(sim.seed())
    } else {
        Pilot::Square
    };

    let tick_interval = Duration::from_secs_f64(1.0 / f64::from(config.ticks_per_second));
    let log_every = u64::from(config.ticks_per_second);

    while args.ticks == 0 || sim.tick() < args.ticks {
        let started = Instant::now();

        let input = pilot.next_input(sim.world());
        let report = sim.step(input);
        for (agent, cause) in report.deaths() {
            debug!(%agent, ?cause, "death");
        }

        if sim.tick() % log_every == 0 {
            log_leaderboard(sim.world());
        }
        if matches!(sim.world().human_status(), HumanStatus::Defeated { .. }) {
            break;
        }

        if args.realtime {
            if let Some(remaining) = tick_interval.checked_sub(started.elapsed()) {
                thread::sleep(remaining);
            }
        }
    }

    let world = sim.world();
    match world.human_status() {
        HumanStatus::Defeated { final_score } => {
            info!(tick = world.tick(), final_score, "human defeated");
        }
        HumanStatus::Playing { score } => {
            info!(tick = world.tick(), score, "session ended with the human alive");
        }
        HumanStatus::Absent => info!(tick = world.tick(), "session ended"),
    }
    log_leaderboard(world);

    if let Some(path) = &args.snapshot {
        let file = File::create(path)
            .with_context(|| format!("failed to create snapshot {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), world)
            .with_context(|| format!("failed to write snapshot {}", path.display()))?;
        info!(path = %path.display(), "snapshot written");
    }

    Ok(())
}

fn log_leaderboard(world: &World) {
    let summary = world.population_summary();
    info!(
        tick = world.tick(),
        alive = summary.alive,
        total = summary.total,
        food = world.foods().len(),
        "leaderboard"
    );
    for (rank, entry) in world.leaderboard(LEADERBOARD_ROWS).iter().enumerate() {
        let marker = if entry.is_human { " (you)" } else { "" };
        info!("{:>2}. {:<14} {:>5}{}", rank + 1, entry.name, entry.score, marker);
    }
}
