//! Headless runner: drives the simulation without a window.
//!
//! Environment:
//! - `ORBFALL_CONFIG`: path to a JSON [`ArenaConfig`]; missing fields take defaults
//! - `ORBFALL_SEED`: overrides the configured seed
//! - `ORBFALL_TICKS`: ticks to run (default 3600)
//! - `ORBFALL_HZ`: fixed-step clock rate (default 60)
//! - `ORBFALL_SUMMARY`: path to write the final summary as JSON
//! - `RUST_LOG`: tracing filter

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use orbfall_core::{ArenaConfig, InputState, Simulation, TickReport};
use serde_json::json;
use tracing::info;

const DEFAULT_TICKS: u64 = 3600;
const DEFAULT_HZ: u32 = 60;

fn read_env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

fn read_env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

fn load_config() -> Result<ArenaConfig> {
    let mut config = match env::var_os("ORBFALL_CONFIG").map(PathBuf::from) {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ArenaConfig::default(),
    };
    if let Ok(seed) = env::var("ORBFALL_SEED") {
        config.seed = seed
            .parse()
            .with_context(|| format!("ORBFALL_SEED is not a u64: {seed}"))?;
    }
    Ok(config)
}

/// Input for a tick: sweep the heading back and forth while firing, with
/// short thrust bursts.
fn scripted_input(tick: u64) -> InputState {
    let mut input = InputState::FIRE;
    if (tick / 90) % 2 == 0 {
        input |= InputState::LEFT;
    } else {
        input |= InputState::RIGHT;
    }
    if tick % 120 < 10 {
        input |= InputState::UP;
    }
    if tick % 120 >= 60 && tick % 120 < 70 {
        input |= InputState::DOWN;
    }
    input
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let config = load_config()?;
    let ticks = read_env_u64("ORBFALL_TICKS", DEFAULT_TICKS);
    let hz = read_env_u32("ORBFALL_HZ", DEFAULT_HZ);
    let seed = config.seed;

    let mut sim = Simulation::fixed_step(config, hz).context("invalid arena configuration")?;

    let mut totals = TickReport::default();
    for tick in 1..=ticks {
        let score = sim.tick(scripted_input(tick));
        let report = sim.last_report();
        totals.projectiles_fired += report.projectiles_fired;
        totals.obstacles_spawned += report.obstacles_spawned;
        totals.pickups_derived += report.pickups_derived;
        totals.resolve.contacts += report.resolve.contacts;

        if tick % u64::from(hz) == 0 {
            info!(
                tick,
                score,
                obstacles = sim.obstacles().len(),
                pickups = sim.pickups().len(),
                "progress"
            );
        }
    }

    let digest = sim.digest();
    println!("Run complete.");
    println!("  Seed:              {seed}");
    println!("  Ticks:             {}", sim.ticks());
    println!("  Final score:       {}", sim.score());
    println!("  Projectiles fired: {}", totals.projectiles_fired);
    println!("  Obstacles spawned: {}", totals.obstacles_spawned);
    println!("  Pickups released:  {}", totals.pickups_derived);
    println!("  Contacts:          {}", totals.resolve.contacts);
    println!("  State digest:      0x{digest:016x}");

    if let Some(path) = env::var_os("ORBFALL_SUMMARY").map(PathBuf::from) {
        let summary = json!({
            "seed": seed,
            "ticks": sim.ticks(),
            "score": sim.score(),
            "digest": format!("{digest:016x}"),
            "totals": totals,
            "last_tick": sim.last_report(),
        });
        let bytes = serde_json::to_vec_pretty(&summary).context("failed to encode summary")?;
        fs::write(&path, bytes)
            .with_context(|| format!("failed to write summary: {}", path.display()))?;
        info!(path = %path.display(), "summary written");
    }

    Ok(())
}
