//! Command line arguments and config assembly.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use snakepit_core::ArenaConfig;

#[derive(Debug, Parser)]
#[command(name = "snakepit", about = "Run a headless snake arena session")]
pub struct Args {
    /// JSON file with an `ArenaConfig`; missing fields use defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Display name of the human agent.
    #[arg(long)]
    pub name: Option<String>,

    /// Session seed (random when omitted).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of AI agents.
    #[arg(long)]
    pub bots: Option<usize>,

    /// Live food target.
    #[arg(long)]
    pub food: Option<usize>,

    /// Side length of the square world.
    #[arg(long)]
    pub world_size: Option<i32>,

    /// Ticks to run; 0 runs until the human dies.
    #[arg(long, default_value_t = 0)]
    pub ticks: u64,

    /// Sleep between ticks to honour the configured tick rate.
    #[arg(long)]
    pub realtime: bool,

    /// Let the forager brain steer the human too.
    #[arg(long)]
    pub autopilot: bool,

    /// Write the final world as JSON to this path.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

impl Args {
    /// Loads the config file (if any) and applies flag overrides.
    pub fn arena_config(&self) -> Result<ArenaConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ArenaConfig::default(),
        };
        if let Some(name) = &self.name {
            config = config.with_human_name(name);
        }

        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(bots) = self.bots {
            config.bot_count = bots;
        }
        if let Some(food) = self.food {
            config.food_count = food;
        }
        if let Some(size) = self.world_size {
            config.world_size = size;
        }

        config.validate().context("invalid arena configuration")?;
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<ArenaConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse config {}", path.display()))
}
