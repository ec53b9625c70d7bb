//! Session configuration.
//!
//! [`ArenaConfig`] carries every tunable of a session. Defaults reproduce the
//! classic "one player against 99 bots" arena.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entity::INITIAL_LENGTH;
use crate::food::FOOD_TARGET;

/// Default side length of the world in cells.
pub const DEFAULT_WORLD_SIZE: i32 = 200;
/// Default number of AI agents.
pub const DEFAULT_BOT_COUNT: usize = 99;
/// Default visible window side in cells.
pub const DEFAULT_VIEWPORT: i32 = 40;
/// Default driver cadence.
pub const DEFAULT_TICKS_PER_SECOND: u32 = 15;

/// Largest accepted driver cadence.
pub const MAX_TICKS_PER_SECOND: u32 = 240;

/// Largest accepted world side. Every step indexes the world densely, so the
/// cell count bounds per-tick memory.
pub const MAX_WORLD_SIZE: i32 = 1024;

/// Errors raised while validating an [`ArenaConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The world cannot hold a freshly created agent.
    #[error("world size {size} is smaller than the initial agent length {min}")]
    WorldTooSmall {
        /// Requested side length.
        size: i32,
        /// Minimum accepted side length.
        min: i32,
    },
    /// The world is too large to index every tick.
    #[error("world size {size} exceeds the maximum of {max}")]
    WorldTooLarge {
        /// Requested side length.
        size: i32,
        /// Maximum accepted side length.
        max: i32,
    },
    /// A viewport side is zero or negative.
    #[error("viewport must be positive, got {width}x{height}")]
    InvalidViewport {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },
    /// The driver cadence is outside the accepted range.
    #[error("ticks per second must be between 1 and {max}, got {value}")]
    InvalidTickRate {
        /// Requested cadence.
        value: u32,
        /// Largest accepted cadence.
        max: u32,
    },
    /// The initial bodies need more cells than the world has.
    #[error("{agents} agents of {length} segments do not fit in a world of {cells} cells")]
    Overcrowded {
        /// Requested agent count including the human.
        agents: usize,
        /// Segments per freshly created agent.
        length: usize,
        /// Cells in the world.
        cells: usize,
    },
}

/// Configuration for an arena session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Display name of the human agent.
    pub human_name: String,
    /// Number of AI agents kept alive at all times.
    pub bot_count: usize,
    /// Live food target.
    pub food_count: usize,
    /// Side length of the square world.
    pub world_size: i32,
    /// Visible window width, used to centre the viewport on the human.
    pub viewport_width: i32,
    /// Visible window height.
    pub viewport_height: i32,
    /// Cadence the external driver should call `step` at.
    pub ticks_per_second: u32,
    /// Seed for the session RNG. `None` picks one from entropy.
    pub seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            human_name: "Player 1".to_string(),
            bot_count: DEFAULT_BOT_COUNT,
            food_count: FOOD_TARGET,
            world_size: DEFAULT_WORLD_SIZE,
            viewport_width: DEFAULT_VIEWPORT,
            viewport_height: DEFAULT_VIEWPORT,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            seed: None,
        }
    }
}

impl ArenaConfig {
    /// Set the human's display name.
    #[must_use]
    pub fn with_human_name(mut self, name: &str) -> Self {
        self.human_name = name.to_string();
        self
    }

    /// Set the number of bots.
    #[must_use]
    pub fn with_bots(mut self, bot_count: usize) -> Self {
        self.bot_count = bot_count;
        self
    }

    /// Set the food target.
    #[must_use]
    pub fn with_food(mut self, food_count: usize) -> Self {
        self.food_count = food_count;
        self
    }

    /// Set the world side length.
    #[must_use]
    pub fn with_world_size(mut self, world_size: i32) -> Self {
        self.world_size = world_size;
        self
    }

    /// Set the viewport dimensions.
    #[must_use]
    pub fn with_viewport(mut self, width: i32, height: i32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Fix the session seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that a session can be built from this configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min = i32::try_from(INITIAL_LENGTH).unwrap_or(i32::MAX);
        if self.world_size < min {
            return Err(ConfigError::WorldTooSmall {
                size: self.world_size,
                min,
            });
        }
        if self.world_size > MAX_WORLD_SIZE {
            return Err(ConfigError::WorldTooLarge {
                size: self.world_size,
                max: MAX_WORLD_SIZE,
            });
        }
        if self.viewport_width <= 0 || self.viewport_height <= 0 {
            return Err(ConfigError::InvalidViewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        if self.ticks_per_second == 0 || self.ticks_per_second > MAX_TICKS_PER_SECOND {
            return Err(ConfigError::InvalidTickRate {
                value: self.ticks_per_second,
                max: MAX_TICKS_PER_SECOND,
            });
        }
        let side = usize::try_from(self.world_size).unwrap_or(0);
        let cells = side * side;
        let agents = self.bot_count.saturating_add(1);
        if agents.saturating_mul(INITIAL_LENGTH) > cells {
            return Err(ConfigError::Overcrowded {
                agents,
                length: INITIAL_LENGTH,
                cells,
            });
        }
        Ok(())
    }
}
