//! # Snakepit Core
//!
//! Deterministic simulation core for a multi-agent snake arena.
//!
//! One human-controlled snake shares a square world with a population of
//! AI-controlled snakes and a pool of food. Each call to
//! [`step`](simulation::step) advances the whole world by one discrete tick:
//! bots decide, everyone moves, collisions kill, eaters grow, food refills,
//! and dead bots respawn under their old identity.
//!
//! ## Architecture
//!
//! - **Entities**: agents (snakes) and food ([`entity`], [`food`])
//! - **Brains**: read-only deciders for bots ([`brain`])
//! - **Resolvers**: write the planned outcome into the next world ([`resolver`])
//! - **Simulation**: the 4-phase step and a double-buffered driver ([`simulation`])
//!
//! The core does no I/O. Rendering, input capture, and the fixed-rate loop
//! belong to the caller.
//!
//! ## Usage
//!
//! ```
//! use snakepit_core::{ArenaConfig, HumanStatus, Simulation};
//! use tessera::Direction;
//!
//! let config = ArenaConfig::default().with_bots(20).with_food(100).with_seed(1);
//! let mut sim = Simulation::new(&config).unwrap();
//!
//! sim.step(Some(Direction::Left));
//! sim.step(None);
//!
//! let world = sim.world();
//! assert_eq!(world.tick(), 2);
//! assert_eq!(world.foods().len(), 100);
//! assert!(world.leaderboard(10).len() <= 10);
//! assert_ne!(world.human_status(), HumanStatus::Absent);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export tessera for grid types
pub use tessera;

pub mod brain;
pub mod config;
pub mod entity;
pub mod food;
pub mod hash;
pub mod resolver;
pub mod simulation;
pub mod transition;
pub mod world;
pub mod world_view;

pub use config::{ArenaConfig, ConfigError};
pub use entity::{Agent, AgentId, Food, FoodId};
pub use hash::hash_world;
pub use simulation::{step, Simulation};
pub use transition::{DeathCause, StepEvent, StepReport};
pub use world::{create_session, HumanStatus, World};

#[cfg(test)]
mod tests;
