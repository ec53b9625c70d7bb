//! Decision making for AI-controlled agents.
//!
//! A [`Brain`] picks one direction per agent per tick from a read-only
//! [`WorldView`] of the pre-tick world. Brains never mutate state: the step
//! engine feeds their answers through the same reversal rule and collision
//! planner as human input.
//!
//! # Parallelism
//!
//! Decisions for different agents are independent, so the engine runs them
//! in parallel. Each call receives its own RNG, seeded from the session RNG
//! and the agent id, so the result does not depend on thread scheduling.
//!
//! # Example
//!
//! ```
//! use snakepit_core::brain::{Brain, DecisionContext};
//! use snakepit_core::world_view::WorldView;
//! use rand::RngCore;
//! use tessera::Direction;
//!
//! /// Always turns right.
//! struct Clockwork;
//!
//! impl Brain for Clockwork {
//!     fn decide(&self, _ctx: &DecisionContext, _view: &WorldView, _rng: &mut dyn RngCore) -> Direction {
//!         Direction::Right
//!     }
//! }
//! ```

mod greedy;

pub use greedy::{GreedyForager, WANDER_CHANCE};

use rand::RngCore;
use tessera::Direction;

use crate::entity::Agent;
use crate::world_view::WorldView;

/// Per-call context handed to a [`Brain`].
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    /// The agent being steered, as of the pre-tick snapshot.
    pub agent: &'a Agent,
    /// Tick of the snapshot.
    pub tick: u64,
}

/// Chooses a direction for an agent.
///
/// Implementations must be deterministic given the same view and RNG state.
pub trait Brain: Send + Sync {
    /// Returns the direction `ctx.agent` should try this tick.
    fn decide(&self, ctx: &DecisionContext, view: &WorldView, rng: &mut dyn RngCore) -> Direction;
}
