//! Resolvers turn a step's plan into the next world.
//!
//! The planning phase produces one [`PlannedMove`] per alive agent from the
//! pre-tick snapshot. Resolvers then run in a fixed order, each writing one
//! concern into the next world:
//!
//! 1. [`MovementResolver`]: directions, head moves, growth, score, deaths
//! 2. [`FoodResolver`]: removes eaten food and refills the pool
//! 3. [`LifecycleResolver`]: respawns dead bots and recentres the viewport
//!
//! # Invariants
//!
//! - Lookups go to `current` or the plan, never to `next`
//! - Resolvers are deterministic given the same plan and RNG state
//! - The plan is processed in agent id order

mod food;
mod lifecycle;
mod movement;

pub use food::FoodResolver;
pub use lifecycle::LifecycleResolver;
pub use movement::{plan_moves, MovementResolver, POINTS_PER_FOOD};

use rand::RngCore;

use crate::transition::{PlannedMove, StepReport};
use crate::world::World;

/// Mutable state shared by the resolvers of one step.
pub struct ResolveContext<'a> {
    /// Session RNG, for food spawns and respawns.
    pub rng: &'a mut dyn RngCore,
    /// Report the resolvers append events to.
    pub report: &'a mut StepReport,
}

/// Applies one concern of a planned step to the next world.
///
/// # Example
///
/// ```
/// use snakepit_core::resolver::{ResolveContext, Resolver};
/// use snakepit_core::transition::PlannedMove;
/// use snakepit_core::world::World;
///
/// struct Noop;
///
/// impl Resolver for Noop {
///     fn name(&self) -> &'static str {
///         "noop"
///     }
///
///     fn resolve(&self, _plan: &[PlannedMove], _current: &World, _next: &mut World, _ctx: &mut ResolveContext<'_>) {}
/// }
/// ```
pub trait Resolver: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Writes this resolver's part of the step into `next`.
    ///
    /// # Arguments
    ///
    /// * `plan` - One planned move per alive agent, in id order
    /// * `current` - The pre-tick world (read-only lookups)
    /// * `next` - The world being built (mutate this)
    /// * `ctx` - RNG and event report
    fn resolve(
        &self,
        plan: &[PlannedMove],
        current: &World,
        next: &mut World,
        ctx: &mut ResolveContext<'_>,
    );
}

/// The resolvers a step runs, in order.
#[must_use]
pub fn default_resolvers() -> Vec<Box<dyn Resolver>> {
    vec![
        Box::new(MovementResolver::new()),
        Box::new(FoodResolver::new()),
        Box::new(LifecycleResolver::new()),
    ]
}
