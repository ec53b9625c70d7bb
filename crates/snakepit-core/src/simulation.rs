//! Simulation module with the 4-phase step.
//!
//! Every tick runs the same loop:
//!
//! 1. **SNAPSHOT**: the pre-tick world is frozen behind a [`WorldView`]
//! 2. **DECIDE**: the human's input and every bot's [`Brain`] pick a direction
//!    (bots run in parallel), then the reversal rule is applied
//! 3. **PLAN**: [`plan_moves`] turns directions into typed transitions
//! 4. **APPLY**: resolvers write the next world, then the tick advances
//!
//! # Determinism
//!
//! Given the same starting world and RNG state, a step always produces the
//! same next world:
//! - Agents are iterated in id order (via `BTreeMap`)
//! - Each bot decides with its own RNG, seeded from one per-tick salt drawn
//!   from the session RNG and the bot's id, so thread scheduling is irrelevant
//! - Food spawns and respawns draw from the session RNG in resolver order
//!
//! # Example
//!
//! ```
//! use snakepit_core::config::ArenaConfig;
//! use snakepit_core::simulation::Simulation;
//! use tessera::Direction;
//!
//! let config = ArenaConfig::default().with_bots(10).with_food(30).with_seed(42);
//! let mut sim = Simulation::new(&config).unwrap();
//!
//! for _ in 0..10 {
//!     sim.step(Some(Direction::Left));
//! }
//!
//! assert_eq!(sim.tick(), 10);
//! assert_eq!(sim.world().bots().count(), 10);
//! assert_eq!(sim.world().foods().len(), 30);
//! ```

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use glam::IVec2;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tessera::Direction;
use tracing::{info, trace};

use crate::brain::{Brain, DecisionContext, GreedyForager};
use crate::config::{ArenaConfig, ConfigError};
use crate::entity::{Agent, AgentId};
use crate::resolver::{default_resolvers, plan_moves, ResolveContext, Resolver};
use crate::transition::StepReport;
use crate::world::{create_session, World};
use crate::world_view::WorldView;

// =============================================================================
// Pure step
// =============================================================================

/// Advances `current` by one tick and returns the next world.
///
/// `input` is the human's requested direction; `None` keeps the current one.
/// `brain` steers every bot. Food spawns, respawns, and the bots' per-tick
/// salt all come from `rng`.
///
/// # Example
///
/// ```
/// use snakepit_core::brain::GreedyForager;
/// use snakepit_core::config::ArenaConfig;
/// use snakepit_core::simulation::step;
/// use snakepit_core::world::create_session;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let world = create_session(&ArenaConfig::default().with_bots(5), &mut rng).unwrap();
///
/// let (next, report) = step(&world, None, &GreedyForager, &mut rng);
/// assert_eq!(next.tick(), 1);
/// assert_eq!(report.tick(), 0);
/// ```
pub fn step(
    current: &World,
    input: Option<Direction>,
    brain: &dyn Brain,
    rng: &mut dyn RngCore,
) -> (World, StepReport) {
    let mut next = current.clone();
    let report = step_into(current, &mut next, input, brain, &default_resolvers(), rng);
    (next, report)
}

/// Runs one tick from `current` into `next`, overwriting `next` entirely.
fn step_into(
    current: &World,
    next: &mut World,
    input: Option<Direction>,
    brain: &dyn Brain,
    resolvers: &[Box<dyn Resolver>],
    rng: &mut dyn RngCore,
) -> StepReport {
    // PHASE 1: SNAPSHOT
    let view = WorldView::new(current);

    // PHASE 2: DECIDE
    let directions = decide_directions(&view, input, brain, rng.next_u64());

    // PHASE 3: PLAN
    let plan = plan_moves(&view, &directions);

    // PHASE 4: APPLY
    next.clone_from(current);
    let mut report = StepReport::new(current.tick());
    let mut ctx = ResolveContext {
        rng,
        report: &mut report,
    };
    for resolver in resolvers {
        resolver.resolve(&plan, current, next, &mut ctx);
    }
    next.advance_tick();

    trace!(
        tick = current.tick(),
        alive = next.alive_count(),
        eaten = report.food_eaten(),
        respawned = report.respawns(),
        "step resolved"
    );

    report
}

/// Resolved direction for every alive agent, in id order.
fn decide_directions(
    view: &WorldView,
    input: Option<Direction>,
    brain: &dyn Brain,
    salt: u64,
) -> Vec<(AgentId, Direction)> {
    let tick = view.tick();
    let alive: Vec<&Agent> = view.world().agents().filter(|a| a.is_alive()).collect();

    alive
        .par_iter()
        .map(|agent| {
            let requested = if agent.is_human() {
                input.unwrap_or(agent.direction())
            } else {
                let mut agent_rng = ChaCha8Rng::seed_from_u64(decision_seed(salt, agent.id()));
                let ctx = DecisionContext { agent, tick };
                brain.decide(&ctx, view, &mut agent_rng)
            };
            (agent.id(), agent.resolve_next_direction(requested))
        })
        .collect()
}

/// Seed of one bot's decision RNG for one tick.
fn decision_seed(salt: u64, agent: AgentId) -> u64 {
    let mut hasher = DefaultHasher::new();
    salt.hash(&mut hasher);
    agent.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// Simulation
// =============================================================================

/// A running session: double-buffered world, brain, and seeded RNG.
///
/// # Double Buffering
///
/// `current` is the read-only snapshot for the decide and plan phases;
/// resolvers write into `next`. After each tick the buffers are swapped, so
/// the two `World` allocations are reused.
pub struct Simulation {
    current: World,
    next: World,
    brain: Box<dyn Brain>,
    resolvers: Vec<Box<dyn Resolver>>,
    rng: ChaCha8Rng,
    seed: u64,
    last_report: StepReport,
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("current", &self.current)
            .field("resolvers", &format!("[{} resolvers]", self.resolvers.len()))
            .field("seed", &self.seed)
            .field("last_report", &self.last_report)
            .finish_non_exhaustive()
    }
}

impl Simulation {
    /// Creates a session from `config`, steered by [`GreedyForager`].
    ///
    /// Uses `config.seed`, or a random seed when none is set.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation.
    pub fn new(config: &ArenaConfig) -> Result<Self, ConfigError> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let world = create_session(config, &mut rng)?;
        info!(seed, "simulation started");
        Ok(Self::with_rng(world, rng, seed))
    }

    /// Wraps an existing world, for scripted setups.
    ///
    /// # Example
    ///
    /// ```
    /// use snakepit_core::simulation::Simulation;
    /// use snakepit_core::world::{Viewport, World};
    /// use tessera::Bounds;
    ///
    /// let sim = Simulation::from_world(World::empty(Bounds::new(20), Viewport::default(), 0), 12345);
    /// assert_eq!(sim.tick(), 0);
    /// assert_eq!(sim.seed(), 12345);
    /// ```
    #[must_use]
    pub fn from_world(world: World, seed: u64) -> Self {
        Self::with_rng(world, ChaCha8Rng::seed_from_u64(seed), seed)
    }

    fn with_rng(world: World, rng: ChaCha8Rng, seed: u64) -> Self {
        Self {
            next: world.clone(),
            last_report: StepReport::new(world.tick()),
            current: world,
            brain: Box::new(GreedyForager::new()),
            resolvers: default_resolvers(),
            rng,
            seed,
        }
    }

    /// Replaces the brain that steers the bots.
    #[must_use]
    pub fn with_brain(mut self, brain: Box<dyn Brain>) -> Self {
        self.brain = brain;
        self
    }

    /// Executes one tick.
    ///
    /// `input` is the human's requested direction; `None` keeps the current
    /// one. Returns the events of this tick.
    pub fn step(&mut self, input: Option<Direction>) -> &StepReport {
        self.last_report = step_into(
            &self.current,
            &mut self.next,
            input,
            self.brain.as_ref(),
            &self.resolvers,
            &mut self.rng,
        );
        std::mem::swap(&mut self.current, &mut self.next);
        &self.last_report
    }

    /// Executes one tick from a raw input vector.
    ///
    /// Anything other than a cardinal unit vector counts as no input.
    pub fn step_vector(&mut self, input: IVec2) -> &StepReport {
        self.step(Direction::from_vector(input))
    }

    /// The current world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.current
    }

    /// Events of the most recent tick.
    #[must_use]
    pub fn last_report(&self) -> &StepReport {
        &self.last_report
    }

    /// Completed ticks.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.current.tick()
    }

    /// Seed the session RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

// =============================================================================
// Tests
// =============================================================================
