//! Test helper functions for building worlds and steering agents.

use std::collections::BTreeMap;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tessera::{Bounds, Direction, GridPos};

use crate::brain::{Brain, DecisionContext};
use crate::entity::{Agent, AgentId, FoodId, PALETTE};
use crate::world::{Viewport, World};
use crate::world_view::WorldView;

// =============================================================================
// World Setup
// =============================================================================

/// An empty world of `size`x`size` with a 40x40 viewport and no food target.
pub fn empty_world(size: i32) -> World {
    World::empty(Bounds::new(size), Viewport::default(), 0)
}

/// Builds an alive agent from `(x, y)` cells, head first.
///
/// # Panics
///
/// Panics if `cells` is empty.
pub fn agent_at(id: u32, is_human: bool, cells: &[(i32, i32)], direction: Direction) -> Agent {
    let name = if is_human { "Player 1".to_string() } else { format!("bot-{id}") };
    Agent::with_body(
        AgentId::new(id),
        &name,
        is_human,
        cells.iter().map(|&(x, y)| GridPos::new(x, y)),
        direction,
    )
    .expect("test agent needs at least one cell")
}

/// A straight vertical body of `len` cells with its head at `head`, facing up.
pub fn vertical_cells(head: (i32, i32), len: i32) -> Vec<(i32, i32)> {
    (0..len).map(|i| (head.0, head.1 + i)).collect()
}

/// Inserts `agent` into `world` and returns its id.
pub fn add_agent(world: &mut World, agent: Agent) -> AgentId {
    let id = agent.id();
    world.insert_agent(agent);
    id
}

/// Places a food item at `(x, y)` and bumps the food target to match.
pub fn add_food(world: &mut World, cell: (i32, i32)) -> FoodId {
    let pool = world.food_pool_mut();
    let id = pool.place(GridPos::new(cell.0, cell.1), PALETTE[0]);
    let len = pool.len();
    pool.set_target(len);
    id
}

/// Deterministic RNG for a test.
pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

// =============================================================================
// Scripted Brains
// =============================================================================

/// Keeps every bot on its current heading.
#[derive(Debug, Default)]
pub struct KeepCourse;

impl Brain for KeepCourse {
    fn decide(&self, ctx: &DecisionContext, _view: &WorldView, _rng: &mut dyn RngCore) -> Direction {
        ctx.agent.direction()
    }
}

/// Steers listed bots in a fixed direction; others keep course.
#[derive(Debug, Default)]
pub struct Scripted {
    moves: BTreeMap<AgentId, Direction>,
}

impl Scripted {
    /// Adds a fixed direction for one bot.
    pub fn with(mut self, id: AgentId, direction: Direction) -> Self {
        self.moves.insert(id, direction);
        self
    }
}

impl Brain for Scripted {
    fn decide(&self, ctx: &DecisionContext, _view: &WorldView, _rng: &mut dyn RngCore) -> Direction {
        self.moves
            .get(&ctx.agent.id())
            .copied()
            .unwrap_or(ctx.agent.direction())
    }
}
