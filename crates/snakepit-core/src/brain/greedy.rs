//! Greedy nearest-food forager.

use rand::{Rng, RngCore};
use tessera::Direction;

use super::{Brain, DecisionContext};
use crate::world_view::WorldView;

/// Per-tick chance of a random turn when no food exists.
pub const WANDER_CHANCE: f64 = 0.1;

/// Heads for the nearest food, avoiding cells that would kill it this tick.
///
/// Candidates are tried in order:
/// 1. horizontal step towards the food (if the food is on another column)
/// 2. vertical step towards the food (if the food is on another row)
/// 3. the current direction
/// 4. [`Direction::FALLBACK_ORDER`] (right, left, down, up)
///
/// A candidate is rejected if it reverses a body longer than one segment or
/// if [`WorldView::is_cell_free_for`] says the cell is deadly. When every
/// candidate is rejected the current direction is kept and the agent takes
/// its chances.
///
/// With no food on the board the forager wanders: it keeps its direction,
/// except with probability [`WANDER_CHANCE`] it picks a random one.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyForager;

impl GreedyForager {
    /// Creates a forager.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn wander(current: Direction, rng: &mut dyn RngCore) -> Direction {
        if rng.gen_bool(WANDER_CHANCE) {
            Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
        } else {
            current
        }
    }
}

impl Brain for GreedyForager {
    fn decide(&self, ctx: &DecisionContext, view: &WorldView, rng: &mut dyn RngCore) -> Direction {
        let agent = ctx.agent;
        let head = agent.head();
        let current = agent.direction();

        let Some(target) = view.nearest_food(head) else {
            return Self::wander(current, rng);
        };

        let delta = target.position() - head;
        let preferred = [
            Direction::horizontal_towards(delta.x),
            Direction::vertical_towards(delta.y),
            Some(current),
        ];

        preferred
            .into_iter()
            .flatten()
            .chain(Direction::FALLBACK_ORDER)
            .find(|&candidate| {
                agent.resolve_next_direction(candidate) == candidate
                    && view.is_cell_free_for(agent, head + candidate.vector())
            })
            .unwrap_or(current)
    }
}
