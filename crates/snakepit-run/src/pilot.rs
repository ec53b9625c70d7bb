//! Input sources for the human agent.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snakepit_core::brain::{Brain, DecisionContext, GreedyForager};
use snakepit_core::world_view::WorldView;
use snakepit_core::World;
use tessera::Direction;

/// Ticks per side of the scripted square.
pub const SQUARE_SIDE: u64 = 12;

const SQUARE: [Direction; 4] = [Direction::Right, Direction::Down, Direction::Left, Direction::Up];

/// Produces the human's requested direction each tick.
pub enum Pilot {
    /// Turns clockwise every [`SQUARE_SIDE`] ticks.
    Square,
    /// Steers with the same forager the bots use.
    Autopilot {
        /// Decision RNG, seeded from the session seed.
        rng: ChaCha8Rng,
    },
}

impl Pilot {
    /// Autopilot seeded from the session seed.
    pub fn autopilot(seed: u64) -> Self {
        Self::Autopilot {
            rng: ChaCha8Rng::seed_from_u64(seed.rotate_left(17)),
        }
    }

    /// The input to feed into the next step.
    pub fn next_input(&mut self, world: &World) -> Option<Direction> {
        match self {
            Self::Square => {
                let tick = world.tick();
                if tick % SQUARE_SIDE == 0 {
                    let side = (tick / SQUARE_SIDE) % 4;
                    usize::try_from(side).ok().map(|i| SQUARE[i])
                } else {
                    None
                }
            }
            Self::Autopilot { rng } => {
                let human = world.human().filter(|h| h.is_alive())?;
                let view = WorldView::new(world);
                let ctx = DecisionContext {
                    agent: human,
                    tick: world.tick(),
                };
                Some(GreedyForager.decide(&ctx, &view, rng))
            }
        }
    }
}
