//! Movement planning and resolution.
//!
//! [`plan_moves`] decides, from the pre-tick snapshot only, what happens to
//! each alive agent. [`MovementResolver`] then writes those outcomes into the
//! next world.
//!
//! # Death rules
//!
//! Checked in order for every alive agent:
//!
//! 1. **Wall**: the candidate head is outside the world.
//! 2. **Collision**: the candidate head is on an alive segment (see
//!    [`WorldView::is_cell_free_for`] for the own-tail exception).
//! 3. **Head-on**: two or more surviving agents picked the same candidate
//!    head. All of them die, so no two alive heads ever share a cell.
//!
//! A dying agent keeps its body; only its direction is updated.

use std::collections::HashMap;

use tessera::{Direction, GridPos};
use tracing::debug;

use super::{ResolveContext, Resolver};
use crate::entity::AgentId;
use crate::transition::{DeathCause, PlannedMove, StepEvent, Transition};
use crate::world::World;
use crate::world_view::WorldView;

/// Points awarded per unit of food value.
pub const POINTS_PER_FOOD: u32 = 10;

/// Plans the move of every listed agent against the snapshot in `view`.
///
/// `directions` holds the already-resolved direction of each agent, in id
/// order. Dead or unknown agents are skipped.
#[must_use]
pub fn plan_moves(view: &WorldView, directions: &[(AgentId, Direction)]) -> Vec<PlannedMove> {
    let bounds = view.bounds();
    let mut plan: Vec<PlannedMove> = directions
        .iter()
        .filter_map(|&(id, direction)| {
            let agent = view.agent(id).filter(|agent| agent.is_alive())?;
            let candidate = agent.head() + direction.vector();

            let transition = if !bounds.contains(candidate) {
                Transition::Died {
                    cause: DeathCause::Wall,
                }
            } else if !view.is_cell_free_for(agent, candidate) {
                Transition::Died {
                    cause: DeathCause::Collision,
                }
            } else {
                Transition::Moved {
                    head: candidate,
                    eats: view.food_at(candidate).map(|food| food.id()),
                }
            };

            Some(PlannedMove {
                agent: id,
                direction,
                transition,
            })
        })
        .collect();

    let mut claims: HashMap<GridPos, usize> = HashMap::new();
    for planned in &plan {
        if let Transition::Moved { head, .. } = planned.transition {
            *claims.entry(head).or_default() += 1;
        }
    }
    for planned in &mut plan {
        if let Transition::Moved { head, .. } = planned.transition {
            if claims.get(&head).copied().unwrap_or(0) > 1 {
                planned.transition = Transition::Died {
                    cause: DeathCause::HeadOn,
                };
            }
        }
    }

    plan
}

/// Applies planned moves: direction, head advance, growth, score, death.
#[derive(Debug, Default)]
pub struct MovementResolver;

impl MovementResolver {
    /// Creates a movement resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for MovementResolver {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn resolve(
        &self,
        plan: &[PlannedMove],
        current: &World,
        next: &mut World,
        ctx: &mut ResolveContext<'_>,
    ) {
        for planned in plan {
            let Some(agent) = next.agent_mut(planned.agent) else {
                continue;
            };
            agent.set_direction(planned.direction);

            match planned.transition {
                Transition::Moved { head, eats } => {
                    agent.advance(head, eats.is_some());
                    if let Some(food_id) = eats {
                        let value = current.food_pool().get(food_id).map_or(0, |f| f.value());
                        let points = POINTS_PER_FOOD.saturating_mul(value);
                        agent.add_score(points);
                        ctx.report.push(StepEvent::AteFood {
                            agent: planned.agent,
                            food: food_id,
                            points,
                        });
                    }
                }
                Transition::Died { cause } => {
                    agent.mark_dead();
                    debug!(
                        agent = %planned.agent,
                        name = agent.name(),
                        ?cause,
                        tick = current.tick(),
                        "agent died"
                    );
                    ctx.report.push(StepEvent::Died {
                        agent: planned.agent,
                        cause,
                    });
                }
            }
        }
    }
}
