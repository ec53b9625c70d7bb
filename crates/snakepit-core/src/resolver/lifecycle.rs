//! Respawn and viewport upkeep.
//!
//! Bots never leave the arena: a bot that is dead after movement is
//! re-initialised in place with a fresh body, score 0, and its old id and
//! name. The human is never respawned; its body stays frozen where it died.
//!
//! A respawned head never lands on a cell held by an alive segment, so no two
//! alive agents share a head after the step. In a world with no free cell
//! the bot stays dead and is retried on the next step.

use tessera::OccupancyGrid;
use tracing::debug;

use super::{ResolveContext, Resolver};
use crate::transition::{PlannedMove, StepEvent};
use crate::world::World;

/// Respawns dead bots and recentres the viewport on the human.
#[derive(Debug, Default)]
pub struct LifecycleResolver;

impl LifecycleResolver {
    /// Creates a lifecycle resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for LifecycleResolver {
    fn name(&self) -> &'static str {
        "lifecycle"
    }

    fn resolve(
        &self,
        plan: &[PlannedMove],
        current: &World,
        next: &mut World,
        ctx: &mut ResolveContext<'_>,
    ) {
        let bounds = current.bounds();
        let dead_bots: Vec<_> = current
            .bots()
            .filter(|bot| {
                !bot.is_alive()
                    || plan
                        .iter()
                        .any(|planned| planned.agent == bot.id() && planned.is_death())
            })
            .map(|bot| bot.id())
            .collect();

        if !dead_bots.is_empty() {
            let mut occupancy = OccupancyGrid::from_cells(
                bounds,
                next.agents()
                    .filter(|agent| agent.is_alive())
                    .flat_map(|agent| agent.body().iter()),
            );

            for id in dead_bots {
                let Some(bot) = next.agent_mut(id) else {
                    continue;
                };
                let placed = bot.respawn(bounds, &mut *ctx.rng, |cell| !occupancy.is_occupied(cell));
                if placed {
                    occupancy.mark_all(bot.body().iter());
                    debug!(agent = %id, name = bot.name(), tick = current.tick(), "bot respawned");
                    ctx.report.push(StepEvent::Respawned { agent: id });
                } else {
                    debug!(agent = %id, tick = current.tick(), "no room to respawn bot");
                }
            }
        }

        if let Some(head) = next.human().map(|human| human.head()) {
            next.viewport_mut().center_on(head);
        }
    }
}
