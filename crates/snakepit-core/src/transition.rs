//! Typed intermediate results of a step.
//!
//! The planning phase reads only the pre-tick [`World`](crate::world::World)
//! and produces one [`PlannedMove`] per alive agent. Resolvers consume the
//! plan and write the next world; nothing is written back onto agents while
//! the plan is being built.
//!
//! Resolvers also append [`StepEvent`]s to a [`StepReport`] so the
//! presentation layer can show deaths and pickups without diffing snapshots.

use serde::{Deserialize, Serialize};
use tessera::{Direction, GridPos};

use crate::entity::{AgentId, FoodId};

// =============================================================================
// Plan
// =============================================================================

/// Why an agent died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    /// The candidate head left the world.
    Wall,
    /// The candidate head hit an occupied cell.
    Collision,
    /// Two or more agents moved onto the same cell.
    HeadOn,
}

/// Outcome of one agent's move this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// The agent moves its head to `head`.
    Moved {
        /// New head cell.
        head: GridPos,
        /// Food eaten at `head`, if any. Eating suppresses the tail removal.
        eats: Option<FoodId>,
    },
    /// The agent dies; its body stays where it was.
    Died {
        /// What killed it.
        cause: DeathCause,
    },
}

/// The planned move of a single alive agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedMove {
    /// Agent this move belongs to.
    pub agent: AgentId,
    /// Direction the agent attempted, recorded even when it dies.
    pub direction: Direction,
    /// What happens to the agent.
    pub transition: Transition,
}

impl PlannedMove {
    /// Food consumed by this move, if any.
    #[must_use]
    pub fn eaten_food(&self) -> Option<FoodId> {
        match self.transition {
            Transition::Moved { eats, .. } => eats,
            Transition::Died { .. } => None,
        }
    }

    /// True if this move kills the agent.
    #[must_use]
    pub fn is_death(&self) -> bool {
        matches!(self.transition, Transition::Died { .. })
    }
}

// =============================================================================
// Report
// =============================================================================

/// Something that happened during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepEvent {
    /// An agent ate a food item.
    AteFood {
        /// Who ate.
        agent: AgentId,
        /// What was eaten.
        food: FoodId,
        /// Points awarded.
        points: u32,
    },
    /// An agent died.
    Died {
        /// Who died.
        agent: AgentId,
        /// How.
        cause: DeathCause,
    },
    /// A bot was re-created under its old id.
    Respawned {
        /// The respawned bot.
        agent: AgentId,
    },
}

/// Events produced by one step, in resolver order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    tick: u64,
    events: Vec<StepEvent>,
    food_spawned: usize,
}

impl StepReport {
    /// Creates an empty report for the step that starts at `tick`.
    #[must_use]
    pub fn new(tick: u64) -> Self {
        Self {
            tick,
            events: Vec::new(),
            food_spawned: 0,
        }
    }

    /// Tick the step started from.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// All events in order.
    #[must_use]
    pub fn events(&self) -> &[StepEvent] {
        &self.events
    }

    /// Agents that died this step, with their causes.
    pub fn deaths(&self) -> impl Iterator<Item = (AgentId, DeathCause)> + '_ {
        self.events.iter().filter_map(|event| match *event {
            StepEvent::Died { agent, cause } => Some((agent, cause)),
            _ => None,
        })
    }

    /// Number of food items eaten.
    #[must_use]
    pub fn food_eaten(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, StepEvent::AteFood { .. }))
            .count()
    }

    /// Number of bots respawned.
    #[must_use]
    pub fn respawns(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, StepEvent::Respawned { .. }))
            .count()
    }

    /// Number of food items spawned to refill the pool.
    #[must_use]
    pub fn food_spawned(&self) -> usize {
        self.food_spawned
    }

    pub(crate) fn push(&mut self, event: StepEvent) {
        self.events.push(event);
    }

    pub(crate) fn record_spawned(&mut self, count: usize) {
        self.food_spawned += count;
    }
}
