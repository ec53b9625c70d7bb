//! Whole-world state hashing for determinism checks.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::world::World;

/// Hashes every piece of simulation state in a world.
///
/// Two worlds with the same hash are, for all practical purposes, the same
/// state: tick, viewport, every agent (in id order), and every food item (in
/// pool order) go into the hash.
#[must_use]
pub fn hash_world(world: &World) -> u64 {
    let mut hasher = DefaultHasher::new();

    world.tick().hash(&mut hasher);
    world.world_size().hash(&mut hasher);
    world.viewport().hash(&mut hasher);

    world.agent_count().hash(&mut hasher);
    for agent in world.agents() {
        agent.id().hash(&mut hasher);
        agent.name().hash(&mut hasher);
        agent.color().hash(&mut hasher);
        agent.body().hash(&mut hasher);
        agent.direction().hash(&mut hasher);
        agent.score().hash(&mut hasher);
        agent.flags().bits().hash(&mut hasher);
    }

    world.foods().len().hash(&mut hasher);
    for food in world.foods() {
        food.hash(&mut hasher);
    }

    hasher.finish()
}
