//! Food bookkeeping: drop eaten items, refill to target.

use std::collections::HashSet;

use super::{ResolveContext, Resolver};
use crate::entity::FoodId;
use crate::transition::PlannedMove;
use crate::world::World;

/// Removes the food eaten this step and replenishes the pool.
#[derive(Debug, Default)]
pub struct FoodResolver;

impl FoodResolver {
    /// Creates a food resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for FoodResolver {
    fn name(&self) -> &'static str {
        "food"
    }

    fn resolve(
        &self,
        plan: &[PlannedMove],
        current: &World,
        next: &mut World,
        ctx: &mut ResolveContext<'_>,
    ) {
        let consumed: HashSet<FoodId> = plan.iter().filter_map(PlannedMove::eaten_food).collect();
        let pool = next.food_mut();
        pool.remove_consumed(&consumed);
        let spawned = pool.replenish(current.bounds(), &mut *ctx.rng);
        ctx.report.record_spawned(spawned);
    }
}
