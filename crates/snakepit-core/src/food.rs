//! Food pool: spawning, consumption, and replenishment.
//!
//! The pool keeps its items in spawn order. That order is the tie-break for
//! every "first food at / nearest food" lookup, so it must never be shuffled.
//!
//! Spawn positions are uniform over the whole grid and may coincide with
//! agent bodies or other food.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tessera::{Bounds, GridPos};

use crate::entity::{Color, Food, FoodId};

/// Default number of live food items.
pub const FOOD_TARGET: usize = 300;

/// Value of every spawned food item.
pub const FOOD_VALUE: u32 = 1;

/// The world's food items plus the id counter and target size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodPool {
    items: Vec<Food>,
    next_id: u64,
    target: usize,
}

impl FoodPool {
    /// Creates an empty pool that replenishes up to `target`.
    #[must_use]
    pub fn new(target: usize) -> Self {
        Self {
            items: Vec::new(),
            next_id: 0,
            target,
        }
    }

    /// Creates a pool already filled to `target`.
    pub fn filled<R: Rng + ?Sized>(target: usize, bounds: Bounds, rng: &mut R) -> Self {
        let mut pool = Self::new(target);
        pool.replenish(bounds, rng);
        pool
    }

    /// Produces a food item at a uniformly random cell with a random palette
    /// colour and value 1. The item is not added to the pool.
    pub fn spawn_food<R: Rng + ?Sized>(&mut self, bounds: Bounds, rng: &mut R) -> Food {
        let position = bounds.random_cell(rng);
        let color = Color::random(rng);
        let id = FoodId::new(self.next_id);
        self.next_id += 1;
        Food::new(id, position, color, FOOD_VALUE)
    }

    /// Adds a food item at an explicit cell, for scripted setups.
    pub fn place(&mut self, position: GridPos, color: Color) -> FoodId {
        let id = FoodId::new(self.next_id);
        self.next_id += 1;
        self.items.push(Food::new(id, position, color, FOOD_VALUE));
        id
    }

    /// Removes exactly the consumed items, keeping the rest in order.
    ///
    /// Returns how many items were removed.
    pub fn remove_consumed(&mut self, consumed: &HashSet<FoodId>) -> usize {
        if consumed.is_empty() {
            return 0;
        }
        let before = self.items.len();
        self.items.retain(|food| !consumed.contains(&food.id()));
        before - self.items.len()
    }

    /// Appends freshly spawned items until the pool reaches its target.
    ///
    /// Does nothing when already at (or above) target. Returns how many items
    /// were spawned.
    pub fn replenish<R: Rng + ?Sized>(&mut self, bounds: Bounds, rng: &mut R) -> usize {
        let missing = self.target.saturating_sub(self.items.len());
        for _ in 0..missing {
            let food = self.spawn_food(bounds, rng);
            self.items.push(food);
        }
        missing
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn get(&self, id: FoodId) -> Option<&Food> {
        self.items.iter().find(|food| food.id() == id)
    }

    /// All items in pool order.
    #[must_use]
    pub fn items(&self) -> &[Food] {
        &self.items
    }

    /// Number of live items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if no food is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The replenishment target.
    #[must_use]
    pub fn target(&self) -> usize {
        self.target
    }

    /// Changes the replenishment target. Takes effect at the next replenish.
    pub fn set_target(&mut self, target: usize) {
        self.target = target;
    }
}

impl Default for FoodPool {
    fn default() -> Self {
        Self::new(FOOD_TARGET)
    }
}
