//! `WorldView` provides read-only access to the pre-tick world.
//!
//! Both the brains and the movement planner read through a [`WorldView`], so
//! they share one occupancy index, one food index, and one definition of
//! "free cell".
//!
//! # Immutability
//!
//! The view borrows the world immutably for the whole decide/plan phase. This
//! is what guarantees that no agent observes another agent's move from the
//! same tick, and it lets bot decisions run in parallel.
//!
//! # Example
//!
//! ```
//! use snakepit_core::entity::{Agent, AgentId};
//! use snakepit_core::world::{Viewport, World};
//! use snakepit_core::world_view::WorldView;
//! use snakepit_core::entity::PALETTE;
//! use tessera::{Bounds, Direction, GridPos};
//!
//! let mut world = World::empty(Bounds::new(20), Viewport::default(), 0);
//! let body = [GridPos::new(5, 5), GridPos::new(5, 6), GridPos::new(5, 7)];
//! world.insert_agent(Agent::with_body(AgentId::new(1), "a", false, body, Direction::Up).unwrap());
//! world.food_pool_mut().place(GridPos::new(9, 5), PALETTE[0]);
//!
//! let view = WorldView::new(&world);
//! let agent = view.agent(AgentId::new(1)).unwrap();
//!
//! assert_eq!(view.nearest_food(agent.head()).unwrap().position(), GridPos::new(9, 5));
//! assert!(view.is_cell_free_for(agent, GridPos::new(5, 4)));
//! assert!(!view.is_cell_free_for(agent, GridPos::new(5, 6)));
//! ```

use std::collections::HashMap;

use tessera::{manhattan, Bounds, GridPos, OccupancyGrid};

use crate::entity::{Agent, AgentId, Food};
use crate::world::World;

/// Read-only view of a world snapshot plus its occupancy and food indexes.
#[derive(Debug)]
pub struct WorldView<'a> {
    world: &'a World,
    occupancy: OccupancyGrid,
    /// Cell -> pool slot of the first food item there.
    food_index: HashMap<GridPos, usize>,
}

impl<'a> WorldView<'a> {
    /// Builds the view, indexing every segment of every alive agent and
    /// every food cell.
    ///
    /// Dead agents do not block.
    #[must_use]
    pub fn new(world: &'a World) -> Self {
        let cells = world
            .agents()
            .filter(|agent| agent.is_alive())
            .flat_map(|agent| agent.body().iter());

        let mut food_index = HashMap::with_capacity(world.foods().len());
        for (slot, food) in world.foods().iter().enumerate() {
            food_index.entry(food.position()).or_insert(slot);
        }

        Self {
            world,
            occupancy: OccupancyGrid::from_cells(world.bounds(), cells),
            food_index,
        }
    }

    /// The underlying world.
    #[must_use]
    pub fn world(&self) -> &'a World {
        self.world
    }

    /// Tick of the snapshot.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.world.tick()
    }

    /// World extent.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.world.bounds()
    }

    /// Agent by id.
    #[must_use]
    pub fn agent(&self, id: AgentId) -> Option<&'a Agent> {
        self.world.agent(id)
    }

    /// Occupancy index of alive bodies.
    #[must_use]
    pub fn occupancy(&self) -> &OccupancyGrid {
        &self.occupancy
    }

    /// The food item closest to `from` by Manhattan distance.
    ///
    /// Ties go to the item that comes first in pool order.
    #[must_use]
    pub fn nearest_food(&self, from: GridPos) -> Option<&'a Food> {
        self.world
            .foods()
            .iter()
            .min_by_key(|food| manhattan(from, food.position()))
    }

    /// The first food item (pool order) at `pos`.
    #[must_use]
    pub fn food_at(&self, pos: GridPos) -> Option<&'a Food> {
        let slot = *self.food_index.get(&pos)?;
        self.world.foods().get(slot)
    }

    /// True if `agent` can move its head onto `pos` without dying.
    ///
    /// The cell must be in bounds and hold no alive segment, except the
    /// agent's own tail. The tail only counts as free when no food lies on
    /// it: eating keeps the tail in place.
    #[must_use]
    pub fn is_cell_free_for(&self, agent: &Agent, pos: GridPos) -> bool {
        if !self.bounds().contains(pos) {
            return false;
        }
        let mut occupants = self.occupancy.count(pos);
        if agent.is_alive() && pos == agent.tail() && self.food_at(pos).is_none() {
            occupants = occupants.saturating_sub(1);
        }
        occupants == 0
    }
}
