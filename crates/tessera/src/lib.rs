//! # Tessera
//!
//! Square grid substrate for discrete, tick-based arena simulations.
//!
//! Tessera models the world as a square lattice of integer cells and provides
//! the small set of spatial primitives a grid simulation needs every tick:
//!
//! - **Bounds**: world extent, containment tests, seeded cell sampling
//! - **Direction**: the four cardinal unit steps and their legality helpers
//! - **Grids**: dense row-major per-cell storage for O(1) occupancy lookups
//!
//! ## Quick Start
//!
//! ```
//! use glam::IVec2;
//! use tessera::{Bounds, Direction, OccupancyGrid};
//!
//! let bounds = Bounds::new(10);
//! let mut occupancy = OccupancyGrid::new(bounds);
//! occupancy.mark(IVec2::new(3, 4));
//!
//! let next = IVec2::new(3, 5) + Direction::Up.vector();
//! assert!(occupancy.is_occupied(next));
//! assert!(!bounds.contains(IVec2::new(-1, 0)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod direction;
pub mod grid;

use std::ops::Range;

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

// Re-exports for convenience
pub use direction::Direction;
pub use grid::{CellGrid, OccupancyGrid};

/// A cell coordinate on the grid.
///
/// Signed so that candidate positions just past the edge (for example
/// `(-1, 5)`) can be represented and rejected rather than wrapped.
pub type GridPos = IVec2;

/// Manhattan distance between two cells.
#[must_use]
pub fn manhattan(a: GridPos, b: GridPos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Extent of a square world: valid cells are `[0, size)` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    size: i32,
}

impl Bounds {
    /// Create bounds for a square world of side `size`.
    ///
    /// A non-positive size yields an empty world where nothing is contained.
    #[must_use]
    pub const fn new(size: i32) -> Self {
        Self { size }
    }

    /// Side length of the world in cells.
    #[must_use]
    pub const fn size(&self) -> i32 {
        self.size
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let side = usize::try_from(self.size).unwrap_or(0);
        side * side
    }

    /// Check if a cell lies inside the world.
    #[must_use]
    pub const fn contains(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.size && pos.y >= 0 && pos.y < self.size
    }

    /// Row-major index of a cell, or `None` when it lies outside.
    #[must_use]
    pub fn index_of(&self, pos: GridPos) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        // Both coordinates are non-negative here.
        #[allow(clippy::cast_sign_loss)]
        let (x, y, side) = (pos.x as usize, pos.y as usize, self.size as usize);
        Some(y * side + x)
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = GridPos> + Clone {
        let size = self.size.max(0);
        (0..size).flat_map(move |y| (0..size).map(move |x| IVec2::new(x, y)))
    }

    /// Sample a cell uniformly over the whole world.
    ///
    /// # Panics
    ///
    /// Panics if the world is empty (`size <= 0`).
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> GridPos {
        self.random_cell_in(rng, 0..self.size, 0..self.size)
    }

    /// Sample a cell uniformly from the given coordinate ranges.
    ///
    /// Callers are expected to pass ranges within the world; this is used to
    /// reserve room for multi-cell shapes placed at the sampled cell.
    ///
    /// # Panics
    ///
    /// Panics if either range is empty.
    pub fn random_cell_in<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        xs: Range<i32>,
        ys: Range<i32>,
    ) -> GridPos {
        let x = rng.gen_range(xs);
        let y = rng.gen_range(ys);
        IVec2::new(x, y)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(200)
    }
}
