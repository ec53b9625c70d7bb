//! Dense per-cell storage.
//!
//! [`CellGrid`] stores one value per cell in row-major order. It is rebuilt
//! from scratch when the world changes rather than patched incrementally, which
//! keeps lookups O(1) and the structure trivially consistent with the snapshot
//! it was built from.

use serde::{Deserialize, Serialize};

use crate::{Bounds, GridPos};

/// One value of type `T` per cell of a square world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellGrid<T> {
    bounds: Bounds,
    cells: Vec<T>,
}

impl<T: Clone> CellGrid<T> {
    /// Create a grid with every cell set to `fill`.
    #[must_use]
    pub fn new(bounds: Bounds, fill: T) -> Self {
        Self {
            bounds,
            cells: vec![fill; bounds.cell_count()],
        }
    }

    /// Reset every cell to `value`.
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }
}

impl<T> CellGrid<T> {
    /// The bounds this grid covers.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Value at `pos`, or `None` outside the world.
    #[must_use]
    pub fn get(&self, pos: GridPos) -> Option<&T> {
        self.bounds.index_of(pos).map(|i| &self.cells[i])
    }

    /// Mutable value at `pos`, or `None` outside the world.
    #[must_use]
    pub fn get_mut(&mut self, pos: GridPos) -> Option<&mut T> {
        self.bounds.index_of(pos).map(move |i| &mut self.cells[i])
    }

    /// Overwrite the value at `pos`. Returns false (and does nothing) outside.
    pub fn set(&mut self, pos: GridPos, value: T) -> bool {
        match self.get_mut(pos) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

/// Per-cell occupant counts.
///
/// Counts rather than flags: callers need to subtract a single known occupant
/// such as an agent's own tail, and a crowded placement may stack a body on
/// others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyGrid {
    counts: CellGrid<u16>,
    total: usize,
}

impl OccupancyGrid {
    /// Create an empty occupancy grid.
    #[must_use]
    pub fn new(bounds: Bounds) -> Self {
        Self {
            counts: CellGrid::new(bounds, 0),
            total: 0,
        }
    }

    /// Build a grid from an iterator of occupied cells.
    ///
    /// Cells outside the bounds are ignored.
    #[must_use]
    pub fn from_cells<I: IntoIterator<Item = GridPos>>(bounds: Bounds, cells: I) -> Self {
        let mut grid = Self::new(bounds);
        grid.mark_all(cells);
        grid
    }

    /// Record one occupant at `pos`.
    pub fn mark(&mut self, pos: GridPos) {
        if let Some(count) = self.counts.get_mut(pos) {
            *count = count.saturating_add(1);
            self.total += 1;
        }
    }

    /// Record one occupant at each of `cells`.
    pub fn mark_all<I: IntoIterator<Item = GridPos>>(&mut self, cells: I) {
        for cell in cells {
            self.mark(cell);
        }
    }

    /// Number of occupants at `pos` (0 outside the world).
    #[must_use]
    pub fn count(&self, pos: GridPos) -> u16 {
        self.counts.get(pos).copied().unwrap_or(0)
    }

    /// True if at least one occupant is at `pos`.
    #[must_use]
    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.count(pos) > 0
    }

    /// Total occupants recorded inside the bounds.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Remove all occupants.
    pub fn clear(&mut self) {
        self.counts.fill(0);
        self.total = 0;
    }
}
