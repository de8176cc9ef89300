//! Square grid representation for the life engine

use crate::error::{LifeError, LifeResult};
use itertools::iproduct;
use serde::{Deserialize, Serialize};

/// Moore neighborhood offsets as `(dx, dy)`.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// An N×N grid of alive/dead cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub size: usize,
    pub cells: Vec<bool>,
}

impl Grid {
    /// Create a new grid with every cell dead
    ///
    /// `size * size` must fit in `usize`; use [`Grid::try_new`] for untrusted sizes.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Create a new grid, rejecting sizes whose cells cannot be allocated
    pub fn try_new(size: usize) -> LifeResult<Self> {
        let invalid = || LifeError::InvalidDimension {
            size: i64::try_from(size).unwrap_or(i64::MAX),
        };
        let cell_count = size.checked_mul(size).ok_or_else(invalid)?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(cell_count).map_err(|_| invalid())?;
        cells.resize(cell_count, false);

        Ok(Self { size, cells })
    }

    /// Build a grid from a list of living `(x, y)` coordinates
    pub fn from_living(size: usize, living: &[(usize, usize)]) -> LifeResult<Self> {
        let mut grid = Self::try_new(size)?;
        for &(x, y) in living {
            grid.set(x, y, true)?;
        }
        Ok(grid)
    }

    /// Convert 2D coordinates to the flat index
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        x * self.size + y
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    fn check_bounds(&self, x: usize, y: usize) -> LifeResult<usize> {
        if self.in_bounds(x, y) {
            Ok(self.index(x, y))
        } else {
            Err(LifeError::OutOfBounds {
                x,
                y,
                size: self.size,
            })
        }
    }

    /// Get cell value at coordinates
    pub fn get(&self, x: usize, y: usize) -> LifeResult<bool> {
        let idx = self.check_bounds(x, y)?;
        Ok(self.cells[idx])
    }

    /// Set cell value at coordinates
    pub fn set(&mut self, x: usize, y: usize, value: bool) -> LifeResult<()> {
        let idx = self.check_bounds(x, y)?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Flip the cell at coordinates, returning its new value
    pub fn toggle(&mut self, x: usize, y: usize) -> LifeResult<bool> {
        let idx = self.check_bounds(x, y)?;
        self.cells[idx] = !self.cells[idx];
        Ok(self.cells[idx])
    }

    /// Count living neighbors of an in-bounds cell.
    ///
    /// Offsets that leave the grid count as dead; there is no wraparound.
    pub fn count_neighbors(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;

        for (dx, dy) in NEIGHBOR_OFFSETS {
            let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
                continue;
            };
            if self.in_bounds(nx, ny) && self.cells[self.index(nx, ny)] {
                count += 1;
            }
        }

        count
    }

    /// Get all living cell coordinates, ordered by `x` then `y`
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        iproduct!(0..self.size, 0..self.size)
            .filter(|&(x, y)| self.cells[self.index(x, y)])
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid has no living cells
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }
}
