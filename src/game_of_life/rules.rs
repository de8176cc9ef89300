//! Conway's Game of Life rules

use super::Grid;
use rayon::prelude::*;

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Compute the next generation of `current` into `staging`.
    ///
    /// Each row of `staging` is an independent work unit on the current rayon
    /// pool. Only `current` is read and only `staging` is written, so the
    /// result does not depend on scheduling.
    pub fn evolve_into(current: &Grid, staging: &mut Grid) {
        assert_eq!(
            current.size, staging.size,
            "staging buffer must match the current grid"
        );

        let size = current.size;
        if size == 0 {
            return;
        }

        staging
            .cells
            .par_chunks_mut(size)
            .enumerate()
            .for_each(|(x, column)| {
                for (y, cell) in column.iter_mut().enumerate() {
                    let alive = current.cells[current.index(x, y)];
                    *cell = Self::should_be_alive(alive, current.count_neighbors(x, y));
                }
            });
    }

    /// Evolve the grid one generation forward into a fresh grid
    pub fn evolve(current: &Grid) -> Grid {
        let mut next = Grid::new(current.size);
        Self::evolve_into(current, &mut next);
        next
    }

    /// Evolve the grid for multiple generations
    pub fn evolve_generations(mut grid: Grid, generations: usize) -> Grid {
        let mut scratch = Grid::new(grid.size);
        for _ in 0..generations {
            Self::evolve_into(&grid, &mut scratch);
            std::mem::swap(&mut grid, &mut scratch);
        }
        grid
    }

    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        matches!((current_state, neighbor_count), (true, 2) | (true, 3) | (false, 3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_still_life_block() {
        let grid = Grid::from_living(4, &[(1, 1), (1, 2), (2, 1), (2, 2)]).unwrap();
        let evolved = GameOfLifeRules::evolve(&grid);

        assert_eq!(grid, evolved);
    }

    #[test]
    fn test_oscillator_blinker() {
        let vertical = Grid::from_living(10, &[(5, 5), (5, 6), (5, 7)]).unwrap();
        let evolved = GameOfLifeRules::evolve(&vertical);

        assert_eq!(evolved.living_cells(), vec![(4, 6), (5, 6), (6, 6)]);

        let evolved_twice = GameOfLifeRules::evolve(&evolved);
        assert_eq!(vertical, evolved_twice);
    }

    #[test]
    fn test_lonely_corner_dies() {
        let grid = Grid::from_living(5, &[(0, 0)]).unwrap();
        assert!(GameOfLifeRules::evolve(&grid).is_empty());

        let grid = Grid::from_living(5, &[(4, 4)]).unwrap();
        assert!(GameOfLifeRules::evolve(&grid).is_empty());
    }

    #[test]
    fn test_rule_logic() {
        assert!(GameOfLifeRules::should_be_alive(true, 2)); // Survival with 2 neighbors
        assert!(GameOfLifeRules::should_be_alive(true, 3)); // Survival with 3 neighbors
        assert!(GameOfLifeRules::should_be_alive(false, 3)); // Birth with 3 neighbors
        assert!(!GameOfLifeRules::should_be_alive(true, 1)); // Death with 1 neighbor
        assert!(!GameOfLifeRules::should_be_alive(true, 4)); // Death with 4 neighbors
        assert!(!GameOfLifeRules::should_be_alive(false, 2)); // No birth with 2 neighbors
        assert!(!GameOfLifeRules::should_be_alive(false, 8));
    }

    #[test]
    fn test_evolve_into_overwrites_staging() {
        let grid = Grid::from_living(6, &[(1, 2), (2, 2), (3, 2)]).unwrap();
        let mut staging = Grid::from_living(6, &[(0, 0), (5, 5), (3, 3)]).unwrap();

        GameOfLifeRules::evolve_into(&grid, &mut staging);
        assert_eq!(staging.living_cells(), vec![(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_deterministic_across_pools() {
        // Glider plus noise, large enough to split over many work units
        let mut grid = Grid::from_living(64, &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]).unwrap();
        for i in 0..64 {
            grid.set((i * 7) % 64, (i * 13) % 64, true).unwrap();
        }

        let single = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
        let many = rayon::ThreadPoolBuilder::new().num_threads(8).build().unwrap();

        let a = single.install(|| GameOfLifeRules::evolve_generations(grid.clone(), 5));
        let b = many.install(|| GameOfLifeRules::evolve_generations(grid.clone(), 5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::new(0);
        assert_eq!(GameOfLifeRules::evolve(&grid), grid);
    }
}
