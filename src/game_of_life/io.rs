//! Seed pattern input and board rendering

use super::{Grid, LifeEngine};
use anyhow::{Context, Result};
use std::path::Path;

/// Load a seed pattern from a text file
/// Format: each line is a row `y`; '1' marks a living cell, '0' or '.' a dead one
pub fn load_pattern_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<(usize, usize)>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    parse_pattern(&content)
        .with_context(|| format!("Failed to parse pattern file: {}", path.as_ref().display()))
}

/// Parse a pattern into living `(x, y)` coordinates
pub fn parse_pattern(content: &str) -> Result<Vec<(usize, usize)>> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Pattern is empty or contains no valid rows");
    }

    let mut living = Vec::new();
    for (y, line) in lines.iter().enumerate() {
        for (x, ch) in line.chars().enumerate() {
            match ch {
                '1' => living.push((x, y)),
                '0' | '.' => {}
                _ => anyhow::bail!(
                    "Invalid character '{}' at column {}, row {}. Only '0', '.' and '1' are allowed",
                    ch,
                    x,
                    y
                ),
            }
        }
    }

    Ok(living)
}

/// Bring the given cells to life, shifted by `offset`
pub fn seed_engine(
    engine: &mut LifeEngine,
    cells: &[(usize, usize)],
    offset: (usize, usize),
) -> Result<()> {
    for &(x, y) in cells {
        let (x, y) = (x + offset.0, y + offset.1);
        engine
            .set(x, y, true)
            .with_context(|| format!("Seed cell ({}, {}) does not fit the grid", x, y))?;
    }
    Ok(())
}

/// Render a grid as rows of '1' and '0', one line per `y`
pub fn grid_to_string(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.size * (grid.size + 1));

    for y in 0..grid.size {
        for x in 0..grid.size {
            result.push(if grid.cells[grid.index(x, y)] { '1' } else { '0' });
        }
        result.push('\n');
    }

    result
}
