//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::game_of_life::{grid_to_string, Grid};
use anyhow::Result;
use serde::Serialize;

/// Snapshot of one generation, used for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub generation: u64,
    pub living_count: usize,
    pub living_cells: Vec<(usize, usize)>,
}

impl GenerationReport {
    pub fn new(generation: u64, grid: &Grid) -> Self {
        Self {
            generation,
            living_count: grid.living_count(),
            living_cells: grid.living_cells(),
        }
    }
}

/// Format grids for console output
pub struct GridFormatter;

impl GridFormatter {
    /// Render one generation in the requested format
    pub fn format_generation(generation: u64, grid: &Grid, format: OutputFormat) -> Result<String> {
        let output = match format {
            OutputFormat::Text => {
                let mut output = "-".repeat(grid.size);
                output.push('\n');
                output.push_str(&grid_to_string(grid));
                output
            }
            OutputFormat::Visual => {
                let mut output = format!("Generation {} (Living: {}):\n", generation, grid.living_count());
                output.push_str(&Self::format_grid_with_coords(grid));
                output
            }
            OutputFormat::Json => {
                let mut output = serde_json::to_string(&GenerationReport::new(generation, grid))?;
                output.push('\n');
                output
            }
        };
        Ok(output)
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with x coordinates
        output.push_str("   ");
        for x in 0..grid.size {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for y in 0..grid.size {
            output.push_str(&format!("{:2} ", y));
            for x in 0..grid.size {
                output.push_str(if grid.cells[grid.index(x, y)] { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
