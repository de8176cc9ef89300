//! Game of Life core functionality

pub mod engine;
pub mod grid;
pub mod io;
pub mod rules;

pub use engine::{EngineOptions, EngineState, GenerationCallback, LifeEngine};
pub use grid::Grid;
pub use io::{grid_to_string, load_pattern_from_file, parse_pattern, seed_engine};
pub use rules::GameOfLifeRules;
