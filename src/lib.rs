//! Double-buffered Game of Life engine
//!
//! This library advances Conway's Game of Life on a fixed square grid,
//! computing each generation on a worker pool while the caller keeps reading
//! the visible grid and polls for completion.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod utils;

pub use config::Settings;
pub use error::{LifeError, LifeResult};
pub use game_of_life::{EngineOptions, EngineState, Grid, LifeEngine};

use anyhow::Result;

/// Build an engine from settings and seed it with the configured cells
pub fn build_engine(settings: &Settings) -> Result<LifeEngine> {
    let mut engine = LifeEngine::with_options(settings.simulation.size, settings.engine_options())?;

    if let Some(ref pattern_file) = settings.input.pattern_file {
        let pattern = game_of_life::load_pattern_from_file(pattern_file)?;
        game_of_life::seed_engine(&mut engine, &pattern, (0, 0))?;
    }
    game_of_life::seed_engine(&mut engine, &settings.input.cells, (0, 0))?;

    Ok(engine)
}
