//! Double-buffered, asynchronously advancing Game of Life engine
//!
//! The engine owns two grids. The *current* grid is what callers read and
//! mutate; the *staging* grid is handed to a worker on the engine's rayon
//! pool, which fills it with the next generation while reading a shared
//! snapshot of the current grid. [`LifeEngine::poll`] never blocks: once the
//! worker has handed the staging grid back, the buffers are exchanged and the
//! generation counter moves forward.
//!
//! ```text
//!              begin_generation()
//!   Idle ───────────────────────────▶ Computing
//!    ▲                                   │ worker finishes
//!    │  poll(): swap, generation += 1    ▼
//!    └──────────────────────────── (result ready)
//!          (auto_advance re-enters Computing immediately)
//! ```

use super::{GameOfLifeRules, Grid};
use crate::error::{LifeError, LifeResult};
use crossbeam_channel::{Receiver, TryRecvError};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Completion callback, invoked on the polling thread with the new current grid.
pub type GenerationCallback = Box<dyn FnMut(&Grid) + Send>;

/// Observable state of the generation-advance state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Computing,
}

/// Engine construction options
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Re-trigger the next computation as soon as `poll()` swaps buffers.
    pub auto_advance: bool,
    /// Worker count for the engine's pool; `None` lets rayon pick.
    pub threads: Option<usize>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            auto_advance: true,
            threads: None,
        }
    }
}

/// Where the staging buffer currently lives.
enum Stage {
    /// Owned by the engine, nothing in flight.
    Idle(Grid),
    /// Lent to a worker; it comes back through the channel.
    Computing(Receiver<Grid>),
    /// Returned by the worker, waiting for `poll()` to swap it in.
    Finished(Grid),
}

pub struct LifeEngine {
    size: usize,
    current: Arc<Grid>,
    stage: Stage,
    generation: u64,
    auto_advance: bool,
    on_generation: Option<GenerationCallback>,
    pool: ThreadPool,
}

impl fmt::Debug for LifeEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifeEngine")
            .field("size", &self.size)
            .field("generation", &self.generation)
            .field("state", &self.state())
            .field("auto_advance", &self.auto_advance)
            .finish_non_exhaustive()
    }
}

impl LifeEngine {
    /// Create an engine with default options
    pub fn new(size: i64) -> LifeResult<Self> {
        Self::with_options(size, EngineOptions::default())
    }

    /// Create an engine with both grids allocated and all cells dead
    pub fn with_options(requested: i64, options: EngineOptions) -> LifeResult<Self> {
        let invalid = || LifeError::InvalidDimension { size: requested };
        let size = usize::try_from(requested).map_err(|_| invalid())?;
        let current = Grid::try_new(size).map_err(|_| invalid())?;
        let staging = Grid::try_new(size).map_err(|_| invalid())?;

        let pool = ThreadPoolBuilder::new()
            .num_threads(options.threads.unwrap_or(0))
            .thread_name(|i| format!("life-worker-{i}"))
            .build()?;

        debug!(size, threads = pool.current_num_threads(), "created life engine");

        Ok(Self {
            size,
            current: Arc::new(current),
            stage: Stage::Idle(staging),
            generation: 0,
            auto_advance: options.auto_advance,
            on_generation: None,
            pool,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of completed generation transitions
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn auto_advance(&self) -> bool {
        self.auto_advance
    }

    pub fn set_auto_advance(&mut self, auto_advance: bool) {
        self.auto_advance = auto_advance;
    }

    /// The visible grid
    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn state(&self) -> EngineState {
        match self.stage {
            Stage::Idle(_) => EngineState::Idle,
            Stage::Computing(_) | Stage::Finished(_) => EngineState::Computing,
        }
    }

    /// Whether an in-flight computation has produced its result.
    ///
    /// Non-blocking; a finished result stays pending until `poll()`.
    pub fn is_computation_finished(&mut self) -> LifeResult<bool> {
        self.collect_result()?;
        Ok(matches!(self.stage, Stage::Finished(_)))
    }

    /// Current-generation liveness at `(x, y)`
    pub fn get(&self, x: usize, y: usize) -> LifeResult<bool> {
        self.current.get(x, y)
    }

    /// Write liveness into the current grid.
    ///
    /// A computation already in flight keeps reading its own snapshot and
    /// will not see this write. Mutate while `Idle` for the change to take
    /// part in the next generation.
    pub fn set(&mut self, x: usize, y: usize, value: bool) -> LifeResult<()> {
        self.current.get(x, y)?;
        self.current_mut().set(x, y, value)
    }

    /// Flip liveness at `(x, y)` and return the new value
    pub fn toggle(&mut self, x: usize, y: usize) -> LifeResult<bool> {
        self.current.get(x, y)?;
        self.current_mut().toggle(x, y)
    }

    fn current_mut(&mut self) -> &mut Grid {
        if Arc::strong_count(&self.current) > 1 {
            trace!("copying current grid shared with an in-flight computation");
        }
        Arc::make_mut(&mut self.current)
    }

    /// Register the completion callback, returning the one it replaces
    pub fn on_generation<F>(&mut self, callback: F) -> Option<GenerationCallback>
    where
        F: FnMut(&Grid) + Send + 'static,
    {
        let previous = self.on_generation.replace(Box::new(callback));
        if previous.is_some() {
            debug!("replaced generation callback");
        }
        previous
    }

    pub fn clear_on_generation(&mut self) -> Option<GenerationCallback> {
        self.on_generation.take()
    }

    /// Start computing the next generation into the staging buffer.
    ///
    /// Returns `false` without doing anything if a computation is still
    /// running. A finished but not yet swapped result is discarded and
    /// recomputed from the current grid.
    pub fn begin_generation(&mut self) -> LifeResult<bool> {
        self.collect_result()?;

        match std::mem::replace(&mut self.stage, Stage::Idle(Grid::new(0))) {
            Stage::Idle(staging) | Stage::Finished(staging) => {
                self.spawn_computation(staging);
                Ok(true)
            }
            computing @ Stage::Computing(_) => {
                self.stage = computing;
                Ok(false)
            }
        }
    }

    /// Swap in a finished generation, if there is one.
    ///
    /// Never blocks. On a transition the buffers are exchanged, the
    /// generation counter is incremented, the next computation is started
    /// when auto-advance is on, and the callback runs on this thread.
    /// Returns whether a transition happened.
    pub fn poll(&mut self) -> LifeResult<bool> {
        self.collect_result()?;

        let staging = match std::mem::replace(&mut self.stage, Stage::Idle(Grid::new(0))) {
            Stage::Finished(staging) => staging,
            other => {
                self.stage = other;
                return Ok(false);
            }
        };

        let previous = std::mem::replace(&mut self.current, Arc::new(staging));
        let recycled = Arc::try_unwrap(previous).unwrap_or_else(|shared| {
            warn!("previous grid still shared at swap, copying");
            (*shared).clone()
        });
        self.generation += 1;
        debug!(generation = self.generation, "advanced generation");

        if self.auto_advance {
            self.spawn_computation(recycled);
        } else {
            self.stage = Stage::Idle(recycled);
        }

        if let Some(callback) = self.on_generation.as_mut() {
            callback(self.current.as_ref());
        }

        Ok(true)
    }

    /// Block until the in-flight computation, if any, has finished.
    ///
    /// The result is left pending; only `poll()` swaps it in.
    pub fn wait_for_completion(&mut self) -> LifeResult<()> {
        if let Stage::Computing(done) = &self.stage {
            let staging = done.recv().map_err(|_| LifeError::ComputationAborted)?;
            self.stage = Stage::Finished(staging);
        }
        Ok(())
    }

    fn collect_result(&mut self) -> LifeResult<()> {
        if let Stage::Computing(done) = &self.stage {
            match done.try_recv() {
                Ok(staging) => self.stage = Stage::Finished(staging),
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => return Err(LifeError::ComputationAborted),
            }
        }
        Ok(())
    }

    fn spawn_computation(&mut self, mut staging: Grid) {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let current = Arc::clone(&self.current);
        let generation = self.generation + 1;

        debug!(generation, "starting generation computation");
        self.pool.spawn(move || {
            GameOfLifeRules::evolve_into(&current, &mut staging);
            // Release the snapshot before handing back, so the swap can reclaim it.
            drop(current);
            trace!(generation, "generation computed");
            let _ = tx.send(staging);
        });

        self.stage = Stage::Computing(rx);
    }
}
