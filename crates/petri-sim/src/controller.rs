//! Synchronous simulation controller.

use std::time::Duration;

use log::{debug, trace};
use petri_grid::{Cell, Grid};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::command::{Command, ControlError, Receipt};
use crate::config::{ConfigError, SimConfig};

/// The Game of Life state machine: grid, generation counter, run flag,
/// and tick interval.
///
/// `Simulation` has no awareness of wall-clock time. It owns its state
/// exclusively — there are no ambient globals and no shared flags — and
/// every mutating method takes `&mut self`. A scheduler (the tick thread
/// in [`RealtimeSim`](crate::RealtimeSim), or a host frame loop) drives it
/// by calling [`advance`](Simulation::advance) while
/// [`is_running`](Simulation::is_running) holds, sleeping
/// [`interval`](Simulation::interval) between calls.
///
/// Two states: `Idle` (`running == false`) and `Running`. Transitions
/// happen only under explicit commands; `advance` never changes the run
/// flag.
#[derive(Clone, Debug)]
pub struct Simulation {
    grid: Grid,
    generation: u64,
    running: bool,
    interval: Duration,
    rng: ChaCha8Rng,
    rows: i32,
    cols: i32,
}

impl Simulation {
    /// Create an idle simulation with an all-dead grid and generation 0.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::empty(config.rows, config.cols).map_err(|_| {
            // Unreachable after validate(), but the error path costs nothing.
            ConfigError::InvalidDimension {
                rows: config.rows,
                cols: config.cols,
            }
        })?;
        Ok(Self {
            grid,
            generation: 0,
            running: false,
            interval: config.interval,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            rows: config.rows,
            cols: config.cols,
        })
    }

    // ── State transitions ──────────────────────────────────────

    /// Idle → Running. No-op when already running.
    pub fn start(&mut self) {
        if !self.running {
            debug!("simulation started at generation {}", self.generation);
            self.running = true;
        }
    }

    /// Running → Idle. No-op when already idle.
    pub fn pause(&mut self) {
        if self.running {
            debug!("simulation paused at generation {}", self.generation);
            self.running = false;
        }
    }

    /// Flip between Idle and Running.
    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Force Idle, clear the grid, and reset the generation counter to 0.
    ///
    /// This is the only operation that resets the generation counter.
    pub fn reset(&mut self) {
        debug!("simulation reset");
        self.running = false;
        self.generation = 0;
        // Dimensions were validated at construction.
        if let Ok(grid) = Grid::empty(self.rows, self.cols) {
            self.grid = grid;
        }
    }

    /// Replace the grid with one where each cell is alive with
    /// probability 0.5.
    ///
    /// Run state and generation counter are untouched. The randomization
    /// happens here, once — reading the grid afterwards is pure.
    pub fn randomize(&mut self) {
        if let Ok(grid) = Grid::random(self.rows, self.cols, &mut self.rng) {
            debug!("grid randomized, population {}", grid.population());
            self.grid = grid;
        }
    }

    /// Change the tick interval.
    ///
    /// Rejects a zero interval with [`ControlError::InvalidInterval`].
    /// Takes effect on the next scheduled tick; changing speed never
    /// advances a generation.
    pub fn set_interval(&mut self, interval: Duration) -> Result<(), ControlError> {
        if interval.is_zero() {
            return Err(ControlError::InvalidInterval);
        }
        debug!("tick interval set to {interval:?}");
        self.interval = interval;
        Ok(())
    }

    /// Set a single cell. Permitted in either state.
    ///
    /// On [`ControlError::OutOfBounds`] the grid is left unchanged.
    pub fn set_cell(&mut self, row: i32, col: i32, state: Cell) -> Result<(), ControlError> {
        self.grid = self.grid.with_cell(row, col, state)?;
        Ok(())
    }

    /// Advance exactly one generation.
    ///
    /// Computes the next grid as a fresh value and increments the
    /// generation counter. Never fails and never touches the run flag.
    pub fn advance(&mut self) {
        self.grid = self.grid.step();
        self.generation += 1;
        trace!(
            "advanced to generation {}, population {}",
            self.generation,
            self.grid.population()
        );
    }

    /// Apply a single [`Command`], yielding a [`Receipt`].
    pub fn apply(&mut self, command: Command) -> Receipt {
        match command {
            Command::Start => {
                self.start();
                Receipt::applied()
            }
            Command::Pause => {
                self.pause();
                Receipt::applied()
            }
            Command::Toggle => {
                self.toggle();
                Receipt::applied()
            }
            Command::Step => {
                self.advance();
                Receipt::applied()
            }
            Command::Reset => {
                self.reset();
                Receipt::applied()
            }
            Command::Randomize => {
                self.randomize();
                Receipt::applied()
            }
            Command::SetInterval(interval) => self.set_interval(interval).into(),
            Command::SetCell { row, col, state } => self.set_cell(row, col, state).into(),
        }
    }

    // ── Read accessors ─────────────────────────────────────────

    /// The current grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Completed generations since construction or the last reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the simulation is in the Running state.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The configured tick interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}
