//! Petri: an interactive Conway's Game of Life simulation engine.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Petri sub-crates. For most users, adding `petri` as a single
//! dependency is sufficient.
//!
//! The engine is split in two: the grid (cell matrix, neighbor counting,
//! and the Life rule — pure and timing-free) and the simulation controller
//! (run/pause state, generation counter, tick interval, and the run loop).
//! A presentation layer drives the controller and polls its snapshots;
//! nothing here renders anything.
//!
//! # Quick start
//!
//! ```rust
//! use petri::prelude::*;
//! use std::time::Duration;
//!
//! // A 16x16 simulation, idle, all cells dead.
//! let config = SimConfig {
//!     rows: 16,
//!     cols: 16,
//!     interval: Duration::from_millis(300),
//!     seed: 42,
//! };
//! let mut sim = Simulation::new(config).unwrap();
//!
//! // Draw a vertical blinker and advance one generation by hand.
//! for (row, col) in [(1, 2), (2, 2), (3, 2)] {
//!     sim.set_cell(row, col, Cell::Alive).unwrap();
//! }
//! sim.advance();
//! assert_eq!(sim.generation(), 1);
//! assert_eq!(sim.grid().get(2, 1).unwrap(), Cell::Alive);
//!
//! // Or hand the config to RealtimeSim and let the tick thread drive:
//! // let live = RealtimeSim::new(config)?;
//! // live.randomize()?;
//! // live.start()?;
//! // ... poll live.snapshot() from the render loop ...
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`grid`] | `petri-grid` | `Cell`, `Grid`, neighbor offsets, rule evaluation |
//! | [`sim`] | `petri-sim` | Controller, config, commands, realtime run loop |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Grid engine: cell matrix and rule evaluation (`petri-grid`).
pub use petri_grid as grid;

/// Simulation controller and realtime run loop (`petri-sim`).
pub use petri_sim as sim;

/// The most commonly used types, re-exported for a single glob import.
pub mod prelude {
    pub use petri_grid::{Cell, Grid, GridError, NEIGHBOR_OFFSETS};
    pub use petri_sim::{
        Command, ConfigError, ControlError, RealtimeSim, Receipt, ShutdownError, SimConfig,
        SimSnapshot, Simulation, Speed, SubmitError,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn facade_reexports_compose() {
        let grid = Grid::empty(3, 3).unwrap();
        assert_eq!(grid.step().population(), 0);

        let sim = Simulation::new(SimConfig::default()).unwrap();
        assert!(!sim.is_running());
        assert_eq!(sim.grid().rows(), 25);
    }
}
