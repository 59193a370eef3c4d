//! Immutable published view of simulation state.

use std::time::Duration;

use petri_grid::Grid;

use crate::controller::Simulation;

/// A consistent, fully-formed view of the simulation at one generation.
///
/// Snapshots are published by the tick thread after every completed step
/// or applied command and shared as `Arc<SimSnapshot>`. Because the grid
/// is replaced wholesale on each step, a snapshot can never expose a grid
/// mid-step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimSnapshot {
    /// The grid at this generation.
    pub grid: Grid,
    /// Completed generations since construction or the last reset.
    pub generation: u64,
    /// Whether the simulation was running when this snapshot was taken.
    pub running: bool,
    /// The tick interval in effect.
    pub interval: Duration,
}

impl SimSnapshot {
    /// Capture the current state of a [`Simulation`].
    pub(crate) fn capture(sim: &Simulation) -> Self {
        Self {
            grid: sim.grid().clone(),
            generation: sim.generation(),
            running: sim.is_running(),
            interval: sim.interval(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    #[test]
    fn capture_reflects_controller_state() {
        let mut sim = Simulation::new(SimConfig::default()).unwrap();
        sim.start();
        sim.advance();
        let snap = SimSnapshot::capture(&sim);
        assert_eq!(snap.generation, 1);
        assert!(snap.running);
        assert_eq!(snap.grid, *sim.grid());
        assert_eq!(snap.interval, sim.interval());
    }
}
