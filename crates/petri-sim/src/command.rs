//! Control commands and per-command receipts.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use petri_grid::{Cell, GridError};

/// A control command submitted to the simulation.
///
/// Commands are applied in submission order. Each command yields exactly
/// one [`Receipt`]; a rejected command leaves all simulation state
/// unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Idle → Running. No-op if already running.
    Start,
    /// Running → Idle. No-op if already idle.
    Pause,
    /// Flip between Idle and Running.
    Toggle,
    /// Advance exactly one generation, regardless of run state.
    Step,
    /// Force Idle, clear the grid, and reset the generation counter to 0.
    Reset,
    /// Replace the grid with a random one. Run state and generation
    /// counter are untouched.
    Randomize,
    /// Change the tick interval. Takes effect on the next scheduled tick;
    /// an in-flight suspension is not rescheduled. Never advances a
    /// generation.
    SetInterval(Duration),
    /// Set a single cell. Permitted in either state; an edit made while
    /// running is visible to the next tick.
    SetCell {
        /// Target row.
        row: i32,
        /// Target column.
        col: i32,
        /// The state to write.
        state: Cell,
    },
}

// ── ControlError ───────────────────────────────────────────────────

/// Why a command was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlError {
    /// A cell edit addressed a coordinate outside the grid.
    OutOfBounds(GridError),
    /// `SetInterval` requested a zero interval.
    InvalidInterval,
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(e) => write!(f, "{e}"),
            Self::InvalidInterval => write!(f, "tick interval must be positive"),
        }
    }
}

impl Error for ControlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::OutOfBounds(e) => Some(e),
            Self::InvalidInterval => None,
        }
    }
}

impl From<GridError> for ControlError {
    fn from(e: GridError) -> Self {
        Self::OutOfBounds(e)
    }
}

// ── Receipt ────────────────────────────────────────────────────────

/// Outcome of a single submitted command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Receipt {
    /// Whether the command was applied.
    pub accepted: bool,
    /// Rejection reason when `accepted` is false.
    pub reason: Option<ControlError>,
}

impl Receipt {
    /// Receipt for an applied command.
    pub fn applied() -> Self {
        Self {
            accepted: true,
            reason: None,
        }
    }

    /// Receipt for a rejected command.
    pub fn rejected(reason: ControlError) -> Self {
        Self {
            accepted: false,
            reason: Some(reason),
        }
    }
}

impl From<Result<(), ControlError>> for Receipt {
    fn from(result: Result<(), ControlError>) -> Self {
        match result {
            Ok(()) => Self::applied(),
            Err(e) => Self::rejected(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_from_result() {
        assert_eq!(Receipt::from(Ok(())), Receipt::applied());
        let r = Receipt::from(Err(ControlError::InvalidInterval));
        assert!(!r.accepted);
        assert_eq!(r.reason, Some(ControlError::InvalidInterval));
    }

    #[test]
    fn control_error_wraps_grid_error() {
        let grid_err = GridError::OutOfBounds {
            row: 9,
            col: 9,
            rows: 3,
            cols: 3,
        };
        let err = ControlError::from(grid_err);
        assert_eq!(err, ControlError::OutOfBounds(grid_err));
        assert!(format!("{err}").contains("(9, 9)"));
    }
}
