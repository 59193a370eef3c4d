//! Simulation controller for the Petri Game of Life engine.
//!
//! `petri-grid` owns the cell matrix and the rules; this crate owns
//! everything time-shaped: the run/pause state machine, the generation
//! counter, the tick interval, and the run loop that repeatedly advances
//! the grid at the configured cadence.
//!
//! Two layers:
//!
//! - [`Simulation`] — the synchronous controller. A plain state machine
//!   with no threads or timers; callers drive it directly. This is the
//!   right layer for tests and for hosts that already have a frame loop.
//! - [`RealtimeSim`] — spawns a background tick thread that owns a
//!   [`Simulation`] exclusively and advances it while running. Callers
//!   interact through a bounded command channel and poll published
//!   [`SimSnapshot`]s; every snapshot is a complete generation, never a
//!   grid mid-step.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod command;
mod config;
mod controller;
mod realtime;
mod slot;
mod snapshot;
mod tick_thread;

pub use command::{Command, ControlError, Receipt};
pub use config::{ConfigError, SimConfig, Speed};
pub use controller::Simulation;
pub use realtime::{RealtimeSim, ShutdownError, SubmitError};
pub use snapshot::SimSnapshot;
