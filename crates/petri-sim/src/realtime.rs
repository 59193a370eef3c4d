//! User-facing [`RealtimeSim`] handle and shutdown sequence.
//!
//! # Architecture
//!
//! ```text
//! Caller thread(s)                 Tick thread
//!     |                                |
//!     |--submit(commands)------------->| cmd_rx.recv_timeout(...)
//!     |   [cmd_tx: bounded(64)]        | sim.apply(cmd) per command
//!     |<--receipts via reply channel---| slot.publish(snapshot)
//!     |                                |
//!     |                                | while running:
//!     |                                |   sim.advance()
//!     |                                |   slot.publish(snapshot)
//!     |                                |   suspend(interval), re-check
//!     |                                |
//!     |--snapshot()---> slot.latest()  |
//! ```
//!
//! The tick thread owns the [`Simulation`]; callers only ever touch the
//! command channel and the snapshot slot, so display reads always observe
//! a complete generation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::debug;
use petri_grid::Cell;

use crate::command::{Command, Receipt};
use crate::config::{ConfigError, SimConfig};
use crate::controller::Simulation;
use crate::slot::SnapshotSlot;
use crate::snapshot::SimSnapshot;
use crate::tick_thread::{CommandBatch, TickThreadState};

// ── Error types ──────────────────────────────────────────────────

/// Error submitting commands to the tick thread.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// The tick thread has shut down.
    Shutdown,
    /// The command channel is full (back-pressure).
    ChannelFull,
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shutdown => write!(f, "tick thread has shut down"),
            Self::ChannelFull => write!(f, "command channel full"),
        }
    }
}

impl std::error::Error for SubmitError {}

/// Error shutting down the tick thread.
#[derive(Debug, PartialEq, Eq)]
pub enum ShutdownError {
    /// The tick thread panicked; the simulation could not be recovered.
    TickThreadPanicked,
}

impl std::fmt::Display for ShutdownError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TickThreadPanicked => write!(f, "tick thread panicked"),
        }
    }
}

impl std::error::Error for ShutdownError {}

// ── RealtimeSim ──────────────────────────────────────────────────

/// A simulation advanced by a dedicated background tick thread.
///
/// Constructing a `RealtimeSim` spawns the tick thread with the
/// simulation idle; call [`start`](RealtimeSim::start) (or submit
/// [`Command::Start`]) to begin stepping at the configured interval.
/// Presentation layers poll [`snapshot`](RealtimeSim::snapshot) at their
/// own cadence.
pub struct RealtimeSim {
    cmd_tx: Option<crossbeam_channel::Sender<CommandBatch>>,
    slot: Arc<SnapshotSlot>,
    shutdown_flag: Arc<AtomicBool>,
    tick_stopped: Arc<AtomicBool>,
    tick_thread: Option<JoinHandle<Simulation>>,
}

impl RealtimeSim {
    /// Validate `config`, build the simulation, and spawn the tick thread.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let sim = Simulation::new(config)?;
        let slot = Arc::new(SnapshotSlot::new(SimSnapshot::capture(&sim)));

        // Bounded: the tick thread drains at least once per suspension.
        let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(64);
        let shutdown_flag = Arc::new(AtomicBool::new(false));
        let tick_stopped = Arc::new(AtomicBool::new(false));

        let thread_slot = Arc::clone(&slot);
        let thread_shutdown = Arc::clone(&shutdown_flag);
        let thread_stopped = Arc::clone(&tick_stopped);
        let tick_thread = thread::Builder::new()
            .name("petri-tick".into())
            .spawn(move || {
                let state = TickThreadState::new(
                    sim,
                    thread_slot,
                    cmd_rx,
                    thread_shutdown,
                    thread_stopped,
                );
                state.run()
            })
            .map_err(|e| ConfigError::ThreadSpawnFailed {
                reason: e.to_string(),
            })?;

        Ok(Self {
            cmd_tx: Some(cmd_tx),
            slot,
            shutdown_flag,
            tick_stopped,
            tick_thread: Some(tick_thread),
        })
    }

    /// Submit a batch of commands and block for their receipts.
    ///
    /// Receipts arrive within one tick interval: the tick thread applies
    /// commands during its suspension, and promptly while idle.
    pub fn submit(&self, commands: Vec<Command>) -> Result<Vec<Receipt>, SubmitError> {
        let cmd_tx = self.cmd_tx.as_ref().ok_or(SubmitError::Shutdown)?;

        let (reply_tx, reply_rx) = crossbeam_channel::bounded(1);
        cmd_tx
            .try_send(CommandBatch {
                commands,
                reply: reply_tx,
            })
            .map_err(|e| match e {
                crossbeam_channel::TrySendError::Full(_) => SubmitError::ChannelFull,
                crossbeam_channel::TrySendError::Disconnected(_) => SubmitError::Shutdown,
            })?;

        reply_rx.recv().map_err(|_| SubmitError::Shutdown)
    }

    fn submit_one(&self, command: Command) -> Result<Receipt, SubmitError> {
        let receipts = self.submit(vec![command])?;
        // One command in, one receipt out.
        receipts.into_iter().next().ok_or(SubmitError::Shutdown)
    }

    // ── Convenience wrappers ───────────────────────────────────

    /// Begin stepping. No-op if already running.
    pub fn start(&self) -> Result<Receipt, SubmitError> {
        self.submit_one(Command::Start)
    }

    /// Stop stepping. Effective within one tick interval: once the
    /// receipt returns, no further generation will be computed.
    pub fn pause(&self) -> Result<Receipt, SubmitError> {
        self.submit_one(Command::Pause)
    }

    /// Flip between running and idle.
    pub fn toggle(&self) -> Result<Receipt, SubmitError> {
        self.submit_one(Command::Toggle)
    }

    /// Advance exactly one generation.
    pub fn step(&self) -> Result<Receipt, SubmitError> {
        self.submit_one(Command::Step)
    }

    /// Force idle, clear the grid, and zero the generation counter.
    pub fn reset(&self) -> Result<Receipt, SubmitError> {
        self.submit_one(Command::Reset)
    }

    /// Replace the grid with a random one.
    pub fn randomize(&self) -> Result<Receipt, SubmitError> {
        self.submit_one(Command::Randomize)
    }

    /// Change the tick interval. Takes effect on the next scheduled tick.
    pub fn set_interval(&self, interval: Duration) -> Result<Receipt, SubmitError> {
        self.submit_one(Command::SetInterval(interval))
    }

    /// Set a single cell. Permitted whether idle or running.
    pub fn set_cell(&self, row: i32, col: i32, state: Cell) -> Result<Receipt, SubmitError> {
        self.submit_one(Command::SetCell { row, col, state })
    }

    // ── Reads ──────────────────────────────────────────────────

    /// The most recently published snapshot.
    ///
    /// Cheap (an `Arc` clone); poll freely from a render loop.
    pub fn snapshot(&self) -> Arc<SimSnapshot> {
        self.slot.latest()
    }

    /// Monotonic publication counter; bumps whenever a new snapshot is
    /// published. Lets pollers skip redraws when nothing changed.
    pub fn snapshot_position(&self) -> u64 {
        self.slot.position()
    }

    /// Whether the tick thread has exited.
    pub fn is_stopped(&self) -> bool {
        self.tick_stopped.load(Ordering::Acquire)
    }

    // ── Shutdown ───────────────────────────────────────────────

    /// Stop the tick thread and recover the [`Simulation`].
    ///
    /// The shutdown flag is observed within one idle poll or tick
    /// interval; the recovered controller carries the final grid,
    /// generation counter, and run flag.
    pub fn shutdown(mut self) -> Result<Simulation, ShutdownError> {
        self.begin_shutdown();
        let handle = self
            .tick_thread
            .take()
            .ok_or(ShutdownError::TickThreadPanicked)?;
        let sim = handle
            .join()
            .map_err(|_| ShutdownError::TickThreadPanicked)?;
        debug!("tick thread joined at generation {}", sim.generation());
        Ok(sim)
    }

    fn begin_shutdown(&mut self) {
        self.shutdown_flag.store(true, Ordering::Release);
        // Disconnect the channel so a sleeping recv returns promptly.
        self.cmd_tx = None;
    }
}

impl Drop for RealtimeSim {
    fn drop(&mut self) {
        self.begin_shutdown();
        if let Some(handle) = self.tick_thread.take() {
            let _ = handle.join();
        }
    }
}

impl std::fmt::Debug for RealtimeSim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeSim")
            .field("snapshot_position", &self.slot.position())
            .field("stopped", &self.is_stopped())
            .finish()
    }
}
