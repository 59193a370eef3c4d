//! The run loop: command draining and timed generation advancement.
//!
//! The tick thread owns its [`Simulation`] exclusively (moved in via
//! `thread::spawn`) — no locks around simulation state. Commands arrive
//! over a bounded crossbeam channel and receipts go back via per-batch
//! reply channels; readers see state only through published snapshots.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError};
use log::{debug, trace};

use crate::command::{Command, Receipt};
use crate::controller::Simulation;
use crate::slot::SnapshotSlot;
use crate::snapshot::SimSnapshot;

/// How often the idle loop wakes to re-check the shutdown flag when no
/// commands arrive.
const IDLE_POLL: Duration = Duration::from_millis(10);

/// A batch of commands submitted by a caller thread, paired with a reply
/// channel for the resulting receipts.
pub(crate) struct CommandBatch {
    pub commands: Vec<Command>,
    pub reply: crossbeam_channel::Sender<Vec<Receipt>>,
}

/// State held by the tick thread's main loop.
pub(crate) struct TickThreadState {
    sim: Simulation,
    slot: Arc<SnapshotSlot>,
    cmd_rx: Receiver<CommandBatch>,
    shutdown_flag: Arc<AtomicBool>,
    tick_stopped: Arc<AtomicBool>,
}

impl TickThreadState {
    pub fn new(
        sim: Simulation,
        slot: Arc<SnapshotSlot>,
        cmd_rx: Receiver<CommandBatch>,
        shutdown_flag: Arc<AtomicBool>,
        tick_stopped: Arc<AtomicBool>,
    ) -> Self {
        Self {
            sim,
            slot,
            cmd_rx,
            shutdown_flag,
            tick_stopped,
        }
    }

    /// Main loop. Runs until `shutdown_flag` is set.
    ///
    /// While running: advance one generation, publish the snapshot, then
    /// suspend for the full configured interval. The suspension doubles
    /// as the command wait, and the run flag is re-checked after every
    /// suspension and before every step — a pause arriving mid-suspension
    /// prevents the next step entirely, so at most the in-flight step
    /// completes after a pause and no step is ever half-applied.
    ///
    /// Consumes self and returns the `Simulation` so the caller can
    /// recover it via `JoinHandle<Simulation>`.
    pub fn run(mut self) -> Simulation {
        loop {
            if self.shutdown_flag.load(Ordering::Acquire) {
                break;
            }

            if self.sim.is_running() {
                self.sim.advance();
                self.publish();
                // Interval changes submitted during this suspension take
                // effect on the next tick; the in-flight deadline stands.
                let deadline = Instant::now() + self.sim.interval();
                self.wait_until(deadline);
            } else {
                self.idle_wait();
            }
        }

        debug!(
            "tick thread stopping at generation {}",
            self.sim.generation()
        );
        self.tick_stopped.store(true, Ordering::Release);
        self.sim
    }

    /// Suspend until `deadline`, applying command batches as they arrive.
    fn wait_until(&mut self, deadline: Instant) {
        loop {
            if self.shutdown_flag.load(Ordering::Acquire) {
                return;
            }
            let remaining = match deadline.checked_duration_since(Instant::now()) {
                Some(d) if !d.is_zero() => d,
                _ => return,
            };
            match self.cmd_rx.recv_timeout(remaining) {
                Ok(batch) => self.apply_batch(batch),
                Err(RecvTimeoutError::Timeout) => return,
                Err(RecvTimeoutError::Disconnected) => {
                    // All handles dropped; shutdown is imminent. Sleep out
                    // the budget instead of spinning on the dead channel.
                    std::thread::sleep(remaining);
                    return;
                }
            }
        }
    }

    /// Block on the command channel while idle, waking periodically to
    /// re-check the shutdown flag.
    fn idle_wait(&mut self) {
        match self.cmd_rx.recv_timeout(IDLE_POLL) {
            Ok(batch) => self.apply_batch(batch),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => std::thread::sleep(IDLE_POLL),
        }
    }

    /// Apply a command batch, reply with receipts, and publish the
    /// resulting state.
    fn apply_batch(&mut self, batch: CommandBatch) {
        trace!("applying {} command(s)", batch.commands.len());
        let receipts: Vec<Receipt> = batch
            .commands
            .into_iter()
            .map(|cmd| self.sim.apply(cmd))
            .collect();
        self.publish();
        // Best-effort reply — the caller may have dropped their receiver.
        let _ = batch.reply.send(receipts);
    }

    fn publish(&self) {
        self.slot.publish(SimSnapshot::capture(&self.sim));
    }
}
