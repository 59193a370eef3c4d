//! Latest-snapshot publication slot.
//!
//! Single-producer (the tick thread) / multi-consumer (any display or
//! test thread). A single slot rather than a history ring: retaining past
//! generations is out of scope, readers only ever want the newest
//! complete state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::snapshot::SimSnapshot;

/// A position-tagged slot holding the most recent [`SimSnapshot`].
///
/// The position is monotonically increasing and lets readers detect that
/// a newer snapshot has been published without cloning the grid.
pub(crate) struct SnapshotSlot {
    slot: Mutex<Arc<SimSnapshot>>,
    position: AtomicU64,
}

// Compile-time assertion: SnapshotSlot must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<SnapshotSlot>();
};

impl SnapshotSlot {
    /// Create a slot holding the initial snapshot at position 0.
    pub fn new(initial: SimSnapshot) -> Self {
        Self {
            slot: Mutex::new(Arc::new(initial)),
            position: AtomicU64::new(0),
        }
    }

    /// Publish a new snapshot. Single-producer only.
    pub fn publish(&self, snapshot: SimSnapshot) {
        {
            let mut slot = self.slot.lock().unwrap();
            *slot = Arc::new(snapshot);
        }
        // Release-store: the snapshot is visible before readers observe
        // the new position.
        self.position.fetch_add(1, Ordering::Release);
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> Arc<SimSnapshot> {
        Arc::clone(&self.slot.lock().unwrap())
    }

    /// Monotonic publication counter. Starts at 0, bumped on every
    /// [`publish`](SnapshotSlot::publish).
    pub fn position(&self) -> u64 {
        self.position.load(Ordering::Acquire)
    }
}
