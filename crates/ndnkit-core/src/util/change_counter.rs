//! Dirty tracking for mutable sub-objects.
//!
//! A `ChangeCounter<T>` owns one sub-object and remembers the value of the
//! sub-object's own mutation counter as of the last poll. The owner (an
//! `Interest`, or a `KeyLocator` owning a key name) polls with
//! `check_changed()` to learn whether the sub-object was mutated in between,
//! including mutation done through `get_mut()` that the wrapper never saw.
//!
//! `check_changed()` is a consuming edge detector: it always refreshes the
//! snapshot, so one unseen mutation is reported exactly once.
//!
//! Counters are stamps drawn from one process-wide sequence (`next_stamp`),
//! not per-value tallies. Two values only share a stamp when one is a clone
//! of the other, so replacing the tracked value wholesale through
//! `get_mut()` (assignment, `std::mem::swap`) is detected like any other
//! mutation.

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_STAMP: AtomicU64 = AtomicU64::new(1);

/// A stamp never handed out before in this process.
pub fn next_stamp() -> u64 {
    NEXT_STAMP.fetch_add(1, Ordering::Relaxed)
}

/// Capability contract for sub-objects tracked by `ChangeCounter`.
///
/// Implementors take a fresh `next_stamp()` on construction and on every
/// structural mutation. Equal stamps must imply equal content.
pub trait ChangeCount {
    fn change_count(&self) -> u64;
}

/// Owned sub-object plus the last observed value of its change count.
#[derive(Debug, Clone)]
pub struct ChangeCounter<T: ChangeCount> {
    target: T,
    observed: Cell<u64>,
}

impl<T: ChangeCount> ChangeCounter<T> {
    pub fn new(target: T) -> Self {
        let observed = Cell::new(target.change_count());
        Self { target, observed }
    }

    /// Borrow the tracked value. Does not touch the snapshot.
    pub fn get(&self) -> &T {
        &self.target
    }

    /// Mutable access. Mutations are picked up by the next `check_changed()`.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Replace the tracked value.
    ///
    /// The snapshot is left alone, so the next `check_changed()` reports the
    /// replacement unless `target` is a clone of the value last polled.
    pub fn set(&mut self, target: T) {
        self.target = target;
    }

    /// Report whether the value's counter moved since the last poll, and
    /// refresh the snapshot either way.
    pub fn check_changed(&self) -> bool {
        let current = self.target.change_count();
        let changed = current != self.observed.get();
        self.observed.set(current);
        changed
    }

    pub fn into_inner(self) -> T {
        self.target
    }
}

impl<T: ChangeCount + Default> Default for ChangeCounter<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
