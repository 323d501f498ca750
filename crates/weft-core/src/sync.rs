//! Sync and single variables.
//!
//! A [`SyncVar`] carries a full/empty bit alongside its value. Writes
//! require (or wait for) a particular state and leave the variable full;
//! destructive reads wait for full and leave it empty. Tasks coordinate by
//! blocking on the state they need. A [`SingleVar`] is the write-once
//! variant: one write fills it forever and every reader wakes.
//!
//! ## Example
//!
//! ```
//! use weft_core::{cobegin, SyncVar};
//!
//! let v = SyncVar::new();
//! cobegin!(
//!     || v.write_ef(7),
//!     || assert_eq!(v.read_fe(), 7),
//! );
//! ```

use std::fmt;

use parking_lot::{Condvar, Mutex};

struct Slot<T> {
    value: T,
    full: bool,
}

/// A variable with full/empty synchronization state.
///
/// Starts empty. Not clonable; share it by reference or in an `Arc`.
pub struct SyncVar<T> {
    slot: Mutex<Slot<T>>,
    readers: Condvar,
    writers: Condvar,
}

impl<T: Default> SyncVar<T> {
    /// An empty sync variable.
    pub fn new() -> Self {
        SyncVar {
            slot: Mutex::new(Slot {
                value: T::default(),
                full: false,
            }),
            readers: Condvar::new(),
            writers: Condvar::new(),
        }
    }

    /// A full sync variable holding `value`.
    pub fn full(value: T) -> Self {
        SyncVar {
            slot: Mutex::new(Slot { value, full: true }),
            readers: Condvar::new(),
            writers: Condvar::new(),
        }
    }

    /// Waits until empty, stores `value`, and leaves the variable full.
    pub fn write_ef(&self, value: T) {
        let mut slot = self.slot.lock();
        while slot.full {
            self.writers.wait(&mut slot);
        }
        slot.value = value;
        slot.full = true;
        self.readers.notify_all();
    }

    /// Waits until full, then overwrites the value. Stays full.
    pub fn write_ff(&self, value: T) {
        let mut slot = self.slot.lock();
        while !slot.full {
            self.readers.wait(&mut slot);
        }
        slot.value = value;
        self.readers.notify_all();
    }

    /// Stores `value` regardless of state and leaves the variable full.
    pub fn write_xf(&self, value: T) {
        let mut slot = self.slot.lock();
        slot.value = value;
        slot.full = true;
        self.readers.notify_all();
    }

    /// Waits until full, takes the value, and leaves the variable empty.
    pub fn read_fe(&self) -> T {
        let mut slot = self.slot.lock();
        while !slot.full {
            self.readers.wait(&mut slot);
        }
        slot.full = false;
        let value = std::mem::take(&mut slot.value);
        self.writers.notify_all();
        value
    }

    /// Empties the variable and resets the value to its default.
    pub fn reset(&self) {
        let mut slot = self.slot.lock();
        slot.value = T::default();
        slot.full = false;
        self.writers.notify_all();
    }
}

impl<T> SyncVar<T> {
    /// Waits until full and returns a copy of the value. Stays full.
    pub fn read_ff(&self) -> T
    where
        T: Clone,
    {
        let mut slot = self.slot.lock();
        while !slot.full {
            self.readers.wait(&mut slot);
        }
        slot.value.clone()
    }

    /// Returns a copy of the value without regard to state or other
    /// waiters.
    pub fn read_xx(&self) -> T
    where
        T: Clone,
    {
        self.slot.lock().value.clone()
    }

    /// True when the variable is full. Stale by the time the caller acts
    /// on it unless the caller serializes writers itself.
    pub fn is_full(&self) -> bool {
        self.slot.lock().full
    }
}

impl<T: Default> Default for SyncVar<T> {
    fn default() -> Self {
        SyncVar::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SyncVar<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.lock();
        f.debug_struct("SyncVar")
            .field("value", &slot.value)
            .field("full", &slot.full)
            .finish()
    }
}

/// A write-once variable with full/empty synchronization state.
///
/// Starts empty; the single permitted write fills it permanently.
pub struct SingleVar<T> {
    slot: Mutex<Slot<T>>,
    readers: Condvar,
}

impl<T: Default> SingleVar<T> {
    /// An empty single variable.
    pub fn new() -> Self {
        SingleVar {
            slot: Mutex::new(Slot {
                value: T::default(),
                full: false,
            }),
            readers: Condvar::new(),
        }
    }
}

impl<T> SingleVar<T> {
    /// Stores `value` and fills the variable. Aborts if already full.
    pub fn write_ef(&self, value: T) {
        let mut slot = self.slot.lock();
        assert!(!slot.full, "single variables can only be written once");
        slot.value = value;
        slot.full = true;
        self.readers.notify_all();
    }

    /// Waits until full and returns a copy of the value.
    pub fn read_ff(&self) -> T
    where
        T: Clone,
    {
        let mut slot = self.slot.lock();
        while !slot.full {
            self.readers.wait(&mut slot);
        }
        slot.value.clone()
    }

    /// Returns a copy of the value without waiting.
    pub fn read_xx(&self) -> T
    where
        T: Clone,
    {
        self.slot.lock().value.clone()
    }

    /// True when the variable has been written.
    pub fn is_full(&self) -> bool {
        self.slot.lock().full
    }
}

impl<T: Default> Default for SingleVar<T> {
    fn default() -> Self {
        SingleVar::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SingleVar<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.lock();
        f.debug_struct("SingleVar")
            .field("value", &slot.value)
            .field("full", &slot.full)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_starts_empty() {
        let v: SyncVar<i64> = SyncVar::new();
        assert!(!v.is_full());
        v.write_ef(3);
        assert!(v.is_full());
    }

    #[test]
    fn test_sync_full_constructor() {
        let v = SyncVar::full(9);
        assert!(v.is_full());
        assert_eq!(v.read_fe(), 9);
        assert!(!v.is_full());
    }

    #[test]
    fn test_read_fe_empties() {
        let v = SyncVar::new();
        v.write_ef(5);
        assert_eq!(v.read_fe(), 5);
        assert!(!v.is_full());
    }

    #[test]
    fn test_read_ff_keeps_full() {
        let v = SyncVar::new();
        v.write_ef(5);
        assert_eq!(v.read_ff(), 5);
        assert!(v.is_full());
        assert_eq!(v.read_ff(), 5);
    }

    #[test]
    fn test_write_ff_overwrites_full() {
        let v = SyncVar::new();
        v.write_ef(1);
        v.write_ff(2);
        assert_eq!(v.read_ff(), 2);
        assert!(v.is_full());
    }

    #[test]
    fn test_write_xf_and_read_xx_ignore_state() {
        let v = SyncVar::new();
        assert_eq!(v.read_xx(), 0);
        v.write_xf(4);
        v.write_xf(6);
        assert_eq!(v.read_xx(), 6);
        assert!(v.is_full());
    }

    #[test]
    fn test_reset() {
        let v = SyncVar::new();
        v.write_ef(8);
        v.reset();
        assert!(!v.is_full());
        assert_eq!(v.read_xx(), 0);
        v.write_ef(1);
        assert_eq!(v.read_fe(), 1);
    }

    #[test]
    fn test_single_write_then_read() {
        let v = SingleVar::new();
        assert!(!v.is_full());
        v.write_ef(11);
        assert!(v.is_full());
        assert_eq!(v.read_ff(), 11);
        assert_eq!(v.read_ff(), 11);
        assert_eq!(v.read_xx(), 11);
    }

    #[test]
    #[should_panic(expected = "written once")]
    fn test_single_rejects_second_write() {
        let v = SingleVar::new();
        v.write_ef(1);
        v.write_ef(2);
    }
}
