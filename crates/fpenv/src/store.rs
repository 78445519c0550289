//! Software exception store.
//!
//! A software-maintained record of the five exception flags, independent of
//! the FPU status register. Two ways in:
//! 1. **[`ExceptionStore`]:** A plain owned value. Create one explicitly for
//!    single-threaded code or tests and pass it where flags are recorded.
//! 2. **Per-thread store:** Every thread owns one store, created on first
//!    access and released when the thread exits. The free functions in this
//!    module ([`raise`], [`test`], [`clear`], [`get_all`], [`clear_all`]) and
//!    the zero-sized [`ThreadExceptions`] handle operate on it.
//!
//! A thread can only ever reach its own per-thread store, so flags raised on
//! one thread are never visible on another and no locking is needed.

use std::cell::Cell;

use tracing::trace;

use crate::common::flags::{ExceptionFlag, ExceptionFlagSet};

/// Destination for raised exception flags.
///
/// Implemented by [`ExceptionStore`] and [`ThreadExceptions`] so that code
/// which records exceptions, such as the signaling comparators, can target
/// either an explicit store or the calling thread's store.
pub trait ExceptionSink {
    /// Raises `flag`. Raising an already raised flag is a no-op.
    fn raise(&mut self, flag: ExceptionFlag);
}

/// An explicitly owned set of software exception flags.
///
/// All flags start cleared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExceptionStore {
    flags: ExceptionFlagSet,
}

impl ExceptionStore {
    /// Creates a store with every flag cleared.
    pub const fn new() -> Self {
        Self {
            flags: ExceptionFlagSet::NONE,
        }
    }

    /// Sets `flag`. Idempotent.
    pub const fn raise(&mut self, flag: ExceptionFlag) {
        self.flags.set(flag, true);
    }

    /// Returns the current value of `flag`.
    pub const fn test(&self, flag: ExceptionFlag) -> bool {
        self.flags.get(flag)
    }

    /// Clears `flag`. Clearing an already clear flag is a no-op.
    pub const fn clear(&mut self, flag: ExceptionFlag) {
        self.flags.set(flag, false);
    }

    /// Returns a snapshot of all five flags.
    pub const fn get_all(&self) -> ExceptionFlagSet {
        self.flags
    }

    /// Clears all five flags.
    pub const fn clear_all(&mut self) {
        self.flags = ExceptionFlagSet::NONE;
    }
}

impl ExceptionSink for ExceptionStore {
    fn raise(&mut self, flag: ExceptionFlag) {
        Self::raise(self, flag);
    }
}

fn fresh_store() -> Cell<ExceptionStore> {
    trace!(thread = ?std::thread::current().id(), "software exception store created");
    Cell::new(ExceptionStore::new())
}

thread_local! {
    // Lazily initialised on first access, dropped at thread exit.
    static THREAD_STORE: Cell<ExceptionStore> = fresh_store();
}

/// Runs `f` against the calling thread's store and writes the result back.
fn with_thread_store<R>(f: impl FnOnce(&mut ExceptionStore) -> R) -> R {
    THREAD_STORE.with(|cell| {
        let mut store = cell.get();
        let result = f(&mut store);
        cell.set(store);
        result
    })
}

/// Raises `flag` in the calling thread's store.
pub fn raise(flag: ExceptionFlag) {
    with_thread_store(|store| store.raise(flag));
}

/// Returns the value of `flag` in the calling thread's store.
pub fn test(flag: ExceptionFlag) -> bool {
    THREAD_STORE.with(|cell| cell.get().test(flag))
}

/// Clears `flag` in the calling thread's store.
pub fn clear(flag: ExceptionFlag) {
    with_thread_store(|store| store.clear(flag));
}

/// Returns a snapshot of the calling thread's store.
pub fn get_all() -> ExceptionFlagSet {
    THREAD_STORE.with(|cell| cell.get().get_all())
}

/// Clears every flag in the calling thread's store.
pub fn clear_all() {
    with_thread_store(ExceptionStore::clear_all);
}

/// Handle to the calling thread's store.
///
/// Zero-sized; every method resolves the store of whichever thread calls it.
/// Useful where an [`ExceptionSink`] is expected.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadExceptions;

impl ThreadExceptions {
    /// Raises `flag` in the calling thread's store.
    pub fn raise(self, flag: ExceptionFlag) {
        raise(flag);
    }

    /// Returns the value of `flag` in the calling thread's store.
    pub fn test(self, flag: ExceptionFlag) -> bool {
        test(flag)
    }

    /// Clears `flag` in the calling thread's store.
    pub fn clear(self, flag: ExceptionFlag) {
        clear(flag);
    }

    /// Returns a snapshot of the calling thread's store.
    pub fn get_all(self) -> ExceptionFlagSet {
        get_all()
    }

    /// Clears every flag in the calling thread's store.
    pub fn clear_all(self) {
        clear_all();
    }
}

impl ExceptionSink for ThreadExceptions {
    fn raise(&mut self, flag: ExceptionFlag) {
        raise(flag);
    }
}
