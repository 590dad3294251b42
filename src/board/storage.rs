//! Durable session storage.
//!
//! The board only needs a synchronous string key-value store. Hosts plug in
//! whatever backs it (browser session storage, a file, a database row);
//! this crate ships an in-memory implementation for tests and headless use.

use std::cell::{Cell, RefCell};

use rustc_hash::FxHashMap;

/// Key-value string store keyed by session.
///
/// Writes are fire-and-forget: a backend that can fail must handle (or
/// report) the failure itself.
pub trait SessionStorage {
    /// Read the value stored under `key`.
    fn read(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str);

    /// Whether the backend is usable in the current execution context.
    ///
    /// When this returns `false` the board skips restore and persistence
    /// and runs purely in memory.
    fn is_available(&self) -> bool {
        true
    }
}

/// In-process storage backed by a hash map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<FxHashMap<String, String>>,
    writes: Cell<usize>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with one entry (builder pattern).
    #[must_use]
    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.borrow_mut().insert(key.into(), value.into());
        self
    }

    /// Number of `write` calls so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Remove the value under `key`.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries.borrow_mut().remove(key)
    }
}

impl SessionStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
    }
}
