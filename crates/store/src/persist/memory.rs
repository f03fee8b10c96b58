//! In-memory persistence backend.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::convert::Infallible;

use super::Persister;

/// A [`Persister`] backed by a `HashMap`.
///
/// Never fails. Keeps a count of writes so tests can assert that no-op
/// commands leave storage alone.
#[derive(Debug, Default)]
pub struct MemoryPersister {
    entries: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
}

impl MemoryPersister {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value without counting it as a write.
    #[must_use]
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// The raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Number of writes performed so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl Persister for MemoryPersister {
    type Error = Infallible;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
