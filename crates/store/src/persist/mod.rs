//! Key-value persistence for store collections.
//!
//! The store serializes each collection as a whole and hands the string to a
//! [`Persister`] under a fixed key (see [`keys`]). Every write overwrites the
//! previous value for that key; there are no deltas.
//!
//! Backends:
//! - [`MemoryPersister`] - in-process map for tests and demos
//! - [`FileStore`] - one JSON file per key in a data directory

mod file;
mod memory;

use std::rc::Rc;

pub use file::{FileStore, FileStoreError};
pub use memory::MemoryPersister;

/// Fixed persistence keys.
pub mod keys {
    /// Key for the live cart line items.
    pub const CART: &str = "cartItems";

    /// Key for the order history (newest first).
    pub const ORDERS: &str = "userOrders";
}

/// A synchronous key-value string store that survives restarts.
///
/// Methods take `&self`; backends that need to mutate use interior
/// mutability.
pub trait Persister {
    /// The error type returned by persistence operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Retrieve a value by key.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the value exists but cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Insert or overwrite a value.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the value could not be stored.
    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

impl<P: Persister + ?Sized> Persister for &P {
    type Error = P::Error;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).write(key, value)
    }
}

impl<P: Persister + ?Sized> Persister for Rc<P> {
    type Error = P::Error;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).write(key, value)
    }
}
