//! Errors raised while writing store state.
//!
//! Loading never fails: unreadable or malformed persisted values are recovered
//! as empty collections inside [`crate::CartStore::load`].

use thiserror::Error;

/// Store-level error type.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A collection could not be encoded as JSON.
    #[error("failed to serialize {key}: {source}")]
    Serialize {
        /// Persistence key of the collection.
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The persistence adapter rejected a write.
    #[error("failed to persist {key}: {source}")]
    Persist {
        /// Persistence key of the collection.
        key: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
