//! Subcommand implementations.
//!
//! Each command returns the text to show the user; `main` prints it. Commands
//! are generic over the persistence adapter so they can be exercised against
//! an in-memory store.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod session;

/// Error type shared by commands.
pub type CommandError = Box<dyn std::error::Error>;
