//! Shopfront Core - Shared domain types.
//!
//! This crate provides the types shared by every Shopfront component:
//! - `store` - Cart/order state core with persistence and change notifications
//! - `cli` - Command-line front end that plays the role of the UI layer
//!
//! # Architecture
//!
//! The core crate contains only types and pure derivations - no I/O, no
//! persistence, no clocks. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, statuses, cart line items, and orders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
