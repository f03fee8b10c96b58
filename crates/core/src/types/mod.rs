//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for the cart and order domain.

pub mod cart;
pub mod email;
pub mod id;
pub mod identity;
pub mod order;
pub mod price;
pub mod status;

pub use cart::{LineItem, ProductRef};
pub use email::{Email, EmailError};
pub use id::*;
pub use identity::Identity;
pub use order::{Order, ShippingAddress};
pub use price::{Price, PriceError};
pub use status::*;
