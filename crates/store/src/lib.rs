//! Shopfront Store - the cart/order state core.
//!
//! This crate owns the live cart and the order history, derives totals from
//! them, and writes both through to a durable key-value store on every change.
//! Everything a UI needs goes through [`CartStore`]:
//!
//! ```rust
//! use shopfront_core::{Price, ProductId, ProductRef, ShippingAddress};
//! use shopfront_store::{CartStore, MemoryPersister};
//!
//! let mut store = CartStore::load(MemoryPersister::new());
//! let shoes = ProductRef {
//!     id: ProductId::new(1),
//!     title: "Shoes".to_string(),
//!     price: Price::from_whole(99),
//!     image: "x".to_string(),
//! };
//! store.add_to_cart(&shoes);
//! store.add_to_cart(&shoes);
//! assert_eq!(store.total_price(), Price::from_whole(198));
//!
//! let order = store.place_order(ShippingAddress {
//!     name: "A".to_string(),
//!     address: "B".to_string(),
//!     city: "C".to_string(),
//!     zip_code: "D".to_string(),
//! });
//! assert_eq!(order.total, Price::from_whole(198));
//! assert!(store.cart().is_empty());
//! ```
//!
//! # Modules
//!
//! - [`store`] - The [`CartStore`] itself
//! - [`persist`] - The [`Persister`] adapter trait with memory and file backends
//! - [`events`] - Change notifications for UI listeners
//! - [`catalog`] - The static product catalog and its filters
//! - [`checkout`] - Checkout form validation and the UI-side order guard

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod error;
pub mod events;
pub mod persist;
pub mod store;

pub use catalog::{Catalog, CatalogError, Product, ProductFilter};
pub use checkout::{CheckoutError, CheckoutForm, Receipt, checkout};
pub use error::StoreError;
pub use events::{StoreEvent, SubscriptionId};
pub use persist::{FileStore, FileStoreError, MemoryPersister, Persister};
pub use store::CartStore;
