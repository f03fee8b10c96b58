//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `store_persistence` - cart and order history across restarts of a
//!   file-backed store
//! - `checkout_flow` - browsing, cart, and checkout end to end
//!
//! Each test gets its own temporary data directory from [`TestContext`].

use std::path::Path;

use shopfront_core::{ProductId, ProductRef, ShippingAddress};
use shopfront_store::{CartStore, Catalog, CheckoutForm, FileStore, FileStoreError};
use tempfile::TempDir;

/// A scratch data directory plus the built-in catalog.
pub struct TestContext {
    dir: TempDir,
    pub catalog: Catalog,
}

impl TestContext {
    /// Create a fresh, empty data directory.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the temporary directory cannot be created.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
            catalog: Catalog::builtin(),
        })
    }

    /// The data directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Open a file store over the data directory, as a new process would.
    ///
    /// # Errors
    ///
    /// Returns `FileStoreError` if the directory cannot be opened.
    pub fn open(&self) -> Result<FileStore, FileStoreError> {
        FileStore::open(self.dir.path())
    }

    /// Load a cart store from the data directory.
    ///
    /// # Errors
    ///
    /// Returns `FileStoreError` if the directory cannot be opened.
    pub fn restart(&self) -> Result<CartStore<FileStore>, FileStoreError> {
        Ok(CartStore::load(self.open()?))
    }

    /// A catalog product as the cart sees it.
    ///
    /// # Panics
    ///
    /// Panics if the built-in catalog has no such product.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn product(&self, id: u32) -> ProductRef {
        let product = self
            .catalog
            .get(ProductId::new(id))
            .expect("product exists in the built-in catalog");
        ProductRef::from(product)
    }
}

/// A complete shipping address.
#[must_use]
pub fn shipping_address() -> ShippingAddress {
    ShippingAddress {
        name: "Ada Lovelace".to_string(),
        address: "12 St James's Square".to_string(),
        city: "London".to_string(),
        zip_code: "SW1Y 4JH".to_string(),
    }
}

/// A payment form with every field filled in.
#[must_use]
pub fn filled_form() -> CheckoutForm {
    let address = shipping_address();
    CheckoutForm {
        name: address.name,
        email: "ada@example.com".to_string(),
        address: address.address,
        city: address.city,
        zip_code: address.zip_code,
        card_number: "4242 4242 4242 4242".to_string(),
        expiry_date: "12/30".to_string(),
        cvv: "123".to_string(),
    }
}
