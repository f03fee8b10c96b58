//! Checkout: payment form validation and the guard in front of `place_order`.
//!
//! [`CartStore::place_order`] accepts anything, including an empty cart. The
//! UI layer is expected to refuse that, along with anonymous visitors and
//! incomplete forms; [`checkout`] does those checks in one place.
//!
//! Card details are validated for presence only and never stored.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument};

use shopfront_core::{Email, EmailError, Identity, OrderId, Price, ShippingAddress};

use crate::persist::Persister;
use crate::store::CartStore;

/// Reasons a checkout is refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Nobody is signed in.
    #[error("please sign in to place an order")]
    NotAuthenticated,

    /// There is nothing to order.
    #[error("your cart is empty")]
    EmptyCart,

    /// A required form field is blank.
    #[error("please fill in all required fields (missing {0})")]
    MissingField(&'static str),

    /// The email address is malformed.
    #[error("invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// The payment page form.
///
/// Implements `Debug` manually to redact card fields.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
}

impl std::fmt::Debug for CheckoutForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("address", &self.address)
            .field("city", &self.city)
            .field("zip_code", &self.zip_code)
            .field("card_number", &"[REDACTED]")
            .field("expiry_date", &"[REDACTED]")
            .field("cvv", &"[REDACTED]")
            .finish()
    }
}

impl CheckoutForm {
    /// Check that every field is filled in and extract the shipping address
    /// and contact email.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::MissingField` for the first blank field, or
    /// `CheckoutError::InvalidEmail` for a malformed email.
    pub fn validate(&self) -> Result<(ShippingAddress, Email), CheckoutError> {
        let fields = [
            ("name", &self.name),
            ("email", &self.email),
            ("address", &self.address),
            ("city", &self.city),
            ("zip code", &self.zip_code),
            ("card number", &self.card_number),
            ("expiry date", &self.expiry_date),
            ("CVV", &self.cvv),
        ];
        if let Some((label, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(CheckoutError::MissingField(*label));
        }

        let email = Email::parse(&self.email)?;

        let shipping_address = ShippingAddress {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            zip_code: self.zip_code.trim().to_string(),
        };
        Ok((shipping_address, email))
    }
}

/// Confirmation shown after a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub order_id: OrderId,
    pub total: Price,
    pub item_count: u64,
    pub placed_at: DateTime<Utc>,
    /// Where the confirmation goes.
    pub email: Email,
}

/// Place an order on behalf of a signed-in user.
///
/// Refuses anonymous identities, empty carts, and invalid forms before
/// touching the store, so a refused checkout leaves the cart as it was.
///
/// # Errors
///
/// Returns `CheckoutError` describing the first failed precondition.
#[instrument(skip_all, fields(user = identity.display_name()))]
pub fn checkout<P: Persister>(
    store: &mut CartStore<P>,
    identity: &Identity,
    form: &CheckoutForm,
) -> Result<Receipt, CheckoutError> {
    if !identity.is_authenticated() {
        return Err(CheckoutError::NotAuthenticated);
    }
    if store.cart().is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let (shipping_address, email) = form.validate()?;

    let order = store.place_order(shipping_address);
    info!(order_id = %order.id, total = %order.total, "Checkout complete");

    Ok(Receipt {
        order_id: order.id,
        total: order.total,
        item_count: order.item_count(),
        placed_at: order.placed_at,
        email,
    })
}
