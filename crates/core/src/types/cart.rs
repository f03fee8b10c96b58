//! Cart line items.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// The product fields copied into the cart when an item is added.
///
/// This is everything the cart needs from a catalog record; the rest
/// (category, description, rating) stays in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
}

/// One product-with-quantity entry in the live cart.
///
/// ## Invariants
///
/// - `quantity >= 1`
/// - No two line items in a cart share a `product_id`
///
/// `title`, `unit_price` and `image` are snapshots taken when the product was
/// first added; later catalog changes do not reach them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub title: String,
    #[serde(rename = "price")]
    pub unit_price: Price,
    pub image: String,
    pub quantity: u64,
}

impl LineItem {
    /// A new line item with quantity 1.
    #[must_use]
    pub fn from_product(product: &ProductRef) -> Self {
        Self {
            product_id: product.id,
            title: product.title.clone(),
            unit_price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}
