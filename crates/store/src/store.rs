//! The cart/order store.
//!
//! [`CartStore`] owns two collections, the live cart and the order history,
//! and keeps the persistence adapter in step with them: every command that
//! changes a collection rewrites that collection under its fixed key before
//! returning.
//!
//! Commands take `&mut self`, so a reader can never observe a half-applied
//! command (for example an order appended while its items are still in the
//! cart).

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use shopfront_core::{
    LineItem, Order, OrderId, OrderStatus, Price, ProductId, ProductRef, ShippingAddress,
};

use crate::error::{Result, StoreError};
use crate::events::{Listeners, StoreEvent, SubscriptionId};
use crate::persist::{Persister, keys};

type Clock = Box<dyn Fn() -> DateTime<Utc>>;

/// In-memory cart and order history with write-through persistence.
pub struct CartStore<P> {
    persister: P,
    cart: Vec<LineItem>,
    orders: Vec<Order>,
    listeners: Listeners,
    clock: Clock,
}

impl<P: Persister> CartStore<P> {
    /// Build a store from whatever the adapter holds.
    ///
    /// Missing keys yield empty collections. Values that cannot be read,
    /// cannot be parsed, or break the cart invariants are logged and also
    /// treated as empty; loading never fails.
    #[instrument(skip_all)]
    pub fn load(persister: P) -> Self {
        let cart = load_collection(&persister, keys::CART, check_cart);
        let orders = load_collection(&persister, keys::ORDERS, check_orders);
        debug!(
            line_items = cart.len(),
            orders = orders.len(),
            "Loaded store state"
        );

        Self {
            persister,
            cart,
            orders,
            listeners: Listeners::default(),
            clock: Box::new(Utc::now),
        }
    }

    /// Replace the wall clock used to timestamp orders.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current line items in insertion order.
    #[must_use]
    pub fn cart(&self) -> &[LineItem] {
        &self.cart
    }

    /// Placed orders, newest first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// The line item for a product, if it is in the cart.
    #[must_use]
    pub fn line_item(&self, id: ProductId) -> Option<&LineItem> {
        self.cart.iter().find(|item| item.product_id == id)
    }

    /// A placed order by ID.
    #[must_use]
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    /// Sum of `unit price × quantity` over the cart. No rounding.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.cart.iter().map(LineItem::line_total).sum()
    }

    /// Sum of quantities over the cart, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.cart
            .iter()
            .fold(0, |count, item| count.saturating_add(item.quantity))
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn distinct_items(&self) -> usize {
        self.cart.len()
    }

    /// The persistence adapter.
    #[must_use]
    pub const fn persister(&self) -> &P {
        &self.persister
    }

    /// Drop the in-memory state and hand back the adapter.
    #[must_use]
    pub fn into_persister(self) -> P {
        self.persister
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Add one unit of a product.
    ///
    /// An existing line item keeps its original title, price and image; only
    /// its quantity grows.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&mut self, product: &ProductRef) {
        if let Some(item) = self.cart.iter_mut().find(|item| item.product_id == product.id) {
            item.quantity = item.quantity.saturating_add(1);
            debug!(quantity = item.quantity, "Incremented line item");
        } else {
            self.cart.push(LineItem::from_product(product));
            debug!("Added line item");
        }
        self.cart_updated();
    }

    /// Remove a product's line item. Absent IDs are a no-op.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, id: ProductId) {
        let before = self.cart.len();
        self.cart.retain(|item| item.product_id != id);
        if self.cart.len() == before {
            return;
        }
        debug!("Removed line item");
        self.cart_updated();
    }

    /// Set a line item's quantity.
    ///
    /// Zero or negative quantities remove the item. Absent IDs are a no-op.
    /// Large quantities are stored as given.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(id);
            return;
        }

        let quantity = quantity.unsigned_abs();
        let Some(item) = self.cart.iter_mut().find(|item| item.product_id == id) else {
            return;
        };
        if item.quantity == quantity {
            return;
        }
        item.quantity = quantity;
        debug!("Updated line item quantity");
        self.cart_updated();
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        if self.cart.is_empty() {
            return;
        }
        self.cart.clear();
        debug!("Cleared cart");
        self.persist(keys::CART, &self.cart);
        self.listeners.notify(&StoreEvent::CartCleared);
    }

    /// Turn the cart into a new pending order and empty the cart.
    ///
    /// The order's total is the cart total at the moment of placement. An
    /// empty cart is not rejected here and produces a zero-total order;
    /// callers that want to refuse it should use [`crate::checkout`].
    #[instrument(skip(self, shipping_address))]
    pub fn place_order(&mut self, shipping_address: ShippingAddress) -> Order {
        let total = self.total_price();
        let placed_at = (self.clock)();
        let id = self.next_order_id(placed_at);

        let order = Order {
            id,
            line_items: std::mem::take(&mut self.cart),
            total,
            placed_at,
            status: OrderStatus::Pending,
            shipping_address,
        };
        if order.line_items.is_empty() {
            warn!(order_id = %id, "Placing an order for an empty cart");
        }
        self.orders.insert(0, order.clone());
        info!(order_id = %id, %total, items = order.item_count(), "Order placed");

        self.persist(keys::ORDERS, &self.orders);
        self.persist(keys::CART, &self.cart);
        self.listeners
            .notify(&StoreEvent::OrderPlaced { order_id: id, total });
        order
    }

    // =========================================================================
    // Listeners & persistence
    // =========================================================================

    /// Register a listener called after every state change.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        self.listeners.subscribe(Box::new(listener))
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Rewrite both collections to the adapter.
    ///
    /// Commands persist on their own and only log failures; this surfaces
    /// them.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if either collection cannot be serialized or
    /// written.
    pub fn sync(&self) -> Result<()> {
        self.write_collection(keys::ORDERS, &self.orders)?;
        self.write_collection(keys::CART, &self.cart)
    }

    fn cart_updated(&mut self) {
        self.persist(keys::CART, &self.cart);
        let total_items = self.total_items();
        self.listeners
            .notify(&StoreEvent::CartUpdated { total_items });
    }

    fn next_order_id(&self, placed_at: DateTime<Utc>) -> OrderId {
        let candidate = OrderId::new(placed_at.timestamp_millis());
        match self.orders.iter().map(|order| order.id).max() {
            Some(latest) if candidate <= latest => latest.successor(),
            _ => candidate,
        }
    }

    fn persist<T: Serialize>(&self, key: &'static str, items: &[T]) {
        if let Err(e) = self.write_collection(key, items) {
            error!(error = %e, "Failed to persist collection");
        }
    }

    fn write_collection<T: Serialize>(&self, key: &'static str, items: &[T]) -> Result<()> {
        let value = serde_json::to_string(items)
            .map_err(|source| StoreError::Serialize { key, source })?;
        self.persister
            .write(key, &value)
            .map_err(|source| StoreError::Persist {
                key,
                source: Box::new(source),
            })
    }
}

impl<P: fmt::Debug> fmt::Debug for CartStore<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("persister", &self.persister)
            .field("cart", &self.cart)
            .field("orders", &self.orders)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Loading
// =============================================================================

fn load_collection<P, T>(
    persister: &P,
    key: &'static str,
    check: fn(&[T]) -> std::result::Result<(), String>,
) -> Vec<T>
where
    P: Persister,
    T: DeserializeOwned,
{
    let raw = match persister.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "Failed to read persisted collection, starting empty");
            return Vec::new();
        }
    };

    let items: Vec<T> = match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            warn!(key, error = %e, "Discarding malformed persisted collection");
            return Vec::new();
        }
    };

    if let Err(reason) = check(&items) {
        warn!(key, %reason, "Discarding inconsistent persisted collection");
        return Vec::new();
    }
    items
}

fn check_cart(items: &[LineItem]) -> std::result::Result<(), String> {
    let mut seen = HashSet::new();
    for item in items {
        if item.quantity == 0 {
            return Err(format!("product {} has quantity 0", item.product_id));
        }
        if !seen.insert(item.product_id) {
            return Err(format!("product {} appears twice", item.product_id));
        }
    }
    Ok(())
}

fn check_orders(orders: &[Order]) -> std::result::Result<(), String> {
    let mut seen = HashSet::new();
    for order in orders {
        if !seen.insert(order.id) {
            return Err(format!("order {} appears twice", order.id));
        }
    }
    Ok(())
}
