//! Cart commands.

use std::cell::Cell;
use std::rc::Rc;

use shopfront_core::{ProductId, ProductRef};
use shopfront_store::{CartStore, Catalog, Persister, StoreEvent};

use super::CommandError;

/// Add `quantity` units of a catalog product.
///
/// # Errors
///
/// Returns an error if the product is unknown or `quantity` is zero.
pub fn add<P: Persister>(
    store: &mut CartStore<P>,
    catalog: &Catalog,
    id: ProductId,
    quantity: u32,
) -> Result<String, CommandError> {
    let product = catalog
        .get(id)
        .ok_or_else(|| format!("no product with id {id}"))?;
    if quantity == 0 {
        return Err("quantity must be at least 1".into());
    }

    // Badge count as the header would see it.
    let badge = Rc::new(Cell::new(store.total_items()));
    let sink = Rc::clone(&badge);
    let subscription = store.subscribe(move |event| {
        if let StoreEvent::CartUpdated { total_items } = event {
            sink.set(*total_items);
        }
    });

    let product_ref = ProductRef::from(product);
    for _ in 0..quantity {
        store.add_to_cart(&product_ref);
    }
    store.unsubscribe(subscription);

    Ok(format!(
        "Added {quantity} × {} to your cart ({} items in cart).",
        product.title,
        badge.get()
    ))
}

/// Remove a product's line item.
pub fn remove<P: Persister>(store: &mut CartStore<P>, id: ProductId) -> String {
    let Some(title) = store.line_item(id).map(|item| item.title.clone()) else {
        return format!("Product {id} is not in your cart.");
    };
    store.remove_from_cart(id);
    format!("Removed {title} from your cart.")
}

/// Set a line item's quantity; zero or less removes it.
///
/// # Errors
///
/// Returns an error if the product is not in the cart.
pub fn set_quantity<P: Persister>(
    store: &mut CartStore<P>,
    id: ProductId,
    quantity: i64,
) -> Result<String, CommandError> {
    let title = store
        .line_item(id)
        .map(|item| item.title.clone())
        .ok_or_else(|| format!("product {id} is not in your cart"))?;

    store.update_quantity(id, quantity);
    if quantity <= 0 {
        Ok(format!("Removed {title} from your cart."))
    } else {
        Ok(format!("{title} quantity set to {quantity}."))
    }
}

/// Empty the cart.
pub fn clear<P: Persister>(store: &mut CartStore<P>) -> String {
    if store.cart().is_empty() {
        return "Your cart is already empty.".to_string();
    }
    store.clear_cart();
    "Cart cleared.".to_string()
}

/// Render the cart with line totals and the grand total.
#[must_use]
pub fn show<P: Persister>(store: &CartStore<P>) -> String {
    if store.cart().is_empty() {
        return "Your cart is empty.".to_string();
    }

    let mut lines = vec![format!("Shopping Cart ({} items)", store.distinct_items())];
    lines.extend(store.cart().iter().map(|item| {
        format!(
            "{:>3}  {:<22} Qty: {} × {} = {}",
            item.product_id,
            item.title,
            item.quantity,
            item.unit_price.display(),
            item.line_total().display(),
        )
    }));
    lines.push(format!("Total: {}", store.total_price().display()));
    lines.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shopfront_store::MemoryPersister;

    fn store() -> CartStore<MemoryPersister> {
        CartStore::load(MemoryPersister::new())
    }

    #[test]
    fn test_add_with_quantity() {
        let mut store = store();
        let catalog = Catalog::builtin();

        let output = add(&mut store, &catalog, ProductId::new(1), 3).unwrap();
        assert_eq!(
            output,
            "Added 3 × Running Shoes to your cart (3 items in cart)."
        );
        assert_eq!(store.line_item(ProductId::new(1)).unwrap().quantity, 3);

        add(&mut store, &catalog, ProductId::new(7), 1).unwrap();
        assert_eq!(store.total_items(), 4);
    }

    #[test]
    fn test_add_rejects_unknown_product_and_zero_quantity() {
        let mut store = store();
        let catalog = Catalog::builtin();
        assert!(add(&mut store, &catalog, ProductId::new(99), 1).is_err());
        assert!(add(&mut store, &catalog, ProductId::new(1), 0).is_err());
        assert!(store.cart().is_empty());
        assert_eq!(store.persister().writes(), 0);
    }

    #[test]
    fn test_remove() {
        let mut store = store();
        let catalog = Catalog::builtin();
        add(&mut store, &catalog, ProductId::new(3), 2).unwrap();

        assert_eq!(
            remove(&mut store, ProductId::new(3)),
            "Removed Backpack from your cart."
        );
        assert_eq!(
            remove(&mut store, ProductId::new(3)),
            "Product 3 is not in your cart."
        );
    }

    #[test]
    fn test_set_quantity() {
        let mut store = store();
        let catalog = Catalog::builtin();
        add(&mut store, &catalog, ProductId::new(7), 1).unwrap();

        set_quantity(&mut store, ProductId::new(7), 4).unwrap();
        assert_eq!(store.total_items(), 4);

        let output = set_quantity(&mut store, ProductId::new(7), -1).unwrap();
        assert_eq!(output, "Removed T-shirt from your cart.");
        assert!(store.cart().is_empty());

        assert!(set_quantity(&mut store, ProductId::new(7), 2).is_err());
    }

    #[test]
    fn test_show_and_clear() {
        let mut store = store();
        let catalog = Catalog::builtin();
        assert_eq!(show(&store), "Your cart is empty.");

        add(&mut store, &catalog, ProductId::new(1), 2).unwrap();
        add(&mut store, &catalog, ProductId::new(7), 1).unwrap();

        let output = show(&store);
        assert!(output.starts_with("Shopping Cart (2 items)"));
        assert!(output.contains("Qty: 2 × $99.00 = $198.00"));
        assert!(output.ends_with("Total: $227.00"));

        assert_eq!(clear(&mut store), "Cart cleared.");
        assert_eq!(clear(&mut store), "Your cart is already empty.");
    }
}
