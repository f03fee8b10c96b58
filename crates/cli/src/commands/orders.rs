//! Order history view.

use shopfront_core::Order;
use shopfront_store::{CartStore, Persister};

/// Render all orders, newest first.
#[must_use]
pub fn list<P: Persister>(store: &CartStore<P>) -> String {
    if store.orders().is_empty() {
        return "No orders yet.".to_string();
    }
    store
        .orders()
        .iter()
        .map(render)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render(order: &Order) -> String {
    let address = &order.shipping_address;
    let mut lines = vec![
        format!(
            "Order #{}  {}  {}  {}",
            order.id,
            order.placed_at.date_naive(),
            order.status.label(),
            order.total.display(),
        ),
        format!(
            "  Ship to: {}, {}, {} {}",
            address.name, address.address, address.city, address.zip_code
        ),
    ];
    lines.extend(order.line_items.iter().map(|item| {
        format!(
            "  - {} Qty: {} × {} = {}",
            item.title,
            item.quantity,
            item.unit_price.display(),
            item.line_total().display(),
        )
    }));
    lines.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use shopfront_core::{ProductId, ProductRef, ShippingAddress};
    use shopfront_store::{Catalog, MemoryPersister};

    fn address() -> ShippingAddress {
        ShippingAddress {
            name: "Ada".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            zip_code: "12345".to_string(),
        }
    }

    #[test]
    fn test_no_orders() {
        let store = CartStore::load(MemoryPersister::new());
        assert_eq!(list(&store), "No orders yet.");
    }

    #[test]
    fn test_orders_newest_first() {
        let catalog = Catalog::builtin();
        let placed_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut store = CartStore::load(MemoryPersister::new()).with_clock(move || placed_at);

        let shoes = ProductRef::from(catalog.get(ProductId::new(1)).unwrap());
        let phone = ProductRef::from(catalog.get(ProductId::new(8)).unwrap());
        store.add_to_cart(&shoes);
        let first = store.place_order(address());
        store.add_to_cart(&phone);
        let second = store.place_order(address());

        let output = list(&store);
        let newest = output.find(&format!("Order #{}", second.id)).unwrap();
        let oldest = output.find(&format!("Order #{}", first.id)).unwrap();
        assert!(newest < oldest);
        assert!(output.contains("2024-03-01  Pending  $699.00"));
        assert!(output.contains("Ship to: Ada, 1 Main St, Springfield 12345"));
        assert!(output.contains("- Running Shoes Qty: 1 × $99.00 = $99.00"));
    }
}
