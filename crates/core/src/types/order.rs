//! Placed orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{LineItem, OrderId, OrderStatus, Price};

/// Where an order ships to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub name: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
}

/// An immutable snapshot of a past checkout.
///
/// `line_items` is an owned copy of the cart at placement time and `total`
/// was computed from it once; neither changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(with = "order_id_text")]
    pub id: OrderId,
    #[serde(rename = "items")]
    pub line_items: Vec<LineItem>,
    pub total: Price,
    #[serde(rename = "date")]
    pub placed_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
}

impl Order {
    /// Sum of quantities across the order's line items.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.line_items
            .iter()
            .fold(0, |count, item| count.saturating_add(item.quantity))
    }
}

/// Order IDs are stored as decimal strings. Bare numbers are accepted on read.
mod order_id_text {
    use serde::{Deserialize, Deserializer, Serializer, de};

    use crate::types::OrderId;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(id: &OrderId, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OrderId, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Number(id) => Ok(OrderId::new(id)),
            Raw::Text(text) => text
                .parse()
                .map_err(|_| de::Error::custom(format!("invalid order id: {text:?}"))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    fn address() -> ShippingAddress {
        ShippingAddress {
            name: "A".to_string(),
            address: "B".to_string(),
            city: "C".to_string(),
            zip_code: "D".to_string(),
        }
    }

    #[test]
    fn test_order_json_layout() {
        let order = Order {
            id: OrderId::new(1_700_000_000_000),
            line_items: vec![LineItem {
                product_id: ProductId::new(1),
                title: "Shoes".to_string(),
                unit_price: Price::from_whole(99),
                image: "x".to_string(),
                quantity: 2,
            }],
            total: Price::from_whole(198),
            placed_at: DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
            status: OrderStatus::Pending,
            shipping_address: address(),
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["id"], "1700000000000");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["shippingAddress"]["zipCode"], "D");
        assert_eq!(json["items"][0]["quantity"], 2);
        assert!(json["date"].as_str().unwrap().starts_with("2023-11-14T"));

        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
        assert_eq!(back.item_count(), 2);
    }

    #[test]
    fn test_reads_browser_storage_order() {
        let json = r#"{
            "id": "1700000000000",
            "items": [{"id": 1, "title": "Running Shoes", "price": 99.99, "image": "x", "quantity": 2}],
            "total": 199.98,
            "date": "2023-11-14T22:13:20.000Z",
            "status": "pending",
            "shippingAddress": {"name": "A", "address": "B", "city": "C", "zipCode": "D"}
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, OrderId::new(1_700_000_000_000));
        assert_eq!(order.total, Price::from_cents(19998));
        assert_eq!(order.line_items[0].unit_price, Price::from_cents(9999));
    }

    #[test]
    fn test_numeric_and_invalid_order_ids() {
        let order = |id: &str| {
            format!(
                r#"{{"id": {id}, "items": [], "total": "0", "date": "2023-11-14T22:13:20Z",
                    "status": "pending",
                    "shippingAddress": {{"name": "A", "address": "B", "city": "C", "zipCode": "D"}}}}"#
            )
        };
        let numeric: Order = serde_json::from_str(&order("42")).unwrap();
        assert_eq!(numeric.id, OrderId::new(42));
        assert!(serde_json::from_str::<Order>(&order(r#""abc""#)).is_err());
    }

    #[test]
    fn test_item_count_saturates() {
        let item = |id, quantity| LineItem {
            product_id: ProductId::new(id),
            title: "x".to_string(),
            unit_price: Price::from_whole(1),
            image: "x".to_string(),
            quantity,
        };
        let order = Order {
            id: OrderId::new(1),
            line_items: vec![item(1, u64::MAX), item(2, 5)],
            total: Price::MAX,
            placed_at: DateTime::from_timestamp_millis(0).unwrap(),
            status: OrderStatus::Pending,
            shipping_address: address(),
        };
        assert_eq!(order.item_count(), u64::MAX);
    }
}
