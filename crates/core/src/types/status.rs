//! Status and classification enums.

use serde::{Deserialize, Serialize};

/// Order fulfillment status.
///
/// Every order starts as [`OrderStatus::Pending`]. Nothing in Shopfront
/// advances it; the later states exist so that persisted history written by
/// other tooling still loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// Capitalized label for display (e.g., "Pending").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Shipped => write!(f, "shipped"),
            Self::Delivered => write!(f, "delivered"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Catalog product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Clothing,
    Accessories,
}

impl Category {
    /// All categories in sidebar order.
    pub const ALL: [Self; 3] = [Self::Electronics, Self::Clothing, Self::Accessories];

    /// Capitalized label for display (e.g., "Electronics").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::Clothing => "Clothing",
            Self::Accessories => "Accessories",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Electronics => write!(f, "electronics"),
            Self::Clothing => write!(f, "clothing"),
            Self::Accessories => write!(f, "accessories"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "electronics" => Ok(Self::Electronics),
            "clothing" => Ok(Self::Clothing),
            "accessories" => Ok(Self::Accessories),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}
