//! Static product catalog.
//!
//! The catalog is read-only: the store copies the fields it needs into a line
//! item at add time and never looks back. Filtering is provided for the UI
//! layer's product listing.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use shopfront_core::{Category, Price, ProductId, ProductRef};

/// Errors that can occur when loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not valid JSON.
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share an ID.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),

    /// A rating outside `0..=5`.
    #[error("product {id} has rating {rating}, expected 0 to 5")]
    InvalidRating { id: ProductId, rating: f32 },
}

/// A catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    pub category: Category,
    pub description: String,
    /// Average review score out of 5.
    pub rating: f32,
}

impl From<&Product> for ProductRef {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
        }
    }
}

/// The product list the storefront browses.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// The demo catalog shipped with Shopfront.
    #[must_use]
    pub fn builtin() -> Self {
        let product = |id, title: &str, price, image: &str, category, description: &str, rating| {
            Product {
                id: ProductId::new(id),
                title: title.to_string(),
                price: Price::from_whole(price),
                image: format!("https://images.unsplash.com/{image}?w=400"),
                category,
                description: description.to_string(),
                rating,
            }
        };

        Self {
            products: vec![
                product(
                    1,
                    "Running Shoes",
                    99,
                    "photo-1542291026-7eec264c27ff",
                    Category::Clothing,
                    "Comfortable running shoes perfect for daily workouts and jogging.",
                    4.5,
                ),
                product(
                    2,
                    "Wireless Headphones",
                    149,
                    "photo-1505740420928-5e560c06d30e",
                    Category::Electronics,
                    "High-quality wireless headphones with noise cancellation.",
                    4.8,
                ),
                product(
                    3,
                    "Backpack",
                    129,
                    "photo-1553062407-98eeb64c6a62",
                    Category::Accessories,
                    "Durable backpack perfect for travel and daily use.",
                    4.3,
                ),
                product(
                    4,
                    "Smartwatch",
                    249,
                    "photo-1523275335684-37898b6baf30",
                    Category::Electronics,
                    "Advanced smartwatch with fitness tracking and notifications.",
                    4.6,
                ),
                product(
                    5,
                    "Sunglasses",
                    149,
                    "photo-1572635196237-14b3f281503f",
                    Category::Accessories,
                    "Stylish sunglasses with UV protection.",
                    4.2,
                ),
                product(
                    6,
                    "Digital Camera",
                    499,
                    "photo-1526170375885-4d8ecf77b99f",
                    Category::Electronics,
                    "Professional digital camera for photography enthusiasts.",
                    4.7,
                ),
                product(
                    7,
                    "T-shirt",
                    29,
                    "photo-1521572163474-6864f9cf17ab",
                    Category::Clothing,
                    "Comfortable cotton t-shirt available in multiple colors.",
                    4.1,
                ),
                product(
                    8,
                    "Smartphone",
                    699,
                    "photo-1511707171634-5f897ff02aa9",
                    Category::Electronics,
                    "Latest smartphone with advanced features and great camera.",
                    4.8,
                ),
            ],
        }
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the JSON is invalid, IDs repeat, or a rating
    /// is out of range.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;

        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if !(0.0..=5.0).contains(&product.rating) {
                return Err(CatalogError::InvalidRating {
                    id: product.id,
                    rating: product.rating,
                });
            }
        }

        Ok(Self { products })
    }

    /// Load a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, or any error
    /// from [`Catalog::from_json`].
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Look up a product.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// All products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Categories that have at least one product.
    #[must_use]
    pub fn categories(&self) -> BTreeSet<Category> {
        self.products.iter().map(|product| product.category).collect()
    }

    /// Products matching a filter, in catalog order.
    pub fn filter<'a>(&'a self, filter: &'a ProductFilter) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(|product| filter.matches(product))
    }
}

/// Product listing filter.
///
/// All criteria must match:
/// - `query`: case-insensitive substring of the title or description
///   (empty matches everything)
/// - `categories`: the product's category is in the set (empty set means all)
/// - `min_price..=max_price`: inclusive price range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    pub query: String,
    pub categories: BTreeSet<Category>,
    pub min_price: Price,
    pub max_price: Price,
}

impl ProductFilter {
    /// Upper bound of the default price slider.
    pub const DEFAULT_MAX_PRICE: u32 = 1000;

    /// Whether a product passes every criterion.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let query = self.query.trim().to_lowercase();
        let matches_search = query.is_empty()
            || product.title.to_lowercase().contains(&query)
            || product.description.to_lowercase().contains(&query);
        let matches_category =
            self.categories.is_empty() || self.categories.contains(&product.category);
        let matches_price = product.price >= self.min_price && product.price <= self.max_price;

        matches_search && matches_category && matches_price
    }
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            categories: BTreeSet::new(),
            min_price: Price::ZERO,
            max_price: Price::from_whole(Self::DEFAULT_MAX_PRICE),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn titles<'a>(products: impl Iterator<Item = &'a Product>) -> Vec<&'a str> {
        products.map(|product| product.title.as_str()).collect()
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 8);
        assert_eq!(
            catalog.get(ProductId::new(1)).unwrap().price,
            Price::from_whole(99)
        );
        assert!(catalog.get(ProductId::new(99)).is_none());
        assert_eq!(catalog.categories().len(), 3);
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.filter(&ProductFilter::default()).count(), 8);
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let catalog = Catalog::builtin();
        let by_title = ProductFilter {
            query: "SMART".to_string(),
            ..ProductFilter::default()
        };
        assert_eq!(
            titles(catalog.filter(&by_title)),
            vec!["Smartwatch", "Smartphone"]
        );

        let by_description = ProductFilter {
            query: "uv protection".to_string(),
            ..ProductFilter::default()
        };
        assert_eq!(titles(catalog.filter(&by_description)), vec!["Sunglasses"]);
    }

    #[test]
    fn test_category_and_price_filters_combine() {
        let catalog = Catalog::builtin();
        let filter = ProductFilter {
            categories: BTreeSet::from([Category::Electronics]),
            min_price: Price::from_whole(149),
            max_price: Price::from_whole(499),
            ..ProductFilter::default()
        };
        assert_eq!(
            titles(catalog.filter(&filter)),
            vec!["Wireless Headphones", "Smartwatch", "Digital Camera"]
        );
    }

    #[test]
    fn test_product_ref_copies_cart_fields() {
        let catalog = Catalog::builtin();
        let product = catalog.get(ProductId::new(3)).unwrap();
        let product_ref = ProductRef::from(product);
        assert_eq!(product_ref.title, "Backpack");
        assert_eq!(product_ref.price, Price::from_whole(129));
        assert_eq!(product_ref.image, product.image);
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"id": 10, "title": "Mug", "price": "12.50", "image": "mug.png",
             "category": "accessories", "description": "Holds coffee.", "rating": 4.0}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(
            catalog.get(ProductId::new(10)).unwrap().price,
            Price::from_cents(1250)
        );
    }

    #[test]
    fn test_from_json_rejects_duplicates_and_bad_ratings() {
        let duplicate = r#"[
            {"id": 1, "title": "A", "price": 1, "image": "", "category": "clothing", "description": "", "rating": 1},
            {"id": 1, "title": "B", "price": 2, "image": "", "category": "clothing", "description": "", "rating": 1}
        ]"#;
        assert!(matches!(
            Catalog::from_json(duplicate),
            Err(CatalogError::DuplicateId(_))
        ));

        let rating = r#"[
            {"id": 1, "title": "A", "price": 1, "image": "", "category": "clothing", "description": "", "rating": 9}
        ]"#;
        assert!(matches!(
            Catalog::from_json(rating),
            Err(CatalogError::InvalidRating { .. })
        ));

        assert!(matches!(
            Catalog::from_json("nope"),
            Err(CatalogError::Parse(_))
        ));
    }
}
