//! Product listing and detail views.

use std::collections::BTreeSet;

use shopfront_core::{Category, Price, ProductId};
use shopfront_store::{Catalog, Product, ProductFilter};

use super::CommandError;

/// Build a listing filter from command-line options.
///
/// `default_max` applies when no upper bound is given.
#[must_use]
pub fn filter_from_args(
    search: Option<String>,
    categories: Vec<Category>,
    min_price: Option<Price>,
    max_price: Option<Price>,
    default_max: Price,
) -> ProductFilter {
    ProductFilter {
        query: search.unwrap_or_default(),
        categories: categories.into_iter().collect::<BTreeSet<_>>(),
        min_price: min_price.unwrap_or(Price::ZERO),
        max_price: max_price.unwrap_or(default_max),
    }
}

/// Render the products matching `filter`.
#[must_use]
pub fn list(catalog: &Catalog, filter: &ProductFilter) -> String {
    let products: Vec<&Product> = catalog.filter(filter).collect();
    if products.is_empty() {
        return "No products found. Try adjusting your filters or search query.".to_string();
    }

    let mut lines = vec![format!("Found {} products", products.len())];
    lines.extend(products.into_iter().map(|product| {
        format!(
            "{:>3}  {:<22} {:>9}  {:<12} {}",
            product.id,
            product.title,
            product.price.display(),
            product.category.label(),
            stars(product.rating),
        )
    }));
    lines.join("\n")
}

/// Render one product in full.
///
/// # Errors
///
/// Returns an error if the catalog has no such product.
pub fn show(catalog: &Catalog, id: ProductId) -> Result<String, CommandError> {
    let product = catalog
        .get(id)
        .ok_or_else(|| format!("no product with id {id}"))?;

    Ok([
        format!("{} (#{})", product.title, product.id),
        format!("{}  {} ({:.1})", product.category.label(), stars(product.rating), product.rating),
        product.price.display(),
        String::new(),
        product.description.clone(),
        product.image.clone(),
    ]
    .join("\n"))
}

/// Five-star rating: full stars up to the whole part, a half star for any
/// remainder.
fn stars(rating: f32) -> String {
    (0..5u8)
        .map(|i| {
            let i = f32::from(i);
            if i < rating.floor() {
                '★'
            } else if i < rating {
                '½'
            } else {
                '☆'
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_stars() {
        assert_eq!(stars(4.5), "★★★★½");
        assert_eq!(stars(4.0), "★★★★☆");
        assert_eq!(stars(0.0), "☆☆☆☆☆");
        assert_eq!(stars(5.0), "★★★★★");
    }

    #[test]
    fn test_list_all() {
        let catalog = Catalog::builtin();
        let output = list(&catalog, &ProductFilter::default());
        assert!(output.starts_with("Found 8 products"));
        assert!(output.contains("Running Shoes"));
        assert!(output.contains("$699.00"));
    }

    #[test]
    fn test_list_filtered() {
        let catalog = Catalog::builtin();
        let filter = filter_from_args(
            None,
            vec![Category::Clothing],
            None,
            Some(Price::from_whole(50)),
            Price::from_whole(1000),
        );
        let output = list(&catalog, &filter);
        assert!(output.starts_with("Found 1 products"));
        assert!(output.contains("T-shirt"));
    }

    #[test]
    fn test_list_nothing_found() {
        let catalog = Catalog::builtin();
        let filter = filter_from_args(
            Some("spaceship".to_string()),
            Vec::new(),
            None,
            None,
            Price::from_whole(1000),
        );
        assert!(list(&catalog, &filter).starts_with("No products found"));
    }

    #[test]
    fn test_filter_defaults() {
        let filter = filter_from_args(None, Vec::new(), None, None, Price::from_whole(300));
        assert_eq!(filter.min_price, Price::ZERO);
        assert_eq!(filter.max_price, Price::from_whole(300));
        assert!(filter.query.is_empty());
    }

    #[test]
    fn test_show() {
        let catalog = Catalog::builtin();
        let output = show(&catalog, ProductId::new(2)).unwrap();
        assert!(output.starts_with("Wireless Headphones (#2)"));
        assert!(output.contains("$149.00"));
        assert!(output.contains("noise cancellation"));

        assert!(show(&catalog, ProductId::new(42)).is_err());
    }
}
