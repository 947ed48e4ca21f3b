//! Print the product catalog.
//!
//! Handy for checking prices and IDs without starting the server.

use maas_pickles_core::{CategoryFilter, Product, catalog};

/// One catalog row: id, name, weight, price, and tags.
fn format_row(product: &Product) -> String {
    let tags: Vec<&str> = product.categories.iter().map(|c| c.name()).collect();
    let price = product.price.to_string();
    format!(
        "{:<16} {:<28} {:>6} {:>7}  {}{}",
        product.id.as_str(),
        product.name,
        product.weight,
        price,
        tags.join(", "),
        if product.is_special { "  (special)" } else { "" },
    )
}

/// Format the catalog, optionally narrowed to one category slug.
#[must_use]
pub fn render(category: Option<&str>) -> Vec<String> {
    let filter = CategoryFilter::from_slug(category);
    catalog::filter(filter).into_iter().map(format_row).collect()
}

/// Print the catalog to stdout.
pub fn list(category: Option<&str>) {
    let rows = render(category);
    if rows.is_empty() {
        tracing::warn!(category, "No products match");
        return;
    }

    #[allow(clippy::print_stdout)]
    for row in rows {
        println!("{row}");
    }
}
