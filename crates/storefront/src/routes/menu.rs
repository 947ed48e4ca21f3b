//! Menu (catalog) route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use maas_pickles_core::{CategoryFilter, Product, catalog};

use super::layout::Layout;
use super::pages;

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub weight: String,
    pub image: String,
    /// One chili per spice level.
    pub spice: String,
    pub tags: Vec<String>,
    pub is_special: bool,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            weight: product.weight.clone(),
            image: product.image.clone(),
            spice: "🌶️".repeat(usize::from(product.spice_level.level())),
            tags: product
                .categories
                .iter()
                .map(|c| format!("{} {}", c.icon(), c.name()))
                .collect(),
            is_special: product.is_special,
        }
    }
}

/// One entry of the category filter bar.
#[derive(Debug, Clone)]
pub struct FilterView {
    pub slug: String,
    pub name: String,
    pub icon: String,
    pub active: bool,
}

impl FilterView {
    /// Every filter, marking `active`.
    fn bar(active: CategoryFilter) -> Vec<Self> {
        CategoryFilter::options()
            .into_iter()
            .map(|filter| Self {
                slug: filter.slug().to_string(),
                name: filter.name().to_string(),
                icon: filter.icon().to_string(),
                active: filter == active,
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
}

/// Menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "menu/index.html")]
pub struct MenuTemplate {
    pub layout: Layout,
    pub filters: Vec<FilterView>,
    pub heading: String,
    pub products: Vec<ProductCard>,
}

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "menu/show.html")]
pub struct ProductTemplate {
    pub layout: Layout,
    pub product: ProductCard,
}

/// Display the menu, optionally filtered by category.
///
/// Unknown category slugs show everything.
#[instrument(skip(layout))]
pub async fn index(layout: Layout, Query(query): Query<MenuQuery>) -> impl IntoResponse {
    let active = CategoryFilter::from_slug(query.category.as_deref());

    MenuTemplate {
        layout,
        filters: FilterView::bar(active),
        heading: format!("{} {}", active.icon(), active.name()),
        products: catalog::filter(active)
            .into_iter()
            .map(ProductCard::from)
            .collect(),
    }
}

/// Display a single product with a quantity picker.
#[instrument(skip(layout))]
pub async fn show(layout: Layout, Path(id): Path<String>) -> Response {
    match catalog::find(&id) {
        Some(product) => ProductTemplate {
            layout,
            product: ProductCard::from(product),
        }
        .into_response(),
        None => pages::not_found_page(layout).into_response(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use maas_pickles_core::Category;

    use super::*;

    #[test]
    fn test_card_spice_and_tags() {
        let card = ProductCard::from(catalog::find("chili-pickle").unwrap());
        assert_eq!(card.spice, "🌶️🌶️🌶️");
        assert_eq!(card.price, "₹179");
        assert_eq!(card.tags, ["🥬 Vegetarian", "🌶️ Extra Spicy"]);
    }

    #[test]
    fn test_filter_bar_marks_active() {
        let bar = FilterView::bar(CategoryFilter::Only(Category::Spicy));
        assert_eq!(bar.len(), 5);
        assert_eq!(bar[0].slug, "all");
        let active: Vec<_> = bar.iter().filter(|f| f.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].slug, "spicy");
    }
}
