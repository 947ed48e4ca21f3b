//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tracing::instrument;

use maas_pickles_core::{Category, catalog};

use super::layout::Layout;
use super::menu::ProductCard;

/// Category shortcut shown on the home page.
#[derive(Debug, Clone)]
pub struct CategoryLink {
    pub slug: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub featured: Vec<ProductCard>,
    pub categories: Vec<CategoryLink>,
}

/// Display the home page with featured products.
#[instrument(skip_all)]
pub async fn home(layout: Layout) -> impl IntoResponse {
    HomeTemplate {
        layout,
        featured: catalog::featured()
            .into_iter()
            .map(ProductCard::from)
            .collect(),
        categories: Category::ALL
            .into_iter()
            .map(|c| CategoryLink {
                slug: c.slug(),
                name: c.name(),
                icon: c.icon(),
            })
            .collect(),
    }
}
