//! The product catalog.
//!
//! The shop sells a handful of jars, so the catalog is compiled in rather than
//! loaded from the database. Products are built once on first access.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::types::{Category, CategoryFilter, Price, ProductId, SpiceLevel};

/// A jar of pickle on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price in whole rupees.
    pub price: Price,
    /// Display weight label ("250g").
    pub weight: String,
    /// Image path under `/static`.
    pub image: String,
    /// Never empty.
    pub categories: Vec<Category>,
    pub spice_level: SpiceLevel,
    #[serde(default)]
    pub is_special: bool,
    #[serde(default)]
    pub is_featured: bool,
}

impl Product {
    #[must_use]
    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }
}

struct Entry {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price: u64,
    weight: &'static str,
    image: &'static str,
    categories: &'static [Category],
    spice_level: SpiceLevel,
    is_special: bool,
    is_featured: bool,
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: "mango-pickle",
        name: "Aam Ka Achar",
        description: "Traditional raw mango pickle with aromatic spices, sun-ripened and preserved in pure mustard oil.",
        price: 249,
        weight: "250g",
        image: "/static/images/pickle-mango.svg",
        categories: &[Category::Veg, Category::Special],
        spice_level: SpiceLevel::Medium,
        is_special: true,
        is_featured: true,
    },
    Entry {
        id: "lime-pickle",
        name: "Nimbu Ka Achar",
        description: "Tangy lime pickle with green chili, hand-cut and slow cured for authentic taste.",
        price: 199,
        weight: "250g",
        image: "/static/images/pickle-lime.svg",
        categories: &[Category::Veg],
        spice_level: SpiceLevel::Medium,
        is_special: false,
        is_featured: true,
    },
    Entry {
        id: "chili-pickle",
        name: "Mirchi Ka Achar",
        description: "Fiery whole red chili pickle, stuffed with spices and preserved in aromatic oil.",
        price: 179,
        weight: "200g",
        image: "/static/images/pickle-chili.svg",
        categories: &[Category::Veg, Category::Spicy],
        spice_level: SpiceLevel::Hot,
        is_special: false,
        is_featured: true,
    },
    Entry {
        id: "mixed-pickle",
        name: "Mixed Vegetable Achar",
        description: "A colorful medley of carrots, cauliflower, and turnip in traditional spice blend.",
        price: 229,
        weight: "300g",
        image: "/static/images/pickle-mixed.svg",
        categories: &[Category::Veg],
        spice_level: SpiceLevel::Medium,
        is_special: false,
        is_featured: false,
    },
    Entry {
        id: "garlic-pickle",
        name: "Lehsun Ka Achar",
        description: "Whole garlic cloves marinated in aromatic spices and pure mustard oil.",
        price: 219,
        weight: "200g",
        image: "/static/images/pickle-garlic.svg",
        categories: &[Category::Veg, Category::Spicy],
        spice_level: SpiceLevel::Medium,
        is_special: false,
        is_featured: false,
    },
    Entry {
        id: "chicken-pickle",
        name: "Murgh Ka Achar",
        description: "Tender chicken pieces slow-cooked in authentic pickle spices and preserved in oil.",
        price: 349,
        weight: "250g",
        image: "/static/images/pickle-chicken.svg",
        categories: &[Category::NonVeg, Category::Special],
        spice_level: SpiceLevel::Medium,
        is_special: true,
        is_featured: false,
    },
];

static PRODUCTS: LazyLock<Vec<Product>> = LazyLock::new(|| {
    ENTRIES
        .iter()
        .map(|e| Product {
            id: ProductId::from(e.id),
            name: e.name.to_owned(),
            description: e.description.to_owned(),
            price: Price::new(e.price),
            weight: e.weight.to_owned(),
            image: e.image.to_owned(),
            categories: e.categories.to_vec(),
            spice_level: e.spice_level,
            is_special: e.is_special,
            is_featured: e.is_featured,
        })
        .collect()
});

/// Every product, in menu order.
#[must_use]
pub fn all() -> &'static [Product] {
    &PRODUCTS
}

/// Look up a product by its slug.
#[must_use]
pub fn find(id: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.id == *id)
}

/// Products passing a menu filter, in menu order.
#[must_use]
pub fn filter(by: CategoryFilter) -> Vec<&'static Product> {
    PRODUCTS.iter().filter(|p| by.matches(&p.categories)).collect()
}

/// Products flagged for the home page.
#[must_use]
pub fn featured() -> Vec<&'static Product> {
    PRODUCTS.iter().filter(|p| p.is_featured).collect()
}
