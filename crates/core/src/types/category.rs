//! Product categories and spice levels.

use serde::{Deserialize, Serialize};

/// A category tag carried by a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Veg,
    NonVeg,
    Spicy,
    Special,
}

impl Category {
    /// All tags, in menu order.
    pub const ALL: [Self; 4] = [Self::Veg, Self::NonVeg, Self::Spicy, Self::Special];

    /// URL slug (`non-veg`).
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Veg => "veg",
            Self::NonVeg => "non-veg",
            Self::Spicy => "spicy",
            Self::Special => "special",
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Veg => "Vegetarian",
            Self::NonVeg => "Non-Vegetarian",
            Self::Spicy => "Extra Spicy",
            Self::Special => "Special Edition",
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Veg => "🥬",
            Self::NonVeg => "🍗",
            Self::Spicy => "🌶️",
            Self::Special => "⭐",
        }
    }

    /// Parse a slug.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }
}

/// Menu filter: everything, or a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Every filter the menu offers, `All` first.
    #[must_use]
    pub fn options() -> Vec<Self> {
        std::iter::once(Self::All)
            .chain(Category::ALL.into_iter().map(Self::Only))
            .collect()
    }

    /// Parse a query-string slug; unknown or missing slugs mean `All`.
    #[must_use]
    pub fn from_slug(slug: Option<&str>) -> Self {
        slug.and_then(Category::from_slug)
            .map_or(Self::All, Self::Only)
    }

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(c) => c.slug(),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::All => "All Pickles",
            Self::Only(c) => c.name(),
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::All => "🫙",
            Self::Only(c) => c.icon(),
        }
    }

    /// Whether a product carrying `tags` passes this filter.
    #[must_use]
    pub fn matches(self, tags: &[Category]) -> bool {
        match self {
            Self::All => true,
            Self::Only(c) => tags.contains(&c),
        }
    }
}

/// How hot a pickle is, from 1 (mild) to 3 (fiery).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SpiceLevel {
    Mild = 1,
    Medium = 2,
    Hot = 3,
}

impl SpiceLevel {
    #[must_use]
    pub const fn level(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for SpiceLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Mild),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Hot),
            _ => Err(format!("spice level must be 1-3, got {value}")),
        }
    }
}

impl From<SpiceLevel> for u8 {
    fn from(level: SpiceLevel) -> Self {
        level.level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_slug() {
        assert_eq!(CategoryFilter::from_slug(None), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_slug(Some("all")), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_slug(Some("non-veg")),
            CategoryFilter::Only(Category::NonVeg)
        );
        assert_eq!(CategoryFilter::from_slug(Some("pickled")), CategoryFilter::All);
    }

    #[test]
    fn test_filter_options_start_with_all() {
        let options = CategoryFilter::options();
        assert_eq!(options.len(), 5);
        assert_eq!(options.first(), Some(&CategoryFilter::All));
    }

    #[test]
    fn test_spice_level_bounds() {
        assert_eq!(SpiceLevel::try_from(3), Ok(SpiceLevel::Hot));
        assert!(SpiceLevel::try_from(0).is_err());
        assert!(SpiceLevel::try_from(4).is_err());
    }
}
