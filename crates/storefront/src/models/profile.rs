//! Customer profile.

use serde::Deserialize;

use maas_pickles_core::UserId;

/// Contact details kept for a signed-in customer.
///
/// Every field is optional; a fresh account only has its email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user_id: UserId,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Editable profile fields, as submitted by the account form.
///
/// Email is not editable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

impl ProfileUpdate {
    /// Trimmed value, or `None` when blank.
    #[must_use]
    pub fn normalized(value: &str) -> Option<&str> {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}
