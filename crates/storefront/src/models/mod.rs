//! Domain models for the storefront.
//!
//! These are validated domain types, separate from database row types.

pub mod order;
pub mod profile;
pub mod session;
pub mod user;

pub use order::{Order, OrderItem};
pub use profile::{Profile, ProfileUpdate};
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
