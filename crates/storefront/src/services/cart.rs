//! The session's cart.
//!
//! Handlers load the cart, apply one cart operation, and save it back. The
//! session store is in memory, so carts end with the session or the process.

use tower_sessions::Session;

use maas_pickles_core::Cart;

use crate::models::session_keys;

/// A cart bound to the session it was loaded from.
pub struct SessionCart {
    session: Session,
    cart: Cart,
}

impl SessionCart {
    /// Load the session's cart, or a new empty one.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails or the stored cart can't
    /// be deserialized.
    pub async fn load(session: &Session) -> Result<Self, tower_sessions::session::Error> {
        let cart = session
            .get::<Cart>(session_keys::CART)
            .await?
            .unwrap_or_default();

        Ok(Self {
            session: session.clone(),
            cart,
        })
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Write the cart back to the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn save(&self) -> Result<(), tower_sessions::session::Error> {
        self.session.insert(session_keys::CART, &self.cart).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use maas_pickles_core::catalog;
    use tower_sessions::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_cart_survives_save_and_load() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);

        let mut cart = SessionCart::load(&session).await.unwrap();
        assert!(cart.cart().is_empty());

        let mango = catalog::find("mango-pickle").unwrap();
        cart.cart_mut().add_item(mango, 2);
        cart.cart_mut().open();
        cart.save().await.unwrap();

        let reloaded = SessionCart::load(&session).await.unwrap();
        assert_eq!(reloaded.cart().total_items(), 2);
        assert!(reloaded.cart().is_open());
    }
}
