//! Bounded provider scope for the cart.
//!
//! UI code never receives the [`CartStore`] directly; it is installed at
//! the top of the UI tree with [`CartProvider::scope`] and reached from
//! anywhere inside that tree with [`use_cart`]. Calling [`use_cart`]
//! outside a scope is a programming error and fails loudly instead of
//! handing back a silent default.
//!
//! Scopes are task-local, so tests can run independent stores side by
//! side without sharing state.

use thiserror::Error;

use crate::store::CartStore;

/// The cart interface was used outside a [`CartProvider`] scope.
#[derive(Debug, Error)]
#[error("use_cart must be called within a CartProvider scope")]
pub struct ScopeError;

tokio::task_local! {
    static CURRENT_CART: CartStore;
}

/// Installs a [`CartStore`] for the duration of a future.
pub struct CartProvider;

impl CartProvider {
    /// Run `f` with `store` installed as the current cart.
    ///
    /// Everything awaited inside `f` can reach the store through
    /// [`use_cart`]. Scopes nest; the innermost store wins.
    pub async fn scope<F>(store: CartStore, f: F) -> F::Output
    where
        F: Future,
    {
        CURRENT_CART.scope(store, f).await
    }
}

/// Get the cart installed by the enclosing [`CartProvider`] scope.
///
/// # Errors
///
/// Returns [`ScopeError`] when called outside a provider scope.
pub fn use_cart() -> Result<CartStore, ScopeError> {
    CURRENT_CART.try_with(Clone::clone).map_err(|_| ScopeError)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use marketplace_core::{NewCartItem, ProductId};

    use super::*;
    use crate::storage::LocalStore;

    fn scratch_cart() -> (tempfile::TempDir, CartStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = CartStore::new(LocalStore::new(dir.path()), "test:cart");
        (dir, store)
    }

    #[tokio::test]
    async fn test_use_cart_inside_scope() {
        let (_dir, store) = scratch_cart();

        CartProvider::scope(store, async {
            let cart = use_cart().unwrap();
            cart.add_to_cart(NewCartItem {
                id: ProductId::new("p1"),
                title: "Shirt".to_string(),
                image_url: "u".to_string(),
                price: 10.0,
            });

            // Clones reach the same state
            assert_eq!(use_cart().unwrap().products().len(), 1);
        })
        .await;
    }

    #[tokio::test]
    async fn test_use_cart_outside_scope_fails_loudly() {
        let err = use_cart().unwrap_err();
        assert_eq!(
            err.to_string(),
            "use_cart must be called within a CartProvider scope"
        );
    }

    #[tokio::test]
    async fn test_independent_scopes_hold_independent_stores() {
        let (_dir_a, store_a) = scratch_cart();
        let (_dir_b, store_b) = scratch_cart();

        CartProvider::scope(store_a, async {
            use_cart().unwrap().add_to_cart(NewCartItem {
                id: ProductId::new("a"),
                title: "A".to_string(),
                image_url: "u".to_string(),
                price: 1.0,
            });
        })
        .await;

        CartProvider::scope(store_b, async {
            assert!(use_cart().unwrap().products().is_empty());
        })
        .await;
    }
}
