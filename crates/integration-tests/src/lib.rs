//! Integration tests for Marketplace.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p marketplace-integration-tests
//! ```
//!
//! The library part holds [`TestContext`], a scratch data directory with
//! a cart store on top. Tests live in `tests/`.

// Test harness: panicking on setup failure is the desired behavior.
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use marketplace_cart::{CartStore, LocalStore};
use tempfile::TempDir;

/// Storage key used by every test cart.
pub const TEST_CART_KEY: &str = "@GoMarketplace:products";

/// A cart store backed by a scratch directory that lives as long as the
/// context.
pub struct TestContext {
    dir: TempDir,
    pub cart: CartStore,
}

impl TestContext {
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let cart = CartStore::new(LocalStore::new(dir.path()), TEST_CART_KEY);
        Self { dir, cart }
    }

    /// A fresh store over the same backing directory, as if the process
    /// had restarted.
    #[must_use]
    pub fn reopen(&self) -> CartStore {
        CartStore::new(LocalStore::new(self.dir.path()), TEST_CART_KEY)
    }

    /// Read the raw persisted blob, if any.
    pub async fn raw_blob(&self) -> Option<String> {
        LocalStore::new(self.dir.path())
            .get_item(TEST_CART_KEY)
            .await
            .unwrap()
    }

    /// Write a raw blob directly, bypassing the store.
    pub async fn seed_blob(&self, raw: &str) {
        LocalStore::new(self.dir.path())
            .set_item(TEST_CART_KEY, raw)
            .await
            .unwrap();
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
