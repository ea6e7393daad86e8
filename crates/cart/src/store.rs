//! The cart state container.
//!
//! [`CartStore`] owns the in-memory list of line-items for the session.
//! The persistent store is a passive mirror: read once by [`CartStore::load`]
//! at startup, written after every command. During a live session the
//! in-memory list is the source of truth.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

use marketplace_core::{CartItem, NewCartItem, ProductId};

use crate::config::CartConfig;
use crate::storage::{LocalStore, StorageError};

/// Failure while persisting or loading the cart.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Local store read/write failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The item list could not be encoded as JSON.
    #[error("failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Client-side cart state, mirrored to local storage.
///
/// Cheaply cloneable; clones share the same state. All mutation goes
/// through the watch sender, which serializes updates, so there is a
/// single logical writer and no locking.
///
/// # Persistence
///
/// Commands update in-memory state synchronously and return. A background
/// mirror task picks up each change and writes the latest snapshot to
/// local storage; intermediate states under rapid commands are coalesced.
/// Write failures are logged and dropped, never surfaced to the command
/// caller, and the in-memory update and the mirror write are not atomic:
/// a crash between the two leaves the mirror stale.
///
/// The store must be created inside a Tokio runtime (the mirror task is
/// spawned by [`CartStore::new`]). The task exits when the last clone of
/// the store is dropped.
#[derive(Debug, Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

#[derive(Debug)]
struct CartStoreInner {
    products: watch::Sender<Vec<CartItem>>,
    storage: LocalStore,
    key: String,
}

impl CartStore {
    /// Create an empty cart backed by `storage` under `key`.
    #[must_use]
    pub fn new(storage: LocalStore, key: impl Into<String>) -> Self {
        let (products, rx) = watch::channel(Vec::new());
        let key = key.into();

        tokio::spawn(mirror(rx, storage.clone(), key.clone()));

        Self {
            inner: Arc::new(CartStoreInner {
                products,
                storage,
                key,
            }),
        }
    }

    /// Create an empty cart from configuration.
    #[must_use]
    pub fn from_config(config: &CartConfig) -> Self {
        Self::new(
            LocalStore::new(&config.data_dir),
            config.storage_key.clone(),
        )
    }

    /// Load the saved cart from local storage, replacing in-memory state.
    ///
    /// Call once at startup. An absent key leaves the cart empty; a
    /// malformed blob is treated as "no saved cart" and logged, not
    /// surfaced. No retry on failure.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Storage`] if the read itself fails.
    pub async fn load(&self) -> Result<(), PersistError> {
        let Some(raw) = self.inner.storage.get_item(&self.inner.key).await? else {
            return Ok(());
        };

        match serde_json::from_str::<Vec<CartItem>>(&raw) {
            Ok(items) => {
                tracing::debug!(items = items.len(), "loaded saved cart");
                self.inner.products.send_replace(items);
            }
            Err(e) => {
                tracing::warn!("discarding malformed saved cart: {e}");
            }
        }

        Ok(())
    }

    /// Snapshot of the current item list, in insertion order.
    #[must_use]
    pub fn products(&self) -> Vec<CartItem> {
        self.inner.products.borrow().clone()
    }

    /// Subscribe to item-list changes.
    ///
    /// The receiver wakes on every committed update; UI code holds one
    /// and re-renders whenever the list changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.inner.products.subscribe()
    }

    /// Add a product to the cart.
    ///
    /// A new id enters with quantity 1. A repeated id replaces the
    /// existing entry (matched by id, not identity) with quantity + 1;
    /// the cart never holds two entries for the same id.
    pub fn add_to_cart(&self, item: NewCartItem) {
        self.inner.products.send_modify(|products| {
            let quantity = products
                .iter()
                .find(|existing| existing.id == item.id)
                .map_or(1, |existing| existing.quantity + 1);

            products.retain(|existing| existing.id != item.id);
            products.push(item.with_quantity(quantity));
        });
    }

    /// Increase the quantity of the item with `id` by one.
    ///
    /// An unknown id is silently ignored.
    pub fn increment(&self, id: &ProductId) {
        self.inner.products.send_modify(|products| {
            for product in products.iter_mut() {
                if product.id == *id {
                    product.quantity += 1;
                }
            }
        });
    }

    /// Decrease the quantity of the item with `id` by one, never below 1.
    ///
    /// An unknown id is silently ignored. There is no removal operation:
    /// decrementing at quantity 1 leaves the item in the cart.
    pub fn decrement(&self, id: &ProductId) {
        self.inner.products.send_modify(|products| {
            for product in products.iter_mut() {
                if product.id == *id && product.quantity > 1 {
                    product.quantity -= 1;
                }
            }
        });
    }

    /// Write the current item list to local storage and wait for the
    /// result.
    ///
    /// Commands persist fire-and-forget through the mirror task; callers
    /// that exit right after a command (the CLI) or need the mirror up to
    /// date (tests) use this.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if encoding or the write fails.
    pub async fn flush(&self) -> Result<(), PersistError> {
        write_items(&self.inner.storage, &self.inner.key, &self.products()).await
    }
}

/// Best-effort persistence loop: on every change, write the latest
/// snapshot. Exits when the store is dropped.
async fn mirror(mut rx: watch::Receiver<Vec<CartItem>>, storage: LocalStore, key: String) {
    while rx.changed().await.is_ok() {
        let snapshot = rx.borrow_and_update().clone();
        if let Err(e) = write_items(&storage, &key, &snapshot).await {
            tracing::warn!("cart persistence failed: {e}");
        }
    }
}

async fn write_items(
    storage: &LocalStore,
    key: &str,
    items: &[CartItem],
) -> Result<(), PersistError> {
    let raw = serde_json::to_string(items)?;
    storage.set_item(key, &raw).await?;
    Ok(())
}
