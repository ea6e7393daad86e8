//! Cart line-items.
//!
//! The serialized form of [`CartItem`] is the on-device wire format: a JSON
//! object with `id`, `title`, `image_url`, `price` and `quantity` fields.
//! Field names must stay stable so previously persisted carts keep loading.

use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// One product entry in the cart with an associated quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier, unique within the cart.
    pub id: ProductId,
    /// Product display title.
    pub title: String,
    /// URL of the product image.
    pub image_url: String,
    /// Unit price in the store currency's standard unit.
    pub price: f64,
    /// Number of units, always >= 1 while the item is in the cart.
    pub quantity: u32,
}

/// A product about to enter the cart: a [`CartItem`] without a quantity.
///
/// The store decides the quantity when the item is added (1 for a new id,
/// existing quantity + 1 for a repeated id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCartItem {
    /// Product identifier.
    pub id: ProductId,
    /// Product display title.
    pub title: String,
    /// URL of the product image.
    pub image_url: String,
    /// Unit price in the store currency's standard unit.
    pub price: f64,
}

impl NewCartItem {
    /// Turn this entry into a [`CartItem`] with the given quantity.
    #[must_use]
    pub fn with_quantity(self, quantity: u32) -> CartItem {
        CartItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity,
        }
    }
}
