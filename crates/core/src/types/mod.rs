//! Core types for Marketplace.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod item;

pub use id::ProductId;
pub use item::{CartItem, NewCartItem};
