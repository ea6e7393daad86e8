//! Marketplace Core - Shared types library.
//!
//! This crate provides common types used across all Marketplace components:
//! - `cart` - Client-side cart state with local persistence
//! - `cli` - Command-line tools for inspecting on-device state
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no async
//! runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers and cart line-items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
