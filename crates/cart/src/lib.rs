//! Marketplace Cart - client-side cart state with local persistence.
//!
//! This crate holds the cart for a single user session: an in-memory list
//! of line-items mirrored to a local key-value store that survives process
//! restarts. UI code reads the list (snapshot or subscription) and issues
//! three commands: add to cart, increment, decrement.
//!
//! # Architecture
//!
//! - [`store::CartStore`] - the state container; single writer, cheap clones
//! - [`storage::LocalStore`] - file-backed key-value store (the durability
//!   mirror; read once at startup, written after every command)
//! - [`provider`] - bounded scope through which UI code reaches the store
//! - [`config::CartConfig`] - environment-driven configuration
//!
//! # Persistence model
//!
//! Commands update in-memory state synchronously, then enqueue a
//! best-effort write of the whole list. The write is fire-and-forget:
//! failures are logged, never surfaced to the command caller, and a crash
//! between the two steps leaves the mirror stale. [`store::CartStore::flush`]
//! exists for callers that need the write to have landed (CLI, tests).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod provider;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError};
pub use provider::{CartProvider, ScopeError, use_cart};
pub use storage::{LocalStore, StorageError};
pub use store::{CartStore, PersistError};
