//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MARKETPLACE_DATA_DIR` - Directory for the local store (default: `.marketplace`)
//! - `MARKETPLACE_CART_KEY` - Storage key for the serialized cart blob
//!   (default: `@GoMarketplace:products`, the key existing installs
//!   persisted under)

use std::path::PathBuf;

use thiserror::Error;

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = ".marketplace";

/// Default storage key for the serialized cart blob.
///
/// Kept byte-for-byte compatible with what the shipped app wrote, so
/// upgraded installs find their saved cart.
pub const DEFAULT_CART_KEY: &str = "@GoMarketplace:products";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart persistence configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Directory holding the local key-value store
    pub data_dir: PathBuf,
    /// Storage key identifying the serialized cart blob
    pub storage_key: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_key: DEFAULT_CART_KEY.to_string(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value
    /// (currently: empty).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = get_env_or_default("MARKETPLACE_DATA_DIR", DEFAULT_DATA_DIR)?;
        let storage_key = get_env_or_default("MARKETPLACE_CART_KEY", DEFAULT_CART_KEY)?;

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            storage_key,
        })
    }
}

/// Get an environment variable with a default value, rejecting empty
/// values.
fn get_env_or_default(key: &str, default: &str) -> Result<String, ConfigError> {
    match std::env::var(key) {
        Ok(value) if value.is_empty() => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be empty".to_string(),
        )),
        Ok(value) => Ok(value),
        Err(_) => Ok(default.to_string()),
    }
}
