//! Environment-backed configuration.
//!
//! Three values drive the store (the same trio the deployment keeps in
//! secrets): `MONGO_URI`, `DB_NAME`, `COLLECTION_NAME`. The catalog
//! client has sane defaults and only `POKEAPI_BASE_URL` is commonly
//! overridden (tests point it at a local listener).

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{PokedexError, Result};

/// Load environment variables from .env files in multiple locations
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set (dotenvy never overwrites)
/// 2. Current directory .env
/// 3. ~/.pokedex/.env
pub fn load_dotenv() {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(format!("current directory ({})", path.display()));
        debug!("Loaded .env from current directory: {}", path.display());
    }

    if let Some(dir) = config_dir() {
        let env_file = dir.join(".env");
        if env_file.exists() {
            // dotenvy doesn't overwrite existing vars, so this is safe
            match dotenvy::from_path(&env_file) {
                Ok(_) => {
                    loaded_from.push(format!("~/.pokedex/.env ({})", env_file.display()));
                    debug!("Loaded .env from ~/.pokedex: {}", env_file.display());
                }
                Err(e) => {
                    debug!("Failed to load ~/.pokedex/.env: {}", e);
                }
            }
        }
    }

    if loaded_from.is_empty() {
        info!("Using environment variables only (no .env file found)");
    } else {
        info!("Loaded configuration from: {}", loaded_from.join(", "));
    }
}

/// Get the pokedex config directory path (~/.pokedex)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".pokedex"))
}

/// Connection parameters for the document store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// MongoDB connection string
    pub uri: String,
    /// Database name
    pub database: String,
    /// Collection name
    pub collection: String,
}

impl StoreConfig {
    /// Read store configuration from the environment.
    ///
    /// `MONGO_URI` is required; `DB_NAME` and `COLLECTION_NAME` default
    /// to `pokedex` / `pokemon`.
    pub fn from_env() -> Result<Self> {
        let uri = std::env::var("MONGO_URI")
            .map_err(|_| PokedexError::config("MONGO_URI not set"))?;
        let database = std::env::var("DB_NAME").unwrap_or_else(|_| "pokedex".to_string());
        let collection =
            std::env::var("COLLECTION_NAME").unwrap_or_else(|_| "pokemon".to_string());
        Ok(Self {
            uri,
            database,
            collection,
        })
    }
}

/// Tuning for the upstream catalog client
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API root, no trailing slash (default: https://pokeapi.co/api/v2)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Total attempts per identifier, including the first
    pub max_attempts: u32,
    /// Backoff unit; attempt n (0-based) sleeps `backoff_step * (n + 1)`
    pub backoff_step: Duration,
    /// Pause between consecutive identifiers during a batch import
    pub request_delay: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co/api/v2".to_string(),
            timeout: Duration::from_secs(20),
            max_attempts: 5,
            backoff_step: Duration::from_millis(1500),
            request_delay: Duration::from_millis(250),
        }
    }
}

impl CatalogConfig {
    /// Defaults, with `POKEAPI_BASE_URL` honored when present
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(base) = std::env::var("POKEAPI_BASE_URL") {
            cfg.base_url = base.trim_end_matches('/').to_string();
        }
        cfg
    }
}
