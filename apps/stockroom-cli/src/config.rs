//! CLI configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable               | Default    |
//! |------------------------|------------|
//! | `STOCKROOM_CATALOG`    | built-in   |
//! | `STOCKROOM_STORE_NAME` | `Best Buy` |
//! | `STOCKROOM_LOG_JSON`   | `false`    |

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_STORE_NAME: &str = "Best Buy";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// JSON catalog to load instead of the built-in seed
    pub catalog_path: Option<PathBuf>,

    /// Name shown in the welcome banner
    pub store_name: String,

    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            catalog_path: None,
            store_name: DEFAULT_STORE_NAME.to_string(),
            log_json: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup (the process
    /// environment in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let catalog_path = match lookup("STOCKROOM_CATALOG") {
            Some(path) if path.trim().is_empty() => {
                return Err(ConfigError::InvalidValue("STOCKROOM_CATALOG".to_string()));
            }
            Some(path) => Some(PathBuf::from(path)),
            None => None,
        };

        let store_name = lookup("STOCKROOM_STORE_NAME")
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORE_NAME.to_string());

        let log_json = lookup("STOCKROOM_LOG_JSON")
            .unwrap_or_else(|| "false".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("STOCKROOM_LOG_JSON".to_string()))?;

        Ok(CliConfig {
            catalog_path,
            store_name,
            log_json,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
