mod config;
mod event_store;

pub use config::{Config, StoreConfig};
pub use event_store::EventStore;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/timevis[-dev]/` based on TIMEVIS_ENV.
///
/// Set TIMEVIS_ENV=dev to use the development directory, or TIMEVIS_HOME
/// to use an explicit directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("TIMEVIS_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("TIMEVIS_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("timevis-dev")
            } else {
                base_dir.join("timevis")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(ConfigError::DataDir)?;
    Ok(dir)
}
