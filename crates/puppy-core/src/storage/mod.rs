mod config;

pub use config::{BubbleConfig, PettingConfig, PuppyConfig, SleepConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/desktop-puppy[-dev]/` based on PUPPY_ENV.
///
/// Set PUPPY_ENV=dev to use a development settings directory. Only settings
/// live here; the pet itself is never written to disk.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("PUPPY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("desktop-puppy-dev")
    } else {
        base_dir.join("desktop-puppy")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::NoDataDir(e.to_string()))?;
    Ok(dir)
}
