pub mod config;
pub mod run;
pub mod schedule;

use std::path::Path;

use puppy_core::{ConfigError, PuppyConfig};

/// Settings from `--config` when given, else the user's config file.
pub fn load_config(path: Option<&Path>) -> Result<PuppyConfig, ConfigError> {
    match path {
        Some(path) => PuppyConfig::load_from(path),
        None => PuppyConfig::load(),
    }
}

pub fn save_config(config: &PuppyConfig, path: Option<&Path>) -> Result<(), ConfigError> {
    match path {
        Some(path) => config.save_to(path),
        None => config.save(),
    }
}
