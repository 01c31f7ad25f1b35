use std::path::Path;

use clap::Subcommand;
use puppy_core::{ConfigError, PuppyConfig};

use super::{load_config, save_config};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "petting.cooldown_secs", "bubble.max_chars")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value ("none" clears an optional value)
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction, path: Option<&Path>) -> puppy_core::Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = load_config(path)?;
            let value = config.get(&key).ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = load_config(path)?;
            config.set(&key, &value)?;
            save_config(&config, path)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = load_config(path)?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            save_config(&PuppyConfig::default(), path)?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
