//! TOML-based application configuration.
//!
//! Tunables for the petting accumulator, sleep recovery and the host's
//! speech bubble. Stored at `~/.config/desktop-puppy/config.toml`.

use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::data_dir;
use crate::error::ConfigError;

/// Petting accumulator tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PettingConfig {
    /// Seconds after a reward during which petting is ignored.
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: i64,
    /// A gap longer than this (seconds) between pets forgets the streak.
    #[serde(default = "default_streak_window_secs")]
    pub streak_window_secs: i64,
    #[serde(default = "default_threshold_min")]
    pub threshold_min: u32,
    #[serde(default = "default_threshold_max")]
    pub threshold_max: u32,
    /// Fixed RNG seed for reproducible thresholds (None = entropy).
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Sleep recovery tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepConfig {
    /// Sleeping at least this long (seconds) earns the full recovery bonus.
    #[serde(default = "default_full_recovery_secs")]
    pub full_recovery_secs: i64,
}

/// Speech bubble settings, applied by the host before text reaches the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BubbleConfig {
    #[serde(default = "default_bubble_max_chars")]
    pub max_chars: usize,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/desktop-puppy/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuppyConfig {
    #[serde(default)]
    pub petting: PettingConfig,
    #[serde(default)]
    pub sleep: SleepConfig,
    #[serde(default)]
    pub bubble: BubbleConfig,
}

fn default_cooldown_secs() -> i64 {
    60
}
fn default_streak_window_secs() -> i64 {
    600
}
fn default_threshold_min() -> u32 {
    3
}
fn default_threshold_max() -> u32 {
    8
}
fn default_full_recovery_secs() -> i64 {
    3600
}
fn default_bubble_max_chars() -> usize {
    10
}

impl Default for PettingConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: default_cooldown_secs(),
            streak_window_secs: default_streak_window_secs(),
            threshold_min: default_threshold_min(),
            threshold_max: default_threshold_max(),
            seed: None,
        }
    }
}

impl Default for SleepConfig {
    fn default() -> Self {
        Self {
            full_recovery_secs: default_full_recovery_secs(),
        }
    }
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            max_chars: default_bubble_max_chars(),
        }
    }
}

/// Longest accepted window, one week.
pub const MAX_WINDOW_SECS: i64 = 7 * 24 * 60 * 60;

/// Seconds as a duration, clamped to `0..=MAX_WINDOW_SECS`.
fn window(secs: i64) -> Duration {
    Duration::seconds(secs.clamp(0, MAX_WINDOW_SECS))
}

fn check_window(key: &str, secs: i64) -> Result<(), ConfigError> {
    if !(0..=MAX_WINDOW_SECS).contains(&secs) {
        return Err(invalid(
            key,
            format!("must be between 0 and {MAX_WINDOW_SECS} seconds"),
        ));
    }
    Ok(())
}

impl PettingConfig {
    pub fn cooldown(&self) -> Duration {
        window(self.cooldown_secs)
    }

    pub fn streak_window(&self) -> Duration {
        window(self.streak_window_secs)
    }

    /// # Errors
    ///
    /// Returns `InvalidValue` for an empty or zero-based threshold range or
    /// windows outside `0..=MAX_WINDOW_SECS`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threshold_min == 0 {
            return Err(invalid("petting.threshold_min", "must be at least 1"));
        }
        if self.threshold_min > self.threshold_max {
            return Err(invalid(
                "petting.threshold_max",
                format!(
                    "must not be below threshold_min ({})",
                    self.threshold_min
                ),
            ));
        }
        check_window("petting.cooldown_secs", self.cooldown_secs)?;
        check_window("petting.streak_window_secs", self.streak_window_secs)
    }
}

impl SleepConfig {
    pub fn full_recovery(&self) -> Duration {
        window(self.full_recovery_secs)
    }

    /// # Errors
    ///
    /// Returns `InvalidValue` for a recovery time outside
    /// `0..=MAX_WINDOW_SECS`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_window("sleep.full_recovery_secs", self.full_recovery_secs)
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.into(),
    }
}

impl PuppyConfig {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let bad_value = |message: String| invalid(key, message);

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    // Clearing a non-optional field fails when the result is
                    // deserialized.
                    _ if value.trim() == "none" => serde_json::Value::Null,
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| bad_value(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<i64>()
                            .map_err(|_| bad_value(format!("cannot parse '{value}' as integer")))?;
                        serde_json::Value::Number(n.into())
                    }
                    // Optional fields: "none" or an empty value clears them.
                    serde_json::Value::Null => match value.trim() {
                        "" | "none" => serde_json::Value::Null,
                        v => serde_json::Value::Number(
                            v.parse::<u64>()
                                .map_err(|_| bad_value(format!("cannot parse '{v}' as integer")))?
                                .into(),
                        ),
                    },
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(bad_value("cannot set a whole section".to_string()));
                    }
                    serde_json::Value::String(_) => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Where `load()` and `save()` read and write.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be created.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults there when the file
    /// does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or is
    /// invalid, or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            return Ok(cfg);
        }
        Self::load_from(&path)
    }

    /// Load from an explicit file. A missing file yields the defaults and is
    /// not created.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds
    /// invalid values.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };
        let cfg: PuppyConfig = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from disk, falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!(error = %e, "config unusable, falling back to defaults");
            Self::default()
        })
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns the first invalid section value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.petting.validate()?;
        self.sleep.validate()?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed or
    /// the resulting config is invalid. `self` is untouched on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(key, e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: PuppyConfig =
            serde_json::from_value(json).map_err(|e| invalid(key, e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}
