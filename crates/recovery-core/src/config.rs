//! TOML-based simulator configuration.
//!
//! Stores user preferences including:
//! - Initial input values used when a caller does not supply them
//! - Input limits (the learning multiplier cap differs between variants)
//! - The unit growth ratio policy
//! - Display options
//!
//! Configuration is stored at `~/.config/recovery-sim/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::model::{
    InputLimits, ModelInputs, RecoveryModel, UnitRatioPolicy, LEARNING_MULTIPLIER_CAP,
};

/// Pick the configuration directory from its inputs.
///
/// An explicit override wins. Otherwise this is `<home>/.config/recovery-sim`,
/// or `recovery-sim-dev` when `env` is `"dev"`.
fn resolve_data_dir(
    override_dir: Option<PathBuf>,
    home: Option<PathBuf>,
    env: Option<&str>,
) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir;
    }
    let base_dir = home.unwrap_or_else(|| PathBuf::from(".")).join(".config");
    if env == Some("dev") {
        base_dir.join("recovery-sim-dev")
    } else {
        base_dir.join("recovery-sim")
    }
}

/// Returns the configuration directory.
///
/// `RECOVERY_SIM_CONFIG_DIR` wins when set. Otherwise this is
/// `~/.config/recovery-sim[-dev]/`, with the `-dev` suffix selected by
/// `RECOVERY_SIM_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let env = std::env::var("RECOVERY_SIM_ENV").ok();
    let dir = resolve_data_dir(
        std::env::var_os("RECOVERY_SIM_CONFIG_DIR").map(PathBuf::from),
        dirs::home_dir(),
        env.as_deref(),
    );

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Initial input values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_score")]
    pub struggle: u32,
    #[serde(default = "default_score")]
    pub duration: u32,
    #[serde(default = "default_score")]
    pub frequency: u32,
    #[serde(default = "default_days_applied")]
    pub days_applied: u32,
    #[serde(default = "default_learning_multiplier")]
    pub learning_multiplier: u32,
}

/// Input limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_learning_multiplier_max")]
    pub learning_multiplier_max: u32,
}

/// Model behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub unit_ratio_policy: UnitRatioPolicy,
}

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_separator")]
    pub thousands_separator: String,
    #[serde(default = "default_true")]
    pub show_breakdown: bool,
}

/// Simulator configuration.
///
/// Serialized to/from TOML at `~/.config/recovery-sim/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

// Default functions
fn default_score() -> u32 {
    5
}
fn default_days_applied() -> u32 {
    180
}
fn default_learning_multiplier() -> u32 {
    3
}
fn default_learning_multiplier_max() -> u32 {
    LEARNING_MULTIPLIER_CAP
}
fn default_separator() -> String {
    ",".into()
}
fn default_true() -> bool {
    true
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            struggle: default_score(),
            duration: default_score(),
            frequency: default_score(),
            days_applied: default_days_applied(),
            learning_multiplier: default_learning_multiplier(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            learning_multiplier_max: default_learning_multiplier_max(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            thousands_separator: default_separator(),
            show_breakdown: true,
        }
    }
}

impl Config {
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
    ) -> std::result::Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if part.is_empty() {
                break;
            }
            if parts.peek().is_some() {
                current = current
                    .get_mut(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                continue;
            }

            let obj = current
                .as_object_mut()
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
            let existing = obj
                .get(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                ),
                serde_json::Value::Number(_) => value
                    .parse::<u64>()
                    .map(|n| serde_json::Value::Number(n.into()))
                    .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?,
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(invalid("cannot replace a whole section".to_string()));
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults when no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// fails validation, or if the default config cannot be written.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(ConfigError::from)?;
                cfg.validate()?;
                debug!(path = %path.display(), "loaded configuration");
                Ok(cfg)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(err) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: err.to_string(),
            }
            .into()),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// See [`Config::save`].
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        debug!(path = %path.display(), "saved configuration");
        Ok(())
    }

    /// Check limits and defaults against each other.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a learning multiplier cap
    /// outside `1..=10` or default inputs outside the limits.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let max = self.limits.learning_multiplier_max;
        if !(1..=LEARNING_MULTIPLIER_CAP).contains(&max) {
            return Err(ConfigError::InvalidValue {
                key: "limits.learning_multiplier_max".to_string(),
                message: format!("must be between 1 and {LEARNING_MULTIPLIER_CAP}, got {max}"),
            });
        }
        if self.display.thousands_separator.chars().any(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidValue {
                key: "display.thousands_separator".to_string(),
                message: "must not contain digits".to_string(),
            });
        }
        self.default_inputs()
            .validate(&self.limits())
            .map_err(|e| ConfigError::InvalidValue {
                key: "defaults".to_string(),
                message: e.to_string(),
            })
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

    /// Set a value by dot-separated key without touching disk.
    ///
    /// The configuration is left unchanged when the result would not validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// or fails validation.
    pub fn update(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// See [`Config::update`] and [`Config::save`].
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.update(key, value)?;
        self.save()
    }

    pub fn limits(&self) -> InputLimits {
        InputLimits::with_learning_multiplier_max(self.limits.learning_multiplier_max)
    }

    pub fn default_inputs(&self) -> ModelInputs {
        let d = &self.defaults;
        ModelInputs::new(
            d.struggle,
            d.duration,
            d.frequency,
            d.days_applied,
            d.learning_multiplier,
        )
    }

    /// Model configured with the unit-ratio policy from this config.
    pub fn model(&self) -> RecoveryModel {
        RecoveryModel::with_policy(self.model.unit_ratio_policy)
    }
}
