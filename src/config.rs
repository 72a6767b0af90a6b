//! Command-line configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use columns::DEFAULT_KEY_PREFIX;

pub const DEFAULT_STORE_PATH: &str = "gradebook.json";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is set but empty")]
    Empty { var: &'static str },
    #[error("{var} must not contain whitespace: `{value}`")]
    Whitespace { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub store_path: PathBuf,
    pub key_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { store_path: PathBuf::from(DEFAULT_STORE_PATH), key_prefix: DEFAULT_KEY_PREFIX.to_owned() }
    }
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `GRADEBOOK_STORE_PATH`: JSON store file, default `gradebook.json`
    /// - `GRADEBOOK_KEY_PREFIX`: storage key namespace, default `gradebook:`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|var| std::env::var(var).ok())
    }

    /// [`AppConfig::from_env`] over an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let store_path = nonempty(&lookup, "GRADEBOOK_STORE_PATH")?.map_or(defaults.store_path, PathBuf::from);
        let key_prefix = match nonempty(&lookup, "GRADEBOOK_KEY_PREFIX")? {
            Some(prefix) => parse_prefix("GRADEBOOK_KEY_PREFIX", prefix)?,
            None => defaults.key_prefix,
        };
        Ok(Self { store_path, key_prefix })
    }

    /// Apply command-line flags on top of the environment.
    pub fn with_overrides(mut self, store: Option<PathBuf>, key_prefix: Option<String>) -> Result<Self, ConfigError> {
        if let Some(store) = store {
            self.store_path = store;
        }
        if let Some(prefix) = key_prefix {
            self.key_prefix = parse_prefix("--key-prefix", prefix)?;
        }
        Ok(self)
    }
}

fn nonempty(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<Option<String>, ConfigError> {
    match lookup(var) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { var }),
        other => Ok(other),
    }
}

fn parse_prefix(var: &'static str, value: String) -> Result<String, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Empty { var });
    }
    if value.chars().any(char::is_whitespace) {
        return Err(ConfigError::Whitespace { var, value });
    }
    Ok(value)
}
