//! Adapter configuration
//!
//! The host exposes a single relevant option, `OptionCleverGirlDebug`, whose
//! value is the string "Yes" or "No". It gates diagnostic logging for the
//! whole process.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{CompatError, Result};

/// Name of the host option controlling debug diagnostics
pub const DEBUG_OPTION: &str = "OptionCleverGirlDebug";

/// Environment variable overriding the debug option
pub const DEBUG_ENV_VAR: &str = "CLEVER_GIRL_DEBUG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompatConfig {
    /// Emit diagnostics through the debug sink
    ///
    /// Off by default. Type mismatches and invocation failures are still
    /// reported as warnings when this is off.
    pub debug: bool,

    /// `tracing_subscriber` filter directive used by the binary
    pub default_filter: String,
}

impl Default for CompatConfig {
    fn default() -> Self {
        Self {
            debug: false,
            default_filter: "clever_girl=info".to_string(),
        }
    }
}

impl CompatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML. Both `debug = true` and the host's option
    /// form `OptionCleverGirlDebug = "Yes"` are accepted; the latter wins.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Value = content.parse()?;
        let mut config: CompatConfig = toml::from_str(content)?;

        if let Some(option) = table.get(DEBUG_OPTION) {
            let value = option.as_str().ok_or_else(|| {
                CompatError::Config(format!("{} must be a string", DEBUG_OPTION))
            })?;
            config.debug = parse_option_flag(value);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Default config with the environment override applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    pub fn apply_env(&mut self) {
        if let Ok(value) = std::env::var(DEBUG_ENV_VAR) {
            self.apply_option(&value);
        }
    }

    /// Recompute the debug flag from the host option value.
    ///
    /// Returns true if the flag changed.
    pub fn apply_option(&mut self, value: &str) -> bool {
        let before = self.debug;
        self.debug = parse_option_flag(value);
        if self.debug != before {
            tracing::info!("Changed Clever Girl debug logging to: {}", self.debug);
        }
        self.debug != before
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_filter.trim().is_empty() {
            return Err(CompatError::Config("default_filter must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Host options are "Yes"/"No" strings compared case-insensitively
pub fn parse_option_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("yes")
}
