//! Configuration system for treepath.
//!
//! Settings live in a TOML file and every field has a default, so a partial
//! (or missing) file is always usable. Command-line flags override whatever
//! the file says.
//!
//! # Example
//!
//! ```
//! use treepath::config::{Config, OutputFormat};
//!
//! let config = Config::default();
//! assert_eq!(config.output_format, OutputFormat::Yaml);
//! assert!(config.fail_on_missing);
//!
//! let custom = Config {
//!     output_format: OutputFormat::Json,
//!     ..Config::default()
//! };
//! assert_eq!(custom.log_level, "warn");
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default input size limit (100MB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 104_857_600;

/// How resolved subtrees are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Yaml,
    Json,
}

/// Configuration for the treepath command.
///
/// * `output_format` - Encoding for printed subtrees (default: yaml)
/// * `fail_on_missing` - Exit non-zero when a path is not found (default: true)
/// * `max_input_bytes` - Reject larger inputs (default: 100MB)
/// * `log_level` - Tracing filter used when `RUST_LOG` is unset (default: "warn")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Encoding for printed subtrees
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Exit non-zero when a path is not found
    #[serde(default = "default_fail_on_missing")]
    pub fail_on_missing: bool,

    /// Inputs larger than this (after decompression) are rejected
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,

    /// Tracing filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Yaml
}

fn default_fail_on_missing() -> bool {
    true
}

fn default_max_input_bytes() -> usize {
    DEFAULT_MAX_INPUT_BYTES
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: default_output_format(),
            fail_on_missing: default_fail_on_missing(),
            max_input_bytes: default_max_input_bytes(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/treepath/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("treepath");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be
    /// read or parsed.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %config_path.display(), "ignoring config file: {:#}", err);
                Self::default()
            }
        }
    }

    /// Loads configuration from an explicit file, propagating any error.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves configuration to the given file, creating parent directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(config_path)
    }

    /// Loader options derived from these settings.
    pub fn load_options(&self) -> crate::file::loader::LoadOptions {
        crate::file::loader::LoadOptions {
            format: None,
            max_input_bytes: self.max_input_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("output_format = \"json\"").unwrap();
        assert_eq!(config.output_format, OutputFormat::Json);
        assert!(config.fail_on_missing);
        assert_eq!(config.max_input_bytes, DEFAULT_MAX_INPUT_BYTES);
    }

    #[test]
    fn test_unknown_output_format_rejected() {
        let result: Result<Config, _> = toml::from_str("output_format = \"xml\"");
        assert!(result.is_err());
    }
}
