//! Configuration (`trace.toml`)
//!
//! Looked up in the platform config directory unless a path is given on the
//! command line. Every field has a default, so an empty or partial file is
//! valid.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nether_trace::ReadOptions;
use serde::{Deserialize, Serialize};

/// File name inside the config directory
pub const CONFIG_FILE: &str = "trace.toml";

/// Tool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Module reader settings
    #[serde(default)]
    pub reader: ReaderConfig,
    /// Diagnostic logging settings
    #[serde(default)]
    pub log: LogConfig,
}

/// Module reader settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Expand the `name` custom section (default: true)
    #[serde(default = "default_true")]
    pub debug_names: bool,
    /// Treat a malformed custom section as fatal (default: false)
    #[serde(default)]
    pub fail_on_custom_section_error: bool,
}

/// Diagnostic logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter used when `RUST_LOG` is unset (default: "warn")
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_true() -> bool {
    true
}
fn default_filter() -> String {
    "warn".to_string()
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            debug_names: default_true(),
            fail_on_custom_section_error: false,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl ReaderConfig {
    pub fn options(&self) -> ReadOptions {
        ReadOptions {
            read_debug_names: self.debug_names,
            fail_on_custom_section_error: self.fail_on_custom_section_error,
        }
    }
}

/// Returns the platform-specific configuration directory.
///
/// On Windows: `%APPDATA%\Nethercore\config`
/// On macOS: `~/Library/Application Support/io.nethercore.Nethercore`
/// On Linux: `~/.config/Nethercore`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.nethercore", "", "Nethercore")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Loads `trace.toml` from the config directory.
///
/// Returns defaults if the file doesn't exist or cannot be parsed.
pub fn load() -> Config {
    config_dir()
        .and_then(|dir| std::fs::read_to_string(dir.join(CONFIG_FILE)).ok())
        .and_then(|content| toml::from_str(&content).ok())
        .unwrap_or_default()
}

/// Loads an explicitly requested config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// [`Config`].
pub fn load_from(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.reader.debug_names);
        assert!(!config.reader.fail_on_custom_section_error);
        assert_eq!(config.log.filter, "warn");
        assert_eq!(config.reader.options(), ReadOptions::default());
    }

    #[test]
    fn test_partial_file() {
        let config: Config = toml::from_str("[reader]\ndebug_names = false\n").unwrap();
        assert!(!config.reader.debug_names);
        assert!(!config.reader.fail_on_custom_section_error);
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            "[reader]\nfail_on_custom_section_error = true\n\n[log]\nfilter = \"debug\"\n",
        )
        .unwrap();

        let config = load_from(&path).unwrap();
        assert!(config.reader.debug_names);
        assert!(config.reader.fail_on_custom_section_error);
        assert_eq!(config.log.filter, "debug");
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[reader]\ndebug_names = \"yes\"\n").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }

    #[test]
    fn test_roundtrip_serialization() {
        let mut config = Config::default();
        config.log.filter = "nether_trace=debug".to_string();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
