//! Configuration management for Inlay.
//!
//! Parses `inlay.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ## Environment Variable Expansion
//!
//! The `plugins.dir` value supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//! - `~` - expands to the user's home directory

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "inlay.toml";

/// Default plugins directory, relative to the config file (or cwd).
const DEFAULT_PLUGINS_DIR: &str = "plugins";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Plugin discovery configuration.
    pub plugins: PluginsConfig,

    /// Directory paths are resolved against (set after loading).
    #[serde(skip)]
    base_dir: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            plugins: PluginsConfig::default(),
            base_dir: PathBuf::from("."),
            config_path: None,
        }
    }
}

/// Plugin discovery configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PluginsConfig {
    /// Plugins directory, relative to the config file unless absolute.
    pub dir: String,
    /// When set, a malformed manifest aborts discovery instead of being
    /// skipped with a warning.
    pub strict: bool,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_PLUGINS_DIR.to_owned(),
            strict: false,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`plugins.dir`").
        field: String,
        /// Error message.
        message: String,
    },
}

impl Config {
    /// Load configuration.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `inlay.toml` in the current directory and parents,
    /// falling back to defaults when none is found.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.base_dir = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        config.config_path = Some(path.to_path_buf());
        config.expand()?;
        Ok(config)
    }

    /// Build a configuration pointing at a fixed plugins directory.
    ///
    /// Used by callers that resolve the directory themselves (tests, CLI
    /// overrides).
    #[must_use]
    pub fn for_plugins_dir(dir: impl Into<PathBuf>, strict: bool) -> Self {
        let dir = dir.into();
        Self {
            plugins: PluginsConfig {
                dir: dir.to_string_lossy().into_owned(),
                strict,
            },
            base_dir: PathBuf::new(),
            config_path: None,
        }
    }

    /// Resolved plugins directory.
    ///
    /// Relative values are joined onto the config file's directory.
    #[must_use]
    pub fn plugins_dir(&self) -> PathBuf {
        let dir = Path::new(&self.plugins.dir);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.base_dir.join(dir)
        }
    }

    /// Expand environment variables in string fields.
    fn expand(&mut self) -> Result<(), ConfigError> {
        self.plugins.dir = shellexpand::full(&self.plugins.dir)
            .map_err(|e| ConfigError::EnvVar {
                field: "plugins.dir".to_owned(),
                message: e.to_string(),
            })?
            .into_owned();
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }
}
