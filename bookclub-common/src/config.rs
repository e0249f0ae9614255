//! Configuration file loading
//!
//! Connection parameters for the record store come from the command line or
//! environment. Everything else lives in an optional TOML file, resolved in
//! priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. Platform config directory (`~/.config/bookclub/config.toml` on Linux)
//!
//! A missing file is not an error; the caller gets defaults and decides how
//! loudly to report it. A file that exists but does not parse is fatal.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::rotation::Rotation;
use crate::{Error, Result};

/// Environment variable naming the TOML config file
pub const CONFIG_ENV_VAR: &str = "BOOKCLUB_CONFIG";

/// Contents of the TOML config file
///
/// ```toml
/// members = ["Tommy", "Brett", "Sampson"]
/// log_level = "debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TomlConfig {
    /// Ordered member rotation; defaults to the club's original list
    pub members: Option<Vec<String>>,
    /// Log level for the dashboard crates (trace, debug, info, warn, error)
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Rotation from `members`, or the default rotation when unset
    pub fn rotation(&self) -> Result<Rotation> {
        match &self.members {
            Some(members) => Rotation::new(members.iter().cloned()),
            None => Ok(Rotation::default()),
        }
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }
}

/// Result of configuration resolution
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: TomlConfig,
    /// Path that was consulted, if any could be determined
    pub path: Option<PathBuf>,
    /// Whether the file at `path` existed and was read
    pub found: bool,
}

/// Pick the config file path by priority (CLI, env var, platform default)
pub fn resolve_config_path(cli_arg: Option<&Path>, env_var_name: &str) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    default_config_path()
}

/// Platform default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("bookclub").join("config.toml"))
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_toml_config(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

/// Parse TOML config text and validate the rotation it describes
pub fn parse_toml_config(content: &str) -> Result<TomlConfig> {
    let config: TomlConfig =
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
    config.rotation()?;
    Ok(config)
}

/// Resolve and load the config file, falling back to defaults when it is missing
pub fn load_config(cli_arg: Option<&Path>, env_var_name: &str) -> Result<LoadedConfig> {
    let path = resolve_config_path(cli_arg, env_var_name);

    match &path {
        Some(p) if p.exists() => Ok(LoadedConfig {
            config: load_toml_config(p)?,
            path,
            found: true,
        }),
        _ => Ok(LoadedConfig {
            config: TomlConfig::default(),
            path,
            found: false,
        }),
    }
}
