use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Directory under the home directory used when nothing else is configured.
pub const DEFAULT_ROOT_DIR: &str = "ws";

/// Environment variable that overrides the configured root.
pub const ROOT_ENV_VAR: &str = "WS_ROOT";

/// Contents of `<config dir>/ws/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    /// Workspace root. Relative paths are taken relative to the home directory.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

/// Path of the user config file, if the platform has a config directory.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ws/config.toml"))
}

/// Load the user config, falling back to defaults when the file is absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(path) = user_config_path() else {
        return Ok(UserConfig::default());
    };
    load_config_file(&path)
}

/// Load a config file at an explicit path. A missing file yields defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config_file(path: &Path) -> Result<UserConfig> {
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Inputs that decide where the workspace root lives, gathered once per run.
#[derive(Debug, Clone, Default)]
pub struct RootSettings {
    pub env_root: Option<OsString>,
    pub config: UserConfig,
    pub home: Option<PathBuf>,
}

impl RootSettings {
    /// Gather settings from the process environment and the user config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the user config file is present but invalid.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            env_root: env::var_os(ROOT_ENV_VAR).filter(|value| !value.is_empty()),
            config: load_user_config()?,
            home: dirs::home_dir(),
        })
    }

    /// Resolve the root directory path.
    ///
    /// Precedence: `WS_ROOT`, then the config file `root`, then `$HOME/ws`.
    /// Relative values are joined onto the home directory. Returns `None` when
    /// the result would depend on a home directory that is not known.
    #[must_use]
    pub fn root_path(&self) -> Option<PathBuf> {
        let configured = self
            .env_root
            .as_ref()
            .map(PathBuf::from)
            .or_else(|| self.config.root.clone());

        match configured {
            Some(path) if path.is_absolute() => Some(path),
            Some(path) => self.home.as_ref().map(|home| home.join(path)),
            None => self.home.as_ref().map(|home| home.join(DEFAULT_ROOT_DIR)),
        }
    }
}
