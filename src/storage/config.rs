//! Configuration handling for pricetag
//!
//! User configuration is stored in `~/.config/pricetag/config.toml` (or the
//! platform equivalent). It decides which database file is used and which
//! fallback glyphs the listing shows.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::store::DB_FILENAME;
use crate::domain::{canonicalize, IconSet};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Could not determine home directory")]
    NoHome,
}

/// Contents of the user config file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Database file to use instead of `~/.pricetagdb.json`
    pub database: Option<PathBuf>,

    /// Use `./.pricetagdb.json` when the current directory has one
    pub prefer_local: bool,

    /// Fallback glyphs for `ls`
    pub icons: IconSet,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            database: None,
            prefer_local: true,
            icons: IconSet::default(),
        }
    }
}

/// Resolved configuration for one invocation
#[derive(Debug, Clone)]
pub struct Config {
    pub user: UserConfig,
    pub home: PathBuf,
    pub cwd: PathBuf,
}

impl Config {
    /// Loads configuration from the default locations
    pub fn load() -> Result<Self> {
        let home = Self::home_dir()?;
        let cwd = std::env::current_dir().context("Failed to read current directory")?;

        let user = match Self::global_config_dir() {
            Some(dir) => Self::load_user(&dir.join("config.toml"))?,
            None => UserConfig::default(),
        };

        Ok(Self { user, home, cwd })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "pricetag", "pricetag").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the invoking user's home directory
    pub fn home_dir() -> Result<PathBuf, ConfigError> {
        BaseDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .ok_or(ConfigError::NoHome)
    }

    /// Loads a user config file, or defaults if it does not exist
    pub fn load_user(config_path: &Path) -> Result<UserConfig> {
        if !config_path.exists() {
            return Ok(UserConfig::default());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", config_path.display()))
    }

    /// Picks the database file.
    ///
    /// Order: explicit path, `./.pricetagdb.json` if present and
    /// `prefer_local` is on, the configured `database`, `~/.pricetagdb.json`.
    pub fn database_path(&self, explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return self.expand(path);
        }

        let local = self.cwd.join(DB_FILENAME);
        if self.user.prefer_local && local.is_file() {
            return local;
        }

        match &self.user.database {
            Some(path) => self.expand(path),
            None => self.home.join(DB_FILENAME),
        }
    }

    /// Canonicalizes a path against this invocation's cwd and home
    pub fn expand(&self, path: &Path) -> PathBuf {
        canonicalize(&path.to_string_lossy(), &self.cwd, &self.home)
    }

    /// Canonical database key for a user-supplied path
    pub fn key_for(&self, input: &str) -> String {
        crate::domain::canonical_key(input, &self.cwd, &self.home)
    }
}
