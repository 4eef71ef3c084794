//! Configuration management
//!
//! This module handles loading, saving, and migrating the gxwf configuration file.
//! The configuration file is stored in YAML format at ~/.gxwf and holds the
//! configured logins, which login is active, and the alias map.
//!
//! PROTECTED FILE: Changes to schema_version require migration support.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current configuration schema version
///
/// Files written before the version field existed carry no
/// `schema_version` and are read as version 1.
pub const SCHEMA_VERSION: u32 = 1;

/// File name of the configuration file inside the home directory
const CONFIG_FILE_NAME: &str = ".gxwf";

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// One Galaxy account binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Login {
    /// Galaxy server URL
    pub url: String,

    /// API key for the account
    pub api_key: String,

    /// ID of the history created at login time to hold gxwf datasets
    #[serde(rename = "hid")]
    pub history_id: String,
}

impl Login {
    /// Create a new login binding
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        history_id: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            history_id: history_id.into(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Name of the login used by remote commands
    #[serde(default)]
    pub active_login: Option<String>,

    /// Configured logins, keyed by name
    #[serde(default)]
    pub logins: BTreeMap<String, Login>,

    /// Alias name to remote workflow or dataset ID
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            active_login: None,
            logins: BTreeMap::new(),
            aliases: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Check that the active login, if any, names a configured login
    fn validate(&self) -> Result<()> {
        match &self.active_login {
            Some(name) if !self.logins.contains_key(name) => Err(Error::ConfigCorrupt(format!(
                "active login '{name}' is not among the configured logins"
            ))),
            _ => Ok(()),
        }
    }
}

/// Configuration manager handles loading and saving config
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path (~/.gxwf)
    pub fn new() -> Result<Self> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".into()))?;
        Ok(Self {
            config_path: home_dir.join(CONFIG_FILE_NAME),
        })
    }

    /// Create a ConfigManager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Whether a configuration file is present on disk
    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns an empty configuration.
    /// A file that is present but not well-formed is reported as
    /// [`Error::ConfigCorrupt`] and left untouched.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        let mut config: Config = serde_yaml::from_str(&content)
            .map_err(|e| Error::ConfigCorrupt(format!("{}: {e}", self.config_path.display())))?;

        // Check schema version and migrate if necessary
        if config.schema_version < SCHEMA_VERSION {
            config = self.migrate(config)?;
        } else if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade gxwf.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to disk
    ///
    /// The whole file is rewritten: content goes to a temporary file in the
    /// same directory which is then renamed over the target, so a crash never
    /// leaves a truncated config behind. Permissions are 600 on Unix.
    pub fn save(&self, config: &Config) -> Result<()> {
        let parent = self
            .config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        let content = serde_yaml::to_string(config)?;

        let mut file = tempfile::NamedTempFile::new_in(parent)?;
        file.write_all(content.as_bytes())?;
        file.as_file().sync_all()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(file.path(), permissions)?;
        }

        file.persist(&self.config_path).map_err(|e| Error::Io(e.error))?;
        tracing::debug!(path = %self.config_path.display(), "config saved");

        Ok(())
    }

    /// Migrate configuration from older schema version
    fn migrate(&self, config: Config) -> Result<Config> {
        let mut config = config;
        config.schema_version = SCHEMA_VERSION;
        Ok(config)
    }
}
