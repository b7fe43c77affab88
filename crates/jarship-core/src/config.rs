use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use jarship_util::errors::JarshipError;

use crate::manifest::SigningConfig;

/// Global user configuration loaded from `~/.jarship/config.toml`.
///
/// Holds per-repository credentials and signing defaults that should not
/// live in a project's checked-in `Jarship.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub credentials: BTreeMap<String, CredentialEntry>,

    #[serde(default)]
    pub signing: Option<SigningConfig>,
}

/// Credential entry for a named repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialEntry {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl GlobalConfig {
    /// Load the global configuration from `~/.jarship/config.toml`, or return defaults if the file doesn't exist.
    pub fn load() -> miette::Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load a global configuration file from an explicit path.
    ///
    /// `${env:VAR}` references are resolved from the process environment.
    pub fn load_from(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            tracing::debug!("No global config at {}", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| JarshipError::Config {
            message: format!("Failed to read global config: {e}"),
        })?;
        crate::properties::parse_interpolated(&content, &BTreeMap::new()).map_err(|e| {
            JarshipError::Config {
                message: format!("Failed to parse global config: {e}"),
            }
            .into()
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the path to the jarship data directory (`~/.jarship/`).
///
/// `JARSHIP_HOME` overrides the location.
pub fn dirs_path() -> PathBuf {
    if let Ok(home) = std::env::var("JARSHIP_HOME") {
        return PathBuf::from(home);
    }
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".jarship")
}
