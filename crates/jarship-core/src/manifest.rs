use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use jarship_util::errors::JarshipError;

use crate::config::GlobalConfig;

/// File name of the project configuration.
pub const MANIFEST_FILE: &str = "Jarship.toml";

/// File name of the secrets file read next to [`MANIFEST_FILE`].
pub const ENV_FILE: &str = ".jarship.env";

/// The parsed representation of a `Jarship.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub project: ProjectInfo,

    #[serde(default)]
    pub license: Option<LicenseConfig>,

    #[serde(default)]
    pub developers: Vec<DeveloperConfig>,

    #[serde(default)]
    pub repositories: BTreeMap<String, RepositoryEntry>,

    #[serde(default)]
    pub signing: Option<SigningConfig>,

    #[serde(default)]
    pub artifacts: ArtifactPaths,
}

/// Project identity and descriptive facts from the `[project]` section.
///
/// `name` and `author-url` are checked when metadata is built, not when the
/// file is parsed, so a half-filled manifest still loads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectInfo {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "artifact-id")]
    pub artifact_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, rename = "display-name")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Host and owner path, e.g. `github.com/TheNullicorn`.
    #[serde(default, rename = "author-url")]
    pub author_url: String,
}

impl ProjectInfo {
    /// Maven artifact id; defaults to the project name.
    pub fn artifact_id(&self) -> &str {
        self.artifact_id.as_deref().unwrap_or(&self.name)
    }
}

/// License declared in `[license]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseConfig {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// One `[[developers]]` entry. Order in the file is preserved in the POM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperConfig {
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// A Maven repository reference, either a URL string or a detailed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepositoryEntry {
    Url(String),
    Detailed {
        url: String,
        #[serde(default)]
        username: Option<String>,
        #[serde(default)]
        password: Option<String>,
    },
}

impl RepositoryEntry {
    pub fn url(&self) -> &str {
        match self {
            RepositoryEntry::Url(url) | RepositoryEntry::Detailed { url, .. } => url,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            RepositoryEntry::Url(_) => None,
            RepositoryEntry::Detailed { username, .. } => username.as_deref(),
        }
    }

    pub fn password(&self) -> Option<&str> {
        match self {
            RepositoryEntry::Url(_) => None,
            RepositoryEntry::Detailed { password, .. } => password.as_deref(),
        }
    }
}

/// Artifact signing configuration from `[signing]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SigningConfig {
    #[serde(default, rename = "gpg-key")]
    pub gpg_key: Option<String>,
    #[serde(default, rename = "gpg-password")]
    pub gpg_password: Option<String>,
    /// Path or name of the gpg binary (defaults to `gpg`).
    #[serde(default)]
    pub program: Option<String>,
}

/// Locations of the built artifacts from `[artifacts]`, relative to the manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactPaths {
    #[serde(default)]
    pub jar: Option<PathBuf>,
    #[serde(default)]
    pub sources: Option<PathBuf>,
    #[serde(default)]
    pub javadoc: Option<PathBuf>,
}

impl Manifest {
    /// Load and parse a `Jarship.toml` file from the given path.
    ///
    /// `${env:VAR}` references in string values are resolved using
    /// `.jarship.env` (if present alongside `Jarship.toml`) and process
    /// environment variables, after the TOML itself has been parsed.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| JarshipError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;

        let dir = path.parent().unwrap_or(Path::new("."));
        let env_vars = crate::properties::load_env_file(&dir.join(ENV_FILE))?;
        Ok(Self::parse_toml_with_env(&content, &env_vars)?)
    }

    /// Parse a `Jarship.toml` from a string, resolving `${env:VAR}`
    /// references in its string values.
    pub fn parse_toml_with_env(
        content: &str,
        env_vars: &BTreeMap<String, String>,
    ) -> Result<Self, JarshipError> {
        crate::properties::parse_interpolated(content, env_vars).map_err(|e| {
            JarshipError::Config {
                message: format!("Failed to parse {MANIFEST_FILE}: {e}"),
            }
        })
    }

    /// Parse a `Jarship.toml` from a string (no interpolation).
    pub fn parse_toml(content: &str) -> Result<Self, JarshipError> {
        toml::from_str(content).map_err(|e| JarshipError::Config {
            message: format!("Failed to parse {MANIFEST_FILE}: {e}"),
        })
    }

    /// Repository entries with credentials missing here filled from the
    /// global `[credentials.<id>]` table.
    ///
    /// Values set in `Jarship.toml` always win. Entries that end up with
    /// neither value stay credential-less; the selector rejects them.
    pub fn repositories_with(&self, global: &GlobalConfig) -> BTreeMap<String, RepositoryEntry> {
        self.repositories
            .iter()
            .map(|(id, entry)| {
                let fallback = global.credentials.get(id);
                let username = non_empty(entry.username())
                    .or_else(|| fallback.and_then(|c| non_empty(c.username.as_deref())));
                let password = non_empty(entry.password())
                    .or_else(|| fallback.and_then(|c| non_empty(c.password.as_deref())));
                let merged = RepositoryEntry::Detailed {
                    url: entry.url().to_string(),
                    username: username.map(str::to_string),
                    password: password.map(str::to_string),
                };
                (id.clone(), merged)
            })
            .collect()
    }

    /// Signing settings from the manifest, or the global defaults.
    pub fn signing_with(&self, global: &GlobalConfig) -> SigningConfig {
        self.signing
            .clone()
            .or_else(|| global.signing.clone())
            .unwrap_or_default()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
