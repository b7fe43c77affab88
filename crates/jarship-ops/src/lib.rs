pub mod ops_plan;
pub mod ops_pom;
pub mod ops_publish;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use jarship_core::config::GlobalConfig;
use jarship_core::manifest::{ArtifactPaths, Manifest, RepositoryEntry, SigningConfig};
use jarship_util::fs::resolve_against;

/// Everything read from disk before a publish run starts.
///
/// Loaded once and then passed by reference through the pipeline; nothing
/// below the operations layer reads configuration on its own.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub manifest: Manifest,
    pub global: GlobalConfig,
}

impl PublishConfig {
    pub fn new(manifest: Manifest, global: GlobalConfig) -> Self {
        Self { manifest, global }
    }

    /// Load `Jarship.toml` at `manifest_path` plus the global config.
    pub fn load(manifest_path: &Path) -> miette::Result<Self> {
        Ok(Self {
            manifest: Manifest::from_path(manifest_path)?,
            global: GlobalConfig::load()?,
        })
    }

    /// Repository entries with global credentials filled in.
    pub fn repositories(&self) -> BTreeMap<String, RepositoryEntry> {
        self.manifest.repositories_with(&self.global)
    }

    pub fn signing(&self) -> SigningConfig {
        self.manifest.signing_with(&self.global)
    }

    /// The version to publish: an explicit override, else `[project] version`.
    ///
    /// Returns an empty string when neither is set; building coordinates
    /// then reports the version as incomplete configuration.
    pub fn version(&self, explicit: Option<&str>) -> String {
        explicit
            .or(self.manifest.project.version.as_deref())
            .unwrap_or_default()
            .to_string()
    }
}

/// Locations of the compiled jar, sources jar and javadoc jar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryInputs {
    pub jar: Option<PathBuf>,
    pub sources: Option<PathBuf>,
    pub javadoc: Option<PathBuf>,
}

impl BinaryInputs {
    /// Paths from `[artifacts]`, resolved against the manifest directory.
    pub fn from_manifest(paths: &ArtifactPaths, base: &Path) -> Self {
        let resolve = |p: &Option<PathBuf>| p.as_deref().map(|p| resolve_against(base, p));
        Self {
            jar: resolve(&paths.jar),
            sources: resolve(&paths.sources),
            javadoc: resolve(&paths.javadoc),
        }
    }

    /// Replace the paths that are given explicitly.
    pub fn with_overrides(
        self,
        jar: Option<PathBuf>,
        sources: Option<PathBuf>,
        javadoc: Option<PathBuf>,
    ) -> Self {
        Self {
            jar: jar.or(self.jar),
            sources: sources.or(self.sources),
            javadoc: javadoc.or(self.javadoc),
        }
    }
}
