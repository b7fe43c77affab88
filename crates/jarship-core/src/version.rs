//! Snapshot/release classification of version strings.

use std::fmt;

use serde::Serialize;

/// Literal suffix marking a mutable snapshot version.
pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Which kind of repository a version belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionKind {
    /// Overwritable pre-release builds.
    Snapshot,
    /// Immutable releases, published through a staging repository.
    Release,
}

impl VersionKind {
    /// Repository id (`[repositories.<id>]`) that versions of this kind publish to.
    pub fn repository_id(self) -> &'static str {
        match self {
            VersionKind::Snapshot => "snapshot",
            VersionKind::Release => "staging",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VersionKind::Snapshot => "snapshot",
            VersionKind::Release => "release",
        }
    }
}

impl fmt::Display for VersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a version string.
///
/// Any string is accepted. Only an exact, case-sensitive `-SNAPSHOT` suffix
/// makes a snapshot; everything else (including `""`) is a release.
pub fn classify(version: &str) -> VersionKind {
    if version.ends_with(SNAPSHOT_SUFFIX) {
        VersionKind::Snapshot
    } else {
        VersionKind::Release
    }
}
