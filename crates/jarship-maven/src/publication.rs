//! Maven coordinates and the publication they identify.

use std::fmt;

use serde::Serialize;

use jarship_util::errors::{JarshipError, JarshipResult};

use crate::artifact::{Artifact, ArtifactSet};
use crate::pom::Metadata;

/// `group:artifactId:version` of a publication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Coordinates {
    pub group: String,
    pub artifact_id: String,
    pub version: String,
}

impl Coordinates {
    /// Build coordinates, rejecting empty parts.
    pub fn new(
        group: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> JarshipResult<Self> {
        let coordinates = Self {
            group: group.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        };
        for (field, value) in [
            ("project.group", &coordinates.group),
            ("project.name", &coordinates.artifact_id),
            ("version", &coordinates.version),
        ] {
            if value.is_empty() {
                return Err(JarshipError::IncompleteConfig {
                    field: field.to_string(),
                });
            }
        }
        Ok(coordinates)
    }

    /// Standard Maven layout directory for these coordinates.
    ///
    /// `me.nullicorn:nbt:2.2.0` becomes `me/nullicorn/nbt/2.2.0`
    pub fn path(&self) -> String {
        format!(
            "{}/{}/{}",
            self.group.replace('.', "/"),
            self.artifact_id,
            self.version
        )
    }

    /// File name for an artifact with the given classifier and extension.
    pub fn file_name(&self, classifier: &str, extension: &str) -> String {
        if classifier.is_empty() {
            format!("{}-{}.{extension}", self.artifact_id, self.version)
        } else {
            format!(
                "{}-{}-{classifier}.{extension}",
                self.artifact_id, self.version
            )
        }
    }

    /// Repository-relative path of an artifact's file.
    pub fn artifact_path(&self, artifact: &Artifact) -> String {
        format!(
            "{}/{}",
            self.path(),
            self.file_name(&artifact.classifier, &artifact.extension)
        )
    }

    /// Repository-relative path of the POM.
    pub fn pom_path(&self) -> String {
        format!("{}/{}", self.path(), self.file_name("", "pom"))
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact_id, self.version)
    }
}

/// Everything that is published for one version of one library.
///
/// The publication exclusively owns its artifacts and metadata; both are
/// fixed once it is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub coordinates: Coordinates,
    pub artifacts: ArtifactSet,
    pub metadata: Metadata,
}

impl Publication {
    pub fn new(coordinates: Coordinates, artifacts: ArtifactSet, metadata: Metadata) -> Self {
        Self {
            coordinates,
            artifacts,
            metadata,
        }
    }

    /// Render this publication's POM.
    pub fn pom(&self) -> JarshipResult<String> {
        crate::pom::render_pom(&self.coordinates, &self.metadata)
    }
}
