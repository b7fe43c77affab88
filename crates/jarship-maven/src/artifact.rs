//! Artifacts and the assembler that turns build outputs into one
//! publication's artifact set.

use std::collections::BTreeSet;

use jarship_util::errors::{JarshipError, JarshipResult};

/// Classifier of the primary (compiled) jar.
pub const PRIMARY: &str = "";

/// Classifier of the source archive.
pub const SOURCES: &str = "sources";

/// Classifier of the rendered API documentation archive.
pub const JAVADOC: &str = "javadoc";

const JAR_MEDIA_TYPE: &str = "application/java-archive";

/// One file of a publication, identified by its classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub classifier: String,
    pub extension: String,
    pub media_type: String,
    pub content: Vec<u8>,
}

impl Artifact {
    /// A jar artifact with the given classifier.
    pub fn jar(classifier: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            classifier: classifier.into(),
            extension: "jar".to_string(),
            media_type: JAR_MEDIA_TYPE.to_string(),
            content: content.into(),
        }
    }

    pub fn is_primary(&self) -> bool {
        self.classifier.is_empty()
    }

    /// Human-readable name for logs and errors (`primary` for the empty classifier).
    pub fn label(&self) -> &str {
        label(&self.classifier)
    }
}

/// Human-readable form of a classifier.
pub fn label(classifier: &str) -> &str {
    if classifier.is_empty() {
        "primary"
    } else {
        classifier
    }
}

/// The validated artifacts of one publication.
///
/// Holds exactly one primary artifact plus uniquely classified auxiliary
/// ones, ordered primary first and then by classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
    artifacts: Vec<Artifact>,
}

impl ArtifactSet {
    pub fn primary(&self) -> &Artifact {
        // `assemble` guarantees the primary sorts first.
        &self.artifacts[0]
    }

    pub fn get(&self, classifier: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.classifier == classifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    pub fn classifiers(&self) -> impl Iterator<Item = &str> {
        self.artifacts.iter().map(|a| a.classifier.as_str())
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

/// Collects build outputs and validates them into an [`ArtifactSet`].
///
/// The primary jar, sources jar and javadoc jar are mandatory; further
/// auxiliary artifacts may be added with [`ArtifactAssembler::artifact`].
#[derive(Debug, Default)]
pub struct ArtifactAssembler {
    artifacts: Vec<Artifact>,
}

impl ArtifactAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary(self, content: impl Into<Vec<u8>>) -> Self {
        self.artifact(Artifact::jar(PRIMARY, content))
    }

    pub fn sources(self, content: impl Into<Vec<u8>>) -> Self {
        self.artifact(Artifact::jar(SOURCES, content))
    }

    pub fn javadoc(self, content: impl Into<Vec<u8>>) -> Self {
        self.artifact(Artifact::jar(JAVADOC, content))
    }

    pub fn artifact(mut self, artifact: Artifact) -> Self {
        self.artifacts.push(artifact);
        self
    }

    /// Validate the collected artifacts.
    ///
    /// Fails with `DuplicateArtifact` when a classifier repeats and with
    /// `MissingArtifact` when an artifact is empty or a mandatory slot
    /// (primary, sources, javadoc) was never filled.
    pub fn assemble(self) -> JarshipResult<ArtifactSet> {
        let mut seen = BTreeSet::new();
        for artifact in &self.artifacts {
            if !seen.insert(artifact.classifier.as_str()) {
                return Err(JarshipError::DuplicateArtifact {
                    classifier: artifact.label().to_string(),
                });
            }
            if artifact.content.is_empty() {
                return Err(JarshipError::MissingArtifact {
                    classifier: artifact.label().to_string(),
                    reason: "artifact is empty".to_string(),
                });
            }
        }

        for required in [PRIMARY, SOURCES, JAVADOC] {
            if !seen.contains(required) {
                return Err(JarshipError::MissingArtifact {
                    classifier: label(required).to_string(),
                    reason: "not provided".to_string(),
                });
            }
        }

        let mut artifacts = self.artifacts;
        artifacts.sort_by(|a, b| a.classifier.cmp(&b.classifier));
        tracing::debug!(
            "Assembled {} artifacts: {}",
            artifacts.len(),
            artifacts
                .iter()
                .map(Artifact::label)
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(ArtifactSet { artifacts })
    }
}

/// Assemble the three mandatory artifacts of a library publication.
///
/// `None` for any slot is reported as a missing artifact.
pub fn assemble(
    primary: Option<Vec<u8>>,
    sources: Option<Vec<u8>>,
    javadoc: Option<Vec<u8>>,
) -> JarshipResult<ArtifactSet> {
    let mut assembler = ArtifactAssembler::new();
    for (classifier, content) in [(PRIMARY, primary), (SOURCES, sources), (JAVADOC, javadoc)] {
        if let Some(content) = content {
            assembler = assembler.artifact(Artifact::jar(classifier, content));
        }
    }
    assembler.assemble()
}
