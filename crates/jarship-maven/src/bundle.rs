//! The set of files handed to the transport for one publication.

use std::collections::{BTreeMap, BTreeSet};

use jarship_util::errors::{JarshipError, JarshipResult};

use crate::checksum;
use crate::publication::Publication;
use crate::signing::{SignatureSet, SIGNATURE_EXTENSION};

/// Repository-relative path to file contents, ordered by path.
///
/// For every artifact and for the POM the bundle holds the file itself,
/// its `.asc` detached signature, and checksum sidecars of the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadBundle {
    files: BTreeMap<String, Vec<u8>>,
}

impl UploadBundle {
    /// Lay out a signed publication for upload.
    ///
    /// `signatures` must cover every artifact of `publication`; anything less
    /// is rejected before a single file is queued.
    pub fn new(
        publication: &Publication,
        signatures: &SignatureSet,
        pom: &str,
        pom_signature: &[u8],
    ) -> JarshipResult<Self> {
        let mut bundle = Self::default();
        let coordinates = &publication.coordinates;

        for artifact in publication.artifacts.iter() {
            let signature = signatures.get(&artifact.classifier).ok_or_else(|| {
                JarshipError::SigningFailed {
                    classifier: artifact.label().to_string(),
                    reason: "no detached signature in the signature set".to_string(),
                }
            })?;
            bundle.insert_signed(
                coordinates.artifact_path(artifact),
                artifact.content.clone(),
                signature,
            );
        }
        if !signatures.covers(&publication.artifacts) {
            return Err(JarshipError::SigningFailed {
                classifier: "signature set".to_string(),
                reason: "signatures do not match the publication's artifacts".to_string(),
            });
        }

        bundle.insert_signed(
            coordinates.pom_path(),
            pom.as_bytes().to_vec(),
            pom_signature,
        );
        Ok(bundle)
    }

    fn insert_signed(&mut self, path: String, content: Vec<u8>, signature: &[u8]) {
        for (sidecar, digest) in checksum::sidecars(&path, &content) {
            self.files.insert(sidecar, digest);
        }
        self.files
            .insert(format!("{path}.{SIGNATURE_EXTENSION}"), signature.to_vec());
        self.files.insert(path, content);
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total payload size in bytes.
    pub fn total_bytes(&self) -> u64 {
        self.files.values().map(|v| v.len() as u64).sum()
    }
}

/// Paths an [`UploadBundle`] for `publication` would contain, in upload order.
///
/// Needs no signatures, so a dry run can show the layout up front.
pub fn layout(publication: &Publication) -> Vec<String> {
    let coordinates = &publication.coordinates;
    let mut paths = BTreeSet::new();
    let files = publication
        .artifacts
        .iter()
        .map(|a| coordinates.artifact_path(a))
        .chain(std::iter::once(coordinates.pom_path()));
    for path in files {
        for ext in checksum::CHECKSUM_EXTENSIONS {
            paths.insert(format!("{path}.{ext}"));
        }
        paths.insert(format!("{path}.{SIGNATURE_EXTENSION}"));
        paths.insert(path);
    }
    paths.into_iter().collect()
}
