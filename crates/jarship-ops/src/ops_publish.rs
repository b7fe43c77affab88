//! Operation: classify, assemble, sign, select a repository and upload.
//!
//! Each step consumes only the outputs of the steps before it, and any
//! failure aborts the run. Nothing is uploaded unless every artifact and the
//! POM carry a signature and a repository with credentials was selected.

use std::path::Path;

use serde::Serialize;

use jarship_core::version::{self, VersionKind};
use jarship_maven::artifact;
use jarship_maven::bundle::UploadBundle;
use jarship_maven::pom::build_metadata;
use jarship_maven::publication::{Coordinates, Publication};
use jarship_maven::repository::select_repository;
use jarship_maven::signing::{sign_bytes, sign_publication, Signer};
use jarship_maven::transport::Transport;
use jarship_util::errors::{JarshipError, JarshipResult};
use jarship_util::progress::status;

use crate::{BinaryInputs, PublishConfig};

/// Outcome of a successful publish run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishResult {
    pub coordinates: Coordinates,
    pub kind: VersionKind,
    pub repository: String,
    pub artifact_count: usize,
    pub file_count: usize,
}

/// Publish one version of the configured library.
///
/// Runs the pipeline in a fixed order: classify the version, assemble the
/// artifacts, build the metadata, sign every artifact and the POM, select
/// the repository, then hand the bundle to `transport` exactly once.
pub async fn publish<S, T>(
    version: &str,
    inputs: &BinaryInputs,
    config: &PublishConfig,
    signer: &S,
    transport: &T,
) -> miette::Result<PublishResult>
where
    S: Signer + ?Sized,
    T: Transport,
{
    let (kind, publication) = prepare(version, inputs, config)?;
    let coordinates = &publication.coordinates;

    status("Signing", &format!("{} artifacts of {coordinates}", publication.artifacts.len()));
    let signatures = sign_publication(&publication, signer)?;
    let pom = publication.pom()?;
    let pom_signature = sign_bytes("pom", pom.as_bytes(), signer)?;
    tracing::info!("Signed {} artifacts and the POM", signatures.len());

    let target = select_repository(kind, &config.repositories())?;

    if !signatures.covers(&publication.artifacts) {
        return Err(JarshipError::SigningFailed {
            classifier: "signature set".to_string(),
            reason: "signatures do not cover every artifact".to_string(),
        }
        .into());
    }
    let bundle = UploadBundle::new(&publication, &signatures, &pom, &pom_signature)?;

    status(
        "Uploading",
        &format!("{coordinates} to {} ({})", target.name, target.url),
    );
    tracing::debug!(
        "Uploading {} files ({} bytes)",
        bundle.len(),
        bundle.total_bytes()
    );
    transport.upload(&target, &bundle).await?;

    status("Published", &format!("{coordinates} to {}", target.name));
    Ok(PublishResult {
        coordinates: coordinates.clone(),
        kind,
        repository: target.name,
        artifact_count: publication.artifacts.len(),
        file_count: bundle.len(),
    })
}

/// Classify, assemble and describe: the steps shared by publish and plan.
pub(crate) fn prepare(
    version: &str,
    inputs: &BinaryInputs,
    config: &PublishConfig,
) -> JarshipResult<(VersionKind, Publication)> {
    let kind = version::classify(version);
    tracing::info!("Version `{version}` classified as {kind}");

    let artifacts = artifact::assemble(
        read_input(artifact::PRIMARY, inputs.jar.as_deref())?,
        read_input(artifact::SOURCES, inputs.sources.as_deref())?,
        read_input(artifact::JAVADOC, inputs.javadoc.as_deref())?,
    )?;

    let metadata = build_metadata(&config.manifest)?;
    let project = &config.manifest.project;
    let coordinates = Coordinates::new(&project.group, project.artifact_id(), version)?;
    status("Packaging", &coordinates.to_string());

    Ok((kind, Publication::new(coordinates, artifacts, metadata)))
}

/// Read one build output. An unset path yields `None`, which the assembler
/// reports as not provided.
fn read_input(classifier: &str, path: Option<&Path>) -> JarshipResult<Option<Vec<u8>>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let content = std::fs::read(path).map_err(|e| JarshipError::MissingArtifact {
        classifier: artifact::label(classifier).to_string(),
        reason: format!("cannot read {}: {e}", path.display()),
    })?;
    tracing::debug!(
        "Read {} artifact from {} ({} bytes)",
        artifact::label(classifier),
        path.display(),
        content.len()
    );
    Ok(Some(content))
}
