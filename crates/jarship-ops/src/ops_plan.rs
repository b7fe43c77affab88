//! Operation: dry run of a publish.

use serde::Serialize;

use jarship_core::version::VersionKind;
use jarship_maven::bundle;
use jarship_maven::publication::Coordinates;
use jarship_maven::repository::select_repository;

use crate::ops_publish::prepare;
use crate::{BinaryInputs, PublishConfig};

/// What a publish run would do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishPlan {
    pub coordinates: Coordinates,
    pub kind: VersionKind,
    pub repository: String,
    pub url: String,
    pub files: Vec<String>,
}

/// Validate inputs and configuration and list the files a publish would
/// upload, without signing or contacting the repository.
///
/// Fails with the same errors a real publish would raise before its
/// signing step, plus repository selection errors.
pub fn plan(
    version: &str,
    inputs: &BinaryInputs,
    config: &PublishConfig,
) -> miette::Result<PublishPlan> {
    let (kind, publication) = prepare(version, inputs, config)?;
    let target = select_repository(kind, &config.repositories())?;
    Ok(PublishPlan {
        files: bundle::layout(&publication),
        coordinates: publication.coordinates,
        kind,
        repository: target.name,
        url: target.url,
    })
}
