//! Operation: render the POM for the configured project.

use jarship_maven::pom::{build_metadata, render_pom};
use jarship_maven::publication::Coordinates;

use crate::PublishConfig;

/// Render the POM that would be published for `version`.
pub fn pom(version: &str, config: &PublishConfig) -> miette::Result<String> {
    let project = &config.manifest.project;
    let metadata = build_metadata(&config.manifest)?;
    let coordinates = Coordinates::new(&project.group, project.artifact_id(), version)?;
    Ok(render_pom(&coordinates, &metadata)?)
}
