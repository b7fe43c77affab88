//! Handler for `jarship pom`.

use std::path::Path;

use miette::Result;

use jarship_ops::PublishConfig;

pub fn exec(manifest: Option<&Path>, version: Option<&str>) -> Result<()> {
    let manifest_path = super::locate_manifest(manifest)?;
    let config = PublishConfig::load(&manifest_path)?;
    let xml = jarship_ops::ops_pom::pom(&config.version(version), &config)?;
    print!("{xml}");
    Ok(())
}
