//! Handler for `jarship publish`.

use std::path::Path;

use miette::Result;

use jarship_maven::signing::GpgSigner;
use jarship_maven::transport::HttpTransport;
use jarship_ops::PublishConfig;
use jarship_util::errors::JarshipError;

use crate::cli::PublishArgs;

pub fn exec(manifest: Option<&Path>, args: &PublishArgs, json: bool) -> Result<()> {
    let manifest_path = super::locate_manifest(manifest)?;
    let config = PublishConfig::load(&manifest_path)?;
    let inputs = super::binary_inputs(args, &config, &manifest_path);
    let version = config.version(args.version.as_deref());

    let signer = GpgSigner::from_config(&config.signing());
    let transport = HttpTransport::new()?;

    let rt = tokio::runtime::Runtime::new().map_err(|e| JarshipError::Generic {
        message: format!("Failed to start async runtime: {e}"),
    })?;
    let result = rt.block_on(jarship_ops::ops_publish::publish(
        &version, &inputs, &config, &signer, &transport,
    ))?;

    if json {
        println!("{}", super::to_json(&result)?);
    } else {
        println!(
            "Published {} to `{}` ({} artifacts, {} files)",
            result.coordinates, result.repository, result.artifact_count, result.file_count
        );
    }
    Ok(())
}
