//! Handler for `jarship plan` and `jarship publish --dry-run`.

use std::path::Path;

use console::style;
use miette::Result;

use jarship_ops::PublishConfig;

use crate::cli::PublishArgs;

pub fn exec(manifest: Option<&Path>, args: &PublishArgs, json: bool) -> Result<()> {
    let manifest_path = super::locate_manifest(manifest)?;
    let config = PublishConfig::load(&manifest_path)?;
    let inputs = super::binary_inputs(args, &config, &manifest_path);
    let version = config.version(args.version.as_deref());

    let plan = jarship_ops::ops_plan::plan(&version, &inputs, &config)?;

    if json {
        println!("{}", super::to_json(&plan)?);
        return Ok(());
    }

    println!(
        "Would publish {} ({}) to `{}` at {}",
        style(&plan.coordinates).bold(),
        plan.kind,
        plan.repository,
        plan.url
    );
    for file in &plan.files {
        println!("  {file}");
    }
    Ok(())
}
