//! Command dispatch and handler modules.

mod classify;
mod plan;
mod pom;
mod publish;

use std::path::{Path, PathBuf};

use miette::Result;

use jarship_core::manifest::MANIFEST_FILE;
use jarship_ops::{BinaryInputs, PublishConfig};
use jarship_util::errors::JarshipError;
use jarship_util::fs::find_ancestor_with;

use crate::cli::{Cli, Command, PublishArgs};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let manifest = cli.manifest.as_deref();
    match cli.command {
        Command::Publish {
            args,
            dry_run: true,
            json,
        } => plan::exec(manifest, &args, json),
        Command::Publish { args, json, .. } => publish::exec(manifest, &args, json),
        Command::Plan { args, json } => plan::exec(manifest, &args, json),
        Command::Pom { version } => pom::exec(manifest, version.as_deref()),
        Command::Classify { version } => classify::exec(&version),
    }
}

/// Find `Jarship.toml`: the explicit path if given, else the nearest one
/// in the current or a parent directory.
fn locate_manifest(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(JarshipError::Config {
                message: format!("{} does not exist", path.display()),
            }
            .into());
        }
        return Ok(path.to_path_buf());
    }

    let cwd = std::env::current_dir().map_err(JarshipError::Io)?;
    let root = find_ancestor_with(&cwd, MANIFEST_FILE).ok_or_else(|| JarshipError::Config {
        message: format!("Could not find {MANIFEST_FILE} in current or parent directories"),
    })?;
    let path = root.join(MANIFEST_FILE);
    tracing::debug!("Using manifest {}", path.display());
    Ok(path)
}

/// Build outputs from `[artifacts]`, with command-line paths taking precedence.
fn binary_inputs(args: &PublishArgs, config: &PublishConfig, manifest_path: &Path) -> BinaryInputs {
    let base = manifest_path.parent().unwrap_or(Path::new("."));
    BinaryInputs::from_manifest(&config.manifest.artifacts, base).with_overrides(
        args.jar.clone(),
        args.sources.clone(),
        args.javadoc.clone(),
    )
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        JarshipError::Generic {
            message: format!("Failed to serialize output: {e}"),
        }
        .into()
    })
}
