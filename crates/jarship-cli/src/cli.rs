//! CLI argument definitions for jarship.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "jarship",
    version,
    about = "Sign and publish JVM library artifacts to Maven repositories",
    long_about = "jarship takes a built jar, sources jar and javadoc jar, generates the POM, \
                  signs everything with gpg and uploads it to the snapshot or staging \
                  repository chosen by the version string."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to Jarship.toml (defaults to the nearest one above the current directory)
    #[arg(long, global = true, env = "JARSHIP_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Version and build outputs of a publish run.
#[derive(Args, Debug, Clone, Default)]
pub struct PublishArgs {
    /// Version to publish (overrides `[project] version`)
    #[arg(long = "version", value_name = "VERSION")]
    pub version: Option<String>,
    /// Compiled jar (overrides `[artifacts] jar`)
    #[arg(long, value_name = "PATH")]
    pub jar: Option<PathBuf>,
    /// Sources jar (overrides `[artifacts] sources`)
    #[arg(long, value_name = "PATH")]
    pub sources: Option<PathBuf>,
    /// Javadoc jar (overrides `[artifacts] javadoc`)
    #[arg(long, value_name = "PATH")]
    pub javadoc: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign the artifacts and upload them to the snapshot or staging repository
    Publish {
        #[command(flatten)]
        args: PublishArgs,
        /// Validate and list the files that would be uploaded, then stop
        #[arg(long)]
        dry_run: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show what `publish` would upload, without signing or uploading
    Plan {
        #[command(flatten)]
        args: PublishArgs,
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the generated POM
    Pom {
        /// Version to render (overrides `[project] version`)
        #[arg(long = "version", value_name = "VERSION")]
        version: Option<String>,
    },

    /// Classify a version string as snapshot or release
    Classify {
        /// Version string, e.g. 2.2.0 or 2.2.0-SNAPSHOT
        version: String,
    },
}

/// Parse CLI arguments from the environment.
pub fn parse() -> Cli {
    Cli::parse()
}
