use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all jarship operations.
///
/// Every variant aborts a publish run. Nothing is retried or recovered
/// internally, so the variant (and its diagnostic code) is what the CLI
/// reports when it exits non-zero.
#[derive(Debug, Error, Diagnostic)]
pub enum JarshipError {
    /// A mandatory artifact slot was absent or empty.
    #[error("Missing artifact: {classifier} ({reason})")]
    #[diagnostic(
        code(jarship::missing_artifact),
        help("Build the jar, sources jar and javadoc jar before publishing")
    )]
    MissingArtifact { classifier: String, reason: String },

    /// Two artifacts in one publication share a classifier.
    #[error("Duplicate artifact classifier: {classifier}")]
    #[diagnostic(code(jarship::duplicate_artifact))]
    DuplicateArtifact { classifier: String },

    /// A required configuration field is empty or unset.
    #[error("Incomplete configuration: `{field}` is required")]
    #[diagnostic(
        code(jarship::incomplete_config),
        help("Set the field in Jarship.toml")
    )]
    IncompleteConfig { field: String },

    /// The signer failed for one artifact; nothing was uploaded.
    #[error("Signing failed for artifact `{classifier}`: {reason}")]
    #[diagnostic(
        code(jarship::signing_failed),
        help("Check the signing key and passphrase in [signing]")
    )]
    SigningFailed { classifier: String, reason: String },

    /// No repository is configured for the version's classification.
    #[error("No repository configured with id `{id}`")]
    #[diagnostic(
        code(jarship::unknown_repository),
        help("Add a [repositories.{id}] section with a url")
    )]
    UnknownRepository { id: String },

    /// The selected repository has no usable username/password.
    #[error("Missing {field} for repository `{repository}`")]
    #[diagnostic(
        code(jarship::missing_credentials),
        help("Set credentials in Jarship.toml, .jarship.env or ~/.jarship/config.toml")
    )]
    MissingCredentials { repository: String, field: String },

    /// The transport rejected the upload.
    #[error("Upload to `{repository}` failed: {message}")]
    #[diagnostic(code(jarship::upload))]
    Upload { repository: String, message: String },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed configuration file.
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check your Jarship.toml for syntax errors"))]
    Config { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Result alias for library functions that surface a typed [`JarshipError`].
pub type JarshipResult<T> = Result<T, JarshipError>;
