//! Detached signatures: the [`Signer`] capability, the all-or-nothing
//! signing gate, and the default `gpg` implementation.

use std::collections::BTreeMap;
use std::io::Write;

use jarship_core::manifest::SigningConfig;
use jarship_util::errors::{JarshipError, JarshipResult};
use jarship_util::process::CommandBuilder;

use crate::artifact::{label, ArtifactSet};
use crate::publication::Publication;

/// File extension of ASCII-armored detached signatures.
pub const SIGNATURE_EXTENSION: &str = "asc";

/// Produces a detached signature for a byte payload.
pub trait Signer {
    fn sign(&self, data: &[u8]) -> JarshipResult<Vec<u8>>;
}

/// Detached signatures keyed by artifact classifier.
///
/// Only [`sign_publication`] constructs one, and only after every artifact
/// of the publication was signed, so a set never covers part of a publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureSet {
    signatures: BTreeMap<String, Vec<u8>>,
}

impl SignatureSet {
    pub fn get(&self, classifier: &str) -> Option<&[u8]> {
        self.signatures.get(classifier).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Whether the signed classifiers are exactly those of `artifacts`.
    pub fn covers(&self, artifacts: &ArtifactSet) -> bool {
        self.signatures.len() == artifacts.len()
            && artifacts
                .classifiers()
                .all(|c| self.signatures.contains_key(c))
    }
}

/// Sign every artifact of a publication.
///
/// Stops at the first failure with `SigningFailed` naming the artifact; the
/// signatures collected so far are dropped.
pub fn sign_publication<S: Signer + ?Sized>(
    publication: &Publication,
    signer: &S,
) -> JarshipResult<SignatureSet> {
    let mut signatures = BTreeMap::new();
    for artifact in publication.artifacts.iter() {
        let signature = sign_bytes(artifact.label(), &artifact.content, signer)?;
        tracing::debug!(
            "Signed {} artifact of {}",
            artifact.label(),
            publication.coordinates
        );
        signatures.insert(artifact.classifier.clone(), signature);
    }
    Ok(SignatureSet { signatures })
}

/// Sign a single payload, attributing any failure to `name`.
pub fn sign_bytes<S: Signer + ?Sized>(name: &str, data: &[u8], signer: &S) -> JarshipResult<Vec<u8>> {
    let signature = signer
        .sign(data)
        .map_err(|e| JarshipError::SigningFailed {
            classifier: label(name).to_string(),
            reason: e.to_string(),
        })?;
    if signature.is_empty() {
        return Err(JarshipError::SigningFailed {
            classifier: label(name).to_string(),
            reason: "signer produced an empty signature".to_string(),
        });
    }
    Ok(signature)
}

/// Signs with a local `gpg` installation.
///
/// Runs `gpg --batch --yes --armor --detach-sign --output -` on a temporary
/// copy of the payload. A configured passphrase is written to gpg's stdin
/// (`--pinentry-mode loopback --passphrase-fd 0`), never passed as an argument.
pub struct GpgSigner {
    program: String,
    key: Option<String>,
    passphrase: Option<String>,
}

impl GpgSigner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            key: None,
            passphrase: None,
        }
    }

    /// Build a signer from `[signing]`; empty values count as unset.
    pub fn from_config(config: &SigningConfig) -> Self {
        let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.is_empty());
        Self {
            program: non_empty(&config.program).unwrap_or_else(|| "gpg".to_string()),
            key: non_empty(&config.gpg_key),
            passphrase: non_empty(&config.gpg_password),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into());
        self
    }

    fn command(&self, payload: &std::path::Path) -> CommandBuilder {
        let mut cmd = CommandBuilder::new(&self.program).args([
            "--batch",
            "--yes",
            "--armor",
            "--detach-sign",
            "--output",
            "-",
        ]);
        if let Some(ref key) = self.key {
            cmd = cmd.arg("--local-user").arg(key);
        }
        if let Some(ref passphrase) = self.passphrase {
            cmd = cmd
                .args(["--pinentry-mode", "loopback", "--passphrase-fd", "0"])
                .stdin(format!("{passphrase}\n"));
        }
        cmd.arg(payload.to_string_lossy().into_owned())
    }
}

impl Signer for GpgSigner {
    fn sign(&self, data: &[u8]) -> JarshipResult<Vec<u8>> {
        let mut payload = tempfile::NamedTempFile::new()?;
        payload.write_all(data)?;
        payload.flush()?;

        let cmd = self.command(payload.path());
        let output = cmd.exec().map_err(|e| JarshipError::Generic {
            message: format!("failed to run {}: {e}", cmd.program()),
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(JarshipError::Generic {
                message: format!(
                    "{} exited with {}: {}",
                    cmd.program(),
                    output.status,
                    stderr.trim()
                ),
            });
        }
        Ok(output.stdout)
    }
}
