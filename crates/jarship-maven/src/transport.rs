//! Uploading a bundle to a Maven repository.

use std::future::Future;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use jarship_util::errors::{JarshipError, JarshipResult};

use crate::auth;
use crate::bundle::UploadBundle;
use crate::checksum;
use crate::repository::RepositoryTarget;
use crate::signing::SIGNATURE_EXTENSION;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Delivers a bundle to a repository.
///
/// Called once per publish run. Retrying, resuming and idempotency of the
/// remote side are the implementation's concern; any error it returns is
/// surfaced to the caller unchanged.
pub trait Transport {
    fn upload(
        &self,
        target: &RepositoryTarget,
        bundle: &UploadBundle,
    ) -> impl Future<Output = JarshipResult<()>> + Send;
}

/// Build a shared reqwest client for repository uploads.
pub fn build_client() -> JarshipResult<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("jarship/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| JarshipError::Generic {
            message: format!("Failed to create HTTP client: {e}"),
        })
}

/// Uploads each file with an authenticated HTTP `PUT`, the deploy protocol
/// spoken by Nexus, Artifactory and Reposilite.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> JarshipResult<Self> {
        Ok(Self {
            client: build_client()?,
        })
    }

    async fn put(&self, target: &RepositoryTarget, path: &str, data: &[u8]) -> JarshipResult<()> {
        let url = target.file_url(path);
        let request = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, content_type(path))
            .body(data.to_vec());
        let response = auth::apply_auth(request, &target.credentials)
            .send()
            .await
            .map_err(|e| JarshipError::Upload {
                repository: target.name.clone(),
                message: format!("PUT {url} failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = body.trim();
            let message = if body.is_empty() {
                format!("HTTP {status} uploading {url}")
            } else {
                format!("HTTP {status} uploading {url}: {body}")
            };
            return Err(JarshipError::Upload {
                repository: target.name.clone(),
                message,
            });
        }
        tracing::debug!("Uploaded {url} ({} bytes)", data.len());
        Ok(())
    }
}

impl Transport for HttpTransport {
    async fn upload(&self, target: &RepositoryTarget, bundle: &UploadBundle) -> JarshipResult<()> {
        let pb = jarship_util::progress::progress_bar(bundle.len() as u64, "Uploading");
        for (path, data) in bundle.iter() {
            pb.set_message(path.rsplit('/').next().unwrap_or(path).to_string());
            if let Err(e) = self.put(target, path, data).await {
                pb.abandon();
                return Err(e);
            }
            pb.inc(1);
        }
        pb.finish_and_clear();
        Ok(())
    }
}

fn content_type(path: &str) -> &'static str {
    if checksum::is_sidecar(path) || path.ends_with(&format!(".{SIGNATURE_EXTENSION}")) {
        "text/plain"
    } else if path.ends_with(".pom") {
        "application/xml"
    } else if path.ends_with(".jar") {
        "application/java-archive"
    } else {
        "application/octet-stream"
    }
}
