//! Repository authentication for uploads.
//!
//! Credentials arrive already resolved: `${env:...}` references in
//! `Jarship.toml` are interpolated when the manifest is loaded, and the
//! selector guarantees both values are non-empty.

use reqwest::RequestBuilder;

use crate::repository::Credentials;

/// Apply HTTP basic authentication to an upload request.
pub fn apply_auth(request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
    request.basic_auth(&credentials.username, Some(&credentials.password))
}
