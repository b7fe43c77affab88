//! Repository selection: from a version classification to a concrete
//! endpoint and credential pair.

use std::collections::BTreeMap;
use std::fmt;

use jarship_core::manifest::RepositoryEntry;
use jarship_core::version::VersionKind;
use jarship_util::errors::{JarshipError, JarshipResult};

/// Username/password pair for a repository. Both are non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The repository a publish run uploads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryTarget {
    pub name: String,
    pub url: String,
    pub credentials: Credentials,
}

impl RepositoryTarget {
    /// Full URL of a repository-relative path.
    pub fn file_url(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }
}

/// Pick the repository for a version kind from the configured entries.
///
/// Fails with `UnknownRepository` when no `[repositories.<id>]` entry exists
/// for the kind's id, and with `MissingCredentials` when the username or
/// password is unset or empty.
pub fn select_repository(
    kind: VersionKind,
    repositories: &BTreeMap<String, RepositoryEntry>,
) -> JarshipResult<RepositoryTarget> {
    let id = kind.repository_id();
    let entry = repositories
        .get(id)
        .ok_or_else(|| JarshipError::UnknownRepository { id: id.to_string() })?;

    let url = entry.url().trim_end_matches('/');
    if url.is_empty() {
        return Err(JarshipError::UnknownRepository { id: id.to_string() });
    }

    let required = |field: &str, value: Option<&str>| -> JarshipResult<String> {
        match value {
            Some(v) if !v.is_empty() => Ok(v.to_string()),
            _ => Err(JarshipError::MissingCredentials {
                repository: id.to_string(),
                field: field.to_string(),
            }),
        }
    };
    let credentials = Credentials {
        username: required("username", entry.username())?,
        password: required("password", entry.password())?,
    };

    tracing::info!("Selected {kind} repository `{id}` at {url}");
    Ok(RepositoryTarget {
        name: id.to_string(),
        url: url.to_string(),
        credentials,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detailed(url: &str, username: Option<&str>, password: Option<&str>) -> RepositoryEntry {
        RepositoryEntry::Detailed {
            url: url.to_string(),
            username: username.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    fn repos() -> BTreeMap<String, RepositoryEntry> {
        let mut repos = BTreeMap::new();
        repos.insert(
            "snapshot".to_string(),
            detailed("https://repo.example.com/snapshots/", Some("u"), Some("p")),
        );
        repos.insert(
            "staging".to_string(),
            detailed("https://repo.example.com/staging", Some("u"), Some("p")),
        );
        repos
    }

    #[test]
    fn snapshot_selects_snapshot_entry() {
        let target = select_repository(VersionKind::Snapshot, &repos()).unwrap();
        assert_eq!(target.name, "snapshot");
        assert_eq!(target.url, "https://repo.example.com/snapshots");
    }

    #[test]
    fn release_selects_staging_entry() {
        let target = select_repository(VersionKind::Release, &repos()).unwrap();
        assert_eq!(target.name, "staging");
        assert_eq!(target.credentials.username, "u");
    }

    #[test]
    fn release_without_entry_is_unknown() {
        let mut repos = repos();
        repos.remove("staging");
        let err = select_repository(VersionKind::Release, &repos).unwrap_err();
        assert!(matches!(err, JarshipError::UnknownRepository { ref id } if id == "staging"));
    }

    #[test]
    fn empty_password_is_missing_credentials() {
        let mut repos = repos();
        repos.insert(
            "staging".to_string(),
            detailed("https://repo.example.com", Some("u"), Some("")),
        );
        let err = select_repository(VersionKind::Release, &repos).unwrap_err();
        assert!(
            matches!(err, JarshipError::MissingCredentials { ref field, .. } if field == "password")
        );
    }

    #[test]
    fn url_only_entry_has_no_credentials() {
        let mut repos = BTreeMap::new();
        repos.insert(
            "snapshot".to_string(),
            RepositoryEntry::Url("https://repo.example.com".to_string()),
        );
        let err = select_repository(VersionKind::Snapshot, &repos).unwrap_err();
        assert!(
            matches!(err, JarshipError::MissingCredentials { ref field, .. } if field == "username")
        );
    }

    #[test]
    fn file_url_joins_path() {
        let target = select_repository(VersionKind::Snapshot, &repos()).unwrap();
        assert_eq!(
            target.file_url("me/nullicorn/nbt/1.0/nbt-1.0.pom"),
            "https://repo.example.com/snapshots/me/nullicorn/nbt/1.0/nbt-1.0.pom"
        );
    }

    #[test]
    fn debug_redacts_password() {
        let target = select_repository(VersionKind::Snapshot, &repos()).unwrap();
        let debug = format!("{target:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("password: \"p\""));
    }
}
