use std::collections::BTreeMap;

use jarship_core::config::{CredentialEntry, GlobalConfig};
use jarship_core::manifest::{Manifest, RepositoryEntry, SigningConfig};
use jarship_util::errors::JarshipError;

const MINIMAL_TOML: &str = r#"
[project]
group = "me.nullicorn"
name = "nbt"
author-url = "github.com/TheNullicorn"
"#;

const FULL_TOML: &str = r#"
[project]
group = "me.nullicorn"
name = "nbt"
artifact-id = "nedit"
version = "2.2.0"
description = "Minecraft NBT reader and writer"
author-url = "github.com/TheNullicorn"

[license]
name = "MIT License"
url = "https://opensource.org/licenses/mit-license.php"

[[developers]]
name = "TheNullicorn"
email = "bennullicorn@gmail.com"

[[developers]]
name = "Second Maintainer"

[repositories]
snapshot = "https://s01.oss.sonatype.org/content/repositories/snapshots/"
staging = { url = "https://s01.oss.sonatype.org/service/local/staging/deploy/maven2/", username = "ossrh-user", password = "ossrh-pass" }

[signing]
gpg-key = "ABCDEF12"
gpg-password = "hunter2"

[artifacts]
jar = "build/libs/nbt-2.2.0.jar"
sources = "build/libs/nbt-2.2.0-sources.jar"
javadoc = "build/libs/nbt-2.2.0-javadoc.jar"
"#;

#[test]
fn test_parse_minimal_manifest() {
    let manifest = Manifest::parse_toml(MINIMAL_TOML).unwrap();
    assert_eq!(manifest.project.group, "me.nullicorn");
    assert_eq!(manifest.project.name, "nbt");
    assert_eq!(manifest.project.artifact_id(), "nbt");
    assert!(manifest.project.version.is_none());
    assert!(manifest.license.is_none());
    assert!(manifest.developers.is_empty());
    assert!(manifest.repositories.is_empty());
    assert!(manifest.artifacts.jar.is_none());
}

#[test]
fn test_parse_full_manifest() {
    let manifest = Manifest::parse_toml(FULL_TOML).unwrap();
    assert_eq!(manifest.project.artifact_id(), "nedit");
    assert_eq!(manifest.project.version.as_deref(), Some("2.2.0"));
    assert_eq!(manifest.license.as_ref().unwrap().name, "MIT License");
    assert_eq!(manifest.developers.len(), 2);
    assert_eq!(manifest.developers[0].name, "TheNullicorn");
    assert_eq!(manifest.developers[1].email, "");
    assert_eq!(manifest.repositories.len(), 2);
    assert!(matches!(
        manifest.repositories["snapshot"],
        RepositoryEntry::Url(_)
    ));
    assert_eq!(manifest.repositories["staging"].username(), Some("ossrh-user"));
    assert_eq!(
        manifest.signing.as_ref().unwrap().gpg_key.as_deref(),
        Some("ABCDEF12")
    );
    assert!(manifest.artifacts.javadoc.is_some());
}

#[test]
fn test_missing_name_still_parses() {
    let manifest = Manifest::parse_toml("[project]\ngroup = \"g\"\n").unwrap();
    assert!(manifest.project.name.is_empty());
    assert!(manifest.project.author_url.is_empty());
}

#[test]
fn test_missing_project_table_is_config_error() {
    let err = Manifest::parse_toml("[license]\nname = \"MIT\"\n").unwrap_err();
    assert!(matches!(err, JarshipError::Config { .. }));
    assert!(err.to_string().contains("Jarship.toml"));
}

#[test]
fn test_repositories_with_fills_missing_credentials_from_global() {
    let manifest = Manifest::parse_toml(FULL_TOML).unwrap();
    let mut credentials = BTreeMap::new();
    credentials.insert(
        "snapshot".to_string(),
        CredentialEntry {
            username: Some("global-user".to_string()),
            password: Some("global-pass".to_string()),
        },
    );
    credentials.insert(
        "staging".to_string(),
        CredentialEntry {
            username: Some("ignored".to_string()),
            password: Some("ignored".to_string()),
        },
    );
    let global = GlobalConfig {
        credentials,
        signing: None,
    };

    let repos = manifest.repositories_with(&global);
    assert_eq!(repos["snapshot"].username(), Some("global-user"));
    assert_eq!(repos["snapshot"].password(), Some("global-pass"));
    // Manifest values win over global ones.
    assert_eq!(repos["staging"].username(), Some("ossrh-user"));
    assert_eq!(repos["staging"].password(), Some("ossrh-pass"));
}

#[test]
fn test_repositories_with_treats_empty_as_unset() {
    let toml = r#"
[project]
name = "nbt"

[repositories]
staging = { url = "https://repo.example.com", username = "", password = "" }
"#;
    let manifest = Manifest::parse_toml(toml).unwrap();
    let repos = manifest.repositories_with(&GlobalConfig::default());
    assert_eq!(repos["staging"].username(), None);
    assert_eq!(repos["staging"].password(), None);
}

#[test]
fn test_signing_with_prefers_manifest() {
    let manifest = Manifest::parse_toml(FULL_TOML).unwrap();
    let global = GlobalConfig {
        credentials: BTreeMap::new(),
        signing: Some(SigningConfig {
            gpg_key: Some("GLOBALKEY".to_string()),
            ..Default::default()
        }),
    };
    assert_eq!(
        manifest.signing_with(&global).gpg_key.as_deref(),
        Some("ABCDEF12")
    );

    let minimal = Manifest::parse_toml(MINIMAL_TOML).unwrap();
    assert_eq!(
        minimal.signing_with(&global).gpg_key.as_deref(),
        Some("GLOBALKEY")
    );
    assert!(minimal
        .signing_with(&GlobalConfig::default())
        .gpg_key
        .is_none());
}
