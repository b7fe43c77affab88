use jarship_core::config::{dirs_path, GlobalConfig};
use tempfile::TempDir;

#[test]
fn test_global_config_default_is_empty() {
    let config = GlobalConfig::default();
    assert!(config.credentials.is_empty());
    assert!(config.signing.is_none());
}

#[test]
fn test_dirs_path_ends_with_jarship_dir() {
    if std::env::var("JARSHIP_HOME").is_ok() {
        return;
    }
    assert!(dirs_path().ends_with(".jarship"));
}

#[test]
fn test_global_config_parse_from_toml() {
    let toml = r#"
[credentials.staging]
username = "deployer"
password = "s3cret"

[credentials.snapshot]
username = "deployer"

[signing]
gpg-key = "ABCDEF12"
program = "/usr/local/bin/gpg2"
"#;
    let config: GlobalConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.credentials.len(), 2);
    assert_eq!(
        config.credentials["staging"].password.as_deref(),
        Some("s3cret")
    );
    assert!(config.credentials["snapshot"].password.is_none());
    let signing = config.signing.unwrap();
    assert_eq!(signing.program.as_deref(), Some("/usr/local/bin/gpg2"));
}

#[test]
fn test_load_from_missing_file_returns_default() {
    let tmp = TempDir::new().unwrap();
    let config = GlobalConfig::load_from(&tmp.path().join("config.toml")).unwrap();
    assert!(config.credentials.is_empty());
}

#[test]
fn test_load_from_invalid_toml_fails() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[credentials.staging\nusername = ").unwrap();
    let err = GlobalConfig::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("global config"), "got: {err}");
}

#[test]
fn test_load_from_keeps_special_characters_in_env_secrets() {
    std::env::set_var("JARSHIP_TEST_GLOBAL_SECRET", r#"p"a\ss"#);
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(
        &path,
        "[credentials.staging]\nusername = \"ci\"\npassword = \"${env:JARSHIP_TEST_GLOBAL_SECRET}\"\n",
    )
    .unwrap();

    let config = GlobalConfig::load_from(&path).unwrap();
    assert_eq!(
        config.credentials["staging"].password.as_deref(),
        Some(r#"p"a\ss"#)
    );
}
