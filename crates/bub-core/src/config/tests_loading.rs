//! Loading-focused tests for configuration

use std::{collections::HashMap, io::Write};

use crate::config::{load_config, load_toml_file, Config};
use crate::{Error, Result};

fn write_config(dir: &tempfile::TempDir, content: &str) -> Result<std::path::PathBuf> {
    let path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path)?;
    file.write_all(content.as_bytes())?;
    Ok(path)
}

fn tempdir() -> Result<tempfile::TempDir> {
    tempfile::tempdir().map_err(|e| Error::Io(format!("Failed to create temp dir: {e}")))
}

#[test]
fn test_load_full_file() -> Result<()> {
    let dir = tempdir()?;
    let path = write_config(
        &dir,
        r#"
resources = ["alpha", "beta"]
deploy_targets = ["production"]
trigger_word = "bot"

[slack]
token = "secret"

[activity]
app_name_template = "acme-{resource}"
"#,
    )?;

    let config = load_toml_file(&path)?;
    assert_eq!(config.resources, vec!["alpha", "beta"]);
    assert_eq!(config.deploy_targets, vec!["production"]);
    assert_eq!(config.trigger_word, "bot");
    assert_eq!(config.slack.token.as_deref(), Some("secret"));
    assert_eq!(config.activity.app_name_template, "acme-{resource}");
    assert_eq!(config.bind, Config::default().bind);
    Ok(())
}

#[test]
fn test_malformed_toml_returns_parse_error() -> Result<()> {
    let dir = tempdir()?;
    let path = write_config(&dir, "resources = \n invalid toml [[[")?;
    assert!(matches!(load_toml_file(&path), Err(Error::Parse(_))));
    Ok(())
}

#[test]
fn test_directory_path_is_rejected() -> Result<()> {
    let dir = tempdir()?;
    assert!(matches!(load_toml_file(dir.path()), Err(Error::Io(_))));
    Ok(())
}

#[test]
fn test_missing_explicit_file_is_an_error() -> Result<()> {
    let dir = tempdir()?;
    let missing = dir.path().join("nope.toml");
    assert!(load_config(Some(&missing)).is_err());
    Ok(())
}

#[test]
fn test_invalid_explicit_file_fails_validation() -> Result<()> {
    let dir = tempdir()?;
    let path = write_config(&dir, r#"resources = ["sassy", "sassy"]"#)?;
    assert!(matches!(
        load_config(Some(&path)),
        Err(Error::InvalidConfig(_))
    ));
    Ok(())
}

#[test]
fn test_env_overrides() -> Result<()> {
    let env: HashMap<&str, &str> = [
        ("BUB_BIND", "0.0.0.0:9000"),
        ("BUB_RESOURCES", "alpha, beta ,gamma"),
        ("BUB_SLACK_TOKEN", "tok"),
        ("BUB_COMPLETION_TOKEN", "done"),
    ]
    .into_iter()
    .collect();

    let config = Config::default().apply_env(|key| env.get(key).map(ToString::to_string))?;
    assert_eq!(config.bind, "0.0.0.0:9000");
    assert_eq!(config.resources, vec!["alpha", "beta", "gamma"]);
    assert_eq!(config.slack.token.as_deref(), Some("tok"));
    assert_eq!(config.completion_token.as_deref(), Some("done"));
    Ok(())
}

#[test]
fn test_empty_resources_override_rejected() {
    let result = Config::default().apply_env(|key| (key == "BUB_RESOURCES").then(|| " , ".to_string()));
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}
