//! Configuration resolution tests
//!
//! Tests that manipulate TWARC_CONFIG are marked with #[serial] so they do not
//! race each other on the process environment.

use serial_test::serial;
use std::env;
use std::path::PathBuf;
use twarc_common::config::{
    load_config, resolve_config_path, ConfigOrigin, InferredAgePrecedence, TomlConfig,
    CONFIG_ENV_VAR,
};

#[test]
#[serial]
fn test_cli_path_beats_env_var() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/twarc-from-env.toml");

    let cli = PathBuf::from("/tmp/twarc-from-cli.toml");
    assert_eq!(resolve_config_path(Some(&cli)), Some(cli.clone()));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_env_var_used_without_cli() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/twarc-from-env.toml");

    assert_eq!(
        resolve_config_path(None),
        Some(PathBuf::from("/tmp/twarc-from-env.toml"))
    );

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_missing_file_falls_back_to_defaults() {
    env::remove_var(CONFIG_ENV_VAR);
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let (config, origin) = load_config(Some(&missing)).unwrap();
    assert_eq!(config, TomlConfig::default());
    assert_eq!(origin, ConfigOrigin::MissingRequested(missing));
}

#[test]
#[serial]
fn test_empty_env_var_is_ignored() {
    env::set_var(CONFIG_ENV_VAR, "");

    let resolved = resolve_config_path(None);
    assert_ne!(resolved, Some(PathBuf::new()));

    // Falls through to the platform location, which is not an explicit request
    let (config, origin) = load_config(None).unwrap();
    env::remove_var(CONFIG_ENV_VAR);

    if !resolved.as_ref().is_some_and(|p| p.exists()) {
        assert_eq!(config, TomlConfig::default());
        assert_eq!(origin, ConfigOrigin::Defaults);
    }
}

#[test]
#[serial]
fn test_load_from_env_var_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "archive_dir = \"/srv/export\"\n[aggregation]\ninferred_age_precedence = \"personalization\"\n",
    )
    .unwrap();

    env::set_var(CONFIG_ENV_VAR, &path);
    let (config, origin) = load_config(None).unwrap();
    env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(origin, ConfigOrigin::File(path.clone()));
    assert_eq!(config.archive_dir, Some(PathBuf::from("/srv/export")));
    assert_eq!(
        config.aggregation.inferred_age_precedence,
        InferredAgePrecedence::Personalization
    );
    assert_eq!(config.logging.level, "info");
}

#[test]
#[serial]
fn test_malformed_file_is_error() {
    env::remove_var(CONFIG_ENV_VAR);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "archive_dir = [unterminated").unwrap();

    assert!(load_config(Some(&path)).is_err());
}
