use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use super::*;
use crate::config::{CONFIG_VERSION, Config, validate_config_semantics};

fn init_args(output: PathBuf, force: bool) -> InitArgs {
    InitArgs { output, force }
}

#[test]
fn template_parses_to_default_config() {
    let config: Config = toml::from_str(&generate_config_template()).unwrap();

    assert_eq!(config.version.as_deref(), Some(CONFIG_VERSION));
    let defaults = Config {
        version: config.version.clone(),
        ..Config::default()
    };
    assert_eq!(config, defaults);
    validate_config_semantics(&config).unwrap();
}

#[test]
fn template_documents_rule_overrides() {
    let template = generate_config_template();
    assert!(template.contains("[rules.\"brand.palette\"]"));
    assert!(template.contains("require_logo"));
}

#[test]
fn init_creates_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".ad-compliance.toml");

    run_init_impl(&init_args(path.clone(), false)).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), generate_config_template());
}

#[test]
fn init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".ad-compliance.toml");
    fs::write(&path, "# mine\n").unwrap();

    let err = run_init_impl(&init_args(path.clone(), false)).unwrap_err();

    assert!(err.to_string().contains("already exists"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "# mine\n");
}

#[test]
fn init_force_overwrites() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".ad-compliance.toml");
    fs::write(&path, "# mine\n").unwrap();

    run_init_impl(&init_args(path.clone(), true)).unwrap();

    assert!(fs::read_to_string(&path).unwrap().contains("[scoring]"));
}

#[test]
fn init_reports_unwritable_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing-dir").join("config.toml");

    let err = run_init_impl(&init_args(path, false)).unwrap_err();
    assert!(matches!(err, AdComplianceError::FileAccess { .. }));
}
