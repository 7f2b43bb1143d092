use std::fs;

use clap::Parser;
use tempfile::TempDir;

use super::*;
use crate::config::Config;

fn cli(argv: &[&str]) -> Cli {
    Cli::parse_from(argv)
}

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("ad-compliance.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn validate_accepts_valid_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "version = \"1\"\n[brand]\npalette = [\"#111\", \"#222222\"]\n",
    );
    run_config_validate_impl(&path).unwrap();
}

#[test]
fn validate_rejects_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = run_config_validate_impl(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, AdComplianceError::FileAccess { .. }));
}

#[test]
fn validate_rejects_bad_toml() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[brand\npalette = 1\n");
    let err = run_config_validate_impl(&path).unwrap_err();
    assert_eq!(err.error_type(), "Syntax");
}

#[test]
fn validate_rejects_semantic_errors() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[accessibility]\nmin_contrast_ratio = 30.0\n");
    let err = run_config_validate_impl(&path).unwrap_err();
    assert!(err.to_string().contains("min_contrast_ratio"));
}

#[test]
fn validate_rejects_unsupported_version() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "version = \"2\"\n");
    let err = run_config_validate_impl(&path).unwrap_err();
    assert!(err.to_string().contains("Unsupported config version"));
}

#[test]
fn show_defaults_without_config() {
    let cli = cli(&["ad-compliance", "--no-config", "config", "show"]);
    let output = run_config_show_impl(None, ListFormat::Text, &cli).unwrap();

    assert!(output.starts_with("# Effective configuration (source: defaults)"));
    assert!(output.contains("[accessibility]"));
    assert!(output.contains("error_weight = 3"));
}

#[test]
fn show_text_round_trips_through_toml() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[legal]\nrequired_phrases = [\"terms apply\"]\n");
    let cli = cli(&["ad-compliance", "config", "show"]);

    let output = run_config_show_impl(Some(&path), ListFormat::Text, &cli).unwrap();
    assert!(output.contains(&path.display().to_string()));

    let body = output.split_once("\n\n").unwrap().1;
    let config: Config = toml::from_str(body).unwrap();
    assert_eq!(config.legal.required_phrases, ["terms apply"]);
}

#[test]
fn show_json_uses_effective_values() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[quality]\nmax_upscale = 1.5\n");
    let cli = cli(&["ad-compliance", "config", "show"]);

    let output = run_config_show_impl(Some(&path), ListFormat::Json, &cli).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["quality"]["max_upscale"], 1.5);
    assert_eq!(value["accessibility"]["min_font_size"], 12.0);
    assert_eq!(value["scoring"]["warning_weight"], 2);
}

#[test]
fn show_reports_invalid_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[scoring]\nerror_weight = 0\n");
    let cli = cli(&["ad-compliance", "config", "show"]);

    let err = run_config_show_impl(Some(&path), ListFormat::Text, &cli).unwrap_err();
    assert!(err.to_string().contains("scoring.error_weight"));
}
