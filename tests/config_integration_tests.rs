//! Integration tests for the `config` command.

mod common;

use common::TestFixture;
use predicates::prelude::*;

#[test]
fn validate_reports_valid_file() {
    let fixture = TestFixture::new();
    fixture.create_config("version = \"1\"\n[legal]\nrequired_phrases = [\"terms apply\"]\n");

    ad_compliance!()
        .current_dir(fixture.path())
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn validate_missing_file() {
    let fixture = TestFixture::new();

    ad_compliance!()
        .current_dir(fixture.path())
        .args(["config", "validate", "--config", "missing.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing.toml"));
}

#[test]
fn validate_syntax_error() {
    let fixture = TestFixture::new();
    fixture.create_config("[brand\n");

    ad_compliance!()
        .current_dir(fixture.path())
        .args(["config", "validate"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("TOML parse error"));
}

#[test]
fn validate_semantic_error() {
    let fixture = TestFixture::new();
    fixture.create_config("[quality]\nmax_upscale = 0.5\n");

    ad_compliance!()
        .current_dir(fixture.path())
        .args(["config", "validate"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("quality.max_upscale"));
}

#[test]
fn show_prints_effective_config_with_source() {
    let fixture = TestFixture::new();
    fixture.create_config("[accessibility]\nmin_font_size = 14.0\n");

    ad_compliance!()
        .current_dir(fixture.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".ad-compliance.toml"))
        .stdout(predicate::str::contains("min_font_size = 14.0"))
        .stdout(predicate::str::contains("palette"));
}

#[test]
fn show_json_without_config() {
    let fixture = TestFixture::new();

    let output = ad_compliance!()
        .current_dir(fixture.path())
        .args(["--no-config", "config", "show", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let config: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(config["brand"]["require_logo"], false);
    assert_eq!(config["scoring"]["error_weight"], 3);
}
