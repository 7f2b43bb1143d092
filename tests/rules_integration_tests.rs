//! Integration tests for the `rules` command.

mod common;

use common::TestFixture;
use predicates::prelude::*;

#[test]
fn rules_lists_default_catalog() {
    let fixture = TestFixture::new();

    ad_compliance!()
        .current_dir(fixture.path())
        .args(["--no-config", "rules"])
        .assert()
        .success()
        .stdout(predicate::str::contains("brand.palette"))
        .stdout(predicate::str::contains("legal.price"))
        .stdout(predicate::str::contains("quality.image-resolution"))
        .stdout(predicate::str::contains("brand.logo").not());
}

#[test]
fn rules_all_marks_disabled() {
    let fixture = TestFixture::new();

    ad_compliance!()
        .current_dir(fixture.path())
        .args(["--no-config", "rules", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(disabled)"))
        .stdout(predicate::str::contains("8 of 9 rules enabled"));
}

#[test]
fn rules_json_reflects_local_config() {
    let fixture = TestFixture::new();
    fixture.create_config("[brand]\nrequire_logo = true\n");

    let output = ad_compliance!()
        .current_dir(fixture.path())
        .args(["rules", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let rows: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let ids: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 9);
    assert_eq!(ids[1], "brand.logo");
}

#[test]
fn rules_rejects_unknown_override() {
    let fixture = TestFixture::new();
    fixture.create_config("[rules.\"legal.fine-print\"]\nenabled = true\n");

    ad_compliance!()
        .current_dir(fixture.path())
        .args(["rules"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown rule id: legal.fine-print"));
}
