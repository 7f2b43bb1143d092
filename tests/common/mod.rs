#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the ad-compliance binary.
#[macro_export]
macro_rules! ad_compliance {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("ad-compliance"))
    };
}

/// Ad that satisfies every default rule.
pub const COMPLIANT_AD: &str = r##"{
  "name": "Summer Sale",
  "template": { "width": 300, "height": 250 },
  "elements": [
    {
      "id": "headline", "type": "text",
      "x": 10, "y": 10, "width": 200, "height": 40,
      "properties": { "content": "Summer Sale", "color": "#000000", "fontSize": 24 }
    },
    {
      "id": "price", "type": "price",
      "x": 10, "y": 120, "width": 100, "height": 40,
      "properties": {
        "amount": 19.99, "color": "#E4002B", "fontSize": 20,
        "disclaimer": "Offer valid while supplies last. Terms apply."
      }
    }
  ]
}"##;

/// Ad whose only failure is an off-palette headline (warning, score 89).
pub const OFF_PALETTE_AD: &str = r##"{
  "name": "Off Brand",
  "template": { "width": 300, "height": 250 },
  "elements": [
    {
      "id": "headline", "type": "text",
      "x": 10, "y": 10, "width": 200, "height": 40,
      "properties": { "content": "Summer Sale", "color": "#123456", "fontSize": 24 }
    },
    {
      "id": "price", "type": "price",
      "x": 10, "y": 120, "width": 100, "height": 40,
      "properties": {
        "amount": 19.99, "color": "#E4002B", "fontSize": 20,
        "disclaimer": "Offer valid while supplies last. Terms apply."
      }
    }
  ]
}"##;

/// Ad with no elements: fails price and disclaimer (error, score 67).
pub const EMPTY_AD: &str = r#"{
  "name": "Blank",
  "template": { "width": 300, "height": 250 },
  "elements": []
}"#;

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates a local `.ad-compliance.toml`.
    pub fn create_config(&self, content: &str) -> PathBuf {
        self.create_file(".ad-compliance.toml", content)
    }

    /// Writes an ad JSON file.
    pub fn create_ad(&self, relative_path: &str, json: &str) -> PathBuf {
        self.create_file(relative_path, json)
    }

    pub fn read(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }
}
