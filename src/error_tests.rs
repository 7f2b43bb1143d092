use std::path::PathBuf;

use super::*;

#[test]
fn config_error_display() {
    let err = AdComplianceError::Config("bad weight".to_string());
    assert_eq!(err.to_string(), "Configuration error: bad weight");
    assert_eq!(err.error_type(), "Config");
}

#[test]
fn file_access_error_keeps_source() {
    let err = AdComplianceError::FileAccess {
        path: PathBuf::from("ads/banner.json"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
    };
    assert!(err.to_string().contains("ads/banner.json"));
    assert!(std::error::Error::source(&err).is_some());
    assert_eq!(err.error_type(), "IO");
}

#[test]
fn invalid_color_mentions_accepted_forms() {
    let err = AdComplianceError::InvalidColor("red".to_string());
    assert!(err.to_string().contains("#RRGGBB"));
    assert_eq!(err.error_type(), "Input");
}

#[test]
fn json_error_converts_via_from() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: AdComplianceError = json_err.into();
    assert!(matches!(err, AdComplianceError::JsonParse(_)));
}

#[test]
fn toml_error_is_syntax() {
    let toml_err = toml::from_str::<toml::Value>("[[[").unwrap_err();
    let err: AdComplianceError = toml_err.into();
    assert_eq!(err.error_type(), "Syntax");
}
