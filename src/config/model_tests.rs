use super::*;

#[test]
fn defaults_match_documented_values() {
    let config = Config::default();
    assert_eq!(config.brand.palette.len(), 4);
    assert!(!config.brand.require_logo);
    assert!(config.legal.required_phrases.is_empty());
    assert!((config.accessibility.min_contrast_ratio - 4.5).abs() < f64::EPSILON);
    assert!((config.accessibility.min_font_size - 12.0).abs() < f64::EPSILON);
    assert!((config.quality.max_upscale - 1.0).abs() < f64::EPSILON);
    assert_eq!(config.scoring, ScoringWeights::default());
    assert!(config.rules.is_empty());
}

#[test]
fn empty_toml_yields_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config: Config = toml::from_str(
        r##"
[accessibility]
min_font_size = 14

[brand]
palette = ["#111111"]
"##,
    )
    .unwrap();
    assert!((config.accessibility.min_font_size - 14.0).abs() < f64::EPSILON);
    assert!((config.accessibility.min_contrast_ratio - 4.5).abs() < f64::EPSILON);
    assert_eq!(config.brand.palette, vec!["#111111"]);
}

#[test]
fn rule_overrides_parse_severity_and_switch() {
    let config: Config = toml::from_str(
        r#"
[rules."brand.palette"]
severity = "error"

[rules."quality.image-resolution"]
enabled = false
"#,
    )
    .unwrap();
    assert_eq!(
        config.rules["brand.palette"].severity,
        Some(Severity::Error)
    );
    assert_eq!(
        config.rules["quality.image-resolution"].enabled,
        Some(false)
    );
}

#[test]
fn unknown_severity_is_a_parse_error() {
    let result: Result<Config, _> = toml::from_str(
        r#"
[rules."brand.palette"]
severity = "fatal"
"#,
    );
    assert!(result.is_err());
}

#[test]
fn config_round_trips_through_json() {
    let config = Config::default();
    let json = serde_json::to_string(&config).unwrap();
    let back: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
