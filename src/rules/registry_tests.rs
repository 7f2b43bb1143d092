use super::*;
use crate::config::RuleOverride;
use crate::model::Ad;
use crate::rules::{
    BUILTIN_RULE_IDS, Category, PricePresenceRule, RULE_BRAND_LOGO, RULE_BRAND_PALETTE,
    RULE_QUALITY_IMAGE, RuleFault, RuleOutcome,
};

struct AlwaysPass(&'static str);

impl Rule for AlwaysPass {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor::new(self.0, "Always", Category::Quality, Severity::Info)
    }

    fn evaluate(&self, _ad: &Ad) -> std::result::Result<RuleOutcome, RuleFault> {
        Ok(RuleOutcome::pass("fine"))
    }
}

#[test]
fn standard_registry_skips_logo_by_default() {
    let registry = RuleRegistry::standard(&Config::default()).unwrap();
    assert_eq!(registry.len(), BUILTIN_RULE_IDS.len() - 1);
    assert!(!registry.contains(RULE_BRAND_LOGO));

    let ids: Vec<&str> = registry.descriptors().map(|d| d.id.as_str()).collect();
    let expected: Vec<&str> = BUILTIN_RULE_IDS
        .iter()
        .copied()
        .filter(|id| *id != RULE_BRAND_LOGO)
        .collect();
    assert_eq!(ids, expected);
}

#[test]
fn require_logo_enables_logo_rule() {
    let mut config = Config::default();
    config.brand.require_logo = true;
    let registry = RuleRegistry::standard(&config).unwrap();
    assert!(registry.contains(RULE_BRAND_LOGO));
    assert_eq!(registry.len(), BUILTIN_RULE_IDS.len());
}

#[test]
fn overrides_change_severity_and_disable_rules() {
    let mut config = Config::default();
    config.rules.insert(
        RULE_BRAND_PALETTE.to_string(),
        RuleOverride {
            enabled: None,
            severity: Some(Severity::Error),
        },
    );
    config.rules.insert(
        RULE_QUALITY_IMAGE.to_string(),
        RuleOverride {
            enabled: Some(false),
            severity: None,
        },
    );

    let registry = RuleRegistry::standard(&config).unwrap();
    assert_eq!(
        registry.get(RULE_BRAND_PALETTE).unwrap().severity,
        Severity::Error
    );
    assert!(!registry.contains(RULE_QUALITY_IMAGE));
}

#[test]
fn override_for_unknown_rule_is_rejected() {
    let mut config = Config::default();
    config
        .rules
        .insert("brand.sparkle".to_string(), RuleOverride::default());
    let err = RuleRegistry::standard(&config).unwrap_err();
    assert!(matches!(err, AdComplianceError::UnknownRule(id) if id == "brand.sparkle"));
}

#[test]
fn bad_palette_color_is_rejected() {
    let mut config = Config::default();
    config.brand.palette.push("crimson".to_string());
    assert!(matches!(
        RuleRegistry::standard(&config),
        Err(AdComplianceError::InvalidColor(_))
    ));
}

#[test]
fn catalog_lists_disabled_rules() {
    let entries = catalog(&Config::default()).unwrap();
    assert_eq!(entries.len(), BUILTIN_RULE_IDS.len());
    let logo = entries
        .iter()
        .find(|e| e.descriptor.id == RULE_BRAND_LOGO)
        .unwrap();
    assert!(!logo.enabled);
}

#[test]
fn duplicate_registration_fails() {
    let mut registry = RuleRegistry::new();
    registry.register(PricePresenceRule).unwrap();
    let err = registry.register(PricePresenceRule).unwrap_err();
    assert!(matches!(err, AdComplianceError::DuplicateRule(_)));
    assert_eq!(registry.len(), 1);
}

#[test]
fn custom_rules_keep_registration_order() {
    let mut registry = RuleRegistry::new();
    registry.register(AlwaysPass("z.last")).unwrap();
    registry
        .register_with_severity(AlwaysPass("a.first"), Severity::Error)
        .unwrap();

    let ids: Vec<&str> = registry.descriptors().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, ["z.last", "a.first"]);
    assert_eq!(registry.get("a.first").unwrap().severity, Severity::Error);
}

#[test]
fn fingerprint_tracks_parameters_and_severity() {
    let base = RuleRegistry::standard(&Config::default()).unwrap();
    let same = RuleRegistry::standard(&Config::default()).unwrap();
    assert_eq!(base.fingerprint(), same.fingerprint());

    let mut config = Config::default();
    config.accessibility.min_font_size = 14.0;
    let changed = RuleRegistry::standard(&config).unwrap();
    assert_ne!(base.fingerprint(), changed.fingerprint());

    let mut config = Config::default();
    config.rules.insert(
        RULE_BRAND_PALETTE.to_string(),
        RuleOverride {
            enabled: None,
            severity: Some(Severity::Info),
        },
    );
    let reweighted = RuleRegistry::standard(&config).unwrap();
    assert_ne!(base.fingerprint(), reweighted.fingerprint());
}

#[test]
fn empty_registry() {
    let registry = RuleRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.iter().count(), 0);
}
