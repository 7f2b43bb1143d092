//! Configuration semantic validation.
//!
//! Validates that configuration values are semantically correct after parsing:
//! colors parse, thresholds are in range and overrides name real rules.

use crate::config::Config;
use crate::model::Rgb;
use crate::rules::ensure_known_rule;
use crate::{AdComplianceError, Result};

/// Highest contrast ratio two colors can have (black on white).
const MAX_CONTRAST_RATIO: f64 = 21.0;

/// Validates semantic correctness of a configuration.
///
/// # Errors
/// Returns the first problem found: an invalid palette color, an out-of-range
/// threshold, a blank required phrase, a zero scoring weight, or an override
/// for an unknown rule.
pub fn validate_config_semantics(config: &Config) -> Result<()> {
    validate_brand_section(config)?;
    validate_legal_section(config)?;
    validate_accessibility_section(config)?;
    validate_quality_section(config)?;
    validate_scoring_section(config)?;
    validate_rule_overrides(config)?;
    Ok(())
}

fn validate_brand_section(config: &Config) -> Result<()> {
    for color in &config.brand.palette {
        Rgb::parse(color)?;
    }
    Ok(())
}

fn validate_legal_section(config: &Config) -> Result<()> {
    for (i, phrase) in config.legal.required_phrases.iter().enumerate() {
        if phrase.trim().is_empty() {
            return Err(AdComplianceError::Config(format!(
                "legal.required_phrases[{i}] must not be empty"
            )));
        }
    }
    Ok(())
}

fn validate_accessibility_section(config: &Config) -> Result<()> {
    let a11y = &config.accessibility;
    for (key, ratio) in [
        ("min_contrast_ratio", a11y.min_contrast_ratio),
        ("large_text_contrast_ratio", a11y.large_text_contrast_ratio),
    ] {
        if !(1.0..=MAX_CONTRAST_RATIO).contains(&ratio) {
            return Err(AdComplianceError::Config(format!(
                "accessibility.{key} must be between 1 and {MAX_CONTRAST_RATIO}, got {ratio}"
            )));
        }
    }

    if a11y.large_text_contrast_ratio > a11y.min_contrast_ratio {
        return Err(AdComplianceError::Config(format!(
            "accessibility.large_text_contrast_ratio ({}) must not exceed accessibility.min_contrast_ratio ({})",
            a11y.large_text_contrast_ratio, a11y.min_contrast_ratio
        )));
    }

    if a11y.min_font_size.is_nan() || a11y.min_font_size <= 0.0 {
        return Err(AdComplianceError::Config(format!(
            "accessibility.min_font_size must be positive, got {}",
            a11y.min_font_size
        )));
    }
    if a11y.large_text_size.is_nan() || a11y.large_text_size <= 0.0 {
        return Err(AdComplianceError::Config(format!(
            "accessibility.large_text_size must be positive, got {}",
            a11y.large_text_size
        )));
    }
    Ok(())
}

fn validate_quality_section(config: &Config) -> Result<()> {
    let quality = &config.quality;
    if quality.bounds_tolerance.is_nan() || quality.bounds_tolerance < 0.0 {
        return Err(AdComplianceError::Config(format!(
            "quality.bounds_tolerance must be non-negative, got {}",
            quality.bounds_tolerance
        )));
    }
    if quality.max_upscale.is_nan() || quality.max_upscale < 1.0 {
        return Err(AdComplianceError::Config(format!(
            "quality.max_upscale must be at least 1.0, got {}",
            quality.max_upscale
        )));
    }
    Ok(())
}

fn validate_scoring_section(config: &Config) -> Result<()> {
    let weights = &config.scoring;
    for (key, weight) in [
        ("error_weight", weights.error),
        ("warning_weight", weights.warning),
        ("info_weight", weights.info),
    ] {
        if weight == 0 {
            return Err(AdComplianceError::Config(format!(
                "scoring.{key} must be positive"
            )));
        }
    }
    Ok(())
}

fn validate_rule_overrides(config: &Config) -> Result<()> {
    for id in config.rules.keys() {
        ensure_known_rule(id)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
