use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::result::ScoringWeights;
use crate::rules::Severity;

/// Supported config version.
pub const CONFIG_VERSION: &str = "1";

/// Brand identity constraints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrandConfig {
    /// Approved hex colors. Empty disables the palette restriction.
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,

    /// Enable the logo presence rule.
    #[serde(default)]
    pub require_logo: bool,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            require_logo: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegalConfig {
    /// Phrases that must appear in the ad's legal copy (case-insensitive).
    #[serde(default)]
    pub required_phrases: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessibilityConfig {
    #[serde(default = "default_min_font_size")]
    pub min_font_size: f64,

    #[serde(default = "default_min_contrast_ratio")]
    pub min_contrast_ratio: f64,

    #[serde(default = "default_large_text_contrast_ratio")]
    pub large_text_contrast_ratio: f64,

    /// Font size (px) from which the large-text contrast ratio applies.
    #[serde(default = "default_large_text_size")]
    pub large_text_size: f64,
}

impl Default for AccessibilityConfig {
    fn default() -> Self {
        Self {
            min_font_size: default_min_font_size(),
            min_contrast_ratio: default_min_contrast_ratio(),
            large_text_contrast_ratio: default_large_text_contrast_ratio(),
            large_text_size: default_large_text_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualityConfig {
    /// Pixels an element may overhang the canvas edge.
    #[serde(default)]
    pub bounds_tolerance: f64,

    /// Largest allowed ratio of rendered size to native image size.
    #[serde(default = "default_max_upscale")]
    pub max_upscale: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            bounds_tolerance: 0.0,
            max_upscale: default_max_upscale(),
        }
    }
}

/// Per-rule switch and severity override `[rules."<id>"]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default)]
    pub brand: BrandConfig,

    #[serde(default)]
    pub legal: LegalConfig,

    #[serde(default)]
    pub accessibility: AccessibilityConfig,

    #[serde(default)]
    pub quality: QualityConfig,

    #[serde(default)]
    pub scoring: ScoringWeights,

    /// Overrides keyed by rule id.
    #[serde(default)]
    pub rules: IndexMap<String, RuleOverride>,
}

fn default_palette() -> Vec<String> {
    ["#000000", "#FFFFFF", "#E4002B", "#00539F"]
        .into_iter()
        .map(String::from)
        .collect()
}

const fn default_min_font_size() -> f64 {
    12.0
}

const fn default_min_contrast_ratio() -> f64 {
    4.5
}

const fn default_large_text_contrast_ratio() -> f64 {
    3.0
}

const fn default_large_text_size() -> f64 {
    24.0
}

const fn default_max_upscale() -> f64 {
    1.0
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
