//! Compliance rules and the registry that holds them.
//!
//! A rule is a pure function over an [`Ad`] snapshot described by a
//! [`RuleDescriptor`]. The evaluator never needs to know which rules exist:
//! adding a rule means implementing [`Rule`] and registering it.

mod accessibility;
mod brand;
mod legal;
mod quality;
mod registry;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::model::{Ad, Rgb};
use crate::{AdComplianceError, Result};

pub use accessibility::{ContrastRule, FontSizeRule};
pub use brand::{BrandPaletteRule, LogoPresenceRule};
pub use legal::{DisclaimerRule, PricePresenceRule, StrikethroughPriceRule};
pub use quality::{CanvasBoundsRule, ImageResolutionRule};
pub use registry::{CatalogEntry, RuleRegistry, catalog};

pub const RULE_BRAND_PALETTE: &str = "brand.palette";
pub const RULE_BRAND_LOGO: &str = "brand.logo";
pub const RULE_LEGAL_PRICE: &str = "legal.price";
pub const RULE_LEGAL_DISCLAIMER: &str = "legal.disclaimer";
pub const RULE_LEGAL_STRIKETHROUGH: &str = "legal.strikethrough";
pub const RULE_A11Y_CONTRAST: &str = "accessibility.contrast";
pub const RULE_A11Y_FONT_SIZE: &str = "accessibility.font-size";
pub const RULE_QUALITY_BOUNDS: &str = "quality.canvas-bounds";
pub const RULE_QUALITY_IMAGE: &str = "quality.image-resolution";

/// Every built-in rule id, in registry order.
pub const BUILTIN_RULE_IDS: &[&str] = &[
    RULE_BRAND_PALETTE,
    RULE_BRAND_LOGO,
    RULE_LEGAL_PRICE,
    RULE_LEGAL_DISCLAIMER,
    RULE_LEGAL_STRIKETHROUGH,
    RULE_A11Y_CONTRAST,
    RULE_A11Y_FONT_SIZE,
    RULE_QUALITY_BOUNDS,
    RULE_QUALITY_IMAGE,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Brand,
    Legal,
    Accessibility,
    Quality,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Legal => "legal",
            Self::Accessibility => "accessibility",
            Self::Quality => "quality",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blocking weight of a failed check. Only `Error` blocks the overall verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            _ => Err(format!("Unknown severity: {s}")),
        }
    }
}

/// Static metadata of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDescriptor {
    pub id: String,
    pub name: String,
    pub category: Category,
    /// Severity applied when the rule fails, unless the registry overrides it.
    pub severity: Severity,
    pub description: String,
}

impl RuleDescriptor {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        severity: Severity,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            severity,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Verdict of a single rule before the evaluator attaches severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Pass {
        message: String,
    },
    Fail {
        message: String,
        suggestion: Option<String>,
    },
}

impl RuleOutcome {
    #[must_use]
    pub fn pass(message: impl Into<String>) -> Self {
        Self::Pass {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail {
            message: message.into(),
            suggestion: None,
        }
    }

    /// Attach remediation text. Ignored on a passing outcome.
    #[must_use]
    pub fn with_suggestion(self, text: impl Into<String>) -> Self {
        match self {
            Self::Fail { message, .. } => Self::Fail {
                message,
                suggestion: Some(text.into()),
            },
            pass @ Self::Pass { .. } => pass,
        }
    }

    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass { .. })
    }
}

/// A rule could not produce a verdict.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RuleFault {
    message: String,
}

impl RuleFault {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A compliance rule.
///
/// Implementations must be side-effect free and must not depend on the
/// order in which rules run.
pub trait Rule: Send + Sync {
    fn descriptor(&self) -> RuleDescriptor;

    /// Evaluate the rule against an ad snapshot.
    ///
    /// # Errors
    /// Returns a `RuleFault` when the rule cannot reach a verdict. The
    /// evaluator records it as a failed error-severity check.
    fn evaluate(&self, ad: &Ad) -> std::result::Result<RuleOutcome, RuleFault>;

    /// Configuration that influences the verdict, folded into the registry
    /// fingerprint so cached results are invalidated when it changes.
    fn parameters(&self) -> String {
        String::new()
    }
}

/// A rule backed by a plain function or closure.
pub struct FnRule<F> {
    descriptor: RuleDescriptor,
    func: F,
}

impl<F> FnRule<F>
where
    F: Fn(&Ad) -> std::result::Result<RuleOutcome, RuleFault> + Send + Sync,
{
    #[must_use]
    pub const fn new(descriptor: RuleDescriptor, func: F) -> Self {
        Self { descriptor, func }
    }
}

impl<F> Rule for FnRule<F>
where
    F: Fn(&Ad) -> std::result::Result<RuleOutcome, RuleFault> + Send + Sync,
{
    fn descriptor(&self) -> RuleDescriptor {
        self.descriptor.clone()
    }

    fn evaluate(&self, ad: &Ad) -> std::result::Result<RuleOutcome, RuleFault> {
        (self.func)(ad)
    }
}

/// Build every built-in rule from configuration, in registry order.
///
/// # Errors
/// Returns `InvalidColor` if the brand palette contains an unparseable color.
pub fn builtin_rules(config: &Config) -> Result<Vec<Box<dyn Rule>>> {
    let palette = config
        .brand
        .palette
        .iter()
        .map(|c| Rgb::parse(c))
        .collect::<Result<Vec<_>>>()?;

    let a11y = &config.accessibility;
    Ok(vec![
        Box::new(BrandPaletteRule::new(palette)),
        Box::new(LogoPresenceRule),
        Box::new(PricePresenceRule),
        Box::new(DisclaimerRule::new(config.legal.required_phrases.clone())),
        Box::new(StrikethroughPriceRule),
        Box::new(ContrastRule::new(
            a11y.min_contrast_ratio,
            a11y.large_text_contrast_ratio,
            a11y.large_text_size,
        )),
        Box::new(FontSizeRule::new(a11y.min_font_size)),
        Box::new(CanvasBoundsRule::new(config.quality.bounds_tolerance)),
        Box::new(ImageResolutionRule::new(config.quality.max_upscale)),
    ])
}

/// Whether a built-in rule runs when the configuration does not say otherwise.
#[must_use]
pub fn enabled_by_default(id: &str, config: &Config) -> bool {
    match id {
        RULE_BRAND_LOGO => config.brand.require_logo,
        _ => true,
    }
}

pub(crate) fn ensure_known_rule(id: &str) -> Result<()> {
    if BUILTIN_RULE_IDS.contains(&id) {
        Ok(())
    } else {
        Err(AdComplianceError::UnknownRule(id.to_string()))
    }
}

/// Render up to a few offenders as `a, b, c (+N more)`.
pub(crate) fn summarize<I>(items: I) -> String
where
    I: IntoIterator<Item = String>,
{
    const SHOWN: usize = 3;
    let items: Vec<String> = items.into_iter().collect();
    let mut text = items
        .iter()
        .take(SHOWN)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if items.len() > SHOWN {
        text.push_str(&format!(" (+{} more)", items.len() - SHOWN));
    }
    text
}

pub(crate) fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
