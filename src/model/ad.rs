use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::color::{DEFAULT_BACKGROUND, Rgb};
use super::element::{AdElement, Rect};
use crate::{AdComplianceError, Result};

/// Banner format the ad is composed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Template {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            category: None,
            name: None,
        }
    }

    #[must_use]
    pub fn canvas(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Snapshot of an ad composition handed to the evaluator.
///
/// `elements` is required on the wire: a missing or `null` list is an input
/// error, never an empty ad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ad {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub template: Template,
    /// Canvas background as a hex color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    pub elements: Vec<AdElement>,
}

impl Ad {
    #[must_use]
    pub const fn new(template: Template, elements: Vec<AdElement>) -> Self {
        Self {
            id: None,
            name: None,
            template,
            background: None,
            elements,
        }
    }

    #[must_use]
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    /// Parse an ad from its JSON wire form.
    ///
    /// # Errors
    /// Returns `InvalidAd` if the JSON does not describe an ad.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| AdComplianceError::InvalidAd(e.to_string()))
    }

    /// Canvas background, falling back to white when unset or unparseable.
    #[must_use]
    pub fn background_color(&self) -> Rgb {
        self.background
            .as_deref()
            .and_then(|c| Rgb::parse(c).ok())
            .unwrap_or(DEFAULT_BACKGROUND)
    }

    /// Structural checks that must hold before any rule runs.
    ///
    /// Style problems (bad colors, tiny fonts) are not structural; rules report those.
    ///
    /// # Errors
    /// Returns `InvalidAd` describing the first structural problem found.
    pub fn validate(&self) -> Result<()> {
        if self.template.width == 0 || self.template.height == 0 {
            return Err(AdComplianceError::InvalidAd(format!(
                "template size must be positive, got {}x{}",
                self.template.width, self.template.height
            )));
        }

        let mut seen = HashSet::with_capacity(self.elements.len());
        for element in &self.elements {
            if element.id.is_empty() {
                return Err(AdComplianceError::InvalidAd(
                    "element id cannot be empty".to_string(),
                ));
            }
            if !seen.insert(element.id.as_str()) {
                return Err(AdComplianceError::InvalidAd(format!(
                    "duplicate element id '{}'",
                    element.id
                )));
            }
            if !element.geometry.is_finite() {
                return Err(AdComplianceError::InvalidAd(format!(
                    "element '{}' has non-finite geometry",
                    element.id
                )));
            }
            if element.geometry.width < 0.0 || element.geometry.height < 0.0 {
                return Err(AdComplianceError::InvalidAd(format!(
                    "element '{}' has negative size",
                    element.id
                )));
            }
            if !(0.0..=1.0).contains(&element.opacity) {
                return Err(AdComplianceError::InvalidAd(format!(
                    "element '{}' opacity must be between 0 and 1, got {}",
                    element.id, element.opacity
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "ad_tests.rs"]
mod tests;
