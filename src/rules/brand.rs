use crate::model::{Ad, ElementKind, Rgb};

use super::{
    Category, RULE_BRAND_LOGO, RULE_BRAND_PALETTE, Rule, RuleDescriptor, RuleFault, RuleOutcome,
    Severity, plural, summarize,
};

/// Every text, price and shape color must come from the approved palette.
#[derive(Debug, Clone)]
pub struct BrandPaletteRule {
    palette: Vec<Rgb>,
}

impl BrandPaletteRule {
    #[must_use]
    pub const fn new(palette: Vec<Rgb>) -> Self {
        Self { palette }
    }

    fn palette_text(&self) -> String {
        self.palette
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Colors an element paints with, labelled by the property they come from.
fn painted_colors(kind: &ElementKind) -> Vec<(&'static str, &str)> {
    match kind {
        ElementKind::Text(props) => vec![("color", props.color.as_str())],
        ElementKind::Price(props) => props
            .color
            .as_deref()
            .map(|c| vec![("color", c)])
            .unwrap_or_default(),
        ElementKind::Shape(props) => [("fill", &props.fill), ("stroke", &props.stroke)]
            .into_iter()
            .filter_map(|(field, value)| value.as_deref().map(|c| (field, c)))
            .collect(),
        ElementKind::Image(_)
        | ElementKind::Product(_)
        | ElementKind::Logo(_)
        | ElementKind::Unknown { .. } => Vec::new(),
    }
}

impl Rule for BrandPaletteRule {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor::new(
            RULE_BRAND_PALETTE,
            "Brand color palette",
            Category::Brand,
            Severity::Warning,
        )
        .with_description("Text, price and shape colors must come from the approved brand palette.")
    }

    fn evaluate(&self, ad: &Ad) -> Result<RuleOutcome, RuleFault> {
        if self.palette.is_empty() {
            return Ok(RuleOutcome::pass(
                "No brand palette configured; color usage is unrestricted",
            ));
        }

        let mut checked = 0usize;
        let mut offenders = Vec::new();
        for element in &ad.elements {
            for (field, raw) in painted_colors(&element.kind) {
                checked += 1;
                match Rgb::parse(raw) {
                    Ok(color) if self.palette.contains(&color) => {}
                    Ok(color) => offenders.push(format!("{} {field} {color}", element.id)),
                    Err(_) => offenders.push(format!("{} {field} '{raw}'", element.id)),
                }
            }
        }

        if offenders.is_empty() {
            return Ok(RuleOutcome::pass(if checked == 0 {
                "No colored elements to check".to_string()
            } else {
                format!(
                    "All {} use approved brand colors",
                    plural(checked, "color", "colors")
                )
            }));
        }

        Ok(RuleOutcome::fail(format!(
            "{} outside the brand palette: {}",
            plural(offenders.len(), "color is", "colors are"),
            summarize(offenders)
        ))
        .with_suggestion(format!(
            "Use approved brand colors only ({})",
            self.palette_text()
        )))
    }

    fn parameters(&self) -> String {
        self.palette_text()
    }
}

/// The composition carries the brand logo.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogoPresenceRule;

impl Rule for LogoPresenceRule {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor::new(RULE_BRAND_LOGO, "Brand logo", Category::Brand, Severity::Info)
            .with_description("The ad should include a logo element.")
    }

    fn evaluate(&self, ad: &Ad) -> Result<RuleOutcome, RuleFault> {
        let logos = ad
            .elements
            .iter()
            .filter(|e| matches!(e.kind, ElementKind::Logo(_)))
            .count();

        if logos == 0 {
            Ok(RuleOutcome::fail("No logo element found")
                .with_suggestion("Add the brand logo to the composition"))
        } else {
            Ok(RuleOutcome::pass(format!(
                "Found {}",
                plural(logos, "logo element", "logo elements")
            )))
        }
    }
}

#[cfg(test)]
#[path = "brand_tests.rs"]
mod tests;
