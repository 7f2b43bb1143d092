use crate::model::{Ad, ElementKind, TextRole};

use super::{
    Category, RULE_LEGAL_DISCLAIMER, RULE_LEGAL_PRICE, RULE_LEGAL_STRIKETHROUGH, Rule,
    RuleDescriptor, RuleFault, RuleOutcome, Severity, plural, summarize,
};

/// The offer states a price, either as a price element or a priced product card.
#[derive(Debug, Clone, Copy, Default)]
pub struct PricePresenceRule;

impl Rule for PricePresenceRule {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor::new(RULE_LEGAL_PRICE, "Price shown", Category::Legal, Severity::Error)
            .with_description("A retail ad must show a price element or a product with a price.")
    }

    fn evaluate(&self, ad: &Ad) -> Result<RuleOutcome, RuleFault> {
        let priced = ad
            .elements
            .iter()
            .filter(|e| match &e.kind {
                ElementKind::Price(_) => true,
                ElementKind::Product(p) => p.price.is_some(),
                _ => false,
            })
            .count();

        if priced == 0 {
            return Ok(RuleOutcome::fail("No price element found")
                .with_suggestion("Add a price element so the offer price is visible"));
        }
        Ok(RuleOutcome::pass(format!(
            "Found {}",
            plural(priced, "priced element", "priced elements")
        )))
    }
}

/// Legal text exists and contains every required phrase.
#[derive(Debug, Clone, Default)]
pub struct DisclaimerRule {
    required_phrases: Vec<String>,
}

impl DisclaimerRule {
    #[must_use]
    pub const fn new(required_phrases: Vec<String>) -> Self {
        Self { required_phrases }
    }
}

/// Text that counts as legal copy: `legal` text elements and price disclaimers.
fn legal_copy(ad: &Ad) -> Vec<&str> {
    ad.elements
        .iter()
        .filter_map(|e| match &e.kind {
            ElementKind::Text(t) if t.role == TextRole::Legal => Some(t.content.as_str()),
            ElementKind::Price(p) => p.disclaimer.as_deref(),
            _ => None,
        })
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

impl Rule for DisclaimerRule {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor::new(
            RULE_LEGAL_DISCLAIMER,
            "Legal disclaimer",
            Category::Legal,
            Severity::Error,
        )
        .with_description(
            "The ad must carry legal text (a legal text element or a price disclaimer) \
             containing every required phrase.",
        )
    }

    fn evaluate(&self, ad: &Ad) -> Result<RuleOutcome, RuleFault> {
        let copy = legal_copy(ad);
        if copy.is_empty() {
            return Ok(RuleOutcome::fail("No legal disclaimer text found").with_suggestion(
                "Add legal disclaimer text, either as a legal text element or a price disclaimer",
            ));
        }

        let haystack = copy.join("\n").to_lowercase();
        let missing: Vec<String> = self
            .required_phrases
            .iter()
            .filter(|phrase| !haystack.contains(&phrase.to_lowercase()))
            .map(|phrase| format!("\"{phrase}\""))
            .collect();

        if missing.is_empty() {
            return Ok(RuleOutcome::pass(format!(
                "Legal text present in {}",
                plural(copy.len(), "place", "places")
            )));
        }

        Ok(RuleOutcome::fail(format!(
            "Legal text is missing {}: {}",
            plural(missing.len(), "required phrase", "required phrases"),
            summarize(missing.clone())
        ))
        .with_suggestion(format!(
            "Include the required legal phrases: {}",
            missing.join(", ")
        )))
    }

    fn parameters(&self) -> String {
        self.required_phrases.join("\u{1f}")
    }
}

/// A struck-through "was" price must be higher than the current price.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrikethroughPriceRule;

impl Rule for StrikethroughPriceRule {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor::new(
            RULE_LEGAL_STRIKETHROUGH,
            "Reference price",
            Category::Legal,
            Severity::Error,
        )
        .with_description(
            "Prices must not be negative and a \"was\" price must exceed the current price.",
        )
    }

    fn evaluate(&self, ad: &Ad) -> Result<RuleOutcome, RuleFault> {
        let mut offenders = Vec::new();
        let mut checked = 0usize;
        for element in &ad.elements {
            let ElementKind::Price(price) = &element.kind else {
                continue;
            };
            checked += 1;
            if price.amount < 0.0 {
                offenders.push(format!("{} has a negative price", element.id));
            }
            if let Some(original) = price.original_amount
                && original <= price.amount
            {
                offenders.push(format!(
                    "{} was {original:.2} is not above {:.2}",
                    element.id, price.amount
                ));
            }
        }

        if offenders.is_empty() {
            return Ok(RuleOutcome::pass(if checked == 0 {
                "No prices to check".to_string()
            } else {
                format!("{} valid", plural(checked, "price is", "prices are"))
            }));
        }

        Ok(RuleOutcome::fail(format!(
            "Misleading pricing: {}",
            summarize(offenders)
        ))
        .with_suggestion(
            "Only show a reference price that is higher than the current, non-negative price",
        ))
    }
}

#[cfg(test)]
#[path = "legal_tests.rs"]
mod tests;
