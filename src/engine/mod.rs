//! Runs a rule registry over an ad and folds the verdicts into a result.

mod cache;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::Result;
use crate::config::Config;
use crate::model::Ad;
use crate::result::{CheckOutcome, ComplianceCheck, ComplianceResult, ScoringWeights};
use crate::rules::{Rule, RuleDescriptor, RuleOutcome, RuleRegistry, Severity};

pub use cache::{DEFAULT_MAX_ENTRIES, EvaluationCache};

/// Anything that turns an ad into a compliance result.
pub trait Evaluate: Sync {
    /// # Errors
    /// Returns `InvalidAd` if the ad is structurally invalid.
    fn evaluate(&self, ad: &Ad) -> Result<ComplianceResult>;
}

/// Stateless evaluator over a fixed registry.
#[derive(Debug)]
pub struct Evaluator {
    registry: RuleRegistry,
    weights: ScoringWeights,
}

impl Evaluator {
    #[must_use]
    pub const fn new(registry: RuleRegistry, weights: ScoringWeights) -> Self {
        Self { registry, weights }
    }

    /// Evaluator over the built-in rules as configured.
    ///
    /// # Errors
    /// Propagates registry construction errors.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(RuleRegistry::standard(config)?, config.scoring))
    }

    #[must_use]
    pub const fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn weights(&self) -> ScoringWeights {
        self.weights
    }

    /// Validate the ad, then run every registered rule once.
    ///
    /// A rule that faults or panics is recorded as a failed `error` check;
    /// the remaining rules still run.
    ///
    /// # Errors
    /// Returns `InvalidAd` if the ad is structurally invalid.
    pub fn evaluate(&self, ad: &Ad) -> Result<ComplianceResult> {
        ad.validate()?;
        Ok(self.evaluate_validated(ad))
    }

    pub(crate) fn evaluate_validated(&self, ad: &Ad) -> ComplianceResult {
        let checks: Vec<ComplianceCheck> = self
            .registry
            .iter()
            .map(|(descriptor, rule)| run_rule(descriptor, rule, ad))
            .collect();

        let score = self.weights.score(
            self.registry
                .descriptors()
                .zip(&checks)
                .map(|(descriptor, check)| (descriptor.severity, check.is_passed())),
        );
        let result = ComplianceResult::assemble(score, checks);

        debug!(
            ad = ad.id.as_deref().unwrap_or("-"),
            elements = ad.elements.len(),
            score = result.score(),
            passed = result.passed(),
            failed = result.failed_checks().count(),
            "evaluated ad"
        );
        result
    }
}

impl Evaluate for Evaluator {
    fn evaluate(&self, ad: &Ad) -> Result<ComplianceResult> {
        Self::evaluate(self, ad)
    }
}

/// Evaluate many ads in parallel. Results are returned in input order.
pub fn evaluate_batch<E>(engine: &E, ads: &[Ad]) -> Vec<Result<ComplianceResult>>
where
    E: Evaluate + ?Sized,
{
    ads.par_iter().map(|ad| engine.evaluate(ad)).collect()
}

fn run_rule(descriptor: &RuleDescriptor, rule: &dyn Rule, ad: &Ad) -> ComplianceCheck {
    let (message, outcome) = match panic::catch_unwind(AssertUnwindSafe(|| rule.evaluate(ad))) {
        Ok(Ok(RuleOutcome::Pass { message })) => (message, CheckOutcome::Passed),
        Ok(Ok(RuleOutcome::Fail {
            message,
            suggestion,
        })) => (
            message,
            CheckOutcome::Failed {
                severity: descriptor.severity,
                suggestion,
            },
        ),
        Ok(Err(fault)) => {
            warn!(rule = %descriptor.id, error = %fault, "rule could not be evaluated");
            (
                format!("Rule '{}' could not be evaluated: {fault}", descriptor.id),
                fault_outcome(),
            )
        }
        Err(payload) => {
            let reason = panic_reason(payload.as_ref());
            warn!(rule = %descriptor.id, reason = %reason, "rule panicked");
            (
                format!("Rule '{}' failed unexpectedly: {reason}", descriptor.id),
                fault_outcome(),
            )
        }
    };

    ComplianceCheck {
        id: descriptor.id.clone(),
        name: descriptor.name.clone(),
        category: descriptor.category,
        message,
        outcome,
    }
}

const fn fault_outcome() -> CheckOutcome {
    CheckOutcome::Failed {
        severity: Severity::Error,
        suggestion: None,
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
