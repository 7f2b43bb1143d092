//! Compliance scoring for retail ad compositions.
//!
//! An [`Ad`] snapshot is run through every rule in a [`RuleRegistry`] by the
//! [`Evaluator`], producing a [`ComplianceResult`] with one check per rule,
//! a weighted 0-100 score, a pass/fail verdict and deduplicated suggestions.

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod output;
pub mod result;
pub mod rules;

pub use engine::{Evaluate, EvaluationCache, Evaluator, evaluate_batch};
pub use error::{AdComplianceError, Result};
pub use model::{Ad, AdElement, ElementKind, Template};
pub use result::{CheckOutcome, ComplianceCheck, ComplianceResult, ScoringWeights};
pub use rules::{Rule, RuleDescriptor, RuleFault, RuleOutcome, RuleRegistry, Severity};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_COMPLIANCE_FAILED: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
mod test_fixtures;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
