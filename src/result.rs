use indexmap::IndexSet;
use serde::{Deserialize, Serialize, Serializer};

use crate::rules::{Category, Severity};

/// Relative weight each severity carries in the score.
///
/// The score counts a rule's weight whether it passed or failed, so a failing
/// `error` rule costs more points than a failing `warning` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(default = "default_error_weight", rename = "error_weight")]
    pub error: u32,
    #[serde(default = "default_warning_weight", rename = "warning_weight")]
    pub warning: u32,
    #[serde(default = "default_info_weight", rename = "info_weight")]
    pub info: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            error: default_error_weight(),
            warning: default_warning_weight(),
            info: default_info_weight(),
        }
    }
}

const fn default_error_weight() -> u32 {
    3
}

const fn default_warning_weight() -> u32 {
    2
}

const fn default_info_weight() -> u32 {
    1
}

impl ScoringWeights {
    #[must_use]
    pub const fn weight(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }

    /// `round(100 * passed weight / total weight)`, half rounding up.
    ///
    /// Takes `(rule severity, passed)` per check. No checks scores 100.
    #[must_use]
    pub fn score<I>(&self, checks: I) -> u8
    where
        I: IntoIterator<Item = (Severity, bool)>,
    {
        let (passed, total) = checks
            .into_iter()
            .fold((0u64, 0u64), |(passed, total), (severity, ok)| {
                let w = u64::from(self.weight(severity));
                (if ok { passed + w } else { passed }, total + w)
            });

        if total == 0 {
            return 100;
        }
        let rounded = (200 * passed + total) / (2 * total);
        u8::try_from(rounded.min(100)).unwrap_or(100)
    }
}

/// Verdict of one check. Severity and suggestion only exist on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed,
    Failed {
        severity: Severity,
        suggestion: Option<String>,
    },
}

/// One rule's verdict against one ad snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceCheck {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub message: String,
    pub outcome: CheckOutcome,
}

impl ComplianceCheck {
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self.outcome, CheckOutcome::Passed)
    }

    /// Severity as displayed: a passed check is always informational.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self.outcome {
            CheckOutcome::Passed => Severity::Info,
            CheckOutcome::Failed { severity, .. } => severity,
        }
    }

    #[must_use]
    pub fn suggestion(&self) -> Option<&str> {
        match &self.outcome {
            CheckOutcome::Passed => None,
            CheckOutcome::Failed { suggestion, .. } => suggestion.as_deref(),
        }
    }

    /// A failed check that blocks the overall verdict.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(
            self.outcome,
            CheckOutcome::Failed {
                severity: Severity::Error,
                ..
            }
        )
    }
}

#[derive(Serialize)]
struct WireCheck<'a> {
    id: &'a str,
    name: &'a str,
    category: Category,
    passed: bool,
    message: &'a str,
    severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<&'a str>,
}

impl Serialize for ComplianceCheck {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireCheck {
            id: &self.id,
            name: &self.name,
            category: self.category,
            passed: self.is_passed(),
            message: &self.message,
            severity: self.severity(),
            suggestion: self.suggestion(),
        }
        .serialize(serializer)
    }
}

/// Complete output of one evaluation.
///
/// `passed` and `suggestions` are derived from `checks` at construction and
/// cannot be set independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceResult {
    score: u8,
    passed: bool,
    checks: Vec<ComplianceCheck>,
    suggestions: Vec<String>,
}

impl ComplianceResult {
    pub(crate) fn assemble(score: u8, checks: Vec<ComplianceCheck>) -> Self {
        let passed = !checks.iter().any(ComplianceCheck::is_blocking);
        let suggestions: IndexSet<String> = checks
            .iter()
            .filter_map(ComplianceCheck::suggestion)
            .map(String::from)
            .collect();

        Self {
            score: score.min(100),
            passed,
            checks,
            suggestions: suggestions.into_iter().collect(),
        }
    }

    /// Weighted pass ratio in `[0, 100]`.
    #[must_use]
    pub const fn score(&self) -> u8 {
        self.score
    }

    /// True iff no error-severity check failed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.passed
    }

    #[must_use]
    pub fn checks(&self) -> &[ComplianceCheck] {
        &self.checks
    }

    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    #[must_use]
    pub fn check(&self, id: &str) -> Option<&ComplianceCheck> {
        self.checks.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn failed_checks(&self) -> impl Iterator<Item = &ComplianceCheck> {
        self.checks.iter().filter(|c| !c.is_passed())
    }

    /// Count of failed checks at `severity`.
    #[must_use]
    pub fn failures_at(&self, severity: Severity) -> usize {
        self.failed_checks()
            .filter(|c| c.severity() == severity)
            .count()
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
