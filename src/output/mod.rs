mod json;
mod sarif;
mod text;

use std::path::PathBuf;

pub use json::JsonFormatter;
pub use sarif::SarifFormatter;
pub use text::{ColorMode, TextFormatter};

use crate::error::Result;
use crate::result::ComplianceResult;

/// Evaluation of one ad file, ready for formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdReport {
    pub path: PathBuf,
    /// Display name taken from the ad itself, if any.
    pub name: Option<String>,
    pub result: ComplianceResult,
}

impl AdReport {
    #[must_use]
    pub const fn new(path: PathBuf, name: Option<String>, result: ComplianceResult) -> Self {
        Self { path, name, result }
    }
}

/// Totals across a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Rounded mean score; 100 when there are no reports.
    pub average_score: u8,
}

impl Summary {
    #[must_use]
    pub fn from_reports(reports: &[AdReport]) -> Self {
        let passed = reports.iter().filter(|r| r.result.passed()).count();
        let total_score: usize = reports.iter().map(|r| usize::from(r.result.score())).sum();
        let average_score = if reports.is_empty() {
            100
        } else {
            let mean = (2 * total_score + reports.len()) / (2 * reports.len());
            u8::try_from(mean).unwrap_or(100)
        };
        Self {
            total: reports.len(),
            passed,
            failed: reports.len() - passed,
            average_score,
        }
    }
}

/// Trait for formatting ad reports into various output formats.
pub trait OutputFormatter {
    /// Format the reports into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, reports: &[AdReport]) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Sarif,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "sarif" => Ok(Self::Sarif),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
