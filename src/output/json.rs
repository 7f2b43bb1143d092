use serde::Serialize;

use crate::error::Result;
use crate::result::ComplianceResult;

use super::{AdReport, OutputFormatter, Summary};

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: JsonSummary,
    results: Vec<AdResult<'a>>,
}

#[derive(Serialize)]
struct JsonSummary {
    total_ads: usize,
    passed: usize,
    failed: usize,
    average_score: u8,
}

#[derive(Serialize)]
struct AdResult<'a> {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(flatten)]
    result: &'a ComplianceResult,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, reports: &[AdReport]) -> Result<String> {
        let summary = Summary::from_reports(reports);
        let output = JsonOutput {
            summary: JsonSummary {
                total_ads: summary.total,
                passed: summary.passed,
                failed: summary.failed,
                average_score: summary.average_score,
            },
            results: reports
                .iter()
                .map(|r| AdResult {
                    path: r.path.display().to_string(),
                    name: r.name.as_deref(),
                    result: &r.result,
                })
                .collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
