use serde::Serialize;

use crate::error::Result;
use crate::result::ComplianceCheck;
use crate::rules::{RuleDescriptor, Severity};

use super::{AdReport, OutputFormatter};

/// SARIF 2.1.0 output formatter for code scanning dashboards and CI tools.
///
/// Every failed check becomes a result located at the ad file. Passed checks
/// are omitted.
pub struct SarifFormatter {
    rules: Vec<RuleDescriptor>,
}

impl SarifFormatter {
    /// `rules` is the effective catalog; it becomes the driver's rule table.
    #[must_use]
    pub const fn new(rules: Vec<RuleDescriptor>) -> Self {
        Self { rules }
    }
}

const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";
const TOOL_NAME: &str = "ad-compliance";
const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
struct SarifLog<'a> {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<Run<'a>>,
}

#[derive(Serialize)]
struct Run<'a> {
    tool: Tool<'a>,
    results: Vec<SarifResult<'a>>,
}

#[derive(Serialize)]
struct Tool<'a> {
    driver: ToolDriver<'a>,
}

#[derive(Serialize)]
struct ToolDriver<'a> {
    name: &'static str,
    version: &'static str,
    rules: Vec<ReportingDescriptor<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportingDescriptor<'a> {
    id: &'a str,
    name: &'a str,
    short_description: MultiformatMessageString<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_description: Option<MultiformatMessageString<'a>>,
    default_configuration: ReportingConfiguration,
    properties: RuleProperties<'a>,
}

#[derive(Serialize)]
struct ReportingConfiguration {
    level: &'static str,
}

#[derive(Serialize)]
struct RuleProperties<'a> {
    category: &'a str,
}

#[derive(Serialize)]
struct MultiformatMessageString<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult<'a> {
    rule_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    rule_index: Option<usize>,
    level: &'static str,
    message: Message,
    locations: Vec<Location>,
    properties: ResultProperties<'a>,
}

#[derive(Serialize)]
struct Message {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    physical_location: PhysicalLocation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PhysicalLocation {
    artifact_location: ArtifactLocation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactLocation {
    uri: String,
    uri_base_id: &'static str,
}

#[derive(Serialize)]
struct ResultProperties<'a> {
    score: u8,
    category: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<&'a str>,
}

const fn level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "note",
    }
}

impl SarifFormatter {
    fn build_rules(&self) -> Vec<ReportingDescriptor<'_>> {
        self.rules
            .iter()
            .map(|rule| ReportingDescriptor {
                id: &rule.id,
                name: &rule.name,
                short_description: MultiformatMessageString { text: &rule.name },
                full_description: (!rule.description.is_empty()).then_some(
                    MultiformatMessageString {
                        text: &rule.description,
                    },
                ),
                default_configuration: ReportingConfiguration {
                    level: level(rule.severity),
                },
                properties: RuleProperties {
                    category: rule.category.as_str(),
                },
            })
            .collect()
    }

    fn convert_check<'a>(
        &self,
        report: &AdReport,
        check: &'a ComplianceCheck,
    ) -> Option<SarifResult<'a>> {
        if check.is_passed() {
            return None;
        }

        // Convert path to URI format (forward slashes)
        let uri = report.path.display().to_string().replace('\\', "/");

        Some(SarifResult {
            rule_id: &check.id,
            rule_index: self.rules.iter().position(|r| r.id == check.id),
            level: level(check.severity()),
            message: Message {
                text: check.message.clone(),
            },
            locations: vec![Location {
                physical_location: PhysicalLocation {
                    artifact_location: ArtifactLocation {
                        uri,
                        uri_base_id: "%SRCROOT%",
                    },
                },
            }],
            properties: ResultProperties {
                score: report.result.score(),
                category: check.category.as_str(),
                suggestion: check.suggestion(),
            },
        })
    }
}

impl OutputFormatter for SarifFormatter {
    fn format(&self, reports: &[AdReport]) -> Result<String> {
        let results: Vec<SarifResult<'_>> = reports
            .iter()
            .flat_map(|report| {
                report
                    .result
                    .checks()
                    .iter()
                    .filter_map(move |check| self.convert_check(report, check))
            })
            .collect();

        let log = SarifLog {
            schema: SARIF_SCHEMA,
            version: SARIF_VERSION,
            runs: vec![Run {
                tool: Tool {
                    driver: ToolDriver {
                        name: TOOL_NAME,
                        version: TOOL_VERSION,
                        rules: self.build_rules(),
                    },
                },
                results,
            }],
        };

        Ok(serde_json::to_string_pretty(&log)?)
    }
}

#[cfg(test)]
#[path = "sarif_tests.rs"]
mod tests;
