use std::fmt::Write;

use crate::error::Result;
use crate::result::ComplianceCheck;
use crate::rules::Severity;

use super::{AdReport, OutputFormatter, Summary};

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    Always,
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RESET: &str = "\x1b[0m";
}

pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    /// With `verbose >= 1` passed checks and passing ads are listed too.
    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    const fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => ansi::RED,
            Severity::Warning => ansi::YELLOW,
            Severity::Info => ansi::CYAN,
        }
    }

    fn format_check(&self, check: &ComplianceCheck, output: &mut String) {
        if check.is_passed() {
            let mark = self.colorize("✓", ansi::GREEN);
            let _ = writeln!(output, "   {mark} {}: {}", check.id, check.message);
            return;
        }

        let severity = check.severity();
        let label = self.colorize(severity.as_str(), Self::severity_color(severity));
        let _ = writeln!(output, "   ✗ [{label}] {}: {}", check.id, check.message);
    }

    fn format_report(&self, report: &AdReport, output: &mut String) {
        let result = &report.result;
        let (icon, status) = if result.passed() {
            ("✓", self.colorize("PASSED", ansi::GREEN))
        } else {
            ("✗", self.colorize("FAILED", ansi::RED))
        };

        let _ = write!(output, "{icon} {status}: {}", report.path.display());
        if let Some(name) = &report.name {
            let _ = write!(output, " ({name})");
        }
        let _ = writeln!(output);
        let _ = writeln!(output, "   Score: {}/100", result.score());

        for check in result.checks() {
            if !check.is_passed() || self.verbose >= 1 {
                self.format_check(check, output);
            }
        }

        if !result.suggestions().is_empty() {
            let _ = writeln!(output, "   Suggestions:");
            for suggestion in result.suggestions() {
                let _ = writeln!(output, "     → {suggestion}");
            }
        }
    }

    fn format_summary(&self, summary: &Summary) -> String {
        let passed = self.colorize(&summary.passed.to_string(), ansi::GREEN);
        let failed = self.colorize(&summary.failed.to_string(), ansi::RED);
        format!(
            "Summary: {} ads checked, {passed} passed, {failed} failed, average score {}",
            summary.total, summary.average_score
        )
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, reports: &[AdReport]) -> Result<String> {
        let mut output = String::new();

        // Failing ads first, then ads with non-blocking findings
        let (failed, passed): (Vec<_>, Vec<_>) =
            reports.iter().partition(|r| !r.result.passed());
        for report in &failed {
            self.format_report(report, &mut output);
            output.push('\n');
        }
        for report in &passed {
            let has_findings = report.result.failed_checks().next().is_some();
            if has_findings || self.verbose >= 1 {
                self.format_report(report, &mut output);
                output.push('\n');
            }
        }

        output.push_str(&self.format_summary(&Summary::from_reports(reports)));
        output.push('\n');
        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
