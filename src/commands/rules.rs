use std::fmt::Write as _;

use serde::Serialize;

use crate::cli::{Cli, ListFormat, RulesArgs};
use crate::rules::{CatalogEntry, Category, Severity, catalog};
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

use super::{load_config, print_error};

#[derive(Debug, Serialize)]
struct RuleRow<'a> {
    id: &'a str,
    name: &'a str,
    category: Category,
    severity: Severity,
    enabled: bool,
    description: &'a str,
}

impl<'a> From<&'a CatalogEntry> for RuleRow<'a> {
    fn from(entry: &'a CatalogEntry) -> Self {
        Self {
            id: &entry.descriptor.id,
            name: &entry.descriptor.name,
            category: entry.descriptor.category,
            severity: entry.descriptor.severity,
            enabled: entry.enabled,
            description: &entry.descriptor.description,
        }
    }
}

#[must_use]
pub fn run_rules(args: &RulesArgs, cli: &Cli) -> i32 {
    match run_rules_impl(args, cli) {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => {
            print_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Render the effective rule catalog.
///
/// Rules switched off by configuration are listed only with `--all`.
///
/// # Errors
/// Returns an error if the configuration cannot be loaded or is invalid.
pub fn run_rules_impl(args: &RulesArgs, cli: &Cli) -> Result<String> {
    let loaded = load_config(args.config.as_deref(), cli.no_config)?;
    let entries: Vec<CatalogEntry> = catalog(&loaded.config)?
        .into_iter()
        .filter(|entry| args.all || entry.enabled)
        .collect();

    match args.format {
        ListFormat::Text => Ok(format_text(&entries)),
        ListFormat::Json => {
            let rows: Vec<RuleRow<'_>> = entries.iter().map(RuleRow::from).collect();
            let mut json = serde_json::to_string_pretty(&rows)?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn format_text(entries: &[CatalogEntry]) -> String {
    let id_width = entries
        .iter()
        .map(|e| e.descriptor.id.len())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for entry in entries {
        let d = &entry.descriptor;
        let _ = write!(
            output,
            "{:<id_width$}  {:<7}  {:<13}  {}",
            d.id,
            d.severity.as_str(),
            d.category.as_str(),
            d.name
        );
        if !entry.enabled {
            output.push_str(" (disabled)");
        }
        output.push('\n');
    }

    let enabled = entries.iter().filter(|e| e.enabled).count();
    let _ = writeln!(output, "\n{enabled} of {} rules enabled", entries.len());
    output
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
