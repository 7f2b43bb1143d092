use std::path::Path;

use crate::cli::{Cli, ConfigAction, ConfigArgs, ListFormat};
use crate::config::{ConfigLoader, FileConfigLoader, validate_config_semantics};
use crate::{AdComplianceError, EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

use super::{load_config, print_error};

#[must_use]
pub fn run_config(args: &ConfigArgs, cli: &Cli) -> i32 {
    match &args.action {
        ConfigAction::Validate { config } => run_config_validate(config),
        ConfigAction::Show { config, format } => run_config_show(config.as_deref(), *format, cli),
    }
}

fn run_config_validate(config_path: &Path) -> i32 {
    match run_config_validate_impl(config_path) {
        Ok(()) => {
            println!("Configuration is valid: {}", config_path.display());
            EXIT_SUCCESS
        }
        Err(e) => {
            print_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Validates a configuration file.
///
/// # Errors
/// Returns an error if the file doesn't exist, contains invalid TOML, has an
/// unsupported version, or has semantic errors.
pub fn run_config_validate_impl(config_path: &Path) -> Result<()> {
    let loaded = FileConfigLoader::new().load_from_path(config_path)?;
    validate_config_semantics(&loaded.config)
}

fn run_config_show(config_path: Option<&Path>, format: ListFormat, cli: &Cli) -> i32 {
    match run_config_show_impl(config_path, format, cli) {
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

/// Render the effective configuration after discovery and defaults.
///
/// # Errors
/// Returns an error if the configuration cannot be loaded, is invalid, or
/// cannot be serialized.
pub fn run_config_show_impl(
    config_path: Option<&Path>,
    format: ListFormat,
    cli: &Cli,
) -> Result<String> {
    let loaded = load_config(config_path, cli.no_config)?;

    match format {
        ListFormat::Text => {
            let source = loaded
                .source
                .as_ref()
                .map_or_else(|| "defaults".to_string(), |p| p.display().to_string());
            let body = toml::to_string_pretty(&loaded.config)
                .map_err(|e| AdComplianceError::Config(e.to_string()))?;
            Ok(format!("# Effective configuration (source: {source})\n\n{body}"))
        }
        ListFormat::Json => {
            let mut json = serde_json::to_string_pretty(&loaded.config)?;
            json.push('\n');
            Ok(json)
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
