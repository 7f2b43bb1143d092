pub mod check;
pub mod config;
pub mod init;
pub mod rules;

use std::path::Path;

use crate::config::{
    Config, ConfigLoader, FileConfigLoader, LoadResult, validate_config_semantics,
};
use crate::{AdComplianceError, Result};

pub use check::{collect_ad_files, determine_exit_code, load_ad, run_check, run_check_impl};
pub use config::{run_config, run_config_show_impl, run_config_validate_impl};
pub use init::{generate_config_template, run_init, run_init_impl};
pub use rules::{run_rules, run_rules_impl};

/// Load and validate the effective configuration.
///
/// `no_config` skips discovery entirely and uses defaults.
pub(crate) fn load_config(config_path: Option<&Path>, no_config: bool) -> Result<LoadResult> {
    if no_config {
        return Ok(LoadResult {
            config: Config::default(),
            source: None,
        });
    }

    let loader = FileConfigLoader::new();
    let loaded = config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))?;
    validate_config_semantics(&loaded.config)?;
    Ok(loaded)
}

pub(crate) fn print_error(error: &AdComplianceError) {
    eprintln!("Error [{}]: {error}", error.error_type());
    if let AdComplianceError::FileAccess { source, .. } = error {
        eprintln!("  Caused by: {source}");
    }
}
