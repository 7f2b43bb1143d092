use std::fs;

use crate::cli::InitArgs;
use crate::{AdComplianceError, EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

use super::print_error;

#[must_use]
pub fn run_init(args: &InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            print_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Initializes a new configuration file.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(AdComplianceError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, generate_config_template()).map_err(|source| {
        AdComplianceError::FileAccess {
            path: output_path.clone(),
            source,
        }
    })?;

    println!("Created configuration file: {}", output_path.display());
    Ok(())
}

#[must_use]
pub fn generate_config_template() -> String {
    r##"# ad-compliance configuration file
version = "1"

[brand]
# Approved colors for text, prices and shapes (#RGB or #RRGGBB).
# An empty list disables the palette check.
palette = ["#000000", "#FFFFFF", "#E4002B", "#00539F"]

# Require a logo element on every ad (enables the brand.logo rule)
require_logo = false

[legal]
# Phrases that must appear in the legal copy, matched case-insensitively
# required_phrases = ["terms apply"]
required_phrases = []

[accessibility]
# Smallest allowed font size in px
min_font_size = 12.0

# WCAG contrast ratio for body text and for large text
min_contrast_ratio = 4.5
large_text_contrast_ratio = 3.0

# Font size in px from which text counts as large
large_text_size = 24.0

[quality]
# Pixels an element may overhang the canvas edge
bounds_tolerance = 0.0

# Largest allowed upscale of an image beyond its native size
max_upscale = 1.0

# Score weight of each severity. The score is the weighted share of
# passing checks, 0-100.
[scoring]
error_weight = 3
warning_weight = 2
info_weight = 1

# Per-rule overrides, keyed by rule id (see `ad-compliance rules --all`)
# [rules."brand.palette"]
# enabled = true
# severity = "error"

# [rules."quality.image-resolution"]
# enabled = false
"##
    .to_string()
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
