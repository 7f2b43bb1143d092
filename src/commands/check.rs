use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use indexmap::IndexSet;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::cli::{CheckArgs, Cli};
use crate::engine::{EvaluationCache, Evaluator, evaluate_batch};
use crate::model::Ad;
use crate::output::{
    AdReport, ColorMode, JsonFormatter, OutputFormat, OutputFormatter, SarifFormatter,
    TextFormatter,
};
use crate::rules::RuleDescriptor;
use crate::{AdComplianceError, EXIT_COMPLIANCE_FAILED, EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

use super::{load_config, print_error};

const AD_EXTENSION: &str = "json";

/// Directory names never descended into while walking.
const SKIPPED_DIRS: &[&str] = &["node_modules", "target"];

#[must_use]
pub fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            print_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Evaluate every ad under `args.paths` and write the report.
///
/// # Errors
/// Returns an error if configuration is invalid, a path cannot be read, an
/// ad file is malformed, or the report cannot be written.
pub fn run_check_impl(args: &CheckArgs, cli: &Cli) -> Result<i32> {
    let loaded = load_config(args.config.as_deref(), cli.no_config)?;
    let evaluator = Evaluator::from_config(&loaded.config)?;
    let descriptors: Vec<RuleDescriptor> = evaluator.registry().descriptors().cloned().collect();

    let files = collect_ad_files(&args.paths)?;
    info!(files = files.len(), rules = descriptors.len(), "checking ads");

    let ads = files
        .par_iter()
        .map(|path| load_ad(path))
        .collect::<Result<Vec<Ad>>>()?;

    let results = if args.no_cache {
        evaluate_batch(&evaluator, &ads)
    } else {
        let cache = EvaluationCache::new(evaluator);
        let results = evaluate_batch(&cache, &ads);
        debug!(entries = cache.len(), ads = ads.len(), "evaluation cache");
        results
    };

    let reports = files
        .into_iter()
        .zip(ads)
        .zip(results)
        .map(|((path, ad), result)| result.map(|r| AdReport::new(path, ad.name, r)))
        .collect::<Result<Vec<_>>>()?;

    let output = format_reports(
        args.format,
        &reports,
        descriptors,
        ColorMode::from(cli.color),
        cli.verbose,
    )?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    Ok(determine_exit_code(&reports, args.strict, args.min_score))
}

/// Ad files under `paths` in a stable order.
///
/// Files are taken as given. Directories are walked for `*.json`, honoring
/// `.gitignore` and `.ignore` files, skipping hidden entries and dependency or
/// build directories, and skipping JSON documents that are not ads. A path
/// that does not exist is an error.
///
/// # Errors
/// Returns `FileAccess` for a missing path or an unreadable directory entry.
pub fn collect_ad_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = IndexSet::new();
    for path in paths {
        if path.is_file() {
            files.insert(path.clone());
            continue;
        }
        if !path.is_dir() {
            return Err(AdComplianceError::FileAccess {
                path: path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
            });
        }

        let walker = WalkBuilder::new(path)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .require_git(false)
            .parents(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e))
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| AdComplianceError::FileAccess {
                path: path.clone(),
                source: std::io::Error::other(e),
            })?;
            let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
            if !is_file || !has_ad_extension(entry.path()) {
                continue;
            }
            if is_ad_document(entry.path()) {
                files.insert(entry.into_path());
            } else {
                debug!(path = %entry.path().display(), "skipping non-ad JSON file");
            }
        }
    }
    Ok(files.into_iter().collect())
}

fn is_skipped_dir(entry: &ignore::DirEntry) -> bool {
    entry.file_type().is_some_and(|ft| ft.is_dir())
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

/// False only for well-formed JSON that is not an object with a `template`.
///
/// Unreadable or malformed files are kept so loading reports them.
fn is_ad_document(path: &Path) -> bool {
    let Ok(content) = fs::read_to_string(path) else {
        return true;
    };
    match serde_json::from_str::<serde_json::Value>(&content) {
        Ok(value) => value.get("template").is_some(),
        Err(_) => true,
    }
}

fn has_ad_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(AD_EXTENSION))
}

/// Read, parse and structurally validate one ad file.
///
/// # Errors
/// Returns `FileAccess` if the file cannot be read, or `InvalidAd` naming
/// the file if it is malformed.
pub fn load_ad(path: &Path) -> Result<Ad> {
    let content = fs::read_to_string(path).map_err(|source| AdComplianceError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    let with_path = |e: AdComplianceError| match e {
        AdComplianceError::InvalidAd(msg) => {
            AdComplianceError::InvalidAd(format!("{}: {msg}", path.display()))
        }
        other => other,
    };
    let ad = Ad::from_json(&content).map_err(with_path)?;
    ad.validate().map_err(with_path)?;
    Ok(ad)
}

fn format_reports(
    format: OutputFormat,
    reports: &[AdReport],
    descriptors: Vec<RuleDescriptor>,
    color_mode: ColorMode,
    verbose: u8,
) -> Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::with_verbose(color_mode, verbose).format(reports),
        OutputFormat::Json => JsonFormatter.format(reports),
        OutputFormat::Sarif => SarifFormatter::new(descriptors).format(reports),
    }
}

fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> Result<()> {
    if let Some(path) = output_path {
        fs::write(path, content).map_err(|source| AdComplianceError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        if !quiet {
            eprintln!("Report written to: {}", path.display());
        }
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

/// Exit code for a finished run.
///
/// - any ad with a failed `error` check fails the run
/// - `strict`: any failed check fails the run
/// - `min_score`: any ad scoring below it fails the run
#[must_use]
pub fn determine_exit_code(reports: &[AdReport], strict: bool, min_score: Option<u8>) -> i32 {
    let blocked = reports.iter().any(|r| !r.result.passed());
    let strict_failed =
        strict && reports.iter().any(|r| r.result.failed_checks().next().is_some());
    let below_min = min_score.is_some_and(|min| reports.iter().any(|r| r.result.score() < min));

    if blocked || strict_failed || below_min {
        EXIT_COMPLIANCE_FAILED
    } else {
        EXIT_SUCCESS
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
