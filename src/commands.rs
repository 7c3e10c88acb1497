// src/commands.rs
//! Command handlers for the rc2sb CLI

use anyhow::{Context, Result, bail};
use rc2sb::{ConvertOptions, Converter, HandlerRegistry, verify_bundle};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Convert one RC directory and report what was written
pub fn cmd_convert(
    in_dir: &Path,
    out_dir: &Path,
    payload: Option<PathBuf>,
    usfm: Option<PathBuf>,
) -> Result<()> {
    let mut opts =
        ConvertOptions::default().with_project_callback(|id| debug!("relocated project {}", id));
    if let Some(dir) = payload {
        opts = opts.with_payload_path(dir);
    }
    if let Some(dir) = usfm {
        opts = opts.with_usfm_path(dir);
    }

    let result = Converter::with_builtins()
        .convert(in_dir, out_dir, &opts)
        .with_context(|| format!("Failed to convert {}", in_dir.display()))?;

    println!(
        "Converted {} ({}) with {} ingredients",
        result.subject, result.identifier, result.ingredients
    );
    Ok(())
}

/// Verify a bundle, failing if anything does not match
pub fn cmd_verify(dir: &Path) -> Result<()> {
    let report = verify_bundle(dir)
        .with_context(|| format!("Failed to read bundle at {}", dir.display()))?;

    if report.is_ok() {
        println!("[OK] {} ingredients verified", report.checked);
        return Ok(());
    }

    println!("[FAILED] {} of {} checks", report.problems.len(), report.checked);
    for problem in &report.problems {
        println!("  - {}", problem);
    }
    bail!("{} problem(s) found in {}", report.problems.len(), dir.display())
}

/// Print every supported subject, one per line
pub fn cmd_subjects() -> Result<()> {
    let subjects = HandlerRegistry::with_builtins().supported_subjects();
    info!("{} supported subjects", subjects.len());
    for subject in subjects {
        println!("{}", subject);
    }
    Ok(())
}
