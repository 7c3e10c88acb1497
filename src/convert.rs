// src/convert.rs
//! RC to SB conversion entry point
//!
//! Loads the RC manifest, picks the handler for its subject, lets the
//! handler relocate the content, and writes `metadata.json` last. If any
//! step fails (or the conversion is cancelled) no metadata.json is written,
//! so a partial output directory is recognizably incomplete.

use crate::error::{Error, Result};
use crate::handler::{ConvertOptions, HandlerRegistry};
use crate::rc::Manifest;
use crate::sb::Metadata;
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of converting one RC directory
#[derive(Debug)]
pub struct ConversionResult {
    /// The manifest subject that selected the handler
    pub subject: String,
    /// The manifest identifier (e.g. "ult", "tn")
    pub identifier: String,
    /// Input RC directory
    pub in_dir: PathBuf,
    /// Output SB directory
    pub out_dir: PathBuf,
    /// Number of ingredients recorded in metadata.json
    pub ingredients: usize,
    /// The metadata that was written
    pub metadata: Metadata,
}

/// Converts RC directories using a fixed set of handlers
pub struct Converter {
    registry: HandlerRegistry,
}

impl Converter {
    /// Create a converter over the given registry
    pub fn new(registry: HandlerRegistry) -> Self {
        Self { registry }
    }

    /// Create a converter with every supported subject
    pub fn with_builtins() -> Self {
        Self::new(HandlerRegistry::with_builtins())
    }

    /// Convert the RC in `in_dir` into an SB in `out_dir`
    pub fn convert(
        &self,
        in_dir: &Path,
        out_dir: &Path,
        opts: &ConvertOptions,
    ) -> Result<ConversionResult> {
        opts.check_cancelled()?;

        let manifest = Manifest::load(in_dir)?;
        let subject = manifest.subject().to_string();
        let handler = self.registry.lookup(&subject)?;

        info!(
            "Converting {} ({}) from {}",
            subject,
            manifest.dublin_core.identifier,
            in_dir.display()
        );

        std::fs::create_dir_all(out_dir)
            .map_err(Error::io(format!("creating output directory {}", out_dir.display())))?;

        let metadata = handler
            .convert(&manifest, in_dir, out_dir, opts)
            .map_err(|e| match e {
                Error::Cancelled => Error::Cancelled,
                other => Error::Convert {
                    subject: subject.clone(),
                    source: Box::new(other),
                },
            })?;

        opts.check_cancelled()?;
        metadata.write_to_file(out_dir)?;

        info!(
            "Converted {} with {} ingredients to {}",
            subject,
            metadata.ingredients.len(),
            out_dir.display()
        );

        Ok(ConversionResult {
            identifier: manifest.dublin_core.identifier.clone(),
            in_dir: in_dir.to_path_buf(),
            out_dir: out_dir.to_path_buf(),
            ingredients: metadata.ingredients.len(),
            subject,
            metadata,
        })
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Convert with the built-in handlers
pub fn convert(in_dir: &Path, out_dir: &Path, opts: &ConvertOptions) -> Result<ConversionResult> {
    Converter::with_builtins().convert(in_dir, out_dir, opts)
}
