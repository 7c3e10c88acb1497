// src/lib.rs

//! Resource Container to Scripture Burrito conversion
//!
//! Converts an unfoldingWord Resource Container (RC) repository, identified by
//! its `manifest.yaml`, into a Scripture Burrito (SB) bundle: a relocated
//! `ingredients/` tree plus a `metadata.json` describing every file.
//!
//! # Architecture
//!
//! - `rc`: manifest model and lenient YAML loading
//! - `sb`: metadata.json model, ingredient records, shared builders
//! - `handler`: one strategy per RC subject, dispatched through a registry
//! - `names`: localized book names from USFM markup and project titles
//! - `verify`: re-checks a finished bundle against its metadata.json
//!
//! ```no_run
//! use rc2sb::{ConvertOptions, convert};
//! use std::path::Path;
//!
//! let result = convert(Path::new("en_ult"), Path::new("out"), &ConvertOptions::default())?;
//! println!("{} ingredients", result.ingredients);
//! # Ok::<(), rc2sb::Error>(())
//! ```

pub mod books;
pub mod convert;
mod error;
pub mod handler;
pub mod hash;
pub mod names;
pub mod rc;
pub mod sb;
pub mod verify;

pub use convert::{ConversionResult, Converter, convert};
pub use error::{Error, Result};
pub use handler::{ConvertOptions, Handler, HandlerRegistry};
pub use rc::Manifest;
pub use sb::Metadata;
pub use verify::{VerifyProblem, VerifyReport, verify_bundle};
