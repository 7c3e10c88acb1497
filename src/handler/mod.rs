// src/handler/mod.rs
//! Per-subject conversion handlers
//!
//! Each RC subject (content type) has a handler that knows where its content
//! lives in the RC, how files are renamed into `ingredients/`, and which SB
//! flavor describes it. Handlers are looked up by subject in a
//! [`HandlerRegistry`].

mod bible;
pub mod common;
mod obs;
mod obs_tsv;
pub mod payload;
pub mod registry;
mod ta;
mod tsv;
mod tw;

pub use bible::BibleHandler;
pub use obs::ObsHandler;
pub use obs_tsv::{ObsTsvHandler, ObsTsvVariant};
pub use registry::HandlerRegistry;
pub use ta::TaHandler;
pub use tsv::{TsvBookHandler, TsvKind};
pub use tw::TwHandler;

use crate::error::{Error, Result};
use crate::rc::Manifest;
use crate::sb::Metadata;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A converter for one RC subject
pub trait Handler: Send + Sync {
    /// The `dublin_core.subject` this handler converts
    fn subject(&self) -> &str;

    /// Relocate content from `in_dir` into `out_dir` and build the metadata
    ///
    /// The returned record is not yet written; the caller persists it.
    fn convert(
        &self,
        manifest: &Manifest,
        in_dir: &Path,
        out_dir: &Path,
        opts: &ConvertOptions,
    ) -> Result<Metadata>;
}

/// Called with a project identifier once that project has been relocated
pub type ProjectCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Options that apply to a single conversion
#[derive(Clone, Default)]
pub struct ConvertOptions {
    /// Translation Words checkout whose `bible/` directory becomes the
    /// TWL payload (default: auto-detect `<lang>_tw/` inside the RC)
    pub payload_path: Option<PathBuf>,
    /// Directory of USFM files used for localized book names
    pub usfm_path: Option<PathBuf>,
    /// Cancellation token for aborting the conversion
    pub cancel_token: Option<Arc<AtomicBool>>,
    /// Progress hook for per-project subjects
    pub on_project: Option<ProjectCallback>,
}

impl fmt::Debug for ConvertOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertOptions")
            .field("payload_path", &self.payload_path)
            .field("usfm_path", &self.usfm_path)
            .field("cancel_token", &self.cancel_token)
            .field("on_project", &self.on_project.is_some())
            .finish()
    }
}

impl ConvertOptions {
    /// Set the payload source directory
    pub fn with_payload_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.payload_path = Some(path.into());
        self
    }

    /// Set the USFM directory for localized names
    pub fn with_usfm_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.usfm_path = Some(path.into());
        self
    }

    /// Set cancellation token
    pub fn with_cancel_token(mut self, token: Arc<AtomicBool>) -> Self {
        self.cancel_token = Some(token);
        self
    }

    /// Set the per-project progress hook
    pub fn with_project_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_project = Some(Arc::new(callback));
        self
    }

    /// Report a relocated project to the progress hook, if any
    pub fn project_done(&self, identifier: &str) {
        if let Some(callback) = &self.on_project {
            callback(identifier);
        }
    }

    /// Check if cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token
            .as_ref()
            .map(|t| t.load(Ordering::Relaxed))
            .unwrap_or(false)
    }

    /// Fail with [`Error::Cancelled`] if cancellation was requested
    pub fn check_cancelled(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}
