// src/error.rs
//! Error types for RC to SB conversion

use std::path::PathBuf;
use thiserror::Error;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting an RC repository
#[derive(Error, Debug)]
pub enum Error {
    /// The input directory has no manifest.yaml
    #[error("not a valid Resource Container: manifest.yaml not found in {}", .0.display())]
    ManifestNotFound(PathBuf),

    /// manifest.yaml exists but could not be read
    #[error("reading manifest.yaml: {0}")]
    ManifestRead(#[source] std::io::Error),

    /// manifest.yaml is not valid YAML for the RC schema
    #[error("parsing manifest.yaml: {0}")]
    ManifestParse(#[from] serde_yaml::Error),

    /// No handler is registered for the manifest subject
    #[error("unsupported subject {subject:?}; supported subjects: {}", .supported.join(", "))]
    UnsupportedSubject {
        subject: String,
        supported: Vec<String>,
    },

    /// Conversion was cancelled through the cancel token
    #[error("conversion cancelled")]
    Cancelled,

    /// A filesystem operation failed
    #[error("{context}: {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },

    /// Walking a directory tree failed
    #[error("walking {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// A single-project subject was given a manifest without projects
    #[error("no projects found in manifest for {0}")]
    NoProjects(String),

    /// A handler failed; wraps the underlying error with the subject
    #[error("converting {subject}: {source}")]
    Convert {
        subject: String,
        source: Box<Error>,
    },

    /// metadata.json could not be serialized
    #[error("marshaling metadata.json: {0}")]
    MetadataSerialize(#[source] serde_json::Error),

    /// metadata.json could not be parsed (bundle verification)
    #[error("parsing metadata.json: {0}")]
    MetadataParse(#[source] serde_json::Error),
}

impl Error {
    /// Build a mapper that wraps an `io::Error` with a description of the
    /// operation and path that failed.
    pub fn io(context: impl Into<String>) -> impl FnOnce(std::io::Error) -> Self {
        let context = context.into();
        move |source| Self::Io { context, source }
    }

    /// Whether this error (or the error it wraps) is a cancellation
    pub fn is_cancelled(&self) -> bool {
        match self {
            Self::Cancelled => true,
            Self::Convert { source, .. } => source.is_cancelled(),
            _ => false,
        }
    }
}
