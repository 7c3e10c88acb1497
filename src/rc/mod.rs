// src/rc/mod.rs
//! Resource Container (RC) input format
//!
//! An RC is a directory with a `manifest.yaml` describing the content
//! (Dublin Core metadata plus a list of projects) and the content files
//! the projects point at.

pub mod manifest;

pub use manifest::{Checking, DublinCore, Language, Manifest, Project, Source, MANIFEST_FILE};
