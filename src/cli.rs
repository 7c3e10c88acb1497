// src/cli.rs
//! CLI definitions for rc2sb
//!
//! The command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rc2sb")]
#[command(author = "rc2sb Contributors")]
#[command(version)]
#[command(about = "Convert Resource Container repositories to Scripture Burrito bundles", long_about = None)]
pub struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert an RC directory into an SB directory
    Convert {
        /// RC directory containing manifest.yaml
        in_dir: PathBuf,

        /// Output directory for the SB bundle
        out_dir: PathBuf,

        /// Translation Words checkout used to bundle articles with TWL
        #[arg(long, value_name = "DIR")]
        payload: Option<PathBuf>,

        /// Directory of USFM files used for localized book names
        #[arg(long, value_name = "DIR")]
        usfm: Option<PathBuf>,
    },

    /// Check an SB bundle's files against its metadata.json
    Verify {
        /// SB directory containing metadata.json
        dir: PathBuf,
    },

    /// List the RC subjects that can be converted
    Subjects,
}
