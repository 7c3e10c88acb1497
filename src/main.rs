// src/main.rs

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Convert {
            in_dir,
            out_dir,
            payload,
            usfm,
        } => commands::cmd_convert(&in_dir, &out_dir, payload, usfm),
        Commands::Verify { dir } => commands::cmd_verify(&dir),
        Commands::Subjects => commands::cmd_subjects(),
    }
}
