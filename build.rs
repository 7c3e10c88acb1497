// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: directory option with a value
fn dir_option(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id).long(id).value_name("DIR").help(help)
}

fn build_cli() -> Command {
    Command::new("rc2sb")
        .version(env!("CARGO_PKG_VERSION"))
        .author("rc2sb Contributors")
        .about("Convert Resource Container repositories to Scripture Burrito bundles")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log at debug level (RUST_LOG takes precedence)"),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert an RC directory into an SB directory")
                .arg(Arg::new("in_dir").required(true).help("RC directory containing manifest.yaml"))
                .arg(Arg::new("out_dir").required(true).help("Output directory for the SB bundle"))
                .arg(dir_option(
                    "payload",
                    "Translation Words checkout used to bundle articles with TWL",
                ))
                .arg(dir_option("usfm", "Directory of USFM files used for localized book names")),
        )
        .subcommand(
            Command::new("verify")
                .about("Check an SB bundle's files against its metadata.json")
                .arg(Arg::new("dir").required(true).help("SB directory containing metadata.json")),
        )
        .subcommand(Command::new("subjects").about("List the RC subjects that can be converted"))
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("rc2sb.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
