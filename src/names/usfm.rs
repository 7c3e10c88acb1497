// src/names/usfm.rs
//! Book names from USFM header markers
//!
//! Localized book names live in the first lines of a USFM file:
//! `\toc1` (long), `\toc2` (short), `\toc3` (abbreviation), with `\mt1`/`\mt`
//! and `\h` as fallbacks for the long and short names.

use crate::books;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Header lines scanned for markers
const HEADER_LINES: usize = 20;

/// Names found in a USFM header; empty strings mean "not present"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupNames {
    pub long: String,
    pub short: String,
    pub abbr: String,
}

impl MarkupNames {
    pub fn is_empty(&self) -> bool {
        self.long.is_empty() && self.short.is_empty() && self.abbr.is_empty()
    }
}

/// Value of `marker` if the line starts with it
///
/// The marker must be followed by a space or end the line, so `\mt` does not
/// match `\mt1`.
fn marker_value<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(marker)?;
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }
    let value = rest.trim();
    (!value.is_empty()).then_some(value)
}

/// Parse book names from USFM header text
pub fn parse_usfm_header<R: BufRead>(reader: R) -> Option<MarkupNames> {
    let mut toc1 = None;
    let mut toc2 = None;
    let mut toc3 = None;
    let mut h = None;
    let mut mt1 = None;
    let mut mt = None;

    for line in reader.lines().take(HEADER_LINES) {
        let Ok(line) = line else { break };
        let line = line.trim();

        let slots = [
            ("\\toc1", &mut toc1),
            ("\\toc2", &mut toc2),
            ("\\toc3", &mut toc3),
            ("\\h", &mut h),
            ("\\mt1", &mut mt1),
            ("\\mt", &mut mt),
        ];
        for (marker, slot) in slots {
            if let Some(value) = marker_value(line, marker) {
                slot.get_or_insert_with(|| value.to_string());
                break;
            }
        }
    }

    let names = MarkupNames {
        long: toc1.or(mt1).or(mt).unwrap_or_default(),
        short: toc2.or(h).unwrap_or_default(),
        abbr: toc3.unwrap_or_default(),
    };
    (!names.is_empty()).then_some(names)
}

/// Parse book names from the header of a USFM file
///
/// Returns `None` if the file cannot be read or carries no name markers.
pub fn parse_usfm_names(path: &Path) -> Option<MarkupNames> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            debug!("cannot read USFM names from {}: {}", path.display(), e);
            return None;
        }
    };
    parse_usfm_header(BufReader::new(file))
}

/// Locate the USFM file for a book in a directory
///
/// Tries `*-CODE.usfm` (e.g. `01-GEN.usfm`), then `CODE.usfm`, then the
/// lowercase `*-code.usfm`.
pub fn find_usfm_file(dir: &Path, book_id: &str) -> Option<PathBuf> {
    let code = books::code_from_project_id(book_id);

    let first_match = |name: String| -> Option<PathBuf> {
        let pattern = format!("{}/{}", glob::Pattern::escape(dir.to_str()?), name);
        let mut paths: Vec<PathBuf> = glob::glob(&pattern)
            .ok()?
            .filter_map(|entry| entry.ok())
            .collect();
        paths.sort();
        paths.into_iter().next()
    };

    if let Some(path) = first_match(format!("*-{}.usfm", code)) {
        return Some(path);
    }

    let direct = dir.join(format!("{}.usfm", code));
    if direct.is_file() {
        return Some(direct);
    }

    first_match(format!("*-{}.usfm", code.to_lowercase()))
}
