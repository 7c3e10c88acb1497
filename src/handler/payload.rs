// src/handler/payload.rs
//! Translation Words payload for TSV Translation Words Links
//!
//! A TWL row ends with a link such as `rc://*/tw/dict/bible/kt/god`. When a
//! Translation Words `bible/` tree is available, it is embedded under
//! `ingredients/payload/` and every link becomes a relative path to the
//! embedded article (`./payload/kt/god.md`). Everything after `bible/` is
//! kept, so deeper links such as `.../bible/kt/god/extra` map to
//! `./payload/kt/god/extra.md`. Without a payload the TSV files are copied
//! byte for byte.

use super::common;
use crate::error::{Error, Result};
use crate::sb::{Ingredient, Metadata, Scope, compute_ingredient, compute_ingredient_with_scope};
use regex::bytes::Regex;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info, warn};

/// Ingredient prefix of the embedded articles
pub const PAYLOAD_PREFIX: &str = "ingredients/payload";

/// Extension of Translation Words articles
const ARTICLE_EXT: &str = "md";

/// A trailing `<TAB>rc://<lang>/tw/dict/bible/<path>` column
static LINK_COLUMN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\trc://[^/\t]+/tw/dict/bible/([^\t]+)$")
        .expect("link pattern is valid")
});

/// Where the payload was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadOrigin {
    /// Supplied through [`super::ConvertOptions::payload_path`]
    Override,
    /// Found as `<lang>_tw/bible` inside the RC
    AutoDetected,
}

/// A selected Translation Words `bible/` directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadSource {
    pub dir: PathBuf,
    pub origin: PayloadOrigin,
}

impl PayloadSource {
    /// Whether the payload carries the article a link points at
    pub fn has_article(&self, link: &PayloadLink) -> bool {
        self.dir
            .join(format!("{}.{}", link.path, ARTICLE_EXT))
            .is_file()
    }
}

/// Pick the payload directory
///
/// The override is used when `<override>/bible` exists, otherwise
/// `<in_dir>/<lang>_tw/bible` when it exists, otherwise there is no payload.
pub fn select_source(
    in_dir: &Path,
    lang: &str,
    override_dir: Option<&Path>,
) -> Option<PayloadSource> {
    if let Some(dir) = override_dir {
        let bible = dir.join("bible");
        if bible.is_dir() {
            info!("Using Translation Words payload from {}", bible.display());
            return Some(PayloadSource {
                dir: bible,
                origin: PayloadOrigin::Override,
            });
        }
        warn!(
            "payload path {} has no bible/ directory, trying auto-detection",
            dir.display()
        );
    }

    let bible = in_dir.join(format!("{}_tw", lang)).join("bible");
    if bible.is_dir() {
        info!("Detected Translation Words payload at {}", bible.display());
        return Some(PayloadSource {
            dir: bible,
            origin: PayloadOrigin::AutoDetected,
        });
    }

    debug!("no Translation Words payload found, links are kept as-is");
    None
}

/// Copy the whole payload tree to `ingredients/payload/`
pub fn copy_payload(
    source: &PayloadSource,
    out_dir: &Path,
    metadata: &mut Metadata,
) -> Result<usize> {
    let count =
        common::copy_tree_to_ingredients(&source.dir, out_dir, PAYLOAD_PREFIX, metadata)?;
    debug!("embedded {} payload files", count);
    Ok(count)
}

/// A Translation Words article referenced by a link
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PayloadLink {
    /// Article path below `bible/` without extension, e.g. `kt/god`
    pub path: String,
}

impl PayloadLink {
    /// Path of the embedded article, relative to `ingredients/`
    pub fn relative_path(&self) -> String {
        format!("./payload/{}.{}", self.path, ARTICLE_EXT)
    }
}

/// Split a line into its content and its terminator (`\n`, `\r\n`, a
/// lone trailing `\r`, or none)
fn split_terminator(line: &[u8]) -> (&[u8], &[u8]) {
    let body_len = if line.ends_with(b"\r\n") {
        line.len() - 2
    } else if line.ends_with(b"\n") || line.ends_with(b"\r") {
        line.len() - 1
    } else {
        line.len()
    };
    line.split_at(body_len)
}

/// Rewrite the link column of one line
///
/// Returns the rewritten line and the link that was replaced, if any.
pub fn rewrite_line(line: &[u8]) -> (Cow<'_, [u8]>, Option<PayloadLink>) {
    let (body, terminator) = split_terminator(line);
    let Some(caps) = LINK_COLUMN.captures(body) else {
        return (Cow::Borrowed(line), None);
    };

    let link = PayloadLink {
        path: String::from_utf8_lossy(&caps[1]).into_owned(),
    };

    let start = caps.get(0).map_or(body.len(), |m| m.start());
    let mut out = Vec::with_capacity(line.len());
    out.extend_from_slice(&body[..start]);
    out.push(b'\t');
    out.extend_from_slice(link.relative_path().as_bytes());
    out.extend_from_slice(terminator);

    (Cow::Owned(out), Some(link))
}

/// Stream `reader` to `writer`, rewriting link columns line by line
///
/// Line terminators are preserved exactly, including a missing final
/// newline. Returns the links that were rewritten, in order.
pub fn rewrite_links<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
) -> std::io::Result<Vec<PayloadLink>> {
    let mut links = Vec::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        let (rewritten, link) = rewrite_line(&line);
        writer.write_all(&rewritten)?;
        links.extend(link);
    }

    writer.flush()?;
    Ok(links)
}

/// Links in TSV content, without rewriting anything
pub fn extract_links(content: &[u8]) -> Vec<PayloadLink> {
    content
        .split_inclusive(|b| *b == b'\n')
        .filter_map(|line| rewrite_line(line).1)
        .collect()
}

/// Copy a TWL TSV file to `out_dir/key` with its links rewritten, then
/// compute the ingredient from the rewritten file
pub fn copy_tsv_with_link_rewrite(
    src: &Path,
    out_dir: &Path,
    key: &str,
    scope: Option<Scope>,
    source: &PayloadSource,
) -> Result<Ingredient> {
    let dst = out_dir.join(key);
    common::ensure_parent(&dst)?;

    let input = File::open(src).map_err(Error::io(format!("opening {}", src.display())))?;
    let output = File::create(&dst).map_err(Error::io(format!("creating {}", dst.display())))?;

    let links = rewrite_links(BufReader::new(input), BufWriter::new(output)).map_err(Error::io(
        format!("rewriting links from {} to {}", src.display(), dst.display()),
    ))?;
    debug!("{} -> {} ({} links rewritten)", src.display(), key, links.len());

    for link in links.iter().filter(|l| !source.has_article(l)) {
        warn!(
            "{}: payload has no article {}",
            common::file_name(src),
            link.path
        );
    }

    match scope {
        Some(scope) => compute_ingredient_with_scope(&dst, scope),
        None => compute_ingredient(&dst),
    }
}
