// src/handler/obs.rs
//! Open Bible Stories handler
//!
//! OBS content (`01.md` .. `50.md`, `front/`, `back/`) is copied to
//! `ingredients/content/`. The content directory comes from the first
//! project path; a path of `.` means the stories sit at the repository root
//! next to the manifest.

use super::common;
use super::{ConvertOptions, Handler};
use crate::error::{Error, Result};
use crate::rc::Manifest;
use crate::sb::{CopyrightStyle, Flavor, IdAuthority, Metadata, build_base_metadata, build_copyright};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const OBS_SUBJECT: &str = "Open Bible Stories";

const CONTENT_PREFIX: &str = "ingredients/content";

/// Root files that are never OBS content
const NON_CONTENT_FILES: &[&str] = &["README.md", "LICENSE.md", ".gitignore"];

pub struct ObsHandler;

/// Directory holding the stories, relative to the RC root
fn content_path(manifest: &Manifest) -> &str {
    manifest
        .projects
        .first()
        .map(|p| p.relative_path())
        .filter(|p| !p.is_empty())
        .unwrap_or("content")
}

/// Whether a root-level entry is repository infrastructure rather than
/// story content
fn is_excluded_root_entry(name: &str, is_dir: bool) -> bool {
    if is_dir {
        return name.starts_with('.');
    }
    name.ends_with(".yaml") || name.ends_with(".yml") || NON_CONTENT_FILES.contains(&name)
}

/// Copy stories that live at the RC root, skipping manifests, root files and
/// dot-directories
fn copy_root_content(in_dir: &Path, out_dir: &Path, m: &mut Metadata) -> Result<()> {
    let mut entries = fs::read_dir(in_dir)
        .map_err(Error::io(format!("reading {}", in_dir.display())))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(Error::io(format!("reading {}", in_dir.display())))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        let path = entry.path();
        let is_dir = path.is_dir();

        if is_excluded_root_entry(&name, is_dir) {
            debug!("not OBS content: {}", name);
            continue;
        }

        let key = format!("{}/{}", CONTENT_PREFIX, name);
        if is_dir {
            common::copy_tree_to_ingredients(&path, out_dir, &key, m)?;
        } else {
            let ingredient = common::copy_ingredient(&path, out_dir, &key, None)?;
            m.add_ingredient(key, ingredient);
        }
    }

    Ok(())
}

impl Handler for ObsHandler {
    fn subject(&self) -> &str {
        OBS_SUBJECT
    }

    fn convert(
        &self,
        manifest: &Manifest,
        in_dir: &Path,
        out_dir: &Path,
        opts: &ConvertOptions,
    ) -> Result<Metadata> {
        opts.check_cancelled()?;

        let mut m = build_base_metadata(manifest, IdAuthority::BurritoTruck, Some("OBS"));
        m.set_flavor("gloss", Flavor::named("textStories"));
        m.copyright = build_copyright(manifest, CopyrightStyle::Narrative);

        match content_path(manifest) {
            "." => copy_root_content(in_dir, out_dir, &mut m)?,
            dir => {
                let content_dir = in_dir.join(dir);
                common::copy_tree_to_ingredients(&content_dir, out_dir, CONTENT_PREFIX, &mut m)?;
            }
        }

        common::finish_bundle(in_dir, out_dir, &mut m)?;
        Ok(m)
    }
}
