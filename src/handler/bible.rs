// src/handler/bible.rs
//! USFM Bible handler
//!
//! Serves every USFM-based subject ("Aligned Bible", "Bible", "Hebrew Old
//! Testament", "Greek New Testament"). `01-GEN.usfm` becomes
//! `ingredients/GEN.usfm` scoped to GEN.

use super::common::{self, FilenameRule};
use super::{ConvertOptions, Handler};
use crate::books;
use crate::error::Result;
use crate::names::{self, NameCandidates};
use crate::rc::Manifest;
use crate::sb::{
    CopyrightStyle, Flavor, IdAuthority, Metadata, Scope, build_base_metadata, build_copyright,
    single_book_scope,
};
use std::path::Path;
use tracing::debug;

/// Subjects converted as USFM scripture
pub const BIBLE_SUBJECTS: &[&str] = &[
    "Aligned Bible",
    "Bible",
    "Hebrew Old Testament",
    "Greek New Testament",
];

/// Handler for one USFM Bible subject
pub struct BibleHandler {
    subject: String,
}

impl BibleHandler {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}

fn scripture_flavor() -> Flavor {
    Flavor {
        name: "textTranslation".to_string(),
        usfm_version: Some("3.0".to_string()),
        translation_type: Some("revision".to_string()),
        audience: Some("common".to_string()),
        project_type: Some("standard".to_string()),
    }
}

impl Handler for BibleHandler {
    fn subject(&self) -> &str {
        &self.subject
    }

    fn convert(
        &self,
        manifest: &Manifest,
        in_dir: &Path,
        out_dir: &Path,
        opts: &ConvertOptions,
    ) -> Result<Metadata> {
        opts.check_cancelled()?;

        let mut m = build_base_metadata(manifest, IdAuthority::UwBurritos, None);
        m.set_flavor("scripture", scripture_flavor());
        m.copyright = build_copyright(manifest, CopyrightStyle::Standard);

        let lang = manifest.language_tag();
        let mut current_scope = Scope::new();

        for project in &manifest.projects {
            opts.check_cancelled()?;

            let src = common::project_source(in_dir, project);
            if !src.is_file() {
                debug!("skipping {}: {} not found", project.identifier, src.display());
                continue;
            }

            let filename = FilenameRule::StripNumericDash.apply(&common::file_name(&src));
            let key = common::ingredient_key(&filename);

            let scope = match books::by_id(&project.identifier) {
                Some(book) => {
                    current_scope.insert(book.code.to_string(), Vec::new());

                    // The book's own header first, then the --usfm directory
                    let markup = names::parse_usfm_names(&src).or_else(|| {
                        let dir = opts.usfm_path.as_deref()?;
                        names::parse_usfm_names(&names::find_usfm_file(dir, book.id)?)
                    });
                    let candidates = NameCandidates {
                        title: &project.title,
                        markup: markup.as_ref(),
                    };
                    if let Some((key, name)) = names::resolve(book.id, lang, candidates) {
                        m.localized_names.insert(key, name);
                    }

                    Some(single_book_scope(book.code))
                }
                None => None,
            };

            let ingredient = common::copy_ingredient(&src, out_dir, &key, scope)?;
            m.add_ingredient(key, ingredient);
            opts.project_done(&project.identifier);
        }

        m.kind.flavor_type.current_scope = Some(current_scope);

        common::finish_bundle(in_dir, out_dir, &mut m)?;
        Ok(m)
    }
}
