// src/handler/tsv.rs
//! Book-by-book TSV helps: Translation Notes, Questions and Words Links
//!
//! Each project is one `<prefix>_<BOOK>.tsv` file relocated to
//! `ingredients/<BOOK>.tsv`. Words Links additionally embeds a Translation
//! Words payload and rewrites its `rc://` links, see [`super::payload`].

use super::common::{self, FilenameRule};
use super::payload;
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

/// Which TSV resource a handler converts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsvKind {
    Notes,
    Questions,
    WordsLinks,
}

impl TsvKind {
    pub const ALL: [TsvKind; 3] = [TsvKind::Notes, TsvKind::Questions, TsvKind::WordsLinks];

    pub fn subject(self) -> &'static str {
        match self {
            TsvKind::Notes => "TSV Translation Notes",
            TsvKind::Questions => "TSV Translation Questions",
            TsvKind::WordsLinks => "TSV Translation Words Links",
        }
    }

    fn flavor(self) -> &'static str {
        match self {
            TsvKind::Notes => "x-bcvnotes",
            TsvKind::Questions => "x-bcvquestions",
            TsvKind::WordsLinks => "x-bcvarticles",
        }
    }

    fn abbreviation(self) -> &'static str {
        match self {
            TsvKind::Notes => "TN",
            TsvKind::Questions => "TQ",
            TsvKind::WordsLinks => "TW",
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            TsvKind::Notes => "tn_",
            TsvKind::Questions => "tq_",
            TsvKind::WordsLinks => "twl_",
        }
    }
}

/// Handler for a per-book TSV resource
pub struct TsvBookHandler {
    kind: TsvKind,
}

impl TsvBookHandler {
    pub fn new(kind: TsvKind) -> Self {
        Self { kind }
    }
}

impl Handler for TsvBookHandler {
    fn subject(&self) -> &str {
        self.kind.subject()
    }

    fn convert(
        &self,
        manifest: &Manifest,
        in_dir: &Path,
        out_dir: &Path,
        opts: &ConvertOptions,
    ) -> Result<Metadata> {
        opts.check_cancelled()?;

        let mut m = build_base_metadata(
            manifest,
            IdAuthority::UwBurritos,
            Some(self.kind.abbreviation()),
        );
        m.set_flavor("parascriptural", Flavor::named(self.kind.flavor()));
        m.copyright = build_copyright(manifest, CopyrightStyle::Standard);

        let lang = manifest.language_tag();

        let payload = match self.kind {
            TsvKind::WordsLinks => {
                payload::select_source(in_dir, lang, opts.payload_path.as_deref())
            }
            _ => None,
        };
        if let Some(source) = &payload {
            payload::copy_payload(source, out_dir, &mut m)?;
        }

        let rule = FilenameRule::StripPrefix(self.kind.prefix());
        let mut current_scope = Scope::new();

        for project in &manifest.projects {
            opts.check_cancelled()?;

            let src = common::project_source(in_dir, project);
            if !src.is_file() {
                debug!("skipping {}: {} not found", project.identifier, src.display());
                continue;
            }

            let key = common::ingredient_key(&rule.apply(&common::file_name(&src)));
            let code = books::code_from_project_id(&project.identifier);
            current_scope.insert(code.clone(), Vec::new());

            let markup = opts
                .usfm_path
                .as_deref()
                .and_then(|dir| names::find_usfm_file(dir, &project.identifier))
                .and_then(|file| names::parse_usfm_names(&file));
            let candidates = NameCandidates {
                title: &project.title,
                markup: markup.as_ref(),
            };
            if let Some((name_key, name)) = names::resolve(&project.identifier, lang, candidates) {
                m.localized_names.insert(name_key, name);
            }

            let scope = Some(single_book_scope(&code));
            let ingredient = match &payload {
                Some(source) => {
                    payload::copy_tsv_with_link_rewrite(&src, out_dir, &key, scope, source)?
                }
                None => common::copy_ingredient(&src, out_dir, &key, scope)?,
            };
            m.add_ingredient(key, ingredient);
            opts.project_done(&project.identifier);
        }

        m.kind.flavor_type.current_scope = Some(current_scope);

        common::finish_bundle(in_dir, out_dir, &mut m)?;
        Ok(m)
    }
}
