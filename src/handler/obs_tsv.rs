// src/handler/obs_tsv.rs
//! TSV OBS helps: study notes, study questions, translation notes and
//! translation questions
//!
//! Each of these RCs has a single project, one TSV covering all of OBS.

use super::common::{self, FilenameRule};
use super::{ConvertOptions, Handler};
use crate::error::{Error, Result};
use crate::rc::Manifest;
use crate::sb::metadata::LangMap;
use crate::sb::{
    CopyrightStyle, Flavor, IdAuthority, LocalizedName, Metadata, build_base_metadata,
    build_copyright,
};
use std::path::Path;

/// The four OBS TSV resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObsTsvVariant {
    StudyNotes,
    StudyQuestions,
    TranslationNotes,
    TranslationQuestions,
}

impl ObsTsvVariant {
    pub const ALL: [ObsTsvVariant; 4] = [
        ObsTsvVariant::StudyNotes,
        ObsTsvVariant::StudyQuestions,
        ObsTsvVariant::TranslationNotes,
        ObsTsvVariant::TranslationQuestions,
    ];

    pub fn subject(self) -> &'static str {
        match self {
            Self::StudyNotes => "TSV OBS Study Notes",
            Self::StudyQuestions => "TSV OBS Study Questions",
            Self::TranslationNotes => "TSV OBS Translation Notes",
            Self::TranslationQuestions => "TSV OBS Translation Questions",
        }
    }

    fn flavor(self) -> &'static str {
        match self {
            Self::StudyNotes | Self::TranslationNotes => "x-obsnotes",
            Self::StudyQuestions | Self::TranslationQuestions => "x-obsquestions",
        }
    }

    fn abbreviation(self) -> &'static str {
        match self {
            Self::StudyNotes => "OBSSN",
            Self::StudyQuestions => "OBSSQ",
            Self::TranslationNotes => "OBSTN",
            Self::TranslationQuestions => "OBSTQ",
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Self::StudyNotes => "sn_",
            Self::StudyQuestions => "sq_",
            Self::TranslationNotes => "tn_",
            Self::TranslationQuestions => "tq_",
        }
    }
}

pub struct ObsTsvHandler {
    variant: ObsTsvVariant,
}

impl ObsTsvHandler {
    pub fn new(variant: ObsTsvVariant) -> Self {
        Self { variant }
    }
}

/// `book-obs` entry naming OBS in English
fn obs_localized_name() -> LocalizedName {
    let en = |v: &str| -> LangMap { [("en".to_string(), v.to_string())].into_iter().collect() };
    LocalizedName {
        abbr: en("OBS"),
        short: en("OBS"),
        long: en("OBS"),
    }
}

impl Handler for ObsTsvHandler {
    fn subject(&self) -> &str {
        self.variant.subject()
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
            IdAuthority::BurritoTruck,
            Some(self.variant.abbreviation()),
        );
        m.set_flavor("peripheral", Flavor::named(self.variant.flavor()));
        m.copyright = build_copyright(manifest, CopyrightStyle::Standard);
        m.localized_names
            .insert("book-obs".to_string(), obs_localized_name());

        let project = manifest
            .projects
            .first()
            .ok_or_else(|| Error::NoProjects(self.variant.subject().to_string()))?;

        opts.check_cancelled()?;
        let src = common::project_source(in_dir, project);
        let rule = FilenameRule::StripPrefix(self.variant.prefix());
        let filename = rule.apply(&common::file_name(&src));
        let key = common::ingredient_key(&filename);
        let ingredient = common::copy_ingredient(&src, out_dir, &key, None)?;
        m.add_ingredient(key, ingredient);

        common::finish_bundle(in_dir, out_dir, &mut m)?;
        Ok(m)
    }
}
