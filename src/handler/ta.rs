// src/handler/ta.rs
//! Translation Academy handler

use super::common;
use super::{ConvertOptions, Handler};
use crate::error::Result;
use crate::rc::Manifest;
use crate::sb::{CopyrightStyle, Flavor, IdAuthority, Metadata, build_base_metadata, build_copyright};
use std::path::Path;
use tracing::debug;

pub const TA_SUBJECT: &str = "Translation Academy";

/// Copies each manual (`intro/`, `process/`, `translate/`, `checking/`) to
/// `ingredients/<manual>/`
pub struct TaHandler;

impl Handler for TaHandler {
    fn subject(&self) -> &str {
        TA_SUBJECT
    }

    fn convert(
        &self,
        manifest: &Manifest,
        in_dir: &Path,
        out_dir: &Path,
        opts: &ConvertOptions,
    ) -> Result<Metadata> {
        opts.check_cancelled()?;

        let mut m = build_base_metadata(manifest, IdAuthority::UwBurritos, Some("TA"));
        m.set_flavor("peripheral", Flavor::named("x-peripheralArticles"));
        m.copyright = build_copyright(manifest, CopyrightStyle::Standard);

        for project in &manifest.projects {
            opts.check_cancelled()?;

            let project_dir = in_dir.join(&project.identifier);
            if !project_dir.is_dir() {
                debug!("skipping {}: {} not found", project.identifier, project_dir.display());
                continue;
            }

            let prefix = common::ingredient_key(&project.identifier);
            common::copy_tree_to_ingredients(&project_dir, out_dir, &prefix, &mut m)?;
            opts.project_done(&project.identifier);
        }

        common::finish_bundle(in_dir, out_dir, &mut m)?;
        Ok(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_manuals_copied_and_extras_left_behind() {
        let rc = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::create_dir_all(rc.path().join("translate/figs-metaphor")).unwrap();
        fs::write(rc.path().join("translate/figs-metaphor/01.md"), "Metaphor\n").unwrap();
        fs::write(rc.path().join("translate/toc.yaml"), "title: Translate\n").unwrap();
        fs::write(rc.path().join("manifest.yaml"), "dublin_core: {}\n").unwrap();
        fs::write(rc.path().join("media.yaml"), "projects: []\n").unwrap();

        let manifest = Manifest::parse(
            "dublin_core:\n  identifier: ta\n  subject: Translation Academy\nprojects:\n  - { identifier: translate, path: ./translate }\n  - { identifier: checking, path: ./checking }\n",
        )
        .unwrap();

        let m = TaHandler
            .convert(&manifest, rc.path(), out.path(), &ConvertOptions::default())
            .unwrap();

        assert_eq!(m.identification.abbreviation["en"], "TA");
        assert!(m.ingredients.contains_key("ingredients/translate/figs-metaphor/01.md"));
        assert!(m.ingredients.contains_key("ingredients/translate/toc.yaml"));
        assert!(m.ingredients.contains_key("ingredients/LICENSE.md"));
        assert!(m.kind.flavor_type.current_scope.is_none());
        assert!(!out.path().join("manifest.yaml").exists());
        assert!(!out.path().join("media.yaml").exists());
    }
}
