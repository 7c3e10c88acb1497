// src/handler/tw.rs
//! Translation Words handler

use super::common;
use super::{ConvertOptions, Handler};
use crate::error::Result;
use crate::rc::Manifest;
use crate::sb::{CopyrightStyle, Flavor, IdAuthority, Metadata, build_base_metadata, build_copyright};
use std::path::Path;

pub const TW_SUBJECT: &str = "Translation Words";

/// Copies the `bible/` article tree (`kt/`, `names/`, `other/`, config) into
/// `ingredients/`
pub struct TwHandler;

impl Handler for TwHandler {
    fn subject(&self) -> &str {
        TW_SUBJECT
    }

    fn convert(
        &self,
        manifest: &Manifest,
        in_dir: &Path,
        out_dir: &Path,
        opts: &ConvertOptions,
    ) -> Result<Metadata> {
        opts.check_cancelled()?;

        let mut m = build_base_metadata(manifest, IdAuthority::UwBurritos, Some("TW"));
        m.set_flavor("peripheral", Flavor::named("x-peripheralArticles"));
        m.copyright = build_copyright(manifest, CopyrightStyle::Standard);

        common::copy_tree_to_ingredients(
            &in_dir.join("bible"),
            out_dir,
            common::INGREDIENTS_DIR,
            &mut m,
        )?;

        common::finish_bundle(in_dir, out_dir, &mut m)?;
        Ok(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;
    use tempfile::TempDir;

    fn manifest() -> Manifest {
        Manifest::parse(
            "dublin_core:\n  identifier: tw\n  subject: Translation Words\nprojects:\n  - { identifier: bible, path: ./bible }\n",
        )
        .unwrap()
    }

    #[test]
    fn test_articles_copied() {
        let rc = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::create_dir_all(rc.path().join("bible/kt")).unwrap();
        fs::write(rc.path().join("bible/kt/god.md"), "# God\n").unwrap();
        fs::write(rc.path().join("bible/config.yaml"), "kt: {}\n").unwrap();
        fs::write(rc.path().join("README.md"), "readme\n").unwrap();

        let m = TwHandler
            .convert(&manifest(), rc.path(), out.path(), &ConvertOptions::default())
            .unwrap();

        assert_eq!(m.kind.flavor_type.flavor.name, "x-peripheralArticles");
        assert!(m.ingredients.contains_key("ingredients/kt/god.md"));
        assert!(m.ingredients.contains_key("ingredients/config.yaml"));
        assert!(!m.ingredients.contains_key("README.md"));
        assert!(out.path().join("README.md").is_file());
    }

    #[test]
    fn test_missing_bible_dir_fails() {
        let rc = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let err = TwHandler
            .convert(&manifest(), rc.path(), out.path(), &ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::Walk { .. }));
    }
}
