// src/handler/common.rs
//! Copy helpers shared by all handlers
//!
//! Every ingredient is recorded from the destination file after it has been
//! written, never from the source.

use crate::error::{Error, Result};
use crate::rc::Project;
use crate::sb::{Ingredient, Metadata, Scope, compute_ingredient, compute_ingredient_with_scope};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Prefix of every ingredient key
pub const INGREDIENTS_DIR: &str = "ingredients";

/// License file name, at the RC root and in the SB
pub const LICENSE_FILE: &str = "LICENSE.md";

/// Ingredient key of the license copy
pub const LICENSE_INGREDIENT: &str = "ingredients/LICENSE.md";

/// CC BY-SA 4.0 text used when the RC ships no license
pub const DEFAULT_LICENSE: &str = include_str!("default_license.md");

/// Root files copied into the bundle but not listed as ingredients
const ROOT_FILES: &[&str] = &["README.md", ".gitignore"];

/// Root directories copied into the bundle but not listed as ingredients
const ROOT_DIRS: &[&str] = &[".gitea", ".github"];

/// How a project's file name becomes its ingredient file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameRule {
    /// Use the file name unchanged
    Keep,
    /// Strip a fixed prefix (`tn_GEN.tsv` -> `GEN.tsv`)
    StripPrefix(&'static str),
    /// Strip everything up to the first dash (`01-GEN.usfm` -> `GEN.usfm`)
    StripNumericDash,
}

impl FilenameRule {
    pub fn apply(self, filename: &str) -> String {
        match self {
            FilenameRule::Keep => filename.to_string(),
            FilenameRule::StripPrefix(prefix) => {
                filename.strip_prefix(prefix).unwrap_or(filename).to_string()
            }
            FilenameRule::StripNumericDash => match filename.split_once('-') {
                Some((_, rest)) if !rest.is_empty() => rest.to_string(),
                _ => filename.to_string(),
            },
        }
    }
}

/// Ingredient key for a path relative to `ingredients/`
pub fn ingredient_key(relative: &str) -> String {
    format!("{}/{}", INGREDIENTS_DIR, relative)
}

/// Absolute source path of a project inside the RC
pub fn project_source(in_dir: &Path, project: &Project) -> PathBuf {
    in_dir.join(project.relative_path())
}

/// File name component of a path as a string
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Ensure the parent directory of `path` exists
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(Error::io(format!("creating directory {}", parent.display())))?;
    }
    Ok(())
}

/// Copy a file, creating the destination's parent directories
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    ensure_parent(dst)?;
    fs::copy(src, dst).map_err(Error::io(format!(
        "copying {} to {}",
        src.display(),
        dst.display()
    )))?;
    Ok(())
}

/// Copy a file to `out_dir/key` and compute its ingredient
pub fn copy_ingredient(
    src: &Path,
    out_dir: &Path,
    key: &str,
    scope: Option<Scope>,
) -> Result<Ingredient> {
    let dst = out_dir.join(key);
    copy_file(src, &dst)?;
    debug!("{} -> {}", src.display(), key);
    match scope {
        Some(scope) => compute_ingredient_with_scope(&dst, scope),
        None => compute_ingredient(&dst),
    }
}

/// Files under `dir` in a stable order, with their `/`-separated paths
/// relative to `dir`
fn walk_files(dir: &Path) -> Result<Vec<(PathBuf, String)>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|source| Error::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(dir)
            .unwrap_or(entry.path())
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        files.push((entry.path().to_path_buf(), rel));
    }
    Ok(files)
}

/// Copy every file under `src_dir` to `out_dir/<prefix>/...`, recording an
/// ingredient for each
///
/// Returns the number of files copied.
pub fn copy_tree_to_ingredients(
    src_dir: &Path,
    out_dir: &Path,
    prefix: &str,
    metadata: &mut Metadata,
) -> Result<usize> {
    let files = walk_files(src_dir)?;
    for (path, rel) in &files {
        let key = format!("{}/{}", prefix, rel);
        let ingredient = copy_ingredient(path, out_dir, &key, None)?;
        metadata.add_ingredient(key, ingredient);
    }
    Ok(files.len())
}

/// Copy a directory tree without recording ingredients
pub fn copy_tree(src_dir: &Path, dst_dir: &Path) -> Result<()> {
    for (path, rel) in walk_files(src_dir)? {
        copy_file(&path, &dst_dir.join(rel))?;
    }
    Ok(())
}

/// Copy README.md, .gitignore, .gitea/ and .github/ to the bundle root
///
/// These are repository infrastructure, so they are not ingredients.
/// `.git/` is never copied.
pub fn copy_common_root_files(in_dir: &Path, out_dir: &Path) -> Result<()> {
    for name in ROOT_FILES {
        let src = in_dir.join(name);
        if src.is_file() {
            copy_file(&src, &out_dir.join(name))?;
        }
    }

    for name in ROOT_DIRS {
        let src = in_dir.join(name);
        if src.is_dir() {
            copy_tree(&src, &out_dir.join(name))?;
        }
    }

    Ok(())
}

/// Write LICENSE.md to `dst`, from the RC if it has one
fn write_license(in_dir: &Path, dst: &Path) -> Result<()> {
    let src = in_dir.join(LICENSE_FILE);
    if src.is_file() {
        return copy_file(&src, dst);
    }

    debug!("no {} in {}, using default license", LICENSE_FILE, in_dir.display());
    ensure_parent(dst)?;
    fs::write(dst, DEFAULT_LICENSE).map_err(Error::io(format!("writing {}", dst.display())))
}

/// Place LICENSE.md at the bundle root and as `ingredients/LICENSE.md`
pub fn copy_license(in_dir: &Path, out_dir: &Path, metadata: &mut Metadata) -> Result<()> {
    write_license(in_dir, &out_dir.join(LICENSE_FILE))?;

    let dst = out_dir.join(LICENSE_INGREDIENT);
    write_license(in_dir, &dst)?;
    metadata.add_ingredient(LICENSE_INGREDIENT, compute_ingredient(&dst)?);
    Ok(())
}

/// Root files and license, the closing step of every handler
pub fn finish_bundle(in_dir: &Path, out_dir: &Path, metadata: &mut Metadata) -> Result<()> {
    copy_common_root_files(in_dir, out_dir)?;
    copy_license(in_dir, out_dir, metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_filename_rules() {
        assert_eq!(FilenameRule::Keep.apply("sn_OBS.tsv"), "sn_OBS.tsv");
        assert_eq!(FilenameRule::StripPrefix("tn_").apply("tn_GEN.tsv"), "GEN.tsv");
        assert_eq!(FilenameRule::StripPrefix("tn_").apply("GEN.tsv"), "GEN.tsv");
        assert_eq!(FilenameRule::StripNumericDash.apply("01-GEN.usfm"), "GEN.usfm");
        assert_eq!(FilenameRule::StripNumericDash.apply("A0-FRT.usfm"), "FRT.usfm");
        assert_eq!(FilenameRule::StripNumericDash.apply("GEN.usfm"), "GEN.usfm");
    }

    #[test]
    fn test_copy_tree_to_ingredients() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("kt")).unwrap();
        fs::write(src.path().join("kt/god.md"), "# God\n").unwrap();
        fs::write(src.path().join("config.yaml"), "a: 1\n").unwrap();

        let mut m = Metadata::new();
        let n = copy_tree_to_ingredients(src.path(), out.path(), "ingredients/payload", &mut m)
            .unwrap();

        assert_eq!(n, 2);
        assert!(out.path().join("ingredients/payload/kt/god.md").is_file());
        assert_eq!(m.ingredients["ingredients/payload/config.yaml"].mime_type, "text/yaml");
        assert_eq!(m.ingredients["ingredients/payload/kt/god.md"].size, 6);
    }

    #[test]
    fn test_root_files_are_not_ingredients() {
        let rc = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(rc.path().join("README.md"), "readme").unwrap();
        fs::write(rc.path().join(".gitignore"), "target\n").unwrap();
        fs::create_dir_all(rc.path().join(".gitea/workflows")).unwrap();
        fs::write(rc.path().join(".gitea/workflows/ci.yaml"), "on: push\n").unwrap();
        fs::create_dir_all(rc.path().join(".github")).unwrap();
        fs::write(rc.path().join(".github/CODEOWNERS"), "* @a\n").unwrap();
        fs::create_dir_all(rc.path().join(".git")).unwrap();
        fs::write(rc.path().join(".git/HEAD"), "ref: refs/heads/master\n").unwrap();

        copy_common_root_files(rc.path(), out.path()).unwrap();

        assert!(out.path().join("README.md").is_file());
        assert!(out.path().join(".gitignore").is_file());
        assert!(out.path().join(".gitea/workflows/ci.yaml").is_file());
        assert!(out.path().join(".github/CODEOWNERS").is_file());
        assert!(!out.path().join(".git").exists());
    }

    #[test]
    fn test_missing_root_files_are_skipped() {
        let rc = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        copy_common_root_files(rc.path(), out.path()).unwrap();
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_default_license() {
        let rc = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let mut m = Metadata::new();

        copy_license(rc.path(), out.path(), &mut m).unwrap();

        let root = fs::read_to_string(out.path().join(LICENSE_FILE)).unwrap();
        let ing = fs::read_to_string(out.path().join(LICENSE_INGREDIENT)).unwrap();
        assert!(root.contains("Creative Commons Attribution-ShareAlike 4.0"));
        assert_eq!(root, ing);
        assert_eq!(m.ingredients[LICENSE_INGREDIENT].size, DEFAULT_LICENSE.len() as u64);
        assert!(!m.ingredients.contains_key(LICENSE_FILE));
    }

    #[test]
    fn test_existing_license_preferred() {
        let rc = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(rc.path().join(LICENSE_FILE), "Custom license\n").unwrap();
        let mut m = Metadata::new();

        copy_license(rc.path(), out.path(), &mut m).unwrap();

        let ing = fs::read_to_string(out.path().join(LICENSE_INGREDIENT)).unwrap();
        assert_eq!(ing, "Custom license\n");
        assert_eq!(
            fs::read_to_string(out.path().join(LICENSE_FILE)).unwrap(),
            "Custom license\n"
        );
    }
}
