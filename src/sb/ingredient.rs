// src/sb/ingredient.rs
//! Ingredient records: checksum, size, MIME type and scope of one output file
//!
//! Ingredients are always computed from the destination file, after any
//! rewriting, so the recorded digest describes the bytes that ship.

use crate::error::{Error, Result};
use crate::hash;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Book code to (always empty) chapter list
pub type Scope = BTreeMap<String, Vec<String>>;

/// Checksum block of an ingredient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checksum {
    pub md5: String,
}

/// One entry of the `ingredients` map in metadata.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub checksum: Checksum,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
}

/// MIME type recorded for a file, by extension
///
/// Unknown extensions are recorded as markdown, which is what the bulk of
/// RC content is.
pub fn mime_type_for_ext(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("md") => "text/markdown",
        Some("usfm") => "text/plain",
        Some("tsv") => "text/tab-separated-values",
        Some("yaml") | Some("yml") => "text/yaml",
        Some("json") => "application/json",
        Some("txt") => "text/plain",
        _ => "text/markdown",
    }
}

/// Compute the ingredient record for a file without a scope
pub fn compute_ingredient(path: &Path) -> Result<Ingredient> {
    let digest = hash::md5_file(path)
        .map_err(Error::io(format!("computing checksum for {}", path.display())))?;

    Ok(Ingredient {
        checksum: Checksum { md5: digest.md5 },
        mime_type: mime_type_for_ext(path).to_string(),
        size: digest.size,
        scope: None,
    })
}

/// Compute the ingredient record for a file and attach a scope
pub fn compute_ingredient_with_scope(path: &Path, scope: Scope) -> Result<Ingredient> {
    let mut ingredient = compute_ingredient(path)?;
    ingredient.scope = Some(scope);
    Ok(ingredient)
}

/// A scope covering a single book
pub fn single_book_scope(code: &str) -> Scope {
    let mut scope = Scope::new();
    scope.insert(code.to_string(), Vec::new());
    scope
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_mime_types() {
        assert_eq!(mime_type_for_ext(Path::new("a.md")), "text/markdown");
        assert_eq!(mime_type_for_ext(Path::new("GEN.usfm")), "text/plain");
        assert_eq!(mime_type_for_ext(Path::new("GEN.tsv")), "text/tab-separated-values");
        assert_eq!(mime_type_for_ext(Path::new("x.yaml")), "text/yaml");
        assert_eq!(mime_type_for_ext(Path::new("x.YML")), "text/yaml");
        assert_eq!(mime_type_for_ext(Path::new("x.json")), "application/json");
        assert_eq!(mime_type_for_ext(Path::new("x.txt")), "text/plain");
    }

    #[test]
    fn test_unknown_extension_is_markdown() {
        assert_eq!(mime_type_for_ext(Path::new("image.png")), "text/markdown");
        assert_eq!(mime_type_for_ext(Path::new("LICENSE")), "text/markdown");
    }

    #[test]
    fn test_compute_ingredient() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("01.md");
        std::fs::write(&path, "# Title\n").unwrap();

        let ing = compute_ingredient(&path).unwrap();
        assert_eq!(ing.size, 8);
        assert_eq!(ing.checksum.md5, hash::md5_bytes(b"# Title\n"));
        assert_eq!(ing.mime_type, "text/markdown");
        assert!(ing.scope.is_none());
    }

    #[test]
    fn test_compute_with_scope() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("GEN.tsv");
        std::fs::write(&path, "Reference\tID\n").unwrap();

        let ing = compute_ingredient_with_scope(&path, single_book_scope("GEN")).unwrap();
        let scope = ing.scope.unwrap();
        assert_eq!(scope.len(), 1);
        assert!(scope["GEN"].is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = compute_ingredient(&temp.path().join("missing.md")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("missing.md"));
    }

    #[test]
    fn test_scope_omitted_when_absent() {
        let ing = Ingredient {
            checksum: Checksum { md5: "abc".into() },
            mime_type: "text/markdown".into(),
            size: 3,
            scope: None,
        };
        let json = serde_json::to_string(&ing).unwrap();
        assert!(!json.contains("scope"));
        assert!(json.contains("\"mimeType\""));
    }
}
