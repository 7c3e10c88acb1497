// src/verify.rs
//! SB bundle verification
//!
//! Re-reads a converted bundle's `metadata.json` and checks every recorded
//! ingredient against the file on disk: it must exist, have the recorded
//! size and hash to the recorded MD5. Also checks that every book named in
//! `currentScope` is covered by at least one ingredient scope.

use crate::error::Result;
use crate::hash;
use crate::sb::Metadata;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Component, Path};
use tracing::debug;

/// A single problem found in a bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyProblem {
    /// The ingredient key points outside the bundle directory
    UnsafePath { key: String },
    /// The ingredient file does not exist
    Missing { key: String },
    /// The file size differs from the recorded size
    SizeMismatch { key: String, expected: u64, actual: u64 },
    /// The file content does not hash to the recorded MD5
    ChecksumMismatch {
        key: String,
        expected: String,
        actual: String,
    },
    /// A currentScope book that no ingredient covers
    UncoveredScope { book: String },
}

impl fmt::Display for VerifyProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsafePath { key } => write!(f, "Ingredient path escapes bundle: {}", key),
            Self::Missing { key } => write!(f, "Missing ingredient: {}", key),
            Self::SizeMismatch {
                key,
                expected,
                actual,
            } => write!(
                f,
                "Size mismatch for {}: expected {}, got {}",
                key, expected, actual
            ),
            Self::ChecksumMismatch {
                key,
                expected,
                actual,
            } => write!(
                f,
                "Checksum mismatch for {}: expected {}, got {}",
                key, expected, actual
            ),
            Self::UncoveredScope { book } => {
                write!(f, "currentScope book {} has no ingredient", book)
            }
        }
    }
}

/// Result of verifying a bundle
#[derive(Debug, Default)]
pub struct VerifyReport {
    /// Number of ingredients checked
    pub checked: usize,
    /// Everything that failed
    pub problems: Vec<VerifyProblem>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

fn is_contained(key: &str) -> bool {
    Path::new(key)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Verify the bundle in `dir` against its `metadata.json`
///
/// Only an unreadable or unparsable metadata.json is an error; everything
/// else is collected into the report.
pub fn verify_bundle(dir: &Path) -> Result<VerifyReport> {
    let metadata = Metadata::read_from_file(dir)?;
    Ok(verify_metadata(dir, &metadata))
}

/// Verify already-loaded metadata against the files in `dir`
pub fn verify_metadata(dir: &Path, metadata: &Metadata) -> VerifyReport {
    let mut report = VerifyReport::default();

    for (key, ingredient) in &metadata.ingredients {
        report.checked += 1;

        if !is_contained(key) {
            report.problems.push(VerifyProblem::UnsafePath { key: key.clone() });
            continue;
        }

        let path = dir.join(key);
        let actual_size = match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => meta.len(),
            _ => {
                report.problems.push(VerifyProblem::Missing { key: key.clone() });
                continue;
            }
        };

        if actual_size != ingredient.size {
            report.problems.push(VerifyProblem::SizeMismatch {
                key: key.clone(),
                expected: ingredient.size,
                actual: actual_size,
            });
            continue;
        }

        match hash::verify_file(&path, &ingredient.checksum.md5) {
            Ok(_) => debug!("verified {}", key),
            Err(e) => report.problems.push(VerifyProblem::ChecksumMismatch {
                key: key.clone(),
                expected: e.expected,
                actual: e.actual,
            }),
        }
    }

    let covered: BTreeSet<&str> = metadata
        .ingredients
        .values()
        .filter_map(|i| i.scope.as_ref())
        .flat_map(|scope| scope.keys().map(String::as_str))
        .collect();

    if let Some(current) = &metadata.kind.flavor_type.current_scope {
        for book in current.keys() {
            if !covered.contains(book.as_str()) {
                report
                    .problems
                    .push(VerifyProblem::UncoveredScope { book: book.clone() });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sb::{compute_ingredient, compute_ingredient_with_scope, single_book_scope};
    use std::fs;
    use tempfile::TempDir;

    fn bundle() -> (TempDir, Metadata) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("ingredients")).unwrap();
        let gen_path = dir.path().join("ingredients/GEN.usfm");
        fs::write(&gen_path, "\\id GEN\n").unwrap();
        let lic_path = dir.path().join("ingredients/LICENSE.md");
        fs::write(&lic_path, "license\n").unwrap();

        let mut m = Metadata::new();
        m.add_ingredient(
            "ingredients/GEN.usfm",
            compute_ingredient_with_scope(&gen_path, single_book_scope("GEN")).unwrap(),
        );
        m.add_ingredient("ingredients/LICENSE.md", compute_ingredient(&lic_path).unwrap());
        m.kind.flavor_type.current_scope = Some(single_book_scope("GEN"));
        (dir, m)
    }

    #[test]
    fn test_clean_bundle() {
        let (dir, m) = bundle();
        let report = verify_metadata(dir.path(), &m);
        assert_eq!(report.checked, 2);
        assert!(report.is_ok(), "{:?}", report.problems);
    }

    #[test]
    fn test_tampered_content() {
        let (dir, m) = bundle();
        // same length, different bytes
        fs::write(dir.path().join("ingredients/GEN.usfm"), "\\id EXO\n").unwrap();

        let report = verify_metadata(dir.path(), &m);
        assert_eq!(report.problems.len(), 1);
        assert!(matches!(
            &report.problems[0],
            VerifyProblem::ChecksumMismatch { key, .. } if key == "ingredients/GEN.usfm"
        ));
    }

    #[test]
    fn test_size_mismatch_and_missing() {
        let (dir, m) = bundle();
        let grown = "\\id GEN\n\\c 1\n";
        fs::write(dir.path().join("ingredients/GEN.usfm"), grown).unwrap();
        fs::remove_file(dir.path().join("ingredients/LICENSE.md")).unwrap();

        let report = verify_metadata(dir.path(), &m);
        assert_eq!(
            report.problems,
            vec![
                VerifyProblem::SizeMismatch {
                    key: "ingredients/GEN.usfm".to_string(),
                    expected: 8,
                    actual: grown.len() as u64,
                },
                VerifyProblem::Missing {
                    key: "ingredients/LICENSE.md".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_uncovered_scope() {
        let (dir, mut m) = bundle();
        m.kind
            .flavor_type
            .current_scope
            .as_mut()
            .unwrap()
            .insert("EXO".to_string(), Vec::new());

        let report = verify_metadata(dir.path(), &m);
        assert_eq!(
            report.problems,
            vec![VerifyProblem::UncoveredScope {
                book: "EXO".to_string()
            }]
        );
        assert_eq!(
            report.problems[0].to_string(),
            "currentScope book EXO has no ingredient"
        );
    }

    #[test]
    fn test_unsafe_key() {
        let (dir, mut m) = bundle();
        let ingredient = m.ingredients["ingredients/LICENSE.md"].clone();
        m.add_ingredient("../outside.md", ingredient);

        let report = verify_metadata(dir.path(), &m);
        assert_eq!(
            report.problems,
            vec![VerifyProblem::UnsafePath {
                key: "../outside.md".to_string()
            }]
        );
    }

    #[test]
    fn test_verify_bundle_reads_metadata() {
        let (dir, m) = bundle();
        m.write_to_file(dir.path()).unwrap();
        let report = verify_bundle(dir.path()).unwrap();
        assert!(report.is_ok());
    }

    #[test]
    fn test_verify_bundle_without_metadata() {
        let dir = TempDir::new().unwrap();
        assert!(verify_bundle(dir.path()).is_err());
    }
}
