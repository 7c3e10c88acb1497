// tests/common/mod.rs

//! Shared fixture builders for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Builder for an RC directory on disk
///
/// Keep the returned TempDir alive for as long as the RC is used.
pub struct RcFixture {
    pub dir: TempDir,
    identifier: String,
    subject: String,
    language: String,
    title: String,
    issued: String,
    projects: Vec<(String, String, String)>,
}

impl RcFixture {
    pub fn new(identifier: &str, subject: &str) -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            identifier: identifier.to_string(),
            subject: subject.to_string(),
            language: "en".to_string(),
            title: format!("Test {}", subject),
            issued: "2024-01-15".to_string(),
            projects: Vec::new(),
        }
    }

    pub fn language(mut self, tag: &str) -> Self {
        self.language = tag.to_string();
        self
    }

    /// Add a project entry without creating its file
    pub fn project(mut self, identifier: &str, path: &str, title: &str) -> Self {
        self.projects
            .push((identifier.to_string(), path.to_string(), title.to_string()));
        self
    }

    /// Add a project entry and write its content
    pub fn project_file(self, identifier: &str, path: &str, title: &str, content: &str) -> Self {
        let fixture = self.project(identifier, path, title);
        fixture.file(path, content)
    }

    /// Write a file relative to the RC root, creating parents
    pub fn file(self, rel: &str, content: &str) -> Self {
        write_file(self.dir.path(), rel, content);
        self
    }

    /// Render manifest.yaml
    pub fn manifest_yaml(&self) -> String {
        let mut yaml = format!(
            "dublin_core:\n  conformsto: 'rc0.2'\n  identifier: '{}'\n  subject: '{}'\n  title: '{}'\n  issued: '{}'\n  publisher: 'unfoldingWord'\n  rights: 'CC BY-SA 4.0'\n  version: '1'\n  language:\n    identifier: '{}'\n    title: 'Test Language'\n    direction: 'ltr'\n",
            self.identifier, self.subject, self.title, self.issued, self.language
        );
        yaml.push_str("checking:\n  checking_level: '3'\n");
        if self.projects.is_empty() {
            yaml.push_str("projects: []\n");
        } else {
            yaml.push_str("projects:\n");
            for (sort, (id, path, title)) in self.projects.iter().enumerate() {
                yaml.push_str(&format!(
                    "  - identifier: '{}'\n    path: './{}'\n    title: '{}'\n    sort: {}\n    versification: 'ufw'\n    categories: []\n",
                    id, path, title, sort
                ));
            }
        }
        yaml
    }

    /// Write manifest.yaml and return the RC directory
    pub fn build(self) -> TempDir {
        let yaml = self.manifest_yaml();
        write_file(self.dir.path(), "manifest.yaml", &yaml);
        self.dir
    }
}

pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

pub fn usfm(code: &str, long: &str, short: &str) -> String {
    format!(
        "\\id {code} Test\n\\usfm 3.0\n\\h {short}\n\\toc1 {long}\n\\toc2 {short}\n\\toc3 {abbr}\n\\mt {short}\n\\c 1\n\\v 1 In the beginning.\n",
        abbr = &code[..3].to_lowercase()
    )
}

/// A minimal Aligned Bible RC with Genesis and Exodus
pub fn bible_rc() -> TempDir {
    RcFixture::new("ult", "Aligned Bible")
        .project_file("gen", "01-GEN.usfm", "Genesis", &usfm("GEN", "The Book of Genesis", "Genesis"))
        .project_file("exo", "02-EXO.usfm", "Exodus", &usfm("EXO", "The Book of Exodus", "Exodus"))
        .file("LICENSE.md", "# License\n")
        .file("README.md", "# ULT\n")
        .build()
}

/// A TWL RC; the payload is embedded as `en_tw/bible` when `with_payload`
pub fn twl_rc(with_payload: bool) -> TempDir {
    let mut fixture = RcFixture::new("twl", "TSV Translation Words Links")
        .project_file("gen", "twl_GEN.tsv", "Genesis", TWL_GEN)
        .file("LICENSE.md", "# License\n");
    if with_payload {
        fixture = fixture
            .file("en_tw/bible/kt/god.md", "# God\n")
            .file("en_tw/bible/names/adam.md", "# Adam\n")
            .file("en_tw/bible/other/beginning.md", "# Beginning\n");
    }
    fixture.build()
}

pub const TWL_GEN: &str = "Reference\tID\tTags\tOrigWords\tOccurrence\tTWLink\n\
1:1\tabcd\tkeyterm\tאֱלֹהִ֑ים\t1\trc://*/tw/dict/bible/kt/god\n\
1:1\tefgh\t\tבְּרֵאשִׁ֖ית\t1\trc://*/tw/dict/bible/other/beginning\n\
2:19\tijkl\tname\tהָֽאָדָ֔ם\t1\trc://*/tw/dict/bible/names/adam\n";

/// One RC fixture per supported subject
pub fn rc_for_subject(subject: &str) -> TempDir {
    match subject {
        "Aligned Bible" | "Bible" | "Hebrew Old Testament" | "Greek New Testament" => {
            RcFixture::new("bib", subject)
                .project_file("gen", "01-GEN.usfm", "Genesis", &usfm("GEN", "Genesis", "Genesis"))
                .build()
        }
        "Open Bible Stories" => RcFixture::new("obs", subject)
            .project("obs", "content", "Open Bible Stories")
            .file("content/01.md", "# The Creation\n")
            .file("content/front/intro.md", "# Intro\n")
            .build(),
        "Translation Words" => RcFixture::new("tw", subject)
            .project("bible", "bible", "translationWords")
            .file("bible/kt/god.md", "# God\n")
            .file("bible/config.yaml", "kt: {}\n")
            .build(),
        "Translation Academy" => RcFixture::new("ta", subject)
            .project("translate", "translate", "Translation Manual")
            .file("translate/toc.yaml", "title: Manual\n")
            .file("translate/figs-metaphor/01.md", "# Metaphor\n")
            .build(),
        "TSV Translation Notes" => RcFixture::new("tn", subject)
            .project_file("gen", "tn_GEN.tsv", "Genesis", "Reference\tID\tNote\n1:1\tab12\tnote\n")
            .build(),
        "TSV Translation Questions" => RcFixture::new("tq", subject)
            .project_file("gen", "tq_GEN.tsv", "Genesis", "Reference\tID\tQuestion\n1:1\tab12\tq\n")
            .build(),
        "TSV Translation Words Links" => twl_rc(true),
        "TSV OBS Study Notes" => obs_tsv_rc("obs-sn", subject, "sn_OBS.tsv"),
        "TSV OBS Study Questions" => obs_tsv_rc("obs-sq", subject, "sq_OBS.tsv"),
        "TSV OBS Translation Notes" => obs_tsv_rc("obs-tn", subject, "tn_OBS.tsv"),
        "TSV OBS Translation Questions" => obs_tsv_rc("obs-tq", subject, "tq_OBS.tsv"),
        other => panic!("no fixture for {other}"),
    }
}

fn obs_tsv_rc(identifier: &str, subject: &str, file: &str) -> TempDir {
    RcFixture::new(identifier, subject)
        .project_file("obs", file, "Open Bible Stories", "Reference\tID\tNote\n1:1\tab12\tnote\n")
        .build()
}
