// src/rc/manifest.rs
//! RC manifest (manifest.yaml) parsing and data structures

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer};
use std::path::Path;

/// File name of the manifest inside an RC repository
pub const MANIFEST_FILE: &str = "manifest.yaml";

/// Root structure of manifest.yaml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub dublin_core: DublinCore,

    #[serde(default)]
    pub checking: Checking,

    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
}

/// The dublin_core block
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DublinCore {
    #[serde(rename = "conformsto", deserialize_with = "lenient_string")]
    pub conforms_to: String,
    #[serde(deserialize_with = "lenient_string_list")]
    pub contributor: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub creator: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub format: String,
    #[serde(deserialize_with = "lenient_string")]
    pub identifier: String,
    #[serde(deserialize_with = "lenient_string")]
    pub issued: String,
    pub language: Language,
    #[serde(deserialize_with = "lenient_string")]
    pub modified: String,
    #[serde(deserialize_with = "lenient_string")]
    pub publisher: String,
    #[serde(deserialize_with = "lenient_string_list")]
    pub relation: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub rights: String,
    #[serde(deserialize_with = "null_as_default")]
    pub source: Vec<Source>,
    #[serde(deserialize_with = "lenient_string")]
    pub subject: String,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(deserialize_with = "lenient_string")]
    pub version: String,
}

/// Language of the RC content
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Language {
    #[serde(deserialize_with = "lenient_string")]
    pub direction: String,
    #[serde(deserialize_with = "lenient_string")]
    pub identifier: String,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
}

/// A source the RC was derived from
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Source {
    #[serde(deserialize_with = "lenient_string")]
    pub identifier: String,
    #[serde(deserialize_with = "lenient_string")]
    pub language: String,
    #[serde(deserialize_with = "lenient_string")]
    pub version: String,
}

/// The checking block
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Checking {
    #[serde(deserialize_with = "lenient_string_list")]
    pub checking_entity: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub checking_level: String,
}

/// One project (content unit) of the RC
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "lenient_string_list")]
    pub categories: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub identifier: String,
    #[serde(deserialize_with = "lenient_string")]
    pub path: String,
    pub sort: i64,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub versification: String,
}

impl Project {
    /// Project path relative to the RC root, without a leading "./"
    pub fn relative_path(&self) -> &str {
        self.path.strip_prefix("./").unwrap_or(&self.path)
    }
}

impl Manifest {
    /// Load manifest.yaml from an RC directory
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ManifestNotFound(dir.to_path_buf()));
            }
            Err(e) => return Err(Error::ManifestRead(e)),
        };
        Self::parse(&content)
    }

    /// Parse manifest YAML from a string
    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// The dublin_core subject, which selects the conversion handler
    pub fn subject(&self) -> &str {
        &self.dublin_core.subject
    }

    /// The language tag of the content (e.g. "en", "hi")
    pub fn language_tag(&self) -> &str {
        &self.dublin_core.language.identifier
    }
}

/// Accept any YAML scalar as a string
///
/// RC manifests in the wild write `version: 85` or `issued: 2024-01-01`
/// unquoted; both must survive as their textual form. `null` becomes "".
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    scalar_to_string(value).map_err(serde::de::Error::custom)
}

fn lenient_string_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::Null => Ok(Vec::new()),
        serde_yaml::Value::Sequence(items) => items
            .into_iter()
            .map(scalar_to_string)
            .collect::<std::result::Result<_, _>>()
            .map_err(serde::de::Error::custom),
        other => scalar_to_string(other)
            .map(|s| vec![s])
            .map_err(serde::de::Error::custom),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn scalar_to_string(value: serde_yaml::Value) -> std::result::Result<String, String> {
    match value {
        serde_yaml::Value::Null => Ok(String::new()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Tagged(tagged) => scalar_to_string(tagged.value),
        other => Err(format!("expected a scalar, found {:?}", other)),
    }
}
