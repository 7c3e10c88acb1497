// src/sb/metadata.rs
//! Scripture Burrito metadata.json model and the shared metadata builder
//!
//! Every handler starts from [`build_base_metadata`], which fills in the
//! identification, language and ID-authority blocks from the RC manifest,
//! then adds its own flavor, ingredients and localized names.

use crate::error::{Error, Result};
use crate::rc::Manifest;
use crate::sb::ingredient::{Ingredient, Scope};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// File name of the SB metadata document
pub const METADATA_FILE: &str = "metadata.json";

/// Language-tag keyed strings (`{"en": "..."}`)
pub type LangMap = BTreeMap<String, String>;

/// Top-level structure of metadata.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub format: String,
    pub meta: Meta,
    #[serde(rename = "idAuthorities")]
    pub id_authorities: BTreeMap<String, IdAuthorityEntry>,
    pub identification: Identification,
    pub languages: Vec<LanguageEntry>,
    #[serde(rename = "type")]
    pub kind: Type,
    pub confidential: bool,
    #[serde(
        rename = "localizedNames",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub localized_names: BTreeMap<String, LocalizedName>,
    pub ingredients: BTreeMap<String, Ingredient>,
    pub copyright: Copyright,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub version: String,
    pub category: String,
    pub generator: Generator,
    pub default_locale: String,
    pub date_created: String,
    pub normalization: String,
}

/// The software that produced the bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Generator {
    pub software_name: String,
    pub software_version: String,
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdAuthorityEntry {
    pub id: String,
    pub name: LangMap,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Identification {
    /// authority -> abbreviation -> entry
    pub primary: BTreeMap<String, BTreeMap<String, PrimaryEntry>>,
    pub name: LangMap,
    pub description: LangMap,
    pub abbreviation: LangMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryEntry {
    pub revision: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageEntry {
    pub tag: String,
    pub name: LangMap,
    pub script_direction: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Type {
    #[serde(rename = "flavorType")]
    pub flavor_type: FlavorType,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlavorType {
    pub name: String,
    pub flavor: Flavor,
    #[serde(
        rename = "currentScope",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub current_scope: Option<Scope>,
}

/// Flavor details; the optional fields are only set for scripture
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flavor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usfm_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
}

impl Flavor {
    /// A flavor with only a name
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

/// Abbreviation, short and long names of one book, keyed by language tag
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocalizedName {
    pub abbr: LangMap,
    pub short: LangMap,
    pub long: LangMap,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Copyright {
    #[serde(rename = "shortStatements")]
    pub short_statements: Vec<CopyrightStatement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyrightStatement {
    pub statement: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

/// The two ID authorities bundles are published under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdAuthority {
    /// Door43 Burrito Truck (OBS family)
    BurritoTruck,
    /// Door43 uW Burritos (scripture and helps)
    UwBurritos,
}

impl IdAuthority {
    /// Key used in `idAuthorities` and `identification.primary`
    pub fn key(self) -> &'static str {
        match self {
            Self::BurritoTruck => "BurritoTruck",
            Self::UwBurritos => "uWBurritos",
        }
    }

    fn entry(self) -> IdAuthorityEntry {
        let (id, name) = match self {
            Self::BurritoTruck => ("https://git.door43.org/BurritoTruck", "Door43 Burrito Truck"),
            Self::UwBurritos => ("https://git.door43.org/uW", "Door43 uW Burritos"),
        };
        IdAuthorityEntry {
            id: id.to_string(),
            name: lang_map("en", name),
        }
    }
}

/// Which copyright statement template to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyrightStyle {
    /// `© {publisher} {year}, {rights}`
    Standard,
    /// `Copyright © {year} by {publisher}` (narrative content)
    Narrative,
}

impl Metadata {
    /// An empty record carrying the fixed SB defaults
    pub fn new() -> Self {
        Self {
            format: "scripture burrito".to_string(),
            meta: Meta {
                version: "1.0.0".to_string(),
                category: "source".to_string(),
                generator: Generator {
                    software_name: env!("CARGO_PKG_NAME").to_string(),
                    software_version: env!("CARGO_PKG_VERSION").to_string(),
                    user_name: String::new(),
                },
                default_locale: "en".to_string(),
                date_created: String::new(),
                normalization: "NFC".to_string(),
            },
            id_authorities: BTreeMap::new(),
            identification: Identification::default(),
            languages: Vec::new(),
            kind: Type::default(),
            confidential: false,
            localized_names: BTreeMap::new(),
            ingredients: BTreeMap::new(),
            copyright: Copyright::default(),
        }
    }

    /// Set the flavor type and flavor
    pub fn set_flavor(&mut self, type_name: &str, flavor: Flavor) {
        self.kind.flavor_type.name = type_name.to_string();
        self.kind.flavor_type.flavor = flavor;
    }

    /// Record an ingredient under its output-relative key
    pub fn add_ingredient(&mut self, key: impl Into<String>, ingredient: Ingredient) {
        self.ingredients.insert(key.into(), ingredient);
    }

    /// Serialize as pretty JSON with two-space indent and a trailing newline
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self).map_err(Error::MetadataSerialize)?;
        json.push('\n');
        Ok(json)
    }

    /// Parse a metadata.json document
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(Error::MetadataParse)
    }

    /// Write metadata.json into `dir`
    pub fn write_to_file(&self, dir: &Path) -> Result<()> {
        let json = self.to_json()?;
        let path = dir.join(METADATA_FILE);
        std::fs::write(&path, json).map_err(Error::io(format!("writing {}", path.display())))
    }

    /// Read metadata.json from `dir`
    pub fn read_from_file(dir: &Path) -> Result<Self> {
        let path = dir.join(METADATA_FILE);
        let content = std::fs::read_to_string(&path)
            .map_err(Error::io(format!("reading {}", path.display())))?;
        Self::from_json(&content)
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new()
    }
}

fn lang_map(tag: &str, value: &str) -> LangMap {
    let mut map = LangMap::new();
    map.insert(tag.to_string(), value.to_string());
    map
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`
pub fn timestamp_now() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

/// Build the metadata skeleton shared by all handlers
///
/// `abbreviation` overrides the default of the uppercased manifest
/// identifier when non-empty.
pub fn build_base_metadata(
    manifest: &Manifest,
    authority: IdAuthority,
    abbreviation: Option<&str>,
) -> Metadata {
    let dc = &manifest.dublin_core;
    let now = timestamp_now();

    let abbr = match abbreviation {
        Some(a) if !a.is_empty() => a.to_string(),
        _ => dc.identifier.to_uppercase(),
    };

    let mut m = Metadata::new();
    m.meta.date_created = now.clone();
    m.id_authorities
        .insert(authority.key().to_string(), authority.entry());

    let mut by_abbr = BTreeMap::new();
    by_abbr.insert(
        abbr.clone(),
        PrimaryEntry {
            revision: "1".to_string(),
            timestamp: now,
        },
    );
    m.identification.primary.insert(authority.key().to_string(), by_abbr);
    m.identification.name = lang_map("en", &dc.title);
    m.identification.description = lang_map("en", &dc.title);
    m.identification.abbreviation = lang_map("en", &abbr);

    m.languages.push(LanguageEntry {
        tag: dc.language.identifier.clone(),
        name: lang_map("en", &dc.language.title),
        script_direction: dc.language.direction.clone(),
    });

    m
}

/// Year used in copyright statements: the first four characters of `issued`
fn copyright_year(issued: &str) -> String {
    let year: String = issued.chars().take(4).collect();
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        debug!("issued date {:?} does not start with a four-digit year", issued);
    }
    year
}

/// Build the copyright block from the manifest
pub fn build_copyright(manifest: &Manifest, style: CopyrightStyle) -> Copyright {
    let dc = &manifest.dublin_core;
    let year = copyright_year(&dc.issued);

    let statement = match style {
        CopyrightStyle::Standard => CopyrightStatement {
            statement: format!("\u{a9} {} {}, {}", dc.publisher, year, dc.rights),
            mimetype: Some("text/plain".to_string()),
            lang: Some("en".to_string()),
        },
        CopyrightStyle::Narrative => CopyrightStatement {
            statement: format!("Copyright \u{a9} {} by {}", year, dc.publisher),
            mimetype: None,
            lang: None,
        },
    };

    Copyright {
        short_statements: vec![statement],
    }
}
