// src/names/mod.rs
//! Localized book name resolution
//!
//! Each of the three name slots is filled from an ordered list of sources.
//! The canonical English name always fills the `en` bucket. For English
//! content, markup names overwrite it in place; for any other language the
//! sources fill a separate bucket under that language tag and `en` keeps
//! the canonical default.

pub mod usfm;

pub use usfm::{MarkupNames, find_usfm_file, parse_usfm_names};

use crate::books::{self, BookInfo};
use crate::sb::LocalizedName;
use crate::sb::metadata::LangMap;

/// One of the three localized name slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSlot {
    Abbr,
    Short,
    Long,
}

/// Where a localized name can come from, besides the canonical default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    /// Names in the book's markup (USFM `\toc` headers)
    Markup,
    /// The project title from the manifest
    Title,
}

impl NameSlot {
    pub const ALL: [NameSlot; 3] = [NameSlot::Abbr, NameSlot::Short, NameSlot::Long];

    /// Sources tried in order for this slot
    pub fn priority(self) -> &'static [NameSource] {
        match self {
            NameSlot::Long | NameSlot::Short => &[NameSource::Markup, NameSource::Title],
            NameSlot::Abbr => &[NameSource::Markup],
        }
    }

    fn canonical(self, book: &BookInfo) -> &'static str {
        match self {
            NameSlot::Abbr => book.abbr,
            NameSlot::Short => book.short,
            NameSlot::Long => book.long,
        }
    }

    fn from_markup(self, names: &MarkupNames) -> &str {
        match self {
            NameSlot::Abbr => &names.abbr,
            NameSlot::Short => &names.short,
            NameSlot::Long => &names.long,
        }
    }

    fn bucket(self, name: &mut LocalizedName) -> &mut LangMap {
        match self {
            NameSlot::Abbr => &mut name.abbr,
            NameSlot::Short => &mut name.short,
            NameSlot::Long => &mut name.long,
        }
    }
}

/// Candidate values supplied by the caller
#[derive(Debug, Clone, Copy, Default)]
pub struct NameCandidates<'a> {
    pub title: &'a str,
    pub markup: Option<&'a MarkupNames>,
}

impl NameCandidates<'_> {
    fn get(&self, slot: NameSlot, source: NameSource) -> Option<&str> {
        let value = match source {
            NameSource::Markup => slot.from_markup(self.markup?),
            NameSource::Title => self.title,
        };
        (!value.is_empty()).then_some(value)
    }

    /// First non-empty value for a slot, limited to the given sources
    fn first(&self, slot: NameSlot, allowed: impl Fn(NameSource) -> bool) -> Option<&str> {
        slot.priority()
            .iter()
            .copied()
            .filter(|s| allowed(*s))
            .find_map(|s| self.get(slot, s))
    }
}

/// Key used in `localizedNames` for a book (`book-gen`)
pub fn localized_name_key(book_id: &str) -> String {
    format!("book-{}", book_id.to_lowercase())
}

/// Resolve localized names for a book
///
/// Returns `None` for identifiers that are not canonical books, so nothing
/// is ever recorded for front matter or unknown projects. An empty
/// language tag is treated as English.
pub fn resolve(
    book_id: &str,
    lang: &str,
    candidates: NameCandidates<'_>,
) -> Option<(String, LocalizedName)> {
    let book = books::by_id(book_id)?;
    let english = lang.is_empty() || lang == "en";
    let mut name = LocalizedName::default();

    for slot in NameSlot::ALL {
        let canonical = slot.canonical(book);
        let bucket = slot.bucket(&mut name);

        if english {
            let value = candidates
                .first(slot, |s| s == NameSource::Markup)
                .unwrap_or(canonical);
            bucket.insert("en".to_string(), value.to_string());
        } else {
            bucket.insert("en".to_string(), canonical.to_string());
            if let Some(value) = candidates.first(slot, |_| true) {
                bucket.insert(lang.to_string(), value.to_string());
            }
        }
    }

    Some((localized_name_key(book.id), name))
}
