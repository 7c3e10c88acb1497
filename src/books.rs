// src/books.rs

//! Canonical Bible book table
//!
//! The 66 books of the Protestant canon with their lowercase RC project
//! identifiers, uppercase USFM codes, canonical sort order and English
//! default names.

use std::collections::HashMap;
use std::sync::LazyLock;

/// One canonical book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookInfo {
    /// Lowercase identifier used by RC projects (e.g. "gen")
    pub id: &'static str,
    /// Uppercase USFM code (e.g. "GEN")
    pub code: &'static str,
    /// Canonical order, 1-66
    pub sort: u32,
    /// English abbreviation (e.g. "Gen")
    pub abbr: &'static str,
    /// English short name (e.g. "Genesis")
    pub short: &'static str,
    /// English long name (e.g. "The Book of Genesis")
    pub long: &'static str,
}

const fn book(
    id: &'static str,
    code: &'static str,
    sort: u32,
    abbr: &'static str,
    short: &'static str,
    long: &'static str,
) -> BookInfo {
    BookInfo { id, code, sort, abbr, short, long }
}

/// All 66 books in canonical order
pub static ALL_BOOKS: [BookInfo; 66] = [
    book("gen", "GEN", 1, "Gen", "Genesis", "The Book of Genesis"),
    book("exo", "EXO", 2, "Exo", "Exodus", "The Book of Exodus"),
    book("lev", "LEV", 3, "Lev", "Leviticus", "The Book of Leviticus"),
    book("num", "NUM", 4, "Num", "Numbers", "The Book of Numbers"),
    book("deu", "DEU", 5, "Deu", "Deuteronomy", "The Book of Deuteronomy"),
    book("jos", "JOS", 6, "Jos", "Joshua", "The Book of Joshua"),
    book("jdg", "JDG", 7, "Jdg", "Judges", "The Book of Judges"),
    book("rut", "RUT", 8, "Rut", "Ruth", "The Book of Ruth"),
    book("1sa", "1SA", 9, "1Sa", "First Samuel", "The First Book of Samuel"),
    book("2sa", "2SA", 10, "2Sa", "Second Samuel", "The Second Book of Samuel"),
    book("1ki", "1KI", 11, "1Ki", "First Kings", "The First Book of Kings"),
    book("2ki", "2KI", 12, "2Ki", "Second Kings", "The Second Book of Kings"),
    book("1ch", "1CH", 13, "1Ch", "First Chronicles", "The First Book of the Chronicles"),
    book("2ch", "2CH", 14, "2Ch", "Second Chronicles", "The Second Book of the Chronicles"),
    book("ezr", "EZR", 15, "Ezr", "Ezra", "The Book of Ezra"),
    book("neh", "NEH", 16, "Neh", "Nehemiah", "The Book of Nehemiah"),
    book("est", "EST", 17, "Est", "Esther", "The Book of Esther"),
    book("job", "JOB", 18, "Job", "Job", "The Book of Job"),
    book("psa", "PSA", 19, "Psa", "Psalms", "The Book of Psalms"),
    book("pro", "PRO", 20, "Pro", "Proverbs", "The Book of Proverbs"),
    book("ecc", "ECC", 21, "Ecc", "Ecclesiastes", "The Book of Ecclesiastes"),
    book("sng", "SNG", 22, "Sng", "Song of Songs", "The Song of Songs"),
    book("isa", "ISA", 23, "Isa", "Isaiah", "The Book of Isaiah"),
    book("jer", "JER", 24, "Jer", "Jeremiah", "The Book of Jeremiah"),
    book("lam", "LAM", 25, "Lam", "Lamentations", "The Book of Lamentations"),
    book("ezk", "EZK", 26, "Ezk", "Ezekiel", "The Book of Ezekiel"),
    book("dan", "DAN", 27, "Dan", "Daniel", "The Book of Daniel"),
    book("hos", "HOS", 28, "Hos", "Hosea", "The Book of Hosea"),
    book("jol", "JOL", 29, "Jol", "Joel", "The Book of Joel"),
    book("amo", "AMO", 30, "Amo", "Amos", "The Book of Amos"),
    book("oba", "OBA", 31, "Oba", "Obadiah", "The Book of Obadiah"),
    book("jon", "JON", 32, "Jon", "Jonah", "The Book of Jonah"),
    book("mic", "MIC", 33, "Mic", "Micah", "The Book of Micah"),
    book("nam", "NAM", 34, "Nam", "Nahum", "The Book of Nahum"),
    book("hab", "HAB", 35, "Hab", "Habakkuk", "The Book of Habakkuk"),
    book("zep", "ZEP", 36, "Zep", "Zephaniah", "The Book of Zephaniah"),
    book("hag", "HAG", 37, "Hag", "Haggai", "The Book of Haggai"),
    book("zec", "ZEC", 38, "Zec", "Zechariah", "The Book of Zechariah"),
    book("mal", "MAL", 39, "Mal", "Malachi", "The Book of Malachi"),
    book("mat", "MAT", 40, "Mat", "Matthew", "The Gospel of Matthew"),
    book("mrk", "MRK", 41, "Mrk", "Mark", "The Gospel of Mark"),
    book("luk", "LUK", 42, "Luk", "Luke", "The Gospel of Luke"),
    book("jhn", "JHN", 43, "Jhn", "John", "The Gospel of John"),
    book("act", "ACT", 44, "Act", "Acts", "The Acts of the Apostles"),
    book("rom", "ROM", 45, "Rom", "Romans", "The Letter of Paul to the Romans"),
    book("1co", "1CO", 46, "1Co", "First Corinthians", "The First Letter of Paul to the Corinthians"),
    book("2co", "2CO", 47, "2Co", "Second Corinthians", "The Second Letter of Paul to the Corinthians"),
    book("gal", "GAL", 48, "Gal", "Galatians", "The Letter of Paul to the Galatians"),
    book("eph", "EPH", 49, "Eph", "Ephesians", "The Letter of Paul to the Ephesians"),
    book("php", "PHP", 50, "Php", "Philippians", "The Letter of Paul to the Philippians"),
    book("col", "COL", 51, "Col", "Colossians", "The Letter of Paul to the Colossians"),
    book("1th", "1TH", 52, "1Th", "First Thessalonians", "The First Letter of Paul to the Thessalonians"),
    book("2th", "2TH", 53, "2Th", "Second Thessalonians", "The Second Letter of Paul to the Thessalonians"),
    book("1ti", "1TI", 54, "1Ti", "First Timothy", "The First Letter of Paul to Timothy"),
    book("2ti", "2TI", 55, "2Ti", "Second Timothy", "The Second Letter of Paul to Timothy"),
    book("tit", "TIT", 56, "Tit", "Titus", "The Letter of Paul to Titus"),
    book("phm", "PHM", 57, "Phm", "Philemon", "The Letter of Paul to Philemon"),
    book("heb", "HEB", 58, "Heb", "Hebrews", "The Letter to the Hebrews"),
    book("jas", "JAS", 59, "Jas", "James", "The Letter of James"),
    book("1pe", "1PE", 60, "1Pe", "First Peter", "The First Letter of Peter"),
    book("2pe", "2PE", 61, "2Pe", "Second Peter", "The Second Letter of Peter"),
    book("1jn", "1JN", 62, "1Jn", "First John", "The First Letter of John"),
    book("2jn", "2JN", 63, "2Jn", "Second John", "The Second Letter of John"),
    book("3jn", "3JN", 64, "3Jn", "Third John", "The Third Letter of John"),
    book("jud", "JUD", 65, "Jud", "Jude", "The Letter of Jude"),
    book("rev", "REV", 66, "Rev", "Revelation", "The Book of Revelation"),
];

static BY_ID: LazyLock<HashMap<&'static str, &'static BookInfo>> =
    LazyLock::new(|| ALL_BOOKS.iter().map(|b| (b.id, b)).collect());

/// Look up a book by RC project identifier, case-insensitively
pub fn by_id(id: &str) -> Option<&'static BookInfo> {
    BY_ID.get(id.to_lowercase().as_str()).copied()
}

/// USFM code for a project identifier
///
/// Unknown identifiers are uppercased as-is, so "frt" becomes "FRT".
pub fn code_from_project_id(id: &str) -> String {
    match by_id(id) {
        Some(b) => b.code.to_string(),
        None => id.to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_ordered_and_unique() {
        for (i, b) in ALL_BOOKS.iter().enumerate() {
            assert_eq!(b.sort as usize, i + 1, "{} out of order", b.id);
            assert_eq!(b.code, b.id.to_uppercase());
        }
        assert_eq!(BY_ID.len(), 66);
    }

    #[test]
    fn test_lookups_are_case_insensitive() {
        assert_eq!(by_id("GEN").unwrap().short, "Genesis");
        assert_eq!(by_id("Rev").unwrap().long, "The Book of Revelation");
        assert!(by_id("1Jn").is_some());
        assert!(by_id("frt").is_none());
    }

    #[test]
    fn test_code_from_project_id() {
        assert_eq!(code_from_project_id("mat"), "MAT");
        assert_eq!(code_from_project_id("frt"), "FRT");
    }
}
