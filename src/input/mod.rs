// src/input/mod.rs
//! Loads already-extracted page text from disk.
//!
//! Two layouts are accepted: a `.json` array of `{"page_number", "text"}`
//! objects, or plain text with pages separated by form feeds (`\x0c`), as
//! written by `pdftotext`.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::PageText;
use crate::utils::error::InputError;

const PAGE_SEPARATOR: char = '\x0c';

static INLINE_SPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\u{a0}]+").expect("Failed to compile INLINE_SPACE_RE"));

/// Reads the pages of one document.
pub async fn load_pages(path: &Path) -> Result<Vec<PageText>, InputError> {
    tracing::info!("Loading page text from {}", path.display());
    let raw = tokio::fs::read_to_string(path).await?;

    let is_json = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
    let pages = if is_json {
        parse_json_pages(&raw)?
    } else {
        split_pages(&raw)
    };

    tracing::debug!("Loaded {} pages ({} bytes) from {}", pages.len(), raw.len(), path.display());
    Ok(pages)
}

/// Parses a JSON page array, cleaning each page's text.
pub fn parse_json_pages(raw: &str) -> Result<Vec<PageText>, InputError> {
    let pages: Vec<PageText> = serde_json::from_str(raw)?;
    Ok(pages
        .into_iter()
        .map(|page| PageText::new(page.page_number, clean_text(&page.text)))
        .collect())
}

/// Splits form-feed separated text into pages numbered from 1.
///
/// A trailing separator does not open an extra page; an all-whitespace file
/// yields no pages.
pub fn split_pages(raw: &str) -> Vec<PageText> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    let mut chunks: Vec<&str> = raw.split(PAGE_SEPARATOR).collect();
    if chunks.len() > 1 && chunks.last().map_or(false, |c| c.trim().is_empty()) {
        chunks.pop();
    }
    chunks
        .into_iter()
        .enumerate()
        .map(|(idx, chunk)| PageText::new(idx as u32 + 1, clean_text(chunk)))
        .collect()
}

/// Normalizes line endings, collapses runs of inline whitespace and strips
/// trailing blanks from every line.
pub fn clean_text(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    normalized
        .lines()
        .map(|line| INLINE_SPACE_RE.replace_all(line, " ").trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages_numbers_from_one() {
        let pages = split_pages("MORTGAGE\r\npage one\x0cPROMISSORY   NOTE\tpage two\x0c");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0], PageText::new(1, "MORTGAGE\npage one"));
        assert_eq!(pages[1], PageText::new(2, "PROMISSORY NOTE page two"));
    }

    #[test]
    fn test_split_pages_keeps_blank_middle_pages() {
        let pages = split_pages("one\x0c\x0cthree");
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].text, "");
        assert_eq!(pages[2].page_number, 3);
    }

    #[test]
    fn test_whitespace_only_input_has_no_pages() {
        assert!(split_pages("  \n\x0c \n").is_empty());
    }

    #[test]
    fn test_parse_json_pages() {
        let pages = parse_json_pages(r#"[{"page_number": 3, "text": "DEED   \r\nGrantor"}]"#).unwrap();
        assert_eq!(pages, vec![PageText::new(3, "DEED\nGrantor")]);
    }

    #[test]
    fn test_negative_page_number_is_a_parse_error() {
        let err = parse_json_pages(r#"[{"page_number": -1, "text": "x"}]"#).unwrap_err();
        assert!(matches!(err, InputError::Parse(_)));
    }

    #[test]
    fn test_load_pages_from_text_file() {
        let path = std::env::temp_dir().join(format!("mortgage_sections_input_{}.txt", std::process::id()));
        std::fs::write(&path, "FLOOD HAZARD DETERMINATION\x0cTAX RECORD INFORMATION").unwrap();

        let pages = tokio_test::block_on(load_pages(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].text, "TAX RECORD INFORMATION");
    }

    #[test]
    fn test_load_pages_missing_file() {
        let path = std::env::temp_dir().join("mortgage_sections_does_not_exist.txt");
        let err = tokio_test::block_on(load_pages(&path)).unwrap_err();
        assert!(matches!(err, InputError::Io(_)));
    }
}
