//! Solicitation number extraction.

use crate::pdf_processor::SourceDocument;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Shown in place of an identifier that could not be found.
pub const UNKNOWN_IDENTIFIER: &str = "Unknown";

static SOLICITATION_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)solicitation\s+(?:reference\s+)?number\b\s*:?\s*([^\s:]\S*)").unwrap()
});

/// Return the first solicitation number found, scanning pages in order.
pub fn extract_identifier(source: &SourceDocument) -> Option<String> {
    source.pages().iter().find_map(|page| {
        let text = page.text.as_deref()?;
        let found = find_in_text(text)?;
        log::info!("Found solicitation number '{}' on page {}", found, page.index + 1);
        Some(found)
    })
}

/// Like [`extract_identifier`] but opens the file itself; an unreadable
/// file counts as "not found".
pub fn extract_identifier_from_path(path: impl AsRef<Path>) -> Option<String> {
    match SourceDocument::open(path.as_ref()) {
        Ok(source) => extract_identifier(&source),
        Err(e) => {
            log::warn!("Identifier extraction skipped: {}", e);
            None
        }
    }
}

pub fn display_identifier(identifier: Option<&str>) -> &str {
    identifier.unwrap_or(UNKNOWN_IDENTIFIER)
}

fn find_in_text(text: &str) -> Option<String> {
    SOLICITATION_LABEL
        .captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
}
