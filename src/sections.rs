//! Page classification by section header.

use crate::models::SectionKind;
use crate::pdf_processor::SourceDocument;
use indexmap::IndexMap;

/// Header text that opens each section, checked in this order.
pub const SECTION_HEADERS: &[(&str, SectionKind)] = &[
    ("Candidate References", SectionKind::References),
    ("Candidate Qualifications", SectionKind::Qualifications),
    ("Acknowledgment of Receipt", SectionKind::Acknowledgment),
];

/// Section pages keyed by kind. `Static` is always the first entry, the
/// rest follow in the order their header was first seen.
pub type SectionMap = IndexMap<SectionKind, Vec<usize>>;

/// What happens when a header shows up again after its section was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReopenPolicy {
    /// Start the section over; pages collected before are discarded.
    #[default]
    Restart,
    /// Keep collecting into the existing section.
    Append,
}

pub fn classify(source: &SourceDocument) -> SectionMap {
    classify_with(source, SECTION_HEADERS, ReopenPolicy::default())
}

pub fn classify_with(
    source: &SourceDocument,
    headers: &[(&str, SectionKind)],
    policy: ReopenPolicy,
) -> SectionMap {
    classify_texts(
        source.pages().iter().map(|page| page.text.as_deref()),
        headers,
        policy,
    )
}

/// Assign each page, in order, to the most recently opened section.
///
/// A page carrying a header belongs to the section it opens. `None` text
/// never matches a header.
pub fn classify_texts<'a>(
    texts: impl IntoIterator<Item = Option<&'a str>>,
    headers: &[(&str, SectionKind)],
    policy: ReopenPolicy,
) -> SectionMap {
    let mut sections = SectionMap::new();
    sections.insert(SectionKind::Static, Vec::new());
    let mut current = SectionKind::Static;

    for (index, text) in texts.into_iter().enumerate() {
        if let Some(kind) = text.and_then(|t| match_header(t, headers)) {
            log::debug!("Page {} opens section {}", index + 1, kind);
            current = kind;
            match sections.get_mut(&kind) {
                Some(pages) if policy == ReopenPolicy::Restart => {
                    let dropped = std::mem::take(pages);
                    if !dropped.is_empty() {
                        log::warn!(
                            "Header for {} seen again on page {}; discarding earlier pages {:?}",
                            kind,
                            index + 1,
                            dropped
                        );
                    }
                }
                Some(_) => {}
                None => {
                    sections.insert(kind, Vec::new());
                }
            }
        }
        sections.entry(current).or_default().push(index);
    }

    sections
}

fn match_header(text: &str, headers: &[(&str, SectionKind)]) -> Option<SectionKind> {
    headers
        .iter()
        .find(|(header, _)| text.contains(*header))
        .map(|(_, kind)| *kind)
}
