use crate::error::{Result, SplitError};
use crate::utils::preview;
use pdf::content::{Content, Op, TextDrawAdjusted};
use pdf::file::FileOptions;
use pdf::object::Resolve;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// One page of the source with its plain text.
///
/// `text` is `None` when no extractor could read the page.
#[derive(Debug, Clone)]
pub struct Page {
    pub index: usize,
    pub text: Option<String>,
}

/// A loaded solicitation: the object graph used for assembly plus page text.
pub struct SourceDocument {
    path: Option<PathBuf>,
    document: lopdf::Document,
    pages: Vec<Page>,
}

impl SourceDocument {
    /// Parse `path` and extract the text of every page.
    ///
    /// Only a failure to parse the file is an error. Pages whose text cannot
    /// be read are kept with `text: None`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Opening PDF: {}", path.display());
        let document = lopdf::Document::load(path).map_err(|source| SplitError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let page_count = document.get_pages().len();
        log::debug!("PDF has {} pages", page_count);

        let primary = Self::extract_with_content_ops(path)
            .map(|texts| align_to_page_tree(texts, page_count, path))
            .unwrap_or_default();
        let pages = (0..page_count)
            .map(|index| {
                let primary_text = primary.get(index).cloned().flatten();
                Page {
                    index,
                    text: Self::merge_page_text(&document, index, primary_text),
                }
            })
            .collect();

        Ok(Self {
            path: Some(path.to_path_buf()),
            document,
            pages,
        })
    }

    /// Build a source from an in-memory document. Text comes from lopdf only.
    pub fn from_document(document: lopdf::Document) -> Self {
        let page_count = document.get_pages().len();
        let pages = (0..page_count)
            .map(|index| Page {
                index,
                text: Self::merge_page_text(&document, index, None),
            })
            .collect();
        Self {
            path: None,
            document,
            pages,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn document(&self) -> &lopdf::Document {
        &self.document
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page_text(&self, index: usize) -> Option<&str> {
        self.pages.get(index).and_then(|p| p.text.as_deref())
    }

    /// Prefer the content-operator text; fall back to lopdf when it is
    /// missing or empty.
    fn merge_page_text(
        document: &lopdf::Document,
        index: usize,
        primary: Option<String>,
    ) -> Option<String> {
        let text = match primary {
            Some(text) if !text.is_empty() => Some(text),
            other => lopdf_page_text(document, index).or(other),
        };

        match &text {
            Some(t) if !t.is_empty() => {
                log::debug!("Page {} extracted {} chars", index + 1, t.len());
                log::trace!("Page {} preview: {}", index + 1, preview(t, 100));
            }
            Some(_) => log::warn!("No text extracted from page {}", index + 1),
            None => log::warn!("Page {} is unreadable, treating it as empty", index + 1),
        }
        text
    }

    /// Per-page text from the content-stream operators, or `None` when the
    /// `pdf` crate cannot open the file.
    fn extract_with_content_ops(path: &Path) -> Option<Vec<Option<String>>> {
        let file = match FileOptions::cached().open(path) {
            Ok(file) => file,
            Err(e) => {
                log::warn!(
                    "Content-stream text extraction unavailable for {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };
        let resolver = &file;

        let texts = (0..file.num_pages())
            .map(|page_num| match file.get_page(page_num) {
                Ok(page) => {
                    let mut page_text = String::new();
                    if let Some(content) = &page.contents {
                        if let Err(e) = extract_text_from_content(resolver, content, &mut page_text)
                        {
                            log::warn!(
                                "Failed to extract from page {} content: {}",
                                page_num + 1,
                                e
                            );
                            return None;
                        }
                    }
                    Some(clean_extracted_text(&page_text))
                }
                Err(e) => {
                    log::warn!("Failed to get page {}: {}", page_num + 1, e);
                    None
                }
            })
            .collect();
        Some(texts)
    }
}

/// Content-operator text is matched to lopdf pages by position, which is
/// only sound when both parsers see the same number of pages.
fn align_to_page_tree(
    texts: Vec<Option<String>>,
    page_count: usize,
    path: &Path,
) -> Vec<Option<String>> {
    if texts.len() == page_count {
        return texts;
    }
    log::warn!(
        "Page count mismatch for {}: text layer has {}, page tree has {}; using lopdf text only",
        path.display(),
        texts.len(),
        page_count
    );
    Vec::new()
}

fn lopdf_page_text(document: &lopdf::Document, index: usize) -> Option<String> {
    let page_number = u32::try_from(index + 1).ok()?;
    match document.extract_text(&[page_number]) {
        Ok(text) => Some(clean_extracted_text(&text)),
        Err(e) => {
            log::debug!("lopdf text extraction failed on page {}: {}", index + 1, e);
            None
        }
    }
}

/// Collapse every whitespace run to a single space.
pub fn clean_extracted_text(raw_text: &str) -> String {
    WHITESPACE.replace_all(raw_text.trim(), " ").into_owned()
}

fn extract_text_from_content(
    resolver: &impl Resolve,
    content: &Content,
    text: &mut String,
) -> std::result::Result<(), pdf::error::PdfError> {
    for op in content.operations(resolver)? {
        match op {
            Op::TextDraw { text: t } => {
                text.push_str(&t.to_string_lossy());
                text.push(' ');
            }
            Op::TextDrawAdjusted { array } => {
                for item in array {
                    match item {
                        TextDrawAdjusted::Text(s) => text.push_str(&s.to_string_lossy()),
                        // large negative kerning usually separates words
                        TextDrawAdjusted::Spacing(gap) if gap < -200.0 => text.push(' '),
                        TextDrawAdjusted::Spacing(_) => {}
                    }
                }
                text.push(' ');
            }
            Op::TextNewline => text.push('\n'),
            Op::MoveTextPosition { translation } => {
                if translation.y.abs() > 0.0 {
                    text.push('\n');
                }
            }
            _ => {}
        }
    }
    Ok(())
}
