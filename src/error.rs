//! Error types for the splitting pipeline.

use std::path::PathBuf;

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, SplitError>;

/// Failures that abort processing of a document.
///
/// Per-page text problems never show up here: an unreadable page is
/// carried as `None` text and the pipeline keeps going.
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    /// The input could not be parsed as a PDF at all
    #[error("failed to open PDF {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    /// Object-graph operation failed on an already opened document
    #[error("PDF object error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Page selection referenced a page the source does not have
    #[error("page index {index} out of range for document with {page_count} pages")]
    PageOutOfRange { index: usize, page_count: usize },

    #[error("cannot assemble a document from an empty page selection")]
    EmptySelection,

    #[error("page index {0} selected more than once")]
    DuplicatePage(usize),

    /// Catalog has no usable /Pages root
    #[error("document has no page tree root")]
    MissingPageTree,

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing an output document failed
    #[error("failed to write {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },

    /// Requested output name does not exist in the store
    #[error("output not found: {0}")]
    OutputNotFound(String),
}

impl SplitError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SplitError::Io {
            path: path.into(),
            source,
        }
    }
}
