//! Split solicitation PDFs into per-section documents and add fillable
//! fields to the sections that collect candidate input.
//!
//! ```ignore
//! use solicitation_splitter::{OutputStore, Pipeline};
//!
//! let pipeline = Pipeline::new(OutputStore::new("processed"));
//! let written = pipeline.process("uploads/solicitation.pdf");
//! ```

pub mod assembler;
pub mod config;
pub mod error;
pub mod form_fields;
pub mod identifier;
pub mod models;
pub mod pdf_processor;
pub mod pipeline;
pub mod sections;
pub mod storage;
pub mod utils;

pub use error::{Result, SplitError};
pub use models::{FieldKind, FieldRect, FieldSpec, ProcessingReport, SectionKind};
pub use pdf_processor::SourceDocument;
pub use pipeline::Pipeline;
pub use sections::ReopenPolicy;
pub use storage::OutputStore;
