//! End-to-end processing of one solicitation.

use crate::assembler::assemble;
use crate::error::Result;
use crate::form_fields::{inject_fields, is_fillable};
use crate::identifier::{display_identifier, extract_identifier};
use crate::models::{OutputRecord, ProcessingReport};
use crate::pdf_processor::SourceDocument;
use crate::sections::{classify_with, ReopenPolicy, SECTION_HEADERS};
use crate::storage::OutputStore;
use chrono::Utc;
use std::path::Path;

pub struct Pipeline {
    store: OutputStore,
    reopen_policy: ReopenPolicy,
}

impl Pipeline {
    pub fn new(store: OutputStore) -> Self {
        Self {
            store,
            reopen_policy: ReopenPolicy::default(),
        }
    }

    pub fn with_reopen_policy(mut self, policy: ReopenPolicy) -> Self {
        self.reopen_policy = policy;
        self
    }

    pub fn store(&self) -> &OutputStore {
        &self.store
    }

    /// Split `input` and return the names of the files written.
    ///
    /// Any failure is logged and reported as an empty list. Files written
    /// before the failure are left in place.
    pub fn process(&self, input: impl AsRef<Path>) -> Vec<String> {
        let input = input.as_ref();
        match self.run(input) {
            Ok(report) => report.file_names(),
            Err(e) => {
                log::error!("Processing {} failed: {}", input.display(), e);
                Vec::new()
            }
        }
    }

    pub fn run(&self, input: impl AsRef<Path>) -> Result<ProcessingReport> {
        let input = input.as_ref();
        log::info!("Processing {}", input.display());
        let source = SourceDocument::open(input)?;
        self.run_source(&source)
    }

    /// Identifier, classification, then one output per non-empty section.
    pub fn run_source(&self, source: &SourceDocument) -> Result<ProcessingReport> {
        let input = source
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<in-memory>".to_string());
        let identifier = extract_identifier(source);
        if identifier.is_none() {
            log::warn!("No solicitation number found in {}", input);
        }
        let display = display_identifier(identifier.as_deref()).to_string();

        let sections = classify_with(source, SECTION_HEADERS, self.reopen_policy);

        let mut outputs = Vec::new();
        for (&section, pages) in &sections {
            if pages.is_empty() {
                continue;
            }

            let mut doc = assemble(source, pages)?;
            let fields_per_page = if is_fillable(section) {
                inject_fields(&mut doc, section)?
            } else {
                0
            };
            let file_name = OutputStore::output_name(&display, section);
            self.store.write(&file_name, &mut doc)?;

            log::info!(
                "{}: {} page(s), {} field(s) per page -> {}",
                section,
                pages.len(),
                fields_per_page,
                file_name
            );
            outputs.push(OutputRecord {
                section,
                file_name,
                pages: pages.clone(),
                fields_per_page,
            });
        }

        Ok(ProcessingReport {
            input,
            identifier,
            display_identifier: display,
            page_count: source.page_count(),
            processing_timestamp: Utc::now().to_rfc3339(),
            outputs,
        })
    }
}
