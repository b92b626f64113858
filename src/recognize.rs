//! Boundary with the recognition (OCR) service and the extraction workflow.
//!
//! This crate never talks to a recognition service itself. Implement
//! [`Recognizer`] over whatever client you use and hand it to an
//! [`Extractor`], which resolves the instruction set, prefers one combined
//! record for the whole document, and falls back to per-page recognition.

use crate::error::Result;
use crate::instructions::InstructionSource;
use crate::merge::{resolve_extraction, MergeOptions, Resolution};
use crate::model::{PageRecord, StructuredRecord};
use std::path::Path;
use std::sync::Arc;

/// A recognition engine producing structured records from page images.
pub trait Recognizer: Send + Sync {
    /// Name of this recognizer, for logging.
    fn name(&self) -> &str;

    /// Recognize one page image, optionally guided by extraction instructions.
    ///
    /// A failure may be returned as an error or as a record carrying an
    /// error marker; both are handled.
    fn recognize_page(&self, image: &Path, instructions: Option<&str>) -> Result<StructuredRecord>;

    /// Recognize a whole document into one combined record.
    ///
    /// Returns `Ok(None)` when the engine has no document-level mode.
    fn recognize_document(
        &self,
        _pages: &[PageRecord],
        _instructions: &str,
    ) -> Result<Option<StructuredRecord>> {
        Ok(None)
    }
}

/// Runs recognition over a document and resolves one extraction result.
pub struct Extractor<S: InstructionSource> {
    recognizer: Arc<dyn Recognizer>,
    instructions: S,
    merge_options: MergeOptions,
}

impl<S: InstructionSource> Extractor<S> {
    /// Create an extractor.
    pub fn new(recognizer: Arc<dyn Recognizer>, instructions: S) -> Self {
        Self {
            recognizer,
            instructions,
            merge_options: MergeOptions::default(),
        }
    }

    /// Set merge options used when falling back to per-page records.
    pub fn with_merge_options(mut self, options: MergeOptions) -> Self {
        self.merge_options = options;
        self
    }

    /// Instruction sets available to this extractor.
    pub fn instructions(&self) -> &S {
        &self.instructions
    }

    /// Recognize every page independently.
    ///
    /// Pages whose recognition fails keep their previous data (usually none).
    pub fn recognize_pages(
        &self,
        pages: &[PageRecord],
        instructions: Option<&str>,
    ) -> Vec<PageRecord> {
        pages
            .iter()
            .map(|page| {
                match self.recognizer.recognize_page(&page.image_ref, instructions) {
                    Ok(record) => {
                        if record.is_error_marker() {
                            log::warn!(
                                "{}: page {} returned an error marker",
                                self.recognizer.name(),
                                page.page_number
                            );
                        }
                        page.clone().with_data(record)
                    }
                    Err(e) => {
                        log::warn!(
                            "{}: recognition failed for page {}: {}",
                            self.recognizer.name(),
                            page.page_number,
                            e
                        );
                        page.clone()
                    }
                }
            })
            .collect()
    }

    /// Extract a document with the named instruction set.
    ///
    /// An unknown instruction set is an error. Recognition failures are not:
    /// a failed combined pass falls back to per-page recognition, and failed
    /// pages are left out of the merge.
    pub fn extract(
        &self,
        pages: &[PageRecord],
        instruction_set: &str,
        document_name: &str,
    ) -> Result<Resolution> {
        let instructions = self.instructions.get(instruction_set)?;

        let combined = if pages.is_empty() {
            None
        } else {
            match self.recognizer.recognize_document(pages, instructions) {
                Ok(combined) => combined,
                Err(e) => {
                    log::warn!(
                        "{}: combined recognition of {} failed, falling back to pages: {}",
                        self.recognizer.name(),
                        document_name,
                        e
                    );
                    None
                }
            }
        };

        let resolution = match combined {
            Some(record) => resolve_extraction(
                pages,
                Some(record),
                document_name,
                instruction_set,
                &self.merge_options,
            ),
            None => {
                let recognized = self.recognize_pages(pages, Some(instructions));
                resolve_extraction(
                    &recognized,
                    None,
                    document_name,
                    instruction_set,
                    &self.merge_options,
                )
            }
        };

        Ok(resolution)
    }
}
