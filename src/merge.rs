//! Merging per-page structured records into one document-level record.
//!
//! Pages are visited in ascending page number. The first page on which a key
//! appears fixes that key's position; later pages only grow its value:
//!
//! - a key seen for the first time is copied as-is,
//! - a key whose merged value is already a list is extended (list values) or
//!   appended to (any other value),
//! - a key whose merged value is not a list becomes `[existing, new]`.

use crate::model::{ExtractionResult, Mapping, PageRecord, StructuredRecord};
use serde_json::Value;

/// Options controlling the merge.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Skip records carrying an error marker instead of merging their content
    pub skip_error_records: bool,
}

impl MergeOptions {
    /// Create new merge options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge error-marker records like any other record.
    pub fn keep_error_records(mut self) -> Self {
        self.skip_error_records = false;
        self
    }
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            skip_error_records: true,
        }
    }
}

/// Merge the content of every page into a single ordered mapping.
///
/// Pages without data are skipped, so a failed recognition only makes the
/// merge less complete. If no page has data the mapping is empty.
pub fn merge_pages(pages: &[PageRecord], options: &MergeOptions) -> Mapping {
    let mut ordered: Vec<&PageRecord> = pages.iter().collect();
    ordered.sort_by_key(|p| p.page_number);

    for pair in ordered.windows(2) {
        if pair[0].page_number == pair[1].page_number {
            log::warn!(
                "Duplicate page number {}; merging in input order",
                pair[0].page_number
            );
        }
    }

    let mut merged = Mapping::new();
    for page in ordered {
        let Some(record) = &page.structured_data else {
            log::debug!("Page {} has no structured data, skipping", page.page_number);
            continue;
        };
        if options.skip_error_records && record.is_error_marker() {
            log::warn!(
                "Page {} recognition reported an error, skipping",
                page.page_number
            );
            continue;
        }
        merge_into(&mut merged, &record.content);
    }
    merged
}

/// Merge one record's content into the accumulated mapping.
pub fn merge_into(merged: &mut Mapping, content: &Mapping) {
    for (key, value) in content {
        match merged.get_mut(key) {
            None => {
                merged.insert(key.clone(), value.clone());
            }
            Some(Value::Array(existing)) => match value {
                Value::Array(items) => existing.extend(items.iter().cloned()),
                other => existing.push(other.clone()),
            },
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value.clone()]);
            }
        }
    }
}

/// Outcome of resolving a document's extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Document-level result
    pub result: ExtractionResult,

    /// Page sequence, with the first page back-filled when a combined record was used
    pub pages: Vec<PageRecord>,
}

/// Produce the document-level result for a set of pages.
///
/// When `combined` is present the merge is bypassed: its content becomes the
/// result data and the lowest-numbered page is back-filled with it in the
/// returned page sequence. The input pages are never modified.
pub fn resolve_extraction(
    pages: &[PageRecord],
    combined: Option<StructuredRecord>,
    document_name: &str,
    instruction_set_name: &str,
    options: &MergeOptions,
) -> Resolution {
    let mut pages = pages.to_vec();
    pages.sort_by_key(|p| p.page_number);

    let data = match combined {
        Some(record) => {
            log::debug!(
                "Using combined record '{}' for {}",
                record.source_name,
                document_name
            );
            let data = record.content.clone();
            if let Some(first) = pages.first_mut() {
                first.structured_data = Some(record);
            }
            data
        }
        None => merge_pages(&pages, options),
    };

    Resolution {
        result: ExtractionResult::new(document_name, instruction_set_name, data),
        pages,
    }
}
