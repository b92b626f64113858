//! # ocrtab
//!
//! Turn schema-less OCR output into flat tables.
//!
//! A recognition service produces one JSON record per page (or one combined
//! record per document). This library merges per-page records into a single
//! document record, projects that record into named tables, and exports each
//! table as CSV, XLSX, or JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ocrtab::{project_file, export::ExportFormat};
//!
//! fn main() -> ocrtab::Result<()> {
//!     let projection = project_file("order.json")?;
//!     for name in projection.table_names() {
//!         let exported = projection.export(name, ExportFormat::Csv)?;
//!         std::fs::write(&exported.file_name, &exported.bytes)?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Merge**: per-page records combine in page order; repeated keys grow
//!   into lists ([`merge`])
//! - **Projection**: lists of objects, objects, and scalars map to tables
//!   ([`project`])
//! - **Export**: each table serializes independently ([`export`])

pub mod error;
pub mod export;
pub mod input;
pub mod instructions;
pub mod merge;
pub mod model;
pub mod project;
pub mod recognize;

// Re-export commonly used types
pub use error::{Error, Result};
pub use export::{export_table, sanitize_name, ExportFormat, ExportOptions, ExportedTable};
pub use input::{detect_shape, InputShape};
pub use instructions::{InstructionLibrary, InstructionSource};
pub use merge::{merge_pages, resolve_extraction, MergeOptions, Resolution};
pub use model::{
    pages_from_image_dir, pages_from_images, Cell, ExtractionResult, Mapping, PageRecord, Row,
    StructuredRecord, Table, TableSet,
};
pub use project::{project, project_value, ProjectionOptions};
pub use recognize::{Extractor, Recognizer};

use serde_json::Value;
use std::path::Path;

/// Merge pages (or take the combined record) and project the result.
///
/// # Example
///
/// ```
/// use ocrtab::{merge_and_project, PageRecord, StructuredRecord};
/// use serde_json::json;
///
/// let record = StructuredRecord::new("page_001", json!({"Customer": {"name": "Acme"}})).unwrap();
/// let pages = vec![PageRecord::new(1, "page_001.jpeg").unwrap().with_data(record)];
///
/// let projection = merge_and_project(&pages, None);
/// assert_eq!(projection.tables["Customer"].row_count(), 1);
/// ```
pub fn merge_and_project(pages: &[PageRecord], combined: Option<StructuredRecord>) -> Projection {
    Ocrtab::new().merge_and_project(pages, combined)
}

/// Project a raw JSON value of any accepted input shape.
pub fn project_json(value: Value) -> Projection {
    Ocrtab::new().project_json(value)
}

/// Read a JSON file of any accepted input shape and project it.
pub fn project_file<P: AsRef<Path>>(path: P) -> Result<Projection> {
    Ocrtab::new().project_file(path)
}

/// Builder for merging and projecting records.
///
/// # Example
///
/// ```
/// use ocrtab::Ocrtab;
/// use serde_json::json;
///
/// let projection = Ocrtab::new()
///     .with_general_table_name("Informations générales")
///     .project_json(json!({"Votre Commande": "21854"}));
/// assert!(projection.tables.contains_key("Informations générales"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Ocrtab {
    merge_options: MergeOptions,
    projection_options: ProjectionOptions,
}

impl Ocrtab {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge error-marker records instead of skipping them.
    pub fn keep_error_records(mut self) -> Self {
        self.merge_options = self.merge_options.keep_error_records();
        self
    }

    /// Set the name of the generic table.
    pub fn with_general_table_name(mut self, name: impl Into<String>) -> Self {
        self.projection_options = self.projection_options.with_general_table_name(name);
        self
    }

    /// Set the placeholder table name and message.
    pub fn with_placeholder(mut self, table: impl Into<String>, message: impl Into<String>) -> Self {
        self.projection_options = self
            .projection_options
            .with_placeholder_table_name(table)
            .with_placeholder_message(message);
        self
    }

    /// Set all projection options.
    pub fn with_projection_options(mut self, options: ProjectionOptions) -> Self {
        self.projection_options = options;
        self
    }

    /// Merge pages (or take the combined record) and project the result.
    pub fn merge_and_project(
        &self,
        pages: &[PageRecord],
        combined: Option<StructuredRecord>,
    ) -> Projection {
        let document = combined
            .as_ref()
            .map(|r| r.source_name.clone())
            .unwrap_or_else(|| ExtractionResult::DEFAULT_DOCUMENT.to_string());
        let resolution = resolve_extraction(
            pages,
            combined,
            &document,
            ExtractionResult::DEFAULT_INSTRUCTION_SET,
            &self.merge_options,
        );
        self.project_resolution(resolution)
    }

    /// Project an already-resolved extraction.
    pub fn project_resolution(&self, resolution: Resolution) -> Projection {
        let tables = project(&resolution.result, &self.projection_options);
        Projection {
            result: resolution.result,
            pages: resolution.pages,
            tables,
        }
    }

    /// Project a raw JSON value of any accepted input shape.
    pub fn project_json(&self, value: Value) -> Projection {
        let input = input::normalize(value);
        let tables = match &input.unprojectable {
            Some(raw) => project_value(raw, &self.projection_options),
            None => project(&input.result, &self.projection_options),
        };
        Projection {
            result: input.result,
            pages: Vec::new(),
            tables,
        }
    }

    /// Read a JSON file of any accepted input shape and project it.
    pub fn project_file<P: AsRef<Path>>(&self, path: P) -> Result<Projection> {
        let value: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        Ok(self.project_json(value))
    }
}

/// Result of merging and projecting a document.
#[derive(Debug, Clone)]
pub struct Projection {
    /// Document-level extraction result
    pub result: ExtractionResult,

    /// Page sequence after resolution (empty for raw JSON input)
    pub pages: Vec<PageRecord>,

    /// Projected tables in creation order
    pub tables: TableSet,
}

impl Projection {
    /// Table names in order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Export one table by name.
    pub fn export(&self, name: &str, format: ExportFormat) -> Result<ExportedTable> {
        let table = self
            .tables
            .get(name)
            .ok_or_else(|| Error::export(name, Error::Other("no such table".into())))?;
        export_table(table, name, format)
    }

    /// Export every table to disk, each independently.
    pub fn export_all(
        &self,
        format: ExportFormat,
        options: &ExportOptions,
    ) -> Vec<export::ExportOutcome> {
        export::export_all(&self.tables, format, options)
    }

    /// Render every table as Markdown.
    pub fn to_markdown(&self) -> String {
        export::to_markdown(&self.tables)
    }
}
