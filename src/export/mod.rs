//! Export of projected tables to CSV, XLSX, and JSON.
//!
//! Every table is exported on its own: a failure names the offending table
//! and never stops the other tables of a batch.
//!
//! # Example
//!
//! ```no_run
//! use ocrtab::export::{export_all, ExportFormat, ExportOptions};
//! use ocrtab::{project_value, ProjectionOptions};
//!
//! let data = serde_json::json!({"Items": [{"sku": "A", "qty": 2}]});
//! let tables = project_value(&data, &ProjectionOptions::default());
//! for outcome in export_all(&tables, ExportFormat::Csv, &ExportOptions::default()) {
//!     match outcome.result {
//!         Ok(path) => println!("{} -> {}", outcome.table, path.display()),
//!         Err(e) => eprintln!("{}", e),
//!     }
//! }
//! ```

mod csv;
mod json;
mod markdown;
mod xlsx;

pub use self::csv::to_csv;
pub use self::json::{to_json_records, JsonFormat};
pub use self::markdown::{render_table, to_markdown};
pub use self::xlsx::to_xlsx;

use crate::error::{Error, Result};
use crate::model::{Table, TableSet};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;

/// Target byte format for an exported table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Comma-separated values
    Csv,
    /// Office Open XML spreadsheet
    Xlsx,
    /// JSON array of row objects
    Json,
}

impl ExportFormat {
    /// All supported formats.
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Xlsx, ExportFormat::Json];

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Json => "json",
        }
    }

    /// MIME type of the serialized bytes.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Json => "application/json",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Xlsx => "Excel",
            ExportFormat::Json => "JSON",
        };
        f.write_str(label)
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" | "excel" | "spreadsheet" => Ok(ExportFormat::Xlsx),
            "json" => Ok(ExportFormat::Json),
            other => Err(Error::Other(format!("Unknown export format: {}", other))),
        }
    }
}

/// Options for writing exports to disk.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory receiving exported files
    pub output_dir: PathBuf,

    /// JSON layout for [`ExportFormat::Json`]
    pub json_format: JsonFormat,
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("exports"),
            json_format: JsonFormat::Pretty,
        }
    }
}

/// One serialized table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedTable {
    /// Human-readable table name
    pub display_name: String,

    /// Filesystem-safe file name including extension
    pub file_name: String,

    /// MIME type of `bytes`
    pub mime_type: &'static str,

    /// Serialized content
    pub bytes: Vec<u8>,
}

/// Outcome of exporting one table in a batch.
#[derive(Debug)]
pub struct ExportOutcome {
    /// Display name of the table
    pub table: String,

    /// Written path, or the error naming the table
    pub result: Result<PathBuf>,
}

/// Longest file stem, in bytes, that [`sanitize_name`] produces.
pub const MAX_STEM_BYTES: usize = 200;

/// Stems Windows refuses as file names whatever the extension.
const RESERVED_STEMS: [&str; 22] = [
    "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7", "com8",
    "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

/// Derive a filesystem-safe name from a display name.
///
/// Letters (any script), digits, hyphens, and underscores are kept,
/// everything else becomes an underscore, and the result is lowercase.
/// Names with nothing usable left fall back to `table`; reserved device
/// names get a `table_` prefix. The stem is cut to [`MAX_STEM_BYTES`] on a
/// character boundary so deduplication suffixes and extensions still fit.
pub fn sanitize_name(name: &str) -> String {
    let lowered: String = name.nfc().collect::<String>().to_lowercase();
    let safe: String = lowered
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if safe.chars().all(|c| c == '_') {
        return "table".to_string();
    }

    let safe = if RESERVED_STEMS.contains(&safe.as_str()) {
        format!("table_{}", safe)
    } else {
        safe
    };
    truncate_on_char_boundary(safe, MAX_STEM_BYTES)
}

fn truncate_on_char_boundary(mut text: String, max_bytes: usize) -> String {
    if text.len() > max_bytes {
        let mut end = max_bytes;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
    text
}

/// Serialize one table to bytes in the given format.
pub fn export_table(
    table: &Table,
    display_name: &str,
    format: ExportFormat,
) -> Result<ExportedTable> {
    export_table_with(table, display_name, format, JsonFormat::Pretty)
}

fn export_table_with(
    table: &Table,
    display_name: &str,
    format: ExportFormat,
    json_format: JsonFormat,
) -> Result<ExportedTable> {
    let bytes = match format {
        ExportFormat::Csv => to_csv(table),
        ExportFormat::Xlsx => to_xlsx(table),
        ExportFormat::Json => to_json_records(table, json_format),
    }
    .map_err(|e| Error::export(display_name, e))?;

    Ok(ExportedTable {
        display_name: display_name.to_string(),
        file_name: format!("{}.{}", sanitize_name(display_name), format.extension()),
        mime_type: format.mime_type(),
        bytes,
    })
}

/// Export every table to `options.output_dir`, each independently.
///
/// Names that collide after sanitization get a numeric suffix.
pub fn export_all(
    tables: &TableSet,
    format: ExportFormat,
    options: &ExportOptions,
) -> Vec<ExportOutcome> {
    let mut used = HashSet::new();
    tables
        .iter()
        .map(|(name, table)| {
            let result = export_one(table, name, format, options, &mut used);
            if let Err(e) = &result {
                log::warn!("{}", e);
            }
            ExportOutcome {
                table: name.clone(),
                result,
            }
        })
        .collect()
}

fn export_one(
    table: &Table,
    name: &str,
    format: ExportFormat,
    options: &ExportOptions,
    used: &mut HashSet<String>,
) -> Result<PathBuf> {
    let mut exported = export_table_with(table, name, format, options.json_format)?;

    let stem = sanitize_name(name);
    let mut n = 1;
    while !used.insert(exported.file_name.clone()) {
        n += 1;
        exported.file_name = format!("{}_{}.{}", stem, n, format.extension());
    }

    let path = options.output_dir.join(&exported.file_name);
    fs::create_dir_all(&options.output_dir)
        .and_then(|_| fs::write(&path, &exported.bytes))
        .map_err(|e| Error::export(name, e.into()))?;

    log::debug!("Exported '{}' to {}", name, path.display());
    Ok(path)
}
