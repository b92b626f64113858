//! Error types for ocrtab library.

use std::io;
use thiserror::Error;

/// Result type alias for ocrtab operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while merging, projecting, or exporting records.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Page numbers are 1-based.
    #[error("Invalid page number {0}: pages are numbered from 1")]
    InvalidPageNumber(u32),

    /// Record content was not a JSON object.
    #[error("Invalid record '{source_name}': content must be an object, got {found}")]
    InvalidRecord {
        /// Name of the document or page the record came from
        source_name: String,
        /// JSON type that was found instead
        found: &'static str,
    },

    /// The requested extraction instruction set does not exist.
    #[error("Instruction set '{0}' not found")]
    InstructionSetNotFound(String),

    /// The recognition collaborator failed.
    #[error("Recognition error: {0}")]
    Recognition(String),

    /// Serializing or writing one table failed.
    #[error("Failed to export table '{table}': {source}")]
    Export {
        /// Display name of the table being exported
        table: String,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// CSV writer error.
    #[error("CSV error: {0}")]
    Csv(String),

    /// Spreadsheet writer error.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Attach a table display name to an export failure.
    pub fn export(table: impl Into<String>, source: Error) -> Self {
        Error::Export {
            table: table.into(),
            source: Box::new(source),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Error::Spreadsheet(err.to_string())
    }
}
