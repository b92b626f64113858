//! Structured records produced by recognition and the document-level result.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered mapping from string key to schema-less value.
pub type Mapping = Map<String, Value>;

/// Key marking a record as the output of a failed recognition.
pub const ERROR_MARKER_KEY: &str = "error";

/// Exact key set of a record built by [`StructuredRecord::error_marker`].
const ERROR_MARKER_KEYS: [&str; 3] = [ERROR_MARKER_KEY, "file", "message"];

/// One recognition engine's JSON-shaped output for a page or a whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredRecord {
    /// Originating document or page
    #[serde(rename = "file_name")]
    pub source_name: String,

    /// Record content; always an object, possibly empty
    #[serde(rename = "ocr_contents")]
    pub content: Mapping,
}

impl StructuredRecord {
    /// Create a record from an arbitrary JSON value.
    ///
    /// Fails with [`Error::InvalidRecord`] unless `content` is an object.
    pub fn new(source_name: impl Into<String>, content: Value) -> Result<Self> {
        let source_name = source_name.into();
        match content {
            Value::Object(content) => Ok(Self {
                source_name,
                content,
            }),
            other => Err(Error::InvalidRecord {
                source_name,
                found: json_type_name(&other),
            }),
        }
    }

    /// Create a record from an already-validated mapping.
    pub fn from_mapping(source_name: impl Into<String>, content: Mapping) -> Self {
        Self {
            source_name: source_name.into(),
            content,
        }
    }

    /// Build the record a recognizer returns when it fails on one input.
    pub fn error_marker(
        source_name: impl Into<String>,
        file: impl Into<String>,
        error: impl std::fmt::Display,
    ) -> Self {
        let mut content = Mapping::new();
        content.insert(ERROR_MARKER_KEY.into(), Value::String(error.to_string()));
        content.insert("file".into(), Value::String(file.into()));
        content.insert(
            "message".into(),
            Value::String("Recognition failed".to_string()),
        );
        Self::from_mapping(source_name, content)
    }

    /// Check whether this record carries an explicit error marker.
    ///
    /// Only the exact `error`/`file`/`message` shape counts; a document field
    /// that happens to be called `error` does not.
    pub fn is_error_marker(&self) -> bool {
        self.content.len() == ERROR_MARKER_KEYS.len()
            && ERROR_MARKER_KEYS
                .iter()
                .all(|key| self.content.contains_key(*key))
    }

    /// Check if the record has no content.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Document-level outcome after applying an extraction instruction set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Source document name (display only)
    #[serde(rename = "pdf_file")]
    pub document_name: String,

    /// Instruction set used for extraction (display only)
    #[serde(rename = "prompt_name")]
    pub instruction_set_name: String,

    /// Extracted data, the sole input to projection
    #[serde(rename = "extracted_data")]
    pub data: Mapping,
}

impl ExtractionResult {
    /// Default document name used when the input carries none.
    pub const DEFAULT_DOCUMENT: &'static str = "document.pdf";

    /// Default instruction set name used when the input carries none.
    pub const DEFAULT_INSTRUCTION_SET: &'static str = "default";

    /// Create a new extraction result.
    pub fn new(
        document_name: impl Into<String>,
        instruction_set_name: impl Into<String>,
        data: Mapping,
    ) -> Self {
        Self {
            document_name: document_name.into(),
            instruction_set_name: instruction_set_name.into(),
            data,
        }
    }

    /// Wrap a structured record's content under default provenance names.
    pub fn from_record(record: &StructuredRecord) -> Self {
        Self::new(
            record.source_name.clone(),
            Self::DEFAULT_INSTRUCTION_SET,
            record.content.clone(),
        )
    }
}

/// Human-readable JSON type name.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
