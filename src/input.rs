//! Input shape detection for raw JSON documents.
//!
//! Recognition output reaches us in one of three shapes:
//!
//! - a structured record envelope: `{"file_name": ..., "ocr_contents": {...}}`
//! - an extraction result envelope: `{"pdf_file": ..., "prompt_name": ..., "extracted_data": {...}}`
//! - bare extracted data: any other JSON value

use crate::error::Result;
use crate::model::{ExtractionResult, Mapping, StructuredRecord};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Detected shape of a raw JSON input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputShape {
    /// `file_name` + `ocr_contents` envelope
    StructuredRecord,
    /// `extracted_data` envelope
    ExtractionResult,
    /// Anything else, taken as the data itself
    Bare,
}

impl std::fmt::Display for InputShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InputShape::StructuredRecord => "structured record",
            InputShape::ExtractionResult => "extraction result",
            InputShape::Bare => "bare data",
        };
        f.write_str(name)
    }
}

/// Detect the shape of a JSON value.
pub fn detect_shape(value: &Value) -> InputShape {
    match value {
        Value::Object(map) if map.contains_key("file_name") && map.contains_key("ocr_contents") => {
            InputShape::StructuredRecord
        }
        Value::Object(map) if map.contains_key("extracted_data") => InputShape::ExtractionResult,
        _ => InputShape::Bare,
    }
}

/// Normalized input: the extraction result plus the raw data when it was not
/// an object (so projection can still report a placeholder).
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInput {
    /// Result with provenance names filled in
    pub result: ExtractionResult,

    /// Original data value when it was not an object
    pub unprojectable: Option<Value>,
}

/// Normalize any accepted input shape into an extraction result.
pub fn normalize(value: Value) -> NormalizedInput {
    let shape = detect_shape(&value);
    log::debug!("Detected input shape: {}", shape);

    let (document, instruction_set, data) = match (shape, value) {
        (InputShape::StructuredRecord, Value::Object(mut map)) => {
            let document = string_field(&map, "file_name");
            let data = map.remove("ocr_contents").unwrap_or(Value::Null);
            (document, None, data)
        }
        (InputShape::ExtractionResult, Value::Object(mut map)) => {
            let document = string_field(&map, "pdf_file");
            let instruction_set = string_field(&map, "prompt_name");
            let data = map.remove("extracted_data").unwrap_or(Value::Null);
            (document, instruction_set, data)
        }
        (_, data) => (None, None, data),
    };

    let (data, unprojectable) = match data {
        Value::Object(map) => (map, None),
        other => (Mapping::new(), Some(other)),
    };

    NormalizedInput {
        result: ExtractionResult::new(
            document.unwrap_or_else(|| ExtractionResult::DEFAULT_DOCUMENT.to_string()),
            instruction_set.unwrap_or_else(|| ExtractionResult::DEFAULT_INSTRUCTION_SET.to_string()),
            data,
        ),
        unprojectable,
    }
}

fn string_field(map: &Mapping, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Read a structured record (page or combined) from a JSON file.
///
/// A bare object is accepted too, named after the file stem.
pub fn read_record<P: AsRef<Path>>(path: P) -> Result<StructuredRecord> {
    let path = path.as_ref();
    let value: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
    match detect_shape(&value) {
        InputShape::StructuredRecord => Ok(serde_json::from_value(value)?),
        _ => {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            StructuredRecord::new(name, value)
        }
    }
}

/// Read and normalize a JSON file of any accepted shape.
pub fn read_input<P: AsRef<Path>>(path: P) -> Result<NormalizedInput> {
    let value: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
    Ok(normalize(value))
}
