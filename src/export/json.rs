//! JSON records export.

use crate::error::Result;
use crate::model::Table;
use serde::Serialize;
use serde_json::{Map, Value};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a table as an array of row objects.
///
/// Every row carries every column; missing cells are `null`.
pub fn to_json_records(table: &Table, format: JsonFormat) -> Result<Vec<u8>> {
    let records: Vec<Map<String, Value>> = table
        .dense_rows()
        .map(|cells| {
            table
                .columns()
                .iter()
                .zip(cells)
                .map(|(column, cell)| serde_json::to_value(cell).map(|v| (column.clone(), v)))
                .collect::<serde_json::Result<Map<String, Value>>>()
        })
        .collect::<serde_json::Result<Vec<_>>>()?;

    let bytes = match format {
        JsonFormat::Pretty => {
            let mut out = Vec::new();
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
            records.serialize(&mut ser)?;
            out
        }
        JsonFormat::Compact => serde_json::to_vec(&records)?,
    };
    Ok(bytes)
}
