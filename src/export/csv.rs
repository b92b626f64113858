//! Delimited-text export.

use crate::error::{Error, Result};
use crate::model::Table;

/// Serialize a table as UTF-8 CSV with a header row.
pub fn to_csv(table: &Table) -> Result<Vec<u8>> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());

    if table.column_count() > 0 {
        writer.write_record(table.columns())?;
        for cells in table.dense_rows() {
            writer.write_record(cells.iter().map(|c| c.plain_text()))?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| Error::Csv(format!("failed to flush CSV writer: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, Row};

    #[test]
    fn test_to_csv_fills_missing_cells() {
        let mut table = Table::new("Items");
        let mut first = Row::new();
        first.insert("sku".into(), Cell::from("A"));
        first.insert("qty".into(), Cell::from(2));
        table.add_row(first);
        let mut second = Row::new();
        second.insert("sku".into(), Cell::from("B, large"));
        table.add_row(second);

        let csv = String::from_utf8(to_csv(&table).unwrap()).unwrap();
        assert_eq!(csv, "sku,qty\nA,2\n\"B, large\",\n");
    }

    #[test]
    fn test_to_csv_empty_table() {
        let table = Table::new("Empty");
        assert!(to_csv(&table).unwrap().is_empty());
    }
}
