//! Spreadsheet (XLSX) export.
//!
//! One worksheet per table: header row from the table columns, then one row
//! per record with numeric, boolean and text cells. Null cells are left empty.

use crate::error::{Error, Result};
use crate::model::{Cell, Table};
use rust_xlsxwriter::{ColNum, RowNum, Workbook, Worksheet};

/// Excel's limit on sheet name length.
const MAX_SHEET_NAME: usize = 31;

/// Serialize a table as an XLSX workbook with one sheet.
pub fn to_xlsx(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name(&table.name))?;

    for (col, name) in table.columns().iter().enumerate() {
        sheet.write_string(0, column_index(col)?, name)?;
    }

    for (i, cells) in table.dense_rows().enumerate() {
        let row = row_index(i + 1)?;
        for (col, cell) in cells.into_iter().enumerate() {
            write_cell(sheet, row, column_index(col)?, cell)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_cell(sheet: &mut Worksheet, row: RowNum, col: ColNum, cell: &Cell) -> Result<()> {
    match cell {
        Cell::Null => {}
        Cell::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        Cell::Number(n) => match n.as_f64() {
            Some(value) => {
                sheet.write_number(row, col, value)?;
            }
            None => {
                sheet.write_string(row, col, n.to_string())?;
            }
        },
        Cell::Text(s) => {
            sheet.write_string(row, col, s)?;
        }
    }
    Ok(())
}

fn row_index(row: usize) -> Result<RowNum> {
    RowNum::try_from(row).map_err(|_| Error::Spreadsheet(format!("row {} out of range", row)))
}

fn column_index(col: usize) -> Result<ColNum> {
    ColNum::try_from(col).map_err(|_| Error::Spreadsheet(format!("column {} out of range", col)))
}

/// Sheet names may not contain `[]:*?/\` and are limited to 31 characters.
fn sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .take(MAX_SHEET_NAME)
        .collect();
    let cleaned = cleaned.trim_matches('\'').trim();
    if cleaned.is_empty() {
        "Sheet1".to_string()
    } else {
        cleaned.to_string()
    }
}
