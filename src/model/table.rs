//! Flat table types produced by projection.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// A single scalar cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Missing or JSON null
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value, kept with its original JSON precision
    Number(Number),
    /// Text value
    Text(String),
}

impl Cell {
    /// Convert a JSON value into a cell.
    ///
    /// Lists and mappings are rendered as compact JSON text so that no
    /// nested value reaches a table.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Null,
            Value::Bool(b) => Cell::Bool(*b),
            Value::Number(n) => Cell::Number(n.clone()),
            Value::String(s) => Cell::Text(s.clone()),
            nested @ (Value::Array(_) | Value::Object(_)) => Cell::Text(nested.to_string()),
        }
    }

    /// Check if the cell is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Get the cell as display text (empty for null).
    pub fn plain_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<i32> for Cell {
    fn from(n: i32) -> Self {
        Cell::Number(n.into())
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Number(n.into())
    }
}

impl From<u64> for Cell {
    fn from(n: u64) -> Self {
        Cell::Number(n.into())
    }
}

impl From<f64> for Cell {
    /// Non-finite values have no JSON representation and become null.
    fn from(n: f64) -> Self {
        Number::from_f64(n).map(Cell::Number).unwrap_or(Cell::Null)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

static NULL_CELL: Cell = Cell::Null;

/// A table row: ordered column name to cell.
pub type Row = IndexMap<String, Cell>;

/// A named, ordered sequence of flat rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name (display label, not filesystem-safe)
    pub name: String,

    /// Union of all row columns in first-seen order
    columns: Vec<String>,

    /// Rows in the table
    rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Add a row to the table, extending the column set as needed.
    pub fn add_row(&mut self, row: Row) {
        for column in row.keys() {
            if !self.columns.iter().any(|c| c == column) {
                self.columns.push(column.clone());
            }
        }
        self.rows.push(row);
    }

    /// Set a cell in the first row, creating the row if the table is empty.
    pub fn set_single(&mut self, column: impl Into<String>, cell: Cell) {
        let column = column.into();
        if !self.columns.contains(&column) {
            self.columns.push(column.clone());
        }
        match self.rows.first_mut() {
            Some(row) => {
                row.insert(column, cell);
            }
            None => {
                let mut row = Row::new();
                row.insert(column, cell);
                self.rows.push(row);
            }
        }
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a cell by row index and column name.
    ///
    /// Columns absent from a row read as [`Cell::Null`].
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let row = self.rows.get(row)?;
        if !self.columns.iter().any(|c| c == column) {
            return None;
        }
        Some(row.get(column).unwrap_or(&NULL_CELL))
    }

    /// Iterate rows as full-width cell vectors aligned with [`Table::columns`].
    pub fn dense_rows(&self) -> impl Iterator<Item = Vec<&Cell>> + '_ {
        self.rows.iter().map(move |row| {
            self.columns
                .iter()
                .map(|c| row.get(c).unwrap_or(&NULL_CELL))
                .collect()
        })
    }

    /// Get plain text representation of the table (tab-separated, header first).
    pub fn plain_text(&self) -> String {
        let mut lines = vec![self.columns.join("\t")];
        lines.extend(self.dense_rows().map(|cells| {
            cells
                .iter()
                .map(|c| c.plain_text())
                .collect::<Vec<_>>()
                .join("\t")
        }));
        lines.join("\n")
    }
}

/// Projection output: table name to table, in creation order.
pub type TableSet = IndexMap<String, Table>;
