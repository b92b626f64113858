//! Projection of a nested record into a set of flat tables.
//!
//! Each top-level key is classified by the shape of its value:
//!
//! 1. a non-empty list whose first element is an object becomes a table with
//!    one row per element,
//! 2. an object becomes a single-row table,
//! 3. anything else (scalars, empty lists, lists not starting with an object)
//!    becomes one column of the shared generic table.
//!
//! Projection never fails. Input that is not a non-empty object yields a
//! single placeholder table instead.

mod options;

pub use options::ProjectionOptions;

use crate::model::{json_type_name, Cell, ExtractionResult, Mapping, Row, Table, TableSet};
use serde_json::Value;

/// Classification of one top-level value.
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a> {
    /// Non-empty list whose first element is an object
    Records(&'a [Value]),
    /// A single object
    Record(&'a Mapping),
    /// Scalar, empty list, or list of non-objects
    Scalar(&'a Value),
}

impl<'a> Shape<'a> {
    /// Classify a value.
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Array(items) if matches!(items.first(), Some(Value::Object(_))) => {
                Shape::Records(items)
            }
            Value::Object(map) => Shape::Record(map),
            other => Shape::Scalar(other),
        }
    }
}

/// Project an extraction result into tables.
pub fn project(result: &ExtractionResult, options: &ProjectionOptions) -> TableSet {
    project_mapping(&result.data, options)
}

/// Project an arbitrary JSON value into tables.
///
/// Anything other than a non-empty object yields the placeholder table.
pub fn project_value(value: &Value, options: &ProjectionOptions) -> TableSet {
    match value {
        Value::Object(map) => project_mapping(map, options),
        other => {
            log::warn!(
                "Cannot project a JSON {}; returning placeholder table",
                json_type_name(other)
            );
            placeholder(options)
        }
    }
}

/// Project an ordered mapping into tables.
pub fn project_mapping(data: &Mapping, options: &ProjectionOptions) -> TableSet {
    if data.is_empty() {
        log::warn!("No data to project; returning placeholder table");
        return placeholder(options);
    }

    let mut tables = TableSet::new();
    for (key, value) in data {
        match Shape::of(value) {
            Shape::Records(items) => {
                let name = table_name(&tables, key, options);
                tables.insert(name.clone(), records_table(name, items, options));
            }
            Shape::Record(map) => {
                let name = table_name(&tables, key, options);
                let mut table = Table::new(name.clone());
                table.add_row(row_from_mapping(map));
                tables.insert(name, table);
            }
            Shape::Scalar(value) => {
                tables
                    .entry(options.general_table_name.clone())
                    .or_insert_with(|| Table::new(options.general_table_name.clone()))
                    .set_single(key.clone(), Cell::from_value(value));
            }
        }
    }

    log::debug!(
        "Projected {} keys into {} tables",
        data.len(),
        tables.len()
    );
    tables
}

/// Build the table for a list of records.
fn records_table(name: String, items: &[Value], options: &ProjectionOptions) -> Table {
    let mut table = Table::new(name);
    for item in items {
        match item {
            Value::Object(map) => table.add_row(row_from_mapping(map)),
            other => {
                // Mixed-shape lists (e.g. produced by merging) keep one row per element.
                let mut row = Row::new();
                row.insert(options.value_column.clone(), Cell::from_value(other));
                table.add_row(row);
            }
        }
    }
    table
}

fn row_from_mapping(map: &Mapping) -> Row {
    map.iter()
        .map(|(k, v)| (k.clone(), Cell::from_value(v)))
        .collect()
}

/// Pick a table name for `key` that does not collide with the generic table
/// or an already-built table.
fn table_name(tables: &TableSet, key: &str, options: &ProjectionOptions) -> String {
    let taken = |name: &str| name == options.general_table_name || tables.contains_key(name);
    if !taken(key) {
        return key.to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("{} ({})", key, n);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn placeholder(options: &ProjectionOptions) -> TableSet {
    let mut table = Table::new(options.placeholder_table_name.clone());
    table.set_single(
        options.placeholder_column.clone(),
        Cell::Text(options.placeholder_message.clone()),
    );
    let mut tables = TableSet::new();
    tables.insert(table.name.clone(), table);
    tables
}
