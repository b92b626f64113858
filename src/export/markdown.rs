//! Markdown rendering of projected tables for display.

use crate::model::{Table, TableSet};

/// Render every table as a Markdown section.
pub fn to_markdown(tables: &TableSet) -> String {
    let mut output = String::new();
    for table in tables.values() {
        output.push_str(&format!("## {}\n\n", table.name));
        render_table(&mut output, table);
    }
    output
}

/// Render one table as a Markdown pipe table.
pub fn render_table(output: &mut String, table: &Table) {
    if table.column_count() == 0 {
        output.push_str("_(empty)_\n\n");
        return;
    }

    output.push('|');
    for column in table.columns() {
        output.push_str(&format!(" {} |", escape_cell(column)));
    }
    output.push('\n');

    output.push('|');
    for _ in table.columns() {
        output.push_str(" --- |");
    }
    output.push('\n');

    for cells in table.dense_rows() {
        output.push('|');
        for cell in cells {
            output.push_str(&format!(" {} |", escape_cell(&cell.plain_text())));
        }
        output.push('\n');
    }

    output.push('\n');
}

/// Keep a cell on one line and stop pipes from splitting it.
fn escape_cell(text: &str) -> String {
    text.replace('\n', " ").replace('|', "\\|").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, Row};

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a|b\nc "), "a\\|b c");
    }

    #[test]
    fn test_to_markdown() {
        let mut table = Table::new("Items");
        let mut row = Row::new();
        row.insert("sku".into(), Cell::from("A"));
        row.insert("qty".into(), Cell::from(2));
        table.add_row(row);
        let mut tables = TableSet::new();
        tables.insert(table.name.clone(), table);

        assert_eq!(
            to_markdown(&tables),
            "## Items\n\n| sku | qty |\n| --- | --- |\n| A | 2 |\n\n"
        );
    }
}
