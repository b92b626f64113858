//! Integration tests for projecting records into tables.

use ocrtab::{merge_pages, project_value, Cell, MergeOptions, PageRecord, ProjectionOptions, StructuredRecord};
use serde_json::{json, Value};

fn project(value: Value) -> ocrtab::TableSet {
    project_value(&value, &ProjectionOptions::default())
}

#[test]
fn test_items_and_invoice_number() {
    let tables = project(json!({
        "Items": [{"sku": "A", "qty": 2}, {"sku": "B", "qty": 1}],
        "InvoiceNumber": "123"
    }));

    assert_eq!(tables.len(), 2);

    let items = &tables["Items"];
    assert_eq!(items.row_count(), 2);
    assert_eq!(items.columns(), ["sku", "qty"]);
    assert_eq!(items.cell(0, "qty"), Some(&Cell::from(2)));

    let general = &tables["General information"];
    assert_eq!(general.row_count(), 1);
    assert_eq!(general.columns(), ["InvoiceNumber"]);
    assert_eq!(general.cell(0, "InvoiceNumber"), Some(&Cell::from("123")));
}

#[test]
fn test_customer_record() {
    let tables = project(json!({"Customer": {"name": "Acme"}}));
    let names: Vec<&str> = tables.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Customer"]);
    assert_eq!(tables["Customer"].rows().len(), 1);
    assert_eq!(tables["Customer"].cell(0, "name"), Some(&Cell::from("Acme")));
}

#[test]
fn test_projection_is_deterministic() {
    let data = json!({
        "b": {"x": 1, "y": [1, 2]},
        "a": [{"k": 1}, {"j": 2, "k": 3}],
        "c": "scalar",
        "d": []
    });

    let first = project(data.clone());
    let second = project(data);
    assert_eq!(first, second);

    let names: Vec<&str> = first.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["b", "a", "General information"]);
    assert_eq!(first["a"].columns(), ["k", "j"]);
}

#[test]
fn test_every_leaf_lands_in_one_table() {
    let tables = project(json!({
        "Items": [{"sku": "A"}, {"sku": "B", "note": "fragile"}],
        "Customer": {"name": "Acme"},
        "Total": 12.5,
        "Paid": false
    }));

    let non_null: usize = tables
        .values()
        .flat_map(|t| t.rows())
        .flat_map(|r| r.values())
        .filter(|c| !c.is_null())
        .count();
    assert_eq!(non_null, 6);
}

/// Merging a scalar with a mapping gives a list that does not start with an
/// object, so it lands in the generic table as JSON text. Kept on purpose.
#[test]
fn test_merged_mixed_shapes_flow_into_generic_table() {
    let pages: Vec<PageRecord> = [json!({"Customer": "ACME"}), json!({"Customer": {"name": "ACME"}})]
        .into_iter()
        .enumerate()
        .map(|(i, content)| {
            let n = i as u32 + 1;
            PageRecord::new(n, format!("page_{}.jpeg", n))
                .unwrap()
                .with_data(StructuredRecord::new("page", content).unwrap())
        })
        .collect();

    let merged = merge_pages(&pages, &MergeOptions::default());
    let tables = project(Value::Object(merged));

    assert_eq!(tables.len(), 1);
    assert_eq!(
        tables["General information"].cell(0, "Customer"),
        Some(&Cell::from("[\"ACME\",{\"name\":\"ACME\"}]"))
    );
}

/// Mapping first, scalar second: the list starts with an object, so each
/// element becomes a row even though the rows do not share a shape.
#[test]
fn test_merged_mapping_then_scalar_gives_heterogeneous_rows() {
    let tables = project(json!({"Customer": [{"name": "ACME"}, "ACME"]}));
    let customer = &tables["Customer"];
    assert_eq!(customer.row_count(), 2);
    assert_eq!(customer.columns(), ["name", "value"]);
    assert_eq!(customer.cell(1, "value"), Some(&Cell::from("ACME")));
}

#[test]
fn test_error_string_input_degrades_to_placeholder() {
    let tables = project(json!("Erreur lors du traitement OCR"));
    assert_eq!(tables.len(), 1);
    assert_eq!(tables["Error"].row_count(), 1);
}
