//! Integration tests for merging per-page records.

use ocrtab::{merge_pages, MergeOptions, PageRecord, StructuredRecord};
use serde_json::{json, Value};

fn page(number: u32, content: Value) -> PageRecord {
    let record = StructuredRecord::new(format!("page_{:03}", number), content).unwrap();
    PageRecord::new(number, format!("page_{:03}.jpeg", number))
        .unwrap()
        .with_data(record)
}

fn empty_page(number: u32) -> PageRecord {
    PageRecord::new(number, format!("page_{:03}.jpeg", number)).unwrap()
}

#[test]
fn test_key_order_is_first_seen_across_pages() {
    let pages = vec![
        page(1, json!({"Votre Commande": "21854", "Client": "ACME"})),
        page(2, json!({"Lignes": [{"sku": "A"}], "Client": "ACME"})),
        page(3, json!({"Total": "120", "Votre Commande": "21854"})),
    ];

    let merged = merge_pages(&pages, &MergeOptions::default());
    let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["Votre Commande", "Client", "Lignes", "Total"]);
}

#[test]
fn test_list_then_scalar_appends() {
    let pages = vec![page(1, json!({"k": ["A", "B"]})), page(2, json!({"k": "C"}))];
    let merged = merge_pages(&pages, &MergeOptions::default());
    assert_eq!(merged["k"], json!(["A", "B", "C"]));
}

#[test]
fn test_scalar_promotion_step_by_step() {
    let p1 = page(1, json!({"k": "X"}));
    let p2 = page(2, json!({"k": "Y"}));
    let p3 = page(3, json!({"k": "Z"}));
    let options = MergeOptions::default();

    assert_eq!(merge_pages(&[p1.clone()], &options)["k"], json!("X"));
    assert_eq!(
        merge_pages(&[p1.clone(), p2.clone()], &options)["k"],
        json!(["X", "Y"])
    );
    assert_eq!(merge_pages(&[p1, p2, p3], &options)["k"], json!(["X", "Y", "Z"]));
}

#[test]
fn test_records_lists_concatenate_across_pages() {
    let pages = vec![
        page(1, json!({"Items": [{"sku": "A"}, {"sku": "B"}]})),
        page(2, json!({"Items": [{"sku": "C"}]})),
    ];
    let merged = merge_pages(&pages, &MergeOptions::default());
    assert_eq!(
        merged["Items"],
        json!([{"sku": "A"}, {"sku": "B"}, {"sku": "C"}])
    );
}

#[test]
fn test_missing_data_does_not_change_order() {
    let with_gap = vec![
        page(1, json!({"a": 1})),
        empty_page(2),
        page(3, json!({"b": 2, "a": 3})),
    ];
    let without_gap = vec![page(1, json!({"a": 1})), page(3, json!({"b": 2, "a": 3}))];

    let options = MergeOptions::default();
    assert_eq!(
        merge_pages(&with_gap, &options),
        merge_pages(&without_gap, &options)
    );
}

#[test]
fn test_all_pages_empty_gives_empty_mapping() {
    let pages = vec![empty_page(1), empty_page(2)];
    assert!(merge_pages(&pages, &MergeOptions::default()).is_empty());
    assert!(merge_pages(&[], &MergeOptions::default()).is_empty());
}

#[test]
fn test_pages_merge_in_page_number_order_not_input_order() {
    let pages = vec![page(3, json!({"k": "Z"})), page(1, json!({"k": "X"})), page(2, json!({"k": "Y"}))];
    let merged = merge_pages(&pages, &MergeOptions::default());
    assert_eq!(merged["k"], json!(["X", "Y", "Z"]));
}

/// Mixed shapes across pages are kept as a heterogeneous list, unchanged.
#[test]
fn test_scalar_then_mapping_becomes_mixed_list() {
    let pages = vec![
        page(1, json!({"Customer": "ACME"})),
        page(2, json!({"Customer": {"name": "ACME", "city": "Lyon"}})),
    ];
    let merged = merge_pages(&pages, &MergeOptions::default());
    assert_eq!(
        merged["Customer"],
        json!(["ACME", {"name": "ACME", "city": "Lyon"}])
    );
}
