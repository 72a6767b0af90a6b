use super::*;
use crate::column::{Column, ColumnKind};
use crate::store::{MemoryStorage, StoreError};

fn col(id: &str) -> Column {
    Column::new(id, id, ColumnKind::Number)
}

fn abcd() -> Vec<Column> {
    vec![col("a"), col("b"), col("c"), col("d")]
}

fn order(raw: &[&str]) -> Vec<ColumnId> {
    raw.iter().map(|id| ColumnId::from(*id)).collect()
}

// =============================================================
// Keys
// =============================================================

#[test]
fn scoped_key_uses_default_prefix() {
    let storage = MemoryStorage::new();
    let columns = ColumnOrder::scoped(&storage, "subject-1");
    assert_eq!(columns.key(), "gradebook:column_order:subject-1");
}

#[test]
fn custom_prefix_is_applied() {
    let storage = MemoryStorage::new();
    let columns = ColumnOrder::with_prefix(&storage, "test/", "s");
    assert_eq!(columns.key(), "test/column_order:s");
}

#[test]
fn scopes_do_not_share_orderings() {
    let storage = MemoryStorage::new();
    let math = ColumnOrder::scoped(&storage, "math");
    let art = ColumnOrder::scoped(&storage, "art");
    math.persist(&order(&["b", "a"]));
    assert!(art.load().is_empty());
    assert_eq!(math.load(), order(&["b", "a"]));
}

// =============================================================
// persist / load
// =============================================================

#[test]
fn load_without_stored_value_is_empty() {
    let storage = MemoryStorage::new();
    assert!(ColumnOrder::scoped(&storage, "s").load().is_empty());
}

#[test]
fn persist_then_load_round_trips() {
    let storage = MemoryStorage::new();
    let columns = ColumnOrder::scoped(&storage, "s");
    let shuffled = reconcile(&abcd(), &order(&["c", "a"]));
    columns.persist(&ids(&shuffled));
    assert_eq!(columns.load(), ids(&shuffled));
}

#[test]
fn persisted_value_is_a_flat_json_array() {
    let storage = MemoryStorage::new();
    let columns = ColumnOrder::scoped(&storage, "s");
    columns.persist(&order(&["x", "y"]));
    let raw = storage.get_item(columns.key()).expect("get").expect("stored");
    assert_eq!(raw, r#"["x","y"]"#);
}

#[test]
fn persist_overwrites_previous_order() {
    let storage = MemoryStorage::new();
    let columns = ColumnOrder::scoped(&storage, "s");
    columns.persist(&order(&["a", "b"]));
    columns.persist(&order(&["b"]));
    assert_eq!(columns.load(), order(&["b"]));
}

#[test]
fn load_accepts_numeric_ids() {
    let storage = MemoryStorage::new();
    let columns = ColumnOrder::scoped(&storage, "s");
    storage.set_item(columns.key(), r#"[3, "a", 12]"#).expect("set");
    assert_eq!(columns.load(), order(&["3", "a", "12"]));
}

#[test]
fn corrupt_value_loads_as_empty_and_reconciles_to_creation_order() {
    let storage = MemoryStorage::new();
    let columns = ColumnOrder::scoped(&storage, "s");
    storage.set_item(columns.key(), "not json {").expect("set");
    assert!(columns.load().is_empty());
    assert_eq!(columns.apply(&abcd()), abcd());
}

#[test]
fn wrong_json_shape_loads_as_empty() {
    let storage = MemoryStorage::new();
    let columns = ColumnOrder::scoped(&storage, "s");
    for raw in [r#"{"order":["a"]}"#, r#"[["a"]]"#, "null", r#"[true]"#] {
        storage.set_item(columns.key(), raw).expect("set");
        assert!(columns.load().is_empty(), "{raw} should be treated as absent");
    }
}

#[test]
fn unavailable_storage_degrades_to_creation_order() {
    let storage = MemoryStorage::unavailable();
    let columns = ColumnOrder::scoped(&storage, "s");
    columns.persist(&order(&["d", "c"]));
    assert!(columns.load().is_empty());
    assert_eq!(columns.apply(&abcd()), abcd());
    columns.forget();
}

#[test]
fn quota_failure_is_swallowed_and_keeps_previous_order() {
    let storage = MemoryStorage::with_quota(48);
    let columns = ColumnOrder::scoped(&storage, "s");
    columns.persist(&order(&["b"]));
    assert_eq!(columns.load(), order(&["b"]));

    let long: Vec<ColumnId> = (0..20).map(|i| ColumnId::new(format!("column-{i}"))).collect();
    columns.persist(&long);
    assert_eq!(columns.load(), order(&["b"]));
    assert_eq!(storage.set_item("overflow", &"x".repeat(64)), Err(StoreError::QuotaExceeded { key: "overflow".to_owned() }));
}

// =============================================================
// apply / move_column / forget
// =============================================================

#[test]
fn apply_merges_stored_order_with_live_columns() {
    let storage = MemoryStorage::new();
    let columns = ColumnOrder::scoped(&storage, "s");
    columns.persist(&order(&["d", "gone", "b"]));
    let shown = columns.apply(&abcd());
    assert_eq!(ids(&shown), order(&["d", "b", "a", "c"]));
}

#[test]
fn move_column_persists_new_order() {
    let storage = MemoryStorage::new();
    let columns = ColumnOrder::scoped(&storage, "s");
    let moved = columns.move_column(&abcd(), 0, 2);
    assert_eq!(ids(&moved), order(&["b", "c", "a", "d"]));
    assert_eq!(columns.load(), ids(&moved));
    assert_eq!(columns.apply(&abcd()), moved);
}

#[test]
fn noop_move_does_not_write() {
    let storage = MemoryStorage::new();
    let columns = ColumnOrder::scoped(&storage, "s");
    let same = columns.move_column(&abcd(), 2, 2);
    assert_eq!(same, abcd());
    let out_of_range = columns.move_column(&abcd(), 9, 0);
    assert_eq!(out_of_range, abcd());
    assert!(storage.is_empty());
}

#[test]
fn stale_id_after_column_deletion_is_ignored() {
    let storage = MemoryStorage::new();
    let columns = ColumnOrder::scoped(&storage, "s");
    let moved = columns.move_column(&abcd(), 3, 0);
    assert_eq!(ids(&moved), order(&["d", "a", "b", "c"]));

    let without_a: Vec<Column> = abcd().into_iter().filter(|c| c.id.as_str() != "a").collect();
    assert_eq!(ids(&columns.apply(&without_a)), order(&["d", "b", "c"]));
}

#[test]
fn forget_removes_stored_order() {
    let storage = MemoryStorage::new();
    let columns = ColumnOrder::scoped(&storage, "s");
    columns.persist(&order(&["a"]));
    columns.forget();
    assert!(storage.is_empty());
    assert!(columns.load().is_empty());
}
