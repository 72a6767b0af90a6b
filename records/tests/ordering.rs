//! End-to-end: a subject table reordered by drag, persisted, reloaded, edited,
//! and exported, all against one in-memory storage.

use columns::{ColumnKind, ColumnOrder, MemoryStorage, Storage, ids};
use records::{CellValue, Gradebook, Report};

fn seeded() -> (Gradebook, String, String) {
    let mut book = Gradebook::default();
    let class_id = book.add_class("8C", None).expect("class");
    let class = book.class_mut(&class_id).expect("class");
    let subject_id = class.add_subject("Science", Some("#0a0")).expect("subject");
    for name in ["Lab 1", "Lab 2", "Exam", "Notes"] {
        let kind = if name == "Notes" { ColumnKind::Text } else { ColumnKind::Number };
        class.add_column(&subject_id, name, kind).expect("column");
    }
    let student = class.add_student("Rin").expect("student");
    let lab1 = class.subject(&subject_id).expect("subject").columns[0].id.clone();
    class.set_value(&student, &lab1, CellValue::Number(4.0)).expect("value");
    (book, class_id, subject_id)
}

fn column_names(book: &Gradebook, class_id: &str, subject_id: &str, storage: &MemoryStorage) -> Vec<String> {
    let subject = book.class(class_id).expect("class").subject(subject_id).expect("subject");
    ColumnOrder::scoped(storage, subject_id)
        .apply(&subject.columns)
        .into_iter()
        .map(|c| c.name)
        .collect()
}

#[test]
fn drag_order_survives_reload_and_drives_export() {
    let storage = MemoryStorage::new();
    let (book, class_id, subject_id) = seeded();
    book.save(&storage, columns::DEFAULT_KEY_PREFIX).expect("save");

    let subject = book.class(&class_id).expect("class").subject(&subject_id).expect("subject");
    let order = ColumnOrder::scoped(&storage, &subject_id);
    let shown = order.apply(&subject.columns);
    let moved = order.move_column(&shown, 2, 0);
    assert_eq!(moved.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(), ["Exam", "Lab 1", "Lab 2", "Notes"]);

    let reloaded = Gradebook::load_default(&storage).expect("load");
    assert_eq!(column_names(&reloaded, &class_id, &subject_id, &storage), ["Exam", "Lab 1", "Lab 2", "Notes"]);

    let class = reloaded.class(&class_id).expect("class");
    let subject = class.subject(&subject_id).expect("subject");
    let report = Report::for_subject(class, subject, &order.load());
    assert_eq!(report.headers, ["Student", "Exam", "Lab 1", "Lab 2", "Notes"]);
    assert_eq!(report.rows[0], ["Rin", "", "4", "", ""]);
}

#[test]
fn deleting_a_column_leaves_a_harmless_stale_id() {
    let storage = MemoryStorage::new();
    let (mut book, class_id, subject_id) = seeded();
    let order = ColumnOrder::scoped(&storage, &subject_id);

    let class = book.class_mut(&class_id).expect("class");
    let columns = class.subject(&subject_id).expect("subject").columns.clone();
    let moved = order.move_column(&columns, 0, 3);
    assert_eq!(ids(&moved).len(), 4);

    let lab1 = columns[0].id.clone();
    class.delete_column(&subject_id, &lab1).expect("delete");
    assert!(class.students.iter().all(|s| !s.values.contains_key(&lab1)));
    assert!(order.load().contains(&lab1));

    assert_eq!(column_names(&book, &class_id, &subject_id, &storage), ["Lab 2", "Exam", "Notes"]);
}

#[test]
fn corrupt_order_falls_back_to_creation_order() {
    let storage = MemoryStorage::new();
    let (book, class_id, subject_id) = seeded();
    let order = ColumnOrder::scoped(&storage, &subject_id);
    storage.set_item(order.key(), "<<garbage>>").expect("set");
    assert_eq!(column_names(&book, &class_id, &subject_id, &storage), ["Lab 1", "Lab 2", "Exam", "Notes"]);
}

#[test]
fn removing_a_subject_can_forget_its_order() {
    let storage = MemoryStorage::new();
    let (mut book, class_id, subject_id) = seeded();
    let order = ColumnOrder::scoped(&storage, &subject_id);
    order.persist(&[columns::ColumnId::from("x")]);

    let removed = book.class_mut(&class_id).expect("class").remove_subject(&subject_id).expect("remove");
    ColumnOrder::scoped(&storage, &removed.id).forget();
    assert!(storage.get_item(order.key()).expect("get").is_none());
}
