use super::*;

fn column(kind: ColumnKind) -> Column {
    Column::new("c1", "Field", kind)
}

fn select() -> ColumnKind {
    ColumnKind::Select { options: vec!["present".to_owned(), "absent".to_owned()] }
}

fn checks(mode: MultiCheckMode) -> ColumnKind {
    ColumnKind::MultiCheck { slots: 3, labels: vec!["hw1".to_owned()], mode }
}

// =============================================================
// validate
// =============================================================

#[test]
fn matching_kinds_validate() {
    assert!(CellValue::Text("hi".to_owned()).validate(&column(ColumnKind::Text)).is_ok());
    assert!(CellValue::Number(92.5).validate(&column(ColumnKind::Number)).is_ok());
    assert!(CellValue::Date("2024-02-29".to_owned()).validate(&column(ColumnKind::Date)).is_ok());
    assert!(CellValue::Checkbox(true).validate(&column(ColumnKind::Checkbox)).is_ok());
    assert!(CellValue::Choice("absent".to_owned()).validate(&column(select())).is_ok());
    assert!(CellValue::Checks(vec![true, false, true]).validate(&column(checks(MultiCheckMode::Boxes))).is_ok());
}

#[test]
fn mismatched_kind_is_rejected_with_expected_tag() {
    let err = CellValue::Text("90".to_owned()).validate(&column(ColumnKind::Number)).expect_err("mismatch");
    assert!(matches!(err, RecordError::KindMismatch { expected: "number", .. }));
}

#[test]
fn non_finite_number_is_rejected() {
    let err = CellValue::Number(f64::NAN).validate(&column(ColumnKind::Number)).expect_err("nan");
    assert!(matches!(err, RecordError::KindMismatch { .. }));
}

#[test]
fn invalid_dates_are_rejected() {
    for raw in ["2023-02-29", "2024-13-01", "yesterday", "01/02/2024"] {
        let err = CellValue::Date(raw.to_owned()).validate(&column(ColumnKind::Date)).expect_err(raw);
        assert!(matches!(err, RecordError::InvalidDate(ref d) if d == raw));
    }
}

#[test]
fn unknown_choice_is_rejected() {
    let err = CellValue::Choice("late".to_owned()).validate(&column(select())).expect_err("unknown");
    assert!(matches!(err, RecordError::UnknownOption { ref value, .. } if value == "late"));
}

#[test]
fn wrong_slot_count_is_rejected() {
    let err = CellValue::Checks(vec![true]).validate(&column(checks(MultiCheckMode::Boxes))).expect_err("slots");
    assert!(matches!(err, RecordError::SlotCount { expected: 3, actual: 1, .. }));
}

// =============================================================
// display
// =============================================================

#[test]
fn integral_numbers_display_without_fraction() {
    assert_eq!(CellValue::Number(90.0).display(&ColumnKind::Number), "90");
    assert_eq!(CellValue::Number(87.25).display(&ColumnKind::Number), "87.25");
}

#[test]
fn checkbox_displays_mark_or_blank() {
    assert_eq!(CellValue::Checkbox(true).display(&ColumnKind::Checkbox), "✓");
    assert_eq!(CellValue::Checkbox(false).display(&ColumnKind::Checkbox), "");
}

#[test]
fn multi_check_display_follows_mode() {
    let flags = CellValue::Checks(vec![true, false, true]);
    assert_eq!(flags.display(&checks(MultiCheckMode::Boxes)), "☑☐☑");
    assert_eq!(flags.display(&checks(MultiCheckMode::Count)), "2/3");
}

// =============================================================
// validate_kind
// =============================================================

#[test]
fn select_needs_distinct_non_empty_options() {
    assert!(validate_kind(&select()).is_ok());
    assert!(validate_kind(&ColumnKind::Select { options: Vec::new() }).is_err());
    assert!(validate_kind(&ColumnKind::Select { options: vec![" ".to_owned()] }).is_err());
    assert!(validate_kind(&ColumnKind::Select { options: vec!["a".to_owned(), "a".to_owned()] }).is_err());
}

#[test]
fn multi_check_needs_slots_and_fitting_labels() {
    assert!(validate_kind(&checks(MultiCheckMode::Count)).is_ok());
    let empty = ColumnKind::MultiCheck { slots: 0, labels: Vec::new(), mode: MultiCheckMode::Boxes };
    assert!(validate_kind(&empty).is_err());
    let overfull = ColumnKind::MultiCheck {
        slots: 1,
        labels: vec!["a".to_owned(), "b".to_owned()],
        mode: MultiCheckMode::Boxes,
    };
    assert!(validate_kind(&overfull).is_err());
}

#[test]
fn value_serializes_with_type_and_value() {
    let json = serde_json::to_value(CellValue::Checks(vec![true, false])).expect("serialize");
    assert_eq!(json, serde_json::json!({ "type": "checks", "value": [true, false] }));
}

// =============================================================
// parse
// =============================================================

#[test]
fn parse_reads_each_kind() {
    assert_eq!(CellValue::parse(&column(ColumnKind::Text), " essay ").ok(), Some(CellValue::Text(" essay ".to_owned())));
    assert_eq!(CellValue::parse(&column(ColumnKind::Number), " 88.5").ok(), Some(CellValue::Number(88.5)));
    assert_eq!(
        CellValue::parse(&column(ColumnKind::Date), "2024-09-01").ok(),
        Some(CellValue::Date("2024-09-01".to_owned()))
    );
    assert_eq!(CellValue::parse(&column(ColumnKind::Checkbox), "Yes").ok(), Some(CellValue::Checkbox(true)));
    assert_eq!(CellValue::parse(&column(ColumnKind::Checkbox), "").ok(), Some(CellValue::Checkbox(false)));
    assert_eq!(CellValue::parse(&column(select()), "present").ok(), Some(CellValue::Choice("present".to_owned())));
    assert_eq!(
        CellValue::parse(&column(checks(MultiCheckMode::Boxes)), "x, ,1").ok(),
        Some(CellValue::Checks(vec![true, false, true]))
    );
}

#[test]
fn parse_blank_group_unchecks_every_slot() {
    assert_eq!(
        CellValue::parse(&column(checks(MultiCheckMode::Boxes)), "  ").ok(),
        Some(CellValue::Checks(vec![false, false, false]))
    );
}

#[test]
fn parse_rejects_garbage_numbers_and_flags() {
    let err = CellValue::parse(&column(ColumnKind::Number), "ninety").expect_err("not a number");
    assert!(matches!(err, RecordError::InvalidInput { expected: "number", .. }));
    let err = CellValue::parse(&column(ColumnKind::Number), "inf").expect_err("infinite");
    assert!(matches!(err, RecordError::InvalidInput { .. }));
    let err = CellValue::parse(&column(ColumnKind::Checkbox), "maybe").expect_err("not a flag");
    assert!(matches!(err, RecordError::InvalidInput { expected: "checkbox", .. }));
}

#[test]
fn parse_applies_kind_validation() {
    assert!(matches!(
        CellValue::parse(&column(ColumnKind::Date), "2023-02-29"),
        Err(RecordError::InvalidDate(_))
    ));
    assert!(matches!(CellValue::parse(&column(select()), "late"), Err(RecordError::UnknownOption { .. })));
    assert!(matches!(
        CellValue::parse(&column(checks(MultiCheckMode::Count)), "x,x"),
        Err(RecordError::SlotCount { expected: 3, actual: 2, .. })
    ));
}

// =============================================================
// build_kind
// =============================================================

#[test]
fn build_kind_maps_tags() {
    assert_eq!(build_kind("Number", Vec::new(), None, false).ok(), Some(ColumnKind::Number));
    assert_eq!(
        build_kind("select", vec![" A ".to_owned(), "B".to_owned()], None, false).ok(),
        Some(ColumnKind::Select { options: vec!["A".to_owned(), "B".to_owned()] })
    );
}

#[test]
fn build_kind_multi_check_defaults_slots_to_labels() {
    let kind = build_kind("multi-check", vec!["hw1".to_owned(), "hw2".to_owned()], None, true).expect("kind");
    assert_eq!(
        kind,
        ColumnKind::MultiCheck {
            slots: 2,
            labels: vec!["hw1".to_owned(), "hw2".to_owned()],
            mode: MultiCheckMode::Count,
        }
    );
    let unlabeled = build_kind("multi_check", Vec::new(), Some(4), false).expect("kind");
    assert!(matches!(unlabeled, ColumnKind::MultiCheck { slots: 4, .. }));
}

#[test]
fn build_kind_rejects_unknown_and_invalid() {
    assert!(matches!(build_kind("rating", Vec::new(), None, false), Err(RecordError::InvalidKind(_))));
    assert!(matches!(build_kind("select", Vec::new(), None, false), Err(RecordError::InvalidKind(_))));
    assert!(matches!(build_kind("multi_check", Vec::new(), None, false), Err(RecordError::InvalidKind(_))));
}
