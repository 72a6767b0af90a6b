use super::*;

#[test]
fn default_is_idle() {
    let drag = ColumnDrag::default();
    assert!(!drag.is_dragging());
    assert_eq!(drag.over(), None);
}

#[test]
fn drop_on_other_header_yields_move() {
    let mut drag = ColumnDrag::default();
    drag.start(0);
    drag.enter(1);
    drag.enter(2);
    assert_eq!(drag.over(), Some(2));
    assert_eq!(drag.finish(4), Some((0, 2)));
    assert!(!drag.is_dragging());
}

#[test]
fn drop_on_source_header_is_noop() {
    let mut drag = ColumnDrag::default();
    drag.start(1);
    drag.enter(1);
    assert_eq!(drag.finish(4), None);
}

#[test]
fn drop_after_leaving_every_header_is_noop() {
    let mut drag = ColumnDrag::default();
    drag.start(3);
    drag.enter(0);
    drag.leave(0);
    assert_eq!(drag.finish(4), None);
}

#[test]
fn leave_of_a_different_header_keeps_target() {
    let mut drag = ColumnDrag::default();
    drag.start(3);
    drag.enter(0);
    drag.leave(2);
    assert_eq!(drag.finish(4), Some((3, 0)));
}

#[test]
fn enter_without_start_is_ignored() {
    let mut drag = ColumnDrag::default();
    drag.enter(2);
    assert_eq!(drag.over(), None);
    assert_eq!(drag.finish(4), None);
}

#[test]
fn stale_indices_after_column_removal_are_rejected() {
    let mut drag = ColumnDrag::default();
    drag.start(0);
    drag.enter(3);
    assert_eq!(drag.finish(3), None);
}

#[test]
fn cancel_resets_state() {
    let mut drag = ColumnDrag::default();
    drag.start(2);
    drag.enter(0);
    drag.cancel();
    assert_eq!(drag, ColumnDrag::default());
    assert_eq!(drag.source(), None);
}
