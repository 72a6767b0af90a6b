//! Student-by-column table for the selected subject.
//!
//! SYSTEM CONTEXT
//! ==============
//! Columns render in the order held by the shared `OrderState`, reconciled
//! against the subject's live column list. Header drags rewrite the subject's
//! ordering key; the record model never sees display order.
//!
//! INVARIANTS
//! ==========
//! - The only column list this component renders is the reconciled one.
//! - At most one cell shows an editor, tracked by `UiState::active_cell`.

use columns::{Column, ColumnKind};
use leptos::prelude::*;
use records::Student;

use crate::components::column_header_row::ColumnHeaderRow;
use crate::state::book::BookState;
use crate::state::order::OrderState;
use crate::state::ui::{CellRef, ConfirmAction, ConfirmRequest, UiState};
use crate::util::cell_input::{CellEdit, commit, draft_text, toggled};
use crate::util::color::subject_accent;
use crate::util::ui_persistence::LocalStorage;

#[component]
pub fn SubjectTable() -> impl IntoView {
    let book = expect_context::<RwSignal<BookState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let order = expect_context::<RwSignal<OrderState>>();

    let subject = Memo::new(move |_| book.with(|b| b.current_subject().cloned()));
    let subject_id = Memo::new(move |_| subject.with(|s| s.as_ref().map(|s| s.id.clone())));
    let students = Memo::new(move |_| {
        book.with(|b| b.current_class().map(|c| c.students.clone()).unwrap_or_default())
    });

    let columns = Signal::derive(move || {
        subject.with(|s| s.as_ref().map(|s| order.with(|o| o.columns(s))).unwrap_or_default())
    });
    let accent = Signal::derive(move || subject.with(|s| subject_accent(s.as_ref().and_then(|s| s.color.as_deref()))));

    let on_reorder = Callback::new(move |(source, destination): (usize, usize)| {
        let Some(subject) = subject.get_untracked() else {
            return;
        };
        order.update(|o| o.move_column(&LocalStorage, &subject, source, destination));
    });

    let on_delete_column = Callback::new(move |column: Column| {
        let Some(subject_id) = subject_id.get_untracked() else {
            return;
        };
        let action = ConfirmAction::DeleteColumn { subject_id, column_id: column.id };
        ui.update(|u| u.request_confirm(ConfirmRequest::delete("column", &column.name, action)));
    });

    let draft = RwSignal::new(String::new());
    let new_student = RwSignal::new(String::new());

    // Returns false when the input was rejected and the editor should stay open.
    let commit_cell = move |cell: &CellRef| -> bool {
        let raw = draft.get_untracked();
        let mut accepted = false;
        book.update(|b| {
            let Some(column) = b.current_subject().and_then(|s| s.column(&cell.column_id)).cloned() else {
                return;
            };
            let edit = match commit(&column, &raw) {
                Ok(edit) => edit,
                Err(e) => {
                    b.error = Some(e.to_string());
                    return;
                }
            };
            accepted = b
                .apply_to_class(&LocalStorage, |class| match edit {
                    CellEdit::Set(value) => class.set_value(&cell.student_id, &cell.column_id, value),
                    CellEdit::Clear => class.clear_value(&cell.student_id, &cell.column_id).map(|_| ()),
                })
                .is_some();
        });
        if accepted {
            ui.update(UiState::close_cell);
        }
        accepted
    };

    let open_cell = move |student: &Student, column: &Column| {
        let value = student.value(&column.id);
        if let Some(next) = toggled(column, value) {
            let (student_id, column_id) = (student.id.clone(), column.id.clone());
            book.update(|b| {
                b.apply_to_class(&LocalStorage, |class| class.set_value(&student_id, &column_id, next));
            });
            return;
        }
        draft.set(draft_text(value));
        ui.update(|u| u.open_cell(CellRef::new(student.id.clone(), column.id.clone())));
    };

    let add_student = move || {
        let name = new_student.get_untracked();
        let mut added = false;
        book.update(|b| added = b.apply_to_class(&LocalStorage, |class| class.add_student(&name)).is_some());
        if added {
            new_student.set(String::new());
        }
    };

    let cell_view = move |student: Student, column: Column| {
        let cell = CellRef::new(student.id.clone(), column.id.clone());
        let is_active = {
            let cell = cell.clone();
            move || ui.with(|u| u.active_cell.as_ref() == Some(&cell))
        };
        let shown = student.value(&column.id).map(|v| v.display(&column.kind)).unwrap_or_default();
        let placeholder = placeholder_for(&column);
        let is_active_class = is_active.clone();
        view! {
            <td class="subject-table__cell" class:subject-table__cell--active=is_active_class>
                <Show
                    when=is_active
                    fallback=move || {
                        let (student, column) = (student.clone(), column.clone());
                        let shown = shown.clone();
                        view! {
                            <button class="subject-table__value" on:click=move |_| open_cell(&student, &column)>
                                {shown}
                            </button>
                        }
                    }
                >
                    {
                        let cell = cell.clone();
                        let cell_blur = cell.clone();
                        let placeholder = placeholder.clone();
                        view! {
                            <input
                                class="subject-table__input"
                                placeholder=placeholder
                                prop:value=move || draft.get()
                                on:input=move |ev| draft.set(event_target_value(&ev))
                                on:blur=move |_| {
                                    if ui.with_untracked(|u| u.active_cell.as_ref() == Some(&cell_blur)) {
                                        commit_cell(&cell_blur);
                                    }
                                }
                                on:keydown=move |ev: leptos::ev::KeyboardEvent| match ev.key().as_str() {
                                    "Enter" => {
                                        ev.prevent_default();
                                        commit_cell(&cell);
                                    }
                                    "Escape" => ui.update(UiState::close_cell),
                                    _ => {}
                                }
                                autofocus=true
                            />
                        }
                    }
                </Show>
            </td>
        }
    };

    view! {
        {move || {
            if subject.with(Option::is_none) {
                return view! { <p class="subject-table__empty">"Select or add a subject."</p> }.into_any();
            }
            view! {
                <table class="subject-table">
                    <thead>
                        <ColumnHeaderRow columns=columns accent=accent on_reorder=on_reorder on_delete=on_delete_column />
                    </thead>
                    <tbody>
                        {move || {
                            let ordered = columns.get();
                            students
                                .get()
                                .into_iter()
                                .map(|student| {
                                    let name = student.name.clone();
                                    let action = ConfirmAction::DeleteStudent { student_id: student.id.clone() };
                                    let request = ConfirmRequest::delete("student", &name, action);
                                    let cells = ordered
                                        .iter()
                                        .map(|column| cell_view(student.clone(), column.clone()))
                                        .collect_view();
                                    view! {
                                        <tr class="subject-table__row">
                                            <th class="subject-table__student" scope="row">{name}</th>
                                            {cells}
                                            <td class="subject-table__row-actions">
                                                <button
                                                    class="btn btn--ghost"
                                                    on:click=move |_| ui.update(|u| u.request_confirm(request.clone()))
                                                >
                                                    "Remove"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                    <tfoot>
                        <tr>
                            <td colspan="2">
                                <input
                                    class="subject-table__new-student"
                                    placeholder="New student"
                                    prop:value=move || new_student.get()
                                    on:input=move |ev| new_student.set(event_target_value(&ev))
                                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                                        if ev.key() == "Enter" {
                                            add_student();
                                        }
                                    }
                                />
                                <button class="btn" on:click=move |_| add_student()>"Add student"</button>
                            </td>
                        </tr>
                    </tfoot>
                </table>
            }
                .into_any()
        }}
    }
}

/// Input hint for the editor of `column`.
fn placeholder_for(column: &Column) -> String {
    match &column.kind {
        ColumnKind::Date => "YYYY-MM-DD".to_owned(),
        ColumnKind::Select { options } => options.join(" / "),
        ColumnKind::MultiCheck { slots, labels, .. } if !labels.is_empty() => {
            format!("{} ({slots} slots, x or blank)", labels.join(","))
        }
        ColumnKind::MultiCheck { slots, .. } => format!("{slots} slots, x or blank"),
        _ => String::new(),
    }
}
