//! Gradebook page: class list, subject tabs, column form, and the table.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the only screen. It turns form input and confirmed dialog actions
//! into `BookState` mutations, and drops a subject's stored column order when
//! the subject (or its class) is deleted. The CSV export reads the same
//! `OrderState` as the table, so it follows header drags.

#[cfg(test)]
#[path = "gradebook_test.rs"]
mod gradebook_test;

use leptos::prelude::*;
use records::{RecordError, Report, build_kind};

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::subject_table::SubjectTable;
use crate::state::book::BookState;
use crate::state::order::OrderState;
use crate::state::ui::{ConfirmAction, ConfirmRequest, UiState};
use crate::util::ui_persistence::LocalStorage;

const COLUMN_TYPES: [(&str, &str); 6] = [
    ("text", "Text"),
    ("number", "Number"),
    ("date", "Date"),
    ("checkbox", "Checkbox"),
    ("select", "Select"),
    ("multi_check", "Checkbox group"),
];

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned).collect()
}

/// Blank means "one slot per label".
fn parse_slots(raw: &str) -> Result<Option<usize>, RecordError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<usize>()
        .map(Some)
        .map_err(|_| RecordError::InvalidKind(format!("slot count `{raw}` is not a whole number")))
}

#[component]
pub fn GradebookPage() -> impl IntoView {
    let book = expect_context::<RwSignal<BookState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let order = expect_context::<RwSignal<OrderState>>();

    let new_class = RwSignal::new(String::new());
    let new_subject = RwSignal::new(String::new());
    let new_subject_color = RwSignal::new(String::new());
    let column_name = RwSignal::new(String::new());
    let column_type = RwSignal::new("text".to_owned());
    let column_options = RwSignal::new(String::new());
    let column_slots = RwSignal::new(String::new());
    let column_count_mode = RwSignal::new(false);
    let show_export = RwSignal::new(false);

    let on_confirm = Callback::new(move |action: ConfirmAction| {
        book.update(|b| match action {
            ConfirmAction::DeleteClass { class_id } => {
                if let Some(class) = b.apply(&LocalStorage, |book| book.remove_class(&class_id)) {
                    order.update(|o| {
                        for subject in &class.subjects {
                            o.forget(&LocalStorage, &subject.id);
                        }
                    });
                }
            }
            ConfirmAction::DeleteSubject { subject_id } => {
                if b.apply_to_class(&LocalStorage, |class| class.remove_subject(&subject_id)).is_some() {
                    order.update(|o| o.forget(&LocalStorage, &subject_id));
                }
            }
            ConfirmAction::DeleteStudent { student_id } => {
                b.apply_to_class(&LocalStorage, |class| class.remove_student(&student_id));
            }
            ConfirmAction::DeleteColumn { subject_id, column_id } => {
                b.apply_to_class(&LocalStorage, |class| class.delete_column(&subject_id, &column_id));
            }
        });
    });

    let add_class = move || {
        let name = new_class.get_untracked();
        let mut created = None;
        book.update(|b| {
            created = b.apply(&LocalStorage, |book| book.add_class(&name, None));
            if let Some(id) = &created {
                b.select_class(&LocalStorage, id);
            }
        });
        if created.is_some() {
            new_class.set(String::new());
        }
    };

    let add_subject = move || {
        let name = new_subject.get_untracked();
        let color = new_subject_color.get_untracked();
        let mut created = None;
        book.update(|b| {
            created = b.apply_to_class(&LocalStorage, |class| class.add_subject(&name, Some(&color)));
            if let Some(id) = &created {
                b.select_subject(&LocalStorage, id);
            }
        });
        if created.is_some() {
            new_subject.set(String::new());
        }
    };

    let add_column = move || {
        let name = column_name.get_untracked();
        let tag = column_type.get_untracked();
        let options = split_list(&column_options.get_untracked());
        let slots = column_slots.get_untracked();
        let count = column_count_mode.get_untracked();
        let mut added = false;
        book.update(|b| {
            let Some(subject_id) = b.subject_id.clone() else {
                return;
            };
            added = b
                .apply_to_class(&LocalStorage, |class| {
                    let kind = build_kind(&tag, options, parse_slots(&slots)?, count)?;
                    class.add_column(&subject_id, &name, kind)
                })
                .is_some();
        });
        if added {
            column_name.set(String::new());
            column_options.set(String::new());
            column_slots.set(String::new());
        }
    };

    let export = move || {
        book.with(|b| {
            let (class, subject) = (b.current_class()?, b.current_subject()?);
            Some(order.with(|o| Report::for_subject(class, subject, o.saved_for(&subject.id))))
        })
    };

    let class_list = move || {
        book.with(|b| {
            let selected = b.class_id.clone();
            b.book
                .classes
                .iter()
                .map(|class| {
                    let id = class.id.clone();
                    let is_selected = selected.as_deref() == Some(id.as_str());
                    let request = ConfirmRequest::delete(
                        "class",
                        &class.name,
                        ConfirmAction::DeleteClass { class_id: id.clone() },
                    );
                    view! {
                        <li class="class-list__item" class:class-list__item--active=is_selected>
                            <button
                                class="class-list__select"
                                on:click=move |_| {
                                    ui.update(UiState::close_cell);
                                    book.update(|b| b.select_class(&LocalStorage, &id));
                                }
                            >
                                {class.name.clone()}
                            </button>
                            <button
                                class="btn btn--ghost"
                                aria-label="Delete class"
                                on:click=move |_| ui.update(|u| u.request_confirm(request.clone()))
                            >
                                "×"
                            </button>
                        </li>
                    }
                })
                .collect_view()
        })
    };

    let subject_tabs = move || {
        book.with(|b| {
            let Some(class) = b.current_class() else {
                return Vec::new();
            };
            let selected = b.subject_id.clone();
            class
                .subjects
                .iter()
                .map(|subject| {
                    let id = subject.id.clone();
                    let is_selected = selected.as_deref() == Some(id.as_str());
                    let request = ConfirmRequest::delete(
                        "subject",
                        &subject.name,
                        ConfirmAction::DeleteSubject { subject_id: id.clone() },
                    );
                    view! {
                        <div class="subject-tabs__tab" class:subject-tabs__tab--active=is_selected>
                            <button
                                class="subject-tabs__select"
                                on:click=move |_| {
                                    ui.update(UiState::close_cell);
                                    book.update(|b| b.select_subject(&LocalStorage, &id));
                                }
                            >
                                {subject.name.clone()}
                            </button>
                            <button
                                class="btn btn--ghost"
                                aria-label="Delete subject"
                                on:click=move |_| ui.update(|u| u.request_confirm(request.clone()))
                            >
                                "×"
                            </button>
                        </div>
                    }
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="gradebook">
            <aside class="gradebook__sidebar">
                <h1 class="gradebook__title">"Gradebook"</h1>
                <ul class="class-list">{class_list}</ul>
                <div class="gradebook__form">
                    <input
                        placeholder="New class"
                        prop:value=move || new_class.get()
                        on:input=move |ev| new_class.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                add_class();
                            }
                        }
                    />
                    <button class="btn" on:click=move |_| add_class()>"Add class"</button>
                </div>
            </aside>

            <main class="gradebook__main">
                {move || {
                    book.get()
                        .error
                        .map(|message| {
                            view! {
                                <div class="gradebook__error" role="alert">
                                    <span>{message}</span>
                                    <button class="btn btn--ghost" on:click=move |_| book.update(|b| b.error = None)>
                                        "Dismiss"
                                    </button>
                                </div>
                            }
                        })
                }}

                <Show
                    when=move || book.with(|b| b.class_id.is_some())
                    fallback=|| view! { <p class="gradebook__empty">"Add a class to get started."</p> }
                >
                    <nav class="subject-tabs">
                        {subject_tabs}
                        <div class="subject-tabs__new">
                            <input
                                placeholder="New subject"
                                prop:value=move || new_subject.get()
                                on:input=move |ev| new_subject.set(event_target_value(&ev))
                            />
                            <input
                                class="subject-tabs__color"
                                placeholder="#rrggbb"
                                prop:value=move || new_subject_color.get()
                                on:input=move |ev| new_subject_color.set(event_target_value(&ev))
                            />
                            <button class="btn" on:click=move |_| add_subject()>"Add subject"</button>
                        </div>
                    </nav>

                    <Show when=move || book.with(|b| b.subject_id.is_some())>
                        <div class="column-form">
                            <input
                                placeholder="Column name"
                                prop:value=move || column_name.get()
                                on:input=move |ev| column_name.set(event_target_value(&ev))
                            />
                            <select
                                prop:value=move || column_type.get()
                                on:change=move |ev| column_type.set(event_target_value(&ev))
                            >
                                {COLUMN_TYPES
                                    .iter()
                                    .map(|(tag, label)| view! { <option value=*tag>{*label}</option> })
                                    .collect_view()}
                            </select>
                            <Show when=move || matches!(column_type.get().as_str(), "select" | "multi_check")>
                                <input
                                    placeholder="Options or labels, comma separated"
                                    prop:value=move || column_options.get()
                                    on:input=move |ev| column_options.set(event_target_value(&ev))
                                />
                            </Show>
                            <Show when=move || column_type.get() == "multi_check">
                                <input
                                    class="column-form__slots"
                                    type="number"
                                    min="1"
                                    placeholder="Slots"
                                    prop:value=move || column_slots.get()
                                    on:input=move |ev| column_slots.set(event_target_value(&ev))
                                />
                                <label class="column-form__toggle">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || column_count_mode.get()
                                        on:change=move |ev| column_count_mode.set(event_target_checked(&ev))
                                    />
                                    "Show as count"
                                </label>
                            </Show>
                            <button class="btn btn--primary" on:click=move |_| add_column()>"Add column"</button>
                            <button class="btn" on:click=move |_| show_export.update(|s| *s = !*s)>
                                "Export CSV"
                            </button>
                        </div>
                    </Show>

                    <SubjectTable />

                    <Show when=move || show_export.get()>
                        {move || {
                            export()
                                .map(|report| {
                                    view! {
                                        <section class="gradebook__export">
                                            <h2 class="gradebook__export-title">{report.title.clone()}</h2>
                                            <textarea readonly=true prop:value=report.to_csv()></textarea>
                                        </section>
                                    }
                                })
                        }}
                    </Show>
                </Show>
            </main>

            <ConfirmDialog on_confirm=on_confirm />
        </div>
    }
}
