//! Draggable header row of a subject table.
//!
//! DESIGN
//! ======
//! Headers only report gesture events into `UiState::column_drag`. The
//! completed `(source, destination)` pair goes to `on_reorder`; persisting the
//! new order is the table's job.

use columns::Column;
use leptos::prelude::*;

use crate::state::ui::UiState;
use crate::util::color::header_text_color;

#[component]
pub fn ColumnHeaderRow(
    columns: Signal<Vec<Column>>,
    accent: Signal<String>,
    on_reorder: Callback<(usize, usize)>,
    on_delete: Callback<Column>,
) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    let header_style = move || {
        let background = accent.get();
        format!("background:{background};color:{}", header_text_color(&background))
    };

    let on_drop = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        let len = columns.with_untracked(Vec::len);
        let mut moved = None;
        ui.update(|u| moved = u.column_drag.finish(len));
        if let Some(pair) = moved {
            on_reorder.run(pair);
        }
    };

    view! {
        <tr class="subject-table__head" style=header_style>
            <th class="subject-table__student-head">{records::report::STUDENT_HEADER}</th>
            {move || {
                columns
                    .get()
                    .into_iter()
                    .enumerate()
                    .map(|(index, column)| {
                        let is_source = move || ui.get().column_drag.source() == Some(index);
                        let is_target = move || ui.get().column_drag.over() == Some(index);
                        let name = column.name.clone();
                        let kind = column.kind.tag();
                        let delete_label = format!("Delete column {name}");
                        view! {
                            <th
                                class="subject-table__column-head"
                                class:subject-table__column-head--dragging=is_source
                                class:subject-table__column-head--drop-target=is_target
                                draggable="true"
                                title=kind
                                on:dragstart=move |ev: leptos::ev::DragEvent| {
                                    #[cfg(feature = "csr")]
                                    {
                                        // Firefox will not start a drag without payload.
                                        if let Some(transfer) = ev.data_transfer() {
                                            let _ = transfer.set_data("text/plain", &index.to_string());
                                        }
                                    }
                                    #[cfg(not(feature = "csr"))]
                                    {
                                        let _ = ev;
                                    }
                                    ui.update(|u| u.column_drag.start(index));
                                }
                                on:dragenter=move |_| ui.update(|u| u.column_drag.enter(index))
                                on:dragover=move |ev: leptos::ev::DragEvent| ev.prevent_default()
                                on:dragleave=move |_| ui.update(|u| u.column_drag.leave(index))
                                on:drop=on_drop
                                on:dragend=move |_| ui.update(|u| u.column_drag.cancel())
                            >
                                <span class="subject-table__column-name">{name}</span>
                                <button
                                    class="subject-table__column-delete"
                                    aria-label=delete_label
                                    on:click=move |_| on_delete.run(column.clone())
                                >
                                    "×"
                                </button>
                            </th>
                        }
                    })
                    .collect_view()
            }}
            <th class="subject-table__actions-head"></th>
        </tr>
    }
}
