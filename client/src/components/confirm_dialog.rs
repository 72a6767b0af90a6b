//! Modal confirmation for destructive gradebook actions.
//!
//! The dialog has no open/close signal of its own: it is visible exactly while
//! `UiState::pending_confirm` holds a request.

use leptos::prelude::*;

use crate::state::ui::{ConfirmAction, UiState};

/// Dialog shown while a confirmation is pending.
#[component]
pub fn ConfirmDialog(on_confirm: Callback<ConfirmAction>) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    let cancel = move || ui.update(UiState::cancel_confirm);
    let accept = move || {
        let mut action = None;
        ui.update(|u| action = u.take_confirm());
        if let Some(action) = action {
            on_confirm.run(action);
        }
    };

    view! {
        {move || {
            ui.get()
                .pending_confirm
                .map(|request| {
                    view! {
                        <div class="dialog-backdrop" on:click=move |_| cancel()>
                            <div
                                class="dialog dialog--confirm"
                                role="alertdialog"
                                on:click=move |ev| ev.stop_propagation()
                                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                                    if ev.key() == "Escape" {
                                        cancel();
                                    }
                                }
                            >
                                <h2 class="dialog__title">{request.title}</h2>
                                <p class="dialog__message">{request.message}</p>
                                <div class="dialog__actions">
                                    <button class="btn" on:click=move |_| cancel() autofocus=true>
                                        "Cancel"
                                    </button>
                                    <button class="btn btn--danger" on:click=move |_| accept()>
                                        {request.confirm_label}
                                    </button>
                                </div>
                            </div>
                        </div>
                    }
                })
        }}
    }
}
