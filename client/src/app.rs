//! Root application component and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::pages::gradebook::GradebookPage;
use crate::state::{book::BookState, order::OrderState, ui::UiState};
use crate::util::ui_persistence::LocalStorage;

/// Root application component.
///
/// Loads the stored gradebook once and provides the shared state contexts.
/// The column order context is kept in step with the selected subject.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let book = RwSignal::new(BookState::load(&LocalStorage));
    let ui = RwSignal::new(UiState::default());
    let order = RwSignal::new(OrderState::default());

    // Follow the selected subject's stored column order.
    Effect::new(move || {
        let subject_id = book.with(|b| b.subject_id.clone());
        if order.with_untracked(|o| o.subject_id != subject_id) {
            order.update(|o| o.sync(&LocalStorage, subject_id.as_deref()));
        }
    });

    provide_context(book);
    provide_context(ui);
    provide_context(order);

    view! {
        <Title text="Gradebook"/>
        <GradebookPage/>
    }
}
