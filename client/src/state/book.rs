//! Loaded gradebook plus the current class/subject selection.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page reads this through `RwSignal<BookState>`. Every mutation goes
//! through [`BookState::apply`], which saves the whole book and repairs the
//! selection so views never point at deleted records.

#[cfg(test)]
#[path = "book_test.rs"]
mod book_test;

use columns::{DEFAULT_KEY_PREFIX, Storage};
use records::{Class, Gradebook, RecordError, Subject};
use serde::{Deserialize, Serialize};

use crate::util::ui_persistence::{load_json, save_json};

/// Storage key of the last selected class and subject.
pub fn selection_key() -> String {
    format!("{DEFAULT_KEY_PREFIX}selection")
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Selection {
    class_id: Option<String>,
    subject_id: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct BookState {
    pub book: Gradebook,
    pub class_id: Option<String>,
    pub subject_id: Option<String>,
    /// Last failed mutation or load, shown as a banner.
    pub error: Option<String>,
}

impl BookState {
    /// Load the stored gradebook and selection.
    ///
    /// A corrupt or unreadable book starts empty with `error` set; the stored
    /// copy is left untouched until the next successful mutation.
    pub fn load(storage: &impl Storage) -> Self {
        let (book, error) = match Gradebook::load_default(storage) {
            Ok(book) => (book, None),
            Err(e) => {
                tracing::warn!(error = %e, "gradebook not loaded; starting empty");
                (Gradebook::default(), Some(e.to_string()))
            }
        };
        let selection = load_json::<Selection>(storage, &selection_key()).unwrap_or_default();
        let mut state = Self { book, class_id: selection.class_id, subject_id: selection.subject_id, error };
        state.normalize_selection();
        state
    }

    pub fn current_class(&self) -> Option<&Class> {
        let id = self.class_id.as_deref()?;
        self.book.class(id).ok()
    }

    pub fn current_subject(&self) -> Option<&Subject> {
        let id = self.subject_id.as_deref()?;
        self.current_class()?.subject(id).ok()
    }

    pub fn select_class(&mut self, storage: &impl Storage, class_id: &str) {
        if self.class_id.as_deref() != Some(class_id) {
            self.class_id = Some(class_id.to_owned());
            self.subject_id = None;
        }
        self.normalize_selection();
        self.save_selection(storage);
    }

    pub fn select_subject(&mut self, storage: &impl Storage, subject_id: &str) {
        self.subject_id = Some(subject_id.to_owned());
        self.normalize_selection();
        self.save_selection(storage);
    }

    /// Run a mutation, then save the book and repair the selection.
    ///
    /// Returns `None` and records the error when the mutation or the save fails.
    pub fn apply<T>(
        &mut self,
        storage: &impl Storage,
        mutate: impl FnOnce(&mut Gradebook) -> Result<T, RecordError>,
    ) -> Option<T> {
        let result = mutate(&mut self.book).and_then(|value| {
            self.book.save_default(storage)?;
            Ok(value)
        });
        self.normalize_selection();
        self.save_selection(storage);
        match result {
            Ok(value) => {
                self.error = None;
                Some(value)
            }
            Err(e) => {
                tracing::warn!(error = %e, "gradebook change rejected");
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// [`BookState::apply`] scoped to the selected class. `None` when no class
    /// is selected.
    pub fn apply_to_class<T>(
        &mut self,
        storage: &impl Storage,
        mutate: impl FnOnce(&mut Class) -> Result<T, RecordError>,
    ) -> Option<T> {
        let class_id = self.class_id.clone()?;
        self.apply(storage, |book| mutate(book.class_mut(&class_id)?))
    }

    /// Point the selection at existing records, falling back to the first
    /// class and its first subject.
    pub fn normalize_selection(&mut self) {
        let class = self
            .class_id
            .as_deref()
            .and_then(|id| self.book.class(id).ok())
            .or_else(|| self.book.classes.first());
        let Some(class) = class else {
            self.class_id = None;
            self.subject_id = None;
            return;
        };
        let subject = self
            .subject_id
            .as_deref()
            .and_then(|id| class.subject(id).ok())
            .or_else(|| class.subjects.first());
        let subject_id = subject.map(|s| s.id.clone());
        self.class_id = Some(class.id.clone());
        self.subject_id = subject_id;
    }

    fn save_selection(&self, storage: &impl Storage) {
        let selection = Selection { class_id: self.class_id.clone(), subject_id: self.subject_id.clone() };
        save_json(storage, &selection_key(), &selection);
    }
}
