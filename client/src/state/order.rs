//! Saved column order of the selected subject.
//!
//! SYSTEM CONTEXT
//! ==============
//! The subject table and the CSV export both render columns from this one
//! signal, so a header drag shows up in both without another storage read.

#[cfg(test)]
#[path = "order_test.rs"]
mod order_test;

use columns::{Column, ColumnId, ColumnOrder, Storage, ids, reconcile};
use records::Subject;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderState {
    /// Subject whose order is loaded.
    pub subject_id: Option<String>,
    pub saved: Vec<ColumnId>,
}

impl OrderState {
    /// Reload from storage when the selected subject changes.
    pub fn sync(&mut self, storage: &impl Storage, subject_id: Option<&str>) {
        if self.subject_id.as_deref() == subject_id {
            return;
        }
        self.subject_id = subject_id.map(str::to_owned);
        self.saved = subject_id.map(|id| ColumnOrder::scoped(storage, id).load()).unwrap_or_default();
    }

    /// Saved order of `subject_id`, empty until that subject is synced.
    pub fn saved_for(&self, subject_id: &str) -> &[ColumnId] {
        if self.subject_id.as_deref() == Some(subject_id) { &self.saved } else { &[] }
    }

    /// Columns of `subject` in display order.
    pub fn columns(&self, subject: &Subject) -> Vec<Column> {
        reconcile(&subject.columns, self.saved_for(&subject.id))
    }

    /// Move a displayed column and persist the new order.
    pub fn move_column(&mut self, storage: &impl Storage, subject: &Subject, source: usize, destination: usize) {
        self.sync(storage, Some(&subject.id));
        let current = self.columns(subject);
        let moved = ColumnOrder::scoped(storage, &subject.id).move_column(&current, source, destination);
        self.saved = ids(&moved);
    }

    /// Drop the stored order of a deleted subject.
    pub fn forget(&mut self, storage: &impl Storage, subject_id: &str) {
        ColumnOrder::scoped(storage, subject_id).forget();
        if self.subject_id.as_deref() == Some(subject_id) {
            self.saved.clear();
        }
    }
}
