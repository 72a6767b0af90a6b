//! Local UI chrome state: the inline cell editor, the confirm dialog, and the
//! in-flight header drag.
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of `book` so the record model
//! never sees half-finished edits.
//!
//! INVARIANTS
//! ==========
//! - At most one cell editor is open. Opening a cell replaces any other.
//! - At most one confirmation is pending. The dialog renders from
//!   `pending_confirm` alone; nothing else opens or closes it.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use columns::ColumnId;

use crate::util::column_drag::ColumnDrag;

/// Address of one student's value in one column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellRef {
    pub student_id: String,
    pub column_id: ColumnId,
}

impl CellRef {
    pub fn new(student_id: impl Into<String>, column_id: impl Into<ColumnId>) -> Self {
        Self { student_id: student_id.into(), column_id: column_id.into() }
    }
}

/// Destructive action awaiting confirmation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteClass { class_id: String },
    DeleteSubject { subject_id: String },
    DeleteStudent { student_id: String },
    DeleteColumn { subject_id: String, column_id: ColumnId },
}

/// What the confirm dialog shows and what it runs on accept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub action: ConfirmAction,
}

impl ConfirmRequest {
    /// A "Delete" confirmation for the named item.
    pub fn delete(what: &str, name: &str, action: ConfirmAction) -> Self {
        Self {
            title: format!("Delete {what}"),
            message: format!("Delete {what} \"{name}\"? This cannot be undone."),
            confirm_label: "Delete".to_owned(),
            action,
        }
    }
}

/// UI state for editing, confirmation, and header dragging.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub active_cell: Option<CellRef>,
    pub pending_confirm: Option<ConfirmRequest>,
    pub column_drag: ColumnDrag,
}

impl UiState {
    /// Open the editor on `cell`, closing whichever editor was open.
    pub fn open_cell(&mut self, cell: CellRef) {
        self.active_cell = Some(cell);
    }

    pub fn close_cell(&mut self) {
        self.active_cell = None;
    }

    #[must_use]
    pub fn is_active(&self, student_id: &str, column_id: &ColumnId) -> bool {
        self.active_cell
            .as_ref()
            .is_some_and(|c| c.student_id == student_id && &c.column_id == column_id)
    }

    /// Ask for confirmation. A newer request replaces an unanswered one.
    pub fn request_confirm(&mut self, request: ConfirmRequest) {
        self.active_cell = None;
        self.pending_confirm = Some(request);
    }

    /// Accept the pending confirmation, closing the dialog.
    pub fn take_confirm(&mut self) -> Option<ConfirmAction> {
        self.pending_confirm.take().map(|r| r.action)
    }

    pub fn cancel_confirm(&mut self) {
        self.pending_confirm = None;
    }
}
