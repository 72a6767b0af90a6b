//! Drag-gesture state for column headers.
//!
//! DESIGN
//! ======
//! The header row reports DOM events; this type turns them into at most one
//! `(source, destination)` pair per gesture. It knows nothing about columns,
//! only positions, so the reorder itself stays in `columns::reorder`.

#[cfg(test)]
#[path = "column_drag_test.rs"]
mod column_drag_test;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColumnDrag {
    source: Option<usize>,
    over: Option<usize>,
}

impl ColumnDrag {
    /// A header at `index` started dragging.
    pub fn start(&mut self, index: usize) {
        self.source = Some(index);
        self.over = None;
    }

    /// The pointer entered the header at `index`.
    pub fn enter(&mut self, index: usize) {
        if self.source.is_some() {
            self.over = Some(index);
        }
    }

    /// The pointer left the header at `index`.
    pub fn leave(&mut self, index: usize) {
        if self.over == Some(index) {
            self.over = None;
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.source.is_some()
    }

    #[must_use]
    pub fn source(&self) -> Option<usize> {
        self.source
    }

    /// Header currently highlighted as the drop target.
    #[must_use]
    pub fn over(&self) -> Option<usize> {
        self.over
    }

    /// End the gesture with a drop. Returns the move to apply, if any.
    ///
    /// A drop outside any header, onto the dragged header itself, or onto an
    /// index that no longer exists yields `None`.
    pub fn finish(&mut self, len: usize) -> Option<(usize, usize)> {
        let source = self.source.take()?;
        let destination = self.over.take()?;
        (source != destination && source < len && destination < len).then_some((source, destination))
    }

    /// Abandon the gesture without a move.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}
