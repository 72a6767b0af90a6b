//! Pure merge and reorder operations over keyed sequences.
//!
//! INVARIANTS
//! ==========
//! - `reconcile` is total: every live item appears exactly once in the output,
//!   nothing absent from the live set is ever produced.
//! - Saved ids that no longer exist are dropped; live items the saved order
//!   does not mention keep their relative order and go to the end.
//! - `reorder` never fails. Out-of-range or equal indices return the input.

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;

use std::collections::HashMap;

use crate::column::{ColumnId, Keyed};

/// Merge the live set with a saved ordering into a display order.
#[must_use]
pub fn reconcile<T: Keyed + Clone>(live: &[T], saved: &[ColumnId]) -> Vec<T> {
    let mut lookup: HashMap<&str, usize> = HashMap::with_capacity(live.len());
    for (index, item) in live.iter().enumerate() {
        lookup.entry(item.key().as_str()).or_insert(index);
    }

    let mut placed = vec![false; live.len()];
    let mut out = Vec::with_capacity(live.len());

    for id in saved {
        if let Some(index) = lookup.remove(id.as_str()) {
            placed[index] = true;
            out.push(live[index].clone());
        }
    }

    out.extend(
        live.iter()
            .zip(&placed)
            .filter(|(_, placed)| !**placed)
            .map(|(item, _)| item.clone()),
    );
    out
}

/// Move the item at `source` so it lands at `destination`.
///
/// `destination` is an index into the list after the item has been removed,
/// which is the usual list drag-and-drop convention.
#[must_use]
pub fn reorder<T: Clone>(current: &[T], source: usize, destination: usize) -> Vec<T> {
    let mut next = current.to_vec();
    let len = next.len();
    if source == destination || source >= len || destination >= len {
        return next;
    }
    let item = next.remove(source);
    next.insert(destination, item);
    next
}

/// Identifiers of `items`, in order.
#[must_use]
pub fn ids<T: Keyed>(items: &[T]) -> Vec<ColumnId> {
    items.iter().map(|item| item.key().clone()).collect()
}
