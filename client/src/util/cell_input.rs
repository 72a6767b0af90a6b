//! Conversion between stored cell values and the inline editor's text.

#[cfg(test)]
#[path = "cell_input_test.rs"]
mod cell_input_test;

use columns::{Column, ColumnKind};
use records::{CellValue, RecordError};

/// Outcome of committing the inline editor.
#[derive(Clone, Debug, PartialEq)]
pub enum CellEdit {
    Set(CellValue),
    Clear,
}

/// Text the editor starts with for an existing value.
pub fn draft_text(value: Option<&CellValue>) -> String {
    match value {
        None => String::new(),
        Some(CellValue::Text(s) | CellValue::Date(s) | CellValue::Choice(s)) => s.clone(),
        Some(CellValue::Number(n)) => n.to_string(),
        Some(CellValue::Checkbox(checked)) => flag_text(*checked).to_owned(),
        Some(CellValue::Checks(flags)) => flags.iter().map(|f| flag_text(*f)).collect::<Vec<_>>().join(","),
    }
}

/// Interpret the editor's text. Blank input clears the cell, except for
/// checkbox kinds where blank means unchecked.
///
/// # Errors
///
/// Propagates parse and validation errors from [`CellValue::parse`].
pub fn commit(column: &Column, raw: &str) -> Result<CellEdit, RecordError> {
    let blank_clears = !matches!(column.kind, ColumnKind::Checkbox | ColumnKind::MultiCheck { .. });
    if blank_clears && raw.trim().is_empty() {
        return Ok(CellEdit::Clear);
    }
    CellValue::parse(column, raw).map(CellEdit::Set)
}

/// Value after a single click on a checkbox cell, which toggles in place
/// instead of opening the editor.
pub fn toggled(column: &Column, value: Option<&CellValue>) -> Option<CellValue> {
    match column.kind {
        ColumnKind::Checkbox => Some(CellValue::Checkbox(!matches!(value, Some(CellValue::Checkbox(true))))),
        _ => None,
    }
}

fn flag_text(checked: bool) -> &'static str {
    if checked { "x" } else { "" }
}
