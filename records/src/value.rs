//! Per-student cell values and their validation against a column kind.

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;

use columns::{Column, ColumnKind, MultiCheckMode};
use serde::{Deserialize, Serialize};
use time::macros::format_description;

use crate::error::RecordError;

/// A value recorded for one student in one column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    Text(String),
    Number(f64),
    /// ISO calendar date, `YYYY-MM-DD`.
    Date(String),
    Checkbox(bool),
    /// One option of a single-select column.
    Choice(String),
    /// One flag per slot of a multi-checkbox column.
    Checks(Vec<bool>),
}

impl CellValue {
    /// Parse typed-in text for `column` into a validated value.
    ///
    /// Checkboxes accept `x`, `y`, `yes`, `true`, `1`, `✓` and their negative
    /// counterparts (including blank). Multi-checkbox input is a comma-separated
    /// list of the same tokens, one per slot; blank input unchecks every slot.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidInput`] for unparseable text, or the
    /// validation error of the parsed value.
    pub fn parse(column: &Column, raw: &str) -> Result<Self, RecordError> {
        let trimmed = raw.trim();
        let invalid = || RecordError::InvalidInput {
            column: column.id.clone(),
            expected: column.kind.tag(),
            value: raw.to_owned(),
        };
        let value = match &column.kind {
            ColumnKind::Text => Self::Text(raw.to_owned()),
            ColumnKind::Number => Self::Number(trimmed.parse::<f64>().map_err(|_| invalid())?),
            ColumnKind::Date => Self::Date(trimmed.to_owned()),
            ColumnKind::Checkbox => Self::Checkbox(parse_flag(trimmed).ok_or_else(invalid)?),
            ColumnKind::Select { .. } => Self::Choice(trimmed.to_owned()),
            ColumnKind::MultiCheck { slots, .. } if trimmed.is_empty() => Self::Checks(vec![false; *slots]),
            ColumnKind::MultiCheck { .. } => Self::Checks(
                trimmed
                    .split(',')
                    .map(|token| parse_flag(token.trim()))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(invalid)?,
            ),
        };
        if matches!(value, Self::Number(n) if !n.is_finite()) {
            return Err(invalid());
        }
        value.validate(column)?;
        Ok(value)
    }

    /// Check that this value can be stored in `column`.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] describing the first mismatch found.
    pub fn validate(&self, column: &Column) -> Result<(), RecordError> {
        match (&column.kind, self) {
            (ColumnKind::Text, Self::Text(_)) | (ColumnKind::Checkbox, Self::Checkbox(_)) => Ok(()),
            (ColumnKind::Number, Self::Number(n)) if n.is_finite() => Ok(()),
            (ColumnKind::Date, Self::Date(raw)) => parse_date(raw).map(|_| ()),
            (ColumnKind::Select { options }, Self::Choice(choice)) => {
                if options.iter().any(|o| o == choice) {
                    Ok(())
                } else {
                    Err(RecordError::UnknownOption { column: column.id.clone(), value: choice.clone() })
                }
            }
            (ColumnKind::MultiCheck { slots, .. }, Self::Checks(flags)) => {
                if flags.len() == *slots {
                    Ok(())
                } else {
                    Err(RecordError::SlotCount { column: column.id.clone(), expected: *slots, actual: flags.len() })
                }
            }
            (kind, _) => Err(RecordError::KindMismatch { column: column.id.clone(), expected: kind.tag() }),
        }
    }

    /// Human-readable form used by table cells and exports.
    #[must_use]
    pub fn display(&self, kind: &ColumnKind) -> String {
        match self {
            Self::Text(text) | Self::Date(text) | Self::Choice(text) => text.clone(),
            Self::Number(n) => n.to_string(),
            Self::Checkbox(true) => "✓".to_owned(),
            Self::Checkbox(false) => String::new(),
            Self::Checks(flags) => match kind {
                ColumnKind::MultiCheck { slots, mode: MultiCheckMode::Count, .. } => {
                    format!("{}/{slots}", flags.iter().filter(|f| **f).count())
                }
                _ => flags.iter().map(|f| if *f { '☑' } else { '☐' }).collect(),
            },
        }
    }
}

/// Build a column kind from its tag and the loose fields a form or command
/// line supplies.
///
/// `options` are the choices of a select column and the slot labels of a
/// multi-checkbox column, whose slot count defaults to the label count.
///
/// # Errors
///
/// Returns [`RecordError::InvalidKind`] for an unknown tag or a definition
/// [`validate_kind`] rejects.
pub fn build_kind(tag: &str, options: Vec<String>, slots: Option<usize>, count: bool) -> Result<ColumnKind, RecordError> {
    let options: Vec<String> = options.into_iter().map(|o| o.trim().to_owned()).collect();
    let kind = match tag.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "text" => ColumnKind::Text,
        "number" => ColumnKind::Number,
        "date" => ColumnKind::Date,
        "checkbox" => ColumnKind::Checkbox,
        "select" => ColumnKind::Select { options },
        "multi_check" => ColumnKind::MultiCheck {
            slots: slots.unwrap_or(options.len()),
            labels: options,
            mode: if count { MultiCheckMode::Count } else { MultiCheckMode::Boxes },
        },
        other => return Err(RecordError::InvalidKind(format!("unknown column type `{other}`"))),
    };
    validate_kind(&kind)?;
    Ok(kind)
}

/// Check a column definition before it is added or changed.
///
/// # Errors
///
/// Returns [`RecordError::InvalidKind`] for a select without options, a
/// duplicate option, a multi-checkbox group without slots, or more labels
/// than slots.
pub fn validate_kind(kind: &ColumnKind) -> Result<(), RecordError> {
    match kind {
        ColumnKind::Select { options } => {
            if options.is_empty() {
                return Err(RecordError::InvalidKind("select column needs at least one option".to_owned()));
            }
            if options.iter().any(|o| o.trim().is_empty()) {
                return Err(RecordError::InvalidKind("select options must not be empty".to_owned()));
            }
            for (index, option) in options.iter().enumerate() {
                if options[..index].contains(option) {
                    return Err(RecordError::InvalidKind(format!("duplicate select option `{option}`")));
                }
            }
            Ok(())
        }
        ColumnKind::MultiCheck { slots, labels, .. } => {
            if *slots == 0 {
                return Err(RecordError::InvalidKind("checkbox group needs at least one slot".to_owned()));
            }
            if labels.len() > *slots {
                return Err(RecordError::InvalidKind(format!(
                    "{} labels for {slots} checkbox slots",
                    labels.len()
                )));
            }
            Ok(())
        }
        ColumnKind::Text | ColumnKind::Number | ColumnKind::Date | ColumnKind::Checkbox => Ok(()),
    }
}

fn parse_flag(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "x" | "y" | "yes" | "true" | "1" | "✓" => Some(true),
        "" | "-" | "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

fn parse_date(raw: &str) -> Result<time::Date, RecordError> {
    time::Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map_err(|_| RecordError::InvalidDate(raw.to_owned()))
}
