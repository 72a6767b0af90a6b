//! Column model shared by the record layer, the client, and exports.

#[cfg(test)]
#[path = "column_test.rs"]
mod tests;

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable, opaque column identifier.
///
/// Serialized as a bare JSON string so a persisted ordering is a flat array.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl From<String> for ColumnId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl Borrow<str> for ColumnId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// How a multi-checkbox group is displayed and exported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiCheckMode {
    /// Show every slot as its own box.
    #[default]
    Boxes,
    /// Show the number of checked slots out of the total.
    Count,
}

/// Type tag plus kind-specific metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnKind {
    Text,
    Number,
    Date,
    Checkbox,
    /// Single choice from a fixed list.
    Select { options: Vec<String> },
    /// A group of `slots` checkboxes, optionally labelled.
    MultiCheck {
        slots: usize,
        #[serde(default)]
        labels: Vec<String>,
        #[serde(default)]
        mode: MultiCheckMode,
    },
}

impl ColumnKind {
    /// Short lowercase tag, matching the serialized `type` field.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
            Self::Select { .. } => "select",
            Self::MultiCheck { .. } => "multi_check",
        }
    }
}

/// A named, typed field recorded per student.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    #[must_use]
    pub fn new(id: impl Into<ColumnId>, name: impl Into<String>, kind: ColumnKind) -> Self {
        Self { id: id.into(), name: name.into(), kind }
    }
}

/// Anything that can be placed in a persisted ordering.
pub trait Keyed {
    fn key(&self) -> &ColumnId;
}

impl Keyed for Column {
    fn key(&self) -> &ColumnId {
        &self.id
    }
}

impl Keyed for ColumnId {
    fn key(&self) -> &ColumnId {
        self
    }
}

impl<T: Keyed> Keyed for &T {
    fn key(&self) -> &ColumnId {
        (*self).key()
    }
}
