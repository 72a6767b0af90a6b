//! Classes, subjects, students, and the mutations that keep them consistent.
//!
//! DESIGN
//! ======
//! Students belong to the class and are shared by all of its subjects.
//! Column ids are globally unique, so one value map per student covers every
//! subject without collisions.
//!
//! INVARIANTS
//! ==========
//! - Every key in a student's value map names a column of one of the class's
//!   subjects. Column and subject deletion cascade to enforce this.
//! - Every stored value validates against its column's current kind.

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;

use std::collections::BTreeMap;

use columns::{Column, ColumnId, ColumnKind, DEFAULT_KEY_PREFIX, Storage};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::RecordError;
use crate::value::{CellValue, validate_kind};

/// Storage key of the serialized gradebook under `prefix`.
#[must_use]
pub fn book_key(prefix: &str) -> String {
    format!("{prefix}book")
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn clean_name(raw: &str, what: &'static str) -> Result<String, RecordError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(RecordError::EmptyName { what });
    }
    Ok(name.to_owned())
}

fn clean_color(raw: Option<&str>) -> Result<Option<String>, RecordError> {
    let Some(raw) = raw.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(None);
    };
    let hex = raw.strip_prefix('#').unwrap_or_default();
    let valid = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(RecordError::InvalidColor(raw.to_owned()));
    }
    Ok(Some(raw.to_ascii_lowercase()))
}

// =============================================================================
// TYPES
// =============================================================================

/// A student and the values recorded for them, keyed by column id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub values: BTreeMap<ColumnId, CellValue>,
}

impl Student {
    #[must_use]
    pub fn value(&self, column: &ColumnId) -> Option<&CellValue> {
        self.values.get(column)
    }
}

/// A record category within a class, owning its columns in creation order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Subject {
    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    fn column_mut(&mut self, id: &ColumnId) -> Result<&mut Column, RecordError> {
        self.columns
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| RecordError::ColumnNotFound(id.clone()))
    }
}

/// A group of students sharing a set of subjects.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub students: Vec<Student>,
}

/// Root of every class and its records.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Gradebook {
    #[serde(default)]
    pub classes: Vec<Class>,
}

// =============================================================================
// GRADEBOOK
// =============================================================================

impl Gradebook {
    /// Load the gradebook stored under `prefix`, or an empty one if none is.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Storage`] when the backend fails and
    /// [`RecordError::Corrupt`] when the stored JSON cannot be parsed.
    pub fn load<S: Storage>(storage: &S, prefix: &str) -> Result<Self, RecordError> {
        let key = book_key(prefix);
        let Some(raw) = storage.get_item(&key)? else {
            debug!(%key, "no stored gradebook; starting empty");
            return Ok(Self::default());
        };
        serde_json::from_str(&raw).map_err(RecordError::Corrupt)
    }

    /// Load using [`DEFAULT_KEY_PREFIX`].
    ///
    /// # Errors
    ///
    /// See [`Gradebook::load`].
    pub fn load_default<S: Storage>(storage: &S) -> Result<Self, RecordError> {
        Self::load(storage, DEFAULT_KEY_PREFIX)
    }

    /// Write the whole gradebook under `prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Serialize`] or [`RecordError::Storage`].
    pub fn save<S: Storage>(&self, storage: &S, prefix: &str) -> Result<(), RecordError> {
        let raw = serde_json::to_string(self).map_err(RecordError::Serialize)?;
        storage.set_item(&book_key(prefix), &raw)?;
        debug!(classes = self.classes.len(), bytes = raw.len(), "gradebook saved");
        Ok(())
    }

    /// Save using [`DEFAULT_KEY_PREFIX`].
    ///
    /// # Errors
    ///
    /// See [`Gradebook::save`].
    pub fn save_default<S: Storage>(&self, storage: &S) -> Result<(), RecordError> {
        self.save(storage, DEFAULT_KEY_PREFIX)
    }

    /// Create a class and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::EmptyName`] for a blank name.
    pub fn add_class(&mut self, name: &str, kind: Option<&str>) -> Result<String, RecordError> {
        let class = Class {
            id: new_id(),
            name: clean_name(name, "class")?,
            kind: kind.map(str::trim).filter(|k| !k.is_empty()).map(str::to_owned),
            subjects: Vec::new(),
            students: Vec::new(),
        };
        info!(class_id = %class.id, name = %class.name, "class created");
        let id = class.id.clone();
        self.classes.push(class);
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns [`RecordError::ClassNotFound`] or [`RecordError::EmptyName`].
    pub fn rename_class(&mut self, id: &str, name: &str) -> Result<(), RecordError> {
        let name = clean_name(name, "class")?;
        self.class_mut(id)?.name = name;
        Ok(())
    }

    /// Remove a class and return it so callers can drop per-subject state.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::ClassNotFound`].
    pub fn remove_class(&mut self, id: &str) -> Result<Class, RecordError> {
        let index = self
            .classes
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| RecordError::ClassNotFound(id.to_owned()))?;
        let class = self.classes.remove(index);
        info!(class_id = %class.id, "class removed");
        Ok(class)
    }

    /// # Errors
    ///
    /// Returns [`RecordError::ClassNotFound`].
    pub fn class(&self, id: &str) -> Result<&Class, RecordError> {
        self.classes
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| RecordError::ClassNotFound(id.to_owned()))
    }

    /// # Errors
    ///
    /// Returns [`RecordError::ClassNotFound`].
    pub fn class_mut(&mut self, id: &str) -> Result<&mut Class, RecordError> {
        self.classes
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| RecordError::ClassNotFound(id.to_owned()))
    }
}

// =============================================================================
// CLASS: SUBJECTS
// =============================================================================

impl Class {
    /// # Errors
    ///
    /// Returns [`RecordError::EmptyName`] or [`RecordError::InvalidColor`].
    pub fn add_subject(&mut self, name: &str, color: Option<&str>) -> Result<String, RecordError> {
        let subject = Subject {
            id: new_id(),
            name: clean_name(name, "subject")?,
            color: clean_color(color)?,
            columns: Vec::new(),
        };
        info!(class_id = %self.id, subject_id = %subject.id, "subject created");
        let id = subject.id.clone();
        self.subjects.push(subject);
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns [`RecordError::SubjectNotFound`] or [`RecordError::EmptyName`].
    pub fn rename_subject(&mut self, id: &str, name: &str) -> Result<(), RecordError> {
        let name = clean_name(name, "subject")?;
        self.subject_mut(id)?.name = name;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`RecordError::SubjectNotFound`] or [`RecordError::InvalidColor`].
    pub fn set_subject_color(&mut self, id: &str, color: Option<&str>) -> Result<(), RecordError> {
        let color = clean_color(color)?;
        self.subject_mut(id)?.color = color;
        Ok(())
    }

    /// Remove a subject and every student value recorded in its columns.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::SubjectNotFound`].
    pub fn remove_subject(&mut self, id: &str) -> Result<Subject, RecordError> {
        let index = self
            .subjects
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| RecordError::SubjectNotFound(id.to_owned()))?;
        let subject = self.subjects.remove(index);
        for column in &subject.columns {
            self.purge_column_values(&column.id);
        }
        info!(class_id = %self.id, subject_id = %subject.id, "subject removed");
        Ok(subject)
    }

    /// # Errors
    ///
    /// Returns [`RecordError::SubjectNotFound`].
    pub fn subject(&self, id: &str) -> Result<&Subject, RecordError> {
        self.subjects
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| RecordError::SubjectNotFound(id.to_owned()))
    }

    fn subject_mut(&mut self, id: &str) -> Result<&mut Subject, RecordError> {
        self.subjects
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| RecordError::SubjectNotFound(id.to_owned()))
    }

    /// Look a column up across all subjects of this class.
    #[must_use]
    pub fn find_column(&self, id: &ColumnId) -> Option<&Column> {
        self.subjects.iter().find_map(|s| s.column(id))
    }
}

// =============================================================================
// CLASS: COLUMNS
// =============================================================================

impl Class {
    /// Append a column to a subject and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::SubjectNotFound`], [`RecordError::EmptyName`],
    /// or [`RecordError::InvalidKind`].
    pub fn add_column(&mut self, subject_id: &str, name: &str, kind: ColumnKind) -> Result<ColumnId, RecordError> {
        let name = clean_name(name, "column")?;
        validate_kind(&kind)?;
        let column = Column::new(new_id(), name, kind);
        let id = column.id.clone();
        self.subject_mut(subject_id)?.columns.push(column);
        info!(class_id = %self.id, %subject_id, column_id = %id, "column created");
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns [`RecordError::SubjectNotFound`], [`RecordError::ColumnNotFound`],
    /// or [`RecordError::EmptyName`].
    pub fn rename_column(&mut self, subject_id: &str, column_id: &ColumnId, name: &str) -> Result<(), RecordError> {
        let name = clean_name(name, "column")?;
        self.subject_mut(subject_id)?.column_mut(column_id)?.name = name;
        Ok(())
    }

    /// Change a column's kind, dropping student values the new kind rejects.
    ///
    /// Returns the number of values dropped.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::SubjectNotFound`], [`RecordError::ColumnNotFound`],
    /// or [`RecordError::InvalidKind`].
    pub fn change_column_kind(
        &mut self,
        subject_id: &str,
        column_id: &ColumnId,
        kind: ColumnKind,
    ) -> Result<usize, RecordError> {
        validate_kind(&kind)?;
        let column = self.subject_mut(subject_id)?.column_mut(column_id)?;
        column.kind = kind;
        let column = column.clone();

        let mut dropped = 0;
        for student in &mut self.students {
            let incompatible = student
                .values
                .get(column_id)
                .is_some_and(|value| value.validate(&column).is_err());
            if incompatible {
                student.values.remove(column_id);
                dropped += 1;
            }
        }
        info!(%column_id, kind = column.kind.tag(), dropped, "column kind changed");
        Ok(dropped)
    }

    /// Delete a column and cascade the deletion to every student record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::SubjectNotFound`] or [`RecordError::ColumnNotFound`].
    pub fn delete_column(&mut self, subject_id: &str, column_id: &ColumnId) -> Result<Column, RecordError> {
        let subject = self.subject_mut(subject_id)?;
        let index = subject
            .columns
            .iter()
            .position(|c| &c.id == column_id)
            .ok_or_else(|| RecordError::ColumnNotFound(column_id.clone()))?;
        let column = subject.columns.remove(index);
        let purged = self.purge_column_values(column_id);
        info!(%column_id, purged, "column deleted");
        Ok(column)
    }

    fn purge_column_values(&mut self, column_id: &ColumnId) -> usize {
        self.students
            .iter_mut()
            .filter_map(|s| s.values.remove(column_id))
            .count()
    }
}

// =============================================================================
// CLASS: STUDENTS
// =============================================================================

impl Class {
    /// # Errors
    ///
    /// Returns [`RecordError::EmptyName`].
    pub fn add_student(&mut self, name: &str) -> Result<String, RecordError> {
        let student = Student { id: new_id(), name: clean_name(name, "student")?, values: BTreeMap::new() };
        let id = student.id.clone();
        self.students.push(student);
        debug!(class_id = %self.id, student_id = %id, "student added");
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns [`RecordError::StudentNotFound`] or [`RecordError::EmptyName`].
    pub fn rename_student(&mut self, id: &str, name: &str) -> Result<(), RecordError> {
        let name = clean_name(name, "student")?;
        self.student_mut(id)?.name = name;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`RecordError::StudentNotFound`].
    pub fn remove_student(&mut self, id: &str) -> Result<Student, RecordError> {
        let index = self
            .students
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| RecordError::StudentNotFound(id.to_owned()))?;
        Ok(self.students.remove(index))
    }

    /// # Errors
    ///
    /// Returns [`RecordError::StudentNotFound`].
    pub fn student(&self, id: &str) -> Result<&Student, RecordError> {
        self.students
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| RecordError::StudentNotFound(id.to_owned()))
    }

    fn student_mut(&mut self, id: &str) -> Result<&mut Student, RecordError> {
        self.students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| RecordError::StudentNotFound(id.to_owned()))
    }

    /// Record a value after checking it against the column's kind.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::ColumnNotFound`], [`RecordError::StudentNotFound`],
    /// or the validation error from [`CellValue::validate`].
    pub fn set_value(&mut self, student_id: &str, column_id: &ColumnId, value: CellValue) -> Result<(), RecordError> {
        let column = self
            .find_column(column_id)
            .ok_or_else(|| RecordError::ColumnNotFound(column_id.clone()))?;
        value.validate(column)?;
        self.student_mut(student_id)?.values.insert(column_id.clone(), value);
        Ok(())
    }

    /// Remove a recorded value, returning it if one was present.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::StudentNotFound`].
    pub fn clear_value(&mut self, student_id: &str, column_id: &ColumnId) -> Result<Option<CellValue>, RecordError> {
        Ok(self.student_mut(student_id)?.values.remove(column_id))
    }
}
