//! Tabular export of one subject, in the order the user sees on screen.
//!
//! The column sequence always comes from `columns::reconcile`, never from the
//! raw subject list, so exports match the reordered table.

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;

use columns::{Column, ColumnId, reconcile};

use crate::model::{Class, Subject};

/// Header used for the leading student-name column.
pub const STUDENT_HEADER: &str = "Student";

/// A rendered grid: one header row plus one row per student.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Report {
    /// Build the report for `subject`, ordering columns by `saved_order`.
    #[must_use]
    pub fn for_subject(class: &Class, subject: &Subject, saved_order: &[ColumnId]) -> Self {
        let columns: Vec<&Column> = reconcile(&subject.columns.iter().collect::<Vec<_>>(), saved_order);

        let headers = std::iter::once(STUDENT_HEADER.to_owned())
            .chain(columns.iter().map(|c| c.name.clone()))
            .collect();

        let rows = class
            .students
            .iter()
            .map(|student| {
                std::iter::once(student.name.clone())
                    .chain(columns.iter().map(|column| {
                        student
                            .value(&column.id)
                            .map(|value| value.display(&column.kind))
                            .unwrap_or_default()
                    }))
                    .collect()
            })
            .collect();

        Self { title: format!("{} - {}", class.name, subject.name), headers, rows }
    }

    /// Render as CSV, one `\n`-terminated line per row.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        for line in std::iter::once(&self.headers).chain(&self.rows) {
            let fields: Vec<String> = line.iter().map(|field| csv_field(field)).collect();
            out.push_str(&fields.join(","));
            out.push('\n');
        }
        out
    }
}

fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_owned()
    }
}
