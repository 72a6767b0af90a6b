//! Command-line surface over the gradebook records.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every invocation loads the whole gradebook from the configured `Storage`,
//! applies one command, and saves it back when something changed. Column
//! order is read and written through `ColumnOrder` under the same key prefix,
//! so `column list` and `report` show exactly what the browser client shows.
//!
//! Records are addressed by id or, when unambiguous, by case-insensitive name.

#[cfg(test)]
#[path = "cli_test.rs"]
mod cli_test;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use columns::{Column, ColumnId, ColumnOrder, Storage, ids};
use records::{CellValue, Class, Gradebook, RecordError, Report, build_kind};
use tracing::info;

use crate::config::ConfigError;
use crate::store::FileStoreError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] FileStoreError),
    #[error("output failed: {0}")]
    Io(#[from] io::Error),
    #[error("no {what} matches `{key}`")]
    NotFound { what: &'static str, key: String },
    #[error("`{key}` matches more than one {what}; use the id instead")]
    Ambiguous { what: &'static str, key: String },
    #[error("column position {index} is out of range ({len} columns)")]
    Position { index: usize, len: usize },
}

#[derive(Parser, Debug)]
#[command(name = "gradebook", about = "Classes, subjects, and per-student records")]
pub struct Cli {
    /// JSON store file (overrides `GRADEBOOK_STORE_PATH`).
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Storage key namespace (overrides `GRADEBOOK_KEY_PREFIX`).
    #[arg(long, global = true)]
    pub key_prefix: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Class(ClassCommand),
    Subject(SubjectCommand),
    Student(StudentCommand),
    Column(ColumnCommand),
    Value(ValueCommand),
    /// Print a subject as CSV, columns in display order.
    Report { class: String, subject: String },
}

#[derive(Args, Debug)]
pub struct ClassCommand {
    #[command(subcommand)]
    command: ClassSubcommand,
}

#[derive(Subcommand, Debug)]
enum ClassSubcommand {
    Add {
        name: String,
        #[arg(long)]
        kind: Option<String>,
    },
    List,
    Rename {
        class: String,
        name: String,
    },
    Remove {
        class: String,
    },
}

#[derive(Args, Debug)]
pub struct SubjectCommand {
    #[command(subcommand)]
    command: SubjectSubcommand,
}

#[derive(Subcommand, Debug)]
enum SubjectSubcommand {
    Add {
        class: String,
        name: String,
        #[arg(long, help = "Theme color, #rgb or #rrggbb")]
        color: Option<String>,
    },
    List {
        class: String,
    },
    Rename {
        class: String,
        subject: String,
        name: String,
    },
    /// Set the theme color, or clear it when no color is given.
    Color {
        class: String,
        subject: String,
        color: Option<String>,
    },
    Remove {
        class: String,
        subject: String,
    },
}

#[derive(Args, Debug)]
pub struct StudentCommand {
    #[command(subcommand)]
    command: StudentSubcommand,
}

#[derive(Subcommand, Debug)]
enum StudentSubcommand {
    Add { class: String, name: String },
    List { class: String },
    Rename { class: String, student: String, name: String },
    Remove { class: String, student: String },
}

#[derive(Args, Debug)]
pub struct ColumnCommand {
    #[command(subcommand)]
    command: ColumnSubcommand,
}

#[derive(Args, Debug, Clone)]
struct KindArgs {
    /// text, number, date, checkbox, select, or multi_check
    #[arg(long = "type", default_value = "text")]
    kind: String,

    /// Select options or checkbox-group labels.
    #[arg(long, value_delimiter = ',')]
    options: Vec<String>,

    /// Checkbox-group size; defaults to the number of labels.
    #[arg(long)]
    slots: Option<usize>,

    /// Show a checkbox group as "checked/total".
    #[arg(long, default_value_t = false)]
    count: bool,
}

#[derive(Subcommand, Debug)]
enum ColumnSubcommand {
    Add {
        class: String,
        subject: String,
        name: String,
        #[command(flatten)]
        kind: KindArgs,
    },
    /// List columns in display order with their 0-based positions.
    List {
        class: String,
        subject: String,
    },
    Rename {
        class: String,
        subject: String,
        column: String,
        name: String,
    },
    /// Change a column's type, dropping values the new type cannot hold.
    Kind {
        class: String,
        subject: String,
        column: String,
        #[command(flatten)]
        kind: KindArgs,
    },
    Remove {
        class: String,
        subject: String,
        column: String,
    },
    /// Move the column at position `from` to position `to`.
    Move {
        class: String,
        subject: String,
        from: usize,
        to: usize,
    },
}

#[derive(Args, Debug)]
pub struct ValueCommand {
    #[command(subcommand)]
    command: ValueSubcommand,
}

#[derive(Subcommand, Debug)]
enum ValueSubcommand {
    Set {
        class: String,
        subject: String,
        student: String,
        column: String,
        value: String,
    },
    Clear {
        class: String,
        subject: String,
        student: String,
        column: String,
    },
}

// =============================================================================
// DISPATCH
// =============================================================================

struct Session<'a, S, W> {
    storage: &'a S,
    prefix: &'a str,
    book: Gradebook,
    out: &'a mut W,
}

impl<S: Storage, W: Write> Session<'_, S, W> {
    fn save(&self) -> Result<(), CliError> {
        self.book.save(self.storage, self.prefix)?;
        Ok(())
    }

    fn order(&self, subject_id: &str) -> ColumnOrder<&S> {
        ColumnOrder::with_prefix(self.storage, self.prefix, subject_id)
    }

    fn class_id(&self, key: &str) -> Result<String, CliError> {
        Ok(self.class(key)?.id.clone())
    }

    fn class(&self, key: &str) -> Result<&Class, CliError> {
        pick(&self.book.classes, key, "class", |c| (c.id.as_str(), c.name.as_str()))
    }

    /// Resolve class and subject keys to ids.
    fn subject_ids(&self, class: &str, subject: &str) -> Result<(String, String), CliError> {
        let class = self.class(class)?;
        let subject = pick(&class.subjects, subject, "subject", |s| (s.id.as_str(), s.name.as_str()))?;
        Ok((class.id.clone(), subject.id.clone()))
    }

    /// Columns of a subject in display order.
    fn ordered_columns(&self, class_id: &str, subject_id: &str) -> Result<Vec<Column>, CliError> {
        let subject = self.book.class(class_id)?.subject(subject_id)?;
        Ok(self.order(subject_id).apply(&subject.columns))
    }

    fn column_id(&self, class_id: &str, subject_id: &str, key: &str) -> Result<ColumnId, CliError> {
        let subject = self.book.class(class_id)?.subject(subject_id)?;
        let column = pick(&subject.columns, key, "column", |c| (c.id.as_str(), c.name.as_str()))?;
        Ok(column.id.clone())
    }

    fn student_id(&self, class_id: &str, key: &str) -> Result<String, CliError> {
        let class = self.book.class(class_id)?;
        let student = pick(&class.students, key, "student", |s| (s.id.as_str(), s.name.as_str()))?;
        Ok(student.id.clone())
    }
}

/// Run one command against `storage`, writing results to `out`.
pub fn run<S: Storage, W: Write>(command: Command, storage: &S, prefix: &str, out: &mut W) -> Result<(), CliError> {
    let book = Gradebook::load(storage, prefix)?;
    let mut session = Session { storage, prefix, book, out };
    match command {
        Command::Class(cmd) => run_class(&mut session, cmd.command),
        Command::Subject(cmd) => run_subject(&mut session, cmd.command),
        Command::Student(cmd) => run_student(&mut session, cmd.command),
        Command::Column(cmd) => run_column(&mut session, cmd.command),
        Command::Value(cmd) => run_value(&mut session, cmd.command),
        Command::Report { class, subject } => {
            let (class_id, subject_id) = session.subject_ids(&class, &subject)?;
            let saved = session.order(&subject_id).load();
            let class = session.book.class(&class_id)?;
            let report = Report::for_subject(class, class.subject(&subject_id)?, &saved);
            session.out.write_all(report.to_csv().as_bytes())?;
            Ok(())
        }
    }
}

fn run_class<S: Storage, W: Write>(s: &mut Session<'_, S, W>, cmd: ClassSubcommand) -> Result<(), CliError> {
    match cmd {
        ClassSubcommand::Add { name, kind } => {
            let id = s.book.add_class(&name, kind.as_deref())?;
            s.save()?;
            writeln!(s.out, "{id}")?;
        }
        ClassSubcommand::List => {
            for class in &s.book.classes {
                let kind = class.kind.as_deref().unwrap_or("");
                writeln!(s.out, "{}\t{}\t{kind}", class.id, class.name)?;
            }
        }
        ClassSubcommand::Rename { class, name } => {
            let id = s.class_id(&class)?;
            s.book.rename_class(&id, &name)?;
            s.save()?;
        }
        ClassSubcommand::Remove { class } => {
            let id = s.class_id(&class)?;
            let removed = s.book.remove_class(&id)?;
            s.save()?;
            for subject in &removed.subjects {
                s.order(&subject.id).forget();
            }
        }
    }
    Ok(())
}

fn run_subject<S: Storage, W: Write>(s: &mut Session<'_, S, W>, cmd: SubjectSubcommand) -> Result<(), CliError> {
    match cmd {
        SubjectSubcommand::Add { class, name, color } => {
            let class_id = s.class_id(&class)?;
            let id = s.book.class_mut(&class_id)?.add_subject(&name, color.as_deref())?;
            s.save()?;
            writeln!(s.out, "{id}")?;
        }
        SubjectSubcommand::List { class } => {
            let class = s.class(&class)?;
            let mut lines = String::new();
            for subject in &class.subjects {
                let color = subject.color.as_deref().unwrap_or("");
                lines.push_str(&format!("{}\t{}\t{color}\n", subject.id, subject.name));
            }
            s.out.write_all(lines.as_bytes())?;
        }
        SubjectSubcommand::Rename { class, subject, name } => {
            let (class_id, subject_id) = s.subject_ids(&class, &subject)?;
            s.book.class_mut(&class_id)?.rename_subject(&subject_id, &name)?;
            s.save()?;
        }
        SubjectSubcommand::Color { class, subject, color } => {
            let (class_id, subject_id) = s.subject_ids(&class, &subject)?;
            s.book.class_mut(&class_id)?.set_subject_color(&subject_id, color.as_deref())?;
            s.save()?;
        }
        SubjectSubcommand::Remove { class, subject } => {
            let (class_id, subject_id) = s.subject_ids(&class, &subject)?;
            s.book.class_mut(&class_id)?.remove_subject(&subject_id)?;
            s.save()?;
            s.order(&subject_id).forget();
        }
    }
    Ok(())
}

fn run_student<S: Storage, W: Write>(s: &mut Session<'_, S, W>, cmd: StudentSubcommand) -> Result<(), CliError> {
    match cmd {
        StudentSubcommand::Add { class, name } => {
            let class_id = s.class_id(&class)?;
            let id = s.book.class_mut(&class_id)?.add_student(&name)?;
            s.save()?;
            writeln!(s.out, "{id}")?;
        }
        StudentSubcommand::List { class } => {
            let class = s.class(&class)?;
            let lines: String = class.students.iter().map(|st| format!("{}\t{}\n", st.id, st.name)).collect();
            s.out.write_all(lines.as_bytes())?;
        }
        StudentSubcommand::Rename { class, student, name } => {
            let class_id = s.class_id(&class)?;
            let student_id = s.student_id(&class_id, &student)?;
            s.book.class_mut(&class_id)?.rename_student(&student_id, &name)?;
            s.save()?;
        }
        StudentSubcommand::Remove { class, student } => {
            let class_id = s.class_id(&class)?;
            let student_id = s.student_id(&class_id, &student)?;
            s.book.class_mut(&class_id)?.remove_student(&student_id)?;
            s.save()?;
        }
    }
    Ok(())
}

fn run_column<S: Storage, W: Write>(s: &mut Session<'_, S, W>, cmd: ColumnSubcommand) -> Result<(), CliError> {
    match cmd {
        ColumnSubcommand::Add { class, subject, name, kind } => {
            let (class_id, subject_id) = s.subject_ids(&class, &subject)?;
            let kind = build_kind(&kind.kind, kind.options, kind.slots, kind.count)?;
            let id = s.book.class_mut(&class_id)?.add_column(&subject_id, &name, kind)?;
            s.save()?;
            writeln!(s.out, "{id}")?;
        }
        ColumnSubcommand::List { class, subject } => {
            let (class_id, subject_id) = s.subject_ids(&class, &subject)?;
            let columns = s.ordered_columns(&class_id, &subject_id)?;
            for (index, column) in columns.iter().enumerate() {
                writeln!(s.out, "{index}\t{}\t{}\t{}", column.id, column.name, column.kind.tag())?;
            }
        }
        ColumnSubcommand::Rename { class, subject, column, name } => {
            let (class_id, subject_id) = s.subject_ids(&class, &subject)?;
            let column_id = s.column_id(&class_id, &subject_id, &column)?;
            s.book.class_mut(&class_id)?.rename_column(&subject_id, &column_id, &name)?;
            s.save()?;
        }
        ColumnSubcommand::Kind { class, subject, column, kind } => {
            let (class_id, subject_id) = s.subject_ids(&class, &subject)?;
            let column_id = s.column_id(&class_id, &subject_id, &column)?;
            let kind = build_kind(&kind.kind, kind.options, kind.slots, kind.count)?;
            let dropped = s.book.class_mut(&class_id)?.change_column_kind(&subject_id, &column_id, kind)?;
            s.save()?;
            writeln!(s.out, "{dropped} incompatible values dropped")?;
        }
        ColumnSubcommand::Remove { class, subject, column } => {
            let (class_id, subject_id) = s.subject_ids(&class, &subject)?;
            let column_id = s.column_id(&class_id, &subject_id, &column)?;
            s.book.class_mut(&class_id)?.delete_column(&subject_id, &column_id)?;
            s.save()?;
        }
        ColumnSubcommand::Move { class, subject, from, to } => {
            let (class_id, subject_id) = s.subject_ids(&class, &subject)?;
            let current = s.ordered_columns(&class_id, &subject_id)?;
            let len = current.len();
            if let Some(index) = [from, to].into_iter().find(|i| *i >= len) {
                return Err(CliError::Position { index, len });
            }
            let moved = s.order(&subject_id).move_column(&current, from, to);
            info!(subject_id = %subject_id, from, to, "column moved");
            for (index, id) in ids(&moved).iter().enumerate() {
                writeln!(s.out, "{index}\t{id}")?;
            }
        }
    }
    Ok(())
}

fn run_value<S: Storage, W: Write>(s: &mut Session<'_, S, W>, cmd: ValueSubcommand) -> Result<(), CliError> {
    match cmd {
        ValueSubcommand::Set { class, subject, student, column, value } => {
            let (class_id, subject_id) = s.subject_ids(&class, &subject)?;
            let column_id = s.column_id(&class_id, &subject_id, &column)?;
            let student_id = s.student_id(&class_id, &student)?;
            let class = s.book.class_mut(&class_id)?;
            let column = class
                .subject(&subject_id)?
                .column(&column_id)
                .cloned()
                .ok_or_else(|| RecordError::ColumnNotFound(column_id.clone()))?;
            let parsed = CellValue::parse(&column, &value)?;
            let shown = parsed.display(&column.kind);
            class.set_value(&student_id, &column_id, parsed)?;
            s.save()?;
            writeln!(s.out, "{shown}")?;
        }
        ValueSubcommand::Clear { class, subject, student, column } => {
            let (class_id, subject_id) = s.subject_ids(&class, &subject)?;
            let column_id = s.column_id(&class_id, &subject_id, &column)?;
            let student_id = s.student_id(&class_id, &student)?;
            if s.book.class_mut(&class_id)?.clear_value(&student_id, &column_id)?.is_some() {
                s.save()?;
            }
        }
    }
    Ok(())
}

/// Find one item by exact id, else by case-insensitive name.
fn pick<'a, T>(
    items: &'a [T],
    key: &str,
    what: &'static str,
    fields: impl Fn(&T) -> (&str, &str),
) -> Result<&'a T, CliError> {
    if let Some(item) = items.iter().find(|item| fields(item).0 == key) {
        return Ok(item);
    }
    let wanted = key.trim().to_lowercase();
    let mut matches = items.iter().filter(|item| fields(item).1.to_lowercase() == wanted);
    match (matches.next(), matches.next()) {
        (Some(item), None) => Ok(item),
        (Some(_), Some(_)) => Err(CliError::Ambiguous { what, key: key.to_owned() }),
        (None, _) => Err(CliError::NotFound { what, key: key.to_owned() }),
    }
}
