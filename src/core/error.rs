//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`SerenityError`], the crate-wide error, and the four
//! categorical error enums it wraps. Every category is surfaced to the tutor
//! differently:
//!
//! - **[`ParseError`]**: malformed command syntax or a value that failed its
//!   validator. The usage help of the command is appended to the message.
//! - **[`CommandError`]**: a semantic violation detected against the model
//!   (duplicate, not found, out of range). The model is left untouched.
//! - **[`AdapterError`]**: importing or exporting a roster sheet failed.
//! - **[`StorageError`]**: reading or writing the data file failed.
//!
//! # Public API
//! - [`SerenityError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, SerenityError>`
//! - [`ValidationError`]: Failure of a single value-type validator

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for every fallible operation in serenity
#[derive(Error, Debug)]
pub enum SerenityError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    // Configuration file errors
    #[error("Could not find configuration directory")]
    ConfigDirectoryNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using SerenityError
pub type Result<T> = std::result::Result<T, SerenityError>;

/// A value rejected by one of the value-type validators
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: &'static str,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: &'static str) -> Self {
        Self { field, reason }
    }
}

/// Malformed command input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Please enter a command.\n{usage}")]
    EmptyCommand { usage: &'static str },

    #[error("Unknown command: '{word}'")]
    UnknownCommand { word: String },

    #[error("Invalid command format!\n{usage}")]
    InvalidFormat { usage: &'static str },

    #[error("Invalid {field}: {reason}\n{usage}")]
    InvalidValue {
        field: &'static str,
        reason: String,
        usage: &'static str,
    },

    #[error("Specify a student either by name/ and id/ or by idx/, not both.\n{usage}")]
    ConflictingSelectors { usage: &'static str },
}

impl ParseError {
    /// Create an invalid format error carrying the command usage
    pub fn invalid_format(usage: &'static str) -> Self {
        Self::InvalidFormat { usage }
    }

    /// Lift a validator failure into a parse error for a command
    pub fn invalid_value(error: ValidationError, usage: &'static str) -> Self {
        Self::InvalidValue {
            field: error.field,
            reason: error.reason.to_string(),
            usage,
        }
    }
}

/// Semantic violations detected while executing a command against the model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("This tutorial group name \"{name}\" already exists.\nPlease try again with another group name.")]
    DuplicateGroup { name: String },

    #[error("This student {student} already exists in group {group}.")]
    DuplicateStudentAcrossGroups { student: String, group: String },

    #[error("Tutorial group {name} does not exist.")]
    GroupNotFound { name: String },

    #[error("No tutorial group selected. Use viewatt, viewscore or viewlsn first, or give grp/.")]
    NoGroupSelected,

    #[error("Lesson {lesson} does not exist in group {group}.")]
    LessonNotFound { group: String, lesson: String },

    #[error("No lesson selected. Use viewlsn first, or give grp/ and lsn/.")]
    NoLessonSelected,

    #[error("Student {student} is not in group {group}.")]
    StudentNotFound { student: String, group: String },

    #[error("Index {index} is out of range (1-{max} available)")]
    IndexOutOfRange { index: usize, max: usize },

    #[error("Participation score must stay between 0 and 5 (got {attempted}).")]
    ScoreOutOfRange { attempted: i32 },

    #[error("This question already exists: {text}")]
    DuplicateQuestion { text: String },

    #[error("Lesson {lesson} does not list exactly the students of its group.")]
    LessonRosterMismatch { lesson: String },

    #[error("Operation would result in duplicate elements")]
    DuplicateElement,

    #[error("Element not found in list")]
    ElementNotFound,

    #[error("There is nothing to act on in the current view.")]
    EmptyProjection,
}

impl CommandError {
    /// Create an index out of range error
    pub fn index_out_of_range(index: usize, max: usize) -> Self {
        Self::IndexOutOfRange { index, max }
    }

    /// Create a student not found error
    pub fn student_not_found(student: impl ToString, group: impl ToString) -> Self {
        Self::StudentNotFound {
            student: student.to_string(),
            group: group.to_string(),
        }
    }

    /// Create a lesson not found error
    pub fn lesson_not_found(group: impl ToString, lesson: impl ToString) -> Self {
        Self::LessonNotFound {
            group: group.to_string(),
            lesson: lesson.to_string(),
        }
    }

    /// Create a group not found error
    pub fn group_not_found(name: impl ToString) -> Self {
        Self::GroupNotFound {
            name: name.to_string(),
        }
    }
}

/// Failures of a roster import or a sheet export
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Roster file does not exist: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Roster file is empty: {path}")]
    EmptyFile { path: PathBuf },

    #[error("Roster file {path} has no header row starting with Photo, Name, Student Number")]
    MissingHeader { path: PathBuf },

    #[error("Roster file {path} lists no students below its header row")]
    MissingStudentList { path: PathBuf },

    #[error("Roster file {path} row {row} is malformed: {reason}")]
    MalformedRow {
        path: PathBuf,
        row: usize,
        reason: String,
    },

    #[error("Unsupported roster format: {path}. Save the sheet as .csv and try again.")]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to read roster file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write sheet {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl AdapterError {
    /// Create a malformed row error
    pub fn malformed_row(path: impl Into<PathBuf>, row: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            path: path.into(),
            row,
            reason: reason.into(),
        }
    }

    /// Create a sheet write error
    pub fn write_failed(path: impl Into<PathBuf>, source: impl Into<csv::Error>) -> Self {
        Self::Write {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Failures reading or writing the data file
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read data file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse data file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize data: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write data file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move '{temp_path}' over '{target_path}': {source}")]
    AtomicRenameFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Data file contains invalid data: {reason}")]
    InvalidData { reason: String },
}

impl StorageError {
    /// Create an invalid data error
    pub fn invalid_data(reason: impl Into<String>) -> Self {
        Self::InvalidData {
            reason: reason.into(),
        }
    }
}

impl From<ValidationError> for StorageError {
    fn from(error: ValidationError) -> Self {
        Self::invalid_data(format!("{}: {}", error.field, error.reason))
    }
}

impl From<CommandError> for StorageError {
    fn from(error: CommandError) -> Self {
        Self::invalid_data(error.to_string())
    }
}
