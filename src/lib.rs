//! Serenity - attendance, participation and question tracking for tutorial groups.
//!
//! A tutor imports a group roster, records per-lesson attendance and
//! participation, logs questions and exports sheets. Everything is driven by
//! one-line textual commands such as `markpresent grp/G01 lsn/1-1 idx/2`.
//!
//! # Public API
//! - [`logic::Logic`]: parse, execute and persist one command line
//! - [`model::Model`]: the facade holding groups, questions and projections
//! - [`parser::parse_command`] and [`commands::Command`]: the command language
//! - [`roster::RosterAdapter`]: roster import and sheet export, with
//!   [`roster::CsvRoster`] as the file-based implementation
//! - [`core`]: errors, configuration, storage and console output

pub mod commands;
pub mod core;
pub mod logic;
pub mod model;
pub mod parser;
pub mod roster;
pub mod ui;

// Re-export the public API for external users
pub use commands::{Command, CommandResult, UiAction};
pub use core::{
    AdapterError, AppConfig, CommandError, JsonStorage, ParseError, Result, SerenityError,
    StorageError,
};
pub use logic::Logic;
pub use model::{LessonTarget, Model, StudentSelector, View};
pub use parser::parse_command;
pub use roster::{CsvRoster, RosterAdapter};
