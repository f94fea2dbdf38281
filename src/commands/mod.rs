//! Every user action as a typed command.
//!
//! [`Command`] is the sum of all commands the parser can produce. Each
//! variant carries validated arguments, renders back to its canonical
//! command line through `Display`, and runs against the [`Model`] with
//! [`Command::execute`], yielding a [`CommandResult`].

pub mod attendance;
pub mod export;
pub mod general;
pub mod group;
pub mod lesson;
pub mod question;
pub mod score;
pub mod student;

pub use attendance::{AttendanceAction, AttendanceCommand};
pub use export::ExportCommand;
pub use general::{ExitCommand, HelpCommand};
pub use group::{AddGrpCommand, DelGrpCommand, ViewAttCommand, ViewScoreCommand};
pub use lesson::{DelLsnCommand, ViewLsnCommand};
pub use question::{AddQnCommand, DelQnCommand, EditQnCommand, FindQnCommand, ViewQnCommand};
pub use score::ScoreCommand;
pub use student::{AddStudentCommand, DelStudentCommand};

use crate::core::error::Result;
use crate::model::manager::{LessonTarget, Model, StudentSelector};
use crate::model::student_info::StudentInfo;
use std::fmt;

/// View change a front-end should make after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    AddGrp,
    DelGrp,
    ViewAtt,
    ViewScore,
    ViewLsn,
    RefreshTable,
    RefreshQuestions,
    Exit,
    Help,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
    pub ui_action: UiAction,
}

impl CommandResult {
    pub fn new(feedback: impl Into<String>, ui_action: UiAction) -> Self {
        Self {
            feedback: feedback.into(),
            ui_action,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddGrp(AddGrpCommand),
    DelGrp(DelGrpCommand),
    AddStudent(AddStudentCommand),
    DelStudent(DelStudentCommand),
    ViewAtt(ViewAttCommand),
    ViewScore(ViewScoreCommand),
    ViewLsn(ViewLsnCommand),
    DelLsn(DelLsnCommand),
    Attendance(AttendanceCommand),
    Score(ScoreCommand),
    AddQn(AddQnCommand),
    DelQn(DelQnCommand),
    EditQn(EditQnCommand),
    ViewQn(ViewQnCommand),
    FindQn(FindQnCommand),
    Export(ExportCommand),
    Help(HelpCommand),
    Exit(ExitCommand),
}

impl Command {
    pub fn execute(&self, model: &mut Model) -> Result<CommandResult> {
        match self {
            Self::AddGrp(command) => command.execute(model),
            Self::DelGrp(command) => command.execute(model),
            Self::AddStudent(command) => command.execute(model),
            Self::DelStudent(command) => command.execute(model),
            Self::ViewAtt(command) => command.execute(model),
            Self::ViewScore(command) => command.execute(model),
            Self::ViewLsn(command) => command.execute(model),
            Self::DelLsn(command) => command.execute(model),
            Self::Attendance(command) => command.execute(model),
            Self::Score(command) => command.execute(model),
            Self::AddQn(command) => command.execute(model),
            Self::DelQn(command) => command.execute(model),
            Self::EditQn(command) => command.execute(model),
            Self::ViewQn(command) => command.execute(model),
            Self::FindQn(command) => command.execute(model),
            Self::Export(command) => command.execute(model),
            Self::Help(command) => Ok(command.execute()),
            Self::Exit(command) => Ok(command.execute()),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddGrp(command) => fmt::Display::fmt(command, f),
            Self::DelGrp(command) => fmt::Display::fmt(command, f),
            Self::AddStudent(command) => fmt::Display::fmt(command, f),
            Self::DelStudent(command) => fmt::Display::fmt(command, f),
            Self::ViewAtt(command) => fmt::Display::fmt(command, f),
            Self::ViewScore(command) => fmt::Display::fmt(command, f),
            Self::ViewLsn(command) => fmt::Display::fmt(command, f),
            Self::DelLsn(command) => fmt::Display::fmt(command, f),
            Self::Attendance(command) => fmt::Display::fmt(command, f),
            Self::Score(command) => fmt::Display::fmt(command, f),
            Self::AddQn(command) => fmt::Display::fmt(command, f),
            Self::DelQn(command) => fmt::Display::fmt(command, f),
            Self::EditQn(command) => fmt::Display::fmt(command, f),
            Self::ViewQn(command) => fmt::Display::fmt(command, f),
            Self::FindQn(command) => fmt::Display::fmt(command, f),
            Self::Export(command) => fmt::Display::fmt(command, f),
            Self::Help(command) => fmt::Display::fmt(command, f),
            Self::Exit(command) => fmt::Display::fmt(command, f),
        }
    }
}

/// Canonical ` grp/G lsn/L` suffix for whichever parts are present
pub(crate) fn fmt_target(f: &mut fmt::Formatter<'_>, target: &LessonTarget) -> fmt::Result {
    if let Some(group) = &target.group {
        write!(f, " grp/{group}")?;
    }
    if let Some(lesson) = &target.lesson {
        write!(f, " lsn/{lesson}")?;
    }
    Ok(())
}

/// Canonical ` name/N id/I` or ` idx/i`. The `all` form is a preamble and
/// is written right after the command word by the caller.
pub(crate) fn fmt_selector(f: &mut fmt::Formatter<'_>, selector: &StudentSelector) -> fmt::Result {
    match selector {
        StudentSelector::All => Ok(()),
        StudentSelector::Student(student) => {
            write!(f, " name/{} id/{}", student.name(), student.number())
        }
        StudentSelector::Index(index) => write!(f, " idx/{index}"),
    }
}

/// Subject of a feedback message about the updated records
pub(crate) fn describe_targets(selector: &StudentSelector, updated: &[StudentInfo]) -> String {
    match (selector, updated) {
        (StudentSelector::All, _) => "all students".to_string(),
        (_, [info]) => info.student().to_string(),
        _ => format!("{} students", updated.len()),
    }
}
