use crate::commands::{CommandResult, UiAction};
use crate::core::error::{ParseError, Result};
use crate::model::manager::{LessonTarget, Model};
use crate::model::values::{GroupName, LessonName};
use crate::parser::tokenizer::{tokenize, Prefix};
use crate::parser::util::{ensure_empty_preamble, parse_value, required};
use std::fmt;

fn parse_group_and_lesson(args: &str, usage: &'static str) -> std::result::Result<(GroupName, LessonName), ParseError> {
    let args = tokenize(args, &[Prefix::Grp, Prefix::Lsn]);
    ensure_empty_preamble(&args, usage)?;
    let group = parse_value(required(&args, Prefix::Grp, usage)?, usage)?;
    let lesson = parse_value(required(&args, Prefix::Lsn, usage)?, usage)?;
    Ok((group, lesson))
}

/// Select a lesson so its records fill the student table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewLsnCommand {
    pub group: GroupName,
    pub lesson: LessonName,
}

impl ViewLsnCommand {
    pub const COMMAND_WORD: &'static str = "viewlsn";
    pub const USAGE: &'static str = "viewlsn: Shows the attendance and participation of a lesson.\n\
        Parameters: grp/GROUP lsn/LESSON\n\
        Example: viewlsn grp/G04 lsn/1-2";

    pub fn parse(args: &str) -> std::result::Result<Self, ParseError> {
        let (group, lesson) = parse_group_and_lesson(args, Self::USAGE)?;
        Ok(Self { group, lesson })
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult> {
        let key = model.resolve_lesson(&LessonTarget::explicit(self.group.clone(), self.lesson))?;
        model.select_lesson(&key);
        Ok(CommandResult::new(
            format!("Showing lesson {} of Group {}", key.lesson, key.group),
            UiAction::ViewLsn,
        ))
    }
}

impl fmt::Display for ViewLsnCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} grp/{} lsn/{}", Self::COMMAND_WORD, self.group, self.lesson)
    }
}

/// Delete one lesson of a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelLsnCommand {
    pub group: GroupName,
    pub lesson: LessonName,
}

impl DelLsnCommand {
    pub const COMMAND_WORD: &'static str = "dellsn";
    pub const USAGE: &'static str = "dellsn: Deletes a lesson from a tutorial group.\n\
        Parameters: grp/GROUP lsn/LESSON\n\
        Example: dellsn grp/G04 lsn/1-2";

    pub fn parse(args: &str) -> std::result::Result<Self, ParseError> {
        let (group, lesson) = parse_group_and_lesson(args, Self::USAGE)?;
        Ok(Self { group, lesson })
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult> {
        let removed = model.delete_lesson(&self.group, self.lesson)?;
        Ok(CommandResult::new(
            format!("Lesson deleted from Group {}: {}", self.group, removed.name()),
            UiAction::RefreshTable,
        ))
    }
}

impl fmt::Display for DelLsnCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} grp/{} lsn/{}", Self::COMMAND_WORD, self.group, self.lesson)
    }
}
