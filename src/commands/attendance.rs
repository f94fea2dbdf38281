use crate::commands::{describe_targets, fmt_selector, fmt_target, CommandResult, UiAction};
use crate::core::error::{ParseError, Result};
use crate::model::manager::{LessonTarget, Model, StudentSelector};
use crate::parser::tokenizer::{tokenize, Prefix};
use crate::parser::util::{parse_lesson_target, parse_selector};
use std::fmt;

const PREFIXES: [Prefix; 5] = [Prefix::Grp, Prefix::Lsn, Prefix::Name, Prefix::Id, Prefix::Idx];

/// The four attendance edits that share one argument shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceAction {
    MarkPresent,
    MarkAbsent,
    Flag,
    Unflag,
}

impl AttendanceAction {
    pub const ALL: [AttendanceAction; 4] = [Self::MarkPresent, Self::MarkAbsent, Self::Flag, Self::Unflag];

    pub fn command_word(&self) -> &'static str {
        match self {
            Self::MarkPresent => "markpresent",
            Self::MarkAbsent => "markabsent",
            Self::Flag => "flagatt",
            Self::Unflag => "unflagatt",
        }
    }

    pub fn from_command_word(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.command_word() == word)
    }

    pub fn usage(&self) -> &'static str {
        match self {
            Self::MarkPresent => "markpresent: Marks students present in a lesson.\n\
                Parameters: [grp/GROUP lsn/LESSON] (name/NAME id/STUDENT_NUMBER | idx/INDEX | all)\n\
                Example: markpresent grp/G04 lsn/1-2 name/Aaron Tan id/A0123456U",
            Self::MarkAbsent => "markabsent: Marks students absent in a lesson.\n\
                Parameters: [grp/GROUP lsn/LESSON] (name/NAME id/STUDENT_NUMBER | idx/INDEX | all)\n\
                Example: markabsent idx/3",
            Self::Flag => "flagatt: Flags the attendance of students in a lesson for follow-up.\n\
                Parameters: [grp/GROUP lsn/LESSON] (name/NAME id/STUDENT_NUMBER | idx/INDEX | all)\n\
                Example: flagatt grp/G04 lsn/1-2 idx/1",
            Self::Unflag => "unflagatt: Removes the attendance flag of students in a lesson.\n\
                Parameters: [grp/GROUP lsn/LESSON] (name/NAME id/STUDENT_NUMBER | idx/INDEX | all)\n\
                Example: unflagatt all",
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::MarkPresent => "Marked present",
            Self::MarkAbsent => "Marked absent",
            Self::Flag => "Flagged attendance of",
            Self::Unflag => "Removed attendance flag of",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceCommand {
    pub action: AttendanceAction,
    pub target: LessonTarget,
    pub selector: StudentSelector,
}

impl AttendanceCommand {
    pub fn parse(action: AttendanceAction, args: &str) -> std::result::Result<Self, ParseError> {
        let usage = action.usage();
        let args = tokenize(args, &PREFIXES);
        let selector = parse_selector(&args, true, usage)?;
        let target = parse_lesson_target(&args, usage)?;
        Ok(Self {
            action,
            target,
            selector,
        })
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult> {
        let updated = match self.action {
            AttendanceAction::MarkPresent => model.mark_attendance(&self.target, &self.selector, true)?,
            AttendanceAction::MarkAbsent => model.mark_attendance(&self.target, &self.selector, false)?,
            AttendanceAction::Flag => model.set_flag(&self.target, &self.selector, true)?,
            AttendanceAction::Unflag => model.set_flag(&self.target, &self.selector, false)?,
        };
        Ok(CommandResult::new(
            format!(
                "{} {}",
                self.action.describe(),
                describe_targets(&self.selector, &updated)
            ),
            UiAction::RefreshTable,
        ))
    }
}

impl fmt::Display for AttendanceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action.command_word())?;
        if self.selector == StudentSelector::All {
            f.write_str(" all")?;
        }
        fmt_target(f, &self.target)?;
        fmt_selector(f, &self.selector)
    }
}
