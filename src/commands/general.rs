use crate::commands::{
    AddGrpCommand, AddQnCommand, AddStudentCommand, AttendanceAction, CommandResult, DelGrpCommand,
    DelLsnCommand, DelQnCommand, DelStudentCommand, EditQnCommand, ExportCommand, FindQnCommand,
    ScoreCommand, UiAction, ViewAttCommand, ViewLsnCommand, ViewQnCommand, ViewScoreCommand,
};
use crate::core::error::ParseError;
use std::fmt;

fn ensure_no_arguments<T>(value: T, args: &str, usage: &'static str) -> std::result::Result<T, ParseError> {
    if args.trim().is_empty() {
        Ok(value)
    } else {
        Err(ParseError::invalid_format(usage))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpCommand;

impl HelpCommand {
    pub const COMMAND_WORD: &'static str = "help";
    pub const USAGE: &'static str = "help: Lists every command.\n\
        Example: help";

    pub fn parse(args: &str) -> std::result::Result<Self, ParseError> {
        ensure_no_arguments(Self, args, Self::USAGE)
    }

    /// Usage text of every command, in the order they are listed by `help`
    pub fn usages() -> Vec<&'static str> {
        let mut usages = vec![
            AddGrpCommand::USAGE,
            DelGrpCommand::USAGE,
            AddStudentCommand::USAGE,
            DelStudentCommand::USAGE,
            ViewAttCommand::USAGE,
            ViewScoreCommand::USAGE,
            ViewLsnCommand::USAGE,
            DelLsnCommand::USAGE,
        ];
        usages.extend(AttendanceAction::ALL.iter().map(AttendanceAction::usage));
        usages.extend(ScoreCommand::MODES.into_iter().map(ScoreCommand::usage));
        usages.extend([
            AddQnCommand::USAGE,
            DelQnCommand::USAGE,
            EditQnCommand::USAGE,
            ViewQnCommand::USAGE,
            FindQnCommand::USAGE,
        ]);
        usages.extend(ExportCommand::KINDS.into_iter().map(ExportCommand::usage));
        usages.extend([Self::USAGE, ExitCommand::USAGE]);
        usages
    }

    pub fn execute(&self) -> CommandResult {
        CommandResult::new(Self::usages().join("\n\n"), UiAction::Help)
    }
}

impl fmt::Display for HelpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::COMMAND_WORD)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitCommand;

impl ExitCommand {
    pub const COMMAND_WORD: &'static str = "exit";
    pub const USAGE: &'static str = "exit: Saves and closes Serenity.\n\
        Example: exit";

    pub fn parse(args: &str) -> std::result::Result<Self, ParseError> {
        ensure_no_arguments(Self, args, Self::USAGE)
    }

    pub fn execute(&self) -> CommandResult {
        CommandResult::new("Exiting Serenity as requested ...", UiAction::Exit)
    }
}

impl fmt::Display for ExitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::COMMAND_WORD)
    }
}
