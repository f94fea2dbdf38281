//! Command-line parsing.
//!
//! [`parse_command`] splits off the command word and hands the remaining
//! argument body to the matching command's `parse`. Parsing is a pure
//! function of the input line.

pub mod tokenizer;
pub mod util;

use crate::commands::{
    AddGrpCommand, AddQnCommand, AddStudentCommand, AttendanceAction, AttendanceCommand, Command,
    DelGrpCommand, DelLsnCommand, DelQnCommand, DelStudentCommand, EditQnCommand, ExitCommand,
    ExportCommand, FindQnCommand, HelpCommand, ScoreCommand, ViewAttCommand, ViewLsnCommand,
    ViewQnCommand, ViewScoreCommand,
};
use crate::core::error::ParseError;
use log::debug;

/// Parse one user-entered line into a [`Command`]
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::EmptyCommand {
            usage: HelpCommand::USAGE,
        });
    }

    let (word, args) = match line.find(char::is_whitespace) {
        Some(split) => line.split_at(split),
        None => (line, ""),
    };
    debug!("Dispatching command word '{word}' with arguments '{args}'");

    let command = match word {
        AddGrpCommand::COMMAND_WORD => Command::AddGrp(AddGrpCommand::parse(args)?),
        DelGrpCommand::COMMAND_WORD => Command::DelGrp(DelGrpCommand::parse(args)?),
        AddStudentCommand::COMMAND_WORD => Command::AddStudent(AddStudentCommand::parse(args)?),
        DelStudentCommand::COMMAND_WORD => Command::DelStudent(DelStudentCommand::parse(args)?),
        ViewAttCommand::COMMAND_WORD => Command::ViewAtt(ViewAttCommand::parse(args)?),
        ViewScoreCommand::COMMAND_WORD => Command::ViewScore(ViewScoreCommand::parse(args)?),
        ViewLsnCommand::COMMAND_WORD => Command::ViewLsn(ViewLsnCommand::parse(args)?),
        DelLsnCommand::COMMAND_WORD => Command::DelLsn(DelLsnCommand::parse(args)?),
        AddQnCommand::COMMAND_WORD => Command::AddQn(AddQnCommand::parse(args)?),
        DelQnCommand::COMMAND_WORD => Command::DelQn(DelQnCommand::parse(args)?),
        EditQnCommand::COMMAND_WORD => Command::EditQn(EditQnCommand::parse(args)?),
        ViewQnCommand::COMMAND_WORD => Command::ViewQn(ViewQnCommand::parse(args)?),
        FindQnCommand::COMMAND_WORD => Command::FindQn(FindQnCommand::parse(args)?),
        HelpCommand::COMMAND_WORD => Command::Help(HelpCommand::parse(args)?),
        ExitCommand::COMMAND_WORD => Command::Exit(ExitCommand::parse(args)?),
        other => {
            if let Some(action) = AttendanceAction::from_command_word(other) {
                Command::Attendance(AttendanceCommand::parse(action, args)?)
            } else if let Some(mode) = ScoreCommand::from_command_word(other) {
                Command::Score(ScoreCommand::parse(mode, args)?)
            } else if let Some(kind) = ExportCommand::from_command_word(other) {
                Command::Export(ExportCommand::parse(kind, args)?)
            } else {
                return Err(ParseError::UnknownCommand {
                    word: other.to_string(),
                });
            }
        }
    };

    debug!("Parsed command: {command}");
    Ok(command)
}
