use crate::commands::{describe_targets, fmt_selector, fmt_target, CommandResult, UiAction};
use crate::core::error::{ParseError, Result};
use crate::model::manager::{LessonTarget, Model, StudentSelector};
use crate::model::values::ScoreMode;
use crate::parser::tokenizer::{tokenize, Prefix};
use crate::parser::util::{parse_lesson_target, parse_score, parse_selector, required};
use std::fmt;

const PREFIXES: [Prefix; 6] = [
    Prefix::Grp,
    Prefix::Lsn,
    Prefix::Name,
    Prefix::Id,
    Prefix::Idx,
    Prefix::Score,
];

const ADD_USAGE: &str = "addscore: Raises the participation score of a student in a lesson.\n\
    Parameters: [grp/GROUP lsn/LESSON] (name/NAME id/STUDENT_NUMBER | idx/INDEX) [score/AMOUNT]\n\
    Example: addscore grp/G04 lsn/1-2 idx/2 score/2";
const SUBTRACT_USAGE: &str = "subscore: Lowers the participation score of a student in a lesson.\n\
    Parameters: [grp/GROUP lsn/LESSON] (name/NAME id/STUDENT_NUMBER | idx/INDEX) [score/AMOUNT]\n\
    Example: subscore name/Aaron Tan id/A0123456U";
const SET_USAGE: &str = "setscore: Sets the participation score of a student in a lesson.\n\
    Parameters: [grp/GROUP lsn/LESSON] (name/NAME id/STUDENT_NUMBER | idx/INDEX) score/SCORE\n\
    Example: setscore grp/G04 lsn/1-2 idx/1 score/4";

/// Change the participation score of one student
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreCommand {
    pub mode: ScoreMode,
    pub target: LessonTarget,
    pub selector: StudentSelector,
    pub amount: u8,
}

impl ScoreCommand {
    pub const MODES: [ScoreMode; 3] = [ScoreMode::Add, ScoreMode::Subtract, ScoreMode::Set];

    pub fn command_word(mode: ScoreMode) -> &'static str {
        match mode {
            ScoreMode::Add => "addscore",
            ScoreMode::Subtract => "subscore",
            ScoreMode::Set => "setscore",
        }
    }

    pub fn from_command_word(word: &str) -> Option<ScoreMode> {
        Self::MODES.into_iter().find(|mode| Self::command_word(*mode) == word)
    }

    pub fn usage(mode: ScoreMode) -> &'static str {
        match mode {
            ScoreMode::Add => ADD_USAGE,
            ScoreMode::Subtract => SUBTRACT_USAGE,
            ScoreMode::Set => SET_USAGE,
        }
    }

    pub fn parse(mode: ScoreMode, args: &str) -> std::result::Result<Self, ParseError> {
        let usage = Self::usage(mode);
        let args = tokenize(args, &PREFIXES);
        let selector = parse_selector(&args, false, usage)?;
        let target = parse_lesson_target(&args, usage)?;
        let amount = match mode {
            ScoreMode::Set => parse_score(required(&args, Prefix::Score, usage)?, true, usage)?,
            ScoreMode::Add | ScoreMode::Subtract => match args.value(Prefix::Score) {
                Some(raw) => parse_score(raw, false, usage)?,
                None => 1,
            },
        };
        Ok(Self {
            mode,
            target,
            selector,
            amount,
        })
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult> {
        let updated = model.update_participation(&self.target, &self.selector, self.mode, self.amount)?;
        let scores = updated
            .iter()
            .map(|info| info.participation().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Ok(CommandResult::new(
            format!(
                "Participation score of {} is now {}",
                describe_targets(&self.selector, &updated),
                scores
            ),
            UiAction::RefreshTable,
        ))
    }
}

impl fmt::Display for ScoreCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::command_word(self.mode))?;
        fmt_target(f, &self.target)?;
        fmt_selector(f, &self.selector)?;
        write!(f, " score/{}", self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_defaults_to_one() {
        let command = ScoreCommand::parse(ScoreMode::Add, " idx/2").unwrap();
        assert_eq!(command.amount, 1);
        assert_eq!(command.to_string(), "addscore idx/2 score/1");
    }

    #[test]
    fn test_setscore_needs_score() {
        assert_eq!(
            ScoreCommand::parse(ScoreMode::Set, " idx/2"),
            Err(ParseError::invalid_format(SET_USAGE))
        );
        let command = ScoreCommand::parse(ScoreMode::Set, " grp/G01 lsn/1-1 idx/2 score/0").unwrap();
        assert_eq!(command.amount, 0);
        assert_eq!(command.to_string(), "setscore grp/G01 lsn/1-1 idx/2 score/0");
    }

    #[test]
    fn test_score_bounds() {
        assert!(matches!(
            ScoreCommand::parse(ScoreMode::Subtract, " idx/1 score/0"),
            Err(ParseError::InvalidValue { field: "score", .. })
        ));
        assert!(matches!(
            ScoreCommand::parse(ScoreMode::Set, " idx/1 score/6"),
            Err(ParseError::InvalidValue { field: "score", .. })
        ));
    }

    #[test]
    fn test_score_has_no_all_form() {
        assert_eq!(
            ScoreCommand::parse(ScoreMode::Add, " all"),
            Err(ParseError::invalid_format(ADD_USAGE))
        );
    }

    #[test]
    fn test_command_words() {
        for mode in ScoreCommand::MODES {
            assert_eq!(ScoreCommand::from_command_word(ScoreCommand::command_word(mode)), Some(mode));
        }
    }
}
