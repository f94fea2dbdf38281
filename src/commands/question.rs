//! Commands over the question log.
//!
//! Indices given to `delqn` and `editqn` count from 1 in the question list
//! as currently filtered, so `findqn` followed by `delqn idx/1` deletes the
//! first match rather than the first question overall.

use crate::commands::{fmt_target, CommandResult, UiAction};
use crate::core::error::{ParseError, Result};
use crate::model::filters::QuestionFilter;
use crate::model::manager::{LessonTarget, Model};
use crate::model::values::QuestionText;
use crate::parser::tokenizer::{tokenize, Prefix};
use crate::parser::util::{ensure_empty_preamble, parse_index, parse_lesson_target, parse_value, required};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddQnCommand {
    pub target: LessonTarget,
    pub text: QuestionText,
}

impl AddQnCommand {
    pub const COMMAND_WORD: &'static str = "addqn";
    pub const USAGE: &'static str = "addqn: Logs a question asked in a lesson.\n\
        Parameters: [grp/GROUP lsn/LESSON] qn/QUESTION\n\
        Example: addqn grp/G04 lsn/1-2 qn/When is the report due?";

    pub fn parse(args: &str) -> std::result::Result<Self, ParseError> {
        let args = tokenize(args, &[Prefix::Grp, Prefix::Lsn, Prefix::Qn]);
        ensure_empty_preamble(&args, Self::USAGE)?;
        let text = parse_value(required(&args, Prefix::Qn, Self::USAGE)?, Self::USAGE)?;
        let target = parse_lesson_target(&args, Self::USAGE)?;
        Ok(Self { target, text })
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult> {
        let question = model.add_question_to(&self.target, self.text.clone())?;
        Ok(CommandResult::new(
            format!("New question added: {question}"),
            UiAction::RefreshQuestions,
        ))
    }
}

impl fmt::Display for AddQnCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::COMMAND_WORD)?;
        fmt_target(f, &self.target)?;
        write!(f, " qn/{}", self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelQnCommand {
    pub index: usize,
}

impl DelQnCommand {
    pub const COMMAND_WORD: &'static str = "delqn";
    pub const USAGE: &'static str = "delqn: Deletes a question from the question list.\n\
        Parameters: idx/INDEX\n\
        Example: delqn idx/1";

    pub fn parse(args: &str) -> std::result::Result<Self, ParseError> {
        let args = tokenize(args, &[Prefix::Idx]);
        ensure_empty_preamble(&args, Self::USAGE)?;
        let index = parse_index(required(&args, Prefix::Idx, Self::USAGE)?, Self::USAGE)?;
        Ok(Self { index })
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult> {
        let removed = model.delete_question(self.index)?;
        Ok(CommandResult::new(
            format!("Question deleted: {removed}"),
            UiAction::RefreshQuestions,
        ))
    }
}

impl fmt::Display for DelQnCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} idx/{}", Self::COMMAND_WORD, self.index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditQnCommand {
    pub index: usize,
    pub text: QuestionText,
}

impl EditQnCommand {
    pub const COMMAND_WORD: &'static str = "editqn";
    pub const USAGE: &'static str = "editqn: Replaces the text of a question.\n\
        Parameters: idx/INDEX qn/QUESTION\n\
        Example: editqn idx/1 qn/When is the final report due?";

    pub fn parse(args: &str) -> std::result::Result<Self, ParseError> {
        let args = tokenize(args, &[Prefix::Idx, Prefix::Qn]);
        ensure_empty_preamble(&args, Self::USAGE)?;
        let index = parse_index(required(&args, Prefix::Idx, Self::USAGE)?, Self::USAGE)?;
        let text = parse_value(required(&args, Prefix::Qn, Self::USAGE)?, Self::USAGE)?;
        Ok(Self { index, text })
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult> {
        let (before, after) = model.edit_question(self.index, self.text.clone())?;
        Ok(CommandResult::new(
            format!("Question edited: {before}\nNow: {after}"),
            UiAction::RefreshQuestions,
        ))
    }
}

impl fmt::Display for EditQnCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} idx/{} qn/{}", Self::COMMAND_WORD, self.index, self.text)
    }
}

/// Show every question again after a search or a lesson view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewQnCommand;

impl ViewQnCommand {
    pub const COMMAND_WORD: &'static str = "viewqn";
    pub const USAGE: &'static str = "viewqn: Shows all questions.\n\
        Example: viewqn";

    pub fn parse(args: &str) -> std::result::Result<Self, ParseError> {
        if args.trim().is_empty() {
            Ok(Self)
        } else {
            Err(ParseError::invalid_format(Self::USAGE))
        }
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult> {
        model.update_filtered_questions(QuestionFilter::All);
        Ok(CommandResult::new(
            format!("Listed all {} questions", model.filtered_questions().len()),
            UiAction::RefreshQuestions,
        ))
    }
}

impl fmt::Display for ViewQnCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::COMMAND_WORD)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindQnCommand {
    pub keywords: Vec<String>,
}

impl FindQnCommand {
    pub const COMMAND_WORD: &'static str = "findqn";
    pub const USAGE: &'static str = "findqn: Finds questions containing any of the keywords, ignoring case.\n\
        Parameters: KEYWORD [MORE_KEYWORDS]...\n\
        Example: findqn report deadline";

    pub fn parse(args: &str) -> std::result::Result<Self, ParseError> {
        let keywords: Vec<String> = args.split_whitespace().map(str::to_string).collect();
        if keywords.is_empty() {
            return Err(ParseError::invalid_format(Self::USAGE));
        }
        Ok(Self { keywords })
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult> {
        model.update_filtered_questions(QuestionFilter::Keywords(self.keywords.clone()));
        Ok(CommandResult::new(
            format!("{} questions listed", model.filtered_questions().len()),
            UiAction::RefreshQuestions,
        ))
    }
}

impl fmt::Display for FindQnCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", Self::COMMAND_WORD, self.keywords.join(" "))
    }
}
