use crate::commands::{CommandResult, UiAction};
use crate::core::error::{ParseError, Result};
use crate::model::manager::Model;
use crate::model::student::Student;
use crate::model::values::GroupName;
use crate::parser::tokenizer::{tokenize, Prefix};
use crate::parser::util::{ensure_empty_preamble, parse_student, parse_value, required};
use std::fmt;

const PREFIXES: [Prefix; 3] = [Prefix::Grp, Prefix::Name, Prefix::Id];

fn parse_student_in_group(args: &str, usage: &'static str) -> std::result::Result<(Student, GroupName), ParseError> {
    let args = tokenize(args, &PREFIXES);
    ensure_empty_preamble(&args, usage)?;
    let student = parse_student(&args, usage)?;
    let group = parse_value(required(&args, Prefix::Grp, usage)?, usage)?;
    Ok((student, group))
}

/// Add a student to a group, with a fresh record in each of its lessons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddStudentCommand {
    pub student: Student,
    pub group: GroupName,
}

impl AddStudentCommand {
    pub const COMMAND_WORD: &'static str = "addstudent";
    pub const USAGE: &'static str = "addstudent: Adds a student to a tutorial group.\n\
        Parameters: grp/GROUP name/NAME id/STUDENT_NUMBER\n\
        Example: addstudent grp/G04 name/Aaron Tan id/A0123456U";

    pub fn parse(args: &str) -> std::result::Result<Self, ParseError> {
        let (student, group) = parse_student_in_group(args, Self::USAGE)?;
        Ok(Self { student, group })
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult> {
        model.add_student_to_group(self.student.clone(), &self.group)?;
        Ok(CommandResult::new(
            format!("New student added to Group {}: {}", self.group, self.student),
            UiAction::RefreshTable,
        ))
    }
}

impl fmt::Display for AddStudentCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} grp/{} name/{} id/{}",
            Self::COMMAND_WORD,
            self.group,
            self.student.name(),
            self.student.number()
        )
    }
}

/// Remove a student, and their records, from a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelStudentCommand {
    pub student: Student,
    pub group: GroupName,
}

impl DelStudentCommand {
    pub const COMMAND_WORD: &'static str = "delstudent";
    pub const USAGE: &'static str = "delstudent: Removes a student from a tutorial group.\n\
        Parameters: grp/GROUP name/NAME id/STUDENT_NUMBER\n\
        Example: delstudent grp/G04 name/Aaron Tan id/A0123456U";

    pub fn parse(args: &str) -> std::result::Result<Self, ParseError> {
        let (student, group) = parse_student_in_group(args, Self::USAGE)?;
        Ok(Self { student, group })
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult> {
        let removed = model.remove_student_from_group(&self.student, &self.group)?;
        Ok(CommandResult::new(
            format!("Student removed from Group {}: {}", self.group, removed),
            UiAction::RefreshTable,
        ))
    }
}

impl fmt::Display for DelStudentCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} grp/{} name/{} id/{}",
            Self::COMMAND_WORD,
            self.group,
            self.student.name(),
            self.student.number()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_addstudent_any_order() {
        let command = AddStudentCommand::parse(" name/Carol Ng id/a0000003c grp/G01").unwrap();
        assert_eq!(command.student.name().as_str(), "Carol Ng");
        assert_eq!(
            command.to_string(),
            "addstudent grp/G01 name/Carol Ng id/A0000003C"
        );
    }

    #[test]
    fn test_parse_student_errors() {
        assert_eq!(
            DelStudentCommand::parse(" name/Carol grp/G01"),
            Err(ParseError::invalid_format(DelStudentCommand::USAGE))
        );
        assert!(matches!(
            AddStudentCommand::parse(" name/Carol id/123 grp/G01"),
            Err(ParseError::InvalidValue { field: "student number", .. })
        ));
    }
}
