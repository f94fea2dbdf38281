use crate::commands::{CommandResult, UiAction};
use crate::core::error::{CommandError, ParseError, Result, ValidationError};
use crate::model::filters::GroupFilter;
use crate::model::group::Group;
use crate::model::manager::Model;
use crate::model::values::GroupName;
use crate::parser::tokenizer::{tokenize, Prefix};
use crate::parser::util::{ensure_empty_preamble, parse_value, required};
use log::debug;
use std::fmt;

/// Create a group from a roster file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddGrpCommand {
    pub group: GroupName,
    pub path: String,
}

impl AddGrpCommand {
    pub const COMMAND_WORD: &'static str = "addgrp";
    pub const USAGE: &'static str = "addgrp: Adds a tutorial group with the students and lessons of a roster file.\n\
        Parameters: grp/GROUP path/FILE\n\
        Example: addgrp grp/G04 path/CS2101_G04.csv";

    pub fn parse(args: &str) -> std::result::Result<Self, ParseError> {
        let args = tokenize(args, &[Prefix::Grp, Prefix::Path]);
        ensure_empty_preamble(&args, Self::USAGE)?;
        let group = parse_value(required(&args, Prefix::Grp, Self::USAGE)?, Self::USAGE)?;
        let path = required(&args, Prefix::Path, Self::USAGE)?;
        if path.is_empty() {
            return Err(ParseError::invalid_value(
                ValidationError::new("path", "must not be blank"),
                Self::USAGE,
            ));
        }
        Ok(Self {
            group,
            path: path.to_string(),
        })
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult> {
        if model.has_group_name(&self.group) {
            return Err(CommandError::DuplicateGroup {
                name: self.group.to_string(),
            }
            .into());
        }

        let roster = model.import_roster(&self.path)?;
        debug!(
            "Roster {} has {} students and {} lessons",
            self.path,
            roster.students.len(),
            roster.lessons.len()
        );
        let group = Group::from_records(
            self.group.clone(),
            roster.students,
            roster.lessons,
            roster.student_infos,
        )?;
        let feedback = format!("New tutorial group added: {group}");
        model.add_group(group)?;

        Ok(CommandResult::new(feedback, UiAction::AddGrp))
    }
}

impl fmt::Display for AddGrpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} grp/{} path/{}", Self::COMMAND_WORD, self.group, self.path)
    }
}

/// Delete a group with its lessons; its questions are kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelGrpCommand {
    pub group: GroupName,
}

impl DelGrpCommand {
    pub const COMMAND_WORD: &'static str = "delgrp";
    pub const USAGE: &'static str = "delgrp: Deletes a tutorial group.\n\
        Parameters: grp/GROUP\n\
        Example: delgrp grp/G04";

    pub fn parse(args: &str) -> std::result::Result<Self, ParseError> {
        let group = parse_single_group(args, Self::USAGE)?;
        Ok(Self { group })
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult> {
        let removed = model.delete_group(&self.group)?;
        Ok(CommandResult::new(
            format!("Tutorial group deleted: {removed}"),
            UiAction::DelGrp,
        ))
    }
}

impl fmt::Display for DelGrpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} grp/{}", Self::COMMAND_WORD, self.group)
    }
}

/// Show the attendance table of a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewAttCommand {
    pub group: GroupName,
}

impl ViewAttCommand {
    pub const COMMAND_WORD: &'static str = "viewatt";
    pub const USAGE: &'static str = "viewatt: Shows the attendance of every student of a tutorial group.\n\
        Parameters: grp/GROUP\n\
        Example: viewatt grp/G04";

    pub fn parse(args: &str) -> std::result::Result<Self, ParseError> {
        let group = parse_single_group(args, Self::USAGE)?;
        Ok(Self { group })
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult> {
        let name = select_group(model, &self.group)?;
        Ok(CommandResult::new(
            format!("Showing attendance of Group {name}"),
            UiAction::ViewAtt,
        ))
    }
}

impl fmt::Display for ViewAttCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} grp/{}", Self::COMMAND_WORD, self.group)
    }
}

/// Show the participation table of a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewScoreCommand {
    pub group: GroupName,
}

impl ViewScoreCommand {
    pub const COMMAND_WORD: &'static str = "viewscore";
    pub const USAGE: &'static str = "viewscore: Shows the participation scores of every student of a tutorial group.\n\
        Parameters: grp/GROUP\n\
        Example: viewscore grp/G04";

    pub fn parse(args: &str) -> std::result::Result<Self, ParseError> {
        let group = parse_single_group(args, Self::USAGE)?;
        Ok(Self { group })
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult> {
        let name = select_group(model, &self.group)?;
        Ok(CommandResult::new(
            format!("Showing participation scores of Group {name}"),
            UiAction::ViewScore,
        ))
    }
}

impl fmt::Display for ViewScoreCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} grp/{}", Self::COMMAND_WORD, self.group)
    }
}

pub(crate) fn parse_single_group(args: &str, usage: &'static str) -> std::result::Result<GroupName, ParseError> {
    let args = tokenize(args, &[Prefix::Grp]);
    ensure_empty_preamble(&args, usage)?;
    parse_value(required(&args, Prefix::Grp, usage)?, usage)
}

/// Point the group projection at `name` and return the stored spelling
fn select_group(model: &mut Model, name: &GroupName) -> Result<GroupName> {
    let stored = model
        .serenity()
        .group(name)
        .map(|group| group.name().clone())
        .ok_or_else(|| CommandError::group_not_found(name))?;
    model.update_filtered_groups(GroupFilter::NameIs(stored.clone()));
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_addgrp() {
        let command = AddGrpCommand::parse(" grp/G04 path/CS2101 G04.csv").unwrap();
        assert_eq!(command.group.as_str(), "G04");
        assert_eq!(command.path, "CS2101 G04.csv");
        assert_eq!(command.to_string(), "addgrp grp/G04 path/CS2101 G04.csv");
    }

    #[test]
    fn test_parse_addgrp_errors() {
        assert_eq!(
            AddGrpCommand::parse(" grp/G04"),
            Err(ParseError::invalid_format(AddGrpCommand::USAGE))
        );
        assert_eq!(
            AddGrpCommand::parse(" extra grp/G04 path/x.csv"),
            Err(ParseError::invalid_format(AddGrpCommand::USAGE))
        );
        assert!(matches!(
            AddGrpCommand::parse(" grp/G-04 path/x.csv"),
            Err(ParseError::InvalidValue { field: "group name", .. })
        ));
        assert!(matches!(
            AddGrpCommand::parse(" grp/G04 path/"),
            Err(ParseError::InvalidValue { field: "path", .. })
        ));
    }

    #[test]
    fn test_parse_single_group_commands() {
        assert_eq!(DelGrpCommand::parse(" grp/g01").unwrap().to_string(), "delgrp grp/g01");
        assert_eq!(ViewAttCommand::parse(" grp/G01").unwrap().to_string(), "viewatt grp/G01");
        assert_eq!(
            ViewScoreCommand::parse(" grp/G01").unwrap().to_string(),
            "viewscore grp/G01"
        );
        assert_eq!(
            DelGrpCommand::parse(""),
            Err(ParseError::invalid_format(DelGrpCommand::USAGE))
        );
    }
}
