use crate::commands::group::parse_single_group;
use crate::commands::{CommandResult, UiAction};
use crate::core::error::{ParseError, Result};
use crate::model::manager::Model;
use crate::model::values::GroupName;
use crate::roster::SheetKind;
use std::fmt;

/// Write the attendance or participation sheet of a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportCommand {
    pub group: GroupName,
    pub kind: SheetKind,
}

impl ExportCommand {
    pub const KINDS: [SheetKind; 2] = [SheetKind::Attendance, SheetKind::Participation];

    pub fn command_word(kind: SheetKind) -> &'static str {
        match kind {
            SheetKind::Attendance => "exportatt",
            SheetKind::Participation => "exportscore",
        }
    }

    pub fn from_command_word(word: &str) -> Option<SheetKind> {
        Self::KINDS.into_iter().find(|kind| Self::command_word(*kind) == word)
    }

    pub fn usage(kind: SheetKind) -> &'static str {
        match kind {
            SheetKind::Attendance => "exportatt: Exports the attendance sheet of a tutorial group.\n\
                Parameters: grp/GROUP\n\
                Example: exportatt grp/G04",
            SheetKind::Participation => "exportscore: Exports the participation sheet of a tutorial group.\n\
                Parameters: grp/GROUP\n\
                Example: exportscore grp/G04",
        }
    }

    pub fn parse(kind: SheetKind, args: &str) -> std::result::Result<Self, ParseError> {
        let group = parse_single_group(args, Self::usage(kind))?;
        Ok(Self { group, kind })
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult> {
        let path = match self.kind {
            SheetKind::Attendance => model.export_attendance(&self.group)?,
            SheetKind::Participation => model.export_participation(&self.group)?,
        };
        Ok(CommandResult::new(
            format!(
                "Exported {} sheet of Group {} to {}",
                self.kind.file_suffix(),
                self.group,
                path.display()
            ),
            UiAction::None,
        ))
    }
}

impl fmt::Display for ExportCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} grp/{}", Self::command_word(self.kind), self.group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_export() {
        let command = ExportCommand::parse(SheetKind::Participation, " grp/G02").unwrap();
        assert_eq!(command.to_string(), "exportscore grp/G02");
        assert_eq!(ExportCommand::from_command_word("exportatt"), Some(SheetKind::Attendance));
        assert_eq!(ExportCommand::from_command_word("export"), None);
        assert_eq!(
            ExportCommand::parse(SheetKind::Attendance, " G02"),
            Err(ParseError::invalid_format(ExportCommand::usage(SheetKind::Attendance)))
        );
    }
}
