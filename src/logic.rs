//! The session driver: one line in, one [`CommandResult`] out.
//!
//! [`Logic`] parses a line, runs the command against the [`Model`] and saves
//! the data file after every successful command. A failed save is logged
//! and does not fail the command; the in-memory state stays authoritative.

use crate::commands::CommandResult;
use crate::core::error::Result;
use crate::core::storage::JsonStorage;
use crate::model::manager::Model;
use crate::model::user_prefs::UserPrefs;
use crate::parser::parse_command;
use crate::roster::RosterAdapter;
use log::{info, warn};

pub struct Logic {
    model: Model,
    storage: JsonStorage,
}

impl Logic {
    pub fn new(model: Model, storage: JsonStorage) -> Self {
        Self { model, storage }
    }

    /// Start a session from the data file of `storage`.
    ///
    /// A missing file starts an empty session. An unreadable or invalid file
    /// also starts empty, with a warning; it is overwritten by the next save.
    pub fn load(storage: JsonStorage, roster: Box<dyn RosterAdapter>) -> Self {
        let model = match storage.load() {
            Ok(Some(data)) => Model::new(data.serenity, data.questions, data.user_prefs, roster),
            Ok(None) => {
                info!("Starting with an empty data file at {}", storage.path().display());
                Self::empty_model(&storage, roster)
            }
            Err(e) => {
                warn!("Could not load {}: {e}. Starting with no data.", storage.path().display());
                Self::empty_model(&storage, roster)
            }
        };
        Self::new(model, storage)
    }

    fn empty_model(storage: &JsonStorage, roster: Box<dyn RosterAdapter>) -> Model {
        let mut model = Model::empty(roster);
        model.set_user_prefs(UserPrefs::for_data_file(storage.path()));
        model
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn execute(&mut self, line: &str) -> Result<CommandResult> {
        info!("[USER COMMAND][{line}]");
        let command = parse_command(line)?;
        let result = command.execute(&mut self.model)?;

        if let Err(e) = self.storage.save(&self.model) {
            warn!("Could not save data to {}: {e}", self.storage.path().display());
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::UiAction;
    use crate::core::error::{AdapterError, CommandError, ParseError, SerenityError};
    use crate::model::student::Student;
    use crate::roster::{Roster, Sheet};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct TwoStudents;

    impl RosterAdapter for TwoStudents {
        fn import(&self, _location: &str) -> std::result::Result<Roster, AdapterError> {
            let students = [("Alice", "A0000001A"), ("Bob", "A0000002B")]
                .into_iter()
                .map(|(name, number)| Student::new(name.parse().unwrap(), number.parse().unwrap()))
                .collect();
            Ok(Roster::new(students, vec!["1-1".parse().unwrap()]))
        }

        fn export(&self, _sheet: &Sheet) -> std::result::Result<PathBuf, AdapterError> {
            Ok(PathBuf::from("out.csv"))
        }
    }

    fn logic(dir: &TempDir) -> Logic {
        Logic::load(JsonStorage::new(dir.path().join("serenity.json")), Box::new(TwoStudents))
    }

    #[test]
    fn test_successful_command_is_saved() {
        let dir = TempDir::new().unwrap();
        let mut session = logic(&dir);
        let result = session.execute("addgrp grp/G01 path/G01.csv").unwrap();
        assert_eq!(result.ui_action, UiAction::AddGrp);
        assert_eq!(result.feedback, "New tutorial group added: Group G01");

        let reloaded = logic(&dir);
        assert_eq!(reloaded.model().serenity(), session.model().serenity());
        assert_eq!(
            reloaded.model().user_prefs().serenity_file_path,
            dir.path().join("serenity.json")
        );
    }

    #[test]
    fn test_failed_command_leaves_file_alone() {
        let dir = TempDir::new().unwrap();
        let mut session = logic(&dir);

        let result = session.execute("delgrp grp/G01");
        assert!(matches!(
            result,
            Err(SerenityError::Command(CommandError::GroupNotFound { .. }))
        ));
        let result = session.execute("frobnicate");
        assert!(matches!(
            result,
            Err(SerenityError::Parse(ParseError::UnknownCommand { .. }))
        ));
        assert!(!dir.path().join("serenity.json").exists());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("serenity.json"), "{ not json").unwrap();
        let mut session = logic(&dir);
        assert!(session.model().serenity().groups().is_empty());

        session.execute("addgrp grp/G01 path/G01.csv").unwrap();
        assert_eq!(logic(&dir).model().serenity().groups().len(), 1);
    }

    #[test]
    fn test_save_failure_does_not_fail_command() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();
        let mut session = Logic::load(JsonStorage::new(blocker.join("serenity.json")), Box::new(TwoStudents));

        let result = session.execute("addgrp grp/G01 path/G01.csv").unwrap();
        assert_eq!(result.ui_action, UiAction::AddGrp);
        assert_eq!(session.model().serenity().groups().len(), 1);
    }
}
