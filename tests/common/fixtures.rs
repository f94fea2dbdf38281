//! Test data: students, rosters, in-memory adapters and roster files

#![allow(dead_code)]

use serenity::core::error::AdapterError;
use serenity::core::storage::JsonStorage;
use serenity::logic::Logic;
use serenity::model::{LessonName, Model, Student};
use serenity::roster::{Roster, RosterAdapter, Sheet};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub fn student(name: &str, number: &str) -> Student {
    Student::new(name.parse().unwrap(), number.parse().unwrap())
}

/// Lessons `T1..=Tn` of a roster sheet
pub fn tutorials(count: u32) -> Vec<LessonName> {
    (1..=count)
        .filter_map(LessonName::from_tutorial_index)
        .collect()
}

/// Adapter serving fixed rosters by location and keeping exported sheets
#[derive(Clone, Default)]
pub struct StaticRoster {
    rosters: HashMap<String, Roster>,
    exported: Arc<Mutex<Vec<Sheet>>>,
}

impl StaticRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, location: &str, students: Vec<Student>, lessons: Vec<LessonName>) -> Self {
        self.rosters
            .insert(location.to_string(), Roster::new(students, lessons));
        self
    }

    /// Handle on the sheets exported so far; stays valid after the adapter
    /// moves into a model
    pub fn exported(&self) -> Arc<Mutex<Vec<Sheet>>> {
        Arc::clone(&self.exported)
    }
}

impl RosterAdapter for StaticRoster {
    fn import(&self, location: &str) -> Result<Roster, AdapterError> {
        self.rosters
            .get(location)
            .cloned()
            .ok_or_else(|| AdapterError::FileNotFound {
                path: location.into(),
            })
    }

    fn export(&self, sheet: &Sheet) -> Result<PathBuf, AdapterError> {
        self.exported.lock().unwrap().push(sheet.clone());
        Ok(PathBuf::from(format!("{}_{}.csv", sheet.group, sheet.kind.file_suffix())))
    }
}

/// The rosters used by the end-to-end scenarios
pub fn scenario_roster() -> StaticRoster {
    StaticRoster::new()
        .with(
            "G01.xlsx",
            vec![student("Alice", "A0000001A"), student("Bob", "A0000002B")],
            tutorials(1),
        )
        .with(
            "G02.xlsx",
            vec![student("Alice", "A0000001A"), student("Dave", "A0000004D")],
            tutorials(2),
        )
        .with(
            "G03.xlsx",
            vec![
                student("Erin", "A0000005E"),
                student("Frank", "A0000006F"),
                student("Grace", "A0000007G"),
            ],
            tutorials(4),
        )
}

/// A session over `roster` saving into `dir`
pub fn session(dir: &Path, roster: StaticRoster) -> Logic {
    Logic::new(
        Model::empty(Box::new(roster)),
        JsonStorage::new(dir.join("serenity.json")),
    )
}

/// Write a roster sheet in the course-portal CSV layout
pub fn write_roster_csv(dir: &Path, file_name: &str, students: &[(&str, &str)], tutorial_count: u32) -> PathBuf {
    let mut content = String::from("CS2101 Tutorial Roster,,\nExported,2024-01-15,\n");
    let mut header = vec!["Photo".to_string(), "Name".to_string(), "Student Number".to_string()];
    header.extend((1..=tutorial_count).map(|n| format!("T{n}")));
    content.push_str(&header.join(","));
    content.push('\n');
    for (name, number) in students {
        let mut row = vec![String::new(), name.to_string(), number.to_string()];
        row.extend((1..=tutorial_count).map(|_| String::new()));
        content.push_str(&row.join(","));
        content.push('\n');
    }

    let path = dir.join(file_name);
    fs::write(&path, content).unwrap();
    path
}
