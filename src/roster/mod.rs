//! Import of group rosters and export of attendance and score sheets.
//!
//! The model only talks to the [`RosterAdapter`] trait. [`CsvRoster`] is the
//! implementation used by the binary; tests plug in in-memory adapters.

pub mod csv_roster;

pub use csv_roster::CsvRoster;

use crate::core::error::AdapterError;
use crate::model::group::Group;
use crate::model::lesson::Lesson;
use crate::model::student::Student;
use crate::model::student_info::StudentInfo;
use crate::model::values::{GroupName, LessonName};
use std::path::PathBuf;

/// Everything a roster file yields for a new group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    pub students: Vec<Student>,
    pub lessons: Vec<LessonName>,
    pub student_infos: Vec<StudentInfo>,
}

impl Roster {
    /// Roster where every student starts absent with score 0
    pub fn new(students: Vec<Student>, lessons: Vec<LessonName>) -> Self {
        let student_infos = students.iter().cloned().map(StudentInfo::fresh).collect();
        Self {
            students,
            lessons,
            student_infos,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    Attendance,
    Participation,
}

impl SheetKind {
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Self::Attendance => "attendance",
            Self::Participation => "participation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub student: Student,
    pub cells: Vec<String>,
}

/// A group rendered as a table: one row per student, one column per lesson
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub group: GroupName,
    pub kind: SheetKind,
    pub lessons: Vec<LessonName>,
    pub rows: Vec<SheetRow>,
}

impl Sheet {
    pub fn attendance(group: &Group) -> Self {
        Self::build(group, SheetKind::Attendance, |info| {
            let attendance = info.attendance();
            let mark = if attendance.present { "1" } else { "0" };
            if attendance.flagged {
                format!("{mark}*")
            } else {
                mark.to_string()
            }
        })
    }

    pub fn participation(group: &Group) -> Self {
        Self::build(group, SheetKind::Participation, |info| {
            info.participation().to_string()
        })
    }

    fn build<F>(group: &Group, kind: SheetKind, cell: F) -> Self
    where
        F: Fn(&StudentInfo) -> String,
    {
        let lessons: Vec<&Lesson> = group.lessons().iter().collect();
        let rows = group
            .students()
            .iter()
            .map(|student| SheetRow {
                student: student.clone(),
                cells: lessons
                    .iter()
                    .map(|lesson| {
                        lesson
                            .student_infos()
                            .iter()
                            .find(|info| info.student() == student)
                            .map(&cell)
                            .unwrap_or_default()
                    })
                    .collect(),
            })
            .collect();

        Self {
            group: group.name().clone(),
            kind,
            lessons: lessons.iter().map(|lesson| lesson.name()).collect(),
            rows,
        }
    }
}

/// Source of rosters and sink of exported sheets
pub trait RosterAdapter: Send {
    fn import(&self, location: &str) -> Result<Roster, AdapterError>;

    /// Write `sheet` and return where it went
    fn export(&self, sheet: &Sheet) -> Result<PathBuf, AdapterError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(name: &str, number: &str) -> Student {
        Student::new(name.parse().unwrap(), number.parse().unwrap())
    }

    fn group() -> Group {
        let roster = Roster::new(
            vec![student("Bob", "A0000002B"), student("Alice", "A0000001A")],
            vec!["1-1".parse().unwrap(), "1-2".parse().unwrap()],
        );
        Group::from_records(
            "G01".parse().unwrap(),
            roster.students,
            roster.lessons,
            roster.student_infos,
        )
        .unwrap()
    }

    #[test]
    fn test_attendance_sheet_cells() {
        let mut group = group();
        let alice = student("Alice", "A0000001A");
        group
            .update_lesson("1-2".parse().unwrap(), |lesson| {
                lesson.update_infos(&[alice], |info| {
                    info.mark_present(true);
                    info.set_flag(true);
                    Ok(())
                })
            })
            .unwrap();

        let sheet = Sheet::attendance(&group);
        assert_eq!(sheet.kind.file_suffix(), "attendance");
        assert_eq!(sheet.rows[0].student.name().as_str(), "Alice");
        assert_eq!(sheet.rows[0].cells, vec!["0", "1*"]);
        assert_eq!(sheet.rows[1].cells, vec!["0", "0"]);
    }

    #[test]
    fn test_participation_sheet_cells() {
        let sheet = Sheet::participation(&group());
        assert_eq!(sheet.lessons.len(), 2);
        assert!(sheet.rows.iter().all(|row| row.cells == vec!["0", "0"]));
    }
}
