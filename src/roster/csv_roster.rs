//! CSV rosters as downloaded from the course portal.
//!
//! A roster sheet may start with any number of preamble rows. The student
//! table begins at the first row whose leading cells are `Photo`, `Name` and
//! `Student Number`; any later header cell named `T<n>` declares a lesson.

use crate::core::error::AdapterError;
use crate::model::student::Student;
use crate::model::values::{LessonName, StudentName, StudentNumber};
use crate::roster::{Roster, RosterAdapter, Sheet};
use log::{debug, info};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const HEADER: [&str; 3] = ["Photo", "Name", "Student Number"];
const UNSUPPORTED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

#[derive(Debug, Clone)]
pub struct CsvRoster {
    export_dir: PathBuf,
}

impl CsvRoster {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    fn read_rows(path: &Path) -> Result<Vec<Vec<String>>, AdapterError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|e| AdapterError::Read {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| AdapterError::Read {
                path: path.to_path_buf(),
                source: e,
            })?;
            rows.push(record.iter().map(|cell| cell.trim().to_string()).collect());
        }
        Ok(rows)
    }
}

impl RosterAdapter for CsvRoster {
    fn import(&self, location: &str) -> Result<Roster, AdapterError> {
        let path = PathBuf::from(location.trim());
        if !path.is_file() {
            return Err(AdapterError::FileNotFound { path });
        }
        let unsupported = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                UNSUPPORTED_EXTENSIONS
                    .iter()
                    .any(|candidate| ext.eq_ignore_ascii_case(candidate))
            });
        if unsupported {
            return Err(AdapterError::UnsupportedFormat { path });
        }

        let rows = Self::read_rows(&path)?;
        if rows.iter().all(|row| row.iter().all(String::is_empty)) {
            return Err(AdapterError::EmptyFile { path });
        }

        let header_at = rows
            .iter()
            .position(|row| is_header(row))
            .ok_or_else(|| AdapterError::MissingHeader { path: path.clone() })?;
        let lessons = parse_lesson_columns(&path, header_at + 1, &rows[header_at])?;

        let mut students = Vec::new();
        let mut seen = HashSet::new();
        for (offset, row) in rows.iter().enumerate().skip(header_at + 1) {
            if row.iter().all(String::is_empty) {
                continue;
            }
            let row_number = offset + 1;
            let student = parse_student(&path, row_number, row)?;
            if !seen.insert(student.number().clone()) {
                return Err(AdapterError::malformed_row(
                    &path,
                    row_number,
                    format!("student number {} appears twice", student.number()),
                ));
            }
            students.push(student);
        }

        if students.is_empty() {
            return Err(AdapterError::MissingStudentList { path });
        }
        students.sort_by(Student::by_name);

        info!(
            "Read {} students and {} lessons from {}",
            students.len(),
            lessons.len(),
            path.display()
        );
        Ok(Roster::new(students, lessons))
    }

    fn export(&self, sheet: &Sheet) -> Result<PathBuf, AdapterError> {
        let path = self
            .export_dir
            .join(format!("{}_{}.csv", sheet.group, sheet.kind.file_suffix()));
        fs::create_dir_all(&self.export_dir).map_err(|e| AdapterError::write_failed(&path, e))?;

        let mut writer =
            csv::Writer::from_path(&path).map_err(|e| AdapterError::write_failed(&path, e))?;

        let mut header = vec![HEADER[1].to_string(), HEADER[2].to_string()];
        header.extend(sheet.lessons.iter().map(ToString::to_string));
        writer
            .write_record(&header)
            .map_err(|e| AdapterError::write_failed(&path, e))?;

        for row in &sheet.rows {
            let mut record = vec![
                row.student.name().to_string(),
                row.student.number().to_string(),
            ];
            record.extend(row.cells.iter().cloned());
            writer
                .write_record(&record)
                .map_err(|e| AdapterError::write_failed(&path, e))?;
        }
        writer.flush().map_err(|e| AdapterError::write_failed(&path, e))?;

        debug!("Wrote {} rows to {}", sheet.rows.len(), path.display());
        Ok(path)
    }
}

fn is_header(row: &[String]) -> bool {
    row.len() >= HEADER.len() && row.iter().zip(HEADER).all(|(cell, expected)| cell == expected)
}

fn parse_lesson_columns(path: &Path, row_number: usize, header: &[String]) -> Result<Vec<LessonName>, AdapterError> {
    let mut lessons = Vec::new();
    for cell in &header[HEADER.len()..] {
        let Some(lesson) = cell
            .strip_prefix('T')
            .and_then(|n| n.parse::<u32>().ok())
            .and_then(LessonName::from_tutorial_index)
        else {
            continue;
        };
        if lessons.contains(&lesson) {
            return Err(AdapterError::malformed_row(
                path,
                row_number,
                format!("lesson column {cell} appears twice"),
            ));
        }
        lessons.push(lesson);
    }
    lessons.sort();
    Ok(lessons)
}

fn parse_student(path: &Path, row_number: usize, row: &[String]) -> Result<Student, AdapterError> {
    let cell = |index: usize| row.get(index).map(String::as_str).unwrap_or_default();

    let name: StudentName = cell(1)
        .parse()
        .map_err(|e| AdapterError::malformed_row(path, row_number, format!("{}: {}", StudentName::FIELD, e)))?;
    let number: StudentNumber = cell(2)
        .parse()
        .map_err(|e| AdapterError::malformed_row(path, row_number, format!("{}: {}", StudentNumber::FIELD, e)))?;
    Ok(Student::new(name, number))
}
