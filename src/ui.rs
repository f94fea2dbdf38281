//! Terminal rendering of the model's projections.
//!
//! Every renderer returns a `String` so the shell decides where it goes and
//! tests can compare plain text after [`strip_ansi_codes`]. Numbered rows use
//! the same 1-based positions that `idx/` arguments refer to.

use crate::commands::UiAction;
use crate::model::manager::Model;
use crate::roster::Sheet;
use colored::*;

/// What to show after a command, or `None` when the feedback is enough
pub fn render_for(action: UiAction, model: &Model) -> Option<String> {
    match action {
        UiAction::AddGrp | UiAction::ViewAtt => model
            .selected_group()
            .map(|group| render_sheet(&Sheet::attendance(group))),
        UiAction::ViewScore => model
            .selected_group()
            .map(|group| render_sheet(&Sheet::participation(group))),
        UiAction::ViewLsn | UiAction::RefreshTable => {
            if model.selected_lesson().is_some() {
                Some(render_student_infos(model))
            } else {
                model.selected_group().map(|_| render_lessons(model))
            }
        }
        UiAction::DelGrp => Some(render_groups(model)),
        UiAction::RefreshQuestions => Some(render_questions(model)),
        UiAction::Help | UiAction::Exit | UiAction::None => None,
    }
}

/// The group projection, one numbered line per group with its size
pub fn render_groups(model: &Model) -> String {
    let groups = model.filtered_groups();
    if groups.is_empty() {
        return "No tutorial groups".bright_black().to_string();
    }
    let mut out = String::new();
    for (i, group) in groups.iter().enumerate() {
        out.push_str(&format!(
            "   {} {}  {}\n",
            index_label(i + 1),
            group.name().as_str().blue(),
            format!("{} students, {} lessons", group.students().len(), group.lessons().len())
                .bright_black()
        ));
    }
    out
}

/// Lessons of the selected group with a present count for each.
///
/// Shown when a group is selected but no single lesson is.
pub fn render_lessons(model: &Model) -> String {
    let lessons = model.filtered_lessons();
    if lessons.is_empty() {
        return "No lessons".bright_black().to_string();
    }
    let mut out = String::new();
    for (i, lesson) in lessons.iter().enumerate() {
        let present = lesson
            .student_infos()
            .iter()
            .filter(|info| info.attendance().present)
            .count();
        out.push_str(&format!(
            "   {} {}  {}\n",
            index_label(i + 1),
            lesson.name().to_string().blue(),
            format!("{present}/{} present", lesson.student_infos().len()).bright_black()
        ));
    }
    out
}

/// Records of the selected lesson, numbered for `idx/`
pub fn render_student_infos(model: &Model) -> String {
    let infos = model.filtered_student_infos();
    if infos.is_empty() {
        return "No students".bright_black().to_string();
    }
    let name_width = infos
        .iter()
        .map(|info| info.student().name().as_str().chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (i, info) in infos.iter().enumerate() {
        let attendance = info.attendance();
        let presence = if attendance.present {
            "present".green()
        } else {
            "absent ".red()
        };
        let flag = if attendance.flagged { "⚑".yellow() } else { " ".normal() };
        out.push_str(&format!(
            "   {} {:<name_width$}  {}  {} {}  score {}\n",
            index_label(i + 1),
            info.student().name().as_str(),
            info.student().number().as_str().bright_black(),
            presence,
            flag,
            info.participation()
        ));
    }
    out
}

/// A sheet as an aligned grid, students down and lessons across.
///
/// Cells are padded before they are coloured so escape codes never count
/// towards the column width.
pub fn render_sheet(sheet: &Sheet) -> String {
    let name_width = sheet
        .rows
        .iter()
        .map(|row| row.student.name().as_str().chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());
    let cell_width = sheet
        .lessons
        .iter()
        .map(|lesson| lesson.to_string().len())
        .chain(sheet.rows.iter().flat_map(|row| row.cells.iter().map(String::len)))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("   {}", format!("{:<name_width$}", "Name").blue()));
    for lesson in &sheet.lessons {
        out.push_str(&format!("  {}", format!("{:>cell_width$}", lesson.to_string()).blue()));
    }
    out.push('\n');

    for row in &sheet.rows {
        out.push_str(&format!("   {:<name_width$}", row.student.name().as_str()));
        for cell in &row.cells {
            out.push_str(&format!("  {cell:>cell_width$}"));
        }
        out.push('\n');
    }
    out
}

/// The question projection, numbered for `delqn` and `editqn`
pub fn render_questions(model: &Model) -> String {
    let questions = model.filtered_questions();
    if questions.is_empty() {
        return "No questions".bright_black().to_string();
    }
    let mut out = String::new();
    for (i, question) in questions.iter().enumerate() {
        out.push_str(&format!(
            "   {} {} {}\n",
            index_label(i + 1),
            format!("{} {}", question.group, question.lesson).bright_black(),
            question.text.as_str().white()
        ));
    }
    out
}

/// `[n]`, the position an `idx/` argument refers to
fn index_label(n: usize) -> String {
    format!("{}{}{}", "[".bright_black(), n.to_string().white(), "]".bright_black())
}

/// Remove ANSI color sequences
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }
    result
}
