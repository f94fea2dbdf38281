use serenity::commands::UiAction;
use serenity::core::error::{CommandError, SerenityError};
use serenity::model::{GroupLessonKey, GroupName, LessonName, StudentInfo};
use serenity::Logic;
use tempfile::TempDir;

mod common;
use common::{assertions::assert_invariants, fixtures::*};

fn g01() -> GroupName {
    "G01".parse().unwrap()
}

fn lesson(name: &str) -> LessonName {
    name.parse().unwrap()
}

fn info<'a>(logic: &'a Logic, group: &str, lesson_name: &str, number: &str) -> &'a StudentInfo {
    let key = GroupLessonKey::new(group.parse().unwrap(), lesson(lesson_name));
    logic
        .model()
        .serenity()
        .student_infos(&key)
        .and_then(|infos| infos.iter().find(|info| info.student().number().as_str() == number))
        .unwrap_or_else(|| panic!("no record of {number} in {key}"))
}

fn command_error(result: serenity::Result<serenity::CommandResult>) -> CommandError {
    match result {
        Err(SerenityError::Command(e)) => e,
        other => panic!("expected a command error, got {other:?}"),
    }
}

/// Scenarios 1 to 4 build on each other
fn run_through_scores(logic: &mut Logic) -> anyhow::Result<()> {
    let result = logic.execute("addgrp grp/G01 path/G01.xlsx")?;
    assert_eq!(result.feedback, "New tutorial group added: Group G01");
    assert_eq!(result.ui_action, UiAction::AddGrp);
    let groups = logic.model().filtered_groups();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name(), &g01());
    assert_invariants(logic.model());

    logic.execute("addstudent name/Carol id/A0000003C grp/G01")?;
    let group = logic.model().serenity().group(&g01()).unwrap();
    let names: Vec<&str> = group.students().iter().map(|s| s.name().as_str()).collect();
    assert_eq!(names, ["Alice", "Bob", "Carol"]);
    let carol = info(logic, "G01", "1-1", "A0000003C");
    assert!(!carol.attendance().present);
    assert_eq!(carol.participation().score(), 0);
    assert_invariants(logic.model());

    logic.execute("viewatt grp/G01")?;
    assert!(logic.model().selected_lesson().is_some(), "G01 has a single lesson");
    logic.execute("markpresent name/Alice id/A0000001A")?;
    assert!(info(logic, "G01", "1-1", "A0000001A").attendance().present);
    assert!(!info(logic, "G01", "1-1", "A0000002B").attendance().present);
    assert!(!info(logic, "G01", "1-1", "A0000003C").attendance().present);

    logic.execute("addscore name/Alice id/A0000001A score/3")?;
    assert_eq!(info(logic, "G01", "1-1", "A0000001A").participation().score(), 3);
    let result = logic.execute("addscore name/Alice id/A0000001A score/3");
    assert_eq!(command_error(result), CommandError::ScoreOutOfRange { attempted: 6 });
    assert_eq!(info(logic, "G01", "1-1", "A0000001A").participation().score(), 3);
    assert_invariants(logic.model());
    Ok(())
}

#[test]
fn test_group_to_scores_scenario() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut logic = session(dir.path(), scenario_roster());
    run_through_scores(&mut logic)
}

#[test]
fn test_overlapping_roster_is_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut logic = session(dir.path(), scenario_roster());
    logic.execute("addgrp grp/G01 path/G01.xlsx")?;

    let result = logic.execute("addgrp grp/G02 path/G02.xlsx");
    match command_error(result) {
        CommandError::DuplicateStudentAcrossGroups { student, group } => {
            assert!(student.contains("A0000001A"));
            assert_eq!(group, "G01");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(!logic.model().has_group_name(&"G02".parse().unwrap()));
    assert_invariants(logic.model());
    Ok(())
}

#[test]
fn test_question_add_then_delete() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut logic = session(dir.path(), scenario_roster());
    logic.execute("addgrp grp/G01 path/G01.xlsx")?;

    let result = logic.execute("addqn grp/G01 lsn/1-1 qn/When is the report due?")?;
    assert_eq!(result.ui_action, UiAction::RefreshQuestions);
    let result = logic.execute("delqn idx/1")?;
    assert!(result.feedback.contains("When is the report due?"));
    assert!(logic.model().questions().is_empty());
    Ok(())
}

#[test]
fn test_repeated_markpresent_is_idempotent() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut logic = session(dir.path(), scenario_roster());
    logic.execute("addgrp grp/G03 path/G03.xlsx")?;

    logic.execute("markpresent grp/G03 lsn/2-1 idx/2")?;
    let once = logic.model().serenity().clone();
    logic.execute("markpresent grp/G03 lsn/2-1 idx/2")?;
    assert_eq!(logic.model().serenity(), &once);
    Ok(())
}

#[test]
fn test_addscore_then_subscore_restores_score() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut logic = session(dir.path(), scenario_roster());
    logic.execute("addgrp grp/G03 path/G03.xlsx")?;
    logic.execute("setscore grp/G03 lsn/1-2 idx/1 score/2")?;

    let before = logic.model().serenity().clone();
    logic.execute("addscore idx/1")?;
    assert_eq!(info(&logic, "G03", "1-2", "A0000005E").participation().score(), 3);
    logic.execute("subscore idx/1")?;
    assert_eq!(logic.model().serenity(), &before);
    Ok(())
}

#[test]
fn test_score_boundaries() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut logic = session(dir.path(), scenario_roster());
    logic.execute("addgrp grp/G03 path/G03.xlsx")?;
    logic.execute("viewlsn grp/G03 lsn/1-1")?;

    let result = logic.execute("subscore idx/3");
    assert_eq!(command_error(result), CommandError::ScoreOutOfRange { attempted: -1 });
    logic.execute("setscore idx/3 score/5")?;
    let result = logic.execute("addscore idx/3");
    assert_eq!(command_error(result), CommandError::ScoreOutOfRange { attempted: 6 });
    assert_eq!(info(&logic, "G03", "1-1", "A0000007G").participation().score(), 5);
    Ok(())
}

#[test]
fn test_missing_targets_fail() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut logic = session(dir.path(), scenario_roster());

    let result = logic.execute("viewatt grp/G09");
    assert_eq!(command_error(result), CommandError::group_not_found("G09"));
    let result = logic.execute("delqn idx/1");
    assert_eq!(command_error(result), CommandError::index_out_of_range(1, 0));

    logic.execute("addgrp grp/G03 path/G03.xlsx")?;
    let result = logic.execute("markpresent all");
    assert_eq!(command_error(result), CommandError::NoLessonSelected);
    let result = logic.execute("flagatt grp/G03 lsn/5-1 idx/1");
    assert_eq!(command_error(result), CommandError::lesson_not_found("G03", "5-1"));
    Ok(())
}

#[test]
fn test_mark_all_and_flag_are_independent() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut logic = session(dir.path(), scenario_roster());
    logic.execute("addgrp grp/G03 path/G03.xlsx")?;

    let result = logic.execute("markpresent all grp/G03 lsn/2-2")?;
    assert_eq!(result.feedback, "Marked present all students");
    logic.execute("flagatt idx/1")?;
    logic.execute("markabsent idx/1")?;

    let erin = info(&logic, "G03", "2-2", "A0000005E").attendance();
    assert!(!erin.present);
    assert!(erin.flagged);
    assert!(info(&logic, "G03", "2-2", "A0000006F").attendance().present);
    assert!(!info(&logic, "G03", "2-1", "A0000006F").attendance().present);
    assert_invariants(logic.model());
    Ok(())
}

#[test]
fn test_student_and_lesson_removal_keep_invariants() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut logic = session(dir.path(), scenario_roster());
    logic.execute("addgrp grp/G03 path/G03.xlsx")?;

    logic.execute("delstudent grp/G03 name/frank id/a0000006f")?;
    assert_invariants(logic.model());
    let result = logic.execute("delstudent grp/G03 name/Frank id/A0000006F");
    assert!(matches!(command_error(result), CommandError::StudentNotFound { .. }));

    logic.execute("dellsn grp/G03 lsn/1-2")?;
    let group = logic.model().serenity().group(&"G03".parse().unwrap()).unwrap();
    assert_eq!(group.lessons().len(), 3);
    assert!(group.lesson(lesson("1-2")).is_none());
    assert_invariants(logic.model());

    // a student removed from one group may join another
    logic.execute("addgrp grp/G01 path/G01.xlsx")?;
    logic.execute("addstudent grp/G01 name/Frank id/A0000006F")?;
    let frank = info(&logic, "G01", "1-1", "A0000006F").student().clone();
    let owner = logic.model().serenity().group_of(&frank).map(|group| group.name().clone());
    assert_eq!(owner, Some(g01()));
    assert!(!logic
        .model()
        .serenity()
        .group(&"G03".parse().unwrap())
        .unwrap()
        .has_student(&frank));
    assert_invariants(logic.model());
    Ok(())
}

#[test]
fn test_delgrp_orphans_questions() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut logic = session(dir.path(), scenario_roster());
    logic.execute("addgrp grp/G01 path/G01.xlsx")?;
    logic.execute("addqn grp/G01 lsn/1-1 qn/Is the quiz graded?")?;

    let result = logic.execute("delgrp grp/g01")?;
    assert_eq!(result.ui_action, UiAction::DelGrp);
    assert_eq!(logic.model().serenity().index().len(), 0);
    assert_eq!(logic.model().filtered_questions().len(), 1);
    logic.execute("delqn idx/1")?;
    assert!(logic.model().questions().is_empty());
    Ok(())
}

#[test]
fn test_find_view_and_edit_questions() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut logic = session(dir.path(), scenario_roster());
    logic.execute("addgrp grp/G03 path/G03.xlsx")?;
    logic.execute("addqn grp/G03 lsn/1-1 qn/When is the report due?")?;
    logic.execute("addqn grp/G03 lsn/1-2 qn/Is the exam open book?")?;
    logic.execute("viewqn")?;
    assert_eq!(logic.model().filtered_questions().len(), 2);

    logic.execute("findqn EXAM")?;
    assert_eq!(logic.model().filtered_questions().len(), 1);
    logic.execute("editqn idx/1 qn/Is the final exam open book?")?;

    logic.execute("viewqn")?;
    let texts: Vec<&str> = logic
        .model()
        .filtered_questions()
        .iter()
        .map(|q| q.text.as_str())
        .collect();
    assert_eq!(texts, ["When is the report due?", "Is the final exam open book?"]);

    logic.execute("viewlsn grp/G03 lsn/1-1")?;
    assert_eq!(logic.model().filtered_questions().len(), 1);
    Ok(())
}

#[test]
fn test_export_uses_the_adapter() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let roster = scenario_roster();
    let exported = roster.exported();
    let mut logic = session(dir.path(), roster);
    logic.execute("addgrp grp/G01 path/G01.xlsx")?;
    logic.execute("markpresent grp/G01 lsn/1-1 idx/1")?;
    logic.execute("flagatt idx/2")?;

    let before = logic.model().serenity().clone();
    let result = logic.execute("exportatt grp/G01")?;
    assert_eq!(result.ui_action, UiAction::None);
    assert!(result.feedback.contains("G01_attendance.csv"));
    logic.execute("exportscore grp/G01")?;
    assert_eq!(logic.model().serenity(), &before);

    let sheets = exported.lock().unwrap();
    assert_eq!(sheets.len(), 2);
    assert_eq!(sheets[0].rows[0].cells, ["1"]);
    assert_eq!(sheets[0].rows[1].cells, ["0*"]);
    assert_eq!(sheets[1].rows[1].cells, ["0"]);
    Ok(())
}
