//! Model invariants and output predicates

#![allow(dead_code)]

use predicates::prelude::*;
use serenity::model::{GroupLessonKey, Model};
use std::collections::HashSet;

/// Check every structural invariant of the model, panicking with the first
/// violation found
pub fn assert_invariants(model: &Model) {
    let serenity = model.serenity();
    let mut group_names = HashSet::new();
    let mut owners = HashSet::new();
    let mut lesson_count = 0;

    for group in serenity.groups() {
        assert!(
            group_names.insert(group.name().as_str().to_lowercase()),
            "group name {} is not unique",
            group.name()
        );

        for student in group.students() {
            assert!(
                owners.insert(student.number().clone()),
                "student {student} belongs to more than one group"
            );
        }

        let mut lesson_names = HashSet::new();
        for lesson in group.lessons() {
            lesson_count += 1;
            assert!(
                lesson_names.insert(lesson.name()),
                "lesson {} repeats in {}",
                lesson.name(),
                group.name()
            );

            let roster: HashSet<_> = group.students().iter().collect();
            let recorded: HashSet<_> = lesson.student_infos().iter().map(|info| info.student()).collect();
            assert_eq!(
                roster, recorded,
                "students of {} differ from the records of lesson {}",
                group, lesson.name()
            );
            assert_eq!(lesson.student_infos().len(), group.students().len());

            for info in lesson.student_infos() {
                assert!(info.participation().score() <= 5, "score out of range for {}", info.student());
            }

            let key = GroupLessonKey::new(group.name().clone(), lesson.name());
            assert_eq!(
                serenity.index().get(&key),
                Some(lesson.student_infos()),
                "index entry {key} is out of sync"
            );
        }
    }

    assert_eq!(serenity.index().len(), lesson_count, "index has stale entries");
}

/// The usage text a parse error appends
pub fn shows_usage(command_word: &str) -> impl Predicate<str> {
    predicate::str::contains(format!("{command_word}: "))
}

pub fn has_error(message: &str) -> impl Predicate<str> {
    predicate::str::contains("Error:").and(predicate::str::contains(message.to_string()))
}

pub fn has_index(index: usize) -> impl Predicate<str> {
    predicate::str::contains(format!("[{index}]"))
}
