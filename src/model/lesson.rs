use crate::core::error::CommandError;
use crate::core::unique_list::{UniqueItem, UniqueList};
use crate::model::student::Student;
use crate::model::student_info::StudentInfo;
use crate::model::values::{LessonName, StudentName, StudentNumber};
use std::collections::HashMap;

/// One meeting of a group with a record per student
#[derive(Debug, Clone, PartialEq)]
pub struct Lesson {
    name: LessonName,
    student_infos: UniqueList<StudentInfo>,
}

impl Lesson {
    /// Build a lesson from existing records, sorted by student name
    pub fn new(name: LessonName, student_infos: Vec<StudentInfo>) -> Result<Self, CommandError> {
        let mut student_infos = UniqueList::from_vec(student_infos)?;
        student_infos.sort_by(|l, r| Student::by_name(l.student(), r.student()));
        Ok(Self {
            name,
            student_infos,
        })
    }

    pub fn name(&self) -> LessonName {
        self.name
    }

    pub fn student_infos(&self) -> &UniqueList<StudentInfo> {
        &self.student_infos
    }

    /// True when the lesson lists exactly `students`, each under the same
    /// name as in `students`
    pub fn covers_exactly<'a>(&self, students: impl IntoIterator<Item = &'a Student>) -> bool {
        let expected: HashMap<&StudentNumber, &StudentName> = students
            .into_iter()
            .map(|student| (student.number(), student.name()))
            .collect();
        self.student_infos.len() == expected.len()
            && self.student_infos.iter().all(|info| {
                let listed = info.student();
                expected.get(listed.number()) == Some(&listed.name())
            })
    }

    pub(crate) fn add_student(&mut self, student: Student) -> Result<(), CommandError> {
        self.student_infos.add(StudentInfo::fresh(student))?;
        self.student_infos
            .sort_by(|l, r| Student::by_name(l.student(), r.student()));
        Ok(())
    }

    pub(crate) fn remove_student(&mut self, student: &Student) -> Result<(), CommandError> {
        let position = self
            .student_infos
            .iter()
            .position(|info| info.student() == student)
            .ok_or(CommandError::ElementNotFound)?;
        self.student_infos.remove_at(position);
        Ok(())
    }

    /// Apply `edit` to the records of `targets`, all or nothing
    pub(crate) fn update_infos<F>(&mut self, targets: &[Student], mut edit: F) -> Result<(), CommandError>
    where
        F: FnMut(&mut StudentInfo) -> Result<(), CommandError>,
    {
        let mut edited = self.student_infos.clone();
        for target in targets {
            let position = edited
                .iter()
                .position(|info| info.student() == target)
                .ok_or(CommandError::ElementNotFound)?;
            let mut info = edited
                .get(position)
                .cloned()
                .ok_or(CommandError::ElementNotFound)?;
            edit(&mut info)?;
            edited.replace_at(position, info)?;
        }
        self.student_infos = edited;
        Ok(())
    }
}

impl UniqueItem for Lesson {
    fn is_same(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::values::ScoreMode;

    fn student(name: &str, number: &str) -> Student {
        Student::new(name.parse().unwrap(), number.parse().unwrap())
    }

    fn lesson() -> Lesson {
        let infos = [student("Bob", "A0000002B"), student("Alice", "A0000001A")]
            .into_iter()
            .map(StudentInfo::fresh)
            .collect();
        Lesson::new("1-1".parse().unwrap(), infos).unwrap()
    }

    #[test]
    fn test_records_sorted_by_name() {
        let names: Vec<_> = lesson()
            .student_infos()
            .iter()
            .map(|info| info.student().name().to_string())
            .collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_covers_exactly() {
        let lesson = lesson();
        let alice = student("Alice", "A0000001A");
        let bob = student("Bob", "A0000002B");
        assert!(lesson.covers_exactly([&bob, &alice]));
        assert!(!lesson.covers_exactly([&alice]));

        let renamed = student("Bobby", "A0000002B");
        assert!(!lesson.covers_exactly([&renamed, &alice]));
        let recased = student("alice", "A0000001A");
        assert!(!lesson.covers_exactly([&bob, &recased]));
    }

    #[test]
    fn test_update_infos_is_all_or_nothing() {
        let mut lesson = lesson();
        let alice = student("Alice", "A0000001A");
        let bob = student("Bob", "A0000002B");
        lesson
            .update_infos(&[alice.clone()], |info| info.update_participation(ScoreMode::Set, 5))
            .unwrap();

        let result = lesson.update_infos(&[bob, alice], |info| {
            info.update_participation(ScoreMode::Add, 1)
        });
        assert_eq!(result, Err(CommandError::ScoreOutOfRange { attempted: 6 }));
        let scores: Vec<_> = lesson
            .student_infos()
            .iter()
            .map(|info| info.participation().score())
            .collect();
        assert_eq!(scores, vec![5, 0]);
    }

    #[test]
    fn test_add_and_remove_student() {
        let mut lesson = lesson();
        let carol = student("Carol", "A0000003C");
        lesson.add_student(carol.clone()).unwrap();
        assert_eq!(lesson.student_infos().len(), 3);
        assert_eq!(lesson.add_student(carol.clone()), Err(CommandError::DuplicateElement));
        lesson.remove_student(&carol).unwrap();
        assert_eq!(lesson.remove_student(&carol), Err(CommandError::ElementNotFound));
    }
}
