use crate::core::error::CommandError;
use crate::core::unique_list::{UniqueItem, UniqueList};
use crate::model::lesson::Lesson;
use crate::model::student::Student;
use crate::model::student_info::StudentInfo;
use crate::model::values::{GroupName, LessonName};
use std::fmt;

/// A tutorial group owning its students and lessons.
///
/// Every lesson always lists exactly the group's students. Constructors
/// reject input that breaks this and the mutators keep it.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    name: GroupName,
    students: UniqueList<Student>,
    lessons: UniqueList<Lesson>,
}

impl Group {
    pub fn new(name: GroupName, students: Vec<Student>, lessons: Vec<Lesson>) -> Result<Self, CommandError> {
        let mut students = UniqueList::from_vec(students)?;
        students.sort_by(Student::by_name);
        let mut lessons = UniqueList::from_vec(lessons)?;
        lessons.sort_by(|l, r| l.name().cmp(&r.name()));

        if let Some(lesson) = lessons.iter().find(|lesson| !lesson.covers_exactly(students.iter())) {
            return Err(CommandError::LessonRosterMismatch {
                lesson: lesson.name().to_string(),
            });
        }

        Ok(Self {
            name,
            students,
            lessons,
        })
    }

    /// Build a group where every lesson starts from the same records
    pub fn from_records(
        name: GroupName,
        students: Vec<Student>,
        lesson_names: Vec<LessonName>,
        student_infos: Vec<StudentInfo>,
    ) -> Result<Self, CommandError> {
        let lessons = lesson_names
            .into_iter()
            .map(|lesson| Lesson::new(lesson, student_infos.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(name, students, lessons)
    }

    pub fn name(&self) -> &GroupName {
        &self.name
    }

    pub fn students(&self) -> &UniqueList<Student> {
        &self.students
    }

    pub fn lessons(&self) -> &UniqueList<Lesson> {
        &self.lessons
    }

    pub fn lesson(&self, name: LessonName) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| lesson.name() == name)
    }

    pub fn has_student(&self, student: &Student) -> bool {
        self.students.contains(student)
    }

    /// Add a student along with a fresh record in every lesson
    pub(crate) fn add_student(&mut self, student: Student) -> Result<(), CommandError> {
        self.students.add(student.clone())?;
        self.students.sort_by(Student::by_name);
        for index in 0..self.lessons.len() {
            let mut lesson = self.lesson_at(index)?;
            lesson.add_student(student.clone())?;
            self.lessons.replace_at(index, lesson)?;
        }
        Ok(())
    }

    pub(crate) fn remove_student(&mut self, student: &Student) -> Result<(), CommandError> {
        self.students.remove(student)?;
        for index in 0..self.lessons.len() {
            let mut lesson = self.lesson_at(index)?;
            lesson.remove_student(student)?;
            self.lessons.replace_at(index, lesson)?;
        }
        Ok(())
    }

    pub(crate) fn remove_lesson(&mut self, name: LessonName) -> Result<Lesson, CommandError> {
        let position = self
            .lessons
            .iter()
            .position(|lesson| lesson.name() == name)
            .ok_or_else(|| CommandError::lesson_not_found(&self.name, name))?;
        self.lessons
            .remove_at(position)
            .ok_or_else(|| CommandError::lesson_not_found(&self.name, name))
    }

    /// Replace a lesson by an edited copy produced by `edit`
    pub(crate) fn update_lesson<F>(&mut self, name: LessonName, edit: F) -> Result<(), CommandError>
    where
        F: FnOnce(&mut Lesson) -> Result<(), CommandError>,
    {
        let position = self
            .lessons
            .iter()
            .position(|lesson| lesson.name() == name)
            .ok_or_else(|| CommandError::lesson_not_found(&self.name, name))?;
        let mut lesson = self.lesson_at(position)?;
        edit(&mut lesson)?;
        self.lessons.replace_at(position, lesson)?;
        Ok(())
    }

    fn lesson_at(&self, index: usize) -> Result<Lesson, CommandError> {
        self.lessons
            .get(index)
            .cloned()
            .ok_or(CommandError::ElementNotFound)
    }
}

impl UniqueItem for Group {
    fn is_same(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Group {}", self.name)
    }
}
