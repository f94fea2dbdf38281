//! Predicates behind the four filtered projections of the model.
//!
//! Filters are plain data so that commands can build them, tests can compare
//! them and the model can swap them without boxing closures.

use crate::model::group::Group;
use crate::model::lesson::Lesson;
use crate::model::question::Question;
use crate::model::student::Student;
use crate::model::student_info::StudentInfo;
use crate::model::values::{GroupName, LessonName};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GroupFilter {
    #[default]
    All,
    NameIs(GroupName),
}

impl GroupFilter {
    pub fn matches(&self, group: &Group) -> bool {
        match self {
            Self::All => true,
            Self::NameIs(name) => group.name() == name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LessonFilter {
    #[default]
    All,
    NameIs(LessonName),
}

impl LessonFilter {
    pub fn matches(&self, lesson: &Lesson) -> bool {
        match self {
            Self::All => true,
            Self::NameIs(name) => lesson.name() == *name,
        }
    }
}

/// Narrows the records of the selected lesson
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StudentInfoFilter {
    #[default]
    All,
    /// Only the record of the student matching name and number
    StudentIs(Student),
}

impl StudentInfoFilter {
    pub fn matches(&self, info: &StudentInfo) -> bool {
        match self {
            Self::All => true,
            Self::StudentIs(student) => info.student().matches(student),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QuestionFilter {
    #[default]
    All,
    /// Text contains any of the keywords, ignoring case
    Keywords(Vec<String>),
    InLesson(GroupName, LessonName),
}

impl QuestionFilter {
    pub fn matches(&self, question: &Question) -> bool {
        match self {
            Self::All => true,
            Self::Keywords(keywords) => question.text.contains_any(keywords),
            Self::InLesson(group, lesson) => question.group == *group && question.lesson == *lesson,
        }
    }
}
