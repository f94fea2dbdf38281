//! In-memory domain model: value types, aggregates, the student record index
//! and the [`Model`] facade with its filtered projections.

pub mod filters;
pub mod group;
pub mod index;
pub mod lesson;
pub mod manager;
pub mod question;
pub mod serenity;
pub mod student;
pub mod student_info;
pub mod user_prefs;
pub mod values;

pub use filters::{GroupFilter, LessonFilter, QuestionFilter, StudentInfoFilter};
pub use group::Group;
pub use index::{GroupLessonKey, StudentInfoIndex};
pub use lesson::Lesson;
pub use manager::{LessonTarget, Model, StudentSelector, View};
pub use question::Question;
pub use serenity::Serenity;
pub use student::Student;
pub use student_info::StudentInfo;
pub use user_prefs::{GuiSettings, UserPrefs};
pub use values::{
    Attendance, GroupName, LessonName, Participation, QuestionText, ScoreMode, StudentName,
    StudentNumber,
};
