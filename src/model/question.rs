use crate::core::unique_list::UniqueItem;
use crate::model::values::{GroupName, LessonName, QuestionText};
use std::fmt;

/// A question asked during a lesson.
///
/// Group and lesson are referenced by name only, so a question outlives the
/// deletion of its group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub group: GroupName,
    pub lesson: LessonName,
    pub text: QuestionText,
}

impl Question {
    pub fn new(group: GroupName, lesson: LessonName, text: QuestionText) -> Self {
        Self {
            group,
            lesson,
            text,
        }
    }

    pub fn with_text(&self, text: QuestionText) -> Self {
        Self {
            text,
            ..self.clone()
        }
    }
}

impl UniqueItem for Question {
    fn is_same(&self, other: &Self) -> bool {
        self == other
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}] {}", self.group, self.lesson, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(group: &str, text: &str) -> Question {
        Question::new(group.parse().unwrap(), "1-1".parse().unwrap(), text.parse().unwrap())
    }

    #[test]
    fn test_identity_is_full_triple() {
        assert!(question("G01", "Why?").is_same(&question("g01", "Why?")));
        assert!(!question("G01", "Why?").is_same(&question("G02", "Why?")));
        assert!(!question("G01", "Why?").is_same(&question("G01", "How?")));
    }

    #[test]
    fn test_display() {
        assert_eq!(question("G01", "Why?").to_string(), "[G01 1-1] Why?");
    }
}
