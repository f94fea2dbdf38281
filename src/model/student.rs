use crate::core::unique_list::UniqueItem;
use crate::model::values::{StudentName, StudentNumber};
use std::cmp::Ordering;
use std::fmt;

/// A student of exactly one tutorial group.
///
/// Two students are equal when their student numbers are equal; the name is
/// informational.
#[derive(Debug, Clone, Eq)]
pub struct Student {
    name: StudentName,
    number: StudentNumber,
}

impl Student {
    pub fn new(name: StudentName, number: StudentNumber) -> Self {
        Self { name, number }
    }

    pub fn name(&self) -> &StudentName {
        &self.name
    }

    pub fn number(&self) -> &StudentNumber {
        &self.number
    }

    /// True when both the number and the name (ignoring case) match
    pub fn matches(&self, other: &Student) -> bool {
        self.number == other.number && self.name.matches(&other.name)
    }

    /// Ordering used for every student listing: by name, then number
    pub fn by_name(left: &Student, right: &Student) -> Ordering {
        left.name
            .as_str()
            .to_lowercase()
            .cmp(&right.name.as_str().to_lowercase())
            .then_with(|| left.number.cmp(&right.number))
    }
}

impl PartialEq for Student {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl std::hash::Hash for Student {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.number.hash(state);
    }
}

impl UniqueItem for Student {
    fn is_same(&self, other: &Self) -> bool {
        self == other
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.number)
    }
}
