//! Denormalized lookup from (group, lesson) to that lesson's student records.
//!
//! The owning [`Lesson`](crate::model::lesson::Lesson) is authoritative. The
//! index is rebuilt for a whole group after every change to that group, so
//! it holds an entry for every lesson of every group and nothing else.

use crate::core::unique_list::UniqueList;
use crate::model::group::Group;
use crate::model::student_info::StudentInfo;
use crate::model::values::{GroupName, LessonName};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupLessonKey {
    pub group: GroupName,
    pub lesson: LessonName,
}

impl GroupLessonKey {
    pub fn new(group: GroupName, lesson: LessonName) -> Self {
        Self { group, lesson }
    }
}

impl fmt::Display for GroupLessonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.group, self.lesson)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentInfoIndex {
    entries: HashMap<GroupLessonKey, UniqueList<StudentInfo>>,
}

impl StudentInfoIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &GroupLessonKey) -> Option<&UniqueList<StudentInfo>> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every entry of `group` with its current lessons
    pub fn sync_group(&mut self, group: &Group) {
        self.remove_group(group.name());
        for lesson in group.lessons() {
            self.entries.insert(
                GroupLessonKey::new(group.name().clone(), lesson.name()),
                lesson.student_infos().clone(),
            );
        }
    }

    pub fn remove_group(&mut self, name: &GroupName) {
        self.entries.retain(|key, _| key.group != *name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::student::Student;

    fn group(name: &str, lessons: &[&str]) -> Group {
        let students = vec![Student::new("Alice".parse().unwrap(), "A0000001A".parse().unwrap())];
        let infos = students.iter().cloned().map(StudentInfo::fresh).collect();
        Group::from_records(
            name.parse().unwrap(),
            students,
            lessons.iter().map(|l| l.parse().unwrap()).collect(),
            infos,
        )
        .unwrap()
    }

    #[test]
    fn test_sync_group_replaces_entries() {
        let mut index = StudentInfoIndex::new();
        index.sync_group(&group("G01", &["1-1", "1-2"]));
        assert_eq!(index.len(), 2);

        index.sync_group(&group("g01", &["2-1"]));
        assert_eq!(index.len(), 1);
        let key = GroupLessonKey::new("G01".parse().unwrap(), "2-1".parse().unwrap());
        assert_eq!(index.get(&key).map(UniqueList::len), Some(1));
    }

    #[test]
    fn test_remove_group_only_touches_that_group() {
        let mut index = StudentInfoIndex::new();
        index.sync_group(&group("G01", &["1-1"]));
        index.sync_group(&group("G02", &["1-1", "1-2"]));

        index.remove_group(&"G01".parse().unwrap());
        assert_eq!(index.len(), 2);
        let key = |group: &str, lesson: &str| GroupLessonKey::new(group.parse().unwrap(), lesson.parse().unwrap());
        assert!(index.get(&key("G01", "1-1")).is_none());
        assert!(index.get(&key("G02", "1-1")).is_some());
        assert!(index.get(&key("G02", "1-2")).is_some());
    }
}
