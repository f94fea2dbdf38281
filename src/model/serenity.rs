//! Aggregate root holding every group and the student record index.
//!
//! All changes to a group go through [`Serenity::update_group`], which edits
//! a copy and only commits it (and re-syncs the index) when the edit
//! succeeded. A failed command therefore never leaves a half-updated group
//! behind.

use crate::core::error::CommandError;
use crate::core::unique_list::UniqueList;
use crate::model::group::Group;
use crate::model::index::{GroupLessonKey, StudentInfoIndex};
use crate::model::lesson::Lesson;
use crate::model::student::Student;
use crate::model::student_info::StudentInfo;
use crate::model::values::{GroupName, LessonName};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Serenity {
    groups: UniqueList<Group>,
    index: StudentInfoIndex,
}

impl Serenity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the aggregate from stored groups, enforcing cross-group rules
    pub fn from_groups(groups: Vec<Group>) -> Result<Self, CommandError> {
        let mut serenity = Self::new();
        for group in groups {
            serenity.add_group(group)?;
        }
        Ok(serenity)
    }

    pub fn groups(&self) -> &UniqueList<Group> {
        &self.groups
    }

    pub fn index(&self) -> &StudentInfoIndex {
        &self.index
    }

    pub fn has_group_name(&self, name: &GroupName) -> bool {
        self.group(name).is_some()
    }

    pub fn group(&self, name: &GroupName) -> Option<&Group> {
        self.groups.iter().find(|group| group.name() == name)
    }

    pub fn lesson(&self, key: &GroupLessonKey) -> Option<&Lesson> {
        self.group(&key.group)?.lesson(key.lesson)
    }

    pub fn student_infos(&self, key: &GroupLessonKey) -> Option<&UniqueList<StudentInfo>> {
        self.index.get(key)
    }

    /// The group a student with this number belongs to, if any
    pub fn group_of(&self, student: &Student) -> Option<&Group> {
        self.groups.iter().find(|group| group.has_student(student))
    }

    pub fn add_group(&mut self, group: Group) -> Result<(), CommandError> {
        if self.has_group_name(group.name()) {
            return Err(CommandError::DuplicateGroup {
                name: group.name().to_string(),
            });
        }
        for student in group.students() {
            self.ensure_unassigned(student)?;
        }
        self.index.sync_group(&group);
        self.groups.add(group)?;
        Ok(())
    }

    pub fn delete_group(&mut self, name: &GroupName) -> Result<Group, CommandError> {
        let position = self
            .groups
            .iter()
            .position(|group| group.name() == name)
            .ok_or_else(|| CommandError::group_not_found(name))?;
        let removed = self
            .groups
            .remove_at(position)
            .ok_or_else(|| CommandError::group_not_found(name))?;
        self.index.remove_group(name);
        Ok(removed)
    }

    pub fn add_student(&mut self, group: &GroupName, student: Student) -> Result<(), CommandError> {
        self.ensure_unassigned(&student)?;
        self.update_group(group, |group| group.add_student(student))
    }

    /// Remove the student matching both name and number
    pub fn remove_student(&mut self, group: &GroupName, student: &Student) -> Result<Student, CommandError> {
        let existing = self
            .group(group)
            .ok_or_else(|| CommandError::group_not_found(group))?
            .students()
            .iter()
            .find(|candidate| candidate.matches(student))
            .cloned()
            .ok_or_else(|| CommandError::student_not_found(student, group))?;
        self.update_group(group, |group| group.remove_student(&existing))?;
        Ok(existing)
    }

    pub fn delete_lesson(&mut self, group: &GroupName, lesson: LessonName) -> Result<Lesson, CommandError> {
        let mut removed = None;
        self.update_group(group, |group| {
            removed = Some(group.remove_lesson(lesson)?);
            Ok(())
        })?;
        removed.ok_or_else(|| CommandError::lesson_not_found(group, lesson))
    }

    /// Edit the student records of one lesson in place
    pub fn update_lesson<F>(&mut self, key: &GroupLessonKey, edit: F) -> Result<(), CommandError>
    where
        F: FnOnce(&mut Lesson) -> Result<(), CommandError>,
    {
        self.update_group(&key.group, |group| group.update_lesson(key.lesson, edit))
    }

    fn update_group<F>(&mut self, name: &GroupName, edit: F) -> Result<(), CommandError>
    where
        F: FnOnce(&mut Group) -> Result<(), CommandError>,
    {
        let position = self
            .groups
            .iter()
            .position(|group| group.name() == name)
            .ok_or_else(|| CommandError::group_not_found(name))?;
        let mut edited = self
            .groups
            .get(position)
            .cloned()
            .ok_or_else(|| CommandError::group_not_found(name))?;
        edit(&mut edited)?;
        self.index.sync_group(&edited);
        self.groups.replace_at(position, edited)?;
        Ok(())
    }

    fn ensure_unassigned(&self, student: &Student) -> Result<(), CommandError> {
        match self.group_of(student) {
            Some(owner) => Err(CommandError::DuplicateStudentAcrossGroups {
                student: student.to_string(),
                group: owner.name().to_string(),
            }),
            None => Ok(()),
        }
    }
}
