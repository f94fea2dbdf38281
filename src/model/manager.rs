//! The [`Model`] facade: single entry point for commands and the UI.
//!
//! The model owns the aggregate root, the question list, user preferences,
//! the roster adapter and four filtered projections. Each projection has its
//! own [`Notifier`]; a successful mutation notifies every projection it
//! touched exactly once, and a failed one notifies nobody.
//!
//! Selection follows the projections: the *selected group* is the only group
//! left in the group projection, and the *selected lesson* is the only lesson
//! left in the lesson projection. Lesson-level commands act on that selection
//! unless they name a group and lesson explicitly, in which case the
//! projections move to the named lesson once the command succeeds.

use crate::core::error::{CommandError, Result};
use crate::core::observable::{ListChange, Listener, Notifier, SubscriptionId};
use crate::core::unique_list::UniqueList;
use crate::model::filters::{GroupFilter, LessonFilter, QuestionFilter, StudentInfoFilter};
use crate::model::group::Group;
use crate::model::index::GroupLessonKey;
use crate::model::lesson::Lesson;
use crate::model::question::Question;
use crate::model::serenity::Serenity;
use crate::model::student::Student;
use crate::model::student_info::StudentInfo;
use crate::model::user_prefs::UserPrefs;
use crate::model::values::{GroupName, LessonName, QuestionText, ScoreMode};
use crate::roster::{Roster, RosterAdapter, Sheet};
use log::debug;
use std::path::PathBuf;

/// The observable projections exposed to the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Groups,
    Lessons,
    StudentInfos,
    Questions,
}

/// Which students of a lesson a command acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentSelector {
    /// The student matching both name and number
    Student(Student),
    /// 1-based position in the student-info projection
    Index(usize),
    All,
}

/// Lesson named on the command line; missing parts come from the selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonTarget {
    pub group: Option<GroupName>,
    pub lesson: Option<LessonName>,
}

impl LessonTarget {
    pub fn selected() -> Self {
        Self::default()
    }

    pub fn explicit(group: GroupName, lesson: LessonName) -> Self {
        Self {
            group: Some(group),
            lesson: Some(lesson),
        }
    }

    fn is_explicit(&self) -> bool {
        self.group.is_some() || self.lesson.is_some()
    }
}

#[derive(Default)]
struct Views {
    groups: Notifier,
    lessons: Notifier,
    student_infos: Notifier,
    questions: Notifier,
}

impl Views {
    fn notifier_mut(&mut self, view: View) -> &mut Notifier {
        match view {
            View::Groups => &mut self.groups,
            View::Lessons => &mut self.lessons,
            View::StudentInfos => &mut self.student_infos,
            View::Questions => &mut self.questions,
        }
    }

    fn notify(&self, view: View) {
        let notifier = match view {
            View::Groups => &self.groups,
            View::Lessons => &self.lessons,
            View::StudentInfos => &self.student_infos,
            View::Questions => &self.questions,
        };
        notifier.notify(ListChange::Reset);
    }
}

const TABLE_VIEWS: [View; 3] = [View::Groups, View::Lessons, View::StudentInfos];

pub struct Model {
    serenity: Serenity,
    questions: UniqueList<Question>,
    user_prefs: UserPrefs,
    roster: Box<dyn RosterAdapter>,
    group_filter: GroupFilter,
    lesson_filter: LessonFilter,
    student_info_filter: StudentInfoFilter,
    question_filter: QuestionFilter,
    views: Views,
}

impl Model {
    pub fn new(
        serenity: Serenity,
        questions: UniqueList<Question>,
        user_prefs: UserPrefs,
        roster: Box<dyn RosterAdapter>,
    ) -> Self {
        Self {
            serenity,
            questions,
            user_prefs,
            roster,
            group_filter: GroupFilter::All,
            lesson_filter: LessonFilter::All,
            student_info_filter: StudentInfoFilter::All,
            question_filter: QuestionFilter::All,
            views: Views::default(),
        }
    }

    /// A model with no groups and no questions
    pub fn empty(roster: Box<dyn RosterAdapter>) -> Self {
        Self::new(Serenity::new(), UniqueList::new(), UserPrefs::default(), roster)
    }

    // --- read access ---

    pub fn serenity(&self) -> &Serenity {
        &self.serenity
    }

    pub fn questions(&self) -> &UniqueList<Question> {
        &self.questions
    }

    pub fn user_prefs(&self) -> &UserPrefs {
        &self.user_prefs
    }

    pub fn set_user_prefs(&mut self, user_prefs: UserPrefs) {
        self.user_prefs = user_prefs;
    }

    pub fn has_group_name(&self, name: &GroupName) -> bool {
        self.serenity.has_group_name(name)
    }

    // --- projections ---

    pub fn filtered_groups(&self) -> Vec<&Group> {
        self.serenity
            .groups()
            .iter()
            .filter(|group| self.group_filter.matches(group))
            .collect()
    }

    pub fn selected_group(&self) -> Option<&Group> {
        match self.filtered_groups().as_slice() {
            [group] => Some(*group),
            _ => None,
        }
    }

    pub fn filtered_lessons(&self) -> Vec<&Lesson> {
        self.selected_group()
            .map(|group| {
                group
                    .lessons()
                    .iter()
                    .filter(|lesson| self.lesson_filter.matches(lesson))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn selected_lesson(&self) -> Option<&Lesson> {
        match self.filtered_lessons().as_slice() {
            [lesson] => Some(*lesson),
            _ => None,
        }
    }

    /// Records of the selected lesson, read through the index
    pub fn filtered_student_infos(&self) -> Vec<&StudentInfo> {
        let Some(key) = self.selected_key() else {
            return Vec::new();
        };
        self.visible_student_infos(&key)
    }

    fn visible_student_infos(&self, key: &GroupLessonKey) -> Vec<&StudentInfo> {
        self.serenity
            .student_infos(key)
            .map(|infos| {
                infos
                    .iter()
                    .filter(|info| self.student_info_filter.matches(info))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn filtered_questions(&self) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|question| self.question_filter.matches(question))
            .collect()
    }

    fn selected_key(&self) -> Option<GroupLessonKey> {
        let group = self.selected_group()?;
        let lesson = self.selected_lesson()?;
        Some(GroupLessonKey::new(group.name().clone(), lesson.name()))
    }

    // --- observers ---

    pub fn subscribe(&mut self, view: View, listener: Listener) -> SubscriptionId {
        self.views.notifier_mut(view).subscribe(listener)
    }

    pub fn unsubscribe(&mut self, view: View, id: SubscriptionId) -> bool {
        self.views.notifier_mut(view).unsubscribe(id)
    }

    fn refresh(&self, views: &[View]) {
        for view in views {
            self.views.notify(*view);
        }
    }

    // --- filters ---

    /// Changing the group filter also clears the lesson and student filters
    pub fn update_filtered_groups(&mut self, filter: GroupFilter) {
        debug!("Group filter set to {filter:?}");
        self.group_filter = filter;
        self.lesson_filter = LessonFilter::All;
        self.student_info_filter = StudentInfoFilter::All;
        self.refresh(&TABLE_VIEWS);
    }

    pub fn update_filtered_lessons(&mut self, filter: LessonFilter) {
        debug!("Lesson filter set to {filter:?}");
        self.lesson_filter = filter;
        self.refresh(&[View::Lessons, View::StudentInfos]);
    }

    pub fn update_filtered_student_infos(&mut self, filter: StudentInfoFilter) {
        debug!("Student filter set to {filter:?}");
        self.student_info_filter = filter;
        self.refresh(&[View::StudentInfos]);
    }

    pub fn update_filtered_questions(&mut self, filter: QuestionFilter) {
        debug!("Question filter set to {filter:?}");
        self.question_filter = filter;
        self.refresh(&[View::Questions]);
    }

    // --- groups and students ---

    pub fn import_roster(&self, location: &str) -> Result<Roster> {
        Ok(self.roster.import(location)?)
    }

    /// Add `group` and select it
    pub fn add_group(&mut self, group: Group) -> Result<()> {
        let name = group.name().clone();
        self.serenity.add_group(group)?;
        self.group_filter = GroupFilter::NameIs(name);
        self.lesson_filter = LessonFilter::All;
        self.student_info_filter = StudentInfoFilter::All;
        self.refresh(&TABLE_VIEWS);
        Ok(())
    }

    /// Remove a group with its lessons. Its questions stay.
    pub fn delete_group(&mut self, name: &GroupName) -> Result<Group> {
        let removed = self.serenity.delete_group(name)?;
        self.group_filter = GroupFilter::All;
        self.lesson_filter = LessonFilter::All;
        self.student_info_filter = StudentInfoFilter::All;
        self.refresh(&TABLE_VIEWS);
        Ok(removed)
    }

    pub fn add_student_to_group(&mut self, student: Student, group: &GroupName) -> Result<()> {
        self.serenity.add_student(group, student)?;
        self.refresh(&TABLE_VIEWS);
        Ok(())
    }

    pub fn remove_student_from_group(&mut self, student: &Student, group: &GroupName) -> Result<Student> {
        let removed = self.serenity.remove_student(group, student)?;
        self.refresh(&TABLE_VIEWS);
        Ok(removed)
    }

    pub fn delete_lesson(&mut self, group: &GroupName, lesson: LessonName) -> Result<Lesson> {
        let removed = self.serenity.delete_lesson(group, lesson)?;
        if self.lesson_filter == LessonFilter::NameIs(lesson) {
            self.lesson_filter = LessonFilter::All;
        }
        self.refresh(&TABLE_VIEWS);
        Ok(removed)
    }

    // --- lesson records ---

    /// Resolve a target to an existing (group, lesson) pair
    pub fn resolve_lesson(&self, target: &LessonTarget) -> Result<GroupLessonKey> {
        let group = match &target.group {
            Some(name) => self
                .serenity
                .group(name)
                .ok_or_else(|| CommandError::group_not_found(name))?,
            None => self.selected_group().ok_or(CommandError::NoGroupSelected)?,
        };

        let lesson = match target.lesson {
            Some(name) => name,
            None => {
                let selected = self
                    .selected_lesson()
                    .filter(|_| self.selected_group().is_some_and(|g| g.name() == group.name()))
                    .ok_or(CommandError::NoLessonSelected)?;
                selected.name()
            }
        };

        if group.lesson(lesson).is_none() {
            return Err(CommandError::lesson_not_found(group.name(), lesson).into());
        }
        Ok(GroupLessonKey::new(group.name().clone(), lesson))
    }

    /// Select a lesson: its group and its records become the projections
    pub fn select_lesson(&mut self, key: &GroupLessonKey) {
        self.group_filter = GroupFilter::NameIs(key.group.clone());
        self.lesson_filter = LessonFilter::NameIs(key.lesson);
        self.student_info_filter = StudentInfoFilter::All;
        self.question_filter = QuestionFilter::InLesson(key.group.clone(), key.lesson);
        self.refresh(&[View::Groups, View::Lessons, View::StudentInfos, View::Questions]);
    }

    /// Move the group and lesson projections to `key`
    fn focus(&mut self, key: &GroupLessonKey) {
        self.group_filter = GroupFilter::NameIs(key.group.clone());
        self.lesson_filter = LessonFilter::NameIs(key.lesson);
        self.refresh(&TABLE_VIEWS);
    }

    pub fn mark_attendance(
        &mut self,
        target: &LessonTarget,
        selector: &StudentSelector,
        present: bool,
    ) -> Result<Vec<StudentInfo>> {
        self.update_student_infos(target, selector, |info| {
            info.mark_present(present);
            Ok(())
        })
    }

    pub fn set_flag(
        &mut self,
        target: &LessonTarget,
        selector: &StudentSelector,
        flagged: bool,
    ) -> Result<Vec<StudentInfo>> {
        self.update_student_infos(target, selector, |info| {
            info.set_flag(flagged);
            Ok(())
        })
    }

    pub fn update_participation(
        &mut self,
        target: &LessonTarget,
        selector: &StudentSelector,
        mode: ScoreMode,
        amount: u8,
    ) -> Result<Vec<StudentInfo>> {
        self.update_student_infos(target, selector, |info| info.update_participation(mode, amount))
    }

    /// Apply `edit` to every selected record of the target lesson, all or
    /// nothing, and return the updated records.
    fn update_student_infos<F>(
        &mut self,
        target: &LessonTarget,
        selector: &StudentSelector,
        edit: F,
    ) -> Result<Vec<StudentInfo>>
    where
        F: FnMut(&mut StudentInfo) -> std::result::Result<(), CommandError>,
    {
        let key = self.resolve_lesson(target)?;
        let students = self.select_students(&key, selector)?;

        self.serenity
            .update_lesson(&key, |lesson| lesson.update_infos(&students, edit))?;

        if target.is_explicit() {
            self.focus(&key);
        } else {
            self.refresh(&[View::Lessons, View::StudentInfos]);
        }

        let updated = self
            .serenity
            .student_infos(&key)
            .map(|infos| {
                infos
                    .iter()
                    .filter(|info| students.contains(info.student()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(updated)
    }

    fn select_students(&self, key: &GroupLessonKey, selector: &StudentSelector) -> Result<Vec<Student>> {
        let candidates = self.visible_student_infos(key);

        let students = match selector {
            StudentSelector::Student(wanted) => {
                let info = candidates
                    .iter()
                    .find(|info| info.student().matches(wanted))
                    .ok_or_else(|| CommandError::student_not_found(wanted, &key.group))?;
                vec![info.student().clone()]
            }
            StudentSelector::Index(index) => {
                let info = index
                    .checked_sub(1)
                    .and_then(|position| candidates.get(position))
                    .ok_or_else(|| CommandError::index_out_of_range(*index, candidates.len()))?;
                vec![info.student().clone()]
            }
            StudentSelector::All => {
                if candidates.is_empty() {
                    return Err(CommandError::EmptyProjection.into());
                }
                candidates.iter().map(|info| info.student().clone()).collect()
            }
        };
        Ok(students)
    }

    // --- questions ---

    /// Log a question against the target lesson
    pub fn add_question_to(&mut self, target: &LessonTarget, text: QuestionText) -> Result<Question> {
        let key = self.resolve_lesson(target)?;
        let question = Question::new(key.group.clone(), key.lesson, text);
        self.add_question(question.clone())?;
        if target.is_explicit() {
            self.focus(&key);
        }
        Ok(question)
    }

    pub fn add_question(&mut self, question: Question) -> Result<()> {
        if self.questions.contains(&question) {
            return Err(CommandError::DuplicateQuestion {
                text: question.text.to_string(),
            }
            .into());
        }
        self.questions.add(question)?;
        self.refresh(&[View::Questions]);
        Ok(())
    }

    /// Delete the question at 1-based `index` of the question projection
    pub fn delete_question(&mut self, index: usize) -> Result<Question> {
        let target = self.question_at(index)?;
        let removed = self.questions.remove(&target)?;
        self.refresh(&[View::Questions]);
        Ok(removed)
    }

    /// Replace the text of the question at 1-based `index`; returns the
    /// question before and after the edit
    pub fn edit_question(&mut self, index: usize, text: QuestionText) -> Result<(Question, Question)> {
        let target = self.question_at(index)?;
        let edited = target.with_text(text);
        if edited != target && self.questions.contains(&edited) {
            return Err(CommandError::DuplicateQuestion {
                text: edited.text.to_string(),
            }
            .into());
        }
        self.questions.replace(&target, edited.clone())?;
        self.refresh(&[View::Questions]);
        Ok((target, edited))
    }

    fn question_at(&self, index: usize) -> Result<Question> {
        let filtered = self.filtered_questions();
        index
            .checked_sub(1)
            .and_then(|position| filtered.get(position))
            .map(|question| (*question).clone())
            .ok_or_else(|| CommandError::index_out_of_range(index, filtered.len()).into())
    }

    // --- export ---

    pub fn export_attendance(&self, group: &GroupName) -> Result<PathBuf> {
        let group = self
            .serenity
            .group(group)
            .ok_or_else(|| CommandError::group_not_found(group))?;
        Ok(self.roster.export(&Sheet::attendance(group))?)
    }

    pub fn export_participation(&self, group: &GroupName) -> Result<PathBuf> {
        let group = self
            .serenity
            .group(group)
            .ok_or_else(|| CommandError::group_not_found(group))?;
        Ok(self.roster.export(&Sheet::participation(group))?)
    }
}
