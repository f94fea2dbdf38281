use crate::core::error::CommandError;
use crate::core::unique_list::UniqueItem;
use crate::model::student::Student;
use crate::model::values::{Attendance, Participation, ScoreMode};

/// Per-lesson record of one student's attendance and participation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentInfo {
    student: Student,
    attendance: Attendance,
    participation: Participation,
}

impl StudentInfo {
    pub fn new(student: Student, attendance: Attendance, participation: Participation) -> Self {
        Self {
            student,
            attendance,
            participation,
        }
    }

    /// Absent, unflagged, score 0
    pub fn fresh(student: Student) -> Self {
        Self::new(student, Attendance::default(), Participation::default())
    }

    pub fn student(&self) -> &Student {
        &self.student
    }

    pub fn attendance(&self) -> Attendance {
        self.attendance
    }

    pub fn participation(&self) -> Participation {
        self.participation
    }

    pub fn mark_present(&mut self, present: bool) {
        self.attendance = self.attendance.with_presence(present);
    }

    pub fn set_flag(&mut self, flagged: bool) {
        self.attendance = self.attendance.with_flag(flagged);
    }

    pub fn update_participation(&mut self, mode: ScoreMode, amount: u8) -> Result<(), CommandError> {
        self.participation = self.participation.apply(mode, amount)?;
        Ok(())
    }
}

impl UniqueItem for StudentInfo {
    fn is_same(&self, other: &Self) -> bool {
        self.student == other.student
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> StudentInfo {
        StudentInfo::fresh(Student::new(
            "Alice".parse().unwrap(),
            "A0000001A".parse().unwrap(),
        ))
    }

    #[test]
    fn test_fresh_defaults() {
        let info = info();
        assert!(!info.attendance().present);
        assert!(!info.attendance().flagged);
        assert_eq!(info.participation().score(), 0);
    }

    #[test]
    fn test_failed_score_update_keeps_score() {
        let mut info = info();
        info.update_participation(ScoreMode::Add, 3).unwrap();
        assert!(info.update_participation(ScoreMode::Add, 3).is_err());
        assert_eq!(info.participation().score(), 3);
    }

    #[test]
    fn test_identity_ignores_attendance() {
        let mut marked = info();
        marked.mark_present(true);
        assert!(marked.is_same(&info()));
        assert_ne!(marked, info());
    }
}
