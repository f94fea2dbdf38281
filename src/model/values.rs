//! Validated primitives shared by the model, the parser and storage.
//!
//! Every type here can only be built through its validator, so holding a
//! value is proof that it is well formed. Validators return
//! [`ValidationError`], which the parser turns into a usage error and storage
//! turns into an invalid-data error.

use crate::core::error::{CommandError, ValidationError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

pub const MAX_PARTICIPATION: u8 = 5;

/// Name of a tutorial group such as `G01`.
///
/// Case is preserved for display; equality and hashing ignore it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupName(String);

impl GroupName {
    pub const FIELD: &'static str = "group name";

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for GroupName {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::new(
                Self::FIELD,
                "must be non-empty and contain only letters and digits",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl PartialEq for GroupName {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for GroupName {}

impl Hash for GroupName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_ascii_lowercase().hash(state);
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudentName(String);

impl StudentName {
    pub const FIELD: &'static str = "student name";

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, other: &StudentName) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl FromStr for StudentName {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_control) {
            return Err(ValidationError::new(
                Self::FIELD,
                "must be non-empty printable text",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for StudentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Matriculation number, `A` followed by eight letters or digits.
///
/// Stored upper-cased so derived equality is case-insensitive on input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudentNumber(String);

impl StudentNumber {
    pub const FIELD: &'static str = "student number";
    const LENGTH: usize = 9;

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for StudentNumber {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let canonical = raw.trim().to_ascii_uppercase();
        let well_formed = canonical.len() == Self::LENGTH
            && canonical.starts_with('A')
            && canonical.chars().all(|c| c.is_ascii_alphanumeric());
        if !well_formed {
            return Err(ValidationError::new(
                Self::FIELD,
                "must be 'A' followed by 8 letters or digits, e.g. A0123456B",
            ));
        }
        Ok(Self(canonical))
    }
}

impl fmt::Display for StudentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A lesson slot written `week-session`, e.g. `3-2`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LessonName {
    week: u32,
    session: u8,
}

impl LessonName {
    pub const FIELD: &'static str = "lesson name";

    pub fn new(week: u32, session: u8) -> Result<Self, ValidationError> {
        if week == 0 || !(1..=2).contains(&session) {
            return Err(Self::invalid());
        }
        Ok(Self { week, session })
    }

    /// Lesson for the roster column `T<n>`: T1 is 1-1, T2 is 1-2, T3 is 2-1
    pub fn from_tutorial_index(n: u32) -> Option<Self> {
        if n == 0 {
            return None;
        }
        let session = u8::try_from((n - 1) % 2 + 1).ok()?;
        Some(Self {
            week: n.div_ceil(2),
            session,
        })
    }

    fn invalid() -> ValidationError {
        ValidationError::new(
            Self::FIELD,
            "must be WEEK-SESSION with a positive week and a session of 1 or 2, e.g. 3-2",
        )
    }
}

impl FromStr for LessonName {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (week, session) = raw.trim().split_once('-').ok_or_else(Self::invalid)?;
        let week = week.parse::<u32>().map_err(|_| Self::invalid())?;
        let session = session.parse::<u8>().map_err(|_| Self::invalid())?;
        Self::new(week, session)
    }
}

impl Ord for LessonName {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.week, self.session).cmp(&(other.week, other.session))
    }
}

impl PartialOrd for LessonName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for LessonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.week, self.session)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub present: bool,
    pub flagged: bool,
}

impl Attendance {
    pub fn with_presence(self, present: bool) -> Self {
        Self { present, ..self }
    }

    pub fn with_flag(self, flagged: bool) -> Self {
        Self { flagged, ..self }
    }
}

/// How a score command combines its amount with the current score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreMode {
    Set,
    Add,
    Subtract,
}

/// Participation score in `0..=5`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Participation(u8);

impl Participation {
    pub const FIELD: &'static str = "score";

    pub fn new(score: i64) -> Result<Self, ValidationError> {
        u8::try_from(score)
            .ok()
            .filter(|score| *score <= MAX_PARTICIPATION)
            .map(Self)
            .ok_or_else(|| ValidationError::new(Self::FIELD, "must be a whole number from 0 to 5"))
    }

    pub fn score(&self) -> u8 {
        self.0
    }

    /// Combine with `amount`; a result outside `0..=5` is rejected
    pub fn apply(self, mode: ScoreMode, amount: u8) -> Result<Self, CommandError> {
        let current = i32::from(self.0);
        let amount = i32::from(amount);
        let attempted = match mode {
            ScoreMode::Set => amount,
            ScoreMode::Add => current + amount,
            ScoreMode::Subtract => current - amount,
        };
        Self::new(i64::from(attempted)).map_err(|_| CommandError::ScoreOutOfRange { attempted })
    }
}

impl fmt::Display for Participation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuestionText(String);

impl QuestionText {
    pub const FIELD: &'static str = "question";

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring match on any keyword
    pub fn contains_any(&self, keywords: &[String]) -> bool {
        let haystack = self.0.to_lowercase();
        keywords
            .iter()
            .any(|keyword| haystack.contains(&keyword.to_lowercase()))
    }
}

impl FromStr for QuestionText {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new(Self::FIELD, "must not be blank"));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for QuestionText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! string_conversions {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TryFrom<String> for $ty {
                type Error = ValidationError;

                fn try_from(raw: String) -> Result<Self, Self::Error> {
                    raw.parse()
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> String {
                    value.to_string()
                }
            }
        )*
    };
}

string_conversions!(GroupName, StudentName, StudentNumber, LessonName, QuestionText);

impl TryFrom<i64> for Participation {
    type Error = ValidationError;

    fn try_from(score: i64) -> Result<Self, Self::Error> {
        Self::new(score)
    }
}

impl From<Participation> for i64 {
    fn from(value: Participation) -> i64 {
        i64::from(value.0)
    }
}
