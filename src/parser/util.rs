//! Conversions from raw argument values to validated domain values.

use crate::core::error::{ParseError, ValidationError};
use crate::model::manager::{LessonTarget, StudentSelector};
use crate::model::student::Student;
use crate::model::values::MAX_PARTICIPATION;
use crate::parser::tokenizer::{ArgumentMultimap, Prefix};
use std::str::FromStr;

const ALL_KEYWORD: &str = "all";

/// Parse a value with its validator, attaching `usage` on failure
pub fn parse_value<T>(raw: &str, usage: &'static str) -> Result<T, ParseError>
where
    T: FromStr<Err = ValidationError>,
{
    raw.parse().map_err(|e| ParseError::invalid_value(e, usage))
}

/// The value of a prefix that must be present
pub fn required<'a>(args: &'a ArgumentMultimap, prefix: Prefix, usage: &'static str) -> Result<&'a str, ParseError> {
    args.value(prefix).ok_or(ParseError::invalid_format(usage))
}

pub fn ensure_empty_preamble(args: &ArgumentMultimap, usage: &'static str) -> Result<(), ParseError> {
    if args.preamble().is_empty() {
        Ok(())
    } else {
        Err(ParseError::invalid_format(usage))
    }
}

/// A 1-based position
pub fn parse_index(raw: &str, usage: &'static str) -> Result<usize, ParseError> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|index| *index > 0)
        .ok_or_else(|| {
            ParseError::invalid_value(
                ValidationError::new("index", "must be a positive whole number"),
                usage,
            )
        })
}

/// A score amount; `allow_zero` is set for absolute scores
pub fn parse_score(raw: &str, allow_zero: bool, usage: &'static str) -> Result<u8, ParseError> {
    let lowest = if allow_zero { 0 } else { 1 };
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|score| (lowest..=MAX_PARTICIPATION).contains(score))
        .ok_or_else(|| {
            let reason = if allow_zero {
                "must be a whole number from 0 to 5"
            } else {
                "must be a whole number from 1 to 5"
            };
            ParseError::invalid_value(ValidationError::new("score", reason), usage)
        })
}

/// Optional `grp/` and `lsn/`
pub fn parse_lesson_target(args: &ArgumentMultimap, usage: &'static str) -> Result<LessonTarget, ParseError> {
    Ok(LessonTarget {
        group: args.value(Prefix::Grp).map(|raw| parse_value(raw, usage)).transpose()?,
        lesson: args.value(Prefix::Lsn).map(|raw| parse_value(raw, usage)).transpose()?,
    })
}

/// `name/` and `id/` together
pub fn parse_student(args: &ArgumentMultimap, usage: &'static str) -> Result<Student, ParseError> {
    let name = parse_value(required(args, Prefix::Name, usage)?, usage)?;
    let number = parse_value(required(args, Prefix::Id, usage)?, usage)?;
    Ok(Student::new(name, number))
}

/// Resolve the student selector of a lesson command.
///
/// Exactly one form is accepted: `name/` with `id/`, `idx/`, or (when
/// `allow_all` is set) the preamble `all`. Any other preamble is a format
/// error and combining forms is a conflict.
pub fn parse_selector(
    args: &ArgumentMultimap,
    allow_all: bool,
    usage: &'static str,
) -> Result<StudentSelector, ParseError> {
    let wants_all = match args.preamble() {
        "" => false,
        preamble if allow_all && preamble.eq_ignore_ascii_case(ALL_KEYWORD) => true,
        _ => return Err(ParseError::invalid_format(usage)),
    };
    let has_student = args.contains(Prefix::Name) || args.contains(Prefix::Id);
    let has_index = args.contains(Prefix::Idx);

    match (wants_all, has_student, has_index) {
        (true, false, false) => Ok(StudentSelector::All),
        (false, true, false) => Ok(StudentSelector::Student(parse_student(args, usage)?)),
        (false, false, true) => Ok(StudentSelector::Index(parse_index(
            required(args, Prefix::Idx, usage)?,
            usage,
        )?)),
        (false, false, false) => Err(ParseError::invalid_format(usage)),
        _ => Err(ParseError::ConflictingSelectors { usage }),
    }
}
