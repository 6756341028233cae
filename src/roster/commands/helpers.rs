use crate::codec::LineRecord;
use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::model::Student;
use chrono::NaiveDate;

/// Record ids name directories, so they must be a single, plain path segment.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(RosterError::Validation("id cannot be empty".into()));
    }
    if id == "." || id == ".." || id.contains(['/', '\\']) || id.contains('\0') {
        return Err(RosterError::Validation(format!(
            "id '{}' is not a valid directory name",
            id
        )));
    }
    Ok(())
}

pub fn validate_student(config: &RosterConfig, student: &Student) -> Result<()> {
    validate_id(&student.id)?;

    if student.student_id.trim().is_empty() {
        return Err(RosterError::Validation("student id cannot be empty".into()));
    }

    if !config.accepts_gender(&student.gender) {
        return Err(RosterError::Validation(format!(
            "gender '{}' is not one of: {}",
            student.gender,
            config.genders.join(", ")
        )));
    }

    if !student.birthday.is_empty()
        && NaiveDate::parse_from_str(&student.birthday, "%Y-%m-%d").is_err()
    {
        return Err(RosterError::Validation(format!(
            "birthday '{}' is not a YYYY-MM-DD date",
            student.birthday
        )));
    }

    if !student.year.is_empty() && !matches!(student.year.parse::<u8>(), Ok(1..)) {
        return Err(RosterError::Validation(format!(
            "year '{}' must be a number from 1 to 255",
            student.year
        )));
    }

    Ok(())
}

/// Position of the record with `id`, if any.
pub fn position_of<R: LineRecord>(records: &[R], id: &str) -> Option<usize> {
    records.iter().position(|r| r.id() == id)
}
