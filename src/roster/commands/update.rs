use crate::commands::{CmdMessage, CmdResult};
use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::model::Student;
use crate::store::DataStore;
use tracing::{info, warn};

use super::helpers::{position_of, validate_student};

/// Replace the stored student with the same `id`, keeping its position.
///
/// The photo field is taken as supplied. A new source path is staged in the
/// record's asset directory and only replaces the stored photo once the table
/// rewrite succeeded. An empty or already-stored path is kept as is.
pub fn run<S: DataStore>(
    store: &mut S,
    config: &RosterConfig,
    mut student: Student,
) -> Result<CmdResult> {
    info!(id = %student.id, student_id = %student.student_id, "update student");
    validate_student(config, &student)?;

    let mut students: Vec<Student> = store.read_all()?;
    let index = position_of(&students, &student.id)
        .ok_or_else(|| RosterError::NotFound(format!("Student with id {}", student.id)))?;

    if config.unique_student_id_on_update
        && students
            .iter()
            .any(|s| s.id != student.id && s.student_id == student.student_id)
    {
        return Err(RosterError::Duplicate(format!(
            "Student with id {}",
            student.student_id
        )));
    }

    let mut staged = None;
    if !student.photo.is_empty() {
        store.create_asset_dir(&student.id)?;
        let (path, copy) = store.stage_photo(&student.id, &student.photo)?;
        student.photo = path;
        staged = copy;
    }

    students[index] = student.clone();
    if let Err(e) = store.rewrite_all(&students) {
        if let Some(copy) = &staged {
            if let Err(cleanup) = store.discard_photo(copy) {
                warn!(id = %student.id, error = %cleanup, "could not remove staged photo");
            }
        }
        return Err(e);
    }
    if let Some(copy) = &staged {
        store.commit_photo(copy)?;
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Student updated: {} {}",
        student.student_id,
        student.full_name()
    )));
    Ok(result.with_affected_students(vec![student]))
}
