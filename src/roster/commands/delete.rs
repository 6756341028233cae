use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, RosterError};
use crate::model::Student;
use crate::store::DataStore;
use tracing::info;

use super::helpers::position_of;

pub fn run<S: DataStore>(store: &mut S, id: &str) -> Result<CmdResult> {
    info!(id, "delete student");

    let mut students: Vec<Student> = store.read_all()?;
    let index = position_of(&students, id)
        .ok_or_else(|| RosterError::NotFound(format!("Student with id {}", id)))?;

    // Fail before touching the table if the directory can't go.
    store.check_asset_dir_removable(id)?;

    let removed = students.remove(index);
    store.rewrite_all(&students)?;
    store.delete_asset_dir(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Student deleted: {} {}",
        removed.student_id,
        removed.full_name()
    )));
    Ok(result.with_affected_students(vec![removed]))
}
