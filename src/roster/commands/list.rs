use crate::commands::CmdResult;
use crate::error::{Result, RosterError};
use crate::model::Student;
use crate::store::DataStore;
use tracing::info;

pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    info!("list students");
    let students: Vec<Student> = store.read_all()?;
    Ok(CmdResult::default().with_listed_students(students))
}

/// A single student by record id.
pub fn find<S: DataStore>(store: &S, id: &str) -> Result<CmdResult> {
    let students: Vec<Student> = store.read_all()?;
    let student = students
        .into_iter()
        .find(|s| s.id == id)
        .ok_or_else(|| RosterError::NotFound(format!("Student with id {}", id)))?;
    Ok(CmdResult::default().with_listed_students(vec![student]))
}
