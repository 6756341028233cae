use crate::commands::{CmdMessage, CmdResult};
use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::model::Student;
use crate::store::DataStore;
use tracing::{info, warn};

use super::helpers::{position_of, validate_student};

/// Append a new student and give it an asset directory holding its photo.
///
/// A failure after the directory was made removes it again, so a rejected
/// create leaves neither a record nor a directory behind.
pub fn run<S: DataStore>(
    store: &mut S,
    config: &RosterConfig,
    mut student: Student,
) -> Result<CmdResult> {
    info!(student_id = %student.student_id, "create student");
    validate_student(config, &student)?;

    let students: Vec<Student> = store.read_all()?;
    if students.iter().any(|s| s.student_id == student.student_id) {
        return Err(RosterError::Duplicate(format!(
            "Student with id {}",
            student.student_id
        )));
    }
    if position_of(&students, &student.id).is_some() {
        return Err(RosterError::Duplicate(format!("Record {}", student.id)));
    }

    let created_dir = !store.has_asset_dir(&student.id)?;
    store.create_asset_dir(&student.id)?;
    if let Err(e) = store_and_append(store, &mut student) {
        if created_dir {
            if let Err(cleanup) = store.delete_asset_dir(&student.id) {
                warn!(id = %student.id, error = %cleanup, "could not roll back asset directory");
            }
        }
        return Err(e);
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Student created: {} {}",
        student.student_id,
        student.full_name()
    )));
    Ok(result.with_affected_students(vec![student]))
}

fn store_and_append<S: DataStore>(store: &mut S, student: &mut Student) -> Result<()> {
    student.photo = store.store_photo(&student.id, &student.photo)?;
    store.append_one(student)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::list;
    use crate::store::backend::StorageBackend;
    use crate::store::memory::fixtures::{student, StoreFixture};
    use crate::store::memory::InMemoryStore;

    #[test]
    fn creates_student() {
        let mut store = StoreFixture::new().store;
        let config = RosterConfig::default();
        let input = student("1", "S1", "Ana");

        let result = run(&mut store, &config, input.clone()).unwrap();
        assert_eq!(result.affected_students, vec![input.clone()]);

        let listed = list::run(&store).unwrap().listed_students;
        assert_eq!(listed, vec![input]);
        assert!(store.backend().asset_entries("1").unwrap().is_some());
    }

    #[test]
    fn resolves_photo_to_stored_path() {
        let mut store = StoreFixture::new().store;
        let config = RosterConfig::default();
        let mut input = student("1", "S1", "Ana");
        input.photo = "/home/ana/Pictures/me.jpg".into();

        let result = run(&mut store, &config, input).unwrap();
        let stored = &result.affected_students[0];
        let expected = store.asset_dir("1").join("photo.jpg");
        assert_eq!(stored.photo, expected.to_string_lossy());

        let listed = list::run(&store).unwrap().listed_students;
        assert_eq!(&listed[0], stored);
    }

    #[test]
    fn duplicate_student_id_leaves_store_unchanged() {
        let mut store = StoreFixture::new().store;
        let config = RosterConfig::default();
        run(&mut store, &config, student("1", "S1", "Ana")).unwrap();
        let before = store
            .backend()
            .read_table(crate::model::Entity::Students)
            .unwrap();

        let result = run(&mut store, &config, student("2", "S1", "Ben"));
        match result {
            Err(RosterError::Duplicate(msg)) => assert!(msg.contains("S1")),
            other => panic!("Expected Duplicate error, got {:?}", other),
        }

        let after = store
            .backend()
            .read_table(crate::model::Entity::Students)
            .unwrap();
        assert_eq!(before, after);
        assert_eq!(list::run(&store).unwrap().listed_students.len(), 1);
        // no asset dir for the rejected record
        assert!(store.backend().asset_entries("2").unwrap().is_none());
    }

    #[test]
    fn duplicate_record_id_is_rejected() {
        let mut store = StoreFixture::new().store;
        let config = RosterConfig::default();
        run(&mut store, &config, student("1", "S1", "Ana")).unwrap();
        let result = run(&mut store, &config, student("1", "S2", "Ben"));
        assert!(matches!(result, Err(RosterError::Duplicate(_))));
    }

    #[test]
    fn invalid_request_touches_nothing() {
        let mut store = InMemoryStore::new();
        let config = RosterConfig::default();
        let mut input = student("../escape", "S1", "Ana");
        input.photo = "/tmp/me.jpg".into();

        let result = run(&mut store, &config, input);
        assert!(matches!(result, Err(RosterError::Validation(_))));
        assert!(store.backend().list_asset_dirs().unwrap().is_empty());
    }

    #[test]
    fn write_failure_surfaces() {
        let mut store = StoreFixture::new().store;
        store.backend().set_simulate_write_error(true);
        let result = run(&mut store, &RosterConfig::default(), student("1", "S1", "Ana"));
        assert!(matches!(result, Err(RosterError::Store(_))));
    }

    #[test]
    fn failed_append_removes_new_asset_dir() {
        let mut store = StoreFixture::new().store;
        store.backend().set_simulate_table_write_error(true);
        let mut input = student("1", "S1", "Ana");
        input.photo = "/home/ana/me.jpg".into();

        let result = run(&mut store, &RosterConfig::default(), input);
        assert!(matches!(result, Err(RosterError::Store(_))));
        assert!(store.backend().asset_entries("1").unwrap().is_none());
        assert!(store.doctor(false).unwrap().is_clean());
    }

    #[test]
    fn failed_append_keeps_preexisting_asset_dir() {
        let mut store = StoreFixture::new().store;
        store.backend().put_asset_file("1", "notes.txt");
        store.backend().set_simulate_table_write_error(true);

        let result = run(&mut store, &RosterConfig::default(), student("1", "S1", "Ana"));
        assert!(result.is_err());
        assert_eq!(
            store.backend().asset_entries("1").unwrap(),
            Some(vec!["notes.txt".to_string()])
        );
    }
}
