use super::mem_backend::MemBackend;
use super::record_store::RecordStore;

pub type InMemoryStore = RecordStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        RecordStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Student;
    use crate::store::DataStore;

    pub fn student(id: &str, student_id: &str, first_name: &str) -> Student {
        Student {
            id: id.to_string(),
            student_id: student_id.to_string(),
            first_name: first_name.to_string(),
            last_name: "Reyes".to_string(),
            gender: "Female".to_string(),
            birthday: "2001-04-09".to_string(),
            photo: String::new(),
            college_id: "C1".to_string(),
            department_id: "D1".to_string(),
            year: "1".to_string(),
        }
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            let mut store = InMemoryStore::new();
            store.init().unwrap();
            Self { store }
        }

        /// Writes students straight into the table and gives each an asset dir,
        /// bypassing command-level validation.
        pub fn with_students(mut self, count: usize) -> Self {
            for i in 1..=count {
                let s = student(&i.to_string(), &format!("S{}", i), &format!("Student{}", i));
                self.store.create_asset_dir(&s.id).unwrap();
                self.store.append_one(&s).unwrap();
            }
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{student, StoreFixture};
    use super::*;
    use crate::codec;
    use crate::error::RosterError;
    use crate::model::{College, Entity, Student};
    use crate::store::backend::StorageBackend;
    use crate::store::DataStore;

    #[test]
    fn test_init_creates_every_table() {
        let mut store = InMemoryStore::new();
        store.init().unwrap();
        for entity in Entity::ALL {
            assert!(store.backend.has_table(entity));
        }
    }

    #[test]
    fn test_init_twice_keeps_content() {
        let mut store = StoreFixture::new().with_students(2).store;
        store.init().unwrap();
        let students: Vec<Student> = store.read_all().unwrap();
        assert_eq!(students.len(), 2);
    }

    #[test]
    fn test_append_then_read_preserves_order() {
        let store = StoreFixture::new().with_students(3).store;
        let ids: Vec<String> = store
            .read_all::<Student>()
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_append_writes_one_terminated_line() {
        let mut store = InMemoryStore::new();
        let s = student("1", "S1", "Ana");
        store.append_one(&s).unwrap();
        let raw = store.backend.read_table(Entity::Students).unwrap();
        assert_eq!(raw, format!("{}\n", codec::encode(&s)));
    }

    #[test]
    fn test_read_skips_blank_lines() {
        let store = InMemoryStore::new();
        let s = student("1", "S1", "Ana");
        store.backend.set_raw_table(
            Entity::Students,
            &format!("\n{}\r\n\n\n", codec::encode(&s)),
        );
        let students: Vec<Student> = store.read_all().unwrap();
        assert_eq!(students, vec![s]);
    }

    #[test]
    fn test_read_aborts_on_malformed_line() {
        let store = InMemoryStore::new();
        let good = codec::encode(&student("1", "S1", "Ana"));
        store
            .backend
            .set_raw_table(Entity::Students, &format!("{}\nnot|a|student\n", good));

        match store.read_all::<Student>() {
            Err(RosterError::Format(msg)) => assert!(msg.contains("students.txt line 2")),
            other => panic!("Expected Format error, got {:?}", other),
        }
    }

    #[test]
    fn test_rewrite_replaces_table() {
        let mut store = StoreFixture::new().with_students(3).store;
        let mut students: Vec<Student> = store.read_all().unwrap();
        students.remove(1);
        store.rewrite_all(&students).unwrap();

        let ids: Vec<String> = store
            .read_all::<Student>()
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_rewrite_empty_clears_table() {
        let mut store = StoreFixture::new().with_students(2).store;
        store.rewrite_all::<Student>(&[]).unwrap();
        assert_eq!(store.backend.read_table(Entity::Students).unwrap(), "");
    }

    #[test]
    fn test_tables_are_independent() {
        let mut store = StoreFixture::new().with_students(1).store;
        let college = College {
            id: "c1".into(),
            code: "CAS".into(),
            name: "Arts".into(),
        };
        store.append_one(&college).unwrap();

        assert_eq!(store.read_all::<College>().unwrap(), vec![college]);
        assert_eq!(store.read_all::<Student>().unwrap().len(), 1);
    }

    #[test]
    fn test_write_error_propagates() {
        let mut store = InMemoryStore::new();
        store.backend.set_simulate_write_error(true);
        let result = store.append_one(&student("1", "S1", "Ana"));
        assert!(matches!(result, Err(RosterError::Store(_))));
    }

    #[test]
    fn test_store_photo_empty_is_noop() {
        let mut store = InMemoryStore::new();
        assert_eq!(store.store_photo("1", "").unwrap(), "");
        assert!(store.backend.asset_entries("1").unwrap().is_none());
    }

    #[test]
    fn test_store_photo_copies_into_asset_dir() {
        let mut store = InMemoryStore::new();
        store.create_asset_dir("1").unwrap();
        let stored = store.store_photo("1", "/home/ana/me.png").unwrap();
        assert_eq!(
            stored,
            store.asset_dir("1").join("photo.jpg").to_string_lossy()
        );
        assert_eq!(
            store.backend.asset_entries("1").unwrap(),
            Some(vec!["photo.jpg".to_string()])
        );
    }

    #[test]
    fn test_store_photo_already_managed_is_unchanged() {
        let mut store = InMemoryStore::new();
        let managed = store.asset_dir("1").join("photo.jpg");
        let managed = managed.to_string_lossy().into_owned();
        assert_eq!(store.store_photo("1", &managed).unwrap(), managed);
        // nothing was copied
        assert!(store.backend.asset_entries("1").unwrap().is_none());
    }

    #[test]
    fn test_custom_photo_file_name() {
        let mut store = InMemoryStore::new().with_photo_file_name("avatar.png");
        let stored = store.store_photo("1", "/tmp/me.png").unwrap();
        assert!(stored.ends_with("/1/avatar.png"));
    }

    #[test]
    fn test_delete_asset_dir_removes_managed_photo() {
        let mut store = InMemoryStore::new();
        store.create_asset_dir("1").unwrap();
        store.store_photo("1", "/tmp/me.png").unwrap();
        store.delete_asset_dir("1").unwrap();
        assert!(store.backend.asset_entries("1").unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_asset_dir_is_noop() {
        let mut store = InMemoryStore::new();
        store.delete_asset_dir("nope").unwrap();
    }

    #[test]
    fn test_delete_asset_dir_refuses_unmanaged_files() {
        let mut store = InMemoryStore::new();
        store.create_asset_dir("1").unwrap();
        store.store_photo("1", "/tmp/me.png").unwrap();
        store.backend.put_asset_file("1", "notes.txt");

        match store.delete_asset_dir("1") {
            Err(RosterError::AssetDirNotEmpty(path)) => assert_eq!(path, store.asset_dir("1")),
            other => panic!("Expected AssetDirNotEmpty, got {:?}", other),
        }
        // the managed photo is still there too
        assert_eq!(
            store.backend.asset_entries("1").unwrap(),
            Some(vec!["notes.txt".to_string(), "photo.jpg".to_string()])
        );
    }

    #[test]
    fn test_directory_named_like_photo_is_unmanaged() {
        let mut store = InMemoryStore::new();
        store.backend.put_asset_subdir("1", "photo.jpg");

        let result = store.check_asset_dir_removable("1");
        assert!(matches!(result, Err(RosterError::AssetDirNotEmpty(_))));
        assert!(store.delete_asset_dir("1").is_err());
        assert!(store.backend.asset_entries("1").unwrap().is_some());
    }

    #[test]
    fn test_store_photo_other_spelling_is_unchanged() {
        let mut store = InMemoryStore::new();
        let managed = store.asset_dir("1").join("photo.jpg");
        let spelled = format!("{}/../1/./photo.jpg", store.asset_dir("1").display());
        assert_eq!(
            store.store_photo("1", &spelled).unwrap(),
            managed.to_string_lossy()
        );
        assert!(store.backend.asset_entries("1").unwrap().is_none());
    }

    #[test]
    fn test_staged_photo_replaces_only_on_commit() {
        let mut store = InMemoryStore::new();
        store.create_asset_dir("1").unwrap();
        store.store_photo("1", "/tmp/old.png").unwrap();

        let (path, staged) = store.stage_photo("1", "/tmp/new.png").unwrap();
        assert_eq!(path, store.asset_dir("1").join("photo.jpg").to_string_lossy());
        let staged = staged.unwrap();
        assert_eq!(store.backend.asset_entries("1").unwrap().unwrap().len(), 2);

        store.discard_photo(&staged).unwrap();
        assert_eq!(
            store.backend.asset_entries("1").unwrap(),
            Some(vec!["photo.jpg".to_string()])
        );

        let (_, staged) = store.stage_photo("1", "/tmp/new.png").unwrap();
        store.commit_photo(&staged.unwrap()).unwrap();
        assert_eq!(
            store.backend.asset_entries("1").unwrap(),
            Some(vec!["photo.jpg".to_string()])
        );
    }

    #[test]
    fn test_doctor_clean_store() {
        let mut store = StoreFixture::new().with_students(2).store;
        let report = store.doctor(false).unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn test_doctor_reports_and_fixes_orphans() {
        let mut store = StoreFixture::new().with_students(1).store;
        store.create_asset_dir("ghost").unwrap();
        store.backend.put_asset_file("ghost", "photo.jpg");
        store.create_asset_dir("keeper").unwrap();
        store.backend.put_asset_file("keeper", "diary.txt");

        let report = store.doctor(false).unwrap();
        assert_eq!(report.orphan_dirs, vec!["ghost", "keeper"]);
        assert!(report.removed_dirs.is_empty());

        let report = store.doctor(true).unwrap();
        assert_eq!(report.removed_dirs, vec!["ghost"]);
        assert_eq!(store.backend.list_asset_dirs().unwrap(), vec!["1", "keeper"]);
    }

    #[test]
    fn test_doctor_clears_dangling_photo() {
        let mut store = StoreFixture::new().store;
        let mut s = student("1", "S1", "Ana");
        s.photo = store.asset_dir("1").join("photo.jpg").to_string_lossy().into_owned();
        store.create_asset_dir("1").unwrap();
        store.append_one(&s).unwrap();

        let report = store.doctor(false).unwrap();
        assert_eq!(report.dangling_photos, vec!["1"]);

        let report = store.doctor(true).unwrap();
        assert_eq!(report.cleared_photos, 1);
        let students: Vec<Student> = store.read_all().unwrap();
        assert_eq!(students[0].photo, "");
    }

    #[test]
    fn test_doctor_reports_misplaced_photo() {
        let mut store = StoreFixture::new().store;
        let mut s = student("1", "S1", "Ana");
        s.photo = "/somewhere/else.jpg".to_string();
        store.create_asset_dir("1").unwrap();
        store.append_one(&s).unwrap();

        let report = store.doctor(true).unwrap();
        assert_eq!(report.misplaced_photos, vec!["1"]);
        assert_eq!(report.cleared_photos, 0);
    }
}
