use super::backend::StorageBackend;
use crate::error::{Result, RosterError};
use crate::model::Entity;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Component, Path, PathBuf};

const MEM_ROOT: &str = "memory://roster";

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since roster is single-threaded.
/// Asset directories are modelled as sets of entry names; copying a photo
/// records the file without reading the source.
#[derive(Default)]
pub struct MemBackend {
    tables: RefCell<HashMap<Entity, String>>,
    assets: RefCell<BTreeMap<String, BTreeSet<String>>>,
    /// (id, name) entries that are directories rather than files.
    subdirs: RefCell<BTreeSet<(String, String)>>,
    asset_root_created: RefCell<bool>,
    simulate_write_error: RefCell<bool>,
    simulate_table_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Fail table appends and rewrites only; asset operations keep working.
    pub fn set_simulate_table_write_error(&self, simulate: bool) {
        *self.simulate_table_write_error.borrow_mut() = simulate;
    }

    /// Test helper: drop a file into an asset directory behind the store's back.
    pub fn put_asset_file(&self, id: &str, name: &str) {
        self.assets
            .borrow_mut()
            .entry(id.to_string())
            .or_default()
            .insert(name.to_string());
    }

    /// Test helper: create a subdirectory inside an asset directory.
    pub fn put_asset_subdir(&self, id: &str, name: &str) {
        self.put_asset_file(id, name);
        self.subdirs
            .borrow_mut()
            .insert((id.to_string(), name.to_string()));
    }

    /// Test helper: overwrite a table with raw text.
    pub fn set_raw_table(&self, entity: Entity, data: &str) {
        self.tables.borrow_mut().insert(entity, data.to_string());
    }

    pub fn has_table(&self, entity: Entity) -> bool {
        self.tables.borrow().contains_key(&entity)
    }

    fn check_writable(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(RosterError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }

    fn check_table_writable(&self) -> Result<()> {
        self.check_writable()?;
        if *self.simulate_table_write_error.borrow() {
            return Err(RosterError::Store("Simulated table write error".to_string()));
        }
        Ok(())
    }

    fn asset_dir(&self, id: &str) -> PathBuf {
        self.asset_root().join(id)
    }
}

impl StorageBackend for MemBackend {
    fn ensure_tables(&self) -> Result<()> {
        let mut tables = self.tables.borrow_mut();
        for entity in Entity::ALL {
            tables.entry(entity).or_default();
        }
        Ok(())
    }

    fn read_table(&self, entity: Entity) -> Result<String> {
        Ok(self
            .tables
            .borrow()
            .get(&entity)
            .cloned()
            .unwrap_or_default())
    }

    fn append_table(&self, entity: Entity, data: &str) -> Result<()> {
        self.check_table_writable()?;
        self.tables
            .borrow_mut()
            .entry(entity)
            .or_default()
            .push_str(data);
        Ok(())
    }

    fn write_table(&self, entity: Entity, data: &str) -> Result<()> {
        self.check_table_writable()?;
        self.tables.borrow_mut().insert(entity, data.to_string());
        Ok(())
    }

    fn table_path(&self, entity: Entity) -> PathBuf {
        PathBuf::from(format!("{}/db/{}", MEM_ROOT, entity.file_name()))
    }

    fn ensure_asset_root(&self) -> Result<()> {
        *self.asset_root_created.borrow_mut() = true;
        Ok(())
    }

    fn asset_root(&self) -> PathBuf {
        PathBuf::from(format!("{}/storage", MEM_ROOT))
    }

    fn create_asset_dir(&self, id: &str) -> Result<()> {
        self.check_writable()?;
        self.assets.borrow_mut().entry(id.to_string()).or_default();
        Ok(())
    }

    fn asset_entries(&self, id: &str) -> Result<Option<Vec<String>>> {
        Ok(self
            .assets
            .borrow()
            .get(id)
            .map(|files| files.iter().cloned().collect()))
    }

    fn remove_asset_file(&self, id: &str, name: &str) -> Result<()> {
        if !self.is_asset_file(id, name) {
            return Ok(());
        }
        if let Some(files) = self.assets.borrow_mut().get_mut(id) {
            files.remove(name);
        }
        Ok(())
    }

    fn remove_asset_dir(&self, id: &str) -> Result<()> {
        let mut assets = self.assets.borrow_mut();
        match assets.get(id) {
            None => Ok(()),
            Some(files) if files.is_empty() => {
                assets.remove(id);
                Ok(())
            }
            Some(_) => Err(RosterError::Io(std::io::Error::other(format!(
                "directory not empty: {}",
                id
            )))),
        }
    }

    fn copy_into_asset_dir(&self, id: &str, source: &Path, name: &str) -> Result<PathBuf> {
        self.check_writable()?;
        if source.as_os_str().is_empty() {
            return Err(RosterError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "empty source path",
            )));
        }
        self.put_asset_file(id, name);
        Ok(self.asset_dir(id).join(name))
    }

    fn is_asset_file(&self, id: &str, name: &str) -> bool {
        let key = (id.to_string(), name.to_string());
        self.assets
            .borrow()
            .get(id)
            .is_some_and(|files| files.contains(name))
            && !self.subdirs.borrow().contains(&key)
    }

    fn rename_asset_file(&self, id: &str, from: &str, to: &str) -> Result<()> {
        self.check_writable()?;
        let mut assets = self.assets.borrow_mut();
        match assets.get_mut(id) {
            Some(files) if files.contains(from) => {
                files.remove(from);
                files.insert(to.to_string());
                Ok(())
            }
            _ => Err(RosterError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no asset {} in {}", from, id),
            ))),
        }
    }

    fn same_file(&self, a: &Path, b: &Path) -> bool {
        normalize(a) == normalize(b)
    }

    fn list_asset_dirs(&self) -> Result<Vec<String>> {
        Ok(self.assets.borrow().keys().cloned().collect())
    }

    fn file_exists(&self, path: &Path) -> bool {
        let (Some(name), Some(dir)) = (path.file_name(), path.parent()) else {
            return false;
        };
        if dir.parent() != Some(self.asset_root().as_path()) {
            return false;
        }
        let Some(id) = dir.file_name() else {
            return false;
        };
        self.assets
            .borrow()
            .get(id.to_string_lossy().as_ref())
            .is_some_and(|files| files.contains(name.to_string_lossy().as_ref()))
    }
}

/// Resolve `.` and `..` lexically; virtual paths have no links to follow.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
