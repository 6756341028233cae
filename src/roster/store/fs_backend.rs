use super::backend::StorageBackend;
use crate::error::Result;
use crate::model::Entity;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const DB_DIR: &str = "db";
const STORAGE_DIR: &str = "storage";

/// Filesystem backend rooted at a single data directory:
///
/// ```text
/// <root>/
/// ├── db/students.txt
/// ├── db/colleges.txt
/// ├── db/departments.txt
/// └── storage/<id>/photo.jpg
/// ```
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn db_dir(&self) -> PathBuf {
        self.root.join(DB_DIR)
    }

    fn asset_dir(&self, id: &str) -> PathBuf {
        self.asset_root().join(id)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn ensure_tables(&self) -> Result<()> {
        self.ensure_dir(&self.db_dir())?;
        for entity in Entity::ALL {
            // create_new never clobbers an existing table
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.table_path(entity))
            {
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    fn read_table(&self, entity: Entity) -> Result<String> {
        let path = self.table_path(entity);
        if !path.exists() {
            return Ok(String::new());
        }
        Ok(fs::read_to_string(path)?)
    }

    fn append_table(&self, entity: Entity, data: &str) -> Result<()> {
        self.ensure_dir(&self.db_dir())?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.table_path(entity))?;
        file.write_all(data.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }

    fn write_table(&self, entity: Entity, data: &str) -> Result<()> {
        let db_dir = self.db_dir();
        self.ensure_dir(&db_dir)?;

        // Atomic Write
        let tmp_path = db_dir.join(format!(".{}-{}.tmp", entity, Uuid::new_v4()));
        fs::write(&tmp_path, data)?;
        fs::rename(&tmp_path, self.table_path(entity))?;
        Ok(())
    }

    fn table_path(&self, entity: Entity) -> PathBuf {
        self.db_dir().join(entity.file_name())
    }

    fn ensure_asset_root(&self) -> Result<()> {
        self.ensure_dir(&self.asset_root())
    }

    fn asset_root(&self) -> PathBuf {
        self.root.join(STORAGE_DIR)
    }

    fn create_asset_dir(&self, id: &str) -> Result<()> {
        self.ensure_dir(&self.asset_dir(id))
    }

    fn asset_entries(&self, id: &str) -> Result<Option<Vec<String>>> {
        let dir = self.asset_dir(id);
        if !dir.is_dir() {
            return Ok(None);
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(Some(names))
    }

    fn remove_asset_file(&self, id: &str, name: &str) -> Result<()> {
        let path = self.asset_dir(id).join(name);
        if path.is_file() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn remove_asset_dir(&self, id: &str) -> Result<()> {
        let dir = self.asset_dir(id);
        if dir.exists() {
            fs::remove_dir(dir)?;
        }
        Ok(())
    }

    fn is_asset_file(&self, id: &str, name: &str) -> bool {
        fs::symlink_metadata(self.asset_dir(id).join(name)).is_ok_and(|meta| meta.is_file())
    }

    fn copy_into_asset_dir(&self, id: &str, source: &Path, name: &str) -> Result<PathBuf> {
        let dir = self.asset_dir(id);
        self.ensure_dir(&dir)?;
        let target = dir.join(name);

        // Copy beside the target, then rename over it
        let tmp_path = dir.join(format!(".{}-{}.tmp", name, Uuid::new_v4()));
        if let Err(e) = fs::copy(source, &tmp_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        fs::rename(&tmp_path, &target)?;
        Ok(target)
    }

    fn rename_asset_file(&self, id: &str, from: &str, to: &str) -> Result<()> {
        let dir = self.asset_dir(id);
        fs::rename(dir.join(from), dir.join(to))?;
        Ok(())
    }

    fn same_file(&self, a: &Path, b: &Path) -> bool {
        match (fs::canonicalize(a), fs::canonicalize(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => a == b,
        }
    }

    fn list_asset_dirs(&self) -> Result<Vec<String>> {
        let root = self.asset_root();
        if !root.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                ids.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
