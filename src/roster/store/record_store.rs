use super::backend::StorageBackend;
use super::{DataStore, DoctorReport, StagedPhoto};
use crate::codec::{self, LineRecord};
use crate::error::{Result, RosterError};
use crate::model::{Entity, Student};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

const DEFAULT_PHOTO_FILE_NAME: &str = "photo.jpg";

pub struct RecordStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    photo_file_name: String,
}

impl<B: StorageBackend> RecordStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            photo_file_name: DEFAULT_PHOTO_FILE_NAME.to_string(),
        }
    }

    pub fn with_photo_file_name(mut self, name: &str) -> Self {
        self.photo_file_name = name.to_string();
        self
    }

    pub fn photo_file_name(&self) -> &str {
        &self.photo_file_name
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn managed_photo_path(&self, id: &str) -> PathBuf {
        self.asset_dir(id).join(&self.photo_file_name)
    }

    /// Entries in the asset dir other than the managed photo. An entry with the
    /// photo's name that is not a regular file counts as unmanaged.
    fn unmanaged_entries(&self, id: &str) -> Result<Vec<String>> {
        Ok(self
            .backend
            .asset_entries(id)?
            .unwrap_or_default()
            .into_iter()
            .filter(|name| {
                name != &self.photo_file_name || !self.backend.is_asset_file(id, name)
            })
            .collect())
    }
}

impl<B: StorageBackend> DataStore for RecordStore<B> {
    fn init(&mut self) -> Result<()> {
        self.backend.ensure_tables()?;
        self.backend.ensure_asset_root()?;
        debug!(root = %self.backend.asset_root().display(), "storage initialized");
        Ok(())
    }

    fn read_all<R: LineRecord>(&self) -> Result<Vec<R>> {
        let data = self.backend.read_table(R::ENTITY)?;
        let records = data
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(i, line)| {
                codec::decode::<R>(line).map_err(|e| match e {
                    RosterError::Format(reason) => RosterError::Format(format!(
                        "{} line {}: {}",
                        R::ENTITY.file_name(),
                        i + 1,
                        reason
                    )),
                    other => other,
                })
            })
            .collect::<Result<Vec<R>>>()?;
        debug!(table = %R::ENTITY, count = records.len(), "read table");
        Ok(records)
    }

    fn append_one<R: LineRecord>(&mut self, record: &R) -> Result<()> {
        let mut line = codec::encode(record);
        line.push('\n');
        self.backend.append_table(R::ENTITY, &line)?;
        debug!(table = %R::ENTITY, id = record.id(), "appended record");
        Ok(())
    }

    fn rewrite_all<R: LineRecord>(&mut self, records: &[R]) -> Result<()> {
        let mut data = String::new();
        for record in records {
            data.push_str(&codec::encode(record));
            data.push('\n');
        }
        self.backend.write_table(R::ENTITY, &data)?;
        debug!(table = %R::ENTITY, count = records.len(), "rewrote table");
        Ok(())
    }

    fn table_path(&self, entity: Entity) -> PathBuf {
        self.backend.table_path(entity)
    }

    fn asset_root(&self) -> PathBuf {
        self.backend.asset_root()
    }

    fn asset_dir(&self, id: &str) -> PathBuf {
        self.backend.asset_root().join(id)
    }

    fn has_asset_dir(&self, id: &str) -> Result<bool> {
        Ok(self.backend.asset_entries(id)?.is_some())
    }

    fn create_asset_dir(&mut self, id: &str) -> Result<()> {
        self.backend.create_asset_dir(id)
    }

    fn check_asset_dir_removable(&self, id: &str) -> Result<()> {
        if self.unmanaged_entries(id)?.is_empty() {
            Ok(())
        } else {
            Err(RosterError::AssetDirNotEmpty(self.asset_dir(id)))
        }
    }

    fn delete_asset_dir(&mut self, id: &str) -> Result<()> {
        if self.backend.asset_entries(id)?.is_none() {
            return Ok(());
        }
        self.check_asset_dir_removable(id)?;
        self.backend.remove_asset_file(id, &self.photo_file_name)?;
        self.backend.remove_asset_dir(id)?;
        debug!(id, "removed asset directory");
        Ok(())
    }

    fn store_photo(&mut self, id: &str, source: &str) -> Result<String> {
        let (path, staged) = self.stage_photo(id, source)?;
        if let Some(staged) = staged {
            if let Err(e) = self.commit_photo(&staged) {
                if let Err(cleanup) = self.discard_photo(&staged) {
                    warn!(id, error = %cleanup, "could not remove staged photo");
                }
                return Err(e);
            }
        }
        Ok(path)
    }

    fn stage_photo(&mut self, id: &str, source: &str) -> Result<(String, Option<StagedPhoto>)> {
        if source.is_empty() {
            return Ok((String::new(), None));
        }
        let target = self.managed_photo_path(id);
        let target_str = target.to_string_lossy().into_owned();
        if self.backend.same_file(Path::new(source), &target) {
            return Ok((target_str, None));
        }

        let staged_name = format!(".{}-{}.staged", self.photo_file_name, Uuid::new_v4());
        self.backend
            .copy_into_asset_dir(id, Path::new(source), &staged_name)?;
        debug!(id, from = source, staged = %staged_name, "staged photo");
        Ok((
            target_str,
            Some(StagedPhoto {
                id: id.to_string(),
                staged_name,
            }),
        ))
    }

    fn commit_photo(&mut self, staged: &StagedPhoto) -> Result<()> {
        self.backend
            .rename_asset_file(&staged.id, &staged.staged_name, &self.photo_file_name)?;
        debug!(
            id = %staged.id,
            to = %self.managed_photo_path(&staged.id).display(),
            "stored photo"
        );
        Ok(())
    }

    fn discard_photo(&mut self, staged: &StagedPhoto) -> Result<()> {
        self.backend.remove_asset_file(&staged.id, &staged.staged_name)
    }

    fn doctor(&mut self, fix: bool) -> Result<DoctorReport> {
        let mut students: Vec<Student> = self.read_all()?;
        let known: HashSet<&str> = students.iter().map(|s| s.id.as_str()).collect();
        let mut report = DoctorReport::default();

        // 1. Directories nobody owns (crash between rewrite and removal)
        let orphans: Vec<String> = self
            .backend
            .list_asset_dirs()?
            .into_iter()
            .filter(|id| !known.contains(id.as_str()))
            .collect();

        for id in orphans {
            if fix && self.unmanaged_entries(&id)?.is_empty() {
                self.backend.remove_asset_file(&id, &self.photo_file_name)?;
                self.backend.remove_asset_dir(&id)?;
                report.removed_dirs.push(id.clone());
            }
            report.orphan_dirs.push(id);
        }

        // 2. Photo references that no longer resolve
        let mut changed = false;
        for student in students.iter_mut() {
            if student.photo.is_empty() {
                continue;
            }
            let photo = PathBuf::from(&student.photo);
            if !photo.starts_with(self.asset_dir(&student.id)) {
                report.misplaced_photos.push(student.id.clone());
                continue;
            }
            if !self.backend.file_exists(&photo) {
                report.dangling_photos.push(student.id.clone());
                if fix {
                    student.photo.clear();
                    report.cleared_photos += 1;
                    changed = true;
                }
            }
        }

        if changed {
            self.rewrite_all(&students)?;
        }

        if !report.is_clean() {
            warn!(
                orphans = report.orphan_dirs.len(),
                dangling = report.dangling_photos.len(),
                misplaced = report.misplaced_photos.len(),
                "storage inconsistencies found"
            );
        }

        Ok(report)
    }
}
