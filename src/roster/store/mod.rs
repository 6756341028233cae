//! # Storage Layer
//!
//! This module defines the storage abstraction for roster. The [`DataStore`] trait
//! is what the command layer talks to; [`backend::StorageBackend`] is the raw I/O
//! underneath it.
//!
//! ## Flat Files Are the Database
//!
//! Each entity type has one text file. Every line is one record produced by the
//! [`crate::codec`]; there is no index, no cache and no tombstone. Every
//! operation re-reads the whole file, so the file is always the single authority
//! on which records exist and in what order.
//!
//! - **Read**: split on line boundaries, skip blank lines, decode each line in
//!   order. One undecodable line fails the whole read; nothing is silently dropped.
//! - **Append**: one encoded line plus `\n`, existing content untouched.
//! - **Rewrite**: the whole table is replaced (tmp file + rename). This is the
//!   only way to change or remove a record.
//!
//! ## Assets
//!
//! Each student owns one directory under the storage root, named by its id,
//! holding at most one managed photo. Directories are created and destroyed in
//! step with the record. Removal is never recursive: a directory holding anything
//! other than the managed photo is left alone and reported as an error.
//!
//! ## Storage Layout
//!
//! ```text
//! <root>/
//! ├── config.json
//! ├── db/
//! │   ├── students.txt
//! │   ├── colleges.txt
//! │   └── departments.txt
//! └── storage/
//!     └── <id>/photo.jpg
//! ```
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production store over the filesystem.
//! - [`memory::InMemoryStore`]: For testing logic without filesystem I/O.

use crate::codec::LineRecord;
use crate::error::Result;
use crate::model::Entity;
use std::path::PathBuf;

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod record_store;

/// Report from the `doctor` operation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DoctorReport {
    /// Asset directories with no matching student.
    pub orphan_dirs: Vec<String>,
    /// Orphans that were removed (only with fix).
    pub removed_dirs: Vec<String>,
    /// Students whose photo field points at a missing file.
    pub dangling_photos: Vec<String>,
    /// Students whose photo field points outside their own asset directory.
    pub misplaced_photos: Vec<String>,
    /// Dangling photo fields that were cleared (only with fix).
    pub cleared_photos: usize,
}

impl DoctorReport {
    pub fn is_clean(&self) -> bool {
        self.orphan_dirs.is_empty()
            && self.dangling_photos.is_empty()
            && self.misplaced_photos.is_empty()
    }
}

/// A photo copied into its record's directory under a temporary name.
///
/// The managed photo is untouched until [`DataStore::commit_photo`] renames the
/// staged copy over it; [`DataStore::discard_photo`] drops it instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedPhoto {
    pub id: String,
    pub staged_name: String,
}

/// Abstract interface for record storage.
///
/// Combines the flat-file tables with the per-record asset directories.
pub trait DataStore {
    /// Create the table directory, every table file and the storage root if
    /// missing. Idempotent; never truncates.
    fn init(&mut self) -> Result<()>;

    /// Read every record of a table in file order.
    fn read_all<R: LineRecord>(&self) -> Result<Vec<R>>;

    /// Append a single record to its table.
    fn append_one<R: LineRecord>(&mut self, record: &R) -> Result<()>;

    /// Replace the whole table with `records`, in order.
    fn rewrite_all<R: LineRecord>(&mut self, records: &[R]) -> Result<()>;

    fn table_path(&self, entity: Entity) -> PathBuf;

    fn asset_root(&self) -> PathBuf;

    /// Directory owned by record `id`. Does not check existence.
    fn asset_dir(&self, id: &str) -> PathBuf;

    /// Whether the asset directory for `id` exists.
    fn has_asset_dir(&self, id: &str) -> Result<bool>;

    /// Create the asset directory for `id`; no-op if it exists.
    fn create_asset_dir(&mut self, id: &str) -> Result<()>;

    /// Fail with `AssetDirNotEmpty` if deleting the directory would have to
    /// remove anything besides the managed photo.
    fn check_asset_dir_removable(&self, id: &str) -> Result<()>;

    /// Remove the managed photo and the directory; no-op if absent.
    fn delete_asset_dir(&mut self, id: &str) -> Result<()>;

    /// Copy `source` into the record's directory as the managed photo and return
    /// the stored path. Empty sources stay empty. A source that already is the
    /// managed photo, however it is spelled, is not copied.
    fn store_photo(&mut self, id: &str, source: &str) -> Result<String>;

    /// Like [`DataStore::store_photo`], but leaves the copy staged. Returns the
    /// path the record should carry and the staged copy, if one was made.
    fn stage_photo(&mut self, id: &str, source: &str) -> Result<(String, Option<StagedPhoto>)>;

    /// Make a staged copy the managed photo.
    fn commit_photo(&mut self, staged: &StagedPhoto) -> Result<()>;

    /// Remove a staged copy, leaving the managed photo as it was.
    fn discard_photo(&mut self, staged: &StagedPhoto) -> Result<()>;

    /// Verify and optionally fix consistency between students and asset directories.
    fn doctor(&mut self, fix: bool) -> Result<DoctorReport>;
}
