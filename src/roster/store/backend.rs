use crate::error::Result;
use crate::model::Entity;
use std::path::{Path, PathBuf};

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while RecordStore handles the "what" (codec, lifecycle rules, doctor).
pub trait StorageBackend {
    // --- Table Operations ---

    /// Create the table directory and any missing table file. Never truncates.
    fn ensure_tables(&self) -> Result<()>;

    /// Read the raw text of a table. A missing table reads as empty.
    fn read_table(&self, entity: Entity) -> Result<String>;

    /// Append raw text to the end of a table without touching existing content.
    fn append_table(&self, entity: Entity, data: &str) -> Result<()>;

    /// Replace the whole table.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write_table(&self, entity: Entity, data: &str) -> Result<()>;

    /// Location of a table. For MemBackend, a virtual path.
    fn table_path(&self, entity: Entity) -> PathBuf;

    // --- Asset Operations ---

    /// Create the storage root if absent.
    fn ensure_asset_root(&self) -> Result<()>;

    /// Location of the storage root holding one directory per record.
    fn asset_root(&self) -> PathBuf;

    /// Create the asset directory for `id`. No-op if it exists.
    fn create_asset_dir(&self, id: &str) -> Result<()>;

    /// Names of the entries inside the asset directory, or None if it does not exist.
    fn asset_entries(&self, id: &str) -> Result<Option<Vec<String>>>;

    /// Remove a single file from the asset directory. No-op if absent.
    fn remove_asset_file(&self, id: &str, name: &str) -> Result<()>;

    /// Remove the asset directory itself. MUST NOT recurse: fails if not empty.
    fn remove_asset_dir(&self, id: &str) -> Result<()>;

    /// Whether `name` inside the asset directory is a regular file.
    fn is_asset_file(&self, id: &str, name: &str) -> bool;

    /// Copy `source` into the asset directory as `name`, returning the stored path.
    /// MUST NOT truncate `source` when it already is the target.
    fn copy_into_asset_dir(&self, id: &str, source: &Path, name: &str) -> Result<PathBuf>;

    /// Rename a file inside the asset directory, replacing `to` if present.
    fn rename_asset_file(&self, id: &str, from: &str, to: &str) -> Result<()>;

    /// Whether two spellings resolve to the same stored file.
    fn same_file(&self, a: &Path, b: &Path) -> bool;

    /// Ids of every asset directory present in storage.
    fn list_asset_dirs(&self) -> Result<Vec<String>>;

    /// Whether a stored file exists at `path`.
    fn file_exists(&self, path: &Path) -> bool;
}
