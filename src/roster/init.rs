//! # Data Root
//!
//! Everything roster stores lives under one directory, the data root:
//!
//! 1. `--root <dir>` on the command line, if given.
//! 2. `$ROSTER_HOME`, if set (tests point this at a temp dir).
//! 3. The OS data directory for the app, via the `directories` crate.
//!
//! The root is made absolute before use, since stored photo paths are built from
//! it and must stay valid from any working directory.

use crate::api::RosterApi;
use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::store::fs::FileStore;
use crate::store::DataStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const ROOT_ENV_VAR: &str = "ROSTER_HOME";

pub struct RosterContext {
    pub api: RosterApi<FileStore>,
    pub root: PathBuf,
}

pub fn resolve_root(cli_root: Option<PathBuf>) -> Result<PathBuf> {
    let root = match cli_root {
        Some(path) => path,
        None => match std::env::var_os(ROOT_ENV_VAR) {
            Some(value) if !value.is_empty() => PathBuf::from(value),
            _ => ProjectDirs::from("com", "roster", "roster")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| {
                    RosterError::Config("could not determine a data directory".into())
                })?,
        },
    };
    absolutize(&root)
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Load config, build the file store and make sure the layout exists.
pub fn initialize(root: PathBuf) -> Result<RosterContext> {
    debug!(root = %root.display(), "initializing");
    let config = RosterConfig::load(&root)?;
    let mut store = FileStore::new(root.clone()).with_photo_file_name(&config.photo_file_name);
    store.init()?;
    let api = RosterApi::new(store, config, root.clone());
    Ok(RosterContext { api, root })
}
