//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every roster operation, whichever client drives it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Carries context** the commands need: the loaded [`RosterConfig`] and the
//!   data root where `config.json` lives
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and holds no business rules; those live in
//! `commands/*.rs`.
//!
//! ## One Operation at a Time
//!
//! Every mutating method takes `&mut self`. A client holding a `RosterApi` can
//! therefore never run two table rewrites at once, which is what keeps the
//! read-modify-rewrite cycle of update and delete from losing writes. Sharing an
//! API across threads means wrapping it in a `Mutex`.
//!
//! ## Generic Over DataStore
//!
//! - Production: `RosterApi<FileStore>`
//! - Testing: `RosterApi<InMemoryStore>`

use crate::commands;
use crate::commands::config::ConfigAction;
use crate::config::RosterConfig;
use crate::error::Result;
use crate::model::{College, Department, Student};
use crate::store::DataStore;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

pub struct RosterApi<S: DataStore> {
    store: S,
    config: RosterConfig,
    root: PathBuf,
}

impl<S: DataStore> RosterApi<S> {
    pub fn new(store: S, config: RosterConfig, root: PathBuf) -> Self {
        Self {
            store,
            config,
            root,
        }
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn create_student(&mut self, student: Student) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, &self.config, student)
    }

    pub fn get_students(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn get_student(&self, id: &str) -> Result<commands::CmdResult> {
        commands::list::find(&self.store, id)
    }

    pub fn update_student(&mut self, student: Student) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, &self.config, student)
    }

    pub fn delete_student(&mut self, id: &str) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, id)
    }

    pub fn create_college(&mut self, college: College) -> Result<commands::CmdResult> {
        commands::catalog::create(&mut self.store, college)
    }

    pub fn get_colleges(&self) -> Result<commands::CmdResult> {
        commands::catalog::list::<College, _>(&self.store)
    }

    pub fn delete_college(&mut self, id: &str) -> Result<commands::CmdResult> {
        commands::catalog::delete::<College, _>(&mut self.store, id)
    }

    pub fn create_department(&mut self, department: Department) -> Result<commands::CmdResult> {
        commands::catalog::create(&mut self.store, department)
    }

    pub fn get_departments(&self) -> Result<commands::CmdResult> {
        commands::catalog::list::<Department, _>(&self.store)
    }

    pub fn delete_department(&mut self, id: &str) -> Result<commands::CmdResult> {
        commands::catalog::delete::<Department, _>(&mut self.store, id)
    }

    pub fn doctor(&mut self, fix: bool) -> Result<commands::CmdResult> {
        commands::doctor::run(&mut self.store, fix)
    }

    pub fn init(&mut self) -> Result<commands::CmdResult> {
        commands::init::run(&mut self.store)
    }

    pub fn paths(&self, id: Option<&str>) -> Result<commands::CmdResult> {
        let mut result = commands::paths::run(&self.store, id)?;
        if id.is_none() {
            result
                .paths
                .push(("config".to_string(), self.root.join(CONFIG_FILENAME)));
        }
        Ok(result)
    }

    /// Show or change configuration. A successful set replaces the config this
    /// API validates against; `photo-file-name` applies from the next start.
    pub fn config_action(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let is_set = matches!(action, ConfigAction::Set(..));
        let result = commands::config::run(&self.root, action)?;
        if is_set {
            if let Some(config) = &result.config {
                self.config = config.clone();
            }
        }
        Ok(result)
    }
}
