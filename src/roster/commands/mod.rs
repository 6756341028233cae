//! # Command Layer
//!
//! This module contains the **core business logic** of roster: the record service.
//! Each operation lives in its own submodule as a plain function over a
//! [`DataStore`](crate::store::DataStore).
//!
//! ## Role and Responsibilities
//!
//! Commands:
//! - Read the current state from the store (every call, no caching)
//! - Validate the request and enforce uniqueness
//! - Drive asset directory changes alongside the table changes
//! - Return a structured [`CmdResult`] with the affected records and messages
//!
//! Commands never print, never parse arguments and never exit; the client decides
//! how to present a `CmdResult` or an error.
//!
//! ## Ordering of Side Effects
//!
//! Table and asset changes are not transactional together. The order is chosen
//! so a crash leaves something `doctor` can find:
//! - create: asset dir and photo first, then append (crash → orphan dir)
//! - delete: table rewrite first, then remove the dir (crash → orphan dir)
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests run on
//! `InMemoryStore` and cover every branch and error kind.
//!
//! ## Command Modules
//!
//! - [`create`]: Add a student
//! - [`list`]: List all students
//! - [`update`]: Replace a student in place
//! - [`delete`]: Remove a student and its assets
//! - [`catalog`]: Colleges and departments
//! - [`doctor`]: Check tables against asset directories
//! - [`init`]: Initialize storage
//! - [`paths`]: Report storage locations
//! - [`config`]: Manage configuration
//! - [`helpers`]: Request validation and lookups

use crate::config::RosterConfig;
use crate::model::{College, Department, Student};
use crate::store::DoctorReport;
use std::path::PathBuf;

pub mod catalog;
pub mod config;
pub mod create;
pub mod delete;
pub mod doctor;
pub mod helpers;
pub mod init;
pub mod list;
pub mod paths;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Students created, updated or removed by the command, as stored.
    pub affected_students: Vec<Student>,
    /// Students to display, in file order.
    pub listed_students: Vec<Student>,
    pub colleges: Vec<College>,
    pub departments: Vec<Department>,
    pub paths: Vec<(String, PathBuf)>,
    pub config: Option<RosterConfig>,
    pub doctor: Option<DoctorReport>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_students(mut self, students: Vec<Student>) -> Self {
        self.affected_students = students;
        self
    }

    pub fn with_listed_students(mut self, students: Vec<Student>) -> Self {
        self.listed_students = students;
        self
    }

    pub fn with_colleges(mut self, colleges: Vec<College>) -> Self {
        self.colleges = colleges;
        self
    }

    pub fn with_departments(mut self, departments: Vec<Department>) -> Self {
        self.departments = departments;
        self
    }

    pub fn with_paths(mut self, paths: Vec<(String, PathBuf)>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_config(mut self, config: RosterConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_doctor(mut self, report: DoctorReport) -> Self {
        self.doctor = Some(report);
        self
    }
}
