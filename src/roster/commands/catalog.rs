//! Colleges and departments.
//!
//! Both are plain catalog tables keyed by `id` with a unique `code`. They share
//! the same flat-file mechanics as students but own no asset directories.

use crate::codec::LineRecord;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, RosterError};
use crate::model::{College, Department};
use crate::store::DataStore;
use tracing::info;

use super::helpers::{position_of, validate_id};

/// A record listed in a catalog table.
pub trait CatalogRecord: LineRecord + Clone {
    const LABEL: &'static str;

    fn code(&self) -> &str;

    fn into_result(records: Vec<Self>) -> CmdResult;
}

impl CatalogRecord for College {
    const LABEL: &'static str = "College";

    fn code(&self) -> &str {
        &self.code
    }

    fn into_result(records: Vec<Self>) -> CmdResult {
        CmdResult::default().with_colleges(records)
    }
}

impl CatalogRecord for Department {
    const LABEL: &'static str = "Department";

    fn code(&self) -> &str {
        &self.code
    }

    fn into_result(records: Vec<Self>) -> CmdResult {
        CmdResult::default().with_departments(records)
    }
}

pub fn create<R: CatalogRecord, S: DataStore>(store: &mut S, record: R) -> Result<CmdResult> {
    info!(table = %R::ENTITY, code = record.code(), "create catalog record");
    validate_id(record.id())?;
    if record.code().trim().is_empty() {
        return Err(RosterError::Validation(format!(
            "{} code cannot be empty",
            R::LABEL
        )));
    }

    let records: Vec<R> = store.read_all()?;
    if records.iter().any(|r| r.code() == record.code()) {
        return Err(RosterError::Duplicate(format!(
            "{} with code {}",
            R::LABEL,
            record.code()
        )));
    }
    if position_of(&records, record.id()).is_some() {
        return Err(RosterError::Duplicate(format!("Record {}", record.id())));
    }

    store.append_one(&record)?;

    let mut result = R::into_result(vec![record.clone()]);
    result.add_message(CmdMessage::success(format!(
        "{} created: {}",
        R::LABEL,
        record.code()
    )));
    Ok(result)
}

pub fn list<R: CatalogRecord, S: DataStore>(store: &S) -> Result<CmdResult> {
    info!(table = %R::ENTITY, "list catalog");
    let records: Vec<R> = store.read_all()?;
    Ok(R::into_result(records))
}

pub fn delete<R: CatalogRecord, S: DataStore>(store: &mut S, id: &str) -> Result<CmdResult> {
    info!(table = %R::ENTITY, id, "delete catalog record");
    let mut records: Vec<R> = store.read_all()?;
    let index = position_of(&records, id)
        .ok_or_else(|| RosterError::NotFound(format!("{} with id {}", R::LABEL, id)))?;

    let removed = records.remove(index);
    store.rewrite_all(&records)?;

    let mut result = R::into_result(vec![removed.clone()]);
    result.add_message(CmdMessage::success(format!(
        "{} deleted: {}",
        R::LABEL,
        removed.code()
    )));
    Ok(result)
}
