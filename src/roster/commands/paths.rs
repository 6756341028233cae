use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Entity;
use crate::store::DataStore;

use super::helpers::validate_id;

/// Table files and the storage root, or a single student's asset directory.
pub fn run<S: DataStore>(store: &S, id: Option<&str>) -> Result<CmdResult> {
    if let Some(id) = id {
        validate_id(id)?;
        return Ok(CmdResult::default().with_paths(vec![(id.to_string(), store.asset_dir(id))]));
    }

    let mut paths: Vec<_> = Entity::ALL
        .iter()
        .map(|entity| (entity.to_string(), store.table_path(*entity)))
        .collect();
    paths.push(("storage".to_string(), store.asset_root()));
    Ok(CmdResult::default().with_paths(paths))
}
