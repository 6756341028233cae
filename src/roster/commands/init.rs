use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Entity;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    store.init()?;
    let storage = store.asset_root();
    let tables = store.table_path(Entity::Students);
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Initialized roster storage at {}",
        storage.parent().unwrap_or(&storage).display()
    )));
    Ok(result.with_paths(vec![
        ("students".to_string(), tables),
        ("storage".to_string(), storage),
    ]))
}
