//! # Context Initialization
//!
//! Builds a ready-to-use [`ClientTable`] whose sort criteria persist on disk.
//!
//! ## Data Directory Resolution
//!
//! 1. `data_override`, when given.
//! 2. The `CLIENTLIST_DATA` environment variable (primarily for tests).
//! 3. The OS data directory (via the `directories` crate).
//! 4. `./.clientlist` when the OS gives no data directory.
//!
//! The same directory holds `clientlist.toml` and the criteria file written by
//! [`FsSlot`].

use crate::config::ClientListConfig;
use crate::criteria::SortCriteriaManager;
use crate::store::fs::FsSlot;
use crate::table::ClientTable;
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use std::path::PathBuf;

pub struct ClientListContext {
    pub table: ClientTable<FsSlot>,
    pub config: ClientListConfig,
    pub data_dir: PathBuf,
}

/// Resolve the directory holding config and persisted criteria.
pub fn resolve_data_dir(data_override: Option<PathBuf>) -> PathBuf {
    if let Some(path) = data_override {
        return path;
    }
    std::env::var("CLIENTLIST_DATA")
        .ok()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            ProjectDirs::from("com", "clientlist", "clientlist")
                .map(|dirs| dirs.data_dir().to_path_buf())
        })
        .unwrap_or_else(|| PathBuf::from(".clientlist"))
}

/// Load config, open the filesystem slot, restore saved criteria.
///
/// The table starts empty; hand it records with [`ClientTable::set_records`].
pub fn initialize(data_override: Option<PathBuf>) -> ClientListContext {
    let data_dir = resolve_data_dir(data_override);

    let config: ClientListConfig = Clapfig::builder()
        .app_name("clientlist")
        .file_name("clientlist.toml")
        .search_paths(vec![SearchPath::Path(data_dir.clone())])
        .search_mode(SearchMode::Merge)
        .load()
        .unwrap_or_default();

    let slot = FsSlot::new(data_dir.clone());
    let manager = SortCriteriaManager::new(slot, config.storage_key());
    tracing::info!(
        data_dir = %data_dir.display(),
        criteria = manager.len(),
        "client table initialized"
    );

    let mut table = ClientTable::new(Vec::new(), manager);
    table.set_tab(config.default_tab());

    ClientListContext {
        table,
        config,
        data_dir,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClientType, SortField, Tab};
    use crate::test_utils::{TestEnv, TEST_KEY};
    use std::fs;

    #[test]
    fn test_override_wins() {
        let env = TestEnv::new();
        assert_eq!(
            resolve_data_dir(Some(env.root.clone())),
            env.root.clone()
        );
    }

    #[test]
    fn test_initialize_restores_previous_session() {
        let env = TestEnv::new();

        let mut first = initialize(Some(env.root.clone()));
        first.table.criteria_mut().add(SortField::UpdatedAt);
        first.table.criteria_mut().add(SortField::Name);
        drop(first);

        let second = initialize(Some(env.root.clone()));
        let fields: Vec<SortField> = second
            .table
            .criteria()
            .criteria()
            .iter()
            .map(|c| c.field)
            .collect();
        assert_eq!(fields, vec![SortField::UpdatedAt, SortField::Name]);
        assert!(env.root.join(format!("{}.json", TEST_KEY)).exists());
    }

    #[test]
    fn test_initialize_reads_config_file() {
        let env = TestEnv::new();
        fs::write(
            env.root.join("clientlist.toml"),
            "storage_key = \"crmSort\"\ndefault_tab = \"company\"\n",
        )
        .unwrap();

        let mut ctx = initialize(Some(env.root.clone()));
        assert_eq!(ctx.config.storage_key(), "crmSort");
        assert_eq!(ctx.table.tab(), Tab::Only(ClientType::Company));

        ctx.table.criteria_mut().add(SortField::Id);
        assert!(env.root.join("crmSort.json").exists());
    }

    #[test]
    fn test_initialize_with_corrupt_criteria_file() {
        let env = TestEnv::new();
        fs::write(env.root.join(format!("{}.json", TEST_KEY)), "{oops").unwrap();

        let ctx = initialize(Some(env.root.clone()));
        assert!(ctx.table.criteria().is_empty());
    }
}
