use crate::criteria::SortCriteriaManager;
use crate::model::{ClientRecord, ClientStatus, ClientType};
use crate::store::fs::FsSlot;
use std::path::PathBuf;
use tempfile::TempDir;

pub const TEST_KEY: &str = "clientTableSortCriteria";

/// An individual client with valid timestamps and an email derived from the name.
pub fn record(id: u64, name: &str) -> ClientRecord {
    record_of(id, name, ClientType::Individual)
}

pub fn record_of(id: u64, name: &str, client_type: ClientType) -> ClientRecord {
    let slug = name.to_lowercase().split_whitespace().collect::<Vec<_>>().join(".");
    ClientRecord {
        id,
        name: name.to_string(),
        client_type,
        email: format!("{}@clients.test", slug),
        status: ClientStatus::Active,
        created_at: "2024-01-15T09:30:00.000Z".to_string(),
        updated_at: "2024-02-20T16:45:00.000Z".to_string(),
        updated_by: "admin".to_string(),
    }
}

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub slot: FsSlot,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let slot = FsSlot::new(root.clone());
        Self {
            _temp_dir: temp_dir,
            slot,
            root,
        }
    }

    /// A manager over this environment's directory, as a fresh session would build it.
    pub fn manager(&self) -> SortCriteriaManager<FsSlot> {
        SortCriteriaManager::new(self.slot.clone(), TEST_KEY)
    }
}
