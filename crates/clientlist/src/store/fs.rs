use super::PersistenceSlot;
use crate::error::{ClientListError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Directory-backed persistence slot: each key lives in `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FsSlot {
    root: PathBuf,
}

impl FsSlot {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    ///
    /// Keys are used as file names, so path separators are rejected.
    pub fn item_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(&['/', '\\'][..]) || key == "." || key == ".." {
            return Err(ClientListError::Store(format!(
                "Invalid storage key: {:?}",
                key
            )));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(ClientListError::Io)?;
        }
        Ok(())
    }
}

impl PersistenceSlot for FsSlot {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(ClientListError::Io)?;
        Ok(Some(content))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.item_path(key)?;
        self.ensure_dir()?;

        // Atomic write
        let tmp_file = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_file, value).map_err(ClientListError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, &path) {
            let _ = fs::remove_file(&tmp_file);
            return Err(ClientListError::Io(e));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FsSlot::new(dir.path().to_path_buf());
        assert_eq!(slot.get_item("clientTableSortCriteria").unwrap(), None);
    }

    #[test]
    fn test_set_creates_dir_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("data");
        let slot = FsSlot::new(root.clone());

        slot.set_item("criteria", "[]").unwrap();

        assert!(root.join("criteria.json").exists());
        assert_eq!(slot.get_item("criteria").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_set_overwrites_without_leaving_tmp_files() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FsSlot::new(dir.path().to_path_buf());

        slot.set_item("criteria", "first").unwrap();
        slot.set_item("criteria", "second").unwrap();

        assert_eq!(slot.get_item("criteria").unwrap().as_deref(), Some("second"));
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_failed_rename_removes_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FsSlot::new(dir.path().to_path_buf());
        // A non-empty directory in the way makes the rename fail
        let blocker = dir.path().join("criteria.json");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), "x").unwrap();

        assert!(slot.set_item("criteria", "[]").is_err());

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "tmp files left behind: {:?}", leftovers);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FsSlot::new(dir.path().to_path_buf());
        assert!(slot.set_item("../escape", "x").is_err());
        assert!(slot.get_item("").is_err());
    }
}
