//! # Storage Layer
//!
//! The only state that outlives a session is the ordered list of sort criteria. It is
//! kept in a **persistence slot**: a tiny key-value store addressed by a single fixed
//! key (`clientTableSortCriteria` unless configured otherwise).
//!
//! ## Contract
//!
//! - `get_item` returns `Ok(None)` when nothing was stored under the key.
//! - `get_item` returns `Err` only on real I/O failures.
//! - `set_item` replaces the stored text wholesale and MUST NOT leave partial writes.
//!
//! Interpreting the text (JSON array of criteria) is the caller's business; slots
//! store opaque strings.
//!
//! ## Implementations
//!
//! - [`fs::FsSlot`]: One `<key>.json` file per key inside a data directory.
//! - [`memory::MemSlot`]: In-memory map for tests and throwaway sessions.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── clientlist.toml                 # Configuration (optional)
//! └── clientTableSortCriteria.json    # Persisted sort criteria
//! ```

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Abstract key-value persistence used by the sort criteria manager.
///
/// Methods take `&self`; implementations use interior mutability where needed
/// since the table core is single-threaded.
pub trait PersistenceSlot {
    /// Read the text stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing what was there.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: PersistenceSlot + ?Sized> PersistenceSlot for &T {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }
}
