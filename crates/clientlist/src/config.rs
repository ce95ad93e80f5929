//! # Configuration
//!
//! Clientlist configuration is loaded by [`clapfig`] from a single TOML file in the
//! data directory.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Data directory config**: `<data dir>/clientlist.toml`.
//! 2. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `storage_key` | `clientTableSortCriteria` | Slot key holding the saved sort criteria |
//! | `default_tab` | `all` | Tab selected when a table opens (`all`, `individual`, `company`) |

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::model::Tab;

pub const DEFAULT_STORAGE_KEY: &str = "clientTableSortCriteria";

/// Configuration for clientlist, stored in `clientlist.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientListConfig {
    /// Persistence slot key for the sort criteria list
    #[config(default = "clientTableSortCriteria")]
    pub storage_key: String,

    /// Tab selected when a table is initialized
    #[config(default = "all")]
    pub default_tab: String,
}

impl Default for ClientListConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_tab: "all".to_string(),
        }
    }
}

impl ClientListConfig {
    /// The configured default tab. Unknown values fall back to `all`.
    pub fn default_tab(&self) -> Tab {
        match self.default_tab.parse() {
            Ok(tab) => tab,
            Err(e) => {
                tracing::warn!(error = %e, "invalid default_tab in config, using all");
                Tab::All
            }
        }
    }

    /// The storage key, falling back to the default when blank.
    pub fn storage_key(&self) -> &str {
        let key = self.storage_key.trim();
        if key.is_empty() {
            DEFAULT_STORAGE_KEY
        } else {
            key
        }
    }
}
