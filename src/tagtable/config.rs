//! # Configuration
//!
//! Tagtable configuration is loaded with [`confique`] from layered sources.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `TAGTABLE_DELIMITER`, `TAGTABLE_MAX_CHECKS`, ...
//! 2. **Project Config**: `./tagtable.toml` in the working directory.
//! 3. **Global Config**: `tagtable.toml` in the OS config directory (via `directories`).
//! 4. **Compiled Defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `delimiter` | `#` | Character that starts a marker |
//! | `empty_text_placeholder` | `(no text)` | Item label when an item is only markers |
//! | `no_parent_placeholder` | `(no parent)` | Parent label for top-level items |
//! | `poll_interval_ms` | `100` | Pause between source stability checks |
//! | `stable_checks` | `1` | Checks without growth before a source counts as settled |
//! | `max_checks` | `20` | Checks before giving up on a source settling |

use crate::error::Result;
use crate::extract::Placeholders;
use crate::grammar::TagGrammar;
use crate::model::{NO_PARENT_PLACEHOLDER, NO_TEXT_PLACEHOLDER};
use crate::source::poll::{
    StabilityPoller, DEFAULT_INTERVAL, DEFAULT_MAX_CHECKS, DEFAULT_STABLE_CHECKS,
};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "tagtable.toml";

/// Configuration for tagtable, stored in `tagtable.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TagtableConfig {
    /// Character that starts a marker.
    #[config(default = "#", env = "TAGTABLE_DELIMITER")]
    pub delimiter: String,

    /// Item label used when nothing but markers is left.
    #[config(default = "(no text)", env = "TAGTABLE_EMPTY_TEXT_PLACEHOLDER")]
    pub empty_text_placeholder: String,

    /// Parent label used for top-level items.
    #[config(default = "(no parent)", env = "TAGTABLE_NO_PARENT_PLACEHOLDER")]
    pub no_parent_placeholder: String,

    #[config(default = 100, env = "TAGTABLE_POLL_INTERVAL_MS")]
    pub poll_interval_ms: u64,

    #[config(default = 1, env = "TAGTABLE_STABLE_CHECKS")]
    pub stable_checks: u32,

    #[config(default = 20, env = "TAGTABLE_MAX_CHECKS")]
    pub max_checks: u32,
}

impl Default for TagtableConfig {
    fn default() -> Self {
        Self {
            delimiter: "#".to_string(),
            empty_text_placeholder: NO_TEXT_PLACEHOLDER.to_string(),
            no_parent_placeholder: NO_PARENT_PLACEHOLDER.to_string(),
            poll_interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
            stable_checks: DEFAULT_STABLE_CHECKS,
            max_checks: DEFAULT_MAX_CHECKS,
        }
    }
}

/// Path of the user-wide config file, if the platform has a config directory.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tagtable").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

impl TagtableConfig {
    /// Loads the layered configuration. Missing files are skipped.
    pub fn load(project_file: Option<&Path>, global_file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = project_file {
            builder = builder.file(path);
        }
        if let Some(path) = global_file {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    /// Loads from the working directory and the global config directory.
    pub fn load_default() -> Result<Self> {
        let project = Path::new(CONFIG_FILE_NAME);
        let global = global_config_path();
        Self::load(Some(project), global.as_deref())
    }

    pub fn grammar(&self) -> Result<TagGrammar> {
        TagGrammar::from_delimiter(&self.delimiter)
    }

    pub fn placeholders(&self) -> Placeholders {
        Placeholders {
            no_text: self.empty_text_placeholder.clone(),
            no_parent: self.no_parent_placeholder.clone(),
        }
    }

    pub fn poller(&self) -> StabilityPoller {
        StabilityPoller::new(
            Duration::from_millis(self.poll_interval_ms),
            self.stable_checks,
            self.max_checks,
        )
    }
}
