//! # Command Layer
//!
//! The business logic of tagtable. Each command lives in its own submodule and is a
//! plain function over domain types.
//!
//! Commands:
//! - operate on sources, tables, filters and sort state
//! - return a structured [`CmdResult`] (rows, columns, config, messages)
//! - never print, never parse arguments, never decide exit codes
//!
//! Whole-batch outcomes that are not failures (an empty source, no qualifying
//! items, a source that never settled) are reported as [`CmdMessage`]s. Real
//! failures are errors.
//!
//! ## Command Modules
//!
//! - [`scan`]: wait for the source, run an extraction pass
//! - [`view`]: filter and sort a table into display rows
//! - [`columns`]: list the discovered schema
//! - [`config`]: expose the effective configuration

use crate::config::TagtableConfig;
use crate::model::Record;
use crate::sort::SortDirection;
use serde::Serialize;

pub mod columns;
pub mod config;
pub mod scan;
pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
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

/// One displayed row: rendered cells plus the anchors of the record behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub cells: Vec<String>,
    pub item_ref: String,
    pub parent_ref: String,
}

impl DisplayRow {
    pub fn new(cells: Vec<String>, record: &Record) -> Self {
        Self {
            cells,
            item_ref: record.item_ref.clone(),
            parent_ref: record.parent_ref.clone(),
        }
    }
}

/// The active sort of a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
}

/// Filtered, sorted rows ready for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<DisplayRow>,
    /// Records in the table before filtering.
    pub total: usize,
    pub sort: Option<SortState>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub view: Option<TableView>,
    pub columns: Vec<String>,
    pub config: Option<TagtableConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_view(mut self, view: TableView) -> Self {
        self.view = Some(view);
        self
    }

    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_config(mut self, config: TagtableConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Folds `other` into this result. Messages are appended; data fields are
    /// taken from `other` when it has them.
    pub fn merge(&mut self, other: CmdResult) {
        if other.view.is_some() {
            self.view = other.view;
        }
        if !other.columns.is_empty() {
            self.columns = other.columns;
        }
        if other.config.is_some() {
            self.config = other.config;
        }
        self.messages.extend(other.messages);
    }
}
