//! # Domain Model
//!
//! Two shapes of data flow through tagtable:
//!
//! - [`RawItem`]: one outline item as the ingestion source sees it. Free text plus
//!   whatever structural context the source can supply (parent, date, mentions,
//!   backlinks). Sources build these; nothing else mutates them.
//! - [`Record`]: the structured row extracted from a qualifying item. Records are
//!   built once per extraction pass and never modified afterwards. A refresh throws
//!   the whole set away and builds a new one.
//!
//! ## Anchors
//!
//! Every item carries an `item_ref`, the link back to the item in its source
//! (a line anchor for Markdown, an arbitrary id for JSON snapshots). An item that
//! cannot name its own anchor, or whose parent cannot, is not addressable and is
//! dropped during extraction rather than failing the pass.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Display text used when an item is nothing but markers.
pub const NO_TEXT_PLACEHOLDER: &str = "(no text)";

/// Parent label used for top-level items.
pub const NO_PARENT_PLACEHOLDER: &str = "(no parent)";

/// The enclosing item of a [`RawItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentLink {
    pub label: String,
    #[serde(default)]
    pub item_ref: Option<String>,
}

impl ParentLink {
    pub fn new(label: impl Into<String>, item_ref: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            item_ref: Some(item_ref.into()),
        }
    }
}

/// Another item that links to this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backlink {
    pub label: String,
    pub item_ref: String,
}

impl Backlink {
    pub fn new(label: impl Into<String>, item_ref: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            item_ref: item_ref.into(),
        }
    }
}

/// An outline item as delivered by an ingestion source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItem {
    pub text: String,
    #[serde(default)]
    pub item_ref: Option<String>,
    #[serde(default)]
    pub parent: Option<ParentLink>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub mentions: Vec<String>,
    #[serde(default)]
    pub backlinks: Vec<Backlink>,
}

impl RawItem {
    pub fn new(text: impl Into<String>, item_ref: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            item_ref: Some(item_ref.into()),
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent: ParentLink) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_mentions(mut self, mentions: Vec<String>) -> Self {
        self.mentions = mentions;
        self
    }

    pub fn with_backlinks(mut self, backlinks: Vec<Backlink>) -> Self {
        self.backlinks = backlinks;
        self
    }
}

/// One extracted row.
///
/// `properties` keeps keys unique; the position of a key is where it was first
/// seen on the item, the value is the last one written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub parent_label: String,
    pub parent_ref: String,
    pub item_label: String,
    pub item_ref: String,
    pub literal_tags: Vec<String>,
    pub properties: IndexMap<String, String>,
    pub date: String,
    pub mentions: String,
    pub backlinks: String,
}

impl Record {
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Labels of the backlinking items, without their refs.
    pub fn backlink_labels(&self) -> Vec<&str> {
        if self.backlinks.is_empty() {
            return Vec::new();
        }
        self.backlinks
            .split(", ")
            .map(|pair| pair.split_once('|').map_or(pair, |(label, _)| label))
            .collect()
    }
}
