//! # Record Extraction
//!
//! Turns one [`RawItem`] into zero or one [`Record`]:
//!
//! 1. Scan the item text for markers and classify each one.
//! 2. No property markers: the item does not take part in the table.
//! 3. Otherwise build the property map (last write wins) and the literal tag list
//!    (encounter order), strip every marker from the text for the display label.
//! 4. Copy the ancillary fields through, joining lists with `", "`.
//!
//! Every property key emitted is registered with the pass's
//! [`SchemaAccumulator`]. Items that cannot be anchored (no ref of their own, or a
//! parent without one) are dropped on the spot; a bad item never aborts the pass.

use crate::grammar::{ParsedMarker, TagGrammar};
use crate::model::{RawItem, Record, NO_PARENT_PLACEHOLDER, NO_TEXT_PLACEHOLDER};
use crate::schema::{Schema, SchemaAccumulator};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// Text substituted for missing display values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    pub no_text: String,
    pub no_parent: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            no_text: NO_TEXT_PLACEHOLDER.to_string(),
            no_parent: NO_PARENT_PLACEHOLDER.to_string(),
        }
    }
}

/// Why an item produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No marker classified as a property.
    Unannotated,
    /// The item or its parent has no ref.
    MissingAnchor,
}

/// Per-pass extraction counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractStats {
    pub scanned: usize,
    pub extracted: usize,
    pub unannotated: usize,
    pub missing_anchor: usize,
}

/// Extracts records for a single pass.
///
/// Create one per pass: the schema it accumulates belongs to that pass only.
#[derive(Debug)]
pub struct RecordExtractor {
    grammar: TagGrammar,
    placeholders: Placeholders,
    schema: SchemaAccumulator,
    stats: ExtractStats,
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new(TagGrammar::default(), Placeholders::default())
    }
}

impl RecordExtractor {
    pub fn new(grammar: TagGrammar, placeholders: Placeholders) -> Self {
        Self {
            grammar,
            placeholders,
            schema: SchemaAccumulator::new(),
            stats: ExtractStats::default(),
        }
    }

    /// Extracts a record from `item`, or `None` if the item does not qualify.
    pub fn extract(&mut self, item: &RawItem) -> Option<Record> {
        self.stats.scanned += 1;
        match self.try_extract(item) {
            Ok(record) => {
                self.stats.extracted += 1;
                Some(record)
            }
            Err(SkipReason::Unannotated) => {
                self.stats.unannotated += 1;
                None
            }
            Err(SkipReason::MissingAnchor) => {
                debug!(text = %item.text, "dropping item without an anchor");
                self.stats.missing_anchor += 1;
                None
            }
        }
    }

    fn try_extract(&mut self, item: &RawItem) -> Result<Record, SkipReason> {
        let mut properties: IndexMap<String, String> = IndexMap::new();
        let mut literal_tags = Vec::new();

        for token in self.grammar.scan(&item.text) {
            match self.grammar.classify(token.text) {
                ParsedMarker::Property { key, value } => {
                    properties.insert(key, value);
                }
                ParsedMarker::Literal { text } => literal_tags.push(text),
            }
        }

        if properties.is_empty() {
            return Err(SkipReason::Unannotated);
        }

        let item_ref = item.item_ref.clone().ok_or(SkipReason::MissingAnchor)?;
        let (parent_label, parent_ref) = match &item.parent {
            Some(parent) => {
                let parent_ref = parent.item_ref.clone().ok_or(SkipReason::MissingAnchor)?;
                (parent.label.clone(), parent_ref)
            }
            None => (self.placeholders.no_parent.clone(), String::new()),
        };

        for key in properties.keys() {
            self.schema.register(key);
        }

        let stripped = self.grammar.strip(&item.text);
        let label = stripped.trim();
        let item_label = if label.is_empty() {
            self.placeholders.no_text.clone()
        } else {
            label.to_string()
        };

        let backlinks = item
            .backlinks
            .iter()
            .map(|b| format!("{}|{}", b.label, b.item_ref))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Record {
            parent_label,
            parent_ref,
            item_label,
            item_ref,
            literal_tags,
            properties,
            date: item.date.clone(),
            mentions: item.mentions.join(", "),
            backlinks,
        })
    }

    /// Extracts every item in order, keeping the qualifying ones.
    pub fn extract_all<'a, I>(&mut self, items: I) -> Vec<Record>
    where
        I: IntoIterator<Item = &'a RawItem>,
    {
        items
            .into_iter()
            .filter_map(|item| self.extract(item))
            .collect()
    }

    pub fn stats(&self) -> ExtractStats {
        self.stats
    }

    /// Columns discovered so far.
    pub fn columns(&self) -> Vec<String> {
        self.schema.columns()
    }

    /// Ends the pass, handing over the discovered schema.
    pub fn finish(self) -> (Schema, ExtractStats) {
        (self.schema.finish(), self.stats)
    }
}

/// Extracts one item with the default grammar into a throwaway schema.
pub fn extract(item: &RawItem) -> Option<Record> {
    RecordExtractor::default().extract(item)
}
