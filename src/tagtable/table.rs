//! # Record Table
//!
//! The result of one extraction pass: the records and the schema discovered while
//! building them. A table is never updated in place; refreshing builds a new one.
//!
//! Building a table is where the whole-batch outcomes are decided:
//!
//! - no items at all: [`ScanOutcome::EmptySource`]
//! - items, but none qualifying: [`ScanOutcome::NoQualifyingRecords`]
//! - otherwise a [`RecordTable`]
//!
//! The table also owns the rendering of cells. Filters and sorts operate on the
//! rendered cell text, so both go through [`RecordTable::cell`].

use crate::extract::{ExtractStats, RecordExtractor};
use crate::model::{RawItem, Record};
use crate::schema::{Column, Schema};
use serde::Serialize;
use tracing::info;

/// Records and schema for one extraction pass.
#[derive(Debug, Clone, Serialize)]
pub struct RecordTable {
    schema: Schema,
    records: Vec<Record>,
    stats: ExtractStats,
}

/// Outcome of building a table from a batch of items.
#[derive(Debug, Clone)]
pub enum ScanOutcome {
    Table(RecordTable),
    EmptySource,
    NoQualifyingRecords { scanned: usize },
}

impl RecordTable {
    /// Runs an extraction pass over `items`.
    pub fn build(items: &[RawItem], mut extractor: RecordExtractor) -> ScanOutcome {
        if items.is_empty() {
            return ScanOutcome::EmptySource;
        }

        let records = extractor.extract_all(items);
        let (schema, stats) = extractor.finish();
        info!(
            scanned = stats.scanned,
            extracted = stats.extracted,
            dropped = stats.missing_anchor,
            columns = schema.len(),
            "extraction pass complete"
        );

        if records.is_empty() {
            return ScanOutcome::NoQualifyingRecords {
                scanned: stats.scanned,
            };
        }

        ScanOutcome::Table(Self {
            schema,
            records,
            stats,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn stats(&self) -> ExtractStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rendered text of one cell. Out-of-range columns render empty.
    pub fn cell(&self, record: &Record, column: usize) -> String {
        match self.schema.column_at(column) {
            Some(Column::Parent) => record.parent_label.clone(),
            Some(Column::Item) => record.item_label.clone(),
            Some(Column::Tags) => record.literal_tags.join(" "),
            Some(Column::Date) => record.date.clone(),
            Some(Column::Mentions) => record.mentions.clone(),
            Some(Column::Backlinks) => record.backlink_labels().join(", "),
            Some(Column::Property(key)) => record.property(key).unwrap_or_default().to_string(),
            None => String::new(),
        }
    }

    /// Rendered text of every cell in a row, in schema order.
    pub fn row_cells(&self, record: &Record) -> Vec<String> {
        (0..self.schema.len())
            .map(|column| self.cell(record, column))
            .collect()
    }
}

impl ScanOutcome {
    pub fn table(&self) -> Option<&RecordTable> {
        match self {
            ScanOutcome::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn into_table(self) -> Option<RecordTable> {
        match self {
            ScanOutcome::Table(table) => Some(table),
            _ => None,
        }
    }
}
