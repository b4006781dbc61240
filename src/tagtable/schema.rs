//! # Column Schema
//!
//! Columns are discovered, not declared. Every table starts with the fixed columns
//! below; each distinct property key seen during an extraction pass adds one more
//! column, in the order the key was first seen.

use serde::Serialize;

/// Columns present in every table, in display order.
pub const FIXED_COLUMNS: &[&str] = &["Parent", "Item", "Tags", "Date", "Mentions", "Backlinks"];

/// Prefix that forces a column name to resolve to a property key.
pub const PROPERTY_QUALIFIER: &str = "prop:";

/// A resolved column: one of the fixed columns or a property key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column<'a> {
    Parent,
    Item,
    Tags,
    Date,
    Mentions,
    Backlinks,
    Property(&'a str),
}

/// The ordered column list for one extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    property_keys: Vec<String>,
}

impl Schema {
    /// All column names: fixed columns, then property keys.
    pub fn columns(&self) -> Vec<String> {
        FIXED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.property_keys.iter().cloned())
            .collect()
    }

    pub fn property_keys(&self) -> &[String] {
        &self.property_keys
    }

    pub fn len(&self) -> usize {
        FIXED_COLUMNS.len() + self.property_keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position of a column by name.
    ///
    /// Resolution order:
    ///
    /// 1. `prop:<key>` names a property key only.
    /// 2. A fixed column name written exactly (`Item`).
    /// 3. A property key, matched exactly.
    /// 4. A fixed column name in any case, so `--sort item` works.
    ///
    /// A key spelled like a fixed column (`#Item-x`) is reached as `prop:Item`.
    pub fn position(&self, name: &str) -> Option<usize> {
        if let Some(key) = name.strip_prefix(PROPERTY_QUALIFIER) {
            return self.property_position(key);
        }
        FIXED_COLUMNS
            .iter()
            .position(|c| *c == name)
            .or_else(|| self.property_position(name))
            .or_else(|| FIXED_COLUMNS.iter().position(|c| c.eq_ignore_ascii_case(name)))
    }

    fn property_position(&self, key: &str) -> Option<usize> {
        self.property_keys
            .iter()
            .position(|k| k == key)
            .map(|i| FIXED_COLUMNS.len() + i)
    }

    /// Resolves a column position into a [`Column`].
    pub fn column_at(&self, index: usize) -> Option<Column<'_>> {
        let column = match index {
            0 => Column::Parent,
            1 => Column::Item,
            2 => Column::Tags,
            3 => Column::Date,
            4 => Column::Mentions,
            5 => Column::Backlinks,
            i => Column::Property(self.property_keys.get(i - FIXED_COLUMNS.len())?),
        };
        Some(column)
    }
}

/// Collects property keys while records are extracted.
#[derive(Debug, Default)]
pub struct SchemaAccumulator {
    keys: Vec<String>,
}

impl SchemaAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key` unless it was already seen.
    pub fn register(&mut self, key: &str) {
        if !self.keys.iter().any(|k| k == key) {
            self.keys.push(key.to_string());
        }
    }

    /// Fixed columns followed by the accumulated keys.
    pub fn columns(&self) -> Vec<String> {
        FIXED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.keys.iter().cloned())
            .collect()
    }

    pub fn reset(&mut self) {
        self.keys.clear();
    }

    /// Consumes the accumulator, producing the pass's schema.
    pub fn finish(self) -> Schema {
        Schema {
            property_keys: self.keys,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_accumulator_has_fixed_columns_only() {
        let acc = SchemaAccumulator::new();
        assert_eq!(acc.columns(), FIXED_COLUMNS);
    }

    #[test]
    fn register_keeps_first_seen_order_without_duplicates() {
        let mut acc = SchemaAccumulator::new();
        acc.register("P");
        acc.register("status");
        acc.register("P");
        acc.register("owner");
        acc.register("status");

        let columns = acc.columns();
        assert_eq!(
            &columns[FIXED_COLUMNS.len()..],
            &["P".to_string(), "status".to_string(), "owner".to_string()]
        );
    }

    #[test]
    fn reset_clears_keys() {
        let mut acc = SchemaAccumulator::new();
        acc.register("P");
        acc.reset();
        assert_eq!(acc.columns().len(), FIXED_COLUMNS.len());
    }

    #[test]
    fn schema_position_and_column_at() {
        let mut acc = SchemaAccumulator::new();
        acc.register("P");
        acc.register("owner");
        let schema = acc.finish();

        assert_eq!(schema.len(), 8);
        assert_eq!(schema.position("Item"), Some(1));
        assert_eq!(schema.position("item"), Some(1));
        assert_eq!(schema.position("owner"), Some(7));
        assert_eq!(schema.position("Owner"), None);
        assert_eq!(schema.column_at(0), Some(Column::Parent));
        assert_eq!(schema.column_at(6), Some(Column::Property("P")));
        assert_eq!(schema.column_at(8), None);
    }

    #[test]
    fn lowercase_property_key_wins_over_case_insensitive_fixed_name() {
        let mut acc = SchemaAccumulator::new();
        acc.register("date");
        let schema = acc.finish();

        assert_eq!(schema.position("date"), Some(6));
        assert_eq!(schema.position("Date"), Some(3));
    }

    #[test]
    fn key_spelled_like_a_fixed_column_stays_reachable() {
        let mut acc = SchemaAccumulator::new();
        acc.register("Item");
        acc.register("owner");
        let schema = acc.finish();

        assert_eq!(schema.position("Item"), Some(1));
        assert_eq!(schema.position("prop:Item"), Some(6));
        assert_eq!(schema.position("prop:owner"), Some(7));
        assert_eq!(schema.position("prop:Parent"), None);
    }
}
