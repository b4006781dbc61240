//! # Sorting
//!
//! Rows sort by the rendered text of one column, trimmed and lowercased:
//!
//! - two numbers (finite `f64`) compare numerically, so `2 < 9 < 10`;
//! - two non-numbers compare as strings;
//! - a number sorts before a non-number, which keeps the order total when a column
//!   mixes both (blank cells end up after the numbers).
//!
//! Requesting the same column twice in a row flips the direction. Requesting a
//! different column starts it ascending. Each request re-sorts the current
//! arrangement with a stable sort, so rows with equal keys keep their previous
//! relative order.

use crate::error::{Result, TagtableError};
use crate::model::Record;
use crate::table::RecordTable;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

fn parse_number(key: &str) -> Option<f64> {
    key.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Compares two rendered cells.
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    match (parse_number(&a), parse_number(&b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(&b),
    }
}

/// Comparator over records of `table` for the given column position.
pub fn sort_key(
    table: &RecordTable,
    column: usize,
    direction: SortDirection,
) -> impl Fn(&Record, &Record) -> Ordering + '_ {
    move |a, b| direction.apply(compare_cells(&table.cell(a, column), &table.cell(b, column)))
}

/// Current arrangement of a table's rows plus the toggle state of every column
/// sorted so far.
#[derive(Debug, Clone, Default)]
pub struct SortEngine {
    order: Vec<usize>,
    directions: HashMap<usize, SortDirection>,
    active: Option<usize>,
}

impl SortEngine {
    /// Starts with the table's extraction order.
    pub fn new(table: &RecordTable) -> Self {
        Self {
            order: (0..table.len()).collect(),
            directions: HashMap::new(),
            active: None,
        }
    }

    /// Handles one sort request on the named column and returns the direction used.
    pub fn request(&mut self, table: &RecordTable, column: &str) -> Result<SortDirection> {
        let position = table
            .schema()
            .position(column)
            .ok_or_else(|| TagtableError::UnknownColumn(column.to_string()))?;

        let direction = match self.directions.get(&position) {
            Some(direction) if self.active == Some(position) => direction.toggled(),
            _ => SortDirection::Ascending,
        };

        // cells are rendered once per row rather than once per comparison
        let keys: Vec<String> = table
            .records()
            .iter()
            .map(|record| table.cell(record, position))
            .collect();
        self.order
            .sort_by(|&a, &b| direction.apply(compare_cells(&keys[a], &keys[b])));

        self.directions.insert(position, direction);
        self.active = Some(position);
        Ok(direction)
    }

    /// Record indices in display order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// The column position and direction of the last request.
    pub fn current(&self) -> Option<(usize, SortDirection)> {
        let active = self.active?;
        self.directions.get(&active).map(|&direction| (active, direction))
    }

    /// Direction a column was last sorted in, if it has been sorted.
    pub fn direction_of(&self, position: usize) -> Option<SortDirection> {
        self.directions.get(&position).copied()
    }
}
