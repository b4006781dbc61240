//! # Filter Language
//!
//! The same small language is used for the global filter and for every column
//! filter:
//!
//! ```text
//! review, ship, !blocked
//! ```
//!
//! - Terms are separated by `,` and trimmed; empty terms are ignored.
//! - A term starting with `!` is an exclude term, any other term is an include term.
//! - Matching is case-insensitive substring containment.
//!
//! A scope (the whole row for the global filter, one cell for a column filter)
//! passes when:
//!
//! - there are no include terms, or at least one include term matches, **and**
//! - no exclude term matches.
//!
//! For the global filter a term matches the row when it is contained in one of
//! its cells; a term never matches text spanning two cells.
//!
//! A row is visible when the global scope and every column scope pass. An empty
//! filter never hides anything.

use crate::error::{Result, TagtableError};
use crate::schema::Schema;
use crate::table::RecordTable;

pub const TERM_SEPARATOR: char = ',';
pub const NEGATION_PREFIX: char = '!';

/// A parsed filter string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpression {
    include_terms: Vec<String>,
    exclude_terms: Vec<String>,
}

impl FilterExpression {
    pub fn parse(raw: &str) -> Self {
        let mut expr = Self::default();
        for term in raw.split(TERM_SEPARATOR).map(str::trim) {
            match term.strip_prefix(NEGATION_PREFIX) {
                Some(excluded) => {
                    let excluded = excluded.trim();
                    if !excluded.is_empty() {
                        expr.exclude_terms.push(excluded.to_lowercase());
                    }
                }
                None if !term.is_empty() => expr.include_terms.push(term.to_lowercase()),
                None => {}
            }
        }
        expr
    }

    pub fn include_terms(&self) -> &[String] {
        &self.include_terms
    }

    pub fn exclude_terms(&self) -> &[String] {
        &self.exclude_terms
    }

    pub fn is_empty(&self) -> bool {
        self.include_terms.is_empty() && self.exclude_terms.is_empty()
    }

    /// Whether `text` passes this expression.
    pub fn matches(&self, text: &str) -> bool {
        if self.is_empty() {
            return true;
        }
        let text = text.to_lowercase();

        if !self.include_terms.is_empty()
            && !self.include_terms.iter().any(|t| text.contains(t.as_str()))
        {
            return false;
        }
        !self.exclude_terms.iter().any(|t| text.contains(t.as_str()))
    }

    /// Whether a row passes, each term being checked against one cell at a
    /// time so that no term matches across a cell boundary.
    pub fn matches_row(&self, cells: &[String]) -> bool {
        if self.is_empty() {
            return true;
        }
        let cells: Vec<String> = cells.iter().map(|c| c.to_lowercase()).collect();
        let found = |term: &String| cells.iter().any(|c| c.contains(term.as_str()));

        if !self.include_terms.is_empty() && !self.include_terms.iter().any(found) {
            return false;
        }
        !self.exclude_terms.iter().any(found)
    }
}

/// The global filter plus any column filters, resolved against a schema.
#[derive(Debug, Clone, Default)]
pub struct TableFilter {
    global: FilterExpression,
    columns: Vec<(usize, FilterExpression)>,
}

impl TableFilter {
    pub fn new(global: &str) -> Self {
        Self {
            global: FilterExpression::parse(global),
            columns: Vec::new(),
        }
    }

    /// Adds a filter on the named column.
    pub fn with_column(mut self, schema: &Schema, column: &str, raw: &str) -> Result<Self> {
        let position = schema
            .position(column)
            .ok_or_else(|| TagtableError::UnknownColumn(column.to_string()))?;
        self.columns.push((position, FilterExpression::parse(raw)));
        Ok(self)
    }

    /// Builds a filter from a global expression and `COLUMN=EXPR` arguments.
    pub fn from_args<S: AsRef<str>>(schema: &Schema, global: &str, column_args: &[S]) -> Result<Self> {
        column_args.iter().try_fold(Self::new(global), |filter, arg| {
            let (column, raw) = parse_column_arg(arg.as_ref())?;
            filter.with_column(schema, column, raw)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.columns.iter().all(|(_, expr)| expr.is_empty())
    }

    /// Whether a row with these rendered cells is visible.
    pub fn visible(&self, cells: &[String]) -> bool {
        if !self.global.matches_row(cells) {
            return false;
        }
        self.columns.iter().all(|(column, expr)| {
            expr.matches(cells.get(*column).map(String::as_str).unwrap_or_default())
        })
    }

    /// Visibility of every record in `table`, in record order.
    pub fn visible_mask(&self, table: &RecordTable) -> Vec<bool> {
        table
            .records()
            .iter()
            .map(|record| self.visible(&table.row_cells(record)))
            .collect()
    }
}

/// Splits a `COLUMN=EXPR` argument.
pub fn parse_column_arg(arg: &str) -> Result<(&str, &str)> {
    match arg.split_once('=') {
        Some((column, raw)) if !column.trim().is_empty() => Ok((column.trim(), raw)),
        _ => Err(TagtableError::InvalidColumnFilter(arg.to_string())),
    }
}

/// Evaluates raw filter strings against one row.
///
/// `column_filters[i]` applies to `cells[i]`; missing entries impose nothing.
pub fn visible<S: AsRef<str>>(cells: &[String], global_filter: &str, column_filters: &[S]) -> bool {
    if !FilterExpression::parse(global_filter).matches_row(cells) {
        return false;
    }
    column_filters.iter().enumerate().all(|(i, raw)| {
        FilterExpression::parse(raw.as_ref())
            .matches(cells.get(i).map(String::as_str).unwrap_or_default())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::RecordExtractor;
    use crate::model::{ParentLink, RawItem};

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn parse_splits_and_tags_terms() {
        let expr = FilterExpression::parse(" Foo , !Bar,,baz ");
        assert_eq!(expr.include_terms(), &["foo", "baz"]);
        assert_eq!(expr.exclude_terms(), &["bar"]);
    }

    #[test]
    fn parse_ignores_empty_and_bare_negation() {
        assert!(FilterExpression::parse("").is_empty());
        assert!(FilterExpression::parse(" , ,").is_empty());
        assert!(FilterExpression::parse("!").is_empty());
    }

    #[test]
    fn include_and_exclude() {
        let expr = FilterExpression::parse("foo,!bar");
        assert!(expr.matches("a foo here"));
        assert!(!expr.matches("foo and bar"));
        assert!(!expr.matches("neither"));
    }

    #[test]
    fn includes_are_ored() {
        let expr = FilterExpression::parse("alpha, beta");
        assert!(expr.matches("ALPHA"));
        assert!(expr.matches("Beta"));
        assert!(!expr.matches("gamma"));
    }

    #[test]
    fn exclude_only() {
        let expr = FilterExpression::parse("!done");
        assert!(expr.matches("open"));
        assert!(!expr.matches("Done"));
    }

    #[test]
    fn global_filter_row_semantics() {
        let row = cells(&["Inbox", "foo task"]);
        assert!(visible::<&str>(&row, "foo,!bar", &[]));

        let row = cells(&["bar", "foo task"]);
        assert!(!visible::<&str>(&row, "foo,!bar", &[]));

        let row = cells(&["Inbox", "other"]);
        assert!(!visible::<&str>(&row, "foo,!bar", &[]));
    }

    #[test]
    fn empty_filters_impose_nothing() {
        let row = cells(&["a", "b"]);
        assert!(visible(&row, "", &["", ""]));
    }

    #[test]
    fn column_filters_are_anded_with_global() {
        let row = cells(&["Inbox", "write docs", "2"]);
        assert!(visible(&row, "docs", &["", "", "2"]));
        assert!(!visible(&row, "docs", &["", "", "3"]));
        assert!(!visible(&row, "code", &["", "", "2"]));
    }

    #[test]
    fn column_filter_only_sees_its_cell() {
        let row = cells(&["review", "write docs"]);
        assert!(!visible(&row, "", &["", "review"]));
    }

    #[test]
    fn global_filter_does_not_match_across_cells() {
        let row = cells(&["foo", "bar"]);
        assert!(!visible::<&str>(&row, "foobar", &[]));
        assert!(!visible::<&str>(&row, "foo bar", &[]));

        let row = cells(&["Inbox", "write docs"]);
        assert!(!visible::<&str>(&row, "inbox write", &[]));
        assert!(visible::<&str>(&row, "write docs", &[]));
    }

    #[test]
    fn table_filter_global_scope_stays_within_cells() {
        let items = vec![RawItem::new("#p1 write docs", "L1").with_parent(ParentLink::new("Inbox", "L0"))];
        let table = RecordTable::build(&items, RecordExtractor::default())
            .into_table()
            .unwrap();

        assert_eq!(TableFilter::new("inbox write").visible_mask(&table), vec![false]);
        assert_eq!(TableFilter::new("inbox").visible_mask(&table), vec![true]);
    }

    #[test]
    fn parse_column_arg_splits_on_first_equals() {
        assert_eq!(parse_column_arg("P=1,2").unwrap(), ("P", "1,2"));
        assert_eq!(parse_column_arg("note=a=b").unwrap(), ("note", "a=b"));
        assert_eq!(parse_column_arg(" owner =ann").unwrap(), ("owner", "ann"));
        assert!(parse_column_arg("no-equals").is_err());
        assert!(parse_column_arg("=x").is_err());
    }

    #[test]
    fn table_filter_visible_mask() {
        let items = vec![
            RawItem::new("#p1 #owner-ann write docs", "L1"),
            RawItem::new("#p2 #owner-bob fix bug", "L2"),
            RawItem::new("#p3 #owner-ann review", "L3"),
        ];
        let table = RecordTable::build(&items, RecordExtractor::default())
            .into_table()
            .unwrap();

        let filter = TableFilter::from_args(table.schema(), "", &["owner=ann"]).unwrap();
        assert_eq!(filter.visible_mask(&table), vec![true, false, true]);

        let filter = TableFilter::from_args(table.schema(), "!review", &["owner=ann"]).unwrap();
        assert_eq!(filter.visible_mask(&table), vec![true, false, false]);

        assert!(TableFilter::new("").is_empty());
    }

    #[test]
    fn table_filter_unknown_column() {
        let items = vec![RawItem::new("#p1 a", "L1")];
        let table = RecordTable::build(&items, RecordExtractor::default())
            .into_table()
            .unwrap();
        let err = TableFilter::from_args(table.schema(), "", &["missing=x"]).unwrap_err();
        assert!(matches!(err, TagtableError::UnknownColumn(c) if c == "missing"));
    }
}
