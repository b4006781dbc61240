//! # API Facade
//!
//! A thin session over the command layer and the single entry point for UIs.
//!
//! A [`TagtableApi`] owns a source, the effective configuration and the result of
//! the latest extraction pass:
//!
//! - [`TagtableApi::refresh`] discards the current table and runs a new pass;
//! - `current_schema`, `current_records`, `visible_mask` and `sorted_order` query
//!   the latest table;
//! - [`TagtableApi::view`] and [`TagtableApi::columns`] return `CmdResult`s for
//!   rendering.
//!
//! ## Generic Over OutlineSource
//!
//! `TagtableApi<S: OutlineSource>` works with any source:
//! - Production: `TagtableApi<Box<dyn OutlineSource>>` from [`crate::source::open_source`]
//! - Testing: `TagtableApi<InMemorySource>`
//!
//! Sort state belongs to the session, so consecutive requests on one column
//! toggle its direction until the next refresh.

use crate::commands::{self, CmdResult};
use crate::config::TagtableConfig;
use crate::error::{Result, TagtableError};
use crate::extract::RecordExtractor;
use crate::filter::TableFilter;
use crate::grammar::TagGrammar;
use crate::model::Record;
use crate::schema::Schema;
use crate::sort::{SortDirection, SortEngine};
use crate::source::poll::{Sleeper, StabilityPoller, ThreadSleeper};
use crate::source::OutlineSource;
use crate::table::RecordTable;

pub struct TagtableApi<S: OutlineSource> {
    source: S,
    config: TagtableConfig,
    grammar: TagGrammar,
    poller: StabilityPoller,
    sleeper: Box<dyn Sleeper>,
    table: Option<RecordTable>,
    sort: SortEngine,
}

impl<S: OutlineSource> TagtableApi<S> {
    /// Fails when the configured delimiter is unusable.
    pub fn new(source: S, config: TagtableConfig) -> Result<Self> {
        let grammar = config.grammar()?;
        let poller = config.poller();
        Ok(Self {
            source,
            config,
            grammar,
            poller,
            sleeper: Box::new(ThreadSleeper),
            table: None,
            sort: SortEngine::default(),
        })
    }

    pub fn with_sleeper(mut self, sleeper: Box<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn config(&self) -> &TagtableConfig {
        &self.config
    }

    /// Runs a new extraction pass, replacing the previous table and sort state.
    pub fn refresh(&mut self) -> Result<CmdResult> {
        self.table = None;
        self.sort = SortEngine::default();

        let extractor = RecordExtractor::new(self.grammar.clone(), self.config.placeholders());
        let report = commands::scan::run(&self.source, &self.poller, self.sleeper.as_ref(), extractor)?;
        let result = CmdResult::from(&report);

        if let Some(table) = report.outcome.into_table() {
            self.sort = SortEngine::new(&table);
            self.table = Some(table);
        }
        Ok(result)
    }

    pub fn table(&self) -> Option<&RecordTable> {
        self.table.as_ref()
    }

    pub fn current_schema(&self) -> Option<&Schema> {
        self.table.as_ref().map(RecordTable::schema)
    }

    /// Records of the latest pass, in extraction order. Empty before a
    /// successful refresh.
    pub fn current_records(&self) -> &[Record] {
        self.table.as_ref().map(RecordTable::records).unwrap_or_default()
    }

    /// Visibility of each current record under a global filter and
    /// `COLUMN=EXPR` column filters.
    pub fn visible_mask<T: AsRef<str>>(&self, global: &str, column_filters: &[T]) -> Result<Vec<bool>> {
        match &self.table {
            Some(table) => {
                let filter = TableFilter::from_args(table.schema(), global, column_filters)?;
                Ok(filter.visible_mask(table))
            }
            None => Ok(Vec::new()),
        }
    }

    /// Handles one sort request and returns the resulting record order.
    pub fn sorted_order(&mut self, column: &str) -> Result<Vec<usize>> {
        self.sort_by(column)?;
        Ok(self.sort.order().to_vec())
    }

    /// Handles one sort request and returns the direction applied.
    pub fn sort_by(&mut self, column: &str) -> Result<SortDirection> {
        match &self.table {
            Some(table) => self.sort.request(table, column),
            None => Err(TagtableError::UnknownColumn(column.to_string())),
        }
    }

    /// Filtered and sorted rows of the current table.
    pub fn view<T: AsRef<str>, U: AsRef<str>>(
        &mut self,
        global: &str,
        column_filters: &[T],
        sort_requests: &[U],
    ) -> Result<CmdResult> {
        let Some(table) = &self.table else {
            return Ok(CmdResult::default());
        };
        let filter = TableFilter::from_args(table.schema(), global, column_filters)?;
        commands::view::run(table, &filter, &mut self.sort, sort_requests)
    }

    pub fn columns(&self) -> CmdResult {
        match &self.table {
            Some(table) => commands::columns::run(table),
            None => CmdResult::default(),
        }
    }

    pub fn show_config(&self) -> CmdResult {
        commands::config::run(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawItem;
    use crate::source::memory::fixtures::{RecordingSleeper, SourceFixture};
    use crate::source::memory::InMemorySource;

    fn api(source: InMemorySource) -> TagtableApi<InMemorySource> {
        TagtableApi::new(source, TagtableConfig::default())
            .unwrap()
            .with_sleeper(Box::new(RecordingSleeper::default()))
    }

    #[test]
    fn queries_before_refresh_are_empty() {
        let api = api(SourceFixture::new().with_sample().source);
        assert!(api.current_schema().is_none());
        assert!(api.current_records().is_empty());
        assert!(api.visible_mask::<&str>("", &[]).unwrap().is_empty());
    }

    #[test]
    fn refresh_builds_table() {
        let mut api = api(SourceFixture::new().with_sample().source);
        let result = api.refresh().unwrap();

        assert!(result.messages.is_empty());
        assert_eq!(api.current_records().len(), 3);
        assert_eq!(
            api.current_schema().unwrap().property_keys(),
            &["P", "urgent", "owner"]
        );
    }

    #[test]
    fn refresh_discards_previous_table() {
        let mut api = api(SourceFixture::new().with_tasks(2).source);
        api.refresh().unwrap();
        assert_eq!(api.current_records().len(), 2);

        api.source_mut().clear();
        api.source_mut().push(RawItem::new("plain", "L1"));
        let result = api.refresh().unwrap();

        assert!(api.table().is_none());
        assert!(api.current_records().is_empty());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn refresh_rebuilds_schema_from_scratch() {
        let mut api = api(InMemorySource::with_items(vec![RawItem::new("#owner-ann a", "L1")]));
        api.refresh().unwrap();
        assert_eq!(api.current_schema().unwrap().property_keys(), &["owner"]);

        api.source_mut().clear();
        api.source_mut().push(RawItem::new("#p3 b", "L1"));
        api.refresh().unwrap();
        assert_eq!(api.current_schema().unwrap().property_keys(), &["P"]);
    }

    #[test]
    fn sorted_order_toggles() {
        let mut api = api(InMemorySource::with_items(vec![
            RawItem::new("#p10 a", "L1"),
            RawItem::new("#p2 b", "L2"),
            RawItem::new("#p9 c", "L3"),
        ]));
        api.refresh().unwrap();

        assert_eq!(api.sorted_order("P").unwrap(), vec![1, 2, 0]);
        assert_eq!(api.sorted_order("P").unwrap(), vec![0, 2, 1]);
        assert_eq!(api.sort_by("Item").unwrap(), SortDirection::Ascending);
    }

    #[test]
    fn visible_mask_with_global_and_column_filters() {
        let mut api = api(SourceFixture::new().with_sample().source);
        api.refresh().unwrap();

        assert_eq!(api.visible_mask::<&str>("review", &[]).unwrap(), vec![true, false, false]);
        assert_eq!(api.visible_mask("", &["P=1"]).unwrap(), vec![true, true, false]);
        assert!(matches!(
            api.visible_mask("", &["Nope=1"]),
            Err(TagtableError::UnknownColumn(_))
        ));
    }

    #[test]
    fn view_and_columns() {
        let mut api = api(SourceFixture::new().with_sample().source);
        api.refresh().unwrap();

        let result = api.view::<&str, &str>("!docs", &[], &["P"]).unwrap();
        let view = result.view.unwrap();
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].cells[1], "review this");
        assert_eq!(view.rows[1].cells[1], "ship release");

        assert_eq!(api.columns().columns.len(), 9);
    }

    #[test]
    fn custom_placeholders_flow_through() {
        let config = TagtableConfig {
            no_parent_placeholder: "top".into(),
            ..Default::default()
        };
        let mut api = TagtableApi::new(InMemorySource::with_items(vec![RawItem::new("#p1", "L1")]), config)
            .unwrap()
            .with_sleeper(Box::new(RecordingSleeper::default()));
        api.refresh().unwrap();

        let record = &api.current_records()[0];
        assert_eq!(record.parent_label, "top");
        assert_eq!(record.item_label, "(no text)");
    }

    #[test]
    fn bad_delimiter_is_rejected() {
        let config = TagtableConfig {
            delimiter: " ".into(),
            ..Default::default()
        };
        assert!(matches!(
            TagtableApi::new(InMemorySource::new(), config),
            Err(TagtableError::InvalidDelimiter(_))
        ));
    }
}
