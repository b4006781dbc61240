use crate::commands::{CmdMessage, CmdResult, DisplayRow, SortState, TableView};
use crate::error::Result;
use crate::filter::TableFilter;
use crate::sort::SortEngine;
use crate::table::RecordTable;

/// Applies the sort requests in order, then filters the sorted rows.
pub fn run<S: AsRef<str>>(
    table: &RecordTable,
    filter: &TableFilter,
    sort: &mut SortEngine,
    sort_requests: &[S],
) -> Result<CmdResult> {
    for column in sort_requests {
        sort.request(table, column.as_ref())?;
    }

    let view = build(table, filter, sort);
    let mut result = CmdResult::default();
    if view.rows.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No records match the filter ({} hidden).",
            view.total
        )));
    }
    Ok(result.with_view(view))
}

/// Rows of `table` in the engine's order, keeping only visible ones.
pub fn build(table: &RecordTable, filter: &TableFilter, sort: &SortEngine) -> TableView {
    let columns = table.schema().columns();
    let rows = sort
        .order()
        .iter()
        .filter_map(|&index| table.records().get(index))
        .filter_map(|record| {
            let cells = table.row_cells(record);
            filter
                .visible(&cells)
                .then(|| DisplayRow::new(cells, record))
        })
        .collect();

    let sort_state = sort.current().and_then(|(position, direction)| {
        columns.get(position).map(|column| SortState {
            column: column.clone(),
            direction,
        })
    });

    TableView {
        columns,
        rows,
        total: table.len(),
        sort: sort_state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TagtableError;
    use crate::extract::RecordExtractor;
    use crate::model::RawItem;
    use crate::sort::SortDirection;

    fn table() -> RecordTable {
        let items = vec![
            RawItem::new("#p10 #owner-ann write docs", "L1"),
            RawItem::new("#p2 #owner-bob fix bug", "L2"),
            RawItem::new("#p9 #owner-ann review", "L3"),
        ];
        RecordTable::build(&items, RecordExtractor::default())
            .into_table()
            .unwrap()
    }

    fn items(view: &TableView) -> Vec<&str> {
        view.rows.iter().map(|r| r.cells[1].as_str()).collect()
    }

    #[test]
    fn unsorted_unfiltered_keeps_extraction_order() {
        let table = table();
        let mut sort = SortEngine::new(&table);
        let result = run::<&str>(&table, &TableFilter::default(), &mut sort, &[]).unwrap();

        let view = result.view.unwrap();
        assert_eq!(items(&view), vec!["write docs", "fix bug", "review"]);
        assert_eq!(view.total, 3);
        assert!(view.sort.is_none());
        assert!(result.messages.is_empty());
    }

    #[test]
    fn repeated_sort_request_toggles() {
        let table = table();
        let mut sort = SortEngine::new(&table);
        let result = run(&table, &TableFilter::default(), &mut sort, &["P", "P"]).unwrap();

        let view = result.view.unwrap();
        assert_eq!(items(&view), vec!["write docs", "review", "fix bug"]);
        assert_eq!(
            view.sort,
            Some(SortState {
                column: "P".into(),
                direction: SortDirection::Descending,
            })
        );
    }

    #[test]
    fn filter_applies_after_sort() {
        let table = table();
        let filter = TableFilter::from_args(table.schema(), "", &["owner=ann"]).unwrap();
        let mut sort = SortEngine::new(&table);
        let result = run(&table, &filter, &mut sort, &["P"]).unwrap();

        let view = result.view.unwrap();
        assert_eq!(items(&view), vec!["review", "write docs"]);
        assert_eq!(view.rows[0].item_ref, "L3");
    }

    #[test]
    fn everything_filtered_out_is_an_info_message() {
        let table = table();
        let mut sort = SortEngine::new(&table);
        let result = run::<&str>(&table, &TableFilter::new("nothing-like-this"), &mut sort, &[]).unwrap();

        assert!(result.view.unwrap().rows.is_empty());
        assert_eq!(result.messages.len(), 1);
        assert!(result.messages[0].content.contains("3 hidden"));
    }

    #[test]
    fn unknown_sort_column_fails() {
        let table = table();
        let mut sort = SortEngine::new(&table);
        let err = run(&table, &TableFilter::default(), &mut sort, &["bogus"]).unwrap_err();
        assert!(matches!(err, TagtableError::UnknownColumn(_)));
    }
}
