use crate::commands::{CmdMessage, CmdResult};
use crate::table::RecordTable;

/// Lists the table's columns: the fixed ones, then property keys in first-seen order.
pub fn run(table: &RecordTable) -> CmdResult {
    let schema = table.schema();
    let mut result = CmdResult::default().with_columns(schema.columns());
    result.add_message(CmdMessage::info(format!(
        "{} property columns from {} records.",
        schema.property_keys().len(),
        table.len()
    )));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::RecordExtractor;
    use crate::model::RawItem;

    #[test]
    fn lists_fixed_then_property_columns() {
        let items = vec![
            RawItem::new("#status-open #p2 a", "L1"),
            RawItem::new("#p1 #owner-ann b", "L2"),
        ];
        let table = RecordTable::build(&items, RecordExtractor::default())
            .into_table()
            .unwrap();

        let result = run(&table);
        assert_eq!(
            result.columns,
            vec!["Parent", "Item", "Tags", "Date", "Mentions", "Backlinks", "status", "P", "owner"]
        );
        assert_eq!(result.messages[0].content, "3 property columns from 2 records.");
    }
}
