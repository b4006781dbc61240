//! JSON snapshot source: a file holding a JSON array of [`RawItem`]s.
//!
//! ```json
//! [
//!   {"text": "#p1 review this", "item_ref": "n2",
//!    "parent": {"label": "Inbox", "item_ref": "n1"}}
//! ]
//! ```
//!
//! Every field except `text` may be omitted.

use super::OutlineSource;
use crate::error::Result;
use crate::model::RawItem;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct JsonSource {
    items: Vec<RawItem>,
}

impl JsonSource {
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let items: Vec<RawItem> = serde_json::from_str(content)?;
        Ok(Self { items })
    }
}

impl OutlineSource for JsonSource {
    fn list_items(&self) -> Result<Vec<RawItem>> {
        Ok(self.items.clone())
    }

    fn item_count(&self) -> Result<usize> {
        Ok(self.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TagtableError;

    #[test]
    fn parse_full_and_sparse_items() {
        let source = JsonSource::parse(
            r##"[
                {"text": "#p1 review", "item_ref": "n2",
                 "parent": {"label": "Inbox", "item_ref": "n1"},
                 "date": "2024-01-02", "mentions": ["@ann"],
                 "backlinks": [{"label": "Plan", "item_ref": "n9"}]},
                {"text": "loose"}
            ]"##,
        )
        .unwrap();

        let items = source.list_items().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].parent.as_ref().unwrap().label, "Inbox");
        assert_eq!(items[0].backlinks[0].item_ref, "n9");
        assert_eq!(items[1].item_ref, None);
        assert!(items[1].mentions.is_empty());
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        assert!(matches!(
            JsonSource::parse("{not json"),
            Err(TagtableError::Serialization(_))
        ));
    }

    #[test]
    fn empty_array_is_an_empty_source() {
        let source = JsonSource::parse("[]").unwrap();
        assert_eq!(source.item_count().unwrap(), 0);
    }
}
