use super::OutlineSource;
use crate::error::Result;
use crate::model::RawItem;

/// Items held in memory. Always stable.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    items: Vec<RawItem>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<RawItem>) -> Self {
        Self { items }
    }

    pub fn push(&mut self, item: RawItem) {
        self.items.push(item);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl OutlineSource for InMemorySource {
    fn list_items(&self) -> Result<Vec<RawItem>> {
        Ok(self.items.clone())
    }

    fn item_count(&self) -> Result<usize> {
        Ok(self.items.len())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Backlink, ParentLink};
    use crate::source::poll::Sleeper;
    use std::cell::{Cell, RefCell};
    use std::time::Duration;

    /// A small outline covering every column.
    pub fn sample_items() -> Vec<RawItem> {
        vec![
            RawItem::new("Inbox", "L1"),
            RawItem::new("#p1 #urgent-high review this", "L2")
                .with_parent(ParentLink::new("Inbox", "L1")),
            RawItem::new("#p10 #owner-ann write docs @bob", "L3")
                .with_parent(ParentLink::new("Inbox", "L1"))
                .with_mentions(vec!["@bob".into()]),
            RawItem::new("#p2 #later ship release", "L4")
                .with_date("2024-06-01")
                .with_backlinks(vec![Backlink::new("plan", "L9")]),
            RawItem::new("no markers here", "L5"),
        ]
    }

    pub struct SourceFixture {
        pub source: InMemorySource,
    }

    impl Default for SourceFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SourceFixture {
        pub fn new() -> Self {
            Self {
                source: InMemorySource::new(),
            }
        }

        pub fn with_sample(mut self) -> Self {
            for item in sample_items() {
                self.source.push(item);
            }
            self
        }

        pub fn with_tasks(mut self, count: usize) -> Self {
            for i in 0..count {
                let text = format!("#p{} task {}", i + 1, i + 1);
                self.source.push(RawItem::new(text, format!("T{}", i + 1)));
            }
            self
        }

        pub fn with_plain(mut self, text: &str) -> Self {
            let item_ref = format!("N{}", self.source.items.len() + 1);
            self.source.push(RawItem::new(text, item_ref));
            self
        }
    }

    /// A source that materializes `step` more items on every count check until
    /// `total` are present.
    pub struct GrowingSource {
        total: usize,
        step: usize,
        visible: Cell<usize>,
    }

    impl GrowingSource {
        pub fn new(total: usize, step: usize) -> Self {
            Self {
                total,
                step,
                visible: Cell::new(0),
            }
        }
    }

    impl OutlineSource for GrowingSource {
        fn list_items(&self) -> Result<Vec<RawItem>> {
            Ok((0..self.visible.get())
                .map(|i| RawItem::new(format!("#p{} item", i), format!("G{}", i)))
                .collect())
        }

        fn item_count(&self) -> Result<usize> {
            let next = (self.visible.get() + self.step).min(self.total);
            self.visible.set(next);
            Ok(next)
        }

        fn is_stable(&self) -> bool {
            self.visible.get() == self.total
        }
    }

    /// Records requested sleeps instead of sleeping.
    #[derive(Default)]
    pub struct RecordingSleeper {
        sleeps: RefCell<Vec<Duration>>,
    }

    impl RecordingSleeper {
        pub fn calls(&self) -> usize {
            self.sleeps.borrow().len()
        }

        pub fn total(&self) -> Duration {
            self.sleeps.borrow().iter().sum()
        }
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&self, duration: Duration) {
            self.sleeps.borrow_mut().push(duration);
        }
    }
}
