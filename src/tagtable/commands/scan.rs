use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::extract::RecordExtractor;
use crate::source::poll::{PollOutcome, Sleeper, StabilityPoller};
use crate::source::OutlineSource;
use crate::table::{RecordTable, ScanOutcome};

#[derive(Debug, Clone)]
pub struct ScanReport {
    pub outcome: ScanOutcome,
    pub poll: PollOutcome,
}

/// Waits for the source to settle, then runs one extraction pass over it.
pub fn run<S>(
    source: &S,
    poller: &StabilityPoller,
    sleeper: &dyn Sleeper,
    extractor: RecordExtractor,
) -> Result<ScanReport>
where
    S: OutlineSource + ?Sized,
{
    let poll = poller.wait(source, sleeper)?;
    let items = source.list_items()?;
    let outcome = RecordTable::build(&items, extractor);
    Ok(ScanReport { outcome, poll })
}

/// User-facing messages for a scan. A successful pass over a settled source
/// has none.
pub fn messages(report: &ScanReport) -> Vec<CmdMessage> {
    let mut messages = Vec::new();

    if let PollOutcome::Exhausted { checks, items } = report.poll {
        messages.push(CmdMessage::warning(format!(
            "Source was still loading after {} checks; using the {} items available.",
            checks, items
        )));
    }

    match &report.outcome {
        ScanOutcome::EmptySource => {
            messages.push(CmdMessage::warning("The outline has no items."));
        }
        ScanOutcome::NoQualifyingRecords { scanned } => {
            messages.push(CmdMessage::warning(format!(
                "None of the {} items carries a property marker.",
                scanned
            )));
        }
        ScanOutcome::Table(_) => {}
    }
    messages
}

impl From<&ScanReport> for CmdResult {
    fn from(report: &ScanReport) -> Self {
        CmdResult {
            messages: messages(report),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::source::memory::fixtures::{GrowingSource, RecordingSleeper, SourceFixture};
    use std::time::Duration;

    fn scan<S: OutlineSource>(source: &S) -> ScanReport {
        run(
            source,
            &StabilityPoller::default(),
            &RecordingSleeper::default(),
            RecordExtractor::default(),
        )
        .unwrap()
    }

    #[test]
    fn sample_outline_builds_a_table() {
        let source = SourceFixture::new().with_sample().source;
        let report = scan(&source);

        let table = report.outcome.table().unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.schema().property_keys(), &["P", "urgent", "owner"]);
        assert!(messages(&report).is_empty());
    }

    #[test]
    fn empty_source_is_a_warning() {
        let source = SourceFixture::new().source;
        let report = scan(&source);

        assert!(matches!(report.outcome, ScanOutcome::EmptySource));
        let messages = messages(&report);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].level, MessageLevel::Warning);
        assert!(messages[0].content.contains("no items"));
    }

    #[test]
    fn no_qualifying_records_is_reported_distinctly() {
        let source = SourceFixture::new().with_plain("one").with_plain("#idea two").source;
        let result = CmdResult::from(&scan(&source));

        assert_eq!(result.messages.len(), 1);
        assert!(result.messages[0].content.contains("None of the 2 items"));
    }

    #[test]
    fn exhausted_poll_still_extracts() {
        let source = GrowingSource::new(10, 2);
        let poller = StabilityPoller::new(Duration::from_millis(1), 1, 2);
        let report = run(
            &source,
            &poller,
            &RecordingSleeper::default(),
            RecordExtractor::default(),
        )
        .unwrap();

        assert_eq!(report.poll, PollOutcome::Exhausted { checks: 2, items: 4 });
        assert_eq!(report.outcome.table().unwrap().len(), 4);
        let messages = messages(&report);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].content.contains("still loading"));
    }
}
