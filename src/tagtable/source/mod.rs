//! # Ingestion Sources
//!
//! Everything upstream of extraction sits behind the [`OutlineSource`] trait. A
//! source hands out plain [`RawItem`] snapshots; the rest of the pipeline never
//! sees files, parsers or the live document.
//!
//! ## Implementations
//!
//! - [`markdown::MarkdownSource`]: nested bullet lists in a Markdown file
//! - [`json::JsonSource`]: a JSON array of serialized [`RawItem`]s
//! - [`memory::InMemorySource`]: items held in memory, used by tests
//!
//! ## Stability
//!
//! A live outline may still be materializing items when a pass is requested.
//! [`poll::StabilityPoller`] waits until the source reports itself stable and its
//! item count stops growing. File sources are always stable.

use crate::error::{Result, TagtableError};
use crate::grammar::TagGrammar;
use crate::model::RawItem;
use std::path::Path;

pub mod json;
pub mod markdown;
pub mod memory;
pub mod poll;

/// Supplies outline items to an extraction pass.
pub trait OutlineSource {
    /// Snapshot of every item currently materialized, in document order.
    fn list_items(&self) -> Result<Vec<RawItem>>;

    /// Number of items currently materialized.
    fn item_count(&self) -> Result<usize> {
        Ok(self.list_items()?.len())
    }

    /// Whether the source has finished materializing items.
    fn is_stable(&self) -> bool {
        true
    }
}

impl<S: OutlineSource + ?Sized> OutlineSource for Box<S> {
    fn list_items(&self) -> Result<Vec<RawItem>> {
        (**self).list_items()
    }

    fn item_count(&self) -> Result<usize> {
        (**self).item_count()
    }

    fn is_stable(&self) -> bool {
        (**self).is_stable()
    }
}

/// File formats a source can be opened from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Markdown,
    Json,
}

impl SourceFormat {
    /// Picks a format from the file extension. Anything that is not `.json` is
    /// read as Markdown.
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SourceFormat::Json,
            _ => SourceFormat::Markdown,
        }
    }
}

/// Opens the file at `path` as an outline source.
///
/// `format` overrides extension detection. The grammar is needed by the Markdown
/// source to resolve `[[...]]` links against marker-free labels.
pub fn open_source(
    path: &Path,
    format: Option<SourceFormat>,
    grammar: &TagGrammar,
) -> Result<Box<dyn OutlineSource>> {
    if !path.is_file() {
        return Err(TagtableError::Source(format!(
            "{} is not a readable file",
            path.display()
        )));
    }

    let format = format.unwrap_or_else(|| SourceFormat::detect(path));
    tracing::debug!(path = %path.display(), ?format, "opening source");

    let source: Box<dyn OutlineSource> = match format {
        SourceFormat::Markdown => Box::new(markdown::MarkdownSource::open(path, grammar.clone())?),
        SourceFormat::Json => Box::new(json::JsonSource::open(path)?),
    };
    Ok(source)
}
