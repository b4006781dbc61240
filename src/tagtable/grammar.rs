//! # Marker Grammar
//!
//! Outline items carry inline markers: a delimiter (default `#`) followed by a run of
//! non-whitespace characters. Each marker is classified as exactly one of:
//!
//! | Marker | Result | Rule |
//! |--------|--------|------|
//! | `#p3`, `#P12` | `Property { key: "P", value: "3" }` | priority shorthand, key normalized to `P` |
//! | `#status-done` | `Property { key: "status", value: "done" }` | `key-value`, split on the first hyphen |
//! | `#due-2024-05-01` | `Property { key: "due", value: "2024-05-01" }` | value may contain hyphens |
//! | `#urgent`, `#-x`, `#x-` | `Literal { text: "#urgent" }` | anything else, kept verbatim |
//!
//! Rules are tried in that order and the first match wins. Classification never
//! fails: a marker that is not a property is a literal tag.

use crate::error::{Result, TagtableError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const DEFAULT_DELIMITER: char = '#';

/// Key used for the `#p<digits>` shorthand.
pub const PRIORITY_KEY: &str = "P";

static PRIORITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[pP]([0-9]+)$").expect("priority pattern is valid"));

static KEY_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^\s-]+)-(\S+)$").expect("key-value pattern is valid"));

static DEFAULT_GRAMMAR: Lazy<TagGrammar> = Lazy::new(|| {
    TagGrammar::new(DEFAULT_DELIMITER).expect("default delimiter produces a valid pattern")
});

/// The classification of a single marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParsedMarker {
    Property { key: String, value: String },
    Literal { text: String },
}

impl ParsedMarker {
    pub fn property(key: impl Into<String>, value: impl Into<String>) -> Self {
        ParsedMarker::Property {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        ParsedMarker::Literal { text: text.into() }
    }

    pub fn is_property(&self) -> bool {
        matches!(self, ParsedMarker::Property { .. })
    }
}

/// A marker as found in source text, borrowed from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerToken<'a> {
    pub text: &'a str,
    /// Byte offset of the delimiter in the scanned text.
    pub start: usize,
}

impl MarkerToken<'_> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Scans text for markers and classifies them.
#[derive(Debug, Clone)]
pub struct TagGrammar {
    delimiter: char,
    scan_re: Regex,
}

impl Default for TagGrammar {
    fn default() -> Self {
        DEFAULT_GRAMMAR.clone()
    }
}

impl TagGrammar {
    /// Builds a grammar for the given delimiter.
    ///
    /// The delimiter must be a single non-whitespace character.
    pub fn new(delimiter: char) -> Result<Self> {
        if delimiter.is_whitespace() {
            return Err(TagtableError::InvalidDelimiter(delimiter.to_string()));
        }
        let pattern = format!(r"{}\S+", regex::escape(&delimiter.to_string()));
        let scan_re = Regex::new(&pattern)
            .map_err(|_| TagtableError::InvalidDelimiter(delimiter.to_string()))?;
        Ok(Self { delimiter, scan_re })
    }

    /// Builds a grammar from a configured delimiter string.
    pub fn from_delimiter(delimiter: &str) -> Result<Self> {
        let mut chars = delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c),
            _ => Err(TagtableError::InvalidDelimiter(delimiter.to_string())),
        }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Finds every marker in `text`, in order of appearance.
    pub fn scan<'a>(&self, text: &'a str) -> Vec<MarkerToken<'a>> {
        self.scan_re
            .find_iter(text)
            .map(|m| MarkerToken {
                text: m.as_str(),
                start: m.start(),
            })
            .collect()
    }

    /// Classifies one marker.
    pub fn classify(&self, marker: &str) -> ParsedMarker {
        let body = marker.strip_prefix(self.delimiter).unwrap_or(marker);

        if let Some(caps) = PRIORITY_RE.captures(body) {
            return ParsedMarker::property(PRIORITY_KEY, &caps[1]);
        }

        if let Some(caps) = KEY_VALUE_RE.captures(body) {
            return ParsedMarker::property(&caps[1], &caps[2]);
        }

        ParsedMarker::literal(marker)
    }

    /// Removes every marker from `text`. Surrounding whitespace is left alone.
    pub fn strip(&self, text: &str) -> String {
        self.scan_re.replace_all(text, "").into_owned()
    }
}

/// Classifies a marker with the default `#` delimiter.
pub fn classify(marker: &str) -> ParsedMarker {
    DEFAULT_GRAMMAR.classify(marker)
}
