//! # Markdown Outline Source
//!
//! Reads an outline written as nested bullet lists:
//!
//! ```markdown
//! - Inbox
//!   - #p1 #urgent-high review this
//!   - call @ann about [[Release]] on 2024-05-01
//! - Release #owner-bob
//! ```
//!
//! Each list item's own text (nested lists excluded) becomes one [`RawItem`]:
//!
//! - `item_ref` is `L<line>`, the 1-based line the item's bullet sits on.
//! - The parent is the enclosing list item, labelled by its marker-free text.
//! - Mentions are `@word` tokens; the date is the first valid `YYYY-MM-DD` token.
//! - `[[Label]]` links become backlinks on every item whose marker-free text equals
//!   `Label`, ignoring case.

use super::OutlineSource;
use crate::error::Result;
use crate::grammar::TagGrammar;
use crate::model::{Backlink, ParentLink, RawItem};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use std::fs;
use std::path::Path;

static MENTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^\w@])(@\w[\w-]*)").expect("valid mention regex"));

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4}-\d{2}-\d{2})\b").expect("valid date regex"));

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^\[\]]+)\]\]").expect("valid link regex"));

#[derive(Debug, Clone)]
pub struct MarkdownSource {
    items: Vec<RawItem>,
}

impl MarkdownSource {
    pub fn open(path: &Path, grammar: TagGrammar) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content, &grammar))
    }

    pub fn parse(content: &str, grammar: &TagGrammar) -> Self {
        Self {
            items: parse_outline(content, grammar),
        }
    }
}

impl OutlineSource for MarkdownSource {
    fn list_items(&self) -> Result<Vec<RawItem>> {
        Ok(self.items.clone())
    }

    fn item_count(&self) -> Result<usize> {
        Ok(self.items.len())
    }
}

/// A list item while the document is being walked.
#[derive(Debug)]
struct Draft {
    text: String,
    line: usize,
    parent: Option<usize>,
}

impl Draft {
    fn item_ref(&self) -> String {
        format!("L{}", self.line)
    }
}

fn line_starts(content: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(content.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

fn collect_drafts(content: &str) -> Vec<Draft> {
    let starts = line_starts(content);
    let mut drafts: Vec<Draft> = Vec::new();
    let mut open: Vec<usize> = Vec::new();

    // task list checkboxes arrive as `TaskListMarker` events and are skipped
    let parser = Parser::new_ext(content, Options::ENABLE_TASKLISTS);
    for (event, range) in parser.into_offset_iter() {
        match event {
            Event::Start(Tag::Item) => {
                drafts.push(Draft {
                    text: String::new(),
                    line: starts.partition_point(|&s| s <= range.start),
                    parent: open.last().copied(),
                });
                open.push(drafts.len() - 1);
            }
            Event::End(TagEnd::Item) => {
                open.pop();
            }
            Event::Start(Tag::Paragraph) => {
                if let Some(&current) = open.last() {
                    let text = &mut drafts[current].text;
                    if !text.is_empty() && !text.ends_with(' ') {
                        text.push(' ');
                    }
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(&current) = open.last() {
                    drafts[current].text.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(&current) = open.last() {
                    drafts[current].text.push(' ');
                }
            }
            _ => {}
        }
    }
    drafts
}

/// Display label of an item: its text without markers, or the raw text when
/// nothing else is left.
fn label(text: &str, grammar: &TagGrammar) -> String {
    let stripped = grammar.strip(text);
    match stripped.trim() {
        "" => text.trim().to_string(),
        label => label.to_string(),
    }
}

fn mentions(text: &str) -> Vec<String> {
    MENTION_RE
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

fn first_date(text: &str) -> String {
    DATE_RE
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .find(|candidate| NaiveDate::parse_from_str(candidate, "%Y-%m-%d").is_ok())
        .unwrap_or_default()
}

fn parse_outline(content: &str, grammar: &TagGrammar) -> Vec<RawItem> {
    let drafts = collect_drafts(content);
    let labels: Vec<String> = drafts.iter().map(|d| label(&d.text, grammar)).collect();

    let mut backlinks: Vec<Vec<Backlink>> = vec![Vec::new(); drafts.len()];
    for (from, draft) in drafts.iter().enumerate() {
        for caps in LINK_RE.captures_iter(&draft.text) {
            let target = caps[1].trim().to_lowercase();
            for (to, candidate) in labels.iter().enumerate() {
                if to != from && candidate.to_lowercase() == target {
                    backlinks[to].push(Backlink::new(labels[from].clone(), draft.item_ref()));
                }
            }
        }
    }

    drafts
        .iter()
        .zip(backlinks)
        .map(|(draft, backlinks)| {
            let text = draft.text.trim().to_string();
            let mut item = RawItem::new(text, draft.item_ref())
                .with_date(first_date(&draft.text))
                .with_mentions(mentions(&draft.text))
                .with_backlinks(backlinks);
            if let Some(parent) = draft.parent {
                item = item.with_parent(ParentLink::new(
                    labels[parent].clone(),
                    drafts[parent].item_ref(),
                ));
            }
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Vec<RawItem> {
        MarkdownSource::parse(content, &TagGrammar::default())
            .list_items()
            .unwrap()
    }

    #[test]
    fn nested_items_get_parents_and_line_refs() {
        let items = parse("# Notes\n\n- Inbox #area-home\n  - #p1 review this\n  - second\n- Later\n");

        assert_eq!(items.len(), 4);
        assert_eq!(items[0].text, "Inbox #area-home");
        assert_eq!(items[0].item_ref.as_deref(), Some("L3"));
        assert!(items[0].parent.is_none());

        assert_eq!(items[1].text, "#p1 review this");
        assert_eq!(items[1].item_ref.as_deref(), Some("L4"));
        assert_eq!(items[1].parent, Some(ParentLink::new("Inbox", "L3")));

        assert_eq!(items[2].parent.as_ref().unwrap().item_ref.as_deref(), Some("L3"));
        assert!(items[3].parent.is_none());
        assert_eq!(items[3].item_ref.as_deref(), Some("L6"));
    }

    #[test]
    fn deep_nesting() {
        let items = parse("- a\n  - b\n    - c\n");
        assert_eq!(items[2].parent, Some(ParentLink::new("b", "L2")));
    }

    #[test]
    fn inline_code_and_emphasis_are_flattened() {
        let items = parse("- run `make` *now* #p2\n");
        assert_eq!(items[0].text, "run make now #p2");
    }

    #[test]
    fn mentions_and_dates() {
        let items = parse("- ping @ann and @bob-smith on 2024-13-01 or 2024-02-29 #p1\n");
        assert_eq!(items[0].mentions, vec!["@ann", "@bob-smith"]);
        assert_eq!(items[0].date, "2024-02-29");
    }

    #[test]
    fn email_is_not_a_mention() {
        let items = parse("- mail ann@example.com\n");
        assert!(items[0].mentions.is_empty());
    }

    #[test]
    fn links_become_backlinks_on_the_target() {
        let items = parse("- Release #p1\n- prepare notes for [[release]]\n- unrelated\n");
        assert_eq!(
            items[0].backlinks,
            vec![Backlink::new("prepare notes for [[release]]", "L2")]
        );
        assert!(items[1].backlinks.is_empty());
        assert!(items[2].backlinks.is_empty());
    }

    #[test]
    fn no_lists_means_no_items() {
        assert!(parse("# Title\n\nJust a paragraph.\n").is_empty());
    }

    #[test]
    fn paragraphs_of_a_loose_item_are_space_separated() {
        let items = parse("- #p1 first para\n\n  second para @ann\n- other\n");
        assert_eq!(items[0].text, "#p1 first para second para @ann");
        assert_eq!(items[0].mentions, vec!["@ann"]);
        assert_eq!(items[1].text, "other");
    }

    #[test]
    fn link_to_a_multi_paragraph_item_uses_the_joined_label() {
        let items = parse("- Plan\n\n  Q3\n- see [[plan q3]] #p1\n");
        assert_eq!(items[0].backlinks, vec![Backlink::new("see [[plan q3]]", "L4")]);
    }

    #[test]
    fn task_checkboxes_stay_out_of_the_text() {
        let items = parse("- [ ] #p1 task\n- [x] done #p2\n");
        assert_eq!(items[0].text, "#p1 task");
        assert_eq!(items[1].text, "done #p2");
    }

    #[test]
    fn marker_only_parent_keeps_raw_label() {
        let items = parse("- #p1\n  - child\n");
        assert_eq!(items[1].parent.as_ref().unwrap().label, "#p1");
    }
}
