//! # Rendering
//!
//! Styled terminal output from minijinja templates, plus JSON output.
//!
//! Layout (column widths, truncation, padding) is computed here because it needs
//! Unicode-aware widths. Templates receive finished strings and a style name per
//! cell; the `style` filter applies the theme, or nothing when color is off.

use super::styles::{names, Theme, TAGTABLE_THEME};
use super::templates::{COLUMNS_TEMPLATE, CONFIG_TEMPLATE, MESSAGES_TEMPLATE, TABLE_TEMPLATE};
use console::Term;
use minijinja::{Environment, Error, Value};
use serde::Serialize;
use tagtable::commands::{CmdMessage, CmdResult, MessageLevel, TableView};
use tagtable::config::TagtableConfig;
use tagtable::error::Result;
use tagtable::schema::FIXED_COLUMNS;
use tagtable::sort::SortDirection;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const MAX_CELL_WIDTH: usize = 40;
pub const COLUMN_GAP: &str = "  ";
pub const ASCENDING_MARKER: &str = "↑";
pub const DESCENDING_MARKER: &str = "↓";

/// Whether stdout can show colors.
pub fn terminal_supports_color() -> bool {
    Term::stdout().features().colors_supported()
}

fn render_template<T: Serialize>(
    name: &str,
    template: &str,
    data: &T,
    theme: &Theme,
    use_color: bool,
) -> std::result::Result<String, Error> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);

    let theme = theme.clone();
    env.add_filter("style", move |value: Value, style: String| -> String {
        theme.apply(&style, &value.to_string(), use_color)
    });

    env.add_template_owned(name.to_string(), template.to_string())?;
    env.get_template(name)?.render(data)
}

#[derive(Serialize)]
struct CellData {
    text: String,
    padding: String,
    style: &'static str,
}

#[derive(Serialize)]
struct TableData {
    header: Vec<CellData>,
    rows: Vec<Vec<CellData>>,
    footer: String,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

#[derive(Serialize)]
struct ColumnData {
    name: String,
    style: &'static str,
}

#[derive(Serialize)]
struct ColumnsData {
    columns: Vec<ColumnData>,
}

#[derive(Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
}

#[derive(Serialize)]
struct ConfigData {
    entries: Vec<ConfigEntry>,
}

fn column_style(index: usize) -> &'static str {
    match index {
        0 => names::PARENT,
        1 => names::ITEM,
        2 => names::TAG,
        3 => names::DATE,
        4 => names::MENTION,
        5 => names::BACKLINK,
        _ => names::PROPERTY,
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn header_labels(view: &TableView) -> Vec<String> {
    view.columns
        .iter()
        .map(|column| match &view.sort {
            Some(sort) if &sort.column == column => {
                let marker = match sort.direction {
                    SortDirection::Ascending => ASCENDING_MARKER,
                    SortDirection::Descending => DESCENDING_MARKER,
                };
                format!("{} {}", column, marker)
            }
            _ => column.clone(),
        })
        .collect()
}

fn footer(view: &TableView) -> String {
    let noun = if view.total == 1 { "record" } else { "records" };
    let mut footer = format!("{} of {} {}", view.rows.len(), view.total, noun);
    if let Some(sort) = &view.sort {
        let direction = match sort.direction {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        };
        footer.push_str(&format!(", sorted by {} ({})", sort.column, direction));
    }
    footer
}

fn layout(view: &TableView) -> TableData {
    let headers = header_labels(view);
    let last = headers.len().saturating_sub(1);

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            view.rows
                .iter()
                .filter_map(|row| row.cells.get(i))
                .map(|cell| cell.width())
                .chain(std::iter::once(header.width()))
                .max()
                .unwrap_or(0)
                .min(MAX_CELL_WIDTH)
        })
        .collect();

    let cell = |i: usize, text: &str, style: &'static str| {
        let text = truncate_to_width(text, widths[i]);
        let padding = if i == last {
            String::new()
        } else {
            format!("{}{}", " ".repeat(widths[i].saturating_sub(text.width())), COLUMN_GAP)
        };
        CellData {
            text,
            padding,
            style,
        }
    };

    let sorted_column = view.sort.as_ref().map(|s| s.column.as_str());
    let header = headers
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let style = if Some(view.columns[i].as_str()) == sorted_column {
                names::HEADER_SORTED
            } else {
                names::HEADER
            };
            cell(i, text, style)
        })
        .collect();

    let rows = view
        .rows
        .iter()
        .map(|row| {
            (0..headers.len())
                .map(|i| cell(i, row.cells.get(i).map(String::as_str).unwrap_or(""), column_style(i)))
                .collect()
        })
        .collect();

    TableData {
        header,
        rows,
        footer: footer(view),
    }
}

pub fn render_table(view: &TableView, use_color: bool) -> String {
    let data = layout(view);
    render_template("table", TABLE_TEMPLATE, &data, &TAGTABLE_THEME, use_color)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

/// Renders command messages, one per line.
pub fn render_messages(messages: &[CmdMessage], use_color: bool) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let data = MessagesData {
        messages: messages
            .iter()
            .map(|msg| MessageData {
                content: msg.content.clone(),
                style: match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                },
            })
            .collect(),
    };

    render_template("messages", MESSAGES_TEMPLATE, &data, &TAGTABLE_THEME, use_color)
        .unwrap_or_else(|_| messages.iter().map(|m| format!("{}\n", m.content)).collect())
}

pub fn render_columns(columns: &[String], use_color: bool) -> String {
    let data = ColumnsData {
        columns: columns
            .iter()
            .enumerate()
            .map(|(i, name)| ColumnData {
                name: name.clone(),
                style: if i < FIXED_COLUMNS.len() {
                    names::HEADER
                } else {
                    names::PROPERTY
                },
            })
            .collect(),
    };
    render_template("columns", COLUMNS_TEMPLATE, &data, &TAGTABLE_THEME, use_color)
        .unwrap_or_else(|_| columns.iter().map(|c| format!("{}\n", c)).collect())
}

pub fn render_config(config: &TagtableConfig, use_color: bool) -> String {
    let quoted = |s: &str| format!("\"{}\"", s.replace('"', "\\\""));
    let data = ConfigData {
        entries: vec![
            ConfigEntry {
                key: "delimiter",
                value: quoted(&config.delimiter),
            },
            ConfigEntry {
                key: "empty_text_placeholder",
                value: quoted(&config.empty_text_placeholder),
            },
            ConfigEntry {
                key: "no_parent_placeholder",
                value: quoted(&config.no_parent_placeholder),
            },
            ConfigEntry {
                key: "poll_interval_ms",
                value: config.poll_interval_ms.to_string(),
            },
            ConfigEntry {
                key: "stable_checks",
                value: config.stable_checks.to_string(),
            },
            ConfigEntry {
                key: "max_checks",
                value: config.max_checks.to_string(),
            },
        ],
    };
    render_template("config", CONFIG_TEMPLATE, &data, &TAGTABLE_THEME, use_color)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    view: Option<&'a TableView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    columns: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<&'a TagtableConfig>,
    messages: &'a [CmdMessage],
}

pub fn render_json(result: &CmdResult) -> Result<String> {
    let output = JsonOutput {
        view: result.view.as_ref(),
        columns: (!result.columns.is_empty()).then_some(result.columns.as_slice()),
        config: result.config.as_ref(),
        messages: &result.messages,
    };
    Ok(format!("{}\n", serde_json::to_string_pretty(&output)?))
}
