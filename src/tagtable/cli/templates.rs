//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates kept as stand-alone files,
//! embedded here as string constants.
//!
//! Conventions:
//!
//! 1. Line breaks are explicit. Loops use `{%- ... -%}` so the only newlines in
//!    the output are the ones written on purpose.
//! 2. Templates never compute layout. Widths and padding arrive precomputed from
//!    `render.rs`; templates place text and pick a style name.
//! 3. Style names are semantic (`tag`, `property`), resolved by `styles.rs`.

pub const TABLE_TEMPLATE: &str = include_str!("templates/table.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
pub const COLUMNS_TEMPLATE: &str = include_str!("templates/columns.tmp");
pub const CONFIG_TEMPLATE: &str = include_str!("templates/config.tmp");
