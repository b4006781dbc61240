//! # CLI Behavior
//!
//! One UI client for tagtable. The only place that knows about terminal I/O,
//! exit codes and output formatting.
//!
//! ## Commands
//!
//! - `tagtable table <PATH>`: scan, filter, sort and print the table.
//!   - `--filter "review,!blocked"` global filter
//!   - `--where owner=ann` column filter, repeatable
//!   - `--sort P` sort request, repeatable; `--sort P --sort P` sorts descending
//!   - `--output term|plain|json`
//! - `tagtable columns <PATH>`: the discovered schema.
//! - `tagtable config`: the effective configuration.
//!
//! `-v` enables debug logging on stderr, `-vv` trace. `RUST_LOG` takes precedence.
//!
//! ## Module Structure
//!
//! - `commands`: context setup and per-command handlers
//! - `render`: table layout and template rendering
//! - `setup`: argument parsing via clap
//! - `styles`: the theme
//! - `templates`: embedded templates

mod commands;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
