//! # Tagtable Architecture
//!
//! Tagtable turns the inline markers of an outline (`#p1`, `#owner-ann`, `#idea`)
//! into a table: one row per annotated item, one column per property key, with a
//! global filter, per-column filters and click-to-toggle sorting.
//!
//! It is a library that happens to have a CLI client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders tables, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Session over one source: refresh, query, sort            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - scan, view, columns, config; returns CmdResult           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Pipeline (grammar, extract, schema, table, filter, sort)   │
//! │  Ingestion (source/): OutlineSource, stability polling      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Pipeline
//!
//! 1. A source settles ([`source::poll`]) and hands out [`model::RawItem`]s.
//! 2. [`grammar`] finds and classifies markers; [`extract`] turns each item with at
//!    least one property marker into a [`model::Record`] and feeds the
//!    [`schema::SchemaAccumulator`].
//! 3. [`table::RecordTable::build`] bundles records and schema, or reports an empty
//!    source / no qualifying records.
//! 4. [`filter`] and [`sort`] work on the rendered cells of the table.
//!
//! Every refresh is a full rebuild. Nothing is updated in place.
//!
//! ## No I/O in the Core
//!
//! From `api.rs` inward, code returns Rust types and never prints. Logging goes
//! through `tracing`; the binary installs the subscriber.
//!
//! ## Testing Strategy
//!
//! 1. **Pipeline and commands**: unit tests next to the code, with
//!    [`source::memory::InMemorySource`] and its fixtures.
//! 2. **API**: session behavior (refresh discards, sort toggles).
//! 3. **CLI**: `tests/` drives the binary against temporary outline files.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod grammar;
pub mod model;
pub mod schema;
pub mod sort;
pub mod source;
pub mod table;
