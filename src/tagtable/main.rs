//! # Tagtable CLI
//!
//! The binary is thin: the CLI lives in `cli/`, this file only invokes
//! `cli::run()` and turns an error into an exit code.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/tagtable/cli/)                              │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - context wiring, logging, dispatch (commands.rs)          │
//! │  - minijinja templates + console styles (render.rs)         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs): TagtableApi session                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Templates live in `cli/templates/` and are embedded with `include_str!()`.
//! Layout math (column widths, truncation) stays in Rust because it needs
//! Unicode-aware widths; templates only arrange and style.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
