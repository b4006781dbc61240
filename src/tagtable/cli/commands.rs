//! # CLI Layer
//!
//! The only place in the codebase that:
//! - knows about stdout and stderr
//! - installs the logging subscriber
//! - turns arguments into API calls
//!
//! ## Flow
//!
//! 1. Parse arguments (`setup.rs`).
//! 2. Install the `tracing` subscriber: `-v` debug, `-vv` trace, `RUST_LOG` wins.
//! 3. Load the layered configuration.
//! 4. Open the source, refresh the API session, dispatch to a handler.
//! 5. Render the `CmdResult` (`render.rs`).

use super::render::{
    render_columns, render_config, render_json, render_messages, render_table,
    terminal_supports_color,
};
use super::setup::{Cli, Commands, FormatArg, OutputArg, TableArgs};
use clap::Parser;
use std::path::Path;
use tagtable::api::TagtableApi;
use tagtable::config::TagtableConfig;
use tagtable::error::Result;
use tagtable::source::{open_source, OutlineSource};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = TagtableConfig::load_default()?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Table(args) => handle_table(&config, cli.format, args),
        Commands::Columns { path } => handle_columns(&config, cli.format, &path),
        Commands::Config => handle_config(&config),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn open_api(
    config: &TagtableConfig,
    format: FormatArg,
    path: &Path,
) -> Result<TagtableApi<Box<dyn OutlineSource>>> {
    let grammar = config.grammar()?;
    let source = open_source(path, format.source_format(), &grammar)?;
    TagtableApi::new(source, config.clone())
}

fn handle_table(config: &TagtableConfig, format: FormatArg, args: TableArgs) -> Result<()> {
    let mut api = open_api(config, format, &args.path)?;
    let mut result = api.refresh()?;
    if api.table().is_some() {
        result.merge(api.view(&args.filter, &args.column_filters, &args.sort)?);
    }

    if args.output == OutputArg::Json {
        print!("{}", render_json(&result)?);
        return Ok(());
    }

    let use_color = args.output == OutputArg::Term && terminal_supports_color();
    if let Some(view) = &result.view {
        print!("{}", render_table(view, use_color));
    }
    print!("{}", render_messages(&result.messages, use_color));
    Ok(())
}

fn handle_columns(config: &TagtableConfig, format: FormatArg, path: &Path) -> Result<()> {
    let mut api = open_api(config, format, path)?;
    let mut result = api.refresh()?;
    result.merge(api.columns());

    let use_color = terminal_supports_color();
    if !result.columns.is_empty() {
        print!("{}", render_columns(&result.columns, use_color));
    }
    print!("{}", render_messages(&result.messages, use_color));
    Ok(())
}

fn handle_config(config: &TagtableConfig) -> Result<()> {
    let result = tagtable::commands::config::run(config);
    if let Some(config) = &result.config {
        print!("{}", render_config(config, terminal_supports_color()));
    }
    Ok(())
}
