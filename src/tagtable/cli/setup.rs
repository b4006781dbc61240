use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tagtable::source::SourceFormat;

#[derive(Parser, Debug)]
#[command(name = "tagtable", bin_name = "tagtable", version)]
#[command(about = "Turn #key-value markers in an outline into a sortable, filterable table", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Source format (detected from the file extension by default)
    #[arg(long, value_enum, global = true, default_value_t = FormatArg::Auto, help_heading = "Options")]
    pub format: FormatArg,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, help_heading = "Options")]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the table of annotated items
    #[command(alias = "t")]
    Table(TableArgs),

    /// List the columns discovered in an outline
    Columns {
        /// Outline file (Markdown or JSON)
        path: PathBuf,
    },

    /// Show the effective configuration
    Config,
}

#[derive(Args, Debug)]
pub struct TableArgs {
    /// Outline file (Markdown or JSON)
    pub path: PathBuf,

    /// Global filter: comma-separated terms, `!term` excludes
    #[arg(short, long, default_value = "")]
    pub filter: String,

    /// Column filter as COLUMN=EXPR (repeatable)
    #[arg(short = 'w', long = "where", value_name = "COLUMN=EXPR")]
    pub column_filters: Vec<String>,

    /// Sort by column (repeatable; repeating a column flips its direction)
    #[arg(short, long, value_name = "COLUMN")]
    pub sort: Vec<String>,

    /// Output style
    #[arg(short, long, value_enum, default_value_t = OutputArg::Term)]
    pub output: OutputArg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Auto,
    Markdown,
    Json,
}

impl FormatArg {
    pub fn source_format(self) -> Option<SourceFormat> {
        match self {
            FormatArg::Auto => None,
            FormatArg::Markdown => Some(SourceFormat::Markdown),
            FormatArg::Json => Some(SourceFormat::Json),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Styled when the terminal supports it
    Term,
    /// No styling
    Plain,
    /// JSON
    Json,
}
