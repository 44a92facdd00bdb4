//! CLI argument definitions for the codeset tools.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "codeset",
    version,
    about = "Inspect, compare and export codeset workbooks",
    long_about = "Inspect, compare and export codeset workbooks.\n\n\
                  A workbook is a spreadsheet (.xlsx, .xlsm, .xls, .xlsb, .ods),\n\
                  a single .csv file, or a directory of .csv files (one sheet per file)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values in trace logs (redacted otherwise).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the inferred column roles of every sheet.
    Classify(ClassifyArgs),

    /// Show the resolved local-to-standard mapping of each sheet.
    Mapping(MappingArgs),

    /// Compare an incoming workbook against a base workbook.
    Diff(DiffArgs),

    /// Generate the transformer XML document.
    Transformer(TransformerArgs),
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// Workbook file or CSV directory.
    #[arg(value_name = "WORKBOOK")]
    pub workbook: PathBuf,
}

#[derive(Parser)]
pub struct MappingArgs {
    /// Workbook file or CSV directory.
    #[arg(value_name = "WORKBOOK")]
    pub workbook: PathBuf,

    /// Only show this sheet.
    #[arg(long = "sheet", value_name = "SHEET")]
    pub sheet: Option<String>,
}

#[derive(Parser)]
pub struct DiffArgs {
    /// The currently active workbook.
    #[arg(value_name = "BASE")]
    pub base: PathBuf,

    /// The uploaded workbook to reconcile against the base.
    #[arg(value_name = "INCOMING")]
    pub incoming: PathBuf,

    /// Write the full diff as JSON.
    #[arg(long = "json", value_name = "FILE")]
    pub json: Option<PathBuf>,
}

#[derive(Parser)]
pub struct TransformerArgs {
    /// Workbook file or CSV directory.
    #[arg(value_name = "WORKBOOK")]
    pub workbook: PathBuf,

    /// Output file (default: stdout).
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// TOML configuration file with a `[transformer]` table.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Codeset whose fields are free text (repeatable).
    #[arg(long = "free-text", value_name = "CODESET")]
    pub free_text: Vec<String>,

    /// Omit the static <Fields> registry.
    #[arg(long = "no-fields")]
    pub no_fields: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
