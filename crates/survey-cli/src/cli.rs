//! CLI argument definitions for the survey exporter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use survey_cli::logging::LogFormat;
use survey_model::ExportKind;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "survey-export",
    version,
    about = "Survey response exporter - flatten survey responses into spreadsheets",
    long_about = "Export stored survey responses as flat, labeled tables.\n\n\
                  Supports XLSX workbooks with a codebook sheet, legacy CSV,\n\
                  JSON exports and per-question summary reports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    #[command(flatten)]
    pub color: Color,

    /// Log level for the exporter crates; wins over -v/-q and RUST_LOG.
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log line format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Append logs to this file; stderr otherwise.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow response values in trace logs (redacted otherwise).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Export one survey's responses to a file.
    Export(ExportArgs),

    /// List the surveys in a store.
    List(ListArgs),

    /// Print the column codebook of a survey without writing files.
    Codebook(CodebookArgs),
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Path to the survey store JSON file.
    #[arg(value_name = "STORE")]
    pub store: PathBuf,

    /// Id of the survey to export.
    #[arg(long = "survey", value_name = "ID")]
    pub survey: String,

    /// Export format.
    #[arg(long = "format", value_enum, default_value = "xlsx")]
    pub format: ExportFormatArg,

    /// Output directory for the export file.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Export date used in the filename and metadata (default: today).
    #[arg(long = "date", value_name = "YYYY-MM-DD")]
    pub date: Option<String>,
}

#[derive(Parser)]
pub struct ListArgs {
    /// Path to the survey store JSON file.
    #[arg(value_name = "STORE")]
    pub store: PathBuf,
}

#[derive(Parser)]
pub struct CodebookArgs {
    /// Path to the survey store JSON file.
    #[arg(value_name = "STORE")]
    pub store: PathBuf,

    /// Id of the survey to describe.
    #[arg(long = "survey", value_name = "ID")]
    pub survey: String,

    /// Build columns from raw stored data instead of the survey definition.
    #[arg(long = "raw")]
    pub raw: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    /// XLSX workbook using the survey definition.
    Xlsx,
    /// XLSX workbook from raw stored data.
    Raw,
    /// Legacy one-column-per-question CSV.
    Csv,
    /// Survey metadata and responses as JSON.
    Json,
    /// Per-question statistics as JSON.
    Summary,
}

impl From<ExportFormatArg> for ExportKind {
    fn from(format: ExportFormatArg) -> Self {
        match format {
            ExportFormatArg::Xlsx => Self::Workbook,
            ExportFormatArg::Raw => Self::RawWorkbook,
            ExportFormatArg::Csv => Self::LegacyCsv,
            ExportFormatArg::Json => Self::Json,
            ExportFormatArg::Summary => Self::SummaryReport,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    /// Multi-line, for people.
    Pretty,
    /// One line per event.
    Compact,
    /// One JSON object per event.
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
