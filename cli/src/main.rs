//! sheetjson CLI - Excel workbook to JSON conversion tool
//!
//! Prints every sheet of a workbook as its name followed by a JSON array of
//! row records. Without an input path the bundled example workbook is used.

use clap::{Parser, ValueEnum};
use colored::*;
use sheetjson::{ConvertOptions, RaggedPolicy};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Workbook converted when no input path is given.
const BUNDLED_WORKBOOK: &[u8] = include_bytes!("../resources/ExampleSheet.xlsx");

/// Convert Excel workbooks to JSON records
#[derive(Parser)]
#[command(
    name = "sheetjson",
    author = "iyulab",
    version,
    about = "Convert each sheet of an Excel workbook to JSON",
    long_about = "sheetjson - Excel workbook to JSON conversion tool.\n\n\
                  The first row of every sheet names the columns; each following row \n\
                  is printed as a JSON object of numeric values."
)]
struct Cli {
    /// Input .xlsx file (default: the bundled ExampleSheet.xlsx)
    input: Option<PathBuf>,

    /// Pretty-print JSON instead of one line per sheet
    #[arg(long)]
    pretty: bool,

    /// How to handle data cells in columns without a header
    #[arg(long, value_enum, default_value = "drop")]
    ragged: RaggedMode,
}

/// Handling of cells without a header
#[derive(Clone, Copy, ValueEnum)]
enum RaggedMode {
    /// Skip the cell
    Drop,
    /// Stop with an error
    Error,
    /// Key the value by its zero-based column index
    Index,
}

impl From<RaggedMode> for RaggedPolicy {
    fn from(mode: RaggedMode) -> Self {
        match mode {
            RaggedMode::Drop => RaggedPolicy::Drop,
            RaggedMode::Error => RaggedPolicy::Error,
            RaggedMode::Index => RaggedPolicy::ColumnIndex,
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = ConvertOptions::new()
        .with_pretty(cli.pretty)
        .with_ragged_policy(cli.ragged.into());

    let stdout = io::stdout();
    let summary = match cli.input {
        Some(path) => {
            tracing::debug!(path = %path.display(), "converting workbook");
            sheetjson::convert_file(&path, &options, stdout.lock())?
        }
        None => {
            tracing::debug!("converting bundled workbook");
            sheetjson::convert_bytes(BUNDLED_WORKBOOK, &options, stdout.lock())?
        }
    };

    tracing::info!(sheets = summary.sheets, records = summary.records, "done");
    Ok(())
}
