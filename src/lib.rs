//! # sheetjson
//!
//! Convert Excel workbooks into JSON records.
//!
//! The first row of every sheet names the columns; each following row becomes
//! a JSON object mapping those names to the row's numeric values. Sheets are
//! written in workbook order as a name line followed by the sheet's JSON
//! array.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sheetjson::{convert_file, ConvertOptions};
//!
//! let stdout = std::io::stdout();
//! let summary = convert_file("ExampleSheet.xlsx", &ConvertOptions::default(), stdout.lock())?;
//! eprintln!("{} sheets, {} records", summary.sheets, summary.records);
//! # Ok::<(), sheetjson::Error>(())
//! ```
//!
//! ## Step by Step
//!
//! ```no_run
//! use sheetjson::convert::{convert_sheet, RaggedPolicy};
//! use sheetjson::render::{to_json, JsonFormat};
//! use sheetjson::xlsx::Workbook;
//!
//! let workbook = Workbook::open("ExampleSheet.xlsx")?;
//! for sheet in workbook.sheets() {
//!     let sheet = sheet?;
//!     let records = convert_sheet(&sheet, RaggedPolicy::Drop)?;
//!     println!("{}\n{}", sheet.name, to_json(&records, JsonFormat::Compact)?);
//! }
//! # Ok::<(), sheetjson::Error>(())
//! ```

pub mod container;
pub mod convert;
pub mod detect;
pub mod emit;
pub mod error;
pub mod model;
pub mod render;
pub mod xlsx;

// Re-exports
pub use convert::{ConvertOptions, RaggedPolicy};
pub use emit::Emitter;
pub use error::{Error, ErrorKind, Result};
pub use model::{Cell, CellValue, HeaderMap, Record, RecordList, Row, Sheet};
pub use render::JsonFormat;
pub use xlsx::Workbook;

use std::io::Write;
use std::path::Path;

/// Totals of a finished conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Sheets written
    pub sheets: usize,
    /// Records written across all sheets
    pub records: usize,
}

/// Convert the workbook at `path`, writing every sheet to `writer`.
///
/// The workbook is released when this returns, whether or not it succeeded.
pub fn convert_file<W: Write>(
    path: impl AsRef<Path>,
    options: &ConvertOptions,
    writer: W,
) -> Result<ConversionSummary> {
    let workbook = Workbook::open(path)?;
    convert_workbook(&workbook, options, writer)
}

/// Convert a workbook held in memory.
pub fn convert_bytes<W: Write>(
    data: &[u8],
    options: &ConvertOptions,
    writer: W,
) -> Result<ConversionSummary> {
    let workbook = Workbook::from_bytes(data.to_vec())?;
    convert_workbook(&workbook, options, writer)
}

/// Convert every sheet of `workbook` in order.
///
/// Each sheet is written as soon as it is converted; the first error stops
/// the conversion and earlier sheets remain written.
pub fn convert_workbook<W: Write>(
    workbook: &Workbook,
    options: &ConvertOptions,
    writer: W,
) -> Result<ConversionSummary> {
    let mut emitter = Emitter::new(writer);
    let mut summary = ConversionSummary::default();

    for sheet in workbook.sheets() {
        let sheet = sheet?;
        let records = convert::convert_sheet(&sheet, options.ragged_policy)?;
        let json = render::to_json(&records, options.json_format)?;
        emitter.emit_sheet(&sheet.name, &json)?;

        summary.records += records.len();
    }
    summary.sheets = emitter.sheets_emitted();

    tracing::info!(sheets = summary.sheets, records = summary.records, "conversion finished");
    Ok(summary)
}

/// Convert every sheet into records without rendering them.
///
/// # Example
///
/// ```no_run
/// use sheetjson::{workbook_records, RaggedPolicy, Workbook};
///
/// let workbook = Workbook::open("ExampleSheet.xlsx")?;
/// for (name, records) in workbook_records(&workbook, RaggedPolicy::Drop)? {
///     println!("{name}: {} records", records.len());
/// }
/// # Ok::<(), sheetjson::Error>(())
/// ```
pub fn workbook_records(workbook: &Workbook, policy: RaggedPolicy) -> Result<Vec<(String, RecordList)>> {
    workbook
        .sheets()
        .map(|sheet| {
            let sheet = sheet?;
            let records = convert::convert_sheet(&sheet, policy)?;
            Ok((sheet.name, records))
        })
        .collect()
}
