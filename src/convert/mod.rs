//! Sheet to record conversion.
//!
//! Row 0 of a sheet names the columns ([`extract_headers`]); every later row
//! becomes one [`Record`](crate::model::Record) ([`build_records`]).
//!
//! # Example
//!
//! ```no_run
//! use sheetjson::convert::{convert_sheet, RaggedPolicy};
//! use sheetjson::xlsx::Workbook;
//!
//! let workbook = Workbook::open("ExampleSheet.xlsx")?;
//! let sheet = workbook.sheet(0)?;
//! let records = convert_sheet(&sheet, RaggedPolicy::Drop)?;
//! println!("{} records", records.len());
//! # Ok::<(), sheetjson::Error>(())
//! ```

mod header;
mod options;
mod records;

pub use header::extract_headers;
pub use options::{ConvertOptions, RaggedPolicy};
pub use records::build_records;

use crate::error::Result;
use crate::model::{RecordList, Sheet};

/// Convert one sheet into its records.
///
/// The header map lives only for this call, so no names carry over between
/// sheets.
pub fn convert_sheet(sheet: &Sheet, policy: RaggedPolicy) -> Result<RecordList> {
    let headers = extract_headers(sheet)?;
    tracing::debug!(sheet = %sheet.name, columns = headers.len(), "extracted headers");
    build_records(sheet, &headers, policy)
}
