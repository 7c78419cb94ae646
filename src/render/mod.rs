//! Output rendering for converted sheets.
//!
//! # Example
//!
//! ```no_run
//! use sheetjson::convert::{convert_sheet, RaggedPolicy};
//! use sheetjson::render::{to_json, JsonFormat};
//! use sheetjson::xlsx::Workbook;
//!
//! let workbook = Workbook::open("ExampleSheet.xlsx")?;
//! let records = convert_sheet(&workbook.sheet(0)?, RaggedPolicy::Drop)?;
//! println!("{}", to_json(&records, JsonFormat::Pretty)?);
//! # Ok::<(), sheetjson::Error>(())
//! ```

mod json;

pub use json::{to_json, JsonFormat};
