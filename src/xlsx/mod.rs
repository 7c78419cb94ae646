//! XLSX (Excel) workbook reader.
//!
//! This module opens Office Open XML spreadsheets (`.xlsx`, `.xlsm`) and
//! exposes their worksheets as [`Sheet`](crate::model::Sheet) values.
//!
//! # Example
//!
//! ```no_run
//! use sheetjson::xlsx::Workbook;
//!
//! let workbook = Workbook::open("spreadsheet.xlsx")?;
//! for name in workbook.sheet_names() {
//!     println!("Sheet: {}", name);
//! }
//! # Ok::<(), sheetjson::Error>(())
//! ```

mod parser;
mod shared_strings;

pub use parser::Workbook;
pub use shared_strings::SharedStrings;
