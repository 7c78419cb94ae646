//! In-memory model of a workbook and the records derived from it.
//!
//! Parsers turn worksheet XML into [`Sheet`]s of typed [`Cell`]s; the
//! converter turns each sheet into a [`RecordList`] keyed by a [`HeaderMap`].

mod cell;
mod record;
mod sheet;

pub use cell::*;
pub use record::*;
pub use sheet::*;
