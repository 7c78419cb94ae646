//! JSON renderer implementation.

use crate::error::Result;
use crate::model::RecordList;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    #[default]
    Compact,
    /// Pretty-printed with 2-space indentation
    Pretty,
}

/// Serialize a sheet's records as a JSON array of objects.
pub fn to_json(records: &RecordList, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Compact => serde_json::to_string(records)?,
        JsonFormat::Pretty => serde_json::to_string_pretty(records)?,
    };
    Ok(json)
}
