//! Header row extraction.

use crate::error::{Error, Result};
use crate::model::{CellRef, CellValue, HeaderMap, Sheet};

/// Build the column-to-name map from row 0 of `sheet`.
///
/// Header text is kept verbatim. Empty header cells leave their column
/// unnamed; numeric or other non-text headers are rejected. A sheet without
/// a row 0 yields an empty map.
pub fn extract_headers(sheet: &Sheet) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let Some(row) = sheet.header_row() else {
        return Ok(headers);
    };

    for cell in &row.cells {
        match &cell.value {
            CellValue::Text(name) => headers.insert(cell.column, name.clone()),
            CellValue::Empty => {}
            other => {
                return Err(Error::CellType {
                    sheet: sheet.name.clone(),
                    cell: CellRef::new(row.index, cell.column).to_string(),
                    expected: "text",
                    found: other.describe(),
                });
            }
        }
    }

    Ok(headers)
}
