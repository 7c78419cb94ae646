//! Data row to record conversion.

use super::RaggedPolicy;
use crate::error::{Error, Result};
use crate::model::{CellRef, CellValue, HeaderMap, Record, RecordList, Sheet};

/// Build one record per data row of `sheet`, in row order.
///
/// Each record is built fresh for its row. Only numeric cells are accepted;
/// empty cells are left out of the record, so short rows produce sparse
/// records. Cells in columns without a header are handled per `policy`.
pub fn build_records(sheet: &Sheet, headers: &HeaderMap, policy: RaggedPolicy) -> Result<RecordList> {
    let mut records = RecordList::new();

    for row in sheet.data_rows() {
        let mut record = Record::new();

        for cell in &row.cells {
            let cell_ref = || CellRef::new(row.index, cell.column).to_string();

            let value = match &cell.value {
                CellValue::Number(n) => *n,
                CellValue::Empty => continue,
                other => {
                    return Err(Error::CellType {
                        sheet: sheet.name.clone(),
                        cell: cell_ref(),
                        expected: "numeric",
                        found: other.describe(),
                    });
                }
            };

            match (headers.get(cell.column), policy) {
                (Some(name), _) => record.set(name, value),
                (None, RaggedPolicy::Drop) => {
                    tracing::warn!(sheet = %sheet.name, cell = %cell_ref(), "dropping cell without a header");
                }
                (None, RaggedPolicy::Error) => {
                    return Err(Error::HeaderLookupMiss {
                        sheet: sheet.name.clone(),
                        cell: cell_ref(),
                    });
                }
                (None, RaggedPolicy::ColumnIndex) => record.set(cell.column.to_string(), value),
            }
        }

        records.push(record);
    }

    Ok(records)
}
