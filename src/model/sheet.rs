//! Sheet and row structures.

use super::Cell;

/// A row of cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    /// Zero-based row index within the sheet
    pub index: usize,
    /// Cells in ascending column order
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create an empty row.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            cells: Vec::new(),
        }
    }

    /// Add a cell.
    pub fn add_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Whether this is the header row.
    pub fn is_header(&self) -> bool {
        self.index == 0
    }
}

/// One worksheet, read from the workbook.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    /// Tab name
    pub name: String,
    /// Zero-based position in the workbook
    pub index: usize,
    /// Rows present in the sheet, in ascending index order
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
            rows: Vec::new(),
        }
    }

    /// Add a row.
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// The row with index 0, if the sheet has one.
    pub fn header_row(&self) -> Option<&Row> {
        self.rows.iter().find(|r| r.is_header())
    }

    /// Rows after the header, in row order.
    pub fn data_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|r| !r.is_header())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
