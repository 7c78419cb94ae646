//! Cell values and A1-style cell references.

use std::fmt;

/// Content of a single worksheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// A string (shared, inline or a cached formula string)
    Text(String),
    /// A numeric value
    Number(f64),
    /// A cell element that carries no value
    Empty,
    /// Booleans, errors, dates and anything else, kept as raw text
    Other(String),
}

impl CellValue {
    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            CellValue::Text(s) => format!("text {s:?}"),
            CellValue::Number(n) => format!("number {n}"),
            CellValue::Empty => "empty cell".to_string(),
            CellValue::Other(raw) => format!("non-numeric value {raw:?}"),
        }
    }
}

/// A cell positioned in its row.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Zero-based column index
    pub column: usize,
    pub value: CellValue,
}

impl Cell {
    pub fn new(column: usize, value: CellValue) -> Self {
        Self { column, value }
    }
}

/// Zero-based (row, column) position, displayed as an A1 reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub row: usize,
    pub column: usize,
}

impl CellRef {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Parse an A1-style reference such as `"AB12"`.
    ///
    /// Absolute markers (`$`) are accepted. Returns `None` for anything that
    /// is not letters followed by a positive row number.
    pub fn parse(reference: &str) -> Option<Self> {
        let reference = reference.replace('$', "");
        let split = reference.find(|c: char| c.is_ascii_digit())?;
        let (letters, digits) = reference.split_at(split);

        let column = parse_column(letters)?;
        let row: usize = digits.parse().ok()?;
        Some(Self::new(row.checked_sub(1)?, column))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // one-based row number, widened so the last usize row still prints
        write!(f, "{}{}", column_name(self.column), self.row as u128 + 1)
    }
}

/// Zero-based column index of a column name (`"A"` is 0, `"AA"` is 26).
pub fn parse_column(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut index = 0usize;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        index = index.checked_mul(26)?.checked_add(digit)?;
    }
    Some(index - 1)
}

/// Column name of a zero-based column index.
pub fn column_name(mut column: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (column % 26) as u8);
        if column < 26 {
            break;
        }
        column = column / 26 - 1;
    }
    name.reverse();
    String::from_utf8(name).unwrap_or_default()
}
