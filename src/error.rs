//! Error types for the sheetjson library.

use std::io;
use thiserror::Error;

/// Result type alias for sheetjson operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The workbook could not be read or is not a valid container.
    Load,
    /// A cell held a value of the wrong type for its position.
    CellType,
    /// A data cell has no header in its column.
    HeaderLookupMiss,
    /// The converted output could not be produced.
    Output,
}

/// Errors that can occur while converting a workbook.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format could not be determined.
    #[error("Unknown file format")]
    UnknownFormat,

    /// The file format is recognized but not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Invalid or malformed data in the workbook.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A required workbook part is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// A cell does not hold the kind of value its row requires.
    #[error("Sheet '{sheet}' cell {cell}: expected {expected} value, found {found}")]
    CellType {
        sheet: String,
        cell: String,
        expected: &'static str,
        found: String,
    },

    /// A data cell sits in a column the header row does not name.
    #[error("Sheet '{sheet}' cell {cell}: no header for this column")]
    HeaderLookupMiss { sheet: String, cell: String },

    /// Error while serializing records.
    #[error("JSON serialization error: {0}")]
    Serialize(String),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::CellType { .. } => ErrorKind::CellType,
            Error::HeaderLookupMiss { .. } => ErrorKind::HeaderLookupMiss,
            Error::Serialize(_) => ErrorKind::Output,
            Error::Io(_)
            | Error::UnknownFormat
            | Error::UnsupportedFormat(_)
            | Error::ZipArchive(_)
            | Error::XmlParse(_)
            | Error::InvalidData(_)
            | Error::MissingComponent(_) => ErrorKind::Load,
        }
    }

    /// Whether this error happened while loading the workbook.
    pub fn is_load_error(&self) -> bool {
        self.kind() == ErrorKind::Load
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}
