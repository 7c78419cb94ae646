//! Console emission of converted sheets.

use crate::error::Result;
use std::io::Write;

/// Writes each sheet as its name line followed by its JSON text.
///
/// Output is flushed after every sheet, so sheets emitted before a later
/// failure stay visible.
#[derive(Debug)]
pub struct Emitter<W: Write> {
    writer: W,
    sheets: usize,
}

impl<W: Write> Emitter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, sheets: 0 }
    }

    /// Write one sheet.
    pub fn emit_sheet(&mut self, name: &str, json: &str) -> Result<()> {
        writeln!(self.writer, "{name}")?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        self.sheets += 1;
        Ok(())
    }

    /// Number of sheets written so far.
    pub fn sheets_emitted(&self) -> usize {
        self.sheets
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
