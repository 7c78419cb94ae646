//! Conversion options.

use crate::render::JsonFormat;

/// What to do with a data cell whose column has no header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RaggedPolicy {
    /// Skip the cell and log a warning
    #[default]
    Drop,
    /// Fail with [`Error::HeaderLookupMiss`](crate::Error::HeaderLookupMiss)
    Error,
    /// Key the value by its zero-based column index, e.g. `"3"`
    ColumnIndex,
}

/// Options for converting a workbook.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// JSON layout of each sheet's array
    pub json_format: JsonFormat,

    /// Handling of cells beyond the header row's columns
    pub ragged_policy: RaggedPolicy,
}

impl ConvertOptions {
    /// Create default options: compact JSON, ragged cells dropped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Pretty-print (`true`) or emit one line per sheet (`false`).
    pub fn with_pretty(self, pretty: bool) -> Self {
        self.with_json_format(if pretty {
            JsonFormat::Pretty
        } else {
            JsonFormat::Compact
        })
    }

    /// Set the ragged-cell policy.
    pub fn with_ragged_policy(mut self, policy: RaggedPolicy) -> Self {
        self.ragged_policy = policy;
        self
    }
}
