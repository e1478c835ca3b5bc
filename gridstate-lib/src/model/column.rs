//! Column descriptors

use super::FieldPath;

/// A table column definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Field the column displays.
    pub field: FieldPath,
    /// Header text.
    pub header: String,
    /// Whether the column is included in exports.
    pub exportable: bool,
    /// Rendered width in cells.
    pub width: u16,
}

impl Column {
    /// Default column width.
    pub const DEFAULT_WIDTH: u16 = 100;

    /// Creates a new column for the given field and header.
    pub fn new(field: impl Into<FieldPath>, header: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header: header.into(),
            exportable: true,
            width: Self::DEFAULT_WIDTH,
        }
    }

    /// Sets a fixed width for this column.
    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Excludes this column from exports.
    pub fn not_exportable(mut self) -> Self {
        self.exportable = false;
        self
    }

    /// Key used to persist the column order.
    pub fn key(&self) -> &str {
        self.field.as_str()
    }
}
