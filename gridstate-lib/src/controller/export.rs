use serde::Serialize;

use crate::model::Value;

use super::TableController;

/// Rows flattened for export over the exportable columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ExportTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl TableController {
    /// Flattens the processed rows, or the selection when `selection_only`,
    /// into exportable cells.
    pub fn export_rows(&self, selection_only: bool) -> ExportTable {
        let columns: Vec<_> = self.columns().iter().filter(|c| c.exportable).collect();
        let source = if selection_only {
            self.selection()
        } else {
            self.processed()
        };

        ExportTable {
            headers: columns.iter().map(|c| c.header.clone()).collect(),
            rows: source
                .iter()
                .map(|row| columns.iter().map(|c| row.resolve(&c.field).clone()).collect())
                .collect(),
        }
    }
}
