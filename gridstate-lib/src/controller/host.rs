use crate::error::TableError;
use crate::model::FieldPath;
use crate::model::Record;
use crate::model::RowRef;
use crate::sort::SortOrder;

use super::TableController;

/// What a row or header cell asks of the table that hosts it.
///
/// Row-level components hold a `&mut dyn RowHost` instead of the concrete
/// controller, so they can be driven by a test double.
pub trait RowHost {
    fn is_selected(&self, row: &RowRef) -> bool;

    fn is_row_expanded(&self, row: &Record) -> bool;

    /// Order of `field` in the active sort, if it is sorted.
    fn sort_order_of(&self, field: &FieldPath) -> Option<SortOrder>;

    fn toggle_checkbox(&mut self, row: &RowRef, index: Option<usize>) -> Result<(), TableError>;

    fn toggle_radio(&mut self, row: &RowRef, index: Option<usize>) -> Result<(), TableError>;

    /// Returns `true` if the row is now expanded.
    fn toggle_expansion(&mut self, row: &RowRef) -> Result<bool, TableError>;
}

impl RowHost for TableController {
    fn is_selected(&self, row: &RowRef) -> bool {
        TableController::is_selected(self, row)
    }

    fn is_row_expanded(&self, row: &Record) -> bool {
        TableController::is_row_expanded(self, row)
    }

    fn sort_order_of(&self, field: &FieldPath) -> Option<SortOrder> {
        self.sort().descriptor_for(field).map(|d| d.order)
    }

    fn toggle_checkbox(&mut self, row: &RowRef, index: Option<usize>) -> Result<(), TableError> {
        self.toggle_row_checkbox(row, index)
    }

    fn toggle_radio(&mut self, row: &RowRef, index: Option<usize>) -> Result<(), TableError> {
        self.toggle_row_radio(row, index)
    }

    fn toggle_expansion(&mut self, row: &RowRef) -> Result<bool, TableError> {
        self.toggle_row_expansion(row)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::config::TableConfig;
    use crate::model::Column;
    use crate::selection::Identity;
    use crate::selection::SelectionMode;

    fn click_checkbox(host: &mut dyn RowHost, row: &RowRef) {
        host.toggle_checkbox(row, None).unwrap();
    }

    #[test]
    fn test_row_host_drives_controller() {
        let config = TableConfig::default()
            .with_selection(SelectionMode::Multiple, Identity::key("id"))
            .with_filter_delay(Duration::ZERO);
        let mut table = TableController::new(config, vec![Column::new("name", "Name")]);
        let row = Arc::new(Record::new().set("id", 1i64).set("name", "a"));
        table.set_records(vec![row.clone()]).unwrap();

        click_checkbox(&mut table, &row);
        assert!(RowHost::is_selected(&table, &row));

        table.sort_by("name", false).unwrap();
        assert_eq!(table.sort_order_of(&"name".into()), Some(SortOrder::Ascending));
        assert_eq!(table.sort_order_of(&"id".into()), None);

        assert!(RowHost::toggle_expansion(&mut table, &row).unwrap());
        assert!(RowHost::is_row_expanded(&table, &row));
    }
}
