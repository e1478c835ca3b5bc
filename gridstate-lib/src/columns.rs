//! Column layout: widths and display order.

use crate::error::ConfigError;
use crate::model::Column;

/// How a column resize affects the rest of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeMode {
    /// Width moves between the column and its right neighbour; the table
    /// width stays put.
    #[default]
    Fit,
    /// The column and the table grow or shrink together.
    Expand,
}

/// Where a dragged column lands relative to the drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPosition {
    Before,
    After,
}

/// Columns of a table in display order, with their widths.
#[derive(Debug, Clone, Default)]
pub struct ColumnLayout {
    columns: Vec<Column>,
    resize_mode: ResizeMode,
    table_width: Option<u32>,
    scrollable: bool,
    column_group: bool,
}

impl ColumnLayout {
    /// Narrowest width a resize may leave behind.
    pub const MIN_WIDTH: u16 = 15;

    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    pub fn with_resize_mode(mut self, mode: ResizeMode) -> Self {
        self.resize_mode = mode;
        self
    }

    /// Marks the layout as scrollable, with or without a column group.
    pub fn with_scrollable(mut self, scrollable: bool, column_group: bool) -> Self {
        self.scrollable = scrollable;
        self.column_group = column_group;
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Replaces the columns.
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
    }

    /// Table width set by expand-mode resizes.
    pub fn table_width(&self) -> Option<u32> {
        self.table_width
    }

    /// Widths in display order.
    pub fn widths(&self) -> Vec<u16> {
        self.columns.iter().map(|c| c.width).collect()
    }

    /// Column keys in display order.
    pub fn order(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.key().to_string()).collect()
    }

    /// Resizes column `index` by `delta`.
    ///
    /// Returns `Ok(false)` when the resize would push a column under
    /// [`MIN_WIDTH`](Self::MIN_WIDTH) or, in fit mode, when the column has no
    /// right neighbour.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingColumnGroup`] on a scrollable layout without a
    /// column group.
    pub fn resize(&mut self, index: usize, delta: i32) -> Result<bool, ConfigError> {
        if self.scrollable && !self.column_group {
            return Err(ConfigError::MissingColumnGroup);
        }
        let Some(width) = self.columns.get(index).map(|c| i32::from(c.width)) else {
            return Ok(false);
        };
        let min = i32::from(Self::MIN_WIDTH);
        let new_width = width + delta;

        match self.resize_mode {
            ResizeMode::Fit => {
                let Some(next_width) = self.columns.get(index + 1).map(|c| i32::from(c.width))
                else {
                    return Ok(false);
                };
                let new_next_width = next_width - delta;
                if new_width <= min || new_next_width <= min {
                    return Ok(false);
                }
                self.columns[index].width = clamp_width(new_width);
                self.columns[index + 1].width = clamp_width(new_next_width);
            }
            ResizeMode::Expand => {
                if new_width < min {
                    return Ok(false);
                }
                let table_width = self
                    .table_width
                    .unwrap_or_else(|| self.columns.iter().map(|c| u32::from(c.width)).sum());
                self.table_width = Some(table_width.saturating_add_signed(delta));
                self.columns[index].width = clamp_width(new_width);
            }
        }

        log::debug!(
            "[columns] resized '{}' by {} ({:?})",
            self.columns[index].key(),
            delta,
            self.resize_mode
        );
        Ok(true)
    }

    /// Moves column `drag` next to column `drop`.
    ///
    /// Dropping a column onto itself, or onto the neighbouring edge it
    /// already touches, does nothing. Returns `true` if the order changed.
    pub fn reorder(&mut self, drag: usize, drop: usize, position: DropPosition) -> bool {
        let len = self.columns.len();
        if drag >= len || drop >= len || drag == drop {
            return false;
        }
        let adjacent_noop = (drop == drag + 1 && position == DropPosition::Before)
            || (drag == drop + 1 && position == DropPosition::After);
        if adjacent_noop {
            return false;
        }

        let mut target = drop;
        if drop < drag && position == DropPosition::After {
            target += 1;
        }
        if drop > drag && position == DropPosition::Before {
            target -= 1;
        }

        let column = self.columns.remove(drag);
        self.columns.insert(target, column);
        log::debug!("[columns] moved column {} to {}", drag, target);
        true
    }

    /// Applies persisted widths in display order. Extra entries are ignored.
    pub fn restore_widths(&mut self, widths: &[u16], table_width: Option<u32>) {
        for (column, width) in self.columns.iter_mut().zip(widths) {
            column.width = *width;
        }
        if table_width.is_some() {
            self.table_width = table_width;
        }
    }

    /// Reorders columns to match persisted keys.
    ///
    /// Unknown keys are skipped; columns the keys do not mention keep their
    /// relative order after the matched ones.
    pub fn restore_order(&mut self, keys: &[String]) {
        let mut remaining = std::mem::take(&mut self.columns);
        let mut ordered = Vec::with_capacity(remaining.len());
        for key in keys {
            if let Some(position) = remaining.iter().position(|c| c.key() == key) {
                ordered.push(remaining.remove(position));
            }
        }
        ordered.extend(remaining);
        self.columns = ordered;
    }
}

fn clamp_width(width: i32) -> u16 {
    u16::try_from(width.max(0)).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ColumnLayout {
        ColumnLayout::new(vec![
            Column::new("id", "Id").width(50),
            Column::new("name", "Name").width(100),
            Column::new("city", "City").width(80),
        ])
    }

    fn keys(layout: &ColumnLayout) -> Vec<String> {
        layout.order()
    }

    #[test]
    fn test_fit_resize_moves_width_to_neighbour() {
        let mut layout = layout();
        assert!(layout.resize(0, 20).unwrap());
        assert_eq!(layout.widths(), vec![70, 80, 80]);

        // Neighbour would drop to the minimum.
        assert!(!layout.resize(0, 65).unwrap());
        // Last column has no neighbour.
        assert!(!layout.resize(2, 10).unwrap());
        assert_eq!(layout.table_width(), None);
    }

    #[test]
    fn test_expand_resize_grows_table() {
        let mut layout = layout().with_resize_mode(ResizeMode::Expand);
        assert!(layout.resize(2, 20).unwrap());
        assert_eq!(layout.widths(), vec![50, 100, 100]);
        assert_eq!(layout.table_width(), Some(250));

        assert!(!layout.resize(0, -40).unwrap());
        assert!(layout.resize(0, -35).unwrap());
        assert_eq!(layout.table_width(), Some(215));
    }

    #[test]
    fn test_scrollable_without_column_group() {
        let mut layout = layout().with_scrollable(true, false);
        assert_eq!(layout.resize(0, 5), Err(ConfigError::MissingColumnGroup));
        let mut layout = self::layout().with_scrollable(true, true);
        assert!(layout.resize(0, 5).unwrap());
    }

    #[test]
    fn test_reorder() {
        let mut layout = layout();
        assert!(layout.reorder(0, 2, DropPosition::After));
        assert_eq!(keys(&layout), vec!["name", "city", "id"]);

        assert!(layout.reorder(2, 0, DropPosition::Before));
        assert_eq!(keys(&layout), vec!["id", "name", "city"]);

        assert!(layout.reorder(2, 0, DropPosition::After));
        assert_eq!(keys(&layout), vec!["id", "city", "name"]);
    }

    #[test]
    fn test_adjacent_drops_are_rejected() {
        let mut layout = layout();
        assert!(!layout.reorder(0, 1, DropPosition::Before));
        assert!(!layout.reorder(1, 0, DropPosition::After));
        assert!(!layout.reorder(1, 1, DropPosition::After));
        assert_eq!(keys(&layout), vec!["id", "name", "city"]);
    }

    #[test]
    fn test_restore_order_and_widths() {
        let mut layout = layout();
        layout.restore_order(&["city".into(), "gone".into(), "id".into()]);
        assert_eq!(keys(&layout), vec!["city", "id", "name"]);

        layout.restore_widths(&[10, 20], Some(300));
        assert_eq!(layout.widths(), vec![10, 20, 100]);
        assert_eq!(layout.table_width(), Some(300));
    }
}
