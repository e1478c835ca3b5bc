//! Record model: dynamic values, records, field paths and columns

mod column;
mod path;
mod record;
mod value;

pub use column::*;
pub use path::*;
pub use record::*;
pub use value::*;

use std::sync::Arc;

/// A shared handle to a record.
///
/// Sorted, filtered, paged and selected views all hold clones of the same
/// handle, so pointer identity survives every view transformation.
pub type RowRef = Arc<Record>;
