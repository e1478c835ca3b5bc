//! Error types

mod config;
mod field;
mod storage;
mod table;

pub use config::*;
pub use field::*;
pub use storage::*;
pub use table::*;
