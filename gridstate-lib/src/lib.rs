//! Data table state engine
//!
//! Headless state for interactive tables: sorting, filtering, selection,
//! pagination with lazy loading, column layout, row expansion and persisted
//! table state. A [`TableController`] owns the rows and reacts to data
//! changes and user interactions; a renderer reads its queries and drains its
//! [`TableEvent`]s.

pub mod bus;
pub mod columns;
pub mod error;
pub mod event;
pub mod expansion;
pub mod filter;
pub mod model;
pub mod page;
pub mod selection;
pub mod sort;
pub mod state;

mod config;
mod controller;

pub use config::TableConfig;
pub use controller::*;
pub use event::TableEvent;
