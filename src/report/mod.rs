//! Report module - console summaries, charts and JSON export

pub mod association_export;
pub mod charts;
pub mod summary;

pub use association_export::*;
pub use charts::*;
pub use summary::*;
