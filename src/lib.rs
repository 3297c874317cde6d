//! Misty: Missingness and Association Library
//!
//! A library for exploring a listings dataset: loading it (from disk or the
//! Inside Airbnb directory page), profiling its columns, and testing whether
//! the missingness of a target column is associated with the other columns.

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use error::MistyError;
