//! Module for testing utilities

pub mod paths;

pub use paths::snap;
