//! Batch execution

pub mod runner;

pub use runner::{BatchError, BatchEvent, BatchRunner, EventHandler};
