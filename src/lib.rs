//! issue-harness - replays issue fixtures through an issue-labeling action

pub mod cli;
pub mod core;
pub mod execution;
pub mod invoke;

// Re-export commonly used types
pub use core::{BatchOutcome, CaseLoadError, CaseTable, Invocation, RunConfig, TestCase, ERROR_MARKER};
pub use execution::{BatchError, BatchEvent, BatchRunner};
pub use invoke::{CaseEnvironment, CaseInvoker, InvokeError, ProcessInvoker};
