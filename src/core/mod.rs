//! Core domain models
//!
//! Test cases, the run configuration, and what a run produces.

pub mod case;
pub mod config;
pub mod outcome;

pub use case::*;
pub use config::{RunConfig, DEFAULT_EXECUTABLE};
pub use outcome::*;
