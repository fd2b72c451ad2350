//! Scenario-based tests for issue-harness

mod early_stop;
