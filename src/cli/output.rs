//! CLI output formatting

use crate::{core::BatchOutcome, execution::BatchEvent};
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "");

/// Line printed before the table is read
pub fn format_loading(data_path: &str) -> String {
    format!("{}load data from {}", INFO, style(data_path).bold())
}

/// Line printed once the table is in memory
pub fn format_loaded(cases: usize) -> String {
    format!("{}loaded {} test cases", INFO, style(cases).cyan())
}

/// Header printed before each case runs
pub fn format_case_header(index: usize) -> String {
    style(format!("********** TEST ISSUE {} **********", index))
        .bold()
        .to_string()
}

/// Format a batch event for display. Returns `None` for events that print
/// nothing.
pub fn format_batch_event(event: &BatchEvent) -> Option<String> {
    match event {
        BatchEvent::CaseStarted { index, .. } => Some(format_case_header(*index)),
        BatchEvent::CaseOutput { output, .. } => Some(output.clone()),
        BatchEvent::CasePassed { .. } => Some("\n\n".to_string()),
        BatchEvent::CaseFailed { .. } => {
            Some(format!("{}{}", CROSS, style("Runtime ERROR found").red().bold()))
        }
        BatchEvent::BatchFinished { outcome } => match outcome {
            BatchOutcome::Completed { cases } => Some(format!(
                "{}{} test cases ran without errors",
                CHECK,
                style(cases).green()
            )),
            BatchOutcome::Halted { .. } => None,
        },
    }
}
