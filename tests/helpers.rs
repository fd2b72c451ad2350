//! Test utility functions for issue-harness
#![allow(dead_code)]

use issue_harness::cli::output::format_batch_event;
use issue_harness::{
    BatchEvent, BatchOutcome, BatchRunner, CaseEnvironment, CaseInvoker, CaseTable, Invocation,
    InvokeError, RunConfig,
};

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock invoker that returns predefined outputs and records every
/// environment it was handed. Clones share the same record.
#[derive(Clone)]
pub struct MockInvoker {
    responses: Arc<Vec<String>>,
    repeat_last: bool,
    index: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<CaseEnvironment>>>,
}

impl MockInvoker {
    /// Reply with `responses` in order; further calls are an error
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(responses),
            repeat_last: false,
            index: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Reply with the same output to every call
    pub fn always(output: &str) -> Self {
        Self {
            repeat_last: true,
            ..Self::new(vec![output.to_string()])
        }
    }

    /// Number of invocations so far
    pub fn calls(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    /// Environments seen, in call order
    pub fn seen(&self) -> Vec<CaseEnvironment> {
        self.seen.lock().unwrap().clone()
    }

    /// Titles seen, in call order
    pub fn titles(&self) -> Vec<String> {
        self.seen().into_iter().map(|env| env.title).collect()
    }
}

#[async_trait]
impl CaseInvoker for MockInvoker {
    async fn invoke(&self, env: &CaseEnvironment) -> Result<Invocation, InvokeError> {
        let idx = self.index.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(env.clone());

        let response = if idx < self.responses.len() {
            &self.responses[idx]
        } else if self.repeat_last && !self.responses.is_empty() {
            &self.responses[self.responses.len() - 1]
        } else {
            return Err(InvokeError::Spawn {
                program: "mock".to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("MockInvoker: No response available for request {}", idx + 1),
                ),
            });
        };

        Ok(Invocation::new(response.clone()))
    }
}

/// Test result from running a batch
#[derive(Debug, Clone)]
pub struct BatchTestResult {
    pub outcome: BatchOutcome,
    pub events: Vec<BatchEvent>,
    pub console: Vec<String>,
}

impl BatchTestResult {
    /// Console text with styling removed
    pub fn console_text(&self) -> String {
        console::strip_ansi_codes(&self.console.join("\n")).to_string()
    }

    /// Indices of cases that were started
    pub fn started(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BatchEvent::CaseStarted { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }
}

/// Two-case table shared by most scenarios
pub fn two_bug_table() -> CaseTable {
    CaseTable::from_csv("title,issue\nBug A,desc A\nBug B,desc B\n").unwrap()
}

/// Table with `n` cases titled "Case 0" .. "Case n-1"
pub fn numbered_table(n: usize) -> CaseTable {
    let mut csv = String::from("title,issue\n");
    for i in 0..n {
        csv.push_str(&format!("Case {i},Body {i}\n"));
    }
    CaseTable::from_csv(&csv).unwrap()
}

pub fn default_config() -> RunConfig {
    RunConfig::new("cfg.yaml", "cases.csv")
}

/// Run a batch with any invoker, capturing events and the console lines the
/// binary would print
pub async fn run_batch_with_invoker<I: CaseInvoker>(
    table: &CaseTable,
    config: RunConfig,
    invoker: I,
) -> Result<BatchTestResult, String> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();

    let runner = BatchRunner::new(invoker, config)
        .with_event_handler(move |event| sink.lock().unwrap().push(event.clone()));
    let outcome = runner.run(table).await.map_err(|e| e.to_string())?;

    let events = events.lock().unwrap().clone();
    let console = events.iter().filter_map(format_batch_event).collect();

    Ok(BatchTestResult {
        outcome,
        events,
        console,
    })
}

/// Assert the batch ran every case
pub fn assert_batch_completed(result: &BatchTestResult, cases: usize) {
    assert_eq!(
        result.outcome,
        BatchOutcome::Completed { cases },
        "Expected batch to complete, got {:?}",
        result.outcome
    );
    assert!(!result.console_text().contains("Runtime ERROR found"));
}

/// Assert the batch stopped at `index`
pub fn assert_batch_halted_at(result: &BatchTestResult, index: usize) {
    assert_eq!(
        result.outcome,
        BatchOutcome::Halted { index },
        "Expected batch to halt at case {}, got {:?}",
        index,
        result.outcome
    );
    assert!(result.console_text().contains("Runtime ERROR found"));
}
