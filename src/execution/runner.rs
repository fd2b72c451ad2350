//! Batch runner - feeds every case to the invoker, in order, until one fails

use crate::{
    core::{BatchOutcome, CaseTable, RunConfig},
    invoke::{CaseEnvironment, CaseInvoker, InvokeError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Events that can occur during a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    CaseStarted {
        index: usize,
        title: String,
    },
    CaseOutput {
        index: usize,
        output: String,
    },
    CasePassed {
        index: usize,
    },
    CaseFailed {
        index: usize,
    },
    BatchFinished {
        outcome: BatchOutcome,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(&BatchEvent) + Send + Sync>;

/// Error that aborts the whole batch
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Case {index} could not be run: {source}")]
    Invoke {
        index: usize,
        #[source]
        source: InvokeError,
    },
}

/// Runs a table of cases through an invoker
pub struct BatchRunner<I> {
    invoker: I,
    config: RunConfig,
    event_handlers: Vec<EventHandler>,
}

impl<I: CaseInvoker> BatchRunner<I> {
    pub fn new(invoker: I, config: RunConfig) -> Self {
        Self {
            invoker,
            config,
            event_handlers: Vec::new(),
        }
    }

    /// Add an event handler. Handlers run synchronously, in the order they
    /// were added, before the batch moves on.
    pub fn with_event_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&BatchEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
        self
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    fn emit_event(&self, event: BatchEvent) {
        for handler in &self.event_handlers {
            handler(&event);
        }
    }

    /// Run every case in table order, stopping after the first case whose
    /// output carries the error marker.
    ///
    /// A marker is a normal outcome (`BatchOutcome::Halted`). Only a case that
    /// could not be run at all returns an error.
    pub async fn run(&self, table: &CaseTable) -> Result<BatchOutcome, BatchError> {
        info!("Starting batch of {} cases", table.len());

        for case in table {
            self.emit_event(BatchEvent::CaseStarted {
                index: case.index,
                title: case.title.clone(),
            });

            let env = CaseEnvironment::for_case(&self.config, case);
            let invocation = self
                .invoker
                .invoke(&env)
                .await
                .map_err(|source| BatchError::Invoke {
                    index: case.index,
                    source,
                })?;

            debug!(
                "Case {} exited with {:?}, {} bytes of output",
                case.index,
                invocation.exit_code,
                invocation.stdout.len()
            );

            let failed = invocation.error_detected();
            self.emit_event(BatchEvent::CaseOutput {
                index: case.index,
                output: invocation.stdout,
            });

            if failed {
                warn!("Error marker found in case {}, stopping batch", case.index);
                self.emit_event(BatchEvent::CaseFailed { index: case.index });
                let outcome = BatchOutcome::Halted { index: case.index };
                self.emit_event(BatchEvent::BatchFinished { outcome });
                return Ok(outcome);
            }

            self.emit_event(BatchEvent::CasePassed { index: case.index });
        }

        let outcome = BatchOutcome::Completed { cases: table.len() };
        info!("Batch finished: {} cases passed", table.len());
        self.emit_event(BatchEvent::BatchFinished { outcome });
        Ok(outcome)
    }
}
