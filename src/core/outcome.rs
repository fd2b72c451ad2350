//! Invocation results and batch outcomes

/// Substring in a case's standard output that marks a failed run
pub const ERROR_MARKER: &str = "::error::";

/// Captured result of running the program under test for one case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Decoded standard output
    pub stdout: String,

    /// Exit code, if the process exited normally. Never used to judge a case.
    pub exit_code: Option<i32>,
}

impl Invocation {
    pub fn new(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            exit_code: Some(0),
        }
    }

    pub fn with_exit_code(mut self, exit_code: Option<i32>) -> Self {
        self.exit_code = exit_code;
        self
    }

    /// Whether the output carries the error marker
    pub fn error_detected(&self) -> bool {
        self.stdout.contains(ERROR_MARKER)
    }
}

/// How a batch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Every case ran and none reported the marker
    Completed { cases: usize },

    /// The case at `index` reported the marker; later cases never ran
    Halted { index: usize },
}

impl BatchOutcome {
    /// Number of processes launched during the batch
    pub fn invocations(&self) -> usize {
        match self {
            BatchOutcome::Completed { cases } => *cases,
            BatchOutcome::Halted { index } => index + 1,
        }
    }

    pub fn is_halted(&self) -> bool {
        matches!(self, BatchOutcome::Halted { .. })
    }
}
