//! Launching the program under test for each case

pub mod error;
pub mod process;

use crate::core::{Invocation, RunConfig, TestCase};
use async_trait::async_trait;
pub use error::InvokeError;
pub use process::ProcessInvoker;

/// Variable carrying the action config path
pub const CONFIG_PATH_VAR: &str = "INPUT_CONFIG_PATH";

/// Variable carrying the issue title
pub const TITLE_VAR: &str = "INPUT_LOCAL_TEST_TITLE";

/// Variable carrying the issue body
pub const BODY_VAR: &str = "INPUT_LOCAL_TEST_BODY";

/// Variable switching the action's debug output, "1" or "0"
pub const DEBUG_VAR: &str = "RUNNER_DEBUG";

/// Environment handed to one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseEnvironment {
    pub config_path: String,
    pub title: String,
    pub body: String,
    pub debug: bool,
}

impl CaseEnvironment {
    /// Build the environment for a case under the given run configuration
    pub fn for_case(config: &RunConfig, case: &TestCase) -> Self {
        Self {
            config_path: config.config_path.clone(),
            title: case.title.clone(),
            body: case.body.clone(),
            debug: config.debug,
        }
    }

    /// Value of the debug variable
    pub fn debug_flag(&self) -> &'static str {
        if self.debug {
            "1"
        } else {
            "0"
        }
    }

    /// Variables as (name, value) pairs
    pub fn vars(&self) -> [(&'static str, &str); 4] {
        [
            (CONFIG_PATH_VAR, self.config_path.as_str()),
            (TITLE_VAR, self.title.as_str()),
            (BODY_VAR, self.body.as_str()),
            (DEBUG_VAR, self.debug_flag()),
        ]
    }
}

/// Trait for case invocation - lets tests stand in for the real process
#[async_trait]
pub trait CaseInvoker: Send + Sync {
    /// Run the program under test once with the given environment and
    /// return its captured output
    async fn invoke(&self, env: &CaseEnvironment) -> Result<Invocation, InvokeError>;
}
