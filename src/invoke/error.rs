//! Invocation error types

use thiserror::Error;

/// Error types for launching the program under test
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Output of '{program}' is not valid UTF-8: {source}")]
    Decode {
        program: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}
