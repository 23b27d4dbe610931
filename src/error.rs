use std::io;
use thiserror::Error;

use crate::command::Operation;

/// Reasons an action is refused before anything is executed.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no input given for {0}")]
    EmptyInput(Operation),
    #[error("another command is still running")]
    Busy,
    #[error("the worker thread has stopped")]
    WorkerStopped,
}

/// Failures launching or reading a child process.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("executable '{0}' not found")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
