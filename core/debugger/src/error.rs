//! Error types of the debug core.

use thiserror::Error;

use crate::removed::RemovedCapability;

/// Result type for debugger operations.
pub type DebugResult<T> = Result<T, DebugError>;

/// An error raised by the debug core itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DebugError {
    /// The engine cannot enable debug instrumentation.
    #[error("cannot enable debugging: {0}")]
    Registration(String),

    /// The engine cannot accept a nested evaluation right now.
    #[error("the engine cannot accept a debugger call: {0}")]
    Reentrancy(#[from] ReentrancyError),

    /// The operation was removed from the debugger API.
    #[error("`{0}` is no longer supported")]
    Unsupported(RemovedCapability),
}

/// The reason a debugger call could not enter the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReentrancyError {
    /// The engine was terminated and runs no more script.
    #[error("the engine was terminated")]
    Terminated,

    /// The engine is being torn down.
    #[error("the engine is being torn down")]
    TearingDown,

    /// Too many debugger calls are nested inside each other.
    #[error("more than {limit} nested debugger calls")]
    TooDeep {
        /// The configured nesting limit.
        limit: usize,
    },
}

/// The error returned by [`Debugger::call`](crate::Debugger::call).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError<V> {
    /// The call never reached the diagnostic function.
    #[error(transparent)]
    Debug(#[from] DebugError),

    /// The diagnostic function threw; the thrown value is carried along.
    #[error("the diagnostic function threw {0:?}")]
    Evaluation(V),
}

impl<V> CallError<V> {
    /// Gets the value thrown by the diagnostic function, if that is what failed.
    pub fn thrown(&self) -> Option<&V> {
        match self {
            Self::Evaluation(value) => Some(value),
            Self::Debug(_) => None,
        }
    }
}

impl<V> From<ReentrancyError> for CallError<V> {
    fn from(err: ReentrancyError) -> Self {
        Self::Debug(DebugError::Reentrancy(err))
    }
}
