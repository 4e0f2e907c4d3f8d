//! The interface between the debugger and the engine it debugs.
//!
//! The debugger never touches the heap, the compiler or the frame walker
//! directly. Everything it needs from the engine goes through [`DebugHost`].

use std::fmt;

use crate::{DebugResult, ReentrancyError};

/// The state of the engine as far as nested evaluation is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineHealth {
    /// The engine can run script.
    #[default]
    Running,
    /// The engine was terminated, for example after a fatal error.
    Terminated,
    /// The engine is in the middle of being disposed.
    TearingDown,
}

impl EngineHealth {
    /// Checks whether the engine can be re-entered.
    ///
    /// # Errors
    ///
    /// Returns the reason the engine cannot accept a nested call.
    pub const fn check(self) -> Result<(), ReentrancyError> {
        match self {
            Self::Running => Ok(()),
            Self::Terminated => Err(ReentrancyError::Terminated),
            Self::TearingDown => Err(ReentrancyError::TearingDown),
        }
    }
}

/// Engine services the debugger relies on.
///
/// Handles (`Value`, `Context`, `ExecutionState`) are owned by the engine.
/// The debugger only passes them around for the duration of one dispatch or
/// one call.
pub trait DebugHost: Sized {
    /// A script value.
    type Value: Clone + fmt::Debug;

    /// A callable script function.
    type Function;

    /// A handle to an execution context (a global scope).
    type Context: Clone + fmt::Debug;

    /// A view of the paused execution state, valid until it is dropped.
    type ExecutionState;

    /// Reports whether the engine can accept nested evaluation.
    fn health(&self) -> EngineHealth {
        EngineHealth::Running
    }

    /// Creates the isolated context debugger code runs in.
    ///
    /// # Errors
    ///
    /// Returns [`DebugError::Registration`](crate::DebugError::Registration)
    /// if the context cannot be created.
    fn create_debug_context(&mut self) -> DebugResult<Self::Context>;

    /// Disposes a context created by [`DebugHost::create_debug_context`].
    fn dispose_debug_context(&mut self, context: Self::Context);

    /// Gets the context that is currently entered.
    fn current_context(&self) -> Self::Context;

    /// Enters the given context.
    fn enter_context(&mut self, context: &Self::Context);

    /// Exits the given context, which must be the one entered last.
    fn exit_context(&mut self, context: &Self::Context);

    /// Captures the current execution state.
    fn execution_state(&mut self) -> Self::ExecutionState;

    /// Calls `function` with `receiver` as its receiver and `argument` as its
    /// only argument.
    ///
    /// # Errors
    ///
    /// Returns the value thrown by the function.
    fn call_function(
        &mut self,
        function: &Self::Function,
        receiver: &Self::ExecutionState,
        argument: Self::Value,
    ) -> Result<Self::Value, Self::Value>;

    /// Lists the internal slots of `value`, allocating the result in `context`.
    ///
    /// Values without internal slots produce an empty list.
    fn internal_properties(
        &mut self,
        context: &Self::Context,
        value: &Self::Value,
    ) -> Vec<(String, Self::Value)>;

    /// Enables or disables LiveEdit.
    fn set_live_edit_enabled(&mut self, _enabled: bool) {}
}
