//! Debug events and the details handed to the listener.

use std::{fmt, marker::PhantomData};

use crate::{CallError, DebugHost, Debugger, InternalProperties};

/// Debug events which can occur in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DebugEvent {
    /// Execution stopped at a scheduled break or a `debugger;` statement.
    Break = 1,
    /// An exception was thrown.
    Exception = 2,
    /// A script was compiled.
    AfterCompile = 3,
    /// A script failed to compile.
    CompileError = 4,
    /// An async task changed state.
    AsyncTaskEvent = 5,
}

impl DebugEvent {
    /// Gets the name of the event.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Break => "break",
            Self::Exception => "exception",
            Self::AfterCompile => "afterCompile",
            Self::CompileError => "compileError",
            Self::AsyncTaskEvent => "asyncTaskEvent",
        }
    }
}

impl fmt::Display for DebugEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why execution stopped with a [`DebugEvent::Break`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreakReason {
    /// A break scheduled by the controller reached a safe point.
    Scheduled,
    /// The script executed a `debugger;` statement.
    DebuggerStatement,
}

/// A lifecycle transition of an async task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsyncTaskTransition {
    /// A task was queued to run once.
    Enqueue,
    /// A task was queued to run repeatedly.
    EnqueueRecurring,
    /// A task is about to run.
    WillHandle,
    /// A task finished running.
    DidHandle,
    /// A queued task was cancelled.
    Cancel,
}

/// An async task transition reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AsyncTask {
    /// What happened to the task.
    pub transition: AsyncTaskTransition,
    /// An engine-assigned task id, stable across transitions.
    pub id: u64,
    /// A human readable task name, e.g. `"Promise.then"`.
    pub name: String,
}

/// The data attached to a debug event.
///
/// Everything in here is borrowed from the engine for the duration of the
/// dispatch only.
#[derive(Debug, Clone)]
pub enum EventData<'a, V> {
    /// Data of a [`DebugEvent::Break`].
    Break {
        /// Why execution stopped.
        reason: BreakReason,
    },
    /// Data of a [`DebugEvent::Exception`].
    Exception {
        /// The thrown value.
        exception: &'a V,
        /// Whether no handler will catch the exception.
        uncaught: bool,
    },
    /// Data of a [`DebugEvent::AfterCompile`].
    AfterCompile {
        /// The compiled script.
        script: &'a V,
    },
    /// Data of a [`DebugEvent::CompileError`].
    CompileError {
        /// The script that failed to compile.
        script: &'a V,
        /// The compiler's error message.
        message: &'a str,
    },
    /// Data of a [`DebugEvent::AsyncTaskEvent`].
    AsyncTask(&'a AsyncTask),
}

impl<V> EventData<'_, V> {
    /// Gets the kind of event this data belongs to.
    pub const fn event(&self) -> DebugEvent {
        match self {
            Self::Break { .. } => DebugEvent::Break,
            Self::Exception { .. } => DebugEvent::Exception,
            Self::AfterCompile { .. } => DebugEvent::AfterCompile,
            Self::CompileError { .. } => DebugEvent::CompileError,
            Self::AsyncTask(_) => DebugEvent::AsyncTaskEvent,
        }
    }
}

/// The details of one debug event, passed to the listener.
///
/// An `EventDetails` only exists while the listener runs. It cannot be
/// cloned, and the listener only ever receives it through a short-lived
/// mutable borrow, so nothing it exposes can outlive the dispatch.
pub struct EventDetails<'a, H: DebugHost> {
    data: EventData<'a, H::Value>,
    execution_state: H::ExecutionState,
    event_context: H::Context,
    callback_data: &'a H::Value,
    host: &'a mut H,
    debugger: &'a Debugger<H>,
    _not_send: PhantomData<*const ()>,
}

impl<'a, H: DebugHost> EventDetails<'a, H> {
    pub(crate) fn new(
        data: EventData<'a, H::Value>,
        execution_state: H::ExecutionState,
        event_context: H::Context,
        callback_data: &'a H::Value,
        host: &'a mut H,
        debugger: &'a Debugger<H>,
    ) -> Self {
        Self {
            data,
            execution_state,
            event_context,
            callback_data,
            host,
            debugger,
            _not_send: PhantomData,
        }
    }

    /// Gets the event type.
    pub const fn event(&self) -> DebugEvent {
        self.data.event()
    }

    /// Gets the execution state of the paused program.
    pub const fn execution_state(&self) -> &H::ExecutionState {
        &self.execution_state
    }

    /// Gets the data attached to the event.
    pub const fn event_data(&self) -> &EventData<'a, H::Value> {
        &self.data
    }

    /// Gets the context that was active when the event happened.
    ///
    /// This is not the context that is active now: the listener runs inside
    /// the debug context.
    pub const fn event_context(&self) -> &H::Context {
        &self.event_context
    }

    /// Gets the client data passed along with the listener registration.
    pub const fn callback_data(&self) -> &H::Value {
        self.callback_data
    }

    /// Gets the engine the event happened in.
    pub fn engine(&self) -> &H {
        &*self.host
    }

    /// Runs `function` in the debug context with the paused execution state as
    /// receiver.
    ///
    /// # Errors
    ///
    /// Fails if the engine cannot be re-entered, or with the thrown value if
    /// the function throws.
    pub fn call(
        &mut self,
        function: &H::Function,
        argument: H::Value,
    ) -> Result<H::Value, CallError<H::Value>> {
        self.debugger
            .call_with_receiver(self.host, &self.execution_state, function, argument)
    }

    /// Lists the internal properties of `value`.
    pub fn internal_properties(&mut self, value: &H::Value) -> InternalProperties<H::Value> {
        self.debugger.internal_properties(self.host, value)
    }

    /// Schedules another break at the next safe point after this event.
    pub fn schedule_break(&self) {
        self.debugger.schedule_break();
    }

    /// Cancels a break scheduled while handling this event.
    pub fn cancel_break(&self) {
        self.debugger.cancel_break();
    }
}

impl<H: DebugHost> fmt::Debug for EventDetails<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDetails")
            .field("event", &self.event())
            .field("data", &self.data)
            .field("event_context", &self.event_context)
            .field("callback_data", &self.callback_data)
            .finish_non_exhaustive()
    }
}
