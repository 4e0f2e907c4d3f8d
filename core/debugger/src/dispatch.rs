//! Debug event dispatch.
//!
//! These are the hooks the engine calls. A scheduled break goes
//! `Idle -> BreakPending -> Dispatching -> Idle`; every other event goes
//! straight from `Idle` to `Dispatching`.

use std::cell::Cell;

use crate::{
    AsyncTask, BreakReason, DebugHost, Debugger, EventData, EventDetails, ExceptionBreak,
    context::DebugScope,
};

/// Where an engine's debugger is in its event lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// Nothing is pending.
    Idle,
    /// A break was scheduled and waits for the next safe point.
    BreakPending,
    /// An event is being delivered to the listener.
    Dispatching,
}

/// What happened to an event the engine raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum DispatchOutcome {
    /// The listener received the event.
    Delivered,
    /// No listener was registered, so the event was dropped.
    NoListener,
    /// The event was excluded by the configuration.
    Filtered,
    /// The event happened inside the debug context and was not dispatched.
    Suppressed,
    /// A safe point was reached without a pending break.
    NotPending,
    /// The debug context could not be created, so the event was dropped.
    ///
    /// A registered listener keeps the debug context alive, so this only
    /// happens when the context was disposed while the listener stayed
    /// registered and the host then fails to recreate it.
    Failed,
}

impl DispatchOutcome {
    /// Checks whether the listener received the event.
    #[must_use]
    pub const fn is_delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl<H: DebugHost> Debugger<H> {
    /// Gets the current dispatch state.
    #[must_use]
    pub fn state(&self) -> DispatchState {
        if self.dispatching.get() {
            DispatchState::Dispatching
        } else if self.scheduler.is_pending() {
            DispatchState::BreakPending
        } else {
            DispatchState::Idle
        }
    }

    /// Called by the interpreter at every safe point.
    ///
    /// Fires the pending break, if any. Inside the debug context the break
    /// stays pending until execution is back in the debuggee.
    pub fn on_safe_point(&self, host: &mut H) -> DispatchOutcome {
        if self.contexts.in_debug_scope() {
            return DispatchOutcome::Suppressed;
        }
        if !self.scheduler.take() {
            self.release_if_idle(host);
            return DispatchOutcome::NotPending;
        }
        self.dispatch(
            host,
            EventData::Break {
                reason: BreakReason::Scheduled,
            },
        )
    }

    /// Called by the interpreter when it executes a `debugger;` statement.
    ///
    /// A break that is pending at the same time is satisfied by this one.
    pub fn on_debugger_statement(&self, host: &mut H) -> DispatchOutcome {
        if !self.config.break_on_debugger_statement {
            return DispatchOutcome::Filtered;
        }
        if self.contexts.in_debug_scope() {
            return DispatchOutcome::Suppressed;
        }
        self.scheduler.take();
        self.dispatch(
            host,
            EventData::Break {
                reason: BreakReason::DebuggerStatement,
            },
        )
    }

    /// Called by the interpreter when an exception is thrown.
    pub fn on_exception(
        &self,
        host: &mut H,
        exception: &H::Value,
        uncaught: bool,
    ) -> DispatchOutcome {
        let wanted = match self.config.exception_break {
            ExceptionBreak::None => false,
            ExceptionBreak::Uncaught => uncaught,
            ExceptionBreak::All => true,
        };
        if !wanted {
            log::trace!("exception {exception:?} filtered (uncaught: {uncaught})");
            return DispatchOutcome::Filtered;
        }
        self.dispatch(
            host,
            EventData::Exception {
                exception,
                uncaught,
            },
        )
    }

    /// Called by the compiler after a script was compiled.
    pub fn on_after_compile(&self, host: &mut H, script: &H::Value) -> DispatchOutcome {
        self.dispatch(host, EventData::AfterCompile { script })
    }

    /// Called by the compiler when a script failed to compile.
    pub fn on_compile_error(
        &self,
        host: &mut H,
        script: &H::Value,
        message: &str,
    ) -> DispatchOutcome {
        self.dispatch(host, EventData::CompileError { script, message })
    }

    /// Called by the engine on async task lifecycle transitions.
    pub fn on_async_task(&self, host: &mut H, task: &AsyncTask) -> DispatchOutcome {
        self.dispatch(host, EventData::AsyncTask(task))
    }

    fn dispatch(&self, host: &mut H, data: EventData<'_, H::Value>) -> DispatchOutcome {
        let event = data.event();
        if self.contexts.in_debug_scope() {
            log::trace!("{event} raised inside the debug context, not dispatched");
            return DispatchOutcome::Suppressed;
        }

        let Some(registration) = self.registry.current() else {
            log::trace!("{event} dropped, no listener registered");
            self.release_if_idle(host);
            return DispatchOutcome::NoListener;
        };

        let context = match self.contexts.ensure(host) {
            Ok(context) => context,
            Err(err) => {
                log::warn!("{event} dropped: {err}");
                return DispatchOutcome::Failed;
            }
        };

        let event_context = host.current_context();
        let execution_state = host.execution_state();
        log::trace!("dispatching {event} from {event_context:?}");

        {
            let _dispatching = DispatchingGuard::set(&self.dispatching);
            let mut scope = DebugScope::enter(&self.contexts, host, context);
            let mut details = EventDetails::new(
                data,
                execution_state,
                event_context,
                registration.data(),
                scope.host(),
                self,
            );
            registration.notify(&mut details);
        }

        self.release_if_idle(host);
        DispatchOutcome::Delivered
    }
}

struct DispatchingGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> DispatchingGuard<'a> {
    fn set(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for DispatchingGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
