//! Kestrel's debug core
//!
//! This crate provides the machinery an embedded script engine needs to be
//! observed and interrupted by an external controller (an IDE, a REPL or an
//! inspector) without the scripted program's cooperation.
//!
//! # Overview
//!
//! The debug core consists of several key components:
//!
//! - [`Debugger`]: the per-engine debugger state that the engine owns
//! - [`DebugHost`]: the interface the engine implements so the debugger can
//!   create contexts, obtain execution state and call functions
//! - [`Registration`]: the single active event listener plus its client data
//! - [`BreakHandle`]: a thread-safe handle to the pending-break flag
//! - [`EventDetails`]: a borrowed, call-scoped view of one debug event
//!
//! # Architecture
//!
//! The engine calls into the debugger at well-defined points:
//!
//! - `on_safe_point`: at function entry/exit and loop back-edges, where a
//!   scheduled break may fire
//! - `on_debugger_statement`: when a `debugger;` statement is executed
//! - `on_exception`: when an exception is thrown
//! - `on_after_compile` / `on_compile_error`: after a script was compiled
//! - `on_async_task`: on async task lifecycle transitions
//!
//! Events are delivered synchronously while the debug context is entered.
//! Script that runs inside the debug context never raises further events.
//!
//! # Example
//!
//! ```rust,ignore
//! use kestrel_debugger::{DebugEvent, Registration};
//!
//! let debugger = engine.debugger();
//! debugger.set_listener(
//!     &mut engine,
//!     Some(Registration::<ScriptEngine>::new(|details| {
//!         if details.event() == DebugEvent::Break {
//!             let line = details.call(&frame_source_line, Value::Undefined);
//!             // ...
//!         }
//!     }, Value::Undefined)),
//! )?;
//!
//! debugger.schedule_break();
//! engine.run(&program);
//! ```

mod call;
mod context;
mod dispatch;
mod removed;

pub mod config;
pub mod error;
pub mod event;
pub mod host;
pub mod introspect;
pub mod listener;
pub mod scheduler;


pub use config::{ConfigError, DebuggerConfig, ExceptionBreak};
pub use dispatch::{DispatchOutcome, DispatchState};
pub use error::{CallError, DebugError, DebugResult, ReentrancyError};
pub use event::{AsyncTask, AsyncTaskTransition, BreakReason, DebugEvent, EventData, EventDetails};
pub use host::{DebugHost, EngineHealth};
pub use introspect::{InternalProperties, InternalProperty};
pub use listener::{EventCallback, Registration};
pub use removed::RemovedCapability;
pub use scheduler::BreakHandle;

use std::{cell::Cell, fmt};

use context::DebugContextManager;
use listener::ListenerRegistry;
use scheduler::BreakScheduler;

/// The debugger state of one engine instance.
///
/// A `Debugger` is owned by the engine it debugs and lives exactly as long as
/// that engine. All operations take `&self` so the engine can keep calling its
/// hooks while a listener is running; the host itself is always passed in
/// explicitly.
///
/// The debugger is neither `Send` nor `Sync`. Use [`Debugger::break_handle`]
/// to interrupt the engine from another thread.
pub struct Debugger<H: DebugHost> {
    config: DebuggerConfig,
    registry: ListenerRegistry<H>,
    scheduler: BreakScheduler,
    contexts: DebugContextManager<H>,
    dispatching: Cell<bool>,
    live_edit: Cell<bool>,
}

impl<H: DebugHost> Debugger<H> {
    /// Creates a debugger with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_valid_config(DebuggerConfig::default())
    }

    /// Creates a debugger with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the configuration does not pass
    /// [`DebuggerConfig::validate`].
    pub fn with_config(config: DebuggerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: DebuggerConfig) -> Self {
        Self {
            config,
            registry: ListenerRegistry::new(),
            scheduler: BreakScheduler::new(),
            contexts: DebugContextManager::new(),
            dispatching: Cell::new(false),
            live_edit: Cell::new(true),
        }
    }

    /// Gets the configuration this debugger was created with.
    #[must_use]
    pub fn config(&self) -> &DebuggerConfig {
        &self.config
    }

    /// Replaces the registered event listener, returning the previous one.
    ///
    /// Passing `None` clears the registration. When no break is pending this
    /// also disposes the debug context.
    ///
    /// # Errors
    ///
    /// Returns [`DebugError::Registration`] if the engine cannot enable
    /// debugging, either because it was terminated or because the debug
    /// context could not be created. The previous registration stays in place
    /// in that case.
    pub fn set_listener(
        &self,
        host: &mut H,
        registration: Option<Registration<H>>,
    ) -> DebugResult<Option<Registration<H>>> {
        let Some(registration) = registration else {
            return Ok(self.clear_listener(host));
        };

        if let Err(reason) = host.health().check() {
            log::warn!("cannot register a debug event listener: {reason}");
            return Err(DebugError::Registration(reason.to_string()));
        }

        if let Err(err) = self.contexts.ensure(host) {
            log::warn!("cannot register a debug event listener: {err}");
            return Err(match err {
                err @ DebugError::Registration(_) => err,
                other => DebugError::Registration(other.to_string()),
            });
        }

        let previous = self.registry.replace(Some(registration));
        log::debug!(
            "debug event listener {}",
            if previous.is_some() { "replaced" } else { "registered" }
        );
        Ok(previous)
    }

    /// Clears the registered event listener, returning it.
    pub fn clear_listener(&self, host: &mut H) -> Option<Registration<H>> {
        let previous = self.registry.replace(None);
        if previous.is_some() {
            log::debug!("debug event listener cleared");
        }
        self.release_if_idle(host);
        previous
    }

    /// Checks whether an event listener is registered.
    #[must_use]
    pub fn has_listener(&self) -> bool {
        self.registry.is_registered()
    }

    /// Schedules a break at the next safe point outside the debug context.
    ///
    /// Scheduling again before the break fires has no further effect.
    pub fn schedule_break(&self) {
        self.scheduler.handle().schedule();
    }

    /// Removes a scheduled break if it has not fired yet.
    ///
    /// A debug context kept alive only by the cancelled break is disposed at
    /// the next safe point.
    pub fn cancel_break(&self) {
        self.scheduler.handle().cancel();
    }

    /// Returns a handle to the pending-break flag that can be moved to other
    /// threads.
    #[must_use]
    pub fn break_handle(&self) -> BreakHandle {
        self.scheduler.handle().clone()
    }

    /// Enables or disables LiveEdit for the engine.
    ///
    /// The debugger only records the setting and forwards it to the host.
    pub fn set_live_edit_enabled(&self, host: &mut H, enabled: bool) {
        log::debug!("live edit {}", if enabled { "enabled" } else { "disabled" });
        self.live_edit.set(enabled);
        host.set_live_edit_enabled(enabled);
    }

    /// Checks whether LiveEdit is enabled.
    #[must_use]
    pub fn is_live_edit_enabled(&self) -> bool {
        self.live_edit.get()
    }

    /// Checks whether the debug context currently exists.
    #[must_use]
    pub fn is_debug_context_loaded(&self) -> bool {
        self.contexts.is_loaded()
    }

    /// Checks whether code is currently running inside the debug context.
    #[must_use]
    pub fn in_debug_scope(&self) -> bool {
        self.contexts.in_debug_scope()
    }

    /// Disposes the debug context once nothing needs it anymore.
    pub(crate) fn release_if_idle(&self, host: &mut H) {
        if !self.contexts.in_debug_scope()
            && !self.registry.is_registered()
            && !self.scheduler.is_pending()
        {
            self.contexts.release(host);
        }
    }
}

impl<H: DebugHost> Default for Debugger<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: DebugHost> fmt::Debug for Debugger<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debugger")
            .field("config", &self.config)
            .field("state", &self.state())
            .field("listener", &self.registry.is_registered())
            .field("debug_context_loaded", &self.contexts.is_loaded())
            .field("live_edit", &self.live_edit.get())
            .finish_non_exhaustive()
    }
}
