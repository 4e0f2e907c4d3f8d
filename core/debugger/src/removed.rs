//! Removed debugger capabilities.
//!
//! These entry points exist only so that callers written against the older
//! API keep compiling. None of them does anything: each one returns
//! [`DebugError::Unsupported`] or a fixed value.

use std::fmt;

use crate::{DebugError, DebugHost, DebugResult, Debugger};

/// A capability that was removed from the debugger API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemovedCapability {
    /// Querying whether a break is scheduled.
    CheckDebugBreak,
    /// Creating mirror objects for debuggee values.
    GetMirror,
    /// Stable access to the debug context.
    GetDebugContext,
    /// Access to the top-most non-debug context from inside the debug context.
    GetDebuggedContext,
    /// Toggling ES2015 tail call elimination.
    TailCallElimination,
}

impl RemovedCapability {
    /// Gets the name of the removed operation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CheckDebugBreak => "CheckDebugBreak",
            Self::GetMirror => "GetMirror",
            Self::GetDebugContext => "GetDebugContext",
            Self::GetDebuggedContext => "GetDebuggedContext",
            Self::TailCallElimination => "SetTailCallEliminationEnabled",
        }
    }
}

impl fmt::Display for RemovedCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<H: DebugHost> Debugger<H> {
    /// Checks if a break is scheduled.
    ///
    /// # Errors
    ///
    /// Always returns [`DebugError::Unsupported`].
    #[deprecated(note = "no longer supported")]
    pub fn check_debug_break(&self) -> DebugResult<bool> {
        Err(DebugError::Unsupported(RemovedCapability::CheckDebugBreak))
    }

    /// Returns a mirror object for the given value.
    ///
    /// # Errors
    ///
    /// Always returns [`DebugError::Unsupported`].
    #[deprecated(note = "use `Debugger::internal_properties` instead")]
    pub fn mirror(&self, _value: &H::Value) -> DebugResult<H::Value> {
        Err(DebugError::Unsupported(RemovedCapability::GetMirror))
    }

    /// Returns the debug context.
    ///
    /// # Errors
    ///
    /// Always returns [`DebugError::Unsupported`].
    #[deprecated(note = "the debug context is private to the debugger")]
    pub fn debug_context(&self) -> DebugResult<H::Context> {
        Err(DebugError::Unsupported(RemovedCapability::GetDebugContext))
    }

    /// Returns the top-most non-debug context while inside the debug context.
    ///
    /// # Errors
    ///
    /// Always returns [`DebugError::Unsupported`].
    #[deprecated(note = "use `EventDetails::event_context` instead")]
    pub fn debugged_context(&self) -> DebugResult<H::Context> {
        Err(DebugError::Unsupported(RemovedCapability::GetDebuggedContext))
    }

    /// Checks whether tail call elimination is enabled. It never is.
    #[deprecated(note = "no longer supported")]
    #[must_use]
    pub fn is_tail_call_elimination_enabled(&self) -> bool {
        false
    }

    /// Enables or disables tail call elimination.
    ///
    /// # Errors
    ///
    /// Always returns [`DebugError::Unsupported`].
    #[deprecated(note = "no longer supported")]
    pub fn set_tail_call_elimination_enabled(&self, _enabled: bool) -> DebugResult<()> {
        Err(DebugError::Unsupported(RemovedCapability::TailCallElimination))
    }
}
