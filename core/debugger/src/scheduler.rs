//! Break scheduling.
//!
//! A scheduled break is a single flag per engine. The engine consumes it at
//! its next safe point; until then it can be cancelled.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// A handle to the pending-break flag of one engine.
///
/// Unlike the [`Debugger`](crate::Debugger) itself, the handle is `Send` and
/// `Sync`, so a controller thread can interrupt a script that is running on
/// the engine thread.
#[derive(Debug, Clone, Default)]
pub struct BreakHandle {
    pending: Arc<AtomicBool>,
}

impl BreakHandle {
    /// Schedules a break at the engine's next safe point.
    ///
    /// Scheduling while a break is already pending has no further effect.
    pub fn schedule(&self) {
        if !self.pending.swap(true, Ordering::SeqCst) {
            log::trace!("debug break scheduled");
        }
    }

    /// Removes the scheduled break if it has not fired yet.
    pub fn cancel(&self) {
        if self.pending.swap(false, Ordering::SeqCst) {
            log::trace!("debug break cancelled");
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct BreakScheduler {
    handle: BreakHandle,
}

impl BreakScheduler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn handle(&self) -> &BreakHandle {
        &self.handle
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.handle.pending.load(Ordering::SeqCst)
    }

    /// Consumes the pending break, returning whether there was one.
    pub(crate) fn take(&self) -> bool {
        self.handle.pending.swap(false, Ordering::SeqCst)
    }
}
