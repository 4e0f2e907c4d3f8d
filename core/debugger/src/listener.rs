//! The debug event listener slot.
//!
//! An engine has at most one listener. Registering a new one replaces the old
//! one; there is no fan-out to several observers.

use std::{cell::RefCell, fmt, rc::Rc};

use crate::{DebugHost, EventDetails};

/// A debug event callback.
///
/// The callback borrows the [`EventDetails`] only for the duration of the
/// call and must not rely on anything it exposes afterwards.
pub type EventCallback<H> = Rc<dyn Fn(&mut EventDetails<'_, H>)>;

/// A listener together with the client data it was registered with.
pub struct Registration<H: DebugHost> {
    callback: EventCallback<H>,
    data: H::Value,
}

impl<H: DebugHost> Registration<H> {
    /// Creates a registration for `callback`, which receives `data` through
    /// [`EventDetails::callback_data`].
    pub fn new<F>(callback: F, data: H::Value) -> Self
    where
        F: Fn(&mut EventDetails<'_, H>) + 'static,
    {
        Self {
            callback: Rc::new(callback),
            data,
        }
    }

    /// Creates a registration from an already shared callback.
    pub fn from_callback(callback: EventCallback<H>, data: H::Value) -> Self {
        Self { callback, data }
    }

    /// Gets the client data.
    pub fn data(&self) -> &H::Value {
        &self.data
    }

    /// Gets the callback.
    pub fn callback(&self) -> &EventCallback<H> {
        &self.callback
    }

    /// Checks whether both registrations share the same callback.
    pub fn same_callback(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }

    pub(crate) fn notify(&self, details: &mut EventDetails<'_, H>) {
        (self.callback)(details);
    }
}

impl<H: DebugHost> Clone for Registration<H> {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
            data: self.data.clone(),
        }
    }
}

impl<H: DebugHost> fmt::Debug for Registration<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

pub(crate) struct ListenerRegistry<H: DebugHost> {
    slot: RefCell<Option<Registration<H>>>,
}

impl<H: DebugHost> ListenerRegistry<H> {
    pub(crate) fn new() -> Self {
        Self {
            slot: RefCell::new(None),
        }
    }

    /// Swaps in `registration` and hands back the previous one.
    pub(crate) fn replace(
        &self,
        registration: Option<Registration<H>>,
    ) -> Option<Registration<H>> {
        self.slot.replace(registration)
    }

    /// Snapshots the current registration for one dispatch.
    pub(crate) fn current(&self) -> Option<Registration<H>> {
        self.slot.borrow().clone()
    }

    pub(crate) fn is_registered(&self) -> bool {
        self.slot.borrow().is_some()
    }
}
