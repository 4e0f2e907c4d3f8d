//! The debug context.
//!
//! Debugger-side code runs in its own context, which is created the first time
//! it is needed and disposed once no listener is registered, no break is
//! pending and no debug scope is active.

use std::cell::{Cell, RefCell};

use crate::{DebugHost, DebugResult};

pub(crate) struct DebugContextManager<H: DebugHost> {
    context: RefCell<Option<H::Context>>,
    depth: Cell<usize>,
}

impl<H: DebugHost> DebugContextManager<H> {
    pub(crate) fn new() -> Self {
        Self {
            context: RefCell::new(None),
            depth: Cell::new(0),
        }
    }

    /// Returns the debug context, creating it on first use.
    pub(crate) fn ensure(&self, host: &mut H) -> DebugResult<H::Context> {
        if let Some(context) = self.context.borrow().as_ref() {
            return Ok(context.clone());
        }

        let context = host.create_debug_context()?;
        log::debug!("debug context {context:?} created");
        *self.context.borrow_mut() = Some(context.clone());
        Ok(context)
    }

    /// Disposes the debug context if it exists.
    pub(crate) fn release(&self, host: &mut H) {
        let Some(context) = self.context.borrow_mut().take() else {
            return;
        };
        log::debug!("debug context {context:?} disposed");
        host.dispose_debug_context(context);
    }

    /// Gets the debug context while a debug scope is active.
    pub(crate) fn entered(&self) -> Option<H::Context> {
        if self.in_debug_scope() {
            self.context.borrow().clone()
        } else {
            None
        }
    }

    pub(crate) fn is_loaded(&self) -> bool {
        self.context.borrow().is_some()
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth.get()
    }

    pub(crate) fn in_debug_scope(&self) -> bool {
        self.depth.get() > 0
    }
}

/// Keeps the debug context entered for as long as it is alive.
///
/// Dropping the scope exits the context again, also when a listener or a
/// diagnostic function panics.
pub(crate) struct DebugScope<'a, H: DebugHost> {
    manager: &'a DebugContextManager<H>,
    host: &'a mut H,
    context: H::Context,
}

impl<'a, H: DebugHost> DebugScope<'a, H> {
    pub(crate) fn enter(
        manager: &'a DebugContextManager<H>,
        host: &'a mut H,
        context: H::Context,
    ) -> Self {
        host.enter_context(&context);
        manager.depth.set(manager.depth.get() + 1);
        Self {
            manager,
            host,
            context,
        }
    }

    pub(crate) fn host(&mut self) -> &mut H {
        self.host
    }
}

impl<H: DebugHost> Drop for DebugScope<'_, H> {
    fn drop(&mut self) {
        self.manager.depth.set(self.manager.depth.get() - 1);
        self.host.exit_context(&self.context);
    }
}
