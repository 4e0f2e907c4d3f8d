//! Running diagnostic functions while the program is paused.

use crate::{CallError, DebugHost, Debugger, ReentrancyError, context::DebugScope};

impl<H: DebugHost> Debugger<H> {
    /// Runs `function` in the debug context.
    ///
    /// The function is called with the current execution state as receiver
    /// and `argument` as its only argument. The debug context is created on
    /// demand, so this works without a registered listener, and is released
    /// afterwards if nothing else needs it.
    ///
    /// Script executed by `function` never raises debug events.
    ///
    /// # Errors
    ///
    /// - [`CallError::Debug`] if the engine cannot accept a nested call or the
    ///   debug context cannot be created.
    /// - [`CallError::Evaluation`] with the thrown value if `function` throws.
    pub fn call(
        &self,
        host: &mut H,
        function: &H::Function,
        argument: H::Value,
    ) -> Result<H::Value, CallError<H::Value>> {
        self.check_reentry(host)?;
        let receiver = host.execution_state();
        let result = self.call_in_scope(host, &receiver, function, argument);
        drop(receiver);
        self.release_if_idle(host);
        result
    }

    pub(crate) fn call_with_receiver(
        &self,
        host: &mut H,
        receiver: &H::ExecutionState,
        function: &H::Function,
        argument: H::Value,
    ) -> Result<H::Value, CallError<H::Value>> {
        self.check_reentry(host)?;
        self.call_in_scope(host, receiver, function, argument)
    }

    fn call_in_scope(
        &self,
        host: &mut H,
        receiver: &H::ExecutionState,
        function: &H::Function,
        argument: H::Value,
    ) -> Result<H::Value, CallError<H::Value>> {
        let context = self.contexts.ensure(host)?;

        let mut scope = DebugScope::enter(&self.contexts, host, context);
        log::trace!("debugger call at depth {}", self.contexts.depth());
        scope
            .host()
            .call_function(function, receiver, argument)
            .map_err(CallError::Evaluation)
    }

    fn check_reentry(&self, host: &H) -> Result<(), ReentrancyError> {
        host.health().check()?;

        let limit = self.config.max_nested_calls;
        if self.contexts.depth() >= limit {
            return Err(ReentrancyError::TooDeep { limit });
        }
        Ok(())
    }
}
