//! Programs and functions the scripted engine runs.

use std::{fmt, rc::Rc};

use kestrel_debugger::AsyncTask;

use crate::{ExecutionState, ScriptEngine, Value};

/// A host callback run as part of a program.
pub type HostOp = Rc<dyn Fn(&mut ScriptEngine)>;

/// A native function body.
pub type NativeFn = Rc<dyn Fn(&ExecutionState, Value) -> Result<Value, Value>>;

/// One step of a program.
#[derive(Clone)]
pub enum Op {
    /// A plain statement. Every statement boundary is a safe point.
    Statement,
    /// Enters a function frame. Function entry is a safe point.
    Enter(String),
    /// Leaves the current function frame. Function exit is a safe point.
    Exit,
    /// A `debugger;` statement.
    Debugger,
    /// Compiles a script, successfully or with the given error message.
    Compile {
        /// The script name.
        name: String,
        /// The compile error, if compilation fails.
        error: Option<String>,
    },
    /// Throws `value`. An uncaught throw aborts the program.
    Throw {
        /// The thrown value.
        value: Value,
        /// Whether a handler catches it.
        caught: bool,
    },
    /// Reports an async task transition.
    Async(AsyncTask),
    /// Terminates the engine.
    Terminate,
    /// Runs host code between two statements.
    Host(HostOp),
}

impl Op {
    /// Creates an [`Op::Compile`] that succeeds.
    pub fn compile(name: impl Into<String>) -> Self {
        Self::Compile {
            name: name.into(),
            error: None,
        }
    }

    /// Creates an [`Op::Compile`] that fails with `message`.
    pub fn compile_error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Compile {
            name: name.into(),
            error: Some(message.into()),
        }
    }

    /// Creates an [`Op::Host`].
    pub fn host(f: impl Fn(&mut ScriptEngine) + 'static) -> Self {
        Self::Host(Rc::new(f))
    }
}

impl fmt::Debug for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Statement => f.write_str("Statement"),
            Self::Enter(name) => f.debug_tuple("Enter").field(name).finish(),
            Self::Exit => f.write_str("Exit"),
            Self::Debugger => f.write_str("Debugger"),
            Self::Compile { name, error } => f
                .debug_struct("Compile")
                .field("name", name)
                .field("error", error)
                .finish(),
            Self::Throw { value, caught } => f
                .debug_struct("Throw")
                .field("value", value)
                .field("caught", caught)
                .finish(),
            Self::Async(task) => f.debug_tuple("Async").field(task).finish(),
            Self::Terminate => f.write_str("Terminate"),
            Self::Host(_) => f.write_str("Host(..)"),
        }
    }
}

/// A function that can be passed to the debugger.
#[derive(Clone)]
pub enum Function {
    /// A native function receiving the execution state and one argument.
    Native(NativeFn),
    /// A script function: runs `body`, then returns `result`.
    Script {
        /// The statements of the function.
        body: Vec<Op>,
        /// The returned value.
        result: Value,
    },
}

impl Function {
    /// Creates a native function.
    pub fn native(
        f: impl Fn(&ExecutionState, Value) -> Result<Value, Value> + 'static,
    ) -> Self {
        Self::Native(Rc::new(f))
    }

    /// Creates a script function.
    #[must_use]
    pub fn script(body: Vec<Op>, result: Value) -> Self {
        Self::Script { body, result }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(_) => f.write_str("Native(..)"),
            Self::Script { body, result } => f
                .debug_struct("Script")
                .field("body", body)
                .field("result", result)
                .finish(),
        }
    }
}
