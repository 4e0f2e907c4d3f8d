//! Debugger configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which thrown exceptions raise a [`DebugEvent::Exception`](crate::DebugEvent::Exception).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionBreak {
    /// No exception is reported.
    None,
    /// Only exceptions no handler will catch are reported.
    #[default]
    Uncaught,
    /// Every thrown exception is reported.
    All,
}

/// Configuration of a [`Debugger`](crate::Debugger).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebuggerConfig {
    /// Which exceptions are reported to the listener.
    pub exception_break: ExceptionBreak,

    /// Whether `debugger;` statements raise a break.
    pub break_on_debugger_statement: bool,

    /// How many debug scopes may be nested, counting the one a listener runs
    /// in. Must be at least one.
    pub max_nested_calls: usize,
}

impl Default for DebuggerConfig {
    fn default() -> Self {
        Self {
            exception_break: ExceptionBreak::default(),
            break_on_debugger_statement: true,
            max_nested_calls: 16,
        }
    }
}

/// An error while loading a [`DebuggerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration is not valid JSON or has unknown fields.
    #[error("could not parse debugger configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but holds an unusable value.
    #[error("invalid debugger configuration: {0}")]
    Invalid(String),
}

impl DebuggerConfig {
    /// Parses and validates a JSON configuration. Missing fields take their
    /// default value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the JSON is malformed or a value is out of
    /// range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for unusable values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_nested_calls == 0 {
            return Err(ConfigError::Invalid(
                "`max_nested_calls` must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
