//! Error types for stfu_core operations.

use crate::types::TestKind;
use thiserror::Error;

/// Core error type for harness operations.
///
/// Test failures are never reported through this type; they are recorded as
/// data in [`crate::TestResult`]. Only faults outside a test body end up here.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// The context-setup function failed while preparing a test.
    ///
    /// The run that hit this error is aborted and no further tests in it are
    /// executed.
    #[error("context setup failed before {kind} test '{test_name}': {source}")]
    Setup {
        /// Name of the test whose context was being prepared
        test_name: String,
        /// Which sequence the test belongs to
        kind: TestKind,
        /// The error returned by the setup function
        source: anyhow::Error,
    },

    /// Configuration error (loading, parsing, invalid values).
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarnessError {
    /// Returns a user-friendly recovery suggestion for the error, if available.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Setup { .. } => Some(
                "The before-each function must not fail. Move fallible work into the test body so it is recorded as a test failure.",
            ),
            Self::ConfigError(_) => Some("Check stfu.toml for unknown keys or values of the wrong type."),
            Self::Io(_) => None,
        }
    }

    /// Name of the test that was being prepared, for setup failures.
    pub fn test_name(&self) -> Option<&str> {
        match self {
            Self::Setup { test_name, .. } => Some(test_name),
            _ => None,
        }
    }
}

/// Convenience Result type for stfu_core operations.
pub type Result<T> = std::result::Result<T, HarnessError>;
