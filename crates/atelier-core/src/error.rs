//! Error types for the execution service
//!
//! One taxonomy covers the whole request pipeline:
//! - Feature gating at the boundary
//! - Path resolution failures
//! - Configuration parse failures (fatal, never defaulted)
//! - Argument and security failures before dispatch
//! - Opaque failures from the delegated environment
//!
//! Every variant renders as a single plain-text line and terminates the
//! request; nothing at this layer is retried.

use std::path::PathBuf;

/// Main execution service error type
///
/// `Display` output is what the caller sees, so the messages are written
/// for humans, not for logs. `SecurityRejected` renders as exactly the
/// filter's reason string.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The execution feature flag is off
    #[error("Execution environment is disabled.")]
    FeatureDisabled,

    /// Malformed request path or no matching project metadata
    #[error("{0}")]
    InvalidPath(String),

    /// `execution.conf` exists but could not be parsed
    #[error("Could not parse {}: {message}", path.display())]
    ConfigParse {
        /// Location of the offending configuration file
        path: PathBuf,
        /// Parser diagnostic
        message: String,
    },

    /// Argument file missing or not a regular file
    #[error("The file does not exist.")]
    ArgumentNotFound(PathBuf),

    /// The security filter rejected the argument file
    #[error("{0}")]
    SecurityRejected(String),

    /// The delegated environment failed
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// A required server preference is not set
    #[error("Preference not set: {0}")]
    PreferenceMissing(String),

    /// Filesystem fault during resolution or dispatch
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExecError {
    /// Whether this error signals an operator-facing fault rather than a
    /// routine request failure
    ///
    /// Unexpected errors are logged at the boundary before being surfaced.
    #[inline]
    #[must_use]
    pub fn is_unexpected(&self) -> bool {
        matches!(self, Self::ConfigParse { .. } | Self::Io(_) | Self::PreferenceMissing(_))
    }
}
