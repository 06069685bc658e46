//! Atelier execution security filter
//!
//! Inspects the resolved argument file before any execution environment is
//! invoked and rejects requests that violate the execution security policy.
//!
//! The filter seam is [`SecurityFilter`]: stateless, a pure function of
//! file contents, injected into the dispatcher rather than reached through
//! a global, so tests swap in fakes freely. One instance serves the whole
//! process without locking.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod python;

pub use python::PythonSourceFilter;

use std::fmt::Debug;
use std::io;
use std::path::Path;

/// Outcome of a security check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterResult {
    /// File is safe to execute
    Pass,
    /// File violates the policy; the reason is shown to the caller verbatim
    Reject(String),
}

impl FilterResult {
    /// Whether the file passed
    #[inline]
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Rejection reason, if any
    #[inline]
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Pass => None,
            Self::Reject(reason) => Some(reason),
        }
    }
}

/// Security policy applied to argument files before dispatch
///
/// Implementations must be stateless between calls: the result is a pure
/// function of the file's contents and metadata. The dispatcher guarantees
/// the file exists and is a regular file before calling `check`, and runs
/// the check against the resolved local path so symlink tricks cannot
/// bypass it.
pub trait SecurityFilter: Send + Sync + Debug {
    /// Check one argument file against the policy
    ///
    /// # Errors
    /// I/O failure reading the file; policy violations are a
    /// [`FilterResult::Reject`], not an error.
    fn check(&self, file: &Path) -> io::Result<FilterResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_result_accessors() {
        assert!(FilterResult::Pass.is_pass());
        assert_eq!(FilterResult::Pass.reason(), None);

        let reject = FilterResult::Reject("blocked import: os".to_string());
        assert!(!reject.is_pass());
        assert_eq!(reject.reason(), Some("blocked import: os"));
    }
}
