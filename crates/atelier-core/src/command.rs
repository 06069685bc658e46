//! Command types carried by execution requests
//!
//! The wire form is a single `command` query parameter; `cancel` is the
//! one value with special dispatch semantics, so it gets its own variant
//! instead of a sentinel string comparison downstream.

use std::fmt::{self, Display, Formatter};

/// Wire value of the cancellation command
pub const CANCEL: &str = "cancel";

/// Parsed command type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// Cancel the user's running operation; bypasses path resolution,
    /// configuration loading and security filtering
    Cancel,
    /// Run the named operation against the argument file
    Execute(String),
}

impl Command {
    /// Parse the `command` query parameter
    ///
    /// Returns `None` for an empty value; the boundary treats a missing
    /// or empty parameter as a request error.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "" => None,
            CANCEL => Some(Self::Cancel),
            other => Some(Self::Execute(other.to_string())),
        }
    }

    /// Whether this is the cancellation command
    #[inline]
    #[must_use]
    pub fn is_cancel(&self) -> bool {
        matches!(self, Self::Cancel)
    }

    /// Wire value of the command
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Cancel => CANCEL,
            Self::Execute(kind) => kind,
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_parses_to_variant() {
        assert_eq!(Command::parse("cancel"), Some(Command::Cancel));
        assert!(Command::parse("cancel").unwrap().is_cancel());
    }

    #[test]
    fn other_values_are_execute() {
        let cmd = Command::parse("run").unwrap();
        assert_eq!(cmd, Command::Execute("run".to_string()));
        assert!(!cmd.is_cancel());
        assert_eq!(cmd.kind(), "run");
    }

    #[test]
    fn empty_is_rejected() {
        assert_eq!(Command::parse(""), None);
    }
}
