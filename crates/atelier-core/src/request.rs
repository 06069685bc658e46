//! Execution request model

use crate::command::Command;
use crate::path::RequestPath;

/// One authenticated execution request
///
/// Identity comes from the boundary's authentication mechanism; the path
/// and command come from the request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecRequest {
    /// Parsed command type
    pub command: Command,
    /// Authenticated user identity
    pub user: String,
    /// Request path (`/workspace/project[/filePath...]`)
    pub path: RequestPath,
}

impl ExecRequest {
    /// Create a request
    #[inline]
    #[must_use]
    pub fn new(command: Command, user: impl Into<String>, path: RequestPath) -> Self {
        Self {
            command,
            user: user.into(),
            path,
        }
    }
}
