//! Execution environment seam
//!
//! An environment is the per-user stateful executor requests are forwarded
//! to once validated. Lifecycle is owned by the
//! [`EnvironmentRegistry`](crate::registry::EnvironmentRegistry); the
//! dispatcher only looks environments up.

use async_trait::async_trait;
use atelier_core::{ExecError, ExecutionConfig, FileStore};
use std::fmt::Debug;
use std::sync::Arc;

/// Per-user stateful executor
#[async_trait]
pub trait ExecutionEnvironment: Send + Sync + Debug {
    /// Run a command against a validated argument file
    ///
    /// Called only after the full pipeline succeeded: the file exists, is
    /// a regular file, and passed the security filter.
    ///
    /// # Arguments
    /// * `kind` - Command kind from the request (e.g. `run`)
    /// * `file` - Store for the argument file
    /// * `config` - Project configuration for this request
    ///
    /// # Returns
    /// Output lines to render to the caller.
    ///
    /// # Errors
    /// `ExecError::ExecutionFailed` for environment faults; opaque to the
    /// dispatcher.
    async fn execute(
        &self,
        kind: &str,
        file: &FileStore,
        config: &ExecutionConfig,
    ) -> Result<Vec<String>, ExecError>;

    /// Cancel this user's running operation, if any
    ///
    /// A dispatch target of its own, not a signal interrupting a
    /// concurrently running `execute` call on the dispatcher side.
    async fn cancel(&self) -> Result<Vec<String>, ExecError>;
}

/// Factory creating environments on first use per user
pub trait EnvironmentFactory: Send + Sync {
    /// Create the environment for a user
    fn create(&self, user: &str) -> Arc<dyn ExecutionEnvironment>;
}

// Shared factories: callers that keep a handle to the factory for
// inspection hand the registry an `Arc` of it.
impl<F: EnvironmentFactory + ?Sized> EnvironmentFactory for Arc<F> {
    fn create(&self, user: &str) -> Arc<dyn ExecutionEnvironment> {
        (**self).create(user)
    }
}
