//! Request pipeline
//!
//! One `dispatch` call walks the whole state machine:
//!
//! ```text
//! START -> (cancel?) -> DISPATCH_CANCEL -> DONE
//! START -> RESOLVE_PATH -> LOAD_CONFIG -> CHECK_ARG_EXISTS
//!       -> RUN_SECURITY_FILTER -> DISPATCH_EXECUTE -> DONE
//! ```
//!
//! Any failure is terminal for the request; nothing is retried here.

use crate::registry::EnvironmentRegistry;
use atelier_core::{resolve, Command, ExecError, ExecRequest, ExecutionConfig, MetaStore};
use atelier_filter::{FilterResult, SecurityFilter};
use std::sync::Arc;

/// Orchestrates path resolution, configuration, filtering and execution
///
/// All collaborators are injected; the dispatcher owns no state of its own
/// and is safe to share across request tasks.
#[derive(Clone)]
pub struct Dispatcher {
    metastore: Arc<dyn MetaStore>,
    filter: Arc<dyn SecurityFilter>,
    registry: Arc<EnvironmentRegistry>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Create a dispatcher from its collaborators
    #[must_use]
    pub fn new(
        metastore: Arc<dyn MetaStore>,
        filter: Arc<dyn SecurityFilter>,
        registry: Arc<EnvironmentRegistry>,
    ) -> Self {
        Self {
            metastore,
            filter,
            registry,
        }
    }

    /// Shared environment registry
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Arc<EnvironmentRegistry> {
        &self.registry
    }

    /// Handle one request, returning the output lines to render
    ///
    /// Successful non-cancel output is prefixed with the configuration
    /// notice line ("Configuration file loaded." / "Using default
    /// configuration.").
    ///
    /// # Errors
    /// See [`ExecError`]; every variant terminates the request.
    pub async fn dispatch(&self, request: &ExecRequest) -> Result<Vec<String>, ExecError> {
        // Cancel targets the user's running operation, not a file: no
        // path resolution, no configuration, no filtering.
        let kind = match &request.command {
            Command::Cancel => {
                tracing::debug!(user = %request.user, "dispatching cancel");
                return self
                    .registry
                    .environment_for_user(&request.user)
                    .cancel()
                    .await;
            }
            Command::Execute(kind) => kind,
        };

        let (project, argument) = resolve(&request.path, self.metastore.as_ref())?;
        let (config, source) = ExecutionConfig::load(&project).await?;

        if !argument.is_file() {
            return Err(ExecError::ArgumentNotFound(argument.path().to_path_buf()));
        }
        match self.filter.check(argument.path())? {
            FilterResult::Pass => {}
            FilterResult::Reject(reason) => {
                return Err(ExecError::SecurityRejected(reason));
            }
        }

        tracing::debug!(
            user = %request.user,
            command = %kind,
            file = %argument.path().display(),
            "dispatching execution"
        );
        let environment = self.registry.environment_for_user(&request.user);
        let output = environment.execute(kind, &argument, &config).await?;

        let mut lines = Vec::with_capacity(output.len() + 1);
        lines.push(source.notice().to_string());
        lines.extend(output);
        Ok(lines)
    }
}
