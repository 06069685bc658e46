//! Atelier Dispatch - validated execution of project files
//!
//! Orchestrates one request end to end:
//! 1. Resolve the request path to a project store
//! 2. Load the per-project execution configuration
//! 3. Run the security filter against the argument file
//! 4. Forward to the calling user's execution environment
//!
//! The `cancel` command bypasses steps 1-3 entirely; it targets an
//! already-running operation for that user, not a file.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use atelier_core::{Command, ExecRequest, FsMetaStore, RequestPath};
//! use atelier_dispatch::{Dispatcher, EnvironmentRegistry, ProcessEnvironmentFactory};
//! use atelier_filter::PythonSourceFilter;
//!
//! let registry = Arc::new(EnvironmentRegistry::new(ProcessEnvironmentFactory));
//! let dispatcher = Dispatcher::new(
//!     Arc::new(FsMetaStore::new("/srv/atelier")),
//!     Arc::new(PythonSourceFilter::new()),
//!     registry,
//! );
//!
//! let request = ExecRequest::new(
//!     Command::Execute("run".into()),
//!     "alice",
//!     RequestPath::parse("/ws1/proj1/src/main.py"),
//! );
//! let lines = dispatcher.dispatch(&request).await?;
//! # Ok::<(), atelier_core::ExecError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod dispatcher;
pub mod environment;
pub mod process;
pub mod registry;

// Re-exports for convenience
pub use dispatcher::Dispatcher;
pub use environment::{EnvironmentFactory, ExecutionEnvironment};
pub use process::{ProcessEnvironment, ProcessEnvironmentFactory};
pub use registry::EnvironmentRegistry;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Atelier Dispatch
    pub use crate::{
        Dispatcher, EnvironmentFactory, EnvironmentRegistry, ExecutionEnvironment,
        ProcessEnvironment, ProcessEnvironmentFactory,
    };
}
