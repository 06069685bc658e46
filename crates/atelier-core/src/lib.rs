//! Atelier Core - shared model for the execution service
//!
//! Provides the building blocks the dispatch pipeline is assembled from:
//! - Request paths (`/workspace/project[/filePath...]`) and their resolution
//! - The project metastore seam and project-scoped file stores
//! - Per-project execution configuration (`execution.conf`)
//! - Server preferences (feature flags, OAuth client keys)
//! - The error taxonomy every layer surfaces
//!
//! # Example
//!
//! ```rust,ignore
//! use atelier_core::{ExecRequest, Command, RequestPath};
//! use atelier_core::metastore::{FsMetaStore, resolve};
//!
//! let metastore = FsMetaStore::new("/srv/atelier");
//! let path = RequestPath::parse("/ws1/proj1/src/main.py");
//! let (project, argument) = resolve(&path, &metastore)?;
//! # Ok::<(), atelier_core::ExecError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod command;
pub mod config;
pub mod error;
pub mod metastore;
pub mod path;
pub mod prefs;
pub mod request;

// Re-exports for convenience
pub use command::Command;
pub use config::{ConfigSource, ExecutionConfig, CONFIG_FILE_NAME};
pub use error::ExecError;
pub use metastore::{resolve, FileStore, FsMetaStore, MetaStore, ProjectInfo, ProjectStore};
pub use path::RequestPath;
pub use prefs::{Preferences, EXECUTION_ENABLED};
pub use request::ExecRequest;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Atelier Core
    pub use crate::{
        resolve, Command, ConfigSource, ExecError, ExecRequest, ExecutionConfig, FileStore,
        FsMetaStore, MetaStore, Preferences, ProjectInfo, ProjectStore, RequestPath,
    };
}
