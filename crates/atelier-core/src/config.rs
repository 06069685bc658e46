//! Per-project execution configuration
//!
//! Each project may carry an `execution.conf` (TOML) directly under its
//! store. A missing file means defaults; a malformed file is fatal for the
//! request so operator misconfiguration is never masked.

use crate::error::ExecError;
use crate::metastore::ProjectStore;
use serde::{Deserialize, Serialize};

/// Fixed name of the per-project configuration file
pub const CONFIG_FILE_NAME: &str = "execution.conf";

/// Where a configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from `execution.conf`
    File,
    /// Built-in defaults (no file present)
    Defaults,
}

impl ConfigSource {
    /// Human-readable notice line for the caller
    #[inline]
    #[must_use]
    pub fn notice(self) -> &'static str {
        match self {
            Self::File => "Configuration file loaded.",
            Self::Defaults => "Using default configuration.",
        }
    }
}

/// Execution settings for one project
///
/// Immutable once loaded; one instance per request. Unknown keys are
/// rejected so typos surface as parse failures instead of silently
/// falling back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutionConfig {
    /// Interpreter to run argument files with
    pub interpreter: String,
    /// Extra arguments passed before the file path
    pub interpreter_args: Vec<String>,
    /// Wall-clock bound for one execution
    pub timeout_secs: u64,
    /// Cap on collected output lines
    pub max_output_lines: usize,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            interpreter: "python".to_string(),
            interpreter_args: Vec::new(),
            timeout_secs: 30,
            max_output_lines: 1000,
        }
    }
}

impl ExecutionConfig {
    /// Load the configuration for a project
    ///
    /// # Returns
    /// The configuration plus its [`ConfigSource`], which drives the
    /// notice line prepended to successful output.
    ///
    /// # Errors
    /// - `ExecError::ConfigParse` when `execution.conf` exists but is
    ///   malformed (fatal, never defaulted)
    /// - `ExecError::Io` when the file exists but cannot be read
    pub async fn load(project: &ProjectStore) -> Result<(Self, ConfigSource), ExecError> {
        let file = project.child(CONFIG_FILE_NAME);
        if !file.is_file() {
            return Ok((Self::default(), ConfigSource::Defaults));
        }
        let raw = tokio::fs::read_to_string(file.path()).await?;
        let config = toml::from_str(&raw).map_err(|e| ExecError::ConfigParse {
            path: file.path().to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %file.path().display(), "loaded execution configuration");
        Ok((config, ConfigSource::File))
    }
}
