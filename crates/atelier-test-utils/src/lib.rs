//! Testing utilities for the Atelier workspace
//!
//! Shared fixtures: authenticated request headers, temp metastore trees,
//! and recording fakes for the dispatch pipeline.

#![allow(missing_docs)]

use async_trait::async_trait;
use atelier_core::{ExecError, ExecutionConfig, FileStore, FsMetaStore};
use atelier_dispatch::{EnvironmentFactory, ExecutionEnvironment};
use atelier_filter::{FilterResult, SecurityFilter};
use base64::Engine as _;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Canonical test user credentials
pub const TEST_USER: &str = "test";
pub const TEST_PASSWORD: &str = "test";
pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin";

/// Build a Basic `Authorization` header value
#[must_use]
pub fn basic_auth(user: &str, password: &str) -> String {
    let credentials = base64::engine::general_purpose::STANDARD.encode(format!("{user}:{password}"));
    format!("Basic {credentials}")
}

/// Header value for the canonical test user
#[must_use]
pub fn test_user_auth() -> String {
    basic_auth(TEST_USER, TEST_PASSWORD)
}

/// Header value for the canonical admin user
#[must_use]
pub fn admin_auth() -> String {
    basic_auth(ADMIN_USER, ADMIN_PASSWORD)
}

/// Temp-directory-backed metastore tree
///
/// Projects live at `<root>/<workspace>/<project>`; dropped with the
/// fixture.
#[derive(Debug)]
pub struct TempMetaStore {
    root: tempfile::TempDir,
}

impl TempMetaStore {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp metastore"),
        }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Create a project directory, returning its location
    pub fn create_project(&self, workspace: &str, project: &str) -> PathBuf {
        let location = self.root.path().join(workspace).join(project);
        std::fs::create_dir_all(&location).expect("create project dir");
        location
    }

    /// Write a file under a project, creating parent directories
    pub fn write_file(&self, workspace: &str, project: &str, rel: &str, contents: &str) -> PathBuf {
        let path = self.create_project(workspace, project).join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create file parents");
        }
        std::fs::write(&path, contents).expect("write project file");
        path
    }

    /// Metastore reading this tree
    pub fn metastore(&self) -> FsMetaStore {
        FsMetaStore::new(self.root.path())
    }
}

impl Default for TempMetaStore {
    fn default() -> Self {
        Self::new()
    }
}

/// One recorded `execute` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedExecution {
    pub kind: String,
    pub file: PathBuf,
    pub config: ExecutionConfig,
}

/// Environment fake recording every invocation
#[derive(Debug, Default)]
pub struct RecordingEnvironment {
    executions: Mutex<Vec<RecordedExecution>>,
    cancels: Mutex<usize>,
    output: Mutex<Vec<String>>,
}

impl RecordingEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lines `execute` returns
    pub fn set_output(&self, lines: Vec<String>) {
        *self.output.lock() = lines;
    }

    pub fn executions(&self) -> Vec<RecordedExecution> {
        self.executions.lock().clone()
    }

    pub fn cancel_count(&self) -> usize {
        *self.cancels.lock()
    }

    pub fn was_invoked(&self) -> bool {
        !self.executions.lock().is_empty() || *self.cancels.lock() > 0
    }
}

#[async_trait]
impl ExecutionEnvironment for RecordingEnvironment {
    async fn execute(
        &self,
        kind: &str,
        file: &FileStore,
        config: &ExecutionConfig,
    ) -> Result<Vec<String>, ExecError> {
        self.executions.lock().push(RecordedExecution {
            kind: kind.to_string(),
            file: file.path().to_path_buf(),
            config: config.clone(),
        });
        Ok(self.output.lock().clone())
    }

    async fn cancel(&self) -> Result<Vec<String>, ExecError> {
        *self.cancels.lock() += 1;
        Ok(vec!["Execution cancelled.".to_string()])
    }
}

/// Factory handing out recording environments and keeping handles for
/// assertions
#[derive(Debug, Default)]
pub struct RecordingFactory {
    created: Mutex<HashMap<String, Arc<RecordingEnvironment>>>,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Environment created for a user, if any
    pub fn environment(&self, user: &str) -> Option<Arc<RecordingEnvironment>> {
        self.created.lock().get(user).cloned()
    }

    pub fn created_count(&self) -> usize {
        self.created.lock().len()
    }
}

impl EnvironmentFactory for RecordingFactory {
    fn create(&self, user: &str) -> Arc<dyn ExecutionEnvironment> {
        let environment = Arc::new(RecordingEnvironment::new());
        self.created
            .lock()
            .insert(user.to_string(), environment.clone());
        environment
    }
}

/// Filter fake recording invocations and returning a fixed result
#[derive(Debug)]
pub struct StaticFilter {
    result: FilterResult,
    checks: Mutex<Vec<PathBuf>>,
}

impl StaticFilter {
    /// Filter that passes everything
    pub fn passing() -> Self {
        Self {
            result: FilterResult::Pass,
            checks: Mutex::new(Vec::new()),
        }
    }

    /// Filter that rejects everything with the given reason
    pub fn rejecting(reason: &str) -> Self {
        Self {
            result: FilterResult::Reject(reason.to_string()),
            checks: Mutex::new(Vec::new()),
        }
    }

    pub fn check_count(&self) -> usize {
        self.checks.lock().len()
    }

    pub fn checked_paths(&self) -> Vec<PathBuf> {
        self.checks.lock().clone()
    }
}

impl SecurityFilter for StaticFilter {
    fn check(&self, file: &Path) -> io::Result<FilterResult> {
        self.checks.lock().push(file.to_path_buf());
        Ok(self.result.clone())
    }
}
