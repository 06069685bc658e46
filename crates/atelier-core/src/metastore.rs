//! Project metastore seam and project-scoped file stores
//!
//! The metastore that owns project metadata is an external collaborator;
//! [`MetaStore`] keeps its persistence format out of scope. [`FsMetaStore`]
//! is the directory-tree-backed implementation the binary and tests use.

use crate::error::ExecError;
use crate::path::RequestPath;
use std::path::{Path, PathBuf};

/// Metadata describing one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    /// Owning workspace name
    pub workspace: String,
    /// Project name
    pub name: String,
    /// Filesystem location of the project contents
    pub location: PathBuf,
}

impl ProjectInfo {
    /// Get a read-only store rooted at this project
    #[inline]
    #[must_use]
    pub fn store(&self) -> ProjectStore {
        ProjectStore::new(self.location.clone())
    }
}

/// Lookup seam for project metadata
///
/// Implementations own the persistence format; this flow only ever reads.
pub trait MetaStore: Send + Sync {
    /// Look up a project by `(workspace, project)` pair
    fn read_project(&self, workspace: &str, project: &str) -> Option<ProjectInfo>;
}

/// Opaque handle to one project's filesystem location
///
/// Read-only for the execution flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStore {
    root: PathBuf,
}

impl ProjectStore {
    /// Create a store rooted at the given location
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root location of the project
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store for a direct child of the project root
    #[inline]
    #[must_use]
    pub fn child(&self, name: &str) -> FileStore {
        FileStore::new(self.root.join(name))
    }

    /// Store for a file addressed by path segments under the project root
    ///
    /// An empty slice addresses the project root itself.
    #[must_use]
    pub fn file_store(&self, segments: &[String]) -> FileStore {
        let mut path = self.root.clone();
        for segment in segments {
            path.push(segment);
        }
        FileStore::new(path)
    }
}

/// Handle to a single file within a project store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store for the given local path
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolved local path
    ///
    /// Filesystem checks run against this path, not the logical request
    /// path, so symlink tricks cannot bypass them.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the target exists and is a regular file
    #[inline]
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.path.is_file()
    }
}

/// Resolve a request path against the metastore
///
/// # Returns
/// The project store plus the store for the file addressed by the path
/// remainder (the project root when the remainder is empty).
///
/// # Errors
/// `ExecError::InvalidPath` when the path has fewer than two segments or
/// no project metadata matches the `(workspace, project)` pair.
pub fn resolve(
    path: &RequestPath,
    metastore: &dyn MetaStore,
) -> Result<(ProjectStore, FileStore), ExecError> {
    if !path.names_project() {
        return Err(invalid_path(path));
    }
    // `.` and `..` segments would address files outside the project store
    if path
        .segments()
        .iter()
        .any(|segment| matches!(segment.as_str(), "." | ".."))
    {
        tracing::debug!(%path, "relative segment in request path");
        return Err(invalid_path(path));
    }
    let (workspace, project) = match (path.workspace(), path.project()) {
        (Some(workspace), Some(project)) => (workspace, project),
        _ => return Err(invalid_path(path)),
    };
    let Some(info) = metastore.read_project(workspace, project) else {
        tracing::debug!(%path, "no project metadata for request path");
        return Err(invalid_path(path));
    };
    let store = info.store();
    let argument = store.file_store(path.remainder());
    Ok((store, argument))
}

fn invalid_path(path: &RequestPath) -> ExecError {
    ExecError::InvalidPath(format!(
        "{path}: path should be of form /workspaceName/projectName[/filePath]&command=(...)"
    ))
}

/// Directory-tree-backed metastore
///
/// Projects live at `<root>/<workspace>/<project>`; a project exists when
/// that directory does. Good enough for the binary and for tests, and keeps
/// richer metastores behind the [`MetaStore`] trait.
#[derive(Debug, Clone)]
pub struct FsMetaStore {
    root: PathBuf,
}

impl FsMetaStore {
    /// Create a metastore rooted at the given directory
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Metastore root directory
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Whether a name is usable as a single directory component
fn plain_component(name: &str) -> bool {
    !name.is_empty() && !matches!(name, "." | "..") && !name.contains(['/', '\\'])
}

impl MetaStore for FsMetaStore {
    fn read_project(&self, workspace: &str, project: &str) -> Option<ProjectInfo> {
        if !plain_component(workspace) || !plain_component(project) {
            return None;
        }
        let location = self.root.join(workspace).join(project);
        if location.is_dir() {
            Some(ProjectInfo {
                workspace: workspace.to_string(),
                name: project.to_string(),
                location,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FsMetaStore) {
        let dir = tempfile::tempdir().unwrap();
        let metastore = FsMetaStore::new(dir.path());
        (dir, metastore)
    }

    #[test]
    fn resolve_known_project() {
        let (dir, metastore) = temp_store();
        std::fs::create_dir_all(dir.path().join("ws1/proj1/src")).unwrap();

        let path = RequestPath::parse("/ws1/proj1/src/main.py");
        let (project, argument) = resolve(&path, &metastore).unwrap();
        assert_eq!(project.root(), dir.path().join("ws1/proj1"));
        assert_eq!(argument.path(), dir.path().join("ws1/proj1/src/main.py"));
    }

    #[test]
    fn resolve_empty_remainder_is_project_root() {
        let (dir, metastore) = temp_store();
        std::fs::create_dir_all(dir.path().join("ws1/proj1")).unwrap();

        let path = RequestPath::parse("/ws1/proj1");
        let (project, argument) = resolve(&path, &metastore).unwrap();
        assert_eq!(argument.path(), project.root());
    }

    #[test]
    fn resolve_too_few_segments() {
        let (_dir, metastore) = temp_store();
        let path = RequestPath::parse("/ws1");
        let err = resolve(&path, &metastore).unwrap_err();
        assert!(matches!(err, ExecError::InvalidPath(_)));
        assert!(err.to_string().contains("/workspaceName/projectName"));
    }

    #[test]
    fn resolve_unknown_project() {
        let (_dir, metastore) = temp_store();
        let path = RequestPath::parse("/ws1/ghost/main.py");
        assert!(matches!(
            resolve(&path, &metastore),
            Err(ExecError::InvalidPath(_))
        ));
    }

    #[test]
    fn resolve_rejects_parent_segments() {
        let (dir, metastore) = temp_store();
        std::fs::create_dir_all(dir.path().join("ws1/proj1")).unwrap();
        std::fs::write(dir.path().join("outside.py"), "print(1)\n").unwrap();

        for raw in [
            "/ws1/proj1/../../outside.py",
            "/ws1/proj1/./main.py",
            "/../ws1/proj1/main.py",
            "/ws1/../proj1/main.py",
        ] {
            let path = RequestPath::parse(raw);
            let err = resolve(&path, &metastore).unwrap_err();
            assert!(matches!(err, ExecError::InvalidPath(_)), "{raw}");
        }
    }

    #[test]
    fn read_project_rejects_relative_names() {
        let (dir, metastore) = temp_store();
        std::fs::create_dir_all(dir.path().join("ws1/proj1")).unwrap();

        assert!(metastore.read_project("..", "..").is_none());
        assert!(metastore.read_project(".", "proj1").is_none());
        assert!(metastore.read_project("ws1", "proj1/..").is_none());
        assert!(metastore.read_project("ws1", "proj1").is_some());
    }

    #[test]
    fn child_addresses_direct_entry() {
        let store = ProjectStore::new("/srv/p");
        assert_eq!(store.child("execution.conf").path(), Path::new("/srv/p/execution.conf"));
    }
}
