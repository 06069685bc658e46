//! Python source policy
//!
//! Line-based scan for imports of modules that reach outside the sandbox
//! and for builtins that execute arbitrary code. A full AST pass is not
//! needed for this policy; the scan only has to catch statements a Python
//! interpreter would actually honor at module level.

use crate::{FilterResult, SecurityFilter};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io;
use std::path::Path;

/// Modules whose import is rejected
const BLOCKED_MODULES: &[&str] = &[
    "os",
    "sys",
    "subprocess",
    "socket",
    "shutil",
    "ctypes",
    "importlib",
];

/// Builtins whose call is rejected
const BLOCKED_BUILTINS: &[&str] = &["eval", "exec", "compile", "__import__", "open"];

static IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:import|from)\s+([A-Za-z_][A-Za-z0-9_.]*)").expect("import pattern")
});

static BUILTIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^A-Za-z0-9_.])(eval|exec|compile|__import__|open)\s*\(")
        .expect("builtin pattern")
});

/// Security filter for Python argument files
///
/// Stateless; one instance serves all requests concurrently.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonSourceFilter;

impl PythonSourceFilter {
    /// Create the filter
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Scan source text against the policy
    #[must_use]
    pub fn scan(source: &str) -> FilterResult {
        for line in source.lines() {
            let trimmed = line.trim_start();
            if trimmed.starts_with('#') {
                continue;
            }
            if let Some(caps) = IMPORT_RE.captures(line) {
                // `import a.b.c` is blocked by its top-level package
                let module = caps[1].split('.').next().unwrap_or_default();
                if BLOCKED_MODULES.contains(&module) {
                    return FilterResult::Reject(format!("blocked import: {module}"));
                }
            }
            if let Some(caps) = BUILTIN_RE.captures(line) {
                let builtin = caps[1].to_string();
                debug_assert!(BLOCKED_BUILTINS.contains(&builtin.as_str()));
                return FilterResult::Reject(format!("blocked builtin: {builtin}"));
            }
        }
        FilterResult::Pass
    }
}

impl SecurityFilter for PythonSourceFilter {
    fn check(&self, file: &Path) -> io::Result<FilterResult> {
        let source = std::fs::read_to_string(file)?;
        let result = Self::scan(&source);
        if let FilterResult::Reject(reason) = &result {
            tracing::debug!(file = %file.display(), %reason, "security filter rejected file");
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_source_passes() {
        let source = "def add(a, b):\n    return a + b\n\nprint(add(1, 2))\n";
        assert!(PythonSourceFilter::scan(source).is_pass());
    }

    #[test]
    fn blocked_import_rejected_with_reason() {
        let result = PythonSourceFilter::scan("import subprocess\n");
        assert_eq!(
            result.reason(),
            Some("blocked import: subprocess")
        );
    }

    #[test]
    fn from_import_and_dotted_module() {
        assert_eq!(
            PythonSourceFilter::scan("from os.path import join\n").reason(),
            Some("blocked import: os")
        );
        assert_eq!(
            PythonSourceFilter::scan("import os.path\n").reason(),
            Some("blocked import: os")
        );
    }

    #[test]
    fn indented_import_still_caught() {
        let source = "def f():\n    import socket\n";
        assert_eq!(
            PythonSourceFilter::scan(source).reason(),
            Some("blocked import: socket")
        );
    }

    #[test]
    fn harmless_module_passes() {
        assert!(PythonSourceFilter::scan("import math\nimport json\n").is_pass());
    }

    #[test]
    fn blocked_builtin_rejected() {
        assert_eq!(
            PythonSourceFilter::scan("x = eval(\"1 + 1\")\n").reason(),
            Some("blocked builtin: eval")
        );
        assert_eq!(
            PythonSourceFilter::scan("open(\"/etc/passwd\")\n").reason(),
            Some("blocked builtin: open")
        );
    }

    #[test]
    fn identifier_suffix_is_not_a_builtin() {
        // reopen() is not open()
        assert!(PythonSourceFilter::scan("reopen(path)\n").is_pass());
    }

    #[test]
    fn comment_lines_are_ignored() {
        assert!(PythonSourceFilter::scan("# import os\n  # eval(x)\n").is_pass());
    }

    #[test]
    fn check_reads_resolved_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secret.py");
        std::fs::write(&path, "import os\n").unwrap();

        let filter = PythonSourceFilter::new();
        let result = filter.check(&path).unwrap();
        assert_eq!(result.reason(), Some("blocked import: os"));
    }

    #[test]
    fn check_missing_file_is_io_error() {
        let filter = PythonSourceFilter::new();
        assert!(filter.check(Path::new("/nonexistent/x.py")).is_err());
    }
}
