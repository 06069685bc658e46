//! Request paths for addressing files within projects
//!
//! Provides [`RequestPath`] for the `/workspaceName/projectName[/filePath...]`
//! form every execution request carries.

use std::fmt::{self, Display, Formatter};

/// Minimum number of segments a path must carry to name a project
pub const MIN_SEGMENTS: usize = 2;

/// Parsed request path
///
/// Segment structure:
/// - `segment[0]` — workspace name
/// - `segment[1]` — project name
/// - remaining segments — file path within the project (may be empty,
///   addressing the project root)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestPath(Vec<String>);

impl RequestPath {
    /// Parse a raw path, dropping empty segments
    ///
    /// Accepts any input; validation against the two-segment minimum
    /// happens at resolution time.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split('/')
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
                .collect(),
        )
    }

    /// Get path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Get number of segments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if path is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the path carries enough segments to name a project
    #[inline]
    #[must_use]
    pub fn names_project(&self) -> bool {
        self.0.len() >= MIN_SEGMENTS
    }

    /// Workspace name (first segment)
    #[inline]
    #[must_use]
    pub fn workspace(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Project name (second segment)
    #[inline]
    #[must_use]
    pub fn project(&self) -> Option<&str> {
        self.0.get(1).map(String::as_str)
    }

    /// Segments after workspace and project (empty for the project root)
    #[inline]
    #[must_use]
    pub fn remainder(&self) -> &[String] {
        if self.0.len() > MIN_SEGMENTS {
            &self.0[MIN_SEGMENTS..]
        } else {
            &[]
        }
    }
}

impl Display for RequestPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.0.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_path() {
        let path = RequestPath::parse("/ws1/proj1/src/main.py");
        assert_eq!(path.workspace(), Some("ws1"));
        assert_eq!(path.project(), Some("proj1"));
        assert_eq!(path.remainder(), ["src", "main.py"]);
        assert!(path.names_project());
    }

    #[test]
    fn parse_project_root() {
        let path = RequestPath::parse("/ws1/proj1");
        assert!(path.names_project());
        assert!(path.remainder().is_empty());
    }

    #[test]
    fn single_segment_does_not_name_project() {
        let path = RequestPath::parse("/ws1");
        assert!(!path.names_project());
        assert_eq!(path.project(), None);
    }

    #[test]
    fn empty_and_slash_only_paths() {
        assert!(RequestPath::parse("").is_empty());
        assert!(RequestPath::parse("///").is_empty());
    }

    #[test]
    fn repeated_separators_collapse() {
        let path = RequestPath::parse("//ws1///proj1//a.py");
        assert_eq!(path.segments(), ["ws1", "proj1", "a.py"]);
    }

    #[test]
    fn display_round_trip() {
        let path = RequestPath::parse("/ws1/proj1/a.py");
        assert_eq!(path.to_string(), "/ws1/proj1/a.py");
    }
}
