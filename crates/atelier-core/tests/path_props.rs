use atelier_core::path::{RequestPath, MIN_SEGMENTS};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_segments_never_empty(raw in "[a-z0-9./_-]{0,64}") {
        let path = RequestPath::parse(&raw);
        for segment in path.segments() {
            prop_assert!(!segment.is_empty());
            prop_assert!(!segment.contains('/'));
        }
    }

    #[test]
    fn prop_names_project_iff_two_segments(raw in "(/[a-z0-9_-]{1,8}){0,5}") {
        let path = RequestPath::parse(&raw);
        prop_assert_eq!(path.names_project(), path.len() >= MIN_SEGMENTS);
        if path.names_project() {
            prop_assert!(path.workspace().is_some());
            prop_assert!(path.project().is_some());
            prop_assert_eq!(path.remainder().len(), path.len() - MIN_SEGMENTS);
        } else {
            prop_assert!(path.remainder().is_empty());
        }
    }

    #[test]
    fn prop_display_reparses_identically(raw in "(/[a-z0-9_.-]{1,8}){1,5}") {
        let path = RequestPath::parse(&raw);
        let round = RequestPath::parse(&path.to_string());
        prop_assert_eq!(path, round);
    }
}
