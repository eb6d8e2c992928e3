//! Common test helper functions shared across test modules.
use crate::{event::ReleaseEvent, repo::MockTagLookup};

/// Creates a test ReleaseEvent without a repository owner.
pub fn create_test_event(
    tag_name: &str,
    body: &str,
    prerelease: bool,
) -> ReleaseEvent {
    ReleaseEvent {
        tag_name: tag_name.to_string(),
        body: body.to_string(),
        prerelease,
        repository_owner: None,
    }
}

/// Creates a MockTagLookup that reports exactly the given tags as existing.
///
/// # Example
/// ```ignore
/// let tags = tags_with(&["v0.150.0-pre"]);
/// assert!(tags.tag_exists("v0.150.0-pre").unwrap());
/// ```
pub fn tags_with(existing: &[&str]) -> MockTagLookup {
    let existing: Vec<String> =
        existing.iter().map(|tag| tag.to_string()).collect();

    let mut tags = MockTagLookup::new();
    tags.expect_tag_exists()
        .returning(move |name| Ok(existing.iter().any(|tag| tag == name)));
    tags
}
