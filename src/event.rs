//! Release-published event handling.
//!
//! A release event can be assembled from CLI flags or read from the JSON
//! payload file the CI runner exposes for the triggering event.
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

use crate::{Result, error::NotifyError};

/// Env var CI runners use to point at the triggering event payload.
pub const EVENT_PATH_ENV_VAR: &str = "GITHUB_EVENT_PATH";

/// Release channel a published release belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Preview,
    Stable,
}

impl Channel {
    pub fn from_prerelease(prerelease: bool) -> Self {
        if prerelease {
            Channel::Preview
        } else {
            Channel::Stable
        }
    }
}

/// The metadata of a published release.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseEvent {
    /// Tag the release was published for (e.g. "v0.150.0").
    pub tag_name: String,
    /// Free-text release notes.
    pub body: String,
    /// Whether the release is flagged as not-yet-stable.
    pub prerelease: bool,
    /// Login of the account that owns the repository, when known.
    pub repository_owner: Option<String>,
}

impl ReleaseEvent {
    pub fn channel(&self) -> Channel {
        Channel::from_prerelease(self.prerelease)
    }

    /// Parse a release-published payload.
    pub fn from_payload(content: &str) -> Result<Self> {
        let payload: EventPayload = serde_json::from_str(content)?;

        let release = payload.release.ok_or_else(|| {
            NotifyError::invalid_event("payload does not contain a release")
        })?;

        if release.tag_name.is_empty() {
            return Err(NotifyError::invalid_event("release tag_name is empty"));
        }

        Ok(Self {
            tag_name: release.tag_name,
            body: release.body.unwrap_or_default(),
            prerelease: release.prerelease,
            repository_owner: payload
                .repository
                .and_then(|r| r.owner)
                .map(|o| o.login),
        })
    }

    /// Read and parse a release-published payload file.
    pub async fn from_payload_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(NotifyError::invalid_event(format!(
                "event file does not exist: {}",
                path.display()
            )));
        }

        log::debug!("reading release event from: {}", path.display());
        let content = fs::read_to_string(path).await?;
        Self::from_payload(&content)
    }
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    release: Option<ReleasePayload>,
    repository: Option<RepositoryPayload>,
}

#[derive(Debug, Deserialize)]
struct ReleasePayload {
    tag_name: String,
    // the API sends null for releases published without notes
    body: Option<String>,
    #[serde(default)]
    prerelease: bool,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    owner: Option<OwnerPayload>,
}

#[derive(Debug, Deserialize)]
struct OwnerPayload {
    login: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const PAYLOAD: &str = r#"{
        "action": "published",
        "release": {
            "tag_name": "v0.150.0",
            "name": "v0.150.0",
            "body": "- Fixed a crash",
            "prerelease": false,
            "draft": false
        },
        "repository": {
            "full_name": "zed-industries/zed",
            "owner": { "login": "zed-industries", "id": 1 }
        }
    }"#;

    #[test]
    fn parses_release_published_payload() {
        let event = ReleaseEvent::from_payload(PAYLOAD).unwrap();

        assert_eq!(event.tag_name, "v0.150.0");
        assert_eq!(event.body, "- Fixed a crash");
        assert!(!event.prerelease);
        assert_eq!(event.repository_owner.as_deref(), Some("zed-industries"));
        assert_eq!(event.channel(), Channel::Stable);
    }

    #[test]
    fn null_body_becomes_empty_notes() {
        let event = ReleaseEvent::from_payload(
            r#"{"release":{"tag_name":"v1.0.0-pre","body":null,"prerelease":true}}"#,
        )
        .unwrap();

        assert_eq!(event.body, "");
        assert_eq!(event.channel(), Channel::Preview);
        assert!(event.repository_owner.is_none());
    }

    #[test]
    fn rejects_payload_without_release() {
        let err = ReleaseEvent::from_payload(r#"{"action":"created"}"#)
            .unwrap_err();
        assert!(matches!(err, NotifyError::InvalidEvent(_)));
    }

    #[test]
    fn rejects_empty_tag_name() {
        let err = ReleaseEvent::from_payload(
            r#"{"release":{"tag_name":"","body":"notes"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, NotifyError::InvalidEvent(_)));
    }

    #[tokio::test]
    async fn reads_payload_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(PAYLOAD.as_bytes()).unwrap();

        let event = ReleaseEvent::from_payload_file(file.path()).await.unwrap();
        assert_eq!(event.tag_name, "v0.150.0");
    }

    #[tokio::test]
    async fn missing_payload_file_is_an_error() {
        let result = ReleaseEvent::from_payload_file(Path::new(
            "/definitely/not/here/event.json",
        ))
        .await;
        assert!(matches!(result, Err(NotifyError::InvalidEvent(_))));
    }
}
