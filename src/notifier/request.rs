use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Message body accepted by chat webhooks.
pub struct WebhookMessage {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Request to email the notes of a stable release.
pub struct ReleaseNotesEmail {
    /// Released tag name.
    pub version: String,
    /// Release notes in markdown, sent verbatim.
    pub markdown_body: String,
}
