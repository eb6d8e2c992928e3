//! Traits related to notification clients
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::{
    Result,
    event::Channel,
    notifier::request::{ReleaseNotesEmail, WebhookMessage},
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChatWebhook: Send + Sync {
    /// Post a message to the webhook serving `channel`.
    async fn post_message(
        &self,
        channel: Channel,
        message: WebhookMessage,
    ) -> Result<()>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReleaseNotesMailer: Send + Sync {
    /// Ask the release notes API to email the given notes.
    async fn send_release_notes(&self, email: ReleaseNotesEmail) -> Result<()>;
}
