//! Implements the ChatWebhook trait for Discord webhooks
use async_trait::async_trait;
use log::*;
use reqwest::{Client, Request};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    Result,
    config::validate_http_url,
    event::Channel,
    notifier::{request::WebhookMessage, traits::ChatWebhook},
};

/// Posts announcements to Discord webhooks. Preview announcements go to the
/// preview webhook when one is configured and to the stable webhook
/// otherwise.
pub struct DiscordWebhook {
    client: Client,
    stable_url: SecretString,
    preview_url: Option<SecretString>,
}

impl DiscordWebhook {
    pub fn new(
        stable_url: SecretString,
        preview_url: Option<SecretString>,
    ) -> Result<Self> {
        validate_http_url("webhook url", stable_url.expose_secret())?;

        if let Some(url) = preview_url.as_ref() {
            validate_http_url("preview webhook url", url.expose_secret())?;
        }

        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            stable_url,
            preview_url,
        })
    }

    fn webhook_url(&self, channel: Channel) -> &SecretString {
        match (channel, self.preview_url.as_ref()) {
            (Channel::Preview, Some(url)) => url,
            _ => &self.stable_url,
        }
    }

    fn build_request(
        &self,
        channel: Channel,
        message: &WebhookMessage,
    ) -> Result<Request> {
        let url =
            reqwest::Url::parse(self.webhook_url(channel).expose_secret())?;
        let request = self.client.post(url).json(message).build()?;
        Ok(request)
    }
}

#[async_trait]
impl ChatWebhook for DiscordWebhook {
    async fn post_message(
        &self,
        channel: Channel,
        message: WebhookMessage,
    ) -> Result<()> {
        let request = self.build_request(channel, &message)?;

        debug!(
            "posting {} character announcement to {:?} webhook",
            message.content.chars().count(),
            channel
        );

        self.client.execute(request).await?.error_for_status()?;

        info!("announcement posted to {:?} webhook", channel);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotifyError;

    const STABLE: &str = "https://discord.com/api/webhooks/1/stable-token";
    const PREVIEW: &str = "https://discord.com/api/webhooks/2/preview-token";

    fn body_json(request: &Request) -> serde_json::Value {
        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
        serde_json::from_slice(bytes).unwrap()
    }

    #[test]
    fn routes_preview_to_preview_webhook_when_configured() {
        let webhook = DiscordWebhook::new(
            SecretString::from(STABLE.to_string()),
            Some(SecretString::from(PREVIEW.to_string())),
        )
        .unwrap();

        let message = WebhookMessage {
            content: "hello".into(),
        };

        let preview =
            webhook.build_request(Channel::Preview, &message).unwrap();
        assert_eq!(preview.url().as_str(), PREVIEW);

        let stable = webhook.build_request(Channel::Stable, &message).unwrap();
        assert_eq!(stable.url().as_str(), STABLE);
    }

    #[test]
    fn falls_back_to_stable_webhook_for_preview() {
        let webhook =
            DiscordWebhook::new(SecretString::from(STABLE.to_string()), None)
                .unwrap();

        let request = webhook
            .build_request(
                Channel::Preview,
                &WebhookMessage {
                    content: "hello".into(),
                },
            )
            .unwrap();

        assert_eq!(request.url().as_str(), STABLE);
    }

    #[test]
    fn sends_content_as_json_post() {
        let webhook =
            DiscordWebhook::new(SecretString::from(STABLE.to_string()), None)
                .unwrap();

        let request = webhook
            .build_request(
                Channel::Stable,
                &WebhookMessage {
                    content: "📣 Zed [v1.0.0] was just released!".into(),
                },
            )
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(
            request.headers()["content-type"].to_str().unwrap(),
            "application/json"
        );
        assert_eq!(
            body_json(&request),
            serde_json::json!({"content": "📣 Zed [v1.0.0] was just released!"})
        );
    }

    #[test]
    fn rejects_invalid_webhook_url() {
        let result = DiscordWebhook::new(
            SecretString::from("not a url".to_string()),
            None,
        );
        assert!(matches!(result, Err(NotifyError::UrlError(_))));

        let result = DiscordWebhook::new(
            SecretString::from(STABLE.to_string()),
            Some(SecretString::from("file:///tmp/hook".to_string())),
        );
        assert!(matches!(result, Err(NotifyError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn failed_post_does_not_leak_webhook_token() {
        let webhook = DiscordWebhook::new(
            SecretString::from(
                "http://127.0.0.1:1/api/webhooks/1/SUPERSECRET".to_string(),
            ),
            None,
        )
        .unwrap();

        let err = webhook
            .post_message(
                Channel::Stable,
                WebhookMessage {
                    content: "hello".into(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, NotifyError::NetworkError(_)));
        assert!(!err.to_string().contains("SUPERSECRET"));
        assert!(!format!("{err:?}").contains("SUPERSECRET"));
    }
}
