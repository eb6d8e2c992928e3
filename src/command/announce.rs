use log::*;

use crate::{
    Result,
    announcement::format_announcement,
    cli::WebhookArgs,
    config::Config,
    event::{Channel, ReleaseEvent},
    notifier::{
        discord::DiscordWebhook, request::WebhookMessage, traits::ChatWebhook,
    },
};

/// Format the announcement for `event` and post it to the webhook of the
/// release's channel.
pub async fn post_announcement(
    event: &ReleaseEvent,
    config: &Config,
    webhook: &dyn ChatWebhook,
) -> Result<()> {
    let content = format_announcement(config, event);

    webhook
        .post_message(event.channel(), WebhookMessage { content })
        .await
}

/// Webhook a post for `channel` is delivered to: preview announcements only
/// reach a preview webhook when one is configured.
pub fn destination(webhook_args: &WebhookArgs, channel: Channel) -> Channel {
    match channel {
        Channel::Preview if webhook_args.preview_webhook_url().is_some() => {
            Channel::Preview
        }
        _ => Channel::Stable,
    }
}

/// Execute announce command using secrets from `webhook_args`.
pub async fn execute(
    event: &ReleaseEvent,
    config: &Config,
    webhook_args: &WebhookArgs,
    dry_run: bool,
) -> Result<()> {
    if dry_run {
        let content = format_announcement(config, event);
        warn!(
            "dry_run: would post announcement to {:?} webhook:\n{content}",
            destination(webhook_args, event.channel())
        );
        return Ok(());
    }

    let webhook = DiscordWebhook::new(
        webhook_args.webhook_url()?,
        webhook_args.preview_webhook_url(),
    )?;

    post_announcement(event, config, &webhook).await
}
