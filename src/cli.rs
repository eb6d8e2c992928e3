//! CLI argument parsing and secret resolution.
use clap::{Args as ClapArgs, Parser, Subcommand};
use secrecy::SecretString;
use std::{env, path::PathBuf};

use crate::{
    Result,
    error::NotifyError,
    event::{EVENT_PATH_ENV_VAR, ReleaseEvent},
};

pub const WEBHOOK_URL_ENV_VAR: &str = "DISCORD_WEBHOOK_URL";
pub const PREVIEW_WEBHOOK_URL_ENV_VAR: &str = "DISCORD_PREVIEW_WEBHOOK_URL";
pub const API_TOKEN_ENV_VAR: &str = "RELEASE_NOTES_API_TOKEN";

/// Global CLI arguments describing the published release.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, global = true)]
    /// Released tag name. When omitted the release is read from the CI
    /// event payload.
    pub tag: Option<String>,

    #[arg(long, global = true, requires = "tag", conflicts_with = "body_file")]
    /// Release notes text.
    pub body: Option<String>,

    #[arg(long, global = true, requires = "tag")]
    /// File containing the release notes text.
    pub body_file: Option<PathBuf>,

    #[arg(long, default_value_t = false, global = true, requires = "tag")]
    /// Mark the release as a prerelease.
    pub prerelease: bool,

    #[arg(long, global = true, conflicts_with = "tag")]
    /// Path to the release event JSON payload. Falls back to
    /// GITHUB_EVENT_PATH env var.
    pub event_path: Option<PathBuf>,

    #[arg(long, global = true)]
    /// Path to a release-notify.toml configuration file.
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = false, global = true)]
    /// Log the requests that would be sent without sending them.
    pub dry_run: bool,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Release notification subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Post the release announcement to the chat webhook.
    Announce(WebhookArgs),

    /// Email the release notes when a stable release was promoted from a
    /// preview.
    Email(EmailArgs),

    /// Run both the announcement and the email step.
    Run {
        #[command(flatten)]
        webhook: WebhookArgs,

        #[command(flatten)]
        email: EmailArgs,
    },
}

/// Chat webhook secrets.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct WebhookArgs {
    #[arg(long)]
    /// Webhook URL for announcements. Falls back to DISCORD_WEBHOOK_URL env
    /// var.
    pub webhook_url: Option<String>,

    #[arg(long)]
    /// Webhook URL for preview announcements. Falls back to
    /// DISCORD_PREVIEW_WEBHOOK_URL env var, then to the webhook URL.
    pub preview_webhook_url: Option<String>,
}

/// Release notes email secrets and repository location.
#[derive(ClapArgs, Debug, Clone)]
pub struct EmailArgs {
    #[arg(long)]
    /// Bearer token for the release notes API. Falls back to
    /// RELEASE_NOTES_API_TOKEN env var.
    pub api_token: Option<String>,

    #[arg(long, default_value = ".")]
    /// Repository used to look up preview tags.
    pub repo: PathBuf,
}

impl Default for EmailArgs {
    fn default() -> Self {
        Self {
            api_token: None,
            repo: PathBuf::from("."),
        }
    }
}

impl WebhookArgs {
    pub fn webhook_url(&self) -> Result<SecretString> {
        resolve_secret(self.webhook_url.as_deref(), WEBHOOK_URL_ENV_VAR)
            .ok_or_else(|| {
                NotifyError::missing_secret("webhook-url", WEBHOOK_URL_ENV_VAR)
            })
    }

    pub fn preview_webhook_url(&self) -> Option<SecretString> {
        resolve_secret(
            self.preview_webhook_url.as_deref(),
            PREVIEW_WEBHOOK_URL_ENV_VAR,
        )
    }
}

impl EmailArgs {
    pub fn api_token(&self) -> Result<SecretString> {
        resolve_secret(self.api_token.as_deref(), API_TOKEN_ENV_VAR).ok_or_else(
            || NotifyError::missing_secret("api-token", API_TOKEN_ENV_VAR),
        )
    }
}

impl Args {
    /// Assemble the release event from flags, or read it from the event
    /// payload file.
    pub async fn release_event(&self) -> Result<ReleaseEvent> {
        if let Some(tag) = self.tag.as_ref() {
            if tag.is_empty() {
                return Err(NotifyError::InvalidArgs(
                    "--tag must not be empty".into(),
                ));
            }

            let body = match (self.body.as_ref(), self.body_file.as_ref()) {
                (Some(body), _) => body.clone(),
                (None, Some(path)) => tokio::fs::read_to_string(path).await?,
                (None, None) => String::new(),
            };

            return Ok(ReleaseEvent {
                tag_name: tag.clone(),
                body,
                prerelease: self.prerelease,
                repository_owner: None,
            });
        }

        let path = match self.event_path.clone() {
            Some(path) => path,
            None => env::var(EVENT_PATH_ENV_VAR).map(PathBuf::from).map_err(
                |_| {
                    NotifyError::InvalidArgs(format!(
                        "must pass --tag or --event-path, or set {EVENT_PATH_ENV_VAR}"
                    ))
                },
            )?,
        };

        ReleaseEvent::from_payload_file(&path).await
    }
}

/// Use the flag value when given, otherwise the named env var. Empty values
/// count as unset.
fn resolve_secret(value: Option<&str>, env_var: &str) -> Option<SecretString> {
    let mut secret = value.unwrap_or_default().to_string();

    if secret.is_empty()
        && let Ok(env_value) = env::var(env_var)
    {
        secret = env_value;
    }

    if secret.is_empty() {
        return None;
    }

    Some(SecretString::from(secret))
}
