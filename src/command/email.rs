//! Release notes email step.
//!
//! A stable release is emailed only when it was promoted from a preview,
//! which is detected by the presence of the preview tag for the same
//! version in the local repository.
use log::*;
use url::Url;

use crate::{
    Result,
    cli::EmailArgs,
    config::{Config, EmailConfig},
    event::ReleaseEvent,
    notifier::{
        release_notes::ReleaseNotesApi, request::ReleaseNotesEmail,
        traits::ReleaseNotesMailer,
    },
    repo::{LocalRepository, TagLookup},
};

/// Why the email step did not run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Prerelease,
    RepositoryOwner(String),
}

/// Result of the email step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailOutcome {
    Skipped(SkipReason),
    /// No preview tag exists for the released version.
    NotPromoted,
    DryRun,
    Sent,
}

/// Name of the preview tag `tag_name` would have been promoted from.
pub fn preview_tag_name(tag_name: &str, suffix: &str) -> String {
    format!("{tag_name}{suffix}")
}

/// Guards evaluated before the repository is consulted.
pub fn skip_reason(
    event: &ReleaseEvent,
    config: &EmailConfig,
) -> Option<SkipReason> {
    if event.prerelease {
        return Some(SkipReason::Prerelease);
    }

    if let (Some(required), Some(owner)) = (
        config.required_owner.as_ref(),
        event.repository_owner.as_ref(),
    ) && required != owner
    {
        return Some(SkipReason::RepositoryOwner(owner.clone()));
    }

    None
}

/// Check guards, look up the preview tag and, when present, dispatch the
/// release notes email. The repository and mailer are only created when the
/// step reaches the point of needing them.
pub async fn send_release_notes<T, M>(
    event: &ReleaseEvent,
    config: &Config,
    open_repo: impl FnOnce() -> Result<T>,
    create_mailer: impl FnOnce() -> Result<M>,
    dry_run: bool,
) -> Result<EmailOutcome>
where
    T: TagLookup,
    M: ReleaseNotesMailer,
{
    if let Some(reason) = skip_reason(event, &config.email) {
        info!(
            "skipping release notes email for {}: {reason:?}",
            event.tag_name
        );
        return Ok(EmailOutcome::Skipped(reason));
    }

    let preview_tag =
        preview_tag_name(&event.tag_name, &config.email.preview_tag_suffix);

    let repo = open_repo()?;

    if !repo.tag_exists(&preview_tag)? {
        info!(
            "{} was not promoted from a preview: tag {preview_tag} not found",
            event.tag_name
        );
        return Ok(EmailOutcome::NotPromoted);
    }

    info!("{} was promoted from {preview_tag}", event.tag_name);

    let email = ReleaseNotesEmail {
        version: event.tag_name.clone(),
        markdown_body: event.body.clone(),
    };

    if dry_run {
        warn!(
            "dry_run: would send release notes email: {}",
            serde_json::to_string(&email)?
        );
        return Ok(EmailOutcome::DryRun);
    }

    let mailer = create_mailer()?;
    mailer.send_release_notes(email).await?;

    Ok(EmailOutcome::Sent)
}

/// Execute email command against the repository and API token given in
/// `email_args`.
pub async fn execute(
    event: &ReleaseEvent,
    config: &Config,
    email_args: &EmailArgs,
    dry_run: bool,
) -> Result<EmailOutcome> {
    send_release_notes(
        event,
        config,
        || LocalRepository::open(&email_args.repo),
        || {
            let endpoint = Url::parse(&config.email.endpoint)?;
            ReleaseNotesApi::new(endpoint, email_args.api_token()?)
        },
        dry_run,
    )
    .await
}
