use log::*;
use std::future::Future;

use crate::{
    Result,
    cli::{EmailArgs, WebhookArgs},
    command::{announce, email},
    config::Config,
    event::ReleaseEvent,
};

/// Execute the announcement and email steps concurrently. A failure in one
/// step does not stop the other; the first failure is returned once both
/// have finished.
pub async fn execute(
    event: &ReleaseEvent,
    config: &Config,
    webhook_args: &WebhookArgs,
    email_args: &EmailArgs,
    dry_run: bool,
) -> Result<()> {
    run_steps(
        announce::execute(event, config, webhook_args, dry_run),
        email::execute(event, config, email_args, dry_run),
    )
    .await
}

/// Drive both steps to completion before reporting either failure.
pub async fn run_steps(
    announce_step: impl Future<Output = Result<()>>,
    email_step: impl Future<Output = Result<email::EmailOutcome>>,
) -> Result<()> {
    let (announced, emailed) = tokio::join!(announce_step, email_step);

    if let Err(err) = announced.as_ref() {
        error!("announcement failed: {err}");
    }

    match emailed.as_ref() {
        Ok(outcome) => debug!("email step finished: {outcome:?}"),
        Err(err) => error!("release notes email failed: {err}"),
    }

    announced?;
    emailed?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::NotifyError, notifier::traits::MockChatWebhook,
        test_helpers::create_test_event,
    };
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test_log::test(tokio::test)]
    async fn dry_run_prerelease_completes_without_secrets() {
        let config = Config::default();
        let event = create_test_event("v0.151.0-pre", "notes", true);

        execute(
            &event,
            &config,
            &WebhookArgs::default(),
            &EmailArgs::default(),
            true,
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn email_repository_error_fails_run() {
        let config = Config::default();
        let event = create_test_event("v0.150.0", "notes", false);
        let temp_dir = tempfile::TempDir::new().unwrap();
        let email_args = EmailArgs {
            api_token: Some("token".into()),
            repo: temp_dir.path().to_path_buf(),
        };

        let result = execute(
            &event,
            &config,
            &WebhookArgs::default(),
            &email_args,
            true,
        )
        .await;

        assert!(matches!(result, Err(NotifyError::GitError(_))));
    }

    #[tokio::test]
    async fn announcement_still_posts_when_email_step_fails() {
        let config = Config::default();
        let event = create_test_event("v0.150.0", "notes", false);

        let mut webhook = MockChatWebhook::new();
        webhook
            .expect_post_message()
            .times(1)
            .returning(|_, _| Ok(()));

        let result = run_steps(
            announce::post_announcement(&event, &config, &webhook),
            async {
                Err::<email::EmailOutcome, _>(NotifyError::RateLimitExceeded)
            },
        )
        .await;

        assert!(matches!(result, Err(NotifyError::RateLimitExceeded)));
        webhook.checkpoint();
    }

    #[tokio::test]
    async fn email_step_still_runs_when_announcement_fails() {
        let mut webhook = MockChatWebhook::new();
        webhook.expect_post_message().times(1).returning(|_, _| {
            Err(NotifyError::NetworkError("connection refused".into()))
        });
        let config = Config::default();
        let event = create_test_event("v0.150.0", "notes", false);

        let email_ran = AtomicBool::new(false);

        let result = run_steps(
            announce::post_announcement(&event, &config, &webhook),
            async {
                email_ran.store(true, Ordering::SeqCst);
                Ok::<_, NotifyError>(email::EmailOutcome::Sent)
            },
        )
        .await;

        assert!(matches!(result, Err(NotifyError::NetworkError(_))));
        assert!(email_ran.load(Ordering::SeqCst));
    }
}
