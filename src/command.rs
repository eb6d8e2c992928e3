//! Subcommand implementations.

/// Post the release announcement.
pub mod announce;

/// Email release notes for promoted preview releases.
pub mod email;

/// Run the announcement and email steps together.
pub mod run;

use crate::{Result, cli::Args, cli::Command, config::Config};

/// Resolve the release event and configuration, then run the requested
/// subcommand.
pub async fn execute(args: &Args) -> Result<()> {
    let config = Config::load(args.config.as_deref()).await?;
    let event = args.release_event().await?;

    log::info!(
        "processing release {} (prerelease: {})",
        event.tag_name,
        event.prerelease
    );

    match &args.command {
        Command::Announce(webhook) => {
            announce::execute(&event, &config, webhook, args.dry_run).await
        }
        Command::Email(email) => {
            email::execute(&event, &config, email, args.dry_run)
                .await
                .map(|_| ())
        }
        Command::Run { webhook, email } => {
            run::execute(&event, &config, webhook, email, args.dry_run).await
        }
    }
}
