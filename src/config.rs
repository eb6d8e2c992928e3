//! Configuration loading and parsing for `release-notify.toml` files.
//!
//! Every field has a default so the tool runs without a config file. Secrets
//! are never read from this file; they come from CLI flags or env vars.
use serde::Deserialize;
use std::path::Path;
use tokio::fs;
use url::Url;

use crate::{Result, error::NotifyError};

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "release-notify.toml";
/// Default product name used in the announcement sentence.
pub const DEFAULT_PRODUCT_NAME: &str = "Zed";
/// Chat webhooks reject messages longer than this.
pub const DEFAULT_MAX_LENGTH: usize = 2000;
pub const DEFAULT_TRUNCATION_MARKER: &str = "...";
pub const DEFAULT_PREVIEW_RELEASE_LINK: &str =
    "https://zed.dev/releases/preview/latest";
pub const DEFAULT_STABLE_RELEASE_LINK: &str =
    "https://zed.dev/releases/stable/latest";
pub const DEFAULT_EMAIL_ENDPOINT: &str =
    "https://zed.dev/api/send_release_notes_email";
/// Suffix appended to a stable tag to find the preview it was promoted from.
pub const DEFAULT_PREVIEW_TAG_SUFFIX: &str = "-pre";

/// Announcement formatting settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnnouncementConfig {
    /// Maximum announcement length in characters.
    pub max_length: usize,
    /// Appended when the announcement is truncated.
    pub truncation_marker: String,
    /// Release page linked from preview announcements.
    pub preview_release_link: String,
    /// Release page linked from stable announcements.
    pub stable_release_link: String,
}

impl Default for AnnouncementConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            truncation_marker: DEFAULT_TRUNCATION_MARKER.into(),
            preview_release_link: DEFAULT_PREVIEW_RELEASE_LINK.into(),
            stable_release_link: DEFAULT_STABLE_RELEASE_LINK.into(),
        }
    }
}

/// Release notes email settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Release notes email API endpoint.
    pub endpoint: String,
    /// Suffix identifying the preview tag of a version.
    pub preview_tag_suffix: String,
    /// Only send emails for releases of repositories owned by this account.
    pub required_owner: Option<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_EMAIL_ENDPOINT.into(),
            preview_tag_suffix: DEFAULT_PREVIEW_TAG_SUFFIX.into(),
            required_owner: None,
        }
    }
}

/// Root configuration structure for `release-notify.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Product name used in announcements.
    pub product_name: String,
    pub announcement: AnnouncementConfig,
    pub email: EmailConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            product_name: DEFAULT_PRODUCT_NAME.into(),
            announcement: AnnouncementConfig::default(),
            email: EmailConfig::default(),
        }
    }
}

impl Config {
    /// Parse and validate configuration from TOML content.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit path, or from
    /// [`DEFAULT_CONFIG_FILE`] in the working directory when present.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) if !p.exists() => {
                return Err(NotifyError::invalid_config(format!(
                    "config file does not exist: {}",
                    p.display()
                )));
            }
            Some(p) => p,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if !default_path.exists() {
                    log::debug!("configuration not found: using default");
                    return Ok(Config::default());
                }
                default_path
            }
        };

        log::debug!("loading configuration from: {}", path.display());
        let content = fs::read_to_string(path).await?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> Result<()> {
        let marker_len = self.announcement.truncation_marker.chars().count();

        if self.announcement.max_length <= marker_len {
            return Err(NotifyError::invalid_config(format!(
                "announcement.max_length ({}) must be greater than the truncation marker length ({marker_len})",
                self.announcement.max_length
            )));
        }

        validate_http_url(
            "announcement.preview_release_link",
            &self.announcement.preview_release_link,
        )?;
        validate_http_url(
            "announcement.stable_release_link",
            &self.announcement.stable_release_link,
        )?;
        validate_http_url("email.endpoint", &self.email.endpoint)?;

        if self.email.preview_tag_suffix.is_empty() {
            return Err(NotifyError::invalid_config(
                "email.preview_tag_suffix must not be empty",
            ));
        }

        Ok(())
    }
}

/// Validate a URL uses HTTP or HTTPS scheme.
pub fn validate_http_url(name: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value)?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(NotifyError::invalid_config(format!(
            "{name}: only http and https schemes are supported, got {other}"
        ))),
    }
}
