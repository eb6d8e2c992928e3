//! Implements the ReleaseNotesMailer trait for the release notes email API
use async_trait::async_trait;
use log::*;
use reqwest::{
    Client, Request, Url,
    header::{AUTHORIZATION, HeaderValue},
};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    Result,
    notifier::{request::ReleaseNotesEmail, traits::ReleaseNotesMailer},
};

/// Client for the bearer-token authenticated release notes email endpoint.
pub struct ReleaseNotesApi {
    client: Client,
    endpoint: Url,
    authorization: HeaderValue,
}

impl ReleaseNotesApi {
    pub fn new(endpoint: Url, token: SecretString) -> Result<Self> {
        let mut authorization =
            HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))?;
        authorization.set_sensitive(true);

        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            endpoint,
            authorization,
        })
    }

    fn build_request(&self, email: &ReleaseNotesEmail) -> Result<Request> {
        let request = self
            .client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, self.authorization.clone())
            .json(email)
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl ReleaseNotesMailer for ReleaseNotesApi {
    async fn send_release_notes(&self, email: ReleaseNotesEmail) -> Result<()> {
        let request = self.build_request(&email)?;

        debug!(
            "sending release notes email request for {} to {}",
            email.version, self.endpoint
        );

        self.client.execute(request).await?.error_for_status()?;

        info!("release notes email requested for {}", email.version);

        Ok(())
    }
}
