//! Outbound mail delivery
//!
//! The reminder job only needs "send this text to this address", so delivery
//! sits behind the [`Mailer`] trait. The production implementation posts to an
//! HTTP mail API (Mailgun-style JSON endpoint); tests swap in a recorder.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable naming the mail API endpoint
pub const MAIL_URL_ENV: &str = "MUSE_MAIL_URL";
/// Environment variable naming the sender address
pub const MAIL_SENDER_ENV: &str = "MUSE_MAIL_SENDER";
/// Optional bearer token for the mail API
pub const MAIL_TOKEN_ENV: &str = "MUSE_MAIL_TOKEN";

/// Capability to deliver a plain-text email
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

/// Mailer that posts JSON to a configured HTTP mail API
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    sender: String,
    token: Option<String>,
}

impl HttpMailer {
    pub fn new(endpoint: String, sender: String, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            sender,
            token,
        }
    }

    /// Build from environment variables
    ///
    /// Returns None when `MUSE_MAIL_URL` or `MUSE_MAIL_SENDER` is unset, which
    /// disables mail features without failing startup.
    pub fn from_env() -> Option<Self> {
        let endpoint = std::env::var(MAIL_URL_ENV).ok().filter(|s| !s.is_empty())?;
        let sender = std::env::var(MAIL_SENDER_ENV)
            .ok()
            .filter(|s| !s.is_empty())?;
        let token = std::env::var(MAIL_TOKEN_ENV).ok().filter(|s| !s.is_empty());
        Some(Self::new(endpoint, sender, token))
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .timeout(std::time::Duration::from_secs(10))
            .json(&json!({
                "from": self.sender,
                "to": to,
                "subject": subject,
                "text": body,
            }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Error::Mail(format!(
                "Mail API returned {} for {}",
                response.status(),
                to
            )));
        }

        debug!(to, subject, "Mail delivered");
        Ok(())
    }
}
