//! Remote transfer of rule file contents.
//!
//! [`RuleSource`] is the seam between the sync loop and the network. The
//! binary uses [`HttpRuleSource`]; tests drive the loop with in-memory
//! sources instead.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::error::{Error, Result};
use crate::sync::FailureReason;

/// Supplies the full contents of a rule file by identifier
#[async_trait]
pub trait RuleSource: Send + Sync {
    /// Fetches the complete body for `identifier`.
    ///
    /// Implementations must not return partial content: either the whole
    /// resource or a [`FailureReason`].
    async fn fetch(&self, identifier: &str) -> std::result::Result<Vec<u8>, FailureReason>;

    /// Human-readable location of the given rule, used in logs
    fn location(&self, identifier: &str) -> String;
}

/// Fetches rules over HTTP(S) from `<base_url>/<identifier>`
#[derive(Debug, Clone)]
pub struct HttpRuleSource {
    client: Client,
    base_url: Url,
}

impl HttpRuleSource {
    /// Creates a source rooted at `base_url` with a per-request `timeout`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBaseUrl`] if `base_url` is not a hierarchical
    /// URL, or [`Error::HttpClient`] if the TLS backend cannot be initialized.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let raw = base_url.into();
        let invalid = |reason: String| Error::InvalidBaseUrl {
            url: raw.clone(),
            reason,
        };
        let base_url = Url::parse(&raw).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("URL cannot have path segments".to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// `<base_url>/<identifier>` with every path segment percent-encoded
    pub fn rule_url(&self, identifier: &str) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base always accepts path segments
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(identifier.split('/'));
        }
        url
    }
}

#[async_trait]
impl RuleSource for HttpRuleSource {
    async fn fetch(&self, identifier: &str) -> std::result::Result<Vec<u8>, FailureReason> {
        let url = self.rule_url(identifier);
        debug!(%url, "Fetching rule");

        let response = self.client.get(url.clone()).send().await.map_err(transfer_failure)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FailureReason::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(transfer_failure)?;
        debug!(%url, bytes = body.len(), "Fetched rule");
        Ok(body.to_vec())
    }

    fn location(&self, identifier: &str) -> String {
        self.rule_url(identifier).to_string()
    }
}

fn transfer_failure(err: reqwest::Error) -> FailureReason {
    if err.is_timeout() {
        FailureReason::Timeout
    } else {
        FailureReason::Transport(err.to_string())
    }
}
