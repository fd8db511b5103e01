// src/ingest/http.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::ingest::types::{PageFetcher, Source};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (gift-code-announcer)";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Plain GET fetcher. One attempt per call, no retries.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
    timeout: Duration,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, source: &Source) -> Result<String> {
        let resp = self
            .client
            .get(&source.url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .timeout(self.timeout)
            .send()
            .await
            .with_context(|| format!("GET {}", source.url))?
            .error_for_status()
            .with_context(|| format!("{} returned an error status", source.name))?;

        let bytes = resp
            .bytes()
            .await
            .with_context(|| format!("reading body of {}", source.url))?;

        // Pages are not always clean UTF-8; bad sequences become U+FFFD.
        let text = String::from_utf8_lossy(&bytes).into_owned();
        tracing::debug!(source = %source.name, bytes = bytes.len(), "fetched page");
        Ok(text)
    }
}
