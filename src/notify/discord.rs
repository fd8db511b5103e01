use super::{format_message, NewCodeBatch, NotifyError, Notifier};
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Posts to a Discord-style webhook. Single attempt; failures go to the caller.
#[derive(Clone)]
pub struct DiscordNotifier {
    webhook: Option<String>,
    ping_role: Option<String>,
    client: Client,
    timeout: Duration,
}

impl DiscordNotifier {
    pub fn new(webhook: Option<String>) -> Self {
        Self {
            webhook,
            ping_role: None,
            client: Client::new(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_ping_role(mut self, role: Option<String>) -> Self {
        self.ping_role = role;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

#[async_trait::async_trait]
impl Notifier for DiscordNotifier {
    async fn send(&self, batch: &NewCodeBatch) -> Result<(), NotifyError> {
        let url = match self.webhook.as_deref().map(str::trim) {
            Some(u) if !u.is_empty() => u,
            _ => return Err(NotifyError::MissingWebhook),
        };

        let content = format_message(batch, self.ping_role.as_deref(), Utc::now());
        let payload = WebhookPayload { content };

        let rsp = self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await?;

        let status = rsp.status();
        // drain the body so transport errors surface here
        let _ = rsp.bytes().await?;
        if !status.is_success() {
            return Err(NotifyError::Status { status });
        }

        tracing::debug!(codes = batch.codes.len(), "webhook accepted message");
        Ok(())
    }
}

#[derive(Serialize)]
struct WebhookPayload {
    content: String,
}
