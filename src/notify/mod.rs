pub mod discord;

use chrono::{DateTime, Utc};

use crate::extract::Code;

pub use discord::DiscordNotifier;

/// What gets announced in one run. `codes` is sorted and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCodeBatch {
    pub codes: Vec<Code>,
    pub sources: Vec<String>, // contributing source names
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Missing DISCORD_WEBHOOK_URL")]
    MissingWebhook,
    #[error("webhook request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("webhook returned HTTP {status}")]
    Status { status: reqwest::StatusCode },
}

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, batch: &NewCodeBatch) -> Result<(), NotifyError>;
}

const SOURCES_FALLBACK: &str = "mixed sources";
const REMINDER: &str = "Redeem ASAP (codes can expire / hit limits).";

/// Render the chat message for `batch` at time `now`.
pub fn format_message(batch: &NewCodeBatch, ping_role: Option<&str>, now: DateTime<Utc>) -> String {
    let ping = match ping_role {
        Some(role) if !role.is_empty() => format!("<@&{role}>\n"),
        _ => String::new(),
    };
    let stamp = now.format("%Y-%m-%d %H:%M UTC");
    let lines = batch
        .codes
        .iter()
        .map(|c| format!("• `{c}`"))
        .collect::<Vec<_>>()
        .join("\n");
    let src = if batch.sources.is_empty() {
        SOURCES_FALLBACK.to_string()
    } else {
        batch.sources.join(", ")
    };

    format!(
        "{ping}🎁 **New Gift Codes Found** ({stamp})\n\
         {lines}\n\n\
         _Sources checked: {src}_\n\
         {REMINDER}"
    )
}

/// Prints the message instead of posting it.
pub struct DryRunNotifier {
    ping_role: Option<String>,
}

impl DryRunNotifier {
    pub fn new(ping_role: Option<String>) -> Self {
        Self { ping_role }
    }
}

#[async_trait::async_trait]
impl Notifier for DryRunNotifier {
    async fn send(&self, batch: &NewCodeBatch) -> Result<(), NotifyError> {
        let msg = format_message(batch, self.ping_role.as_deref(), Utc::now());
        tracing::info!(codes = batch.codes.len(), "dry run, webhook not called");
        println!("{msg}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn batch(codes: &[&str], sources: &[&str]) -> NewCodeBatch {
        NewCodeBatch {
            codes: codes.iter().map(|s| s.to_string()).collect(),
            sources: sources.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 6, 9, 5, 42).unwrap()
    }

    #[test]
    fn message_without_ping() {
        let msg = format_message(&batch(&["AAA111", "BBB222"], &["site a", "site b"]), None, at());
        assert_eq!(
            msg,
            "🎁 **New Gift Codes Found** (2025-09-06 09:05 UTC)\n\
             • `AAA111`\n\
             • `BBB222`\n\n\
             _Sources checked: site a, site b_\n\
             Redeem ASAP (codes can expire / hit limits)."
        );
    }

    #[test]
    fn ping_prefix_only_when_configured() {
        let b = batch(&["AAA111"], &["x"]);
        assert!(format_message(&b, Some("12345"), at()).starts_with("<@&12345>\n🎁"));
        assert!(format_message(&b, Some(""), at()).starts_with("🎁"));
    }

    #[test]
    fn unattributed_batch_uses_fallback() {
        let msg = format_message(&batch(&["AAA111"], &[]), None, at());
        assert!(msg.contains("_Sources checked: mixed sources_"));
    }

    #[test]
    fn missing_webhook_message_names_variable() {
        assert_eq!(NotifyError::MissingWebhook.to_string(), "Missing DISCORD_WEBHOOK_URL");
    }
}
