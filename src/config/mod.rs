// src/config/mod.rs
pub mod sources;

use anyhow::Result;
use std::path::PathBuf;

use crate::ingest::types::Source;
use crate::state::DEFAULT_STATE_PATH;

pub const ENV_WEBHOOK_URL: &str = "DISCORD_WEBHOOK_URL";
pub const ENV_PING_ROLE_ID: &str = "PING_ROLE_ID";
pub const ENV_STATE_PATH: &str = "CODES_STATE_PATH";
pub const ENV_DRY_RUN: &str = "GIFT_DRY_RUN";

/// Everything a run needs, built once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Webhook target; absence only matters once there is something to post.
    pub webhook_url: Option<String>,
    pub ping_role_id: Option<String>,
    pub sources: Vec<Source>,
    pub state_path: PathBuf,
    /// Print instead of posting, and never write state.
    pub dry_run: bool,
}

impl AppConfig {
    pub fn new(sources: Vec<Source>, state_path: impl Into<PathBuf>) -> Self {
        Self {
            webhook_url: None,
            ping_role_id: None,
            sources,
            state_path: state_path.into(),
            dry_run: false,
        }
    }

    pub fn with_webhook(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = non_empty(url.into());
        self
    }

    pub fn with_ping_role(mut self, role: impl Into<String>) -> Self {
        self.ping_role_id = non_empty(role.into());
        self
    }

    pub fn with_dry_run(mut self, on: bool) -> Self {
        self.dry_run = on;
        self
    }

    /// Read the process environment (call `dotenvy::dotenv()` first if wanted).
    pub fn from_env() -> Result<Self> {
        let sources = sources::load_sources_default()?;
        let state_path = std::env::var(ENV_STATE_PATH)
            .ok()
            .and_then(non_empty)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_PATH));
        let dry_run = std::env::var(ENV_DRY_RUN)
            .ok()
            .is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true"));

        Ok(Self {
            webhook_url: std::env::var(ENV_WEBHOOK_URL).ok().and_then(non_empty),
            ping_role_id: std::env::var(ENV_PING_ROLE_ID).ok().and_then(non_empty),
            sources,
            state_path,
            dry_run,
        })
    }
}

fn non_empty(s: String) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn clear_env() {
        for k in [
            ENV_WEBHOOK_URL,
            ENV_PING_ROLE_ID,
            ENV_STATE_PATH,
            ENV_DRY_RUN,
            sources::ENV_SOURCES_PATH,
        ] {
            env::remove_var(k);
        }
    }

    #[serial_test::serial]
    #[test]
    fn from_env_trims_and_defaults() {
        // Isolate CWD so a real config/ in the repo is not picked up
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();
        clear_env();

        env::set_var(ENV_WEBHOOK_URL, "  https://hook.example/abc  ");
        env::set_var(ENV_PING_ROLE_ID, "   ");
        let cfg = AppConfig::from_env().unwrap();
        assert_eq!(cfg.webhook_url.as_deref(), Some("https://hook.example/abc"));
        assert_eq!(cfg.ping_role_id, None);
        assert_eq!(cfg.state_path, PathBuf::from("posted_codes.json"));
        assert_eq!(cfg.sources, sources::default_sources());
        assert!(!cfg.dry_run);

        env::set_var(ENV_STATE_PATH, "state/codes.json");
        env::set_var(ENV_DRY_RUN, "true");
        let cfg = AppConfig::from_env().unwrap();
        assert_eq!(cfg.state_path, PathBuf::from("state/codes.json"));
        assert!(cfg.dry_run);

        clear_env();
        env::set_current_dir(&old).unwrap();
    }

    #[test]
    fn builders_treat_blank_as_absent() {
        let cfg = AppConfig::new(vec![], "x.json")
            .with_webhook("")
            .with_ping_role(" 42 ");
        assert_eq!(cfg.webhook_url, None);
        assert_eq!(cfg.ping_role_id.as_deref(), Some("42"));
    }
}
