//! Gift code announcer — binary entrypoint.
//! Runs the pipeline once; an external scheduler decides how often.

use anyhow::Result;
use gift_code_announcer::{
    run_once, AppConfig, DiscordNotifier, DryRunNotifier, HttpFetcher, Notifier,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logs go to stderr; stdout carries only the summary line.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gift_code_announcer=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env when present; no-op otherwise.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = AppConfig::from_env()?;
    tracing::debug!(sources = cfg.sources.len(), state = %cfg.state_path.display(), "config loaded");

    let fetcher = HttpFetcher::new();
    let notifier: Box<dyn Notifier> = if cfg.dry_run {
        Box::new(DryRunNotifier::new(cfg.ping_role_id.clone()))
    } else {
        Box::new(DiscordNotifier::new(cfg.webhook_url.clone()).with_ping_role(cfg.ping_role_id.clone()))
    };

    let summary = run_once(&cfg, &fetcher, notifier.as_ref()).await?;
    println!("{summary}");
    Ok(())
}
