//! Prints the codes the extractor sees on each source. No diff, no webhook, no state.
//!
//! Usage: `scan_page [URL]` — without a URL, scans the configured sources.

use gift_code_announcer::config::sources::load_sources_default;
use gift_code_announcer::ingest::{scrape_source, types::SourceOutcome};
use gift_code_announcer::{HttpFetcher, Source};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let sources = match std::env::args().nth(1) {
        Some(url) => vec![Source::new(url.clone(), url)],
        None => load_sources_default()?,
    };

    let fetcher = HttpFetcher::new();
    for src in &sources {
        match scrape_source(&fetcher, src).await {
            SourceOutcome::Found(codes) => {
                let list: Vec<&str> = codes.iter().map(String::as_str).collect();
                println!("{}: {}", src.name, list.join(" "));
            }
            SourceOutcome::Failed(reason) => {
                tracing::error!(source = %src.name, error = %reason, "fetch failed");
            }
        }
    }
    Ok(())
}
