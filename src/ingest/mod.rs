// src/ingest/mod.rs
pub mod http;
pub mod types;

use crate::extract::extract_codes;
use crate::ingest::types::{PageFetcher, Source, SourceOutcome, SourceResult};
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;

/// One-time metrics registration so the series carry descriptions.
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "announcer_source_errors_total",
            "Source fetch errors (source contributed no codes)."
        );
        describe_counter!(
            "announcer_codes_extracted_total",
            "Codes extracted across all sources, before diffing."
        );
        describe_counter!(
            "announcer_codes_posted_total",
            "New codes successfully posted to the webhook."
        );
        describe_counter!("announcer_runs_total", "Completed announcer runs.");
    });
}

/// Fetch and extract a single source. Errors are folded into `Failed`.
pub async fn scrape_source(fetcher: &dyn PageFetcher, source: &Source) -> SourceOutcome {
    match fetcher.fetch_text(source).await {
        Ok(text) => SourceOutcome::Found(extract_codes(&text)),
        Err(e) => SourceOutcome::Failed(format!("{e:#}")),
    }
}

/// Scrape every source in order, one at a time.
/// Returns a `SourceResult` per source (failed ones empty) plus the failure reasons.
pub async fn collect_codes(
    fetcher: &dyn PageFetcher,
    sources: &[Source],
) -> (Vec<SourceResult>, Vec<(String, String)>) {
    ensure_metrics_described();

    let mut results = Vec::with_capacity(sources.len());
    let mut failures = Vec::new();

    for src in sources {
        let codes = match scrape_source(fetcher, src).await {
            SourceOutcome::Found(codes) => {
                tracing::info!(source = %src.name, found = codes.len(), "source scanned");
                counter!("announcer_codes_extracted_total").increment(codes.len() as u64);
                codes
            }
            SourceOutcome::Failed(reason) => {
                tracing::error!(source = %src.name, error = %reason, "fetch failed");
                counter!("announcer_source_errors_total").increment(1);
                failures.push((src.name.clone(), reason));
                Default::default()
            }
        };
        results.push(SourceResult {
            name: src.name.clone(),
            codes,
        });
    }

    (results, failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};

    struct MapFetcher;

    #[async_trait::async_trait]
    impl PageFetcher for MapFetcher {
        async fn fetch_text(&self, source: &Source) -> Result<String> {
            match source.name.as_str() {
                "down" => Err(anyhow!("connection refused")),
                _ => Ok(format!("code {} here", source.url)),
            }
        }
    }

    #[tokio::test]
    async fn failed_source_yields_empty_set_and_reason() {
        let sources = vec![
            Source::new("down", "unused"),
            Source::new("up", "SPRING2025"),
        ];
        let (results, failures) = collect_codes(&MapFetcher, &sources).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "down");
        assert!(results[0].codes.is_empty());
        assert!(results[1].codes.contains("SPRING2025"));

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "down");
        assert!(failures[0].1.contains("connection refused"));
    }

    #[tokio::test]
    async fn scrape_source_wraps_outcome() {
        let out = scrape_source(&MapFetcher, &Source::new("x", "abc123def")).await;
        match out {
            SourceOutcome::Found(set) => assert!(set.contains("ABC123DEF")),
            SourceOutcome::Failed(r) => panic!("unexpected failure: {r}"),
        }
    }
}
