//! pipeline.rs — one announcer run: load → scrape → diff → notify → persist.
//!
//! State is written only after the webhook accepted the batch, so a failed
//! post leaves the batch "new" for the next run.

use anyhow::{Context, Result};
use metrics::counter;
use std::fmt;

use crate::config::AppConfig;
use crate::diff::{contributing_sources, new_codes};
use crate::extract::Code;
use crate::ingest::{collect_codes, ensure_metrics_described, types::PageFetcher};
use crate::notify::{NewCodeBatch, Notifier};
use crate::state::StateStore;

/// Outcome of a successful run. `failures` lists (source, reason) pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunSummary {
    NoNewCodes {
        failures: Vec<(String, String)>,
    },
    Posted {
        codes: Vec<Code>,
        sources: Vec<String>,
        failures: Vec<(String, String)>,
    },
    /// New codes were rendered but not posted and not remembered.
    DryRun {
        codes: Vec<Code>,
        sources: Vec<String>,
        failures: Vec<(String, String)>,
    },
}

impl RunSummary {
    pub fn failures(&self) -> &[(String, String)] {
        match self {
            RunSummary::NoNewCodes { failures } => failures,
            RunSummary::Posted { failures, .. } => failures,
            RunSummary::DryRun { failures, .. } => failures,
        }
    }

    pub fn posted_count(&self) -> usize {
        match self {
            RunSummary::NoNewCodes { .. } | RunSummary::DryRun { .. } => 0,
            RunSummary::Posted { codes, .. } => codes.len(),
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunSummary::NoNewCodes { .. } => write!(f, "No new codes found."),
            RunSummary::Posted { codes, .. } => write!(f, "Posted {} new code(s).", codes.len()),
            RunSummary::DryRun { codes, .. } => {
                write!(f, "Dry run: {} new code(s) found, nothing posted.", codes.len())
            }
        }
    }
}

/// Execute one run. Source errors are absorbed; notify and save errors are not.
pub async fn run_once(
    cfg: &AppConfig,
    fetcher: &dyn PageFetcher,
    notifier: &dyn Notifier,
) -> Result<RunSummary> {
    ensure_metrics_described();

    let store = StateStore::new(&cfg.state_path);
    let mut announced = store.load().await.codes;

    let (per_source, failures) = collect_codes(fetcher, &cfg.sources).await;

    let new = new_codes(&per_source, &announced);
    if new.is_empty() {
        tracing::info!(known = announced.len(), "nothing new");
        counter!("announcer_runs_total").increment(1);
        return Ok(RunSummary::NoNewCodes { failures });
    }

    let batch = NewCodeBatch {
        sources: contributing_sources(&per_source, &new),
        codes: new,
    };

    notifier
        .send(&batch)
        .await
        .context("posting new codes to webhook")?;

    if cfg.dry_run {
        tracing::info!(codes = batch.codes.len(), "dry run, state left untouched");
        counter!("announcer_runs_total").increment(1);
        return Ok(RunSummary::DryRun {
            codes: batch.codes,
            sources: batch.sources,
            failures,
        });
    }

    announced.extend(batch.codes.iter().cloned());
    store
        .save(&announced)
        .await
        .context("saving announced codes")?;

    tracing::info!(
        posted = batch.codes.len(),
        sources = ?batch.sources,
        "announced new codes"
    );
    counter!("announcer_codes_posted_total").increment(batch.codes.len() as u64);
    counter!("announcer_runs_total").increment(1);

    Ok(RunSummary::Posted {
        codes: batch.codes,
        sources: batch.sources,
        failures,
    })
}
