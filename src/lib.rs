// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod config;
pub mod diff;
pub mod extract;
pub mod ingest;
pub mod notify;
pub mod pipeline;
pub mod state;

// ---- Re-exports for stable public API ----
pub use crate::config::AppConfig;
pub use crate::extract::{extract_codes, Code};
pub use crate::ingest::http::HttpFetcher;
pub use crate::ingest::types::{PageFetcher, Source};
pub use crate::notify::{DiscordNotifier, DryRunNotifier, NewCodeBatch, Notifier, NotifyError};
pub use crate::pipeline::{run_once, RunSummary};
