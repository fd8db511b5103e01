// src/ingest/types.rs
use anyhow::Result;
use std::collections::BTreeSet;

use crate::extract::Code;

/// A named page scraped for codes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct Source {
    pub name: String, // e.g. "kingshot.net gift-codes"
    pub url: String,
}

impl Source {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Result of scraping one source in the current run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Found(BTreeSet<Code>),
    Failed(String),
}

/// Codes found at one source; failed sources carry an empty set here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceResult {
    pub name: String,
    pub codes: BTreeSet<Code>,
}

#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    /// Return the page body as text, or an error for any network/HTTP failure.
    async fn fetch_text(&self, source: &Source) -> Result<String>;
}
