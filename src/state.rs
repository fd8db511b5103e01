use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::extract::Code;

pub const DEFAULT_STATE_PATH: &str = "posted_codes.json";

/// On-disk shape: `{ "codes": [..] }`, sorted.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PostedCodes {
    #[serde(default)]
    codes: Vec<Code>,
}

/// How `load` arrived at its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    Missing,
    /// File existed but was unreadable or malformed; treated as empty.
    Recovered(String),
}

#[derive(Debug, Clone)]
pub struct LoadedState {
    pub codes: BTreeSet<Code>,
    pub status: LoadStatus,
}

/// Announced-code set persisted as a small JSON file.
/// Best-effort: no locking, no atomic rename; last successful save wins.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Never fails. Missing or corrupt files yield an empty set.
    pub async fn load(&self) -> LoadedState {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no state file yet");
                return LoadedState {
                    codes: BTreeSet::new(),
                    status: LoadStatus::Missing,
                };
            }
            Err(e) => return self.recovered(format!("read: {e}")),
        };

        match serde_json::from_str::<PostedCodes>(&raw) {
            Ok(s) => LoadedState {
                codes: s.codes.into_iter().collect(),
                status: LoadStatus::Loaded,
            },
            Err(e) => self.recovered(format!("parse: {e}")),
        }
    }

    fn recovered(&self, reason: String) -> LoadedState {
        tracing::warn!(
            path = %self.path.display(),
            error = %reason,
            "state file unusable, starting from empty set"
        );
        LoadedState {
            codes: BTreeSet::new(),
            status: LoadStatus::Recovered(reason),
        }
    }

    /// Overwrite the file with `codes`, sorted, pretty-printed.
    pub async fn save(&self, codes: &BTreeSet<Code>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("creating state dir {}", parent.display()))?;
            }
        }

        let record = PostedCodes {
            codes: codes.iter().cloned().collect(),
        };
        let body = serde_json::to_vec_pretty(&record).context("serializing state")?;
        fs::write(&self.path, body)
            .await
            .with_context(|| format!("writing state to {}", self.path.display()))?;
        Ok(())
    }
}
