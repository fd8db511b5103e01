// src/diff.rs
use std::collections::BTreeSet;

use crate::extract::Code;
use crate::ingest::types::SourceResult;

/// `union(per_source) - announced`, sorted ascending.
pub fn new_codes(per_source: &[SourceResult], announced: &BTreeSet<Code>) -> Vec<Code> {
    let all: BTreeSet<&Code> = per_source.iter().flat_map(|r| r.codes.iter()).collect();
    all.into_iter()
        .filter(|c| !announced.contains(*c))
        .cloned()
        .collect()
}

/// Names of sources that reported at least one code in `new`, in source order.
/// Attribution is inclusive: a code seen at two sources credits both.
pub fn contributing_sources(per_source: &[SourceResult], new: &[Code]) -> Vec<String> {
    per_source
        .iter()
        .filter(|r| new.iter().any(|c| r.codes.contains(c)))
        .map(|r| r.name.clone())
        .collect()
}
