// src/config/sources.rs
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ingest::types::Source;

pub const ENV_SOURCES_PATH: &str = "GIFT_SOURCES_PATH";

/// Built-in list used when no sources file is present.
pub fn default_sources() -> Vec<Source> {
    vec![
        Source::new("kingshot.net gift-codes", "https://kingshot.net/gift-codes"),
        Source::new(
            "eldorado codes",
            "https://www.eldorado.gg/blog/kingshot-redeem-code/",
        ),
    ]
}

/// Load sources from an explicit path. Supports TOML or JSON formats.
pub fn load_sources_from(path: &Path) -> Result<Vec<Source>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading sources from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_sources(&content, ext.as_str())
        .with_context(|| format!("parsing sources in {}", path.display()))
}

/// Load sources using env var + fallbacks:
/// 1) $GIFT_SOURCES_PATH
/// 2) config/sources.toml
/// 3) config/sources.json
/// 4) built-in defaults
pub fn load_sources_default() -> Result<Vec<Source>> {
    if let Ok(p) = std::env::var(ENV_SOURCES_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_sources_from(&pb);
        } else {
            return Err(anyhow!("{ENV_SOURCES_PATH} points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/sources.toml");
    if toml_p.exists() {
        return load_sources_from(&toml_p);
    }
    let json_p = PathBuf::from("config/sources.json");
    if json_p.exists() {
        return load_sources_from(&json_p);
    }
    Ok(default_sources())
}

fn parse_sources(s: &str, hint_ext: &str) -> Result<Vec<Source>> {
    let list = if hint_ext == "toml" {
        parse_toml(s)?
    } else if hint_ext == "json" {
        parse_json(s)?
    } else {
        parse_json(s)
            .or_else(|_| parse_toml(s))
            .map_err(|_| anyhow!("unsupported sources format"))?
    };
    if list.is_empty() {
        return Err(anyhow!("no usable sources"));
    }
    Ok(list)
}

fn parse_toml(s: &str) -> Result<Vec<Source>> {
    #[derive(serde::Deserialize)]
    struct TomlSources {
        sources: Vec<Source>,
    }
    let v: TomlSources = toml::from_str(s)?;
    Ok(clean_list(v.sources))
}

fn parse_json(s: &str) -> Result<Vec<Source>> {
    let v: Vec<Source> = serde_json::from_str(s)?;
    Ok(clean_list(v))
}

/// Trim, drop blanks, keep the first entry per name (order preserved).
fn clean_list(items: Vec<Source>) -> Vec<Source> {
    use std::collections::HashSet;
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for it in items {
        let name = it.name.trim();
        let url = it.url.trim();
        if name.is_empty() || url.is_empty() {
            continue;
        }
        if seen.insert(name.to_string()) {
            out.push(Source::new(name, url));
        }
    }
    out
}
