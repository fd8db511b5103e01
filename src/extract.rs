//! extract.rs — flat pattern scan for code-shaped tokens.
//!
//! No markup parsing: the whole page is uppercased and scanned for
//! standalone `[A-Z0-9]{6,16}` runs. A small closed blacklist removes UI words
//! that happen to have the same shape.

use once_cell::sync::OnceCell;
use regex::Regex;
use std::collections::BTreeSet;

/// An uppercase alphanumeric token, 6–16 chars.
pub type Code = String;

/// Known false positives. Exact match after uppercasing.
pub const BLACKLIST: &[&str] = &[
    "DISCORD", "ANDROID", "REDEEM", "WEBSITE", "SETTINGS", "GIFT",
];

fn code_regex() -> &'static Regex {
    static RE_CODE: OnceCell<Regex> = OnceCell::new();
    RE_CODE.get_or_init(|| Regex::new(r"\b[A-Z0-9]{6,16}\b").unwrap())
}

pub fn is_blacklisted(token: &str) -> bool {
    let upper = token.to_uppercase();
    BLACKLIST.iter().any(|b| *b == upper)
}

/// Extract the set of codes found in `text`.
pub fn extract_codes(text: &str) -> BTreeSet<Code> {
    let upper = text.to_uppercase();
    code_regex()
        .find_iter(&upper)
        .map(|m| m.as_str())
        .filter(|tok| !is_blacklisted(tok))
        .map(str::to_string)
        .collect()
}
