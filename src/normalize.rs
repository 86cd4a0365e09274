//! Field-name canonicalization.
//!
//! Every header, query key, and lookup key goes through [`normalize_key`], so
//! "Agent Phone", "agent_phone" and "AGENT  PHONE" all land on `agent phone`.
use regex::Regex;
use std::sync::OnceLock;

fn separator_run() -> &'static Regex {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    // `\s` is Unicode-aware here, so it also covers non-breaking spaces.
    SEPARATORS.get_or_init(|| Regex::new(r"[\s_]+").expect("separator pattern compiles"))
}

/// Canonical lookup key for a raw field name.
///
/// Runs of whitespace or underscores collapse to one ASCII space, the result
/// is trimmed and lower-cased. Empty input yields an empty key.
pub fn normalize_key(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    separator_run()
        .replace_all(raw, " ")
        .trim()
        .to_lowercase()
}
