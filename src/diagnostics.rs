//! Debug views of a row: which logical fields were found, and a redacted
//! copy safe to put in logs.
use crate::row::Row;
use crate::util::{ellipsize, mask_digits};
use crate::validate::CHECKED_FIELDS;
use serde::Serialize;
use std::collections::BTreeMap;

const LOG_VALUE_MAX_CHARS: usize = 80;

/// Logical fields whose values are phone numbers and get masked.
const PHONE_FIELDS: [&str; 3] = ["phone", "alt no", "agent phone"];

/// Field detection report shown to operators in debug mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDiagnostics {
    pub detected: BTreeMap<String, bool>,
    pub sample: BTreeMap<String, String>,
    pub keys: Vec<String>,
}

/// Report which logical fields resolved, with phone samples masked.
pub fn detect_fields(row: &Row) -> FieldDiagnostics {
    let mut detected = BTreeMap::new();
    let mut sample = BTreeMap::new();
    for (label, variants) in CHECKED_FIELDS {
        let value = variants.resolve(row);
        detected.insert(label.to_string(), !value.is_empty());
        let shown = if PHONE_FIELDS.contains(&label) {
            mask_digits(&value)
        } else {
            value
        };
        sample.insert(label.to_string(), shown);
    }
    let mut keys: Vec<String> = row.keys().map(str::to_string).collect();
    keys.sort();
    FieldDiagnostics {
        detected,
        sample,
        keys,
    }
}

/// Row entries with phone-like values masked and long values shortened.
pub fn sanitized_entries(row: &Row) -> Vec<(String, String)> {
    row.iter()
        .map(|(key, value)| {
            let shown = if is_phone_key(key) {
                mask_digits(value)
            } else {
                ellipsize(value, LOG_VALUE_MAX_CHARS)
            };
            (key.to_string(), shown)
        })
        .collect()
}

fn is_phone_key(key: &str) -> bool {
    key == "alt no" || key.contains("phone")
}
