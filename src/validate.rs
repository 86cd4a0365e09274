//! Required-field policy and recipient extraction.
use crate::resolve::{self, resolve, FieldVariants};
use crate::row::Row;
use serde::Serialize;

pub const MISSING_AGENT_PHONE: &str = "AGENT PHONE";
pub const MISSING_PHONE_OR_ALT: &str = "PHONE or ALT NO (at least one)";

/// Plain required fields: lookup key and the display name used in reports.
const REQUIRED_FOR_MESSAGE: [(&str, &str); 3] = [
    ("name", "NAME"),
    ("product name", "PRODUCT NAME"),
    ("amount", "AMOUNT"),
];

/// Outcome of checking a row against the required-field policy.
///
/// `missing` keeps check order: NAME, PRODUCT NAME, AMOUNT, AGENT PHONE,
/// then the phone-or-alt pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub missing: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Check that every required field is present and non-empty.
pub fn validate(row: &Row) -> ValidationReport {
    let mut missing = Vec::new();

    for (key, display) in REQUIRED_FOR_MESSAGE {
        let underscored = key.replace(' ', "_");
        if resolve(row, &[key, underscored.as_str()]).is_empty() {
            missing.push(display.to_string());
        }
    }

    if recipients(row).is_empty() {
        missing.push(MISSING_AGENT_PHONE.to_string());
    }

    let has_phone =
        !resolve::PHONE.resolve(row).is_empty() || !resolve::ALT_PHONE.resolve(row).is_empty();
    if !has_phone {
        missing.push(MISSING_PHONE_OR_ALT.to_string());
    }

    ValidationReport { missing }
}

/// Recipients from the AGENT PHONE field, split on `/`, in input order.
pub fn recipients(row: &Row) -> Vec<String> {
    split_recipients(&resolve::AGENT_PHONE.resolve(row))
}

/// First recipient, or an empty string when there is none.
pub fn primary_recipient(row: &Row) -> String {
    recipients(row).into_iter().next().unwrap_or_default()
}

fn split_recipients(raw: &str) -> Vec<String> {
    raw.split('/')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Logical fields checked for presence, for callers that want to
/// explain a failed validation.
pub const CHECKED_FIELDS: [(&str, FieldVariants); 8] = [
    ("name", resolve::NAME),
    ("phone", resolve::PHONE),
    ("alt no", resolve::ALT_PHONE),
    ("product name", resolve::PRODUCT_NAME),
    ("amount", resolve::AMOUNT),
    ("address", resolve::ADDRESS),
    ("city", resolve::CITY),
    ("agent phone", resolve::AGENT_PHONE),
];
