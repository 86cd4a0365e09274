//! Validate, resolve recipients, and format in one step.
use crate::message::format_message;
use crate::phone::CallingCodePolicy;
use crate::row::Row;
use crate::validate::{recipients, validate, ValidationReport};
use serde::Serialize;

/// A message ready for dispatch to every listed recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedSms {
    pub recipients: Vec<String>,
    pub body: String,
}

impl ComposedSms {
    /// First recipient, for single-recipient callers.
    pub fn primary_recipient(&self) -> &str {
        self.recipients.first().map(String::as_str).unwrap_or("")
    }
}

/// Compose an SMS from a row, or return the missing-field report.
pub fn compose(row: &Row, policy: &CallingCodePolicy) -> Result<ComposedSms, ValidationReport> {
    let report = validate(row);
    if !report.is_valid() {
        tracing::info!(
            keys = ?row.keys().collect::<Vec<_>>(),
            missing = ?report.missing,
            "row failed validation"
        );
        return Err(report);
    }
    Ok(ComposedSms {
        recipients: recipients(row),
        body: format_message(row, policy),
    })
}
