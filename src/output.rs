//! Text and JSON rendering for command results.
use anyhow::{Context, Result};
use messo::diagnostics::FieldDiagnostics;
use messo::dispatch::DispatchReceipt;
use serde::Serialize;
use std::fmt::Write as _;

/// Outcome of resolving and composing one row.
#[derive(Debug, Clone, Serialize)]
pub struct RowReport {
    pub source: String,
    pub status: RowStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub missing: Vec<String>,
    pub recipients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<FieldDiagnostics>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Valid,
    Invalid,
    Malformed,
}

impl RowStatus {
    fn as_str(self) -> &'static str {
        match self {
            RowStatus::Valid => "valid",
            RowStatus::Invalid => "invalid",
            RowStatus::Malformed => "malformed",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SendReport {
    #[serde(flatten)]
    pub row: RowReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outbox: Option<String>,
    pub receipts: Vec<DispatchReceipt>,
}

/// One line of the `rows` listing.
#[derive(Debug, Clone, Serialize)]
pub struct RowListing {
    pub index: usize,
    pub order_number: String,
    pub valid: bool,
    pub missing: Vec<String>,
}

pub fn print_json<T: Serialize>(value: &T, label: &str) -> Result<()> {
    let text = serde_json::to_string_pretty(value).with_context(|| format!("serialize {label}"))?;
    println!("{text}");
    Ok(())
}

pub fn render_row_report(report: &RowReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "source: {}", report.source);
    let _ = writeln!(out, "status: {}", report.status.as_str());
    if let Some(error) = report.error.as_ref() {
        let _ = writeln!(out, "error: {error}");
    }
    if !report.missing.is_empty() {
        let _ = writeln!(out, "missing: {}", report.missing.join(", "));
    }
    if !report.recipients.is_empty() {
        let _ = writeln!(out, "recipients: {}", report.recipients.join(", "));
    }
    if let Some(message) = report.message.as_ref() {
        let _ = writeln!(out, "message:");
        for line in message.lines() {
            let _ = writeln!(out, "  {line}");
        }
    }
    if let Some(debug) = report.debug.as_ref() {
        let _ = writeln!(out, "fields:");
        for (label, detected) in &debug.detected {
            let sample = debug.sample.get(label).map(String::as_str).unwrap_or("");
            if *detected {
                let _ = writeln!(out, "  - {label}: detected ({sample})");
            } else {
                let _ = writeln!(out, "  - {label}: missing");
            }
        }
        let _ = writeln!(out, "keys: {}", debug.keys.join(", "));
    }
    out
}

pub fn render_send_report(report: &SendReport) -> String {
    let mut out = render_row_report(&report.row);
    if let Some(outbox) = report.outbox.as_ref() {
        let _ = writeln!(out, "outbox: {outbox}");
    }
    if !report.receipts.is_empty() {
        let _ = writeln!(out, "receipts:");
        for receipt in &report.receipts {
            let target = if receipt.msisdn.is_empty() {
                receipt.recipient.as_str()
            } else {
                receipt.msisdn.as_str()
            };
            let state = if receipt.success { "ok" } else { "FAILED" };
            let _ = writeln!(out, "  - {target}: {state} ({})", receipt.detail);
        }
    }
    out
}

pub fn render_rows(rows: &[RowListing]) -> String {
    let mut out = String::new();
    if rows.is_empty() {
        out.push_str("no rows\n");
        return out;
    }
    for row in rows {
        let order = if row.order_number.is_empty() {
            "-"
        } else {
            row.order_number.as_str()
        };
        if row.valid {
            let _ = writeln!(out, "{:>4}  {order}  valid", row.index);
        } else {
            let _ = writeln!(
                out,
                "{:>4}  {order}  missing: {}",
                row.index,
                row.missing.join(", ")
            );
        }
    }
    out
}
