//! Handing a composed message to a sender, one call per recipient.
//!
//! Provider wire protocols live behind [`Dispatcher`]; the crate ships an
//! outbox dispatcher that records every message as a JSON line.
use crate::compose::ComposedSms;
use crate::phone::CallingCodePolicy;
use crate::util::{mask_digits, truncate_string, MESSAGE_PREVIEW_MAX_BYTES};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const INVALID_RECIPIENT: &str = "Invalid recipient phone number";

/// Something that can deliver one SMS to one dial-form number.
pub trait Dispatcher {
    /// Short provider label recorded on receipts.
    fn provider(&self) -> &str;

    /// Send `body` to `msisdn`, returning a provider reference on success.
    fn send(&mut self, msisdn: &str, body: &str) -> Result<String>;
}

/// Result of one dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReceipt {
    /// Recipient as it appeared in the row.
    pub recipient: String,
    /// Dial form actually sent to; empty when the recipient had no digits.
    pub msisdn: String,
    pub provider: String,
    pub success: bool,
    pub reference: Option<String>,
    pub detail: String,
}

/// Send `composed` to each recipient in order.
///
/// Recipients are canonicalized to dial form first; those without digits
/// fail without reaching the dispatcher. Dispatcher errors become failed
/// receipts so one bad number does not stop the rest.
pub fn dispatch_all<D: Dispatcher + ?Sized>(
    dispatcher: &mut D,
    composed: &ComposedSms,
    policy: &CallingCodePolicy,
) -> Vec<DispatchReceipt> {
    let mut receipts = Vec::with_capacity(composed.recipients.len());
    for recipient in &composed.recipients {
        let msisdn = policy.dial_form(recipient);
        let provider = dispatcher.provider().to_string();
        if msisdn.is_empty() {
            tracing::warn!(recipient = %recipient, "recipient has no digits; skipping");
            receipts.push(DispatchReceipt {
                recipient: recipient.clone(),
                msisdn,
                provider,
                success: false,
                reference: None,
                detail: INVALID_RECIPIENT.to_string(),
            });
            continue;
        }

        let receipt = match dispatcher.send(&msisdn, &composed.body) {
            Ok(reference) => {
                tracing::info!(
                    msisdn = %mask_digits(&msisdn),
                    provider = %provider,
                    reference = %reference,
                    body_bytes = composed.body.len(),
                    "sms dispatched"
                );
                DispatchReceipt {
                    recipient: recipient.clone(),
                    msisdn,
                    provider,
                    success: true,
                    detail: format!("sent (ref: {reference})"),
                    reference: Some(reference),
                }
            }
            Err(err) => {
                tracing::warn!(
                    msisdn = %mask_digits(&msisdn),
                    provider = %provider,
                    error = %format!("{err:#}"),
                    "sms dispatch failed"
                );
                DispatchReceipt {
                    recipient: recipient.clone(),
                    msisdn,
                    provider,
                    success: false,
                    reference: None,
                    detail: format!("{err:#}"),
                }
            }
        };
        receipts.push(receipt);
    }
    receipts
}

/// One line of the outbox file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxRecord {
    pub created_at_epoch_ms: u128,
    pub reference: String,
    pub msisdn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub provider: String,
    pub message_preview: String,
    pub body: String,
}

/// Appends each message to a JSON Lines outbox file.
#[derive(Debug, Clone)]
pub struct OutboxDispatcher {
    path: PathBuf,
    source: Option<String>,
}

impl OutboxDispatcher {
    pub const PROVIDER: &'static str = "outbox";

    pub fn new(path: impl Into<PathBuf>, source: Option<String>) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, record: &OutboxRecord) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open {}", self.path.display()))?;
        let line = serde_json::to_string(record).context("serialize outbox record")?;
        file.write_all(line.as_bytes())
            .with_context(|| format!("write {}", self.path.display()))?;
        file.write_all(b"\n")
            .with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }
}

impl Dispatcher for OutboxDispatcher {
    fn provider(&self) -> &str {
        Self::PROVIDER
    }

    fn send(&mut self, msisdn: &str, body: &str) -> Result<String> {
        let reference = uuid::Uuid::new_v4().simple().to_string();
        let created_at_epoch_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("compute timestamp")?
            .as_millis();
        let record = OutboxRecord {
            created_at_epoch_ms,
            reference: reference.clone(),
            msisdn: msisdn.to_string(),
            source: self.source.clone(),
            provider: Self::PROVIDER.to_string(),
            message_preview: truncate_string(body, MESSAGE_PREVIEW_MAX_BYTES),
            body: body.to_string(),
        };
        self.append(&record)?;
        Ok(reference)
    }
}
