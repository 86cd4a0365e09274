//! Phone-number canonicalization.
//!
//! Two forms exist and must not be mixed up: the dial form handed to a
//! dispatcher, and the local display form printed inside the message body.
use serde::{Deserialize, Serialize};

/// Digits a local mobile number has once its leading zero is dropped.
const LOCAL_SUBSCRIBER_DIGITS: usize = 9;

/// Which calling codes count as "already international".
///
/// `default_code` is prepended to local numbers; any number starting with it
/// or with one of `recognized` is left alone when dialing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallingCodePolicy {
    default_code: String,
    recognized: Vec<String>,
}

impl Default for CallingCodePolicy {
    fn default() -> Self {
        Self::new("255", ["255", "27"])
    }
}

impl CallingCodePolicy {
    pub fn new<I, S>(default_code: impl Into<String>, recognized: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            default_code: default_code.into(),
            recognized: recognized.into_iter().map(Into::into).collect(),
        }
    }

    pub fn default_code(&self) -> &str {
        &self.default_code
    }

    pub fn recognized(&self) -> &[String] {
        &self.recognized
    }

    /// True when `digits` already starts with a known calling code.
    pub fn has_calling_code(&self, digits: &str) -> bool {
        digits.starts_with(self.default_code.as_str())
            || self
                .recognized
                .iter()
                .any(|code| !code.is_empty() && digits.starts_with(code.as_str()))
    }

    /// Dial-ready form: digits with an optional leading `+`.
    ///
    /// Local numbers of nine or more digits get the default calling code,
    /// minus one leading zero. Only a single trunk zero is dropped: a number
    /// written with `00` keeps the second zero and is passed through as given
    /// rather than guessed at. Returns an empty string when there are no
    /// digits.
    pub fn dial_form(&self, raw: &str) -> String {
        let digits = digits_only(raw);
        if digits.is_empty() {
            return String::new();
        }
        if raw.trim_start().starts_with('+') {
            return format!("+{digits}");
        }
        if digits.len() >= LOCAL_SUBSCRIBER_DIGITS && !self.has_calling_code(&digits) {
            let local = digits.strip_prefix('0').unwrap_or(&digits);
            return format!("{}{}", self.default_code, local);
        }
        digits
    }

    /// Local display form with a leading `0`, for message text.
    pub fn display_form(&self, raw: &str) -> String {
        let digits = digits_only(raw);
        if digits.is_empty() || digits.starts_with('0') {
            return digits;
        }
        if let Some(local) = digits.strip_prefix(self.default_code.as_str()) {
            if !self.default_code.is_empty() && local.len() == LOCAL_SUBSCRIBER_DIGITS {
                return format!("0{local}");
            }
        }
        // Nine-digit mobiles (7xxxxxxxx) and anything else both read as local
        // once a zero is in front.
        format!("0{digits}")
    }
}

fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}
