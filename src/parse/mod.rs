//! Row parsing for the two inbound shapes: query parameters and a
//! header-plus-one-line delimited blob.
//!
//! Both shapes normalize keys through [`crate::normalize::normalize_key`] so the
//! rest of the pipeline never sees raw header spellings.
use std::fmt;

mod delimited;
mod query;

pub use delimited::{decode_form_component, row_from_delimited};
pub use query::{
    decode_query, raw_csv_param, row_from_query, row_from_query_params, ParsedQuery, QueryRow,
};

/// Input that could not be turned into a row at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedInput {
    /// The delimited blob had no header line or no data line.
    InvalidDelimited,
    /// Neither a delimited blob nor any query parameters were supplied.
    NoData,
}

impl MalformedInput {
    pub fn as_str(&self) -> &'static str {
        match self {
            MalformedInput::InvalidDelimited => {
                "Invalid or incomplete CSV. Use header row and one data row."
            }
            MalformedInput::NoData => {
                "Missing data. Send ?csv=... or query params (e.g. NAME, PHONE, AGENT_PHONE)."
            }
        }
    }
}

impl fmt::Display for MalformedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for MalformedInput {}
