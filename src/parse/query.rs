use super::delimited::row_from_delimited;
use super::MalformedInput;
use crate::normalize::normalize_key;
use crate::row::Row;
use url::form_urlencoded;

const DEBUG_KEY: &str = "debug";
const CSV_KEY: &str = "csv";

/// Row built from query parameters plus the extracted debug switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRow {
    pub row: Row,
    pub debug: bool,
}

/// Outcome of reading a whole raw query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub debug: bool,
    pub row: Result<Row, MalformedInput>,
}

/// Build a row from already-decoded key/value pairs.
///
/// The `debug` key (any casing) is pulled out and never reaches the row.
pub fn row_from_query_params<I, K, V>(params: I) -> QueryRow
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut row = Row::new();
    let mut debug = false;
    for (key, value) in params {
        let (key, value) = (key.as_ref(), value.as_ref());
        if normalize_key(key) == DEBUG_KEY {
            debug = is_truthy(value);
            continue;
        }
        row.insert(key, value);
    }
    QueryRow { row, debug }
}

/// Decode a raw query string into ordered key/value pairs.
pub fn decode_query(raw_query: &str) -> Vec<(String, String)> {
    let raw_query = raw_query.strip_prefix('?').unwrap_or(raw_query);
    form_urlencoded::parse(raw_query.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

/// The still-encoded `csv` parameter of a raw query string.
///
/// Taken from the raw text rather than the decoded pairs so encoded newlines
/// reach the delimited parser intact.
pub fn raw_csv_param(raw_query: &str) -> Option<&str> {
    let raw_query = raw_query.strip_prefix('?').unwrap_or(raw_query);
    raw_query
        .split('&')
        .find_map(|segment| segment.strip_prefix("csv="))
        .filter(|value| !value.is_empty())
}

/// Turn a raw query string into a row.
///
/// A non-empty `csv` parameter wins and is parsed as a delimited blob; other
/// parameters are then ignored. Without it, every parameter except `debug`
/// and `csv` becomes a row field.
pub fn row_from_query(raw_query: &str) -> ParsedQuery {
    let params = decode_query(raw_query);
    let debug = params
        .iter()
        .find(|(key, _)| normalize_key(key) == DEBUG_KEY)
        .is_some_and(|(_, value)| is_truthy(value));

    if let Some(blob) = raw_csv_param(raw_query) {
        let row = row_from_delimited(blob).ok_or(MalformedInput::InvalidDelimited);
        return ParsedQuery { debug, row };
    }

    let fields: Vec<(String, String)> = params
        .into_iter()
        .filter(|(key, _)| {
            let key = normalize_key(key);
            key != DEBUG_KEY && key != CSV_KEY
        })
        .collect();
    if fields.is_empty() {
        return ParsedQuery {
            debug,
            row: Err(MalformedInput::NoData),
        };
    }
    ParsedQuery {
        debug,
        row: Ok(row_from_query_params(fields).row),
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
