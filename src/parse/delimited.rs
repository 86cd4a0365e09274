use crate::row::Row;
use url::form_urlencoded;

/// Percent-decode a single form component, turning `+` into a space.
///
/// The pair separators are escaped first so the whole input decodes as one
/// component even when it carries a literal `=` or `&`.
pub fn decode_form_component(raw: &str) -> String {
    let escaped = raw.replace('&', "%26").replace('=', "%3D");
    form_urlencoded::parse(escaped.as_bytes())
        .next()
        .map(|(name, _)| name.into_owned())
        .unwrap_or_default()
}

/// Parse a header line plus one data line into a row.
///
/// The blob is URL-decoded, line endings are unified, and blank lines are
/// dropped. A header line containing `|` selects the pipe format; anything
/// else is read as standard quoted CSV. Returns `None` when there is no
/// header or no data line.
pub fn row_from_delimited(text: &str) -> Option<Row> {
    let decoded = decode_form_component(text.trim());
    if decoded.is_empty() {
        return None;
    }
    let decoded = decoded.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = decoded
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.len() < 2 {
        tracing::debug!(lines = lines.len(), "delimited input has no data line");
        return None;
    }

    if lines[0].contains('|') {
        return Some(row_from_pipe_lines(lines[0], lines[1]));
    }
    row_from_csv_text(&decoded)
}

fn row_from_pipe_lines(header_line: &str, value_line: &str) -> Row {
    let headers: Vec<&str> = header_line.split('|').map(str::trim).collect();
    let mut values: Vec<&str> = value_line.split('|').map(str::trim).collect();
    let value_count = values.len();
    // Sheet joins drop trailing empty cells; pad (or cut) to the header width.
    values.resize(headers.len(), "");

    tracing::debug!(
        header_count = headers.len(),
        value_count,
        "parsed pipe-delimited row"
    );

    let mut row = Row::new();
    for (header, value) in headers.iter().zip(values) {
        if header.is_empty() {
            continue;
        }
        row.insert(header, value);
    }
    row
}

fn row_from_csv_text(text: &str) -> Option<Row> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader
        .records()
        .map_while(Result::ok)
        .filter(|record| !is_blank_record(record));
    let headers = records.next()?;
    let values = records.next()?;

    tracing::debug!(
        header_count = headers.len(),
        value_count = values.len(),
        "parsed comma-delimited row"
    );

    let mut row = Row::new();
    for (idx, header) in headers.iter().enumerate() {
        row.insert(header, values.get(idx).unwrap_or(""));
    }
    Some(row)
}

fn is_blank_record(record: &csv::StringRecord) -> bool {
    record.len() <= 1 && record.get(0).unwrap_or("").trim().is_empty()
}

#[cfg(test)]
#[path = "delimited_tests.rs"]
mod tests;
