//! Rows ingested from a CSV export, keyed by 1-based sheet row index.
//!
//! A store is built once per ingestion and read-only afterwards; loading a
//! new file produces a new store that replaces the old one.
use crate::resolve;
use crate::row::Row;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowStore {
    rows: BTreeMap<usize, Row>,
}

impl RowStore {
    /// Parse CSV text: the first record is the header, each following
    /// record becomes row 1, 2, ...
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD rather than
    /// failing the load. Blank lines are not records, so indices count data
    /// records and do not track sheet line numbers across empty lines.
    pub fn ingest_csv<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut records = reader.byte_records();

        let Some(headers) = records.next() else {
            return Ok(Self::default());
        };
        let headers = lossy_fields(&headers.context("read CSV header row")?);

        let mut rows = BTreeMap::new();
        for (idx, record) in records.enumerate() {
            let row_index = idx + 1;
            let record = record.with_context(|| format!("read CSV row {row_index}"))?;
            let values = lossy_fields(&record);
            let mut row = Row::new();
            for (col, header) in headers.iter().enumerate() {
                row.insert(header, values.get(col).map(String::as_str).unwrap_or(""));
            }
            rows.insert(row_index, row);
        }
        tracing::info!(rows = rows.len(), "ingested CSV rows");
        Ok(Self { rows })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
        Self::ingest_csv(file).with_context(|| format!("ingest {}", path.display()))
    }

    pub fn get(&self, row_index: usize) -> Option<&Row> {
        self.rows.get(&row_index)
    }

    /// First row whose order number matches `order_number` after trimming.
    pub fn find_by_order_number(&self, order_number: &str) -> Option<(usize, &Row)> {
        let wanted = order_number.trim();
        if wanted.is_empty() {
            return None;
        }
        self.rows
            .iter()
            .find(|(_, row)| resolve::ORDER_NUMBER.resolve(row) == wanted)
            .map(|(idx, row)| (*idx, row))
    }

    pub fn ids(&self) -> Vec<usize> {
        self.rows.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Row)> {
        self.rows.iter().map(|(idx, row)| (*idx, row))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn lossy_fields(record: &csv::ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "ORDER NUMBER,Name,Agent_Phone,City\n\
                         OD1,Asha,255700000001,Dar\n\
                         OD2,\"Juma, K\",255700000002\n\
                         OD1,Duplicate,255700000003,Arusha\n";

    #[test]
    fn rows_are_keyed_from_one() {
        let store = RowStore::ingest_csv(SHEET.as_bytes()).expect("ingest");
        assert_eq!(store.len(), 3);
        assert_eq!(store.ids(), vec![1, 2, 3]);
        assert!(store.get(0).is_none());
        let row = store.get(2).expect("row 2");
        assert_eq!(row.get("name"), Some("Juma, K"));
        assert_eq!(row.get("agent phone"), Some("255700000002"));
        assert_eq!(row.get("city"), Some(""));
    }

    #[test]
    fn order_number_lookup_returns_first_match() {
        let store = RowStore::ingest_csv(SHEET.as_bytes()).expect("ingest");
        let (idx, row) = store.find_by_order_number(" OD1 ").expect("OD1");
        assert_eq!(idx, 1);
        assert_eq!(row.get("name"), Some("Asha"));
        assert!(store.find_by_order_number("OD9").is_none());
        assert!(store.find_by_order_number("  ").is_none());
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let store = RowStore::ingest_csv(&b"NAME,CITY\nAsha,Dar\nCaf\xe9,Arusha\n"[..])
            .expect("ingest latin-1 row");
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).and_then(|row| row.get("name")), Some("Asha"));
        assert_eq!(
            store.get(2).and_then(|row| row.get("name")),
            Some("Caf\u{fffd}")
        );
        assert_eq!(store.get(2).and_then(|row| row.get("city")), Some("Arusha"));
    }

    #[test]
    fn blank_lines_do_not_take_an_index() {
        let store = RowStore::ingest_csv("NAME\nA\n\nB\n".as_bytes()).expect("ingest");
        assert_eq!(store.ids(), vec![1, 2]);
        assert_eq!(store.get(2).and_then(|row| row.get("name")), Some("B"));
    }

    #[test]
    fn empty_input_is_an_empty_store() {
        let store = RowStore::ingest_csv("".as_bytes()).expect("ingest");
        assert!(store.is_empty());

        let store = RowStore::ingest_csv("NAME,CITY\n".as_bytes()).expect("ingest");
        assert!(store.is_empty());
    }

    #[test]
    fn loading_a_new_file_replaces_the_store() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let first = dir.path().join("first.csv");
        let second = dir.path().join("second.csv");
        std::fs::write(&first, SHEET).expect("write first");
        std::fs::write(&second, "name\nOnly\n").expect("write second");

        let mut store = RowStore::from_path(&first).expect("load first");
        assert_eq!(store.len(), 3);
        store = RowStore::from_path(&second).expect("load second");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).and_then(|row| row.get("name")), Some("Only"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = RowStore::from_path(&dir.path().join("absent.csv")).expect_err("missing");
        assert!(err.to_string().contains("absent.csv"));
    }
}
