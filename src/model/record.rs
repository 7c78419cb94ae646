//! Header maps and the JSON-facing record types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Column index to header name, built from a sheet's first row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    names: BTreeMap<usize, String>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name `column`, replacing any earlier name for it.
    pub fn insert(&mut self, column: usize, name: impl Into<String>) {
        self.names.insert(column, name.into());
    }

    /// Header name of `column`.
    pub fn get(&self, column: usize) -> Option<&str> {
        self.names.get(&column).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entries in ascending column order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names.iter().map(|(col, name)| (*col, name.as_str()))
    }
}

/// One data row: header name to numeric value.
///
/// Keys serialize in lexicographic order so output is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, f64>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field; a repeated key keeps the last value.
    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.fields.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.set(key, value);
        }
        record
    }
}

/// All records of one sheet, in row order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordList {
    records: Vec<Record>,
}

impl RecordList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }
}

impl FromIterator<Record> for RecordList {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RecordList {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
