use std::collections::HashMap;

use crate::error::{MetadataError, Result};

#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Column names, exactly as they appear in the sheet's header row.
    pub headers: Vec<String>,
    /// Each data row, one optional text value per header. `None` is an empty cell.
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Fails on the first name in `columns` missing from the header row.
    pub fn require_columns(&self, columns: &[&str]) -> Result<()> {
        match columns.iter().find(|c| !self.has_column(c)) {
            Some(missing) => Err(MetadataError::Schema((*missing).to_string())),
            None => Ok(()),
        }
    }

    /// Turn each row into a name-keyed [`Record`]. When a header repeats, the
    /// right-most cell wins.
    pub fn into_records(self) -> Vec<Record> {
        let headers = self.headers;
        self.rows
            .into_iter()
            .map(|row| {
                let mut record = Record::default();
                for (name, value) in headers.iter().zip(row) {
                    record.insert(name.clone(), value);
                }
                record
            })
            .collect()
    }
}

/// One intermediate row keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: HashMap<String, Option<String>>,
}

impl Record {
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: Into<String>,
    {
        Self {
            fields: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Value of `column`, or `None` when the column is absent or the cell is empty.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).and_then(|v| v.as_deref())
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Option<String>) {
        self.fields.insert(column.into(), value);
    }

    pub fn take(&mut self, column: &str) -> Option<String> {
        self.fields.remove(column).flatten()
    }

    /// Move `from` to `to`, replacing anything already stored under `to`.
    /// A missing `from` leaves the record unchanged.
    pub fn rename(&mut self, from: &str, to: &str) {
        if let Some(value) = self.fields.remove(from) {
            self.fields.insert(to.to_string(), value);
        }
    }
}
