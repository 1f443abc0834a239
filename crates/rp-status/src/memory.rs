//! In-memory stepped tables.
//!
//! # CSV format
//!
//! One row per record, headers named after the record's serialised fields:
//!
//! ```csv
//! step,id,level
//! 0,7,2
//! 0,8,4
//! 5,7,3
//! ```

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use log::debug;
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;

use crate::{StatusError, StatusResult, StepQuery, StepRecord, StepSource};

/// Stepped tables held in memory, keyed by table name.
#[derive(Clone, Debug)]
pub struct MemoryStepSource<T> {
    tables:  HashMap<String, Vec<T>>,
    offline: Option<String>,
}

impl<T> Default for MemoryStepSource<T> {
    fn default() -> Self {
        Self { tables: HashMap::new(), offline: None }
    }
}

impl<T: StepRecord> MemoryStepSource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append rows to `table`, creating it if needed.
    pub fn extend(&mut self, table: &str, rows: impl IntoIterator<Item = T>) {
        self.tables.entry(table.to_owned()).or_default().extend(rows);
    }

    /// Make every subsequent query fail with [`StatusError::Query`].
    pub fn set_offline(&mut self, reason: impl Into<String>) {
        self.offline = Some(reason.into());
    }

    pub fn table_len(&self, table: &str) -> usize {
        self.tables.get(table).map_or(0, Vec::len)
    }
}

impl<T: StepRecord + DeserializeOwned> MemoryStepSource<T> {
    /// Append the rows of a CSV file to `table`.  Returns the number of rows
    /// read.
    pub fn load_csv(&mut self, table: &str, path: &Path) -> StatusResult<usize> {
        let file = std::fs::File::open(path).map_err(StatusError::Io)?;
        self.load_csv_reader(table, file)
    }

    /// Like [`load_csv`](Self::load_csv) but accepts any `Read` source.
    pub fn load_csv_reader<R: Read>(&mut self, table: &str, reader: R) -> StatusResult<usize> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let rows = csv_reader
            .deserialize::<T>()
            .collect::<Result<Vec<T>, _>>()
            .map_err(|e| StatusError::Parse(e.to_string()))?;
        let n = rows.len();
        self.extend(table, rows);
        debug!("loaded {n} row(s) into {table:?}");
        Ok(n)
    }
}

impl<T: StepRecord> StepSource<T> for MemoryStepSource<T> {
    fn query_with_step(&self, table: &str, query: &StepQuery) -> StatusResult<Vec<T>> {
        if let Some(reason) = &self.offline {
            return Err(StatusError::Query(reason.clone()));
        }
        query.validate()?;
        let Some(rows) = self.tables.get(table) else {
            debug!("table {table:?} not found, returning no rows");
            return Ok(Vec::new());
        };

        let mut by_step: FxHashMap<i64, Vec<&T>> = FxHashMap::default();
        for row in rows.iter().filter(|r| query.admits(*r)) {
            by_step.entry(row.step()).or_default().push(row);
        }

        let mut out = Vec::new();
        for step in query.requested_steps() {
            if let Some(recorded) = by_step.get(&query.recorded_step(step)) {
                out.extend(recorded.iter().map(|r| r.with_step(step)));
            }
        }
        Ok(out)
    }
}
