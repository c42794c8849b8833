//! In-memory store for tests and embedding.

use std::fmt::Debug;
use std::hash::Hash;

use thiserror::Error;

use crate::controller::store::ResultsStore;
use crate::model::FetchedRecord;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryStoreError {
    /// A failure armed with [`MemoryStore::fail_next`]
    #[error("injected failure: {0}")]
    Injected(String),
}

/// Store serving a record list held in memory
///
/// Every fetch returns a copy of the current records. Change flags are
/// cleared after each successful fetch, so a record reported as changed is
/// reported once.
#[derive(Debug, Clone)]
pub struct MemoryStore<O, S, C> {
    name: String,
    records: Vec<FetchedRecord<O, S, C>>,
    fail_next: Option<String>,
    fetch_count: usize,
}

impl<O, S, C> MemoryStore<O, S, C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
            fail_next: None,
            fetch_count: 0,
        }
    }

    pub fn with_records(mut self, records: Vec<FetchedRecord<O, S, C>>) -> Self {
        self.records = records;
        self
    }

    /// Replace the whole result set
    pub fn set_records(&mut self, records: Vec<FetchedRecord<O, S, C>>) {
        self.records = records;
    }

    pub fn push(&mut self, record: FetchedRecord<O, S, C>) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[FetchedRecord<O, S, C>] {
        &self.records
    }

    /// Make the next fetch fail with `message`
    pub fn fail_next(&mut self, message: impl Into<String>) {
        self.fail_next = Some(message.into());
    }

    /// Number of fetch attempts, failed ones included
    pub fn fetch_count(&self) -> usize {
        self.fetch_count
    }
}

impl<O, S, C> ResultsStore for MemoryStore<O, S, C>
where
    O: Hash + Eq + Clone + Debug,
    S: Hash + Eq + Clone + Debug,
    C: Clone,
{
    type Object = O;
    type Section = S;
    type Content = C;
    type Error = MemoryStoreError;

    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&mut self) -> Result<Vec<FetchedRecord<O, S, C>>, MemoryStoreError> {
        self.fetch_count += 1;
        if let Some(message) = self.fail_next.take() {
            return Err(MemoryStoreError::Injected(message));
        }
        let records = self.records.clone();
        for record in &mut self.records {
            record.changed = false;
        }
        Ok(records)
    }
}
