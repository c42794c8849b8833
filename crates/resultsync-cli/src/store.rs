//! Record-file store
//!
//! A record file is a JSON array of
//! `{"object": "...", "section": "...", "content": <any>, "changed": bool}`
//! rows in display order; `changed` may be omitted.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use resultsync_core::{FetchedRecord, ResultsStore};
use serde_json::Value;
use thiserror::Error;

pub type Record = FetchedRecord<String, String, Value>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("no record files left")]
    Exhausted,
}

/// Read and parse one record file
pub fn read_records(path: &Path) -> Result<Vec<Record>, StoreError> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Store serving one record file per fetch, in the order given
pub struct JsonFileStore {
    name: String,
    files: VecDeque<PathBuf>,
}

impl JsonFileStore {
    pub fn new(files: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            name: "json-files".to_string(),
            files: files.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.files.len()
    }
}

impl ResultsStore for JsonFileStore {
    type Object = String;
    type Section = String;
    type Content = Value;
    type Error = StoreError;

    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&mut self) -> Result<Vec<Record>, StoreError> {
        let path = self.files.pop_front().ok_or(StoreError::Exhausted)?;
        read_records(&path)
    }
}
