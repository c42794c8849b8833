//! resultsync Core - reconciliation kernel for sectioned result lists
//!
//! This crate turns "previous snapshot" + "freshly fetched snapshot" into
//! an ordered script of section and object edits that a list renderer can
//! apply incrementally. It provides:
//! - Bidirectional index structures (`BiMap`, `OrderedUniqueList`)
//! - Per-cycle change accumulation (`ChangeSet`)
//! - Sectioned snapshots built defensively from store output
//! - A pure diff producing an `EditScript`, plus batch replay and summaries
//! - The `ResultsController` state machine driving a delegate protocol
//! - Error, logging and configuration facilities

pub mod change_set;
pub mod collections;
pub mod config;
pub mod controller;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod snapshot;

// Re-export commonly used types
pub use change_set::ChangeSet;
pub use collections::{BiMap, ComparatorChain, OrderedUniqueList};
pub use config::{ControllerConfig, LogConfig, Verbosity};
pub use controller::{
    CycleReport, CycleState, DelegateEvent, DrainError, MemoryStore, MemoryStoreError,
    RecordingDelegate, ResultsController, ResultsDelegate, ResultsStore, TriggerHandle,
};
pub use diff::{compute_edit_script, render_human_summary, verify_replay, ChangeCounts, EditScript};
pub use errors::{ExError, ExErrorKind, Result, ResultSyncError};
pub use model::{ChangeType, FetchedRecord, IndexPath};
pub use snapshot::{SectionedSnapshot, SnapshotBuilder};

// Schema constants used by the logging macros
pub use resultsync_core_types::schema;
