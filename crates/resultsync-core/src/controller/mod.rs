//! Reconciliation controller and its collaborators.
//!
//! [`ResultsController`] owns the current snapshot and runs reconciliation
//! cycles: fetch from a [`ResultsStore`], build the new snapshot, diff, drive
//! a [`ResultsDelegate`], and retire the old snapshot.

pub mod delegate;
pub mod engine;
pub mod memory_store;
pub mod state;
pub mod store;

pub use delegate::{DelegateEvent, RecordingDelegate, ResultsDelegate};
pub use engine::{CycleReport, DrainError, ResultsController};
pub use memory_store::{MemoryStore, MemoryStoreError};
pub use state::{CycleState, TriggerHandle};
pub use store::ResultsStore;
