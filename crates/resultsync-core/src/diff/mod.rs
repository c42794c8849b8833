//! Snapshot reconciliation diff.
//!
//! Compares an old and a new [`SectionedSnapshot`](crate::SectionedSnapshot)
//! and produces an [`EditScript`]: section and object changes ordered so a
//! list renderer can apply them as one batch.
//!
//! ## Entry point
//!
//! ```
//! use std::collections::HashSet;
//! use resultsync_core::{compute_edit_script, FetchedRecord, SnapshotBuilder};
//!
//! let mut old = SnapshotBuilder::new();
//! old.extend([FetchedRecord::new("a", "s", ()), FetchedRecord::new("b", "s", ())]);
//! let mut new = SnapshotBuilder::new();
//! new.extend([FetchedRecord::new("b", "s", ())]);
//!
//! let script = compute_edit_script(
//!     &old.finish().snapshot,
//!     &new.finish().snapshot,
//!     &HashSet::new(),
//! );
//! assert_eq!(script.counts.objects_deleted, 1);
//! ```
//!
//! ## Emission order
//!
//! Section deletes (descending old ordinal), section inserts (ascending new
//! ordinal), section moves, then object deletes (descending old path), object
//! inserts (ascending new path), object moves, object updates.

pub mod engine;
pub mod human_summary;
pub mod model;
pub mod replay;

pub use engine::compute_edit_script;
pub use human_summary::render_human_summary;
pub use model::{ChangeCounts, EditScript, ObjectChange, SectionChange};
pub use replay::{replay, verify_replay};
