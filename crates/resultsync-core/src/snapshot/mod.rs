//! Sectioned snapshots of a result set.
//!
//! A [`SectionedSnapshot`] is the immutable-for-the-cycle view the controller
//! diffs against. Snapshots are assembled from store records by a
//! [`SnapshotBuilder`], which drops malformed duplicates (first occurrence
//! wins) before anything is diffed.

pub mod builder;
pub mod sectioned;

pub use builder::{PushOutcome, SnapshotBuild, SnapshotBuilder};
pub use sectioned::SectionedSnapshot;
