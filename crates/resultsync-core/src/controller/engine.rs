//! Reconciliation controller.
//!
//! ## Logging Ownership
//!
//! The controller owns lifecycle logging for cycles:
//! - a `reconcile_cycle` span carrying `controller` and `cycle_id`
//! - `log_op_start!` / `log_op_end!` / `log_op_error!` for the cycle and for
//!   its `fetch`, `diff` and `notify` phases
//!
//! The collections, snapshot and diff modules do not log.

use std::fmt::Display;
use std::time::Instant;

use chrono::{DateTime, Utc};
use resultsync_core_types::schema::{OP_DIFF, OP_FETCH, OP_NOTIFY, OP_RECONCILE_CYCLE};
use resultsync_core_types::CycleId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collections::ComparatorChain;
use crate::config::ControllerConfig;
use crate::controller::delegate::ResultsDelegate;
use crate::controller::state::{CycleState, TriggerHandle};
use crate::controller::store::ResultsStore;
use crate::diff::{compute_edit_script, ChangeCounts};
use crate::errors::{ExError, Result, ResultSyncError};
use crate::model::IndexPath;
use crate::snapshot::{SectionedSnapshot, SnapshotBuilder};
use crate::{log_op_end, log_op_error, log_op_start};

type StoreSnapshot<St> = SectionedSnapshot<
    <St as ResultsStore>::Object,
    <St as ResultsStore>::Section,
    <St as ResultsStore>::Content,
>;

/// Outcome of one completed reconciliation cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    pub cycle_id: CycleId,
    pub counts: ChangeCounts,
    /// Records dropped because their identity was already placed
    pub dropped_records: usize,
    /// Section count of the new snapshot
    pub sections: usize,
    /// Object count of the new snapshot
    pub objects: usize,
    pub duration_ms: u64,
    pub finished_at: DateTime<Utc>,
}

/// A drain that stopped on a failed cycle
///
/// `completed` holds the reports of the cycles that ran before the failure.
/// Their edits were already delivered to the delegate and their snapshots
/// committed.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{error} (after {} completed cycle(s))", .completed.len())]
pub struct DrainError {
    pub completed: Vec<CycleReport>,
    #[source]
    pub error: ResultSyncError,
}

/// Keeps a sectioned snapshot in sync with a store and reports the edits
///
/// A cycle fetches from the store, builds the new snapshot, diffs it against
/// the current one, drives the delegate through the edit script and only then
/// retires the old snapshot. Cycles never overlap: triggers raised while a
/// cycle runs (from a delegate callback, from the store, or from another
/// thread through a [`TriggerHandle`]) are coalesced into one follow-up
/// cycle, run by [`process_pending`](Self::process_pending).
///
/// # Example
///
/// ```
/// use resultsync_core::{
///     ControllerConfig, FetchedRecord, MemoryStore, RecordingDelegate, ResultsController,
/// };
///
/// let store = MemoryStore::new("inbox").with_records(vec![
///     FetchedRecord::new("a", "today", "Lunch"),
///     FetchedRecord::new("b", "today", "Gym"),
/// ]);
/// let recorder: RecordingDelegate<&str, &str> = RecordingDelegate::new();
/// let mut controller =
///     ResultsController::new(store, recorder.clone(), ControllerConfig::named("inbox"));
///
/// let reports = controller.perform_fetch().unwrap();
/// assert_eq!(reports[0].counts.sections_inserted, 1);
/// assert_eq!(controller.number_of_objects(0), 2);
/// ```
pub struct ResultsController<St: ResultsStore, D> {
    store: St,
    delegate: D,
    config: ControllerConfig,
    section_order: Option<ComparatorChain<St::Section>>,
    snapshot: StoreSnapshot<St>,
    trigger: TriggerHandle,
    cycles_completed: u64,
}

impl<St, D> ResultsController<St, D>
where
    St: ResultsStore,
    D: ResultsDelegate<St::Object, St::Section>,
{
    pub fn new(store: St, delegate: D, config: ControllerConfig) -> Self {
        Self {
            store,
            delegate,
            config,
            section_order: None,
            snapshot: SectionedSnapshot::new(),
            trigger: TriggerHandle::new(),
            cycles_completed: 0,
        }
    }

    /// Arrange sections of every future snapshot with `chain`
    pub fn with_section_order(mut self, chain: ComparatorChain<St::Section>) -> Self {
        self.section_order = Some(chain);
        self
    }

    /// Handle for requesting cycles, shareable with other threads
    pub fn trigger_handle(&self) -> TriggerHandle {
        self.trigger.clone()
    }

    /// Request a cycle and run it, plus any follow-up it provoked
    ///
    /// # Errors
    ///
    /// Returns a [`DrainError`] wrapping [`ResultSyncError::FetchFailed`] if
    /// the store fails; the failed cycle emits no notification and keeps the
    /// current snapshot.
    pub fn perform_fetch(&mut self) -> std::result::Result<Vec<CycleReport>, DrainError> {
        self.trigger.trigger();
        self.process_pending()
    }

    /// Run cycles while a trigger is pending
    ///
    /// At most `max_cycles_per_drain` cycles run per call; a trigger still
    /// pending after that stays pending for the next call.
    ///
    /// # Errors
    ///
    /// Returns the first cycle failure together with the reports of the
    /// cycles that completed before it. The trigger that started the failed
    /// cycle is left pending so a later call retries it.
    pub fn process_pending(&mut self) -> std::result::Result<Vec<CycleReport>, DrainError> {
        let mut reports = Vec::new();
        while reports.len() < self.config.max_cycles_per_drain && self.trigger.take_pending() {
            match self.run_cycle() {
                Ok(report) => reports.push(report),
                Err(error) => {
                    self.trigger.trigger();
                    return Err(DrainError {
                        completed: reports,
                        error,
                    });
                }
            }
        }
        if self.trigger.is_pending() {
            tracing::debug!(
                controller = %self.config.name,
                max_cycles_per_drain = self.config.max_cycles_per_drain,
                "cycle bound reached with a trigger still pending"
            );
        }
        Ok(reports)
    }

    fn run_cycle(&mut self) -> Result<CycleReport> {
        let cycle_id = CycleId::new();
        let span = tracing::info_span!(
            "reconcile_cycle",
            controller = %self.config.name,
            cycle_id = %cycle_id
        );
        let _entered = span.enter();

        log_op_start!(OP_RECONCILE_CYCLE, cycle = self.cycles_completed + 1);
        let start = Instant::now();

        let result = self.run_cycle_impl(&cycle_id, start);
        self.trigger.set_state(CycleState::Idle);

        match result {
            Ok(report) => {
                log_op_end!(
                    OP_RECONCILE_CYCLE,
                    duration_ms = report.duration_ms,
                    section_edits = report.counts.section_edits(),
                    object_edits = report.counts.object_edits()
                );
                Ok(report)
            }
            Err(err) => {
                let ex_err = ExError::from(err.clone())
                    .with_op(OP_RECONCILE_CYCLE)
                    .with_cycle_id(cycle_id);
                log_op_error!(
                    OP_RECONCILE_CYCLE,
                    ex_err,
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }

    fn run_cycle_impl(&mut self, cycle_id: &CycleId, start: Instant) -> Result<CycleReport> {
        // fetch
        self.trigger.set_state(CycleState::Fetching);
        log_op_start!(OP_FETCH, store = self.store.name());
        let fetch_start = Instant::now();
        let records = self.store.fetch().map_err(|e| {
            let err = ResultSyncError::FetchFailed {
                store: self.store.name().to_string(),
                message: e.to_string(),
            };
            let ex_err = ExError::from(err.clone())
                .with_op(OP_FETCH)
                .with_cycle_id(cycle_id.clone());
            log_op_error!(
                OP_FETCH,
                ex_err,
                duration_ms = fetch_start.elapsed().as_millis() as u64
            );
            err
        })?;
        log_op_end!(
            OP_FETCH,
            duration_ms = fetch_start.elapsed().as_millis() as u64,
            record_count = records.len()
        );

        // diff
        self.trigger.set_state(CycleState::Diffing);
        log_op_start!(OP_DIFF, record_count = records.len());
        let diff_start = Instant::now();
        let mut builder = SnapshotBuilder::new();
        if let Some(chain) = &self.section_order {
            builder = builder.with_section_order(chain.clone());
        }
        builder.extend(records);
        let build = builder.finish();
        if !build.dropped.is_empty() {
            tracing::warn!(
                dropped_records = build.dropped.len(),
                dropped = ?build.dropped,
                "dropped records whose identity was already placed"
            );
        }
        let script = compute_edit_script(&self.snapshot, &build.snapshot, &build.changed);
        log_op_end!(
            OP_DIFF,
            duration_ms = diff_start.elapsed().as_millis() as u64,
            section_count = build.snapshot.section_count(),
            object_count = build.snapshot.object_count(),
            section_edits = script.counts.section_edits(),
            object_edits = script.counts.object_edits()
        );

        // notify
        self.trigger.set_state(CycleState::Notifying);
        let notify_start = Instant::now();
        log_op_start!(OP_NOTIFY, notifications = script.len());
        script.emit(&mut self.delegate);
        log_op_end!(
            OP_NOTIFY,
            duration_ms = notify_start.elapsed().as_millis() as u64
        );

        // retire the old snapshot only after every notification fired
        self.snapshot = build.snapshot;
        self.cycles_completed += 1;

        Ok(CycleReport {
            cycle_id: cycle_id.clone(),
            counts: script.counts,
            dropped_records: build.dropped.len(),
            sections: self.snapshot.section_count(),
            objects: self.snapshot.object_count(),
            duration_ms: start.elapsed().as_millis() as u64,
            finished_at: Utc::now(),
        })
    }

    pub fn state(&self) -> CycleState {
        self.trigger.state()
    }

    pub fn cycles_completed(&self) -> u64 {
        self.cycles_completed
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &StoreSnapshot<St> {
        &self.snapshot
    }

    pub fn number_of_sections(&self) -> usize {
        self.snapshot.section_count()
    }

    /// Objects in the section at `section`, zero if there is none
    pub fn number_of_objects(&self, section: usize) -> usize {
        self.snapshot.object_count_in(section)
    }

    pub fn section_at(&self, section: usize) -> Option<&St::Section> {
        self.snapshot.section_at(section)
    }

    pub fn object_at(&self, index_path: IndexPath) -> Option<&St::Object> {
        self.snapshot.object_at(index_path)
    }

    pub fn content_at(&self, index_path: IndexPath) -> Option<&St::Content> {
        self.snapshot.content_at(index_path)
    }

    pub fn content_of(&self, object: &St::Object) -> Option<&St::Content> {
        self.snapshot.content_of(object)
    }

    pub fn index_path_of(&self, object: &St::Object) -> Option<IndexPath> {
        self.snapshot.index_path_of(object)
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    /// Mutable store access; changing its data does not trigger a cycle
    pub fn store_mut(&mut self) -> &mut St {
        &mut self.store
    }

    pub fn into_parts(self) -> (St, D, StoreSnapshot<St>) {
        (self.store, self.delegate, self.snapshot)
    }
}

impl<St, D> ResultsController<St, D>
where
    St: ResultsStore,
    St::Section: Display,
    D: ResultsDelegate<St::Object, St::Section>,
{
    /// Display name of the section at `section`
    pub fn section_name(&self, section: usize) -> Option<String> {
        self.section_at(section).map(ToString::to_string)
    }
}
