//! Delegate protocol for consumers of reconciliation cycles.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::model::ChangeType;

/// Receives the edits of one reconciliation cycle, in order
///
/// Every cycle calls [`will_change_content`](Self::will_change_content) first
/// and [`did_change_content`](Self::did_change_content) last. In between come
/// section deletes (descending old ordinal), section inserts (ascending new
/// ordinal), section moves, then object deletes, inserts, moves and updates.
/// Delete positions and move sources refer to the layout before the cycle;
/// insert positions, move destinations and update targets to the layout after.
///
/// Callbacks cannot reach back into the controller; a consumer that wants
/// another cycle holds a [`TriggerHandle`](crate::TriggerHandle) and triggers
/// it, which queues the cycle instead of running it inline.
pub trait ResultsDelegate<O, S> {
    fn will_change_content(&mut self) {}

    fn did_change_section(&mut self, section: &S, change: ChangeType);

    fn did_change_object(&mut self, object: &O, change: ChangeType);

    fn did_change_content(&mut self) {}
}

/// Ignores every notification
impl<O, S> ResultsDelegate<O, S> for () {
    fn did_change_section(&mut self, _section: &S, _change: ChangeType) {}

    fn did_change_object(&mut self, _object: &O, _change: ChangeType) {}
}

impl<O, S, D> ResultsDelegate<O, S> for Box<D>
where
    D: ResultsDelegate<O, S> + ?Sized,
{
    fn will_change_content(&mut self) {
        (**self).will_change_content();
    }

    fn did_change_section(&mut self, section: &S, change: ChangeType) {
        (**self).did_change_section(section, change);
    }

    fn did_change_object(&mut self, object: &O, change: ChangeType) {
        (**self).did_change_object(object, change);
    }

    fn did_change_content(&mut self) {
        (**self).did_change_content();
    }
}

/// One recorded delegate callback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "callback", rename_all = "snake_case")]
pub enum DelegateEvent<O, S> {
    WillChangeContent,
    Section { section: S, change: ChangeType },
    Object { object: O, change: ChangeType },
    DidChangeContent,
}

/// Delegate that records every callback
///
/// Clones share the same log, so a test can keep one handle while the
/// controller owns another.
#[derive(Debug)]
pub struct RecordingDelegate<O, S> {
    events: Arc<Mutex<Vec<DelegateEvent<O, S>>>>,
}

impl<O, S> Clone for RecordingDelegate<O, S> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

impl<O, S> Default for RecordingDelegate<O, S> {
    fn default() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<O: Clone, S: Clone> RecordingDelegate<O, S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// All callbacks recorded so far
    pub fn events(&self) -> Vec<DelegateEvent<O, S>> {
        self.log().clone()
    }

    /// Recorded callbacks, leaving the log empty
    pub fn take(&self) -> Vec<DelegateEvent<O, S>> {
        std::mem::take(&mut *self.log())
    }

    pub fn clear(&self) {
        self.log().clear();
    }

    /// Recorded object callbacks only
    pub fn object_changes(&self) -> Vec<(O, ChangeType)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                DelegateEvent::Object { object, change } => Some((object, change)),
                _ => None,
            })
            .collect()
    }

    /// Recorded section callbacks only
    pub fn section_changes(&self) -> Vec<(S, ChangeType)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                DelegateEvent::Section { section, change } => Some((section, change)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: DelegateEvent<O, S>) {
        self.log().push(event);
    }

    /// The shared log; a panic in another holder does not discard it
    fn log(&self) -> MutexGuard<'_, Vec<DelegateEvent<O, S>>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<O: Clone, S: Clone> ResultsDelegate<O, S> for RecordingDelegate<O, S> {
    fn will_change_content(&mut self) {
        self.record(DelegateEvent::WillChangeContent);
    }

    fn did_change_section(&mut self, section: &S, change: ChangeType) {
        self.record(DelegateEvent::Section {
            section: section.clone(),
            change,
        });
    }

    fn did_change_object(&mut self, object: &O, change: ChangeType) {
        self.record(DelegateEvent::Object {
            object: object.clone(),
            change,
        });
    }

    fn did_change_content(&mut self) {
        self.record(DelegateEvent::DidChangeContent);
    }
}
