//! Cycle state machine and trigger coalescing.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Phase of the reconciliation state machine
///
/// `Idle → Fetching → Diffing → Notifying → Idle`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleState {
    #[default]
    Idle,
    Fetching,
    Diffing,
    Notifying,
}

impl CycleState {
    fn to_u8(self) -> u8 {
        match self {
            CycleState::Idle => 0,
            CycleState::Fetching => 1,
            CycleState::Diffing => 2,
            CycleState::Notifying => 3,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => CycleState::Fetching,
            2 => CycleState::Diffing,
            3 => CycleState::Notifying,
            _ => CycleState::Idle,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CycleState::Idle => "idle",
            CycleState::Fetching => "fetching",
            CycleState::Diffing => "diffing",
            CycleState::Notifying => "notifying",
        }
    }
}

impl fmt::Display for CycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared trigger flag and state of one controller
///
/// Any number of triggers between two cycle starts collapse into a single
/// pending cycle. Handles are cheap to clone and can be moved to other
/// threads or into a delegate.
#[derive(Debug, Clone, Default)]
pub struct TriggerHandle {
    pending: Arc<AtomicBool>,
    state: Arc<AtomicU8>,
}

impl TriggerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a cycle
    ///
    /// Returns `false` when a cycle was already pending and this trigger was
    /// coalesced into it.
    pub fn trigger(&self) -> bool {
        !self.pending.swap(true, Ordering::AcqRel)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Current phase of the owning controller
    pub fn state(&self) -> CycleState {
        CycleState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Consume the pending trigger, if any
    pub(crate) fn take_pending(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    pub(crate) fn set_state(&self, state: CycleState) {
        self.state.store(state.to_u8(), Ordering::Release);
    }
}
