//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_CYCLE_ID: &str = "cycle_id";
pub const FIELD_CONTROLLER: &str = "controller";

// Snapshot sizes
pub const FIELD_SECTION_COUNT: &str = "section_count";
pub const FIELD_OBJECT_COUNT: &str = "object_count";
pub const FIELD_DROPPED_RECORDS: &str = "dropped_records";

// Edit counts
pub const FIELD_SECTION_EDITS: &str = "section_edits";
pub const FIELD_OBJECT_EDITS: &str = "object_edits";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";
pub const FIELD_ERR_MESSAGE: &str = "err.message";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Canonical operation names
pub const OP_RECONCILE_CYCLE: &str = "reconcile_cycle";
pub const OP_FETCH: &str = "fetch";
pub const OP_DIFF: &str = "diff";
pub const OP_NOTIFY: &str = "notify";
