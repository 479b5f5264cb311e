//! SLA deadline derivation.
//!
//! The resolution window is a fixed per-priority offset. Deadlines are
//! re-derived from the instant a priority is set, so a post-submission
//! priority change restarts the window.

use chrono::{DateTime, Duration, Utc};

use crate::grievance::Priority;

/// Returns the expected resolution window for a priority.
#[must_use]
pub fn resolution_window(priority: Priority) -> Duration {
    let hours = match priority {
        Priority::Critical => 24,
        Priority::High => 48,
        Priority::Medium => 72,
        Priority::Low => 120,
    };

    Duration::hours(hours)
}

/// Returns the SLA deadline for a priority anchored at a reference instant.
#[must_use]
pub fn deadline(priority: Priority, reference: DateTime<Utc>) -> DateTime<Utc> {
    reference + resolution_window(priority)
}
