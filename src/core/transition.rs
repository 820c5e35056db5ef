// Pure status-transition function for jobs.
//
// Purpose
// - Apply a status change to a job in memory: stamp the target status, clear
//   every stamp strictly later in the order, recompute `is_delivered`.
// - Never perform input or output.
//
// Rules
// - Any status may follow any other; the engine is a corrective tool, not a
//   strict workflow enforcer. Moving backward clears downstream stamps so no
//   stale future-dated timestamps survive a correction.
// - Re-entering a status restamps it (a stamp records the most recent entry).
// - Entering Delivered clears `payment_recorded_at`.
// - `set_delivered_at` supports the deliver-with-auto-pay composite: jumping
//   straight to Paid while stamping `delivered_at` at the same instant and
//   clearing any `payment_recorded_at` bookkeeping. The stamp belongs to the
//   ledger-side promotion only.

use crate::core::job::{Job, JobStatus};

pub fn apply_status_change(job: &mut Job, new_status: JobStatus, now_ms: i64, set_delivered_at: bool) {
    let order = new_status.order();
    if order < JobStatus::Paid.order() {
        job.paid_at = None;
    }
    if order < JobStatus::Delivered.order() {
        job.delivered_at = None;
    }
    if order < JobStatus::Ongoing.order() {
        job.ongoing_at = None;
    }

    match new_status {
        JobStatus::Pending => job.pending_at = Some(now_ms),
        JobStatus::Ongoing => job.ongoing_at = Some(now_ms),
        JobStatus::Delivered => job.delivered_at = Some(now_ms),
        JobStatus::Paid => job.paid_at = Some(now_ms),
    }
    if set_delivered_at && new_status == JobStatus::Paid {
        job.delivered_at = Some(now_ms);
        job.payment_recorded_at = None;
    }
    if new_status == JobStatus::Delivered {
        job.payment_recorded_at = None;
    }

    job.is_delivered = new_status.delivers();
    job.status = new_status;
}
