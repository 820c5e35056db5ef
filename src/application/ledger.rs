// Payment ledger engine.
//
// Purpose
// - Append and remove payment records against a job, derive paid/remaining
//   totals, and keep the owning job's status reconciled with the ledger.
//
// Reconciliation rules
// - Adding a payment never over-fills a job: the overpayment check rejects an
//   amount beyond the remaining balance before any record is written.
// - A job auto-promotes to Paid only when the ledger reaches the full amount
//   AND the job is already Delivered. Full nominal payment while still
//   Pending or Ongoing is deliberately left alone.
// - Removing a record auto-demotes a Paid job back to Delivered when the
//   remaining ledger no longer covers the amount. No other status is touched.
// - Totals are always recomputed from the record collection, never cached, so
//   a crash between the two writes of add-payment self-heals on next read.

use std::sync::Arc;

use uuid::Uuid;

use crate::application::errors::{KhataError, map_not_found};
use crate::application::lifecycle::now_ms;
use crate::core::job::{Job, JobStatus};
use crate::core::payment_record::{PaymentDraft, PaymentRecord};
use crate::core::ports::{JobStore, PaymentRecordStore, StoreError};
use crate::core::transition::apply_status_change;

/// Sum of all record amounts for one job. Pure function of the current record
/// set; recomputed from source on every call.
pub async fn total_paid_for_job<R>(records: &R, job_id: &str) -> Result<f64, KhataError>
where
    R: PaymentRecordStore + ?Sized,
{
    let ledger = records.list_for_job(job_id).await?;
    Ok(ledger.iter().map(|r| r.amount).sum())
}

pub struct PaymentLedger<J, R>
where
    J: JobStore + 'static,
    R: PaymentRecordStore + 'static,
{
    jobs: Arc<J>,
    records: Arc<R>,
}

impl<J, R> PaymentLedger<J, R>
where
    J: JobStore + 'static,
    R: PaymentRecordStore + 'static,
{
    pub fn new(jobs: Arc<J>, records: Arc<R>) -> Self {
        Self { jobs, records }
    }

    /// Record a payment against a job. Rejects overpayment up front, then
    /// writes the record, then (a second, separate write) promotes the job to
    /// Paid when the ledger now covers the full amount and the job is already
    /// Delivered.
    pub async fn add_payment(
        &self,
        draft: PaymentDraft,
        recorder: Option<String>,
    ) -> Result<PaymentRecord, KhataError> {
        let draft = draft.normalized()?;
        let job = self
            .jobs
            .get(&draft.job_id)
            .await
            .map_err(|e| map_not_found(e, "job", &draft.job_id))?;

        let current_total = total_paid_for_job(self.records.as_ref(), &draft.job_id).await?;
        if current_total + draft.amount > job.amount {
            tracing::warn!(
                job_id = %draft.job_id,
                amount = draft.amount,
                remaining = job.amount - current_total,
                "payment rejected: overpayment"
            );
            return Err(KhataError::Overpayment {
                max_acceptable: job.amount - current_total,
                currency: job.currency,
            });
        }

        let record = PaymentRecord {
            id: Uuid::now_v7().to_string(),
            job_id: draft.job_id.clone(),
            amount: draft.amount,
            paid_at: now_ms(),
            note: draft.note,
            user_id: recorder,
        };
        self.records.insert(record.clone()).await?;
        tracing::info!(job_id = %record.job_id, record_id = %record.id, amount = record.amount, "payment recorded");

        let fully_paid = current_total + record.amount >= job.amount;
        if fully_paid && job.status == JobStatus::Delivered {
            self.promote_to_paid(job).await?;
        }
        Ok(record)
    }

    /// Delete a payment record unconditionally, then demote the owning job
    /// from Paid back to Delivered when the ledger no longer covers the
    /// amount. A missing job (deleted in another session) is tolerated.
    pub async fn remove_payment(&self, record_id: &str) -> Result<(), KhataError> {
        let record = self
            .records
            .get(record_id)
            .await
            .map_err(|e| map_not_found(e, "payment record", record_id))?;
        self.records.delete(record_id).await?;
        tracing::info!(job_id = %record.job_id, record_id, "payment removed");

        let mut job = match self.jobs.get(&record.job_id).await {
            Ok(job) => job,
            Err(StoreError::NotFound { .. }) => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        let new_total = total_paid_for_job(self.records.as_ref(), &record.job_id).await?;
        if new_total < job.amount && job.status == JobStatus::Paid {
            apply_status_change(&mut job, JobStatus::Delivered, now_ms(), false);
            self.jobs.update(job).await?;
            tracing::info!(job_id = %record.job_id, "ledger below amount; job demoted to Delivered");
        }
        Ok(())
    }

    pub async fn total_paid(&self, job_id: &str) -> Result<f64, KhataError> {
        total_paid_for_job(self.records.as_ref(), job_id).await
    }

    /// Unpaid balance, floored at zero.
    pub async fn remaining(&self, job: &Job) -> Result<f64, KhataError> {
        let total = self.total_paid(&job.id).await?;
        Ok((job.amount - total).max(0.0))
    }

    async fn promote_to_paid(&self, mut job: Job) -> Result<(), KhataError> {
        let now = now_ms();
        apply_status_change(&mut job, JobStatus::Paid, now, false);
        job.payment_recorded_at = Some(now);
        let job_id = job.id.clone();
        self.jobs.update(job).await?;
        tracing::info!(%job_id, "ledger covers full amount; job promoted to Paid");
        Ok(())
    }
}
