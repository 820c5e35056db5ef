// Job lifecycle engine.
//
// Purpose
// - Own every job mutation: creation, status transitions, field edits,
//   deletion. Applies the pure transition function from `core::transition`
//   and persists the result through the JobStore port.
//
// Boundaries
// - The payment-record store is consulted read-only, for the
//   deliver-with-auto-pay check. Record mutations live in the ledger engine.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::application::errors::{KhataError, map_not_found};
use crate::application::ledger::total_paid_for_job;
use crate::core::job::{Job, JobDraft, JobStatus};
use crate::core::ports::{JobStore, PaymentRecordStore};
use crate::core::transition::apply_status_change;

pub(crate) fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StatusChangeOptions {
    /// When the target is Delivered and the ledger already covers the full
    /// amount, jump straight to Paid, stamping `delivered_at` and `paid_at`
    /// at the same instant.
    pub auto_pay_if_fully_paid: bool,
}

pub struct JobLifecycle<J, R>
where
    J: JobStore + 'static,
    R: PaymentRecordStore + 'static,
{
    jobs: Arc<J>,
    records: Arc<R>,
}

impl<J, R> JobLifecycle<J, R>
where
    J: JobStore + 'static,
    R: PaymentRecordStore + 'static,
{
    pub fn new(jobs: Arc<J>, records: Arc<R>) -> Self {
        Self { jobs, records }
    }

    /// Create a job in Pending, with `pending_at` and the creation timestamp
    /// both set to now.
    pub async fn create_job(
        &self,
        creator: Option<String>,
        draft: JobDraft,
    ) -> Result<Job, KhataError> {
        let draft = draft.normalized()?;
        let job = Job::create(Uuid::now_v7().to_string(), creator, draft, now_ms());
        self.jobs.insert(job.clone()).await?;
        tracing::info!(job_id = %job.id, client_id = %job.client_id, "job created");
        Ok(job)
    }

    /// Move a job to `new_status`, stamping the target status and clearing
    /// every downstream stamp. Any status may follow any other.
    pub async fn set_status(
        &self,
        job_id: &str,
        new_status: JobStatus,
        opts: StatusChangeOptions,
    ) -> Result<Job, KhataError> {
        let mut job = self.load(job_id).await?;
        let now = now_ms();

        if opts.auto_pay_if_fully_paid && new_status == JobStatus::Delivered && job.amount > 0.0 {
            let total = total_paid_for_job(self.records.as_ref(), job_id).await?;
            if total >= job.amount {
                apply_status_change(&mut job, JobStatus::Paid, now, true);
                self.jobs.update(job.clone()).await?;
                tracing::info!(job_id, "job delivered fully paid; promoted straight to Paid");
                return Ok(job);
            }
        }

        apply_status_change(&mut job, new_status, now, false);
        self.jobs.update(job.clone()).await?;
        tracing::info!(job_id, status = new_status.as_str(), "job status changed");
        Ok(job)
    }

    /// Edit the job's core fields. No status or timestamp side effects.
    pub async fn edit_job(&self, job_id: &str, draft: JobDraft) -> Result<Job, KhataError> {
        let draft = draft.normalized()?;
        let mut job = self.load(job_id).await?;
        job.apply_edit(draft);
        self.jobs.update(job.clone()).await?;
        tracing::info!(job_id, "job edited");
        Ok(job)
    }

    /// Delete the job document. Payment records are NOT cascade-deleted;
    /// readers tolerate the resulting orphans.
    pub async fn delete_job(&self, job_id: &str) -> Result<(), KhataError> {
        self.jobs
            .delete(job_id)
            .await
            .map_err(|e| map_not_found(e, "job", job_id))?;
        tracing::info!(job_id, "job deleted");
        Ok(())
    }

    async fn load(&self, job_id: &str) -> Result<Job, KhataError> {
        self.jobs
            .get(job_id)
            .await
            .map_err(|e| map_not_found(e, "job", job_id))
    }
}

#[cfg(test)]
mod lifecycle_tests {
    use super::*;
    use crate::adapters::in_memory::job_store::InMemoryJobStore;
    use crate::adapters::in_memory::payment_record_store::InMemoryPaymentRecordStore;
    use crate::core::ports::StoreError;
    use crate::core::payment_record::PaymentRecord;
    use crate::test_support::fixtures::JobDraftBuilder;
    use rstest::{fixture, rstest};

    type Engine = JobLifecycle<InMemoryJobStore, InMemoryPaymentRecordStore>;

    #[fixture]
    fn engine() -> (Engine, Arc<InMemoryJobStore>, Arc<InMemoryPaymentRecordStore>) {
        let jobs = Arc::new(InMemoryJobStore::new());
        let records = Arc::new(InMemoryPaymentRecordStore::new());
        (JobLifecycle::new(jobs.clone(), records.clone()), jobs, records)
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_create_a_pending_job(
        engine: (Engine, Arc<InMemoryJobStore>, Arc<InMemoryPaymentRecordStore>),
    ) {
        let (engine, jobs, _) = engine;
        let draft = JobDraftBuilder::new().amount(1000.0).build();
        let job = engine.create_job(Some("user-1".into()), draft).await.unwrap();

        assert_eq!(job.status, JobStatus::Pending);
        assert!(job.pending_at.is_some());
        assert_eq!(job.pending_at, Some(job.timestamp));
        assert!(!job.is_delivered);
        assert_eq!(jobs.get(&job.id).await.unwrap(), job);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_an_invalid_draft_before_any_mutation(
        engine: (Engine, Arc<InMemoryJobStore>, Arc<InMemoryPaymentRecordStore>),
    ) {
        let (engine, jobs, _) = engine;
        let draft = JobDraftBuilder::new().amount(-5.0).build();
        let result = engine.create_job(None, draft).await;

        assert!(matches!(result, Err(KhataError::Validation(_))));
        assert!(jobs.list().await.unwrap().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_stamp_delivered_on_transition(
        engine: (Engine, Arc<InMemoryJobStore>, Arc<InMemoryPaymentRecordStore>),
    ) {
        let (engine, _, _) = engine;
        let draft = JobDraftBuilder::new().amount(1000.0).build();
        let job = engine.create_job(None, draft).await.unwrap();

        let job = engine
            .set_status(&job.id, JobStatus::Delivered, StatusChangeOptions::default())
            .await
            .unwrap();

        assert_eq!(job.status, JobStatus::Delivered);
        assert!(job.delivered_at.is_some());
        assert!(job.is_delivered);
        assert_eq!(job.paid_at, None);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_auto_pay_on_deliver_when_the_ledger_covers_the_amount(
        engine: (Engine, Arc<InMemoryJobStore>, Arc<InMemoryPaymentRecordStore>),
    ) {
        let (engine, _, records) = engine;
        let draft = JobDraftBuilder::new().amount(1000.0).build();
        let job = engine.create_job(None, draft).await.unwrap();
        records
            .insert(PaymentRecord {
                id: "rec-1".into(),
                job_id: job.id.clone(),
                amount: 1000.0,
                paid_at: now_ms(),
                note: String::new(),
                user_id: None,
            })
            .await
            .unwrap();

        let job = engine
            .set_status(
                &job.id,
                JobStatus::Delivered,
                StatusChangeOptions { auto_pay_if_fully_paid: true },
            )
            .await
            .unwrap();

        assert_eq!(job.status, JobStatus::Paid);
        assert!(job.paid_at.is_some());
        assert_eq!(job.delivered_at, job.paid_at);
        // The composite clears the bookkeeping stamp; only the ledger-side
        // promotion sets it.
        assert_eq!(job.payment_recorded_at, None);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_not_auto_pay_a_partially_paid_delivery(
        engine: (Engine, Arc<InMemoryJobStore>, Arc<InMemoryPaymentRecordStore>),
    ) {
        let (engine, _, records) = engine;
        let draft = JobDraftBuilder::new().amount(1000.0).build();
        let job = engine.create_job(None, draft).await.unwrap();
        records
            .insert(PaymentRecord {
                id: "rec-1".into(),
                job_id: job.id.clone(),
                amount: 400.0,
                paid_at: now_ms(),
                note: String::new(),
                user_id: None,
            })
            .await
            .unwrap();

        let job = engine
            .set_status(
                &job.id,
                JobStatus::Delivered,
                StatusChangeOptions { auto_pay_if_fully_paid: true },
            )
            .await
            .unwrap();

        assert_eq!(job.status, JobStatus::Delivered);
        assert_eq!(job.paid_at, None);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_not_auto_pay_a_zero_amount_job(
        engine: (Engine, Arc<InMemoryJobStore>, Arc<InMemoryPaymentRecordStore>),
    ) {
        let (engine, _, _) = engine;
        let draft = JobDraftBuilder::new().amount(0.0).build();
        let job = engine.create_job(None, draft).await.unwrap();

        let job = engine
            .set_status(
                &job.id,
                JobStatus::Delivered,
                StatusChangeOptions { auto_pay_if_fully_paid: true },
            )
            .await
            .unwrap();

        assert_eq!(job.status, JobStatus::Delivered);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_with_not_found_for_a_missing_job(
        engine: (Engine, Arc<InMemoryJobStore>, Arc<InMemoryPaymentRecordStore>),
    ) {
        let (engine, _, _) = engine;
        let result = engine
            .set_status("missing", JobStatus::Ongoing, StatusChangeOptions::default())
            .await;
        assert!(matches!(result, Err(KhataError::NotFound { entity: "job", .. })));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_propagate_a_backend_failure(
        engine: (Engine, Arc<InMemoryJobStore>, Arc<InMemoryPaymentRecordStore>),
    ) {
        let (engine, jobs, _) = engine;
        jobs.toggle_offline();
        let draft = JobDraftBuilder::new().amount(100.0).build();
        let result = engine.create_job(None, draft).await;
        assert!(matches!(
            result,
            Err(KhataError::Store(StoreError::Backend(_)))
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_delete_without_cascading_to_records(
        engine: (Engine, Arc<InMemoryJobStore>, Arc<InMemoryPaymentRecordStore>),
    ) {
        let (engine, jobs, records) = engine;
        let draft = JobDraftBuilder::new().amount(1000.0).build();
        let job = engine.create_job(None, draft).await.unwrap();
        records
            .insert(PaymentRecord {
                id: "rec-1".into(),
                job_id: job.id.clone(),
                amount: 100.0,
                paid_at: now_ms(),
                note: String::new(),
                user_id: None,
            })
            .await
            .unwrap();

        engine.delete_job(&job.id).await.unwrap();

        assert!(jobs.get(&job.id).await.is_err());
        assert_eq!(records.list_for_job(&job.id).await.unwrap().len(), 1);
    }
}
