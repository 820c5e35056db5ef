// Ports define what the core needs from the outside world, without implementing it.
//
// Purpose
// - Describe the job and payment-record collections as traits so the engines
//   stay independent of the concrete backing store.
//
// Boundaries
// - No concrete input or output here. Adapters implement these traits in the
//   adapters layer.
//
// Notes
// - The store offers atomic single-document mutations only; the engines never
//   assume atomicity across two calls.
// - `subscribe` models the store's real-time fan-out: every committed mutation
//   pushes a fresh snapshot of the collection to all subscribers.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

use crate::core::job::Job;
use crate::core::payment_record::PaymentRecord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("document not found: {id}")]
    NotFound { id: String },

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn insert(&self, job: Job) -> Result<(), StoreError>;
    async fn get(&self, id: &str) -> Result<Job, StoreError>;
    /// Replace the stored document whose id matches `job.id`.
    async fn update(&self, job: Job) -> Result<(), StoreError>;
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
    /// All jobs, newest creation first.
    async fn list(&self) -> Result<Vec<Job>, StoreError>;
    /// Live view of the collection; receives a snapshot after every commit.
    fn subscribe(&self) -> watch::Receiver<Vec<Job>>;
}

#[async_trait]
pub trait PaymentRecordStore: Send + Sync {
    async fn insert(&self, record: PaymentRecord) -> Result<(), StoreError>;
    async fn get(&self, id: &str) -> Result<PaymentRecord, StoreError>;
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
    /// All records, most recent `paid_at` first.
    async fn list(&self) -> Result<Vec<PaymentRecord>, StoreError>;
    /// The ledger of one job: every record whose `job_id` matches.
    async fn list_for_job(&self, job_id: &str) -> Result<Vec<PaymentRecord>, StoreError>;
    fn subscribe(&self) -> watch::Receiver<Vec<PaymentRecord>>;
}
