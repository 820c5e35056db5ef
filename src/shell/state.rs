use std::sync::Arc;

use crate::adapters::in_memory::job_store::InMemoryJobStore;
use crate::adapters::in_memory::payment_record_store::InMemoryPaymentRecordStore;
use crate::application::ledger::PaymentLedger;
use crate::application::lifecycle::JobLifecycle;

#[derive(Clone)]
pub struct AppState {
    pub lifecycle: Arc<JobLifecycle<InMemoryJobStore, InMemoryPaymentRecordStore>>,
    pub ledger: Arc<PaymentLedger<InMemoryJobStore, InMemoryPaymentRecordStore>>,
    pub jobs: Arc<InMemoryJobStore>,
    pub records: Arc<InMemoryPaymentRecordStore>,
}

impl AppState {
    pub fn in_memory() -> Self {
        let jobs = Arc::new(InMemoryJobStore::new());
        let records = Arc::new(InMemoryPaymentRecordStore::new());
        AppState {
            lifecycle: Arc::new(JobLifecycle::new(jobs.clone(), records.clone())),
            ledger: Arc::new(PaymentLedger::new(jobs.clone(), records.clone())),
            jobs,
            records,
        }
    }
}
