// Shared wiring for the end-to-end engine flow tests: in-memory stores behind
// both engines, the way the composition root wires them.
#![allow(dead_code)]

use std::sync::Arc;

use khata::adapters::in_memory::job_store::InMemoryJobStore;
use khata::adapters::in_memory::payment_record_store::InMemoryPaymentRecordStore;
use khata::application::ledger::PaymentLedger;
use khata::application::lifecycle::JobLifecycle;
use khata::core::job::{Currency, JobDraft};
use khata::core::payment_record::PaymentDraft;

pub struct World {
    pub lifecycle: JobLifecycle<InMemoryJobStore, InMemoryPaymentRecordStore>,
    pub ledger: PaymentLedger<InMemoryJobStore, InMemoryPaymentRecordStore>,
    pub jobs: Arc<InMemoryJobStore>,
    pub records: Arc<InMemoryPaymentRecordStore>,
}

pub fn make_world() -> World {
    let jobs = Arc::new(InMemoryJobStore::new());
    let records = Arc::new(InMemoryPaymentRecordStore::new());
    World {
        lifecycle: JobLifecycle::new(jobs.clone(), records.clone()),
        ledger: PaymentLedger::new(jobs.clone(), records.clone()),
        jobs,
        records,
    }
}

pub fn make_job_draft(amount: f64, currency: Currency) -> JobDraft {
    JobDraft {
        client_id: "client-fixed-0001".into(),
        client_name: "Acme Studio".into(),
        work_description: "Logo redesign".into(),
        notes: String::new(),
        amount,
        currency,
    }
}

pub fn make_payment_draft(job_id: &str, amount: f64) -> PaymentDraft {
    PaymentDraft {
        job_id: job_id.to_string(),
        amount,
        note: String::new(),
    }
}
