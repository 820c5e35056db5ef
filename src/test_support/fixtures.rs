// Builders for test data. Fixed, deterministic defaults; override per test.

use crate::core::job::{Currency, Job, JobDraft, JobStatus};

pub const FIXED_NOW_MS: i64 = 1_700_000_000_000;

pub struct JobDraftBuilder {
    draft: JobDraft,
}

impl JobDraftBuilder {
    pub fn new() -> Self {
        Self {
            draft: JobDraft {
                client_id: "client-fixed-0001".into(),
                client_name: "Acme Studio".into(),
                work_description: "Logo redesign".into(),
                notes: String::new(),
                amount: 1000.0,
                currency: Currency::BDT,
            },
        }
    }

    pub fn client_id(mut self, client_id: &str) -> Self {
        self.draft.client_id = client_id.into();
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.draft.amount = amount;
        self
    }

    pub fn currency(mut self, currency: Currency) -> Self {
        self.draft.currency = currency;
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.draft.notes = notes.into();
        self
    }

    pub fn build(self) -> JobDraft {
        self.draft
    }
}

pub struct JobBuilder {
    job: Job,
}

impl JobBuilder {
    pub fn new() -> Self {
        Self {
            job: Job {
                id: "job-fixed-0001".into(),
                client_id: "client-fixed-0001".into(),
                client_name: "Acme Studio".into(),
                work_description: "Logo redesign".into(),
                notes: String::new(),
                amount: 1000.0,
                currency: Currency::BDT,
                status: JobStatus::Pending,
                is_delivered: false,
                timestamp: FIXED_NOW_MS,
                pending_at: Some(FIXED_NOW_MS),
                ongoing_at: None,
                delivered_at: None,
                paid_at: None,
                payment_recorded_at: None,
                user_id: None,
            },
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.job.id = id.into();
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.job.amount = amount;
        self
    }

    pub fn currency(mut self, currency: Currency) -> Self {
        self.job.currency = currency;
        self
    }

    /// Sets the status along with the stamps a job that progressed through
    /// the flow would carry, and keeps `is_delivered` in sync.
    pub fn status(mut self, status: JobStatus) -> Self {
        let order = status.order();
        self.job.ongoing_at = (order >= 1).then_some(FIXED_NOW_MS);
        self.job.delivered_at = (order >= 2).then_some(FIXED_NOW_MS);
        self.job.paid_at = (order >= 3).then_some(FIXED_NOW_MS);
        self.job.is_delivered = status.delivers();
        self.job.status = status;
        self
    }

    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.job.timestamp = timestamp;
        self.job.pending_at = Some(timestamp);
        self
    }

    pub fn build(self) -> Job {
        self.job
    }
}
