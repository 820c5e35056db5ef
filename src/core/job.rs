// Job entity and its status/currency enumerations.
//
// Purpose
// - Define the canonical shape of a job (a unit of billable work for a client)
//   as persisted in the `jobs` collection.
// - Validate and normalize create/edit payloads before any store mutation.
//
// Boundaries
// - No input or output here. Status transitions live in `core::transition`;
//   persistence lives behind `core::ports`.

use serde::{Deserialize, Serialize};

/// Job status flow: Pending → Ongoing → Delivered → Paid.
///
/// Every status carries an order (0..=3). Unknown strings are rejected at the
/// serde boundary rather than silently defaulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    Ongoing,
    Delivered,
    Paid,
}

impl JobStatus {
    pub const ALL: [JobStatus; 4] = [
        JobStatus::Pending,
        JobStatus::Ongoing,
        JobStatus::Delivered,
        JobStatus::Paid,
    ];

    pub fn order(self) -> u8 {
        match self {
            JobStatus::Pending => 0,
            JobStatus::Ongoing => 1,
            JobStatus::Delivered => 2,
            JobStatus::Paid => 3,
        }
    }

    /// True for statuses that count as delivered work (Delivered or Paid).
    pub fn delivers(self) -> bool {
        matches!(self, JobStatus::Delivered | JobStatus::Paid)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "Pending",
            JobStatus::Ongoing => "Ongoing",
            JobStatus::Delivered => "Delivered",
            JobStatus::Paid => "Paid",
        }
    }
}

impl std::str::FromStr for JobStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown job status: {0}")]
pub struct UnknownStatus(pub String);

/// Supported currencies for job amounts. Jobs are never cross-converted.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Currency {
    #[default]
    BDT,
    USD,
    EUR,
}

/// A job as stored in the `jobs` collection. Field names match the persisted
/// document layout. All timestamps are epoch milliseconds; the per-status
/// stamps are absent until the job enters that status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub client_id: String,
    /// Denormalized client name snapshot, taken at create/edit time.
    pub client_name: String,
    pub work_description: String,
    #[serde(default)]
    pub notes: String,
    pub amount: f64,
    #[serde(default)]
    pub currency: Currency,
    pub status: JobStatus,
    /// Always equals `status.delivers()`; stored redundantly for queries.
    pub is_delivered: bool,
    /// Creation time. Immutable.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ongoing_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_recorded_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Job {
    /// Create a new job in Pending, with `pending_at` and `timestamp` both set
    /// to the creation instant. Callers validate the draft first.
    pub fn create(id: String, creator: Option<String>, draft: JobDraft, now_ms: i64) -> Job {
        Job {
            id,
            client_id: draft.client_id,
            client_name: draft.client_name,
            work_description: draft.work_description,
            notes: draft.notes,
            amount: draft.amount,
            currency: draft.currency,
            status: JobStatus::Pending,
            is_delivered: false,
            timestamp: now_ms,
            pending_at: Some(now_ms),
            ongoing_at: None,
            delivered_at: None,
            paid_at: None,
            payment_recorded_at: None,
            user_id: creator,
        }
    }

    /// Apply an edit to the job's core fields. Status, timestamps, and the
    /// derived `is_delivered` flag are never touched by an edit.
    pub fn apply_edit(&mut self, draft: JobDraft) {
        self.client_id = draft.client_id;
        self.client_name = draft.client_name;
        self.work_description = draft.work_description;
        self.notes = draft.notes;
        self.amount = draft.amount;
        self.currency = draft.currency;
    }
}

/// Create/edit payload for a job. Normalize before use.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub client_id: String,
    pub client_name: String,
    pub work_description: String,
    #[serde(default)]
    pub notes: String,
    pub amount: f64,
    #[serde(default)]
    pub currency: Currency,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum JobDraftError {
    #[error("client id must not be empty")]
    MissingClient,
    #[error("amount must be a finite, non-negative number")]
    InvalidAmount,
}

impl JobDraft {
    /// Validate the draft and trim free-text fields.
    pub fn normalized(mut self) -> Result<JobDraft, JobDraftError> {
        if self.client_id.trim().is_empty() {
            return Err(JobDraftError::MissingClient);
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(JobDraftError::InvalidAmount);
        }
        self.client_id = self.client_id.trim().to_string();
        self.client_name = self.client_name.trim().to_string();
        self.work_description = self.work_description.trim().to_string();
        self.notes = self.notes.trim().to_string();
        Ok(self)
    }
}
