// Payment record entity: one discrete receipt of money against a job.
//
// Purpose
// - Define the shape of a `payment_records` document and validate the
//   add-payment payload before any store mutation.
//
// Notes
// - Records are append-mostly: created through the ledger engine, deleted
//   through it, never mutated in place. The amount is in the owning job's
//   currency and is not stored redundantly here.

use serde::{Deserialize, Serialize};

/// A payment record as stored in the `payment_records` collection. Multiple
/// records may exist per job; their sum must never exceed the job's amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: String,
    pub job_id: String,
    pub amount: f64,
    /// When the money was received. Assigned at creation; immutable.
    pub paid_at: i64,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Add-payment payload. Normalize before use.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDraft {
    pub job_id: String,
    pub amount: f64,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PaymentDraftError {
    #[error("job id must not be empty")]
    MissingJob,
    #[error("amount must be a finite, positive number")]
    InvalidAmount,
}

impl PaymentDraft {
    pub fn normalized(mut self) -> Result<PaymentDraft, PaymentDraftError> {
        if self.job_id.trim().is_empty() {
            return Err(PaymentDraftError::MissingJob);
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(PaymentDraftError::InvalidAmount);
        }
        self.job_id = self.job_id.trim().to_string();
        self.note = self.note.trim().to_string();
        Ok(self)
    }
}
