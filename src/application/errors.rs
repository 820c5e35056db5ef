use thiserror::Error;

use crate::core::job::{Currency, JobDraftError, UnknownStatus};
use crate::core::money::format_amount;
use crate::core::payment_record::PaymentDraftError;
use crate::core::ports::StoreError;

/// Failure taxonomy for every engine operation. Validation and overpayment are
/// caught before any mutation; store failures propagate unchanged.
#[derive(Debug, Error)]
pub enum KhataError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("payment exceeds remaining balance; maximum acceptable is {}", format_amount(*max_acceptable, *currency))]
    Overpayment {
        max_acceptable: f64,
        currency: Currency,
    },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<JobDraftError> for KhataError {
    fn from(err: JobDraftError) -> Self {
        KhataError::Validation(err.to_string())
    }
}

impl From<PaymentDraftError> for KhataError {
    fn from(err: PaymentDraftError) -> Self {
        KhataError::Validation(err.to_string())
    }
}

impl From<UnknownStatus> for KhataError {
    fn from(err: UnknownStatus) -> Self {
        KhataError::Validation(err.to_string())
    }
}

/// Translate a store-level miss on a specific document into a domain
/// not-found error, leaving backend failures untouched.
pub fn map_not_found(err: StoreError, entity: &'static str, id: &str) -> KhataError {
    match err {
        StoreError::NotFound { .. } => KhataError::NotFound {
            entity,
            id: id.to_string(),
        },
        other => KhataError::Store(other),
    }
}

#[cfg(test)]
mod errors_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_render_the_maximum_acceptable_amount() {
        let err = KhataError::Overpayment {
            max_acceptable: 1000.0,
            currency: Currency::BDT,
        };
        assert_eq!(
            err.to_string(),
            "payment exceeds remaining balance; maximum acceptable is ৳1,000"
        );
    }

    #[rstest]
    fn it_should_map_a_store_miss_to_a_domain_not_found() {
        let err = map_not_found(StoreError::NotFound { id: "x".into() }, "job", "job-1");
        assert!(matches!(err, KhataError::NotFound { entity: "job", .. }));
    }

    #[rstest]
    fn it_should_pass_backend_errors_through() {
        let err = map_not_found(StoreError::Backend("offline".into()), "job", "job-1");
        assert!(matches!(err, KhataError::Store(StoreError::Backend(_))));
    }
}
