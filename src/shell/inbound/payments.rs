use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::core::payment_record::PaymentDraft;
use crate::core::ports::PaymentRecordStore;
use crate::shell::inbound::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPaymentBody {
    pub amount: f64,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub recorder_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPaymentResponse {
    pub record_id: String,
}

pub async fn add(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    body: Result<Json<AddPaymentBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    let draft = PaymentDraft {
        job_id,
        amount: body.amount,
        note: body.note,
    };
    match state.ledger.add_payment(draft, body.recorder_id).await {
        Ok(record) => (
            StatusCode::CREATED,
            Json(AddPaymentResponse { record_id: record.id }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn remove(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
) -> impl IntoResponse {
    match state.ledger.remove_payment(&record_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn list(State(state): State<AppState>) -> impl IntoResponse {
    match state.records.list().await {
        Ok(records) => Json(records).into_response(),
        Err(err) => error_response(err.into()),
    }
}
