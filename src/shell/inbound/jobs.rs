use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::lifecycle::StatusChangeOptions;
use crate::core::job::{JobDraft, JobStatus};
use crate::core::ports::JobStore;
use crate::shell::inbound::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobBody {
    #[serde(flatten)]
    pub draft: JobDraft,
    #[serde(default)]
    pub creator_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobResponse {
    pub job_id: String,
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateJobBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    match state.lifecycle.create_job(body.creator_id, body.draft).await {
        Ok(job) => (
            StatusCode::CREATED,
            Json(CreateJobResponse { job_id: job.id }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn list(State(state): State<AppState>) -> impl IntoResponse {
    match state.jobs.list().await {
        Ok(jobs) => Json(jobs).into_response(),
        Err(err) => error_response(err.into()),
    }
}

pub async fn edit(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    body: Result<Json<JobDraft>, JsonRejection>,
) -> impl IntoResponse {
    let Json(draft) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    match state.lifecycle.edit_job(&job_id, draft).await {
        Ok(job) => Json(job).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStatusBody {
    pub status: JobStatus,
    #[serde(default)]
    pub auto_pay_if_fully_paid: bool,
}

pub async fn set_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    body: Result<Json<SetStatusBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        // Covers unknown status strings as well: serde rejects them.
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    let opts = StatusChangeOptions {
        auto_pay_if_fully_paid: body.auto_pay_if_fully_paid,
    };
    match state.lifecycle.set_status(&job_id, body.status, opts).await {
        Ok(job) => Json(job).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> impl IntoResponse {
    match state.lifecycle.delete_job(&job_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerView {
    pub total_paid: f64,
    pub remaining: f64,
}

pub async fn ledger(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> impl IntoResponse {
    let job = match state.jobs.get(&job_id).await {
        Ok(job) => job,
        Err(err) => return error_response(crate::application::errors::map_not_found(err, "job", &job_id)),
    };
    let total_paid = match state.ledger.total_paid(&job_id).await {
        Ok(total) => total,
        Err(err) => return error_response(err),
    };
    let remaining = (job.amount - total_paid).max(0.0);
    Json(LedgerView { total_paid, remaining }).into_response()
}
