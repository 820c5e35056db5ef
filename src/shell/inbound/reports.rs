use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::application::date_range::DateRange;
use crate::application::reports::summarize;
use crate::core::ports::{JobStore, PaymentRecordStore};
use crate::shell::inbound::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct SummaryQuery {
    /// Named preset: 7d | 30d | 90d | thisMonth | all.
    pub range: Option<String>,
    /// Custom range endpoints, epoch milliseconds. Both required together,
    /// and mutually exclusive with `range`.
    pub start: Option<i64>,
    pub end: Option<i64>,
}

pub async fn summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> impl IntoResponse {
    let range = match (query.start, query.end, query.range.as_deref()) {
        (Some(start_ms), Some(end_ms), None) => Some(DateRange::Custom { start_ms, end_ms }),
        (None, None, Some(name)) => match name.parse::<DateRange>() {
            Ok(range) => Some(range),
            Err(err) => {
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "error": err.to_string() })),
                )
                    .into_response();
            }
        },
        (None, None, None) => None,
        (Some(_), Some(_), Some(_)) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": "provide either a named range or start and end, not both" })),
            )
                .into_response();
        }
        _ => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": "start and end must be provided together" })),
            )
                .into_response();
        }
    };

    let jobs = match state.jobs.list().await {
        Ok(jobs) => jobs,
        Err(err) => return error_response(err.into()),
    };
    let records = match state.records.list().await {
        Ok(records) => records,
        Err(err) => return error_response(err.into()),
    };

    let bounds = range.map(|r| r.bounds());
    Json(summarize(&jobs, &records, bounds)).into_response()
}
