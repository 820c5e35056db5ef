use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::shell::inbound::{jobs, payments, reports};
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/jobs", post(jobs::create).get(jobs::list))
        .route("/jobs/{id}", patch(jobs::edit).delete(jobs::delete))
        .route("/jobs/{id}/status", patch(jobs::set_status))
        .route("/jobs/{id}/ledger", get(jobs::ledger))
        .route("/jobs/{id}/payments", post(payments::add))
        .route("/payment-records", get(payments::list))
        .route("/payment-records/{id}", delete(payments::remove))
        .route("/reports/summary", get(reports::summary))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
