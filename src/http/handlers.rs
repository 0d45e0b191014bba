//! Route handlers.

use std::time::Instant;

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;

use crate::audit::Operation;
use crate::http::request::XmlBody;
use crate::http::response::TransactionOutcome;
use crate::http::server::AppState;
use crate::observability::metrics;

/// `POST /insert`
pub async fn insert(State(state): State<AppState>, body: XmlBody) -> TransactionOutcome {
    handle(&state, Operation::Insert, body).await
}

/// `PUT /update`
pub async fn update(State(state): State<AppState>, body: XmlBody) -> TransactionOutcome {
    handle(&state, Operation::Update, body).await
}

/// `DELETE /delete`
pub async fn delete(State(state): State<AppState>, body: XmlBody) -> TransactionOutcome {
    handle(&state, Operation::Delete, body).await
}

async fn handle(state: &AppState, operation: Operation, XmlBody(payload): XmlBody) -> TransactionOutcome {
    let start = Instant::now();

    let processed = tokio::time::timeout(
        state.request_timeout,
        state.service.process(operation, &payload),
    )
    .await;

    let outcome = match processed {
        Ok(Ok(receipt)) => {
            tracing::info!(
                operation = %operation,
                transaction_id = %receipt.transaction_id,
                transaction_key = %receipt.transaction_key,
                upload_key = %receipt.upload_key,
                "Transaction processed"
            );
            TransactionOutcome::Completed(operation)
        }
        Ok(Err(e)) => {
            tracing::error!(operation = %operation, error = %e, "Transaction failed");
            TransactionOutcome::Failed(operation)
        }
        Err(_) => {
            tracing::error!(
                operation = %operation,
                timeout_secs = state.request_timeout.as_secs(),
                "Transaction timed out"
            );
            TransactionOutcome::Failed(operation)
        }
    };

    metrics::record_request(operation.as_str(), outcome.status().as_u16(), start);
    outcome
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
