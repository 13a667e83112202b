use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use super::domain::{Points, ReceiptId};
use super::repository::{PointsRepository, RepositoryError};
use super::service::{ReceiptService, ReceiptServiceError};

pub const INVALID_RECEIPT_MESSAGE: &str = "The receipt is invalid.";
pub const RECEIPT_NOT_FOUND_MESSAGE: &str = "No receipt found for that ID.";

#[derive(Debug, Serialize)]
struct ProcessResponse {
    id: ReceiptId,
}

#[derive(Debug, Serialize)]
struct PointsResponse {
    points: Points,
}

/// Router exposing receipt submission and points lookup.
pub fn receipt_router<R>(service: Arc<ReceiptService<R>>) -> Router
where
    R: PointsRepository + 'static,
{
    Router::new()
        .route("/receipts/process", post(process_handler::<R>))
        .route("/receipts/:id/points", get(points_handler::<R>))
        .with_state(service)
}

// The body is taken as raw bytes so that syntax errors, missing content types and
// schema mismatches all collapse into the same 400.
pub(crate) async fn process_handler<R>(
    State(service): State<Arc<ReceiptService<R>>>,
    body: Bytes,
) -> Response
where
    R: PointsRepository + 'static,
{
    match service.submit_json(&body) {
        Ok(processed) => {
            (StatusCode::OK, Json(ProcessResponse { id: processed.id })).into_response()
        }
        Err(ReceiptServiceError::Validation(_)) => {
            error_response(StatusCode::BAD_REQUEST, INVALID_RECEIPT_MESSAGE)
        }
        Err(other) => {
            warn!(error = %other, "receipt could not be stored");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &other.to_string())
        }
    }
}

pub(crate) async fn points_handler<R>(
    State(service): State<Arc<ReceiptService<R>>>,
    Path(id): Path<String>,
) -> Response
where
    R: PointsRepository + 'static,
{
    match service.points(&ReceiptId(id)) {
        Ok(points) => (StatusCode::OK, Json(PointsResponse { points })).into_response(),
        Err(ReceiptServiceError::Repository(RepositoryError::NotFound)) => {
            error_response(StatusCode::NOT_FOUND, RECEIPT_NOT_FOUND_MESSAGE)
        }
        Err(other) => {
            warn!(error = %other, "points lookup failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &other.to_string())
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
