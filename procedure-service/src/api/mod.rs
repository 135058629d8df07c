use std::{any::Any, sync::Arc};

use axum::{
    Json, Router,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use shared::responses::{ErrorResponse, HealthResponse};

use crate::api::{handler::procedure, state::ProcedureAppState};

pub mod handler;
pub mod state;

/// Routes served by the procedure service, without transport middleware.
pub fn router(state: Arc<ProcedureAppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/v1/procedures",
            get(procedure::find_all).post(procedure::create),
        )
        .route(
            "/api/v1/procedures/",
            get(procedure::find_all).post(procedure::create),
        )
        .route(
            "/api/v1/procedures/{id}",
            get(procedure::find_by_id)
                .put(procedure::update)
                .delete(procedure::delete),
        )
        .route(
            "/api/v1/procedures/type/{procedure_type}",
            get(procedure::find_by_type),
        )
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    let message = format!("Cannot {method} {}", uri.path());
    (StatusCode::NOT_FOUND, Json(ErrorResponse::simple(message)))
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::simple("Method Not Allowed")),
    )
}

/// Renders a caught handler panic as a bare 500 envelope.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let reason = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_owned());
    tracing::error!(%reason, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::simple("Internal server error")),
    )
        .into_response()
}
