use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use shared::{
    responses::ErrorResponse,
    types::{Procedure, ProcedurePayload},
};

use crate::{api::state::ProcedureAppState, error::ProcedureServiceError};

/// Ids are `SERIAL` keys, so anything outside `i32` is rejected like any
/// other malformed id.
fn parse_id(path: Result<Path<String>, PathRejection>) -> Result<i32, ProcedureServiceError> {
    path.ok()
        .and_then(|Path(raw)| raw.parse().ok())
        .ok_or_else(|| ProcedureServiceError::BadRequest("invalid id parameter".into()))
}

fn parse_body(
    body: Result<Json<ProcedurePayload>, JsonRejection>,
) -> Result<ProcedurePayload, ProcedureServiceError> {
    body.map(|Json(payload)| payload).map_err(|rejection| {
        ProcedureServiceError::BadRequest(format!(
            "invalid request body: {}",
            rejection.body_text()
        ))
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/procedures",
    tag = "Procedures",
    operation_id = "list_procedures",
    responses(
        (status = 200, description = "All procedures ordered by sort_order", body = Vec<Procedure>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn find_all(
    State(state): State<Arc<ProcedureAppState>>,
) -> Result<Json<Vec<Procedure>>, ProcedureServiceError> {
    let output = state.procedure_service.get_all().await?;

    Ok(Json(output))
}

#[utoipa::path(
    get,
    path = "/api/v1/procedures/{id}",
    tag = "Procedures",
    operation_id = "get_procedure",
    params(
        ("id" = i32, Path, description = "Procedure ID")
    ),
    responses(
        (status = 200, description = "Procedure found", body = Procedure),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Procedure not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn find_by_id(
    State(state): State<Arc<ProcedureAppState>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Procedure>, ProcedureServiceError> {
    let id = parse_id(id)?;
    let output = state.procedure_service.get_by_id(id).await?;

    Ok(Json(output))
}

#[utoipa::path(
    get,
    path = "/api/v1/procedures/type/{type}",
    tag = "Procedures",
    operation_id = "list_procedures_by_type",
    params(
        ("type" = String, Path, description = "Procedure type")
    ),
    responses(
        (status = 200, description = "Procedures of the given type ordered by sort_order", body = Vec<Procedure>),
        (status = 400, description = "Empty type", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn find_by_type(
    State(state): State<Arc<ProcedureAppState>>,
    procedure_type: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Procedure>>, ProcedureServiceError> {
    let procedure_type = procedure_type
        .ok()
        .map(|Path(procedure_type)| procedure_type)
        .filter(|procedure_type| !procedure_type.is_empty())
        .ok_or_else(|| ProcedureServiceError::BadRequest("type parameter is required".into()))?;
    let output = state.procedure_service.get_by_type(procedure_type).await?;

    Ok(Json(output))
}

#[utoipa::path(
    post,
    path = "/api/v1/procedures",
    tag = "Procedures",
    operation_id = "create_procedure",
    request_body = ProcedurePayload,
    responses(
        (status = 201, description = "Procedure created", body = Procedure),
        (status = 400, description = "Invalid body or missing field", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn create(
    State(state): State<Arc<ProcedureAppState>>,
    body: Result<Json<ProcedurePayload>, JsonRejection>,
) -> Result<impl IntoResponse, ProcedureServiceError> {
    let procedure = parse_body(body)?;
    let output = state.procedure_service.create(procedure).await?;

    Ok((StatusCode::CREATED, Json(output)))
}

#[utoipa::path(
    put,
    path = "/api/v1/procedures/{id}",
    tag = "Procedures",
    operation_id = "update_procedure",
    params(
        ("id" = i32, Path, description = "Procedure ID")
    ),
    request_body = ProcedurePayload,
    responses(
        (status = 200, description = "Procedure updated", body = Procedure),
        (status = 400, description = "Invalid id, body or missing field", body = ErrorResponse),
        (status = 404, description = "Procedure not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn update(
    State(state): State<Arc<ProcedureAppState>>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<ProcedurePayload>, JsonRejection>,
) -> Result<Json<Procedure>, ProcedureServiceError> {
    let id = parse_id(id)?;
    let procedure = parse_body(body)?;
    let output = state.procedure_service.update(id, procedure).await?;

    Ok(Json(output))
}

#[utoipa::path(
    delete,
    path = "/api/v1/procedures/{id}",
    tag = "Procedures",
    operation_id = "delete_procedure",
    params(
        ("id" = i32, Path, description = "Procedure ID")
    ),
    responses(
        (status = 204, description = "Procedure deleted"),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Procedure not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<ProcedureAppState>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ProcedureServiceError> {
    let id = parse_id(id)?;
    state.procedure_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
