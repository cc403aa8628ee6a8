//! Profile search and alumni management handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};
use serde_json::Value;

use crate::alumni::{AlumniRecord, ProfileOutcome, RECENT_LIMIT};
use crate::web::server::PortalState;
use crate::web::types::*;

pub async fn search_handler(
    State(state): State<Arc<PortalState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ProfileOutcome>, ApiError> {
    let email = query
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::bad_request("No email provided"))?;

    Ok(Json(state.generator.generate(&email)))
}

pub async fn recent_handler(State(state): State<Arc<PortalState>>) -> Json<Vec<AlumniRecord>> {
    Json(state.store.recent(RECENT_LIMIT))
}

pub async fn alumni_list_handler(
    State(state): State<Arc<PortalState>>,
) -> Json<Vec<AlumniRecord>> {
    Json(state.store.list_all())
}

pub async fn alumni_get_handler(
    State(state): State<Arc<PortalState>>,
    Path(email): Path<String>,
) -> Result<Json<AlumniRecord>, ApiError> {
    Ok(Json(state.store.get(&email)?))
}

pub async fn alumni_update_handler(
    State(state): State<Arc<PortalState>>,
    Path(email): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AlumniRecord>, ApiError> {
    let Json(body) = body?;
    let Value::Object(fields) = body else {
        return Err(ApiError::bad_request("Request body must be a JSON object"));
    };

    let updated = state.store.update(&email, fields)?;
    tracing::info!(email = %email, "Updated alumni record");
    Ok(Json(updated))
}

pub async fn alumni_delete_handler(
    State(state): State<Arc<PortalState>>,
    Path(email): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let removed = state.store.delete(&email)?;
    tracing::info!(email = %email, "Deleted alumni record");
    Ok(Json(DeleteResponse {
        message: "Alumni deleted",
        alumni: removed,
    }))
}

pub async fn alumni_bulk_delete_handler(
    State(state): State<Arc<PortalState>>,
    req: Result<Json<BulkDeleteRequest>, JsonRejection>,
) -> Result<Json<BulkDeleteResponse>, ApiError> {
    let Json(req) = req?;
    if req.emails.is_empty() {
        return Err(ApiError::bad_request("No emails provided"));
    }

    let deleted = state.store.delete_many(&req.emails);
    tracing::info!(requested = req.emails.len(), deleted, "Bulk-deleted alumni records");
    Ok(Json(BulkDeleteResponse { ok: true, deleted }))
}
