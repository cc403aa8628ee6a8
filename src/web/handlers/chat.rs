//! Chat assistant handler.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::web::server::PortalState;
use crate::web::types::{ApiError, ChatRequest, ChatResponse};

/// Provider failures are folded into the reply; only an unreadable body is an error.
pub async fn chat_handler(
    State(state): State<Arc<PortalState>>,
    req: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = req?;
    let response = state.chat.respond(&req.message).await;
    Ok(Json(ChatResponse { response }))
}
