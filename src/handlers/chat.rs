use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::models::{ChatRequest, ChatResponse};
use crate::services::dispatch;
use crate::state::AppState;

// POST /chat
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    tracing::info!(user_email = %req.user_email, "chat request");

    let response = dispatch::process_chat(&state, &req).await.inspect_err(|e| {
        tracing::error!(error = %e, "chat request failed");
    })?;

    Ok(Json(response))
}
