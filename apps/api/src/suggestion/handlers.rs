//! Stateless suggestion endpoint for browser clients that keep the document
//! (and run the suggestion lifecycle) on their side.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::suggestion::service::SuggestionReply;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

/// POST /api/pdf/generate
///
/// Forwards an already-combined prompt to the suggestion service and returns
/// its `{response, output}` unchanged. Sanitizing is the caller's job.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<SuggestionReply>, AppError> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt cannot be empty".to_string()));
    }

    let reply = state.suggester.suggest(&request.prompt).await?;
    Ok(Json(reply))
}
