//! Axum route handlers for editor sessions.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::editor::session::{SessionView, SharedSession};
use crate::suggestion::controller::RequestOutcome;
use crate::suggestion::service::SuggestionError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateContentRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub outcome: RequestOutcome,
    pub session: SessionView,
}

async fn lookup(state: &AppState, id: Uuid) -> Result<SharedSession, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> (StatusCode, Json<SessionView>) {
    let session = state.sessions.create(request.content).await;
    let view = session.lock().await.view();
    (StatusCode::CREATED, Json(view))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = lookup(&state, id).await?;
    let view = session.lock().await.view();
    Ok(Json(view))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {id} not found")))
    }
}

/// PUT /api/v1/sessions/:id/content
///
/// A user edit. 423 while a suggestion request is in flight.
pub async fn handle_update_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateContentRequest>,
) -> Result<Json<SessionView>, AppError> {
    let session = lookup(&state, id).await?;
    let mut guard = session.lock().await;
    guard.controller.surface_mut().edit(request.content)?;
    Ok(Json(guard.view()))
}

/// POST /api/v1/sessions/:id/suggest
///
/// Runs a suggestion request against the session's document. The service call
/// happens with the session unlocked so edits and further requests see the
/// in-flight state instead of waiting. The request runs in its own task, so a
/// client that disconnects does not cancel it. A panicking service counts as
/// a failed request; `finish_request` runs on every path.
pub async fn handle_suggest(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>, AppError> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt cannot be empty".to_string()));
    }

    let session = lookup(&state, id).await?;

    let ticket = {
        let mut guard = session.lock().await;
        match guard.controller.begin_request(&request.prompt) {
            Ok(ticket) => ticket,
            Err(outcome) => {
                return Ok(Json(SuggestResponse {
                    outcome,
                    session: guard.view(),
                }))
            }
        }
    };

    let suggester = state.suggester.clone();
    let (outcome, view) = tokio::spawn(async move {
        let prompt = ticket.prompt.clone();
        let result = tokio::spawn(async move { suggester.suggest(&prompt).await })
            .await
            .unwrap_or_else(|e| Err(SuggestionError::Aborted(e.to_string())));

        let mut guard = session.lock().await;
        let outcome = guard.controller.finish_request(ticket, result);
        (outcome, guard.view())
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("suggestion task failed: {e}")))?;

    Ok(Json(SuggestResponse {
        outcome,
        session: view,
    }))
}

/// POST /api/v1/sessions/:id/toggle
pub async fn handle_toggle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = lookup(&state, id).await?;
    let mut guard = session.lock().await;
    guard.controller.toggle_suggestion();
    Ok(Json(guard.view()))
}

/// POST /api/v1/sessions/:id/apply
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = lookup(&state, id).await?;
    let mut guard = session.lock().await;
    guard.controller.apply_suggestion();
    Ok(Json(guard.view()))
}

/// POST /api/v1/sessions/:id/discard
pub async fn handle_discard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = lookup(&state, id).await?;
    let mut guard = session.lock().await;
    guard.controller.discard_suggestion();
    Ok(Json(guard.view()))
}
