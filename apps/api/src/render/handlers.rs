//! Axum route handlers for PDF export.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    pub content: String,
}

/// POST /api/pdf/download
///
/// Renders the posted markup and returns it as a `resume.pdf` attachment.
pub async fn handle_download(
    State(state): State<AppState>,
    Json(request): Json<DownloadRequest>,
) -> Result<Response, AppError> {
    let pdf = state.renderer.render(&request.content).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=resume.pdf",
            ),
        ],
        pdf,
    )
        .into_response())
}
