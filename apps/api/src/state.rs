use std::sync::Arc;

use crate::editor::session::SessionRegistry;
use crate::render::PdfRenderer;
use crate::suggestion::service::SuggestionService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Open editor sessions. In-memory only; nothing survives a restart.
    pub sessions: SessionRegistry,
    /// Pluggable suggestion backend. Default: LlmSuggestionService.
    pub suggester: Arc<dyn SuggestionService>,
    pub renderer: PdfRenderer,
}
