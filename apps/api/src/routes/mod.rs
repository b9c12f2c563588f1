pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::editor::handlers as editor;
use crate::render::handlers as render;
use crate::state::AppState;
use crate::suggestion::handlers as suggestion;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/test", get(health::test_handler))
        // Browser-client API: stateless export and generation
        .route("/api/pdf/download", post(render::handle_download))
        .route("/api/pdf/generate", post(suggestion::handle_generate))
        // Editor sessions: server-side suggestion lifecycle
        .route("/api/v1/sessions", post(editor::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(editor::handle_get_session).delete(editor::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/content",
            put(editor::handle_update_content),
        )
        .route("/api/v1/sessions/:id/suggest", post(editor::handle_suggest))
        .route("/api/v1/sessions/:id/toggle", post(editor::handle_toggle))
        .route("/api/v1/sessions/:id/apply", post(editor::handle_apply))
        .route("/api/v1/sessions/:id/discard", post(editor::handle_discard))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tokio::sync::Notify;
    use tower::ServiceExt;

    use super::*;
    use crate::editor::session::SessionRegistry;
    use crate::llm_client::LlmError;
    use crate::render::PdfRenderer;
    use crate::suggestion::service::{SuggestionError, SuggestionReply, SuggestionService};

    struct FixedService(Option<&'static str>);

    #[async_trait]
    impl SuggestionService for FixedService {
        async fn suggest(&self, _prompt: &str) -> Result<SuggestionReply, SuggestionError> {
            match self.0 {
                Some(output) => Ok(SuggestionReply {
                    response: "Tightened the wording".to_string(),
                    output: Some(output.to_string()),
                }),
                None => Err(SuggestionError::Llm(LlmError::EmptyContent)),
            }
        }
    }

    /// Blocks inside `suggest` until released, so tests can act mid-flight.
    struct GatedService {
        started: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl SuggestionService for GatedService {
        async fn suggest(&self, _prompt: &str) -> Result<SuggestionReply, SuggestionError> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(SuggestionReply {
                response: String::new(),
                output: Some("<p>B</p>".to_string()),
            })
        }
    }

    struct PanickingService;

    #[async_trait]
    impl SuggestionService for PanickingService {
        async fn suggest(&self, _prompt: &str) -> Result<SuggestionReply, SuggestionError> {
            panic!("model client blew up");
        }
    }

    fn app_with(suggester: Arc<dyn SuggestionService>) -> Router {
        build_router(AppState {
            sessions: SessionRegistry::default(),
            suggester,
            renderer: PdfRenderer::new("definitely-not-a-browser-binary", Duration::from_secs(5)),
        })
    }

    fn app() -> Router {
        app_with(Arc::new(FixedService(Some("\n  <p>B</p>\n\n"))))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(body) => Body::from(body.to_string()),
                None => Body::empty(),
            })
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn open_session(app: &Router, content: &str) -> String {
        let (status, body) = send(app, "POST", "/api/v1/sessions", Some(json!({ "content": content }))).await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_and_test_routes() {
        let app = app();
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = send(&app, "GET", "/test", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "hello world");
    }

    #[tokio::test]
    async fn test_suggest_toggle_apply_flow() {
        let app = app();
        let id = open_session(&app, "<p>A</p>").await;

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/suggest"),
            Some(json!({ "prompt": "rewrite" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "suggested");
        assert_eq!(body["session"]["content"], "<p>B</p>");
        assert_eq!(body["session"]["suggestion"]["view"], "showing_suggestion");
        assert_eq!(
            body["session"]["suggestion"]["response_message"],
            "Tightened the wording"
        );

        let (_, body) = send(&app, "POST", &format!("/api/v1/sessions/{id}/toggle"), None).await;
        assert_eq!(body["content"], "<p>A</p>");
        assert_eq!(body["suggestion"]["view"], "showing_original");

        let (_, body) = send(&app, "POST", &format!("/api/v1/sessions/{id}/apply"), None).await;
        assert_eq!(body["content"], "<p>B</p>");
        assert!(body["suggestion"].is_null());
    }

    #[tokio::test]
    async fn test_discard_restores_original() {
        let app = app();
        let id = open_session(&app, "<p>A</p>").await;

        send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/suggest"),
            Some(json!({ "prompt": "rewrite" })),
        )
        .await;
        send(&app, "POST", &format!("/api/v1/sessions/{id}/toggle"), None).await;
        let (status, body) = send(&app, "POST", &format!("/api/v1/sessions/{id}/discard"), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], "<p>A</p>");
        assert!(body["suggestion"].is_null());
    }

    #[tokio::test]
    async fn test_failed_suggestion_is_absorbed() {
        let app = app_with(Arc::new(FixedService(None)));
        let id = open_session(&app, "<p>A</p>").await;

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/suggest"),
            Some(json!({ "prompt": "rewrite" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "failed");
        assert_eq!(body["session"]["content"], "<p>A</p>");
        assert_eq!(body["session"]["editable"], true);
        assert_eq!(body["session"]["request_state"], "idle");
    }

    #[tokio::test]
    async fn test_panicking_service_releases_lock() {
        let app = app_with(Arc::new(PanickingService));
        let id = open_session(&app, "<p>A</p>").await;

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/suggest"),
            Some(json!({ "prompt": "rewrite" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "failed");
        assert_eq!(body["session"]["request_state"], "idle");
        assert_eq!(body["session"]["editable"], true);
        assert_eq!(body["session"]["content"], "<p>A</p>");

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/v1/sessions/{id}/content"),
            Some(json!({ "content": "<p>typed</p>" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], "<p>typed</p>");
    }

    #[tokio::test]
    async fn test_edit_locked_while_in_flight() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let app = app_with(Arc::new(GatedService {
            started: started.clone(),
            release: release.clone(),
        }));
        let id = open_session(&app, "<p>A</p>").await;

        let in_flight = {
            let app = app.clone();
            let uri = format!("/api/v1/sessions/{id}/suggest");
            tokio::spawn(async move {
                send(&app, "POST", &uri, Some(json!({ "prompt": "rewrite" }))).await
            })
        };
        started.notified().await;

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/v1/sessions/{id}/content"),
            Some(json!({ "content": "<p>typed</p>" })),
        )
        .await;
        assert_eq!(status, StatusCode::LOCKED);
        assert_eq!(body["error"]["code"], "DOCUMENT_LOCKED");

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/suggest"),
            Some(json!({ "prompt": "again" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "busy");
        assert_eq!(body["session"]["request_state"], "in_flight");
        assert_eq!(body["session"]["content"], "<p>A</p>");

        release.notify_one();
        let (status, body) = in_flight.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "suggested");
        assert_eq!(body["session"]["content"], "<p>B</p>");

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/v1/sessions/{id}/content"),
            Some(json!({ "content": "<p>typed</p>" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_empty_prompt_rejected() {
        let app = app();
        let id = open_session(&app, "").await;

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/suggest"),
            Some(json!({ "prompt": "   " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = send(&app, "POST", "/api/pdf/generate", Some(json!({ "prompt": "" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let app = app();
        let uri = format!("/api/v1/sessions/{}", uuid::Uuid::new_v4());
        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_delete_session() {
        let app = app();
        let id = open_session(&app, "<p>A</p>").await;

        let (status, _) = send(&app, "DELETE", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_generate_passes_reply_through() {
        let app = app();
        let (status, body) = send(&app, "POST", "/api/pdf/generate", Some(json!({ "prompt": "Write a summary" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Tightened the wording");
        assert_eq!(body["output"], "\n  <p>B</p>\n\n");
    }

    #[tokio::test]
    async fn test_generate_failure_is_bad_gateway() {
        let app = app_with(Arc::new(FixedService(None)));
        let (status, body) = send(&app, "POST", "/api/pdf/generate", Some(json!({ "prompt": "Write a summary" }))).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "SUGGESTION_ERROR");
    }

    #[tokio::test]
    async fn test_download_render_failure_is_500() {
        let app = app();
        let (status, body) = send(&app, "POST", "/api/pdf/download", Some(json!({ "content": "<p>A</p>" }))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "Error generating PDF");
    }
}
