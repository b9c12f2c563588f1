use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::editor::{Document, EditingSurface};
use crate::suggestion::controller::SuggestionController;
use crate::suggestion::lock::RequestState;
use crate::suggestion::store::ViewState;

/// One open editor: a document and the controller driving its suggestions.
/// Lives only as long as the process.
#[derive(Debug)]
pub struct EditorSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub controller: SuggestionController<Document>,
}

impl EditorSession {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            controller: SuggestionController::new(Document::new(content)),
        }
    }

    pub fn view(&self) -> SessionView {
        let doc = self.controller.surface();
        SessionView {
            id: self.id,
            content: doc.content().to_string(),
            editable: doc.is_editable(),
            request_state: self.controller.request_state(),
            suggestion: self.controller.pending().and_then(|s| {
                self.controller.view().map(|view| PendingView {
                    response_message: s.response_message.clone(),
                    suggested_content: s.suggested_content.clone(),
                    view,
                })
            }),
            created_at: self.created_at,
        }
    }
}

/// JSON shape of a session returned by every session endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub content: String,
    pub editable: bool,
    pub request_state: RequestState,
    pub suggestion: Option<PendingView>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingView {
    pub response_message: String,
    pub suggested_content: String,
    pub view: ViewState,
}

pub type SharedSession = Arc<Mutex<EditorSession>>;

struct Entry {
    session: SharedSession,
    last_access: Instant,
}

/// In-memory session table shared across handlers.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
}

impl SessionRegistry {
    pub async fn create(&self, content: impl Into<String>) -> SharedSession {
        let session = EditorSession::new(content);
        let id = session.id;
        let shared = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(
            id,
            Entry {
                session: shared.clone(),
                last_access: Instant::now(),
            },
        );
        info!("Editor session {id} opened");
        shared
    }

    /// Looks a session up and marks it as recently used.
    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id)?;
        entry.last_access = Instant::now();
        Some(entry.session.clone())
    }

    /// Drops sessions untouched for at least `max_idle`. Sessions that are
    /// busy (mutex held or a request in flight) are kept. Returns how many
    /// were removed.
    pub async fn purge_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, entry| {
            if entry.last_access.elapsed() < max_idle {
                return true;
            }
            let busy = match entry.session.try_lock() {
                Ok(guard) => guard.controller.request_state() == RequestState::InFlight,
                Err(_) => true,
            };
            if !busy {
                info!("Editor session {id} expired");
            }
            busy
        });
        before - sessions.len()
    }

    /// Runs `purge_idle` every `period` for the life of the process.
    pub fn spawn_reaper(&self, max_idle: Duration, period: Duration) -> tokio::task::JoinHandle<()> {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let removed = registry.purge_idle(max_idle).await;
                if removed > 0 {
                    debug!("Session reaper removed {removed} idle sessions");
                }
            }
        })
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!("Editor session {id} closed");
        }
        removed
    }
}
