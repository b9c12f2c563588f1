//! Suggestion Controller: drives one editing surface through the suggestion
//! lifecycle.
//!
//! Flow: begin_request (guard, lock, snapshot, prompt) → service.suggest →
//!       finish_request (sanitize, store, swap content, unlock) →
//!       toggle* → apply | discard.
//!
//! `request_suggestion` runs the whole request for callers that own the
//! controller outright. Callers that share it behind a mutex run the two
//! phases themselves and await the service with the mutex released.

use serde::Serialize;
use tracing::{info, warn};

use crate::editor::EditingSurface;
use crate::suggestion::lock::{EditabilityLock, RequestState};
use crate::suggestion::prompts::compose_prompt;
use crate::suggestion::sanitizer::sanitize_opt;
use crate::suggestion::service::{SuggestionError, SuggestionReply, SuggestionService};
use crate::suggestion::store::{Suggestion, SuggestionEvent, SuggestionState, ViewState};

/// How a suggestion request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOutcome {
    /// Usable content came back and is now shown.
    Suggested,
    /// The service answered with nothing usable after sanitizing.
    Empty,
    /// The service call failed; the document is untouched.
    Failed,
    /// Another request was already in flight.
    Busy,
    /// A previous suggestion has not been applied or discarded yet.
    Unresolved,
}

/// Everything `finish_request` needs from `begin_request`. Only one exists per
/// in-flight request.
#[derive(Debug)]
pub struct SuggestionTicket {
    pub prompt: String,
    snapshot: String,
}

#[derive(Debug)]
pub struct SuggestionController<S> {
    surface: S,
    lock: EditabilityLock,
    state: SuggestionState,
}

impl<S: EditingSurface> SuggestionController<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            lock: EditabilityLock::default(),
            state: SuggestionState::Idle,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// User-driven access to the surface. Whatever the surface enforces while
    /// locked applies here; the controller's own writes bypass it.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn request_state(&self) -> RequestState {
        self.lock.state()
    }

    pub fn pending(&self) -> Option<&Suggestion> {
        self.state.suggestion()
    }

    pub fn view(&self) -> Option<ViewState> {
        self.state.view()
    }

    /// Issues a request, awaits the service, and resolves the result.
    /// The HTTP layer runs the two phases itself (see editor::handlers).
    #[allow(dead_code)]
    pub async fn request_suggestion(
        &mut self,
        user_prompt: &str,
        service: &dyn SuggestionService,
    ) -> RequestOutcome {
        let ticket = match self.begin_request(user_prompt) {
            Ok(ticket) => ticket,
            Err(outcome) => return outcome,
        };
        let result = service.suggest(&ticket.prompt).await;
        self.finish_request(ticket, result)
    }

    /// First half of a request. Refuses with `Busy` or `Unresolved` without
    /// touching any state; otherwise locks the surface and captures the snapshot.
    pub fn begin_request(&mut self, user_prompt: &str) -> Result<SuggestionTicket, RequestOutcome> {
        if self.lock.is_engaged() {
            info!("Suggestion request ignored: another request is in flight");
            return Err(RequestOutcome::Busy);
        }
        if self.state.is_pending() {
            info!("Suggestion request ignored: previous suggestion is still pending");
            return Err(RequestOutcome::Unresolved);
        }

        self.lock.engage(&mut self.surface);
        let snapshot = self.surface.content().to_string();
        let prompt = compose_prompt(user_prompt, &snapshot);

        Ok(SuggestionTicket { prompt, snapshot })
    }

    /// Second half of a request. Always releases the lock.
    pub fn finish_request(
        &mut self,
        ticket: SuggestionTicket,
        result: Result<SuggestionReply, SuggestionError>,
    ) -> RequestOutcome {
        let outcome = match result {
            Ok(reply) => self.receive(ticket.snapshot, reply),
            Err(e) => {
                warn!("Suggestion request failed: {e}");
                RequestOutcome::Failed
            }
        };
        self.lock.release(&mut self.surface);
        outcome
    }

    fn receive(&mut self, snapshot: String, reply: SuggestionReply) -> RequestOutcome {
        let content = sanitize_opt(reply.output.as_deref());
        if content.is_empty() {
            info!("Suggestion reply had no usable content");
            return RequestOutcome::Empty;
        }

        self.dispatch(SuggestionEvent::Received(Suggestion {
            response_message: reply.response,
            suggested_content: content,
            original_snapshot: snapshot,
        }));
        RequestOutcome::Suggested
    }

    pub fn toggle_suggestion(&mut self) {
        self.dispatch(SuggestionEvent::Toggle);
    }

    pub fn apply_suggestion(&mut self) {
        if self.state.is_pending() {
            info!("Suggestion applied");
        }
        self.dispatch(SuggestionEvent::Apply);
    }

    pub fn discard_suggestion(&mut self) {
        if self.state.is_pending() {
            info!("Suggestion discarded");
        }
        self.dispatch(SuggestionEvent::Discard);
    }

    fn dispatch(&mut self, event: SuggestionEvent) {
        let step = std::mem::take(&mut self.state).step(event);
        self.state = step.state;
        if let Some(content) = step.write {
            self.surface.set_content(content);
        }
    }
}
