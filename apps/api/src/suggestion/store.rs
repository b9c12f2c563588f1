//! Suggestion Store: the pending suggestion and its pure transition function.
//!
//! A `Suggestion` is built fresh when a request succeeds and dropped wholesale
//! on apply or discard. The view (original vs. suggestion) only exists inside
//! `SuggestionState::Pending`, so it cannot outlive the suggestion it belongs to.

use serde::Serialize;

use crate::suggestion::sanitizer::sanitize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub response_message: String,
    /// Already sanitized; re-sanitizing on toggle is a no-op.
    pub suggested_content: String,
    /// Document content captured right before the suggestion was shown.
    pub original_snapshot: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    ShowingOriginal,
    ShowingSuggestion,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SuggestionState {
    #[default]
    Idle,
    Pending {
        suggestion: Suggestion,
        view: ViewState,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionEvent {
    /// A request came back with usable content.
    Received(Suggestion),
    Toggle,
    Apply,
    Discard,
}

/// Result of one transition: the next state plus the content (if any) the
/// controller must write into the editing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: SuggestionState,
    pub write: Option<String>,
}

impl Step {
    fn stay(state: SuggestionState) -> Self {
        Self { state, write: None }
    }
}

impl SuggestionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SuggestionState::Pending { .. })
    }

    pub fn suggestion(&self) -> Option<&Suggestion> {
        match self {
            SuggestionState::Pending { suggestion, .. } => Some(suggestion),
            SuggestionState::Idle => None,
        }
    }

    pub fn view(&self) -> Option<ViewState> {
        match self {
            SuggestionState::Pending { view, .. } => Some(*view),
            SuggestionState::Idle => None,
        }
    }

    /// Pure transition. Events that do not apply to the current state leave it
    /// unchanged and request no write.
    pub fn step(self, event: SuggestionEvent) -> Step {
        match (self, event) {
            (SuggestionState::Idle, SuggestionEvent::Received(suggestion)) => {
                let write = Some(suggestion.suggested_content.clone());
                Step {
                    state: SuggestionState::Pending {
                        suggestion,
                        view: ViewState::ShowingSuggestion,
                    },
                    write,
                }
            }
            // A second suggestion never replaces an unresolved one.
            (state @ SuggestionState::Pending { .. }, SuggestionEvent::Received(_)) => {
                Step::stay(state)
            }
            (
                SuggestionState::Pending {
                    suggestion,
                    view: ViewState::ShowingOriginal,
                },
                SuggestionEvent::Toggle,
            ) => {
                let content = sanitize(&suggestion.suggested_content);
                if content.is_empty() {
                    return Step::stay(SuggestionState::Pending {
                        suggestion,
                        view: ViewState::ShowingOriginal,
                    });
                }
                Step {
                    state: SuggestionState::Pending {
                        suggestion,
                        view: ViewState::ShowingSuggestion,
                    },
                    write: Some(content),
                }
            }
            (
                SuggestionState::Pending {
                    suggestion,
                    view: ViewState::ShowingSuggestion,
                },
                SuggestionEvent::Toggle,
            ) => {
                let write = Some(suggestion.original_snapshot.clone());
                Step {
                    state: SuggestionState::Pending {
                        suggestion,
                        view: ViewState::ShowingOriginal,
                    },
                    write,
                }
            }
            (SuggestionState::Pending { suggestion, view }, SuggestionEvent::Apply) => {
                let write = match view {
                    ViewState::ShowingSuggestion => None,
                    ViewState::ShowingOriginal => {
                        Some(sanitize(&suggestion.suggested_content)).filter(|c| !c.is_empty())
                    }
                };
                Step {
                    state: SuggestionState::Idle,
                    write,
                }
            }
            (SuggestionState::Pending { suggestion, .. }, SuggestionEvent::Discard) => Step {
                state: SuggestionState::Idle,
                write: Some(suggestion.original_snapshot),
            },
            (SuggestionState::Idle, _) => Step::stay(SuggestionState::Idle),
        }
    }
}
