use serde::Serialize;

use crate::editor::EditingSurface;

/// Whether a suggestion request is outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
}

/// Editability Lock: keeps the surface read-only exactly while a request is
/// in flight. The request state and the surface flag only change together.
#[derive(Debug, Default)]
pub struct EditabilityLock {
    state: RequestState,
}

impl EditabilityLock {
    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn is_engaged(&self) -> bool {
        self.state == RequestState::InFlight
    }

    /// Marks a request in flight and disables user edits. Callers check
    /// `is_engaged` first; at most one request is in flight.
    pub fn engage(&mut self, surface: &mut impl EditingSurface) {
        self.state = RequestState::InFlight;
        surface.set_editable(false);
    }

    pub fn release(&mut self, surface: &mut impl EditingSurface) {
        self.state = RequestState::Idle;
        surface.set_editable(true);
    }
}
