//! # Map interaction controller
//!
//! [`MapController`] is the single owner of everything the map page mutates: the
//! viewport, the pin list, which pin's card is open, the draft pin being composed
//! and which auth overlay is showing. The page keeps it in a `Signal` and every
//! event handler goes through one of its methods, so the rules live here rather
//! than in component closures.
//!
//! ## States
//!
//! The states combine freely: a pin card (`selected`) and a draft popup (`draft`)
//! can be open at the same time, and the login/register overlay sits on top of
//! both. Whether a draft shows the creation form or the login prompt is decided
//! at render time from the session ([`MapController::draft_popup`]), so logging
//! out while composing turns the form into the prompt without losing the draft.
//!
//! ## Stale responses
//!
//! Network calls are split into `begin_*` / `finish_*` pairs. `begin_*` hands
//! out a ticket; `finish_*` checks it against the current state and drops results
//! that no longer apply:
//!
//! - a pin list superseded by a later load is discarded;
//! - a created pin is always kept (the server has it), appended unless a reload
//!   already brought it, but it only clears the draft it was created from;
//! - a failed create only marks the draft it came from.

use api::ApiError;
use dioxus::prelude::*;
use store::{GeoPoint, NewPin, Pin, Session};

use crate::map::Viewport;

/// Get the map controller provided by the map page.
pub fn use_map_controller() -> Signal<MapController> {
    use_context::<Signal<MapController>>()
}

/// What the user has typed into the creation form so far.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DraftContent {
    pub title: String,
    pub desc: String,
    /// 0 until a rating is picked.
    pub rating: u8,
}

/// A candidate pin that exists only on this client.
#[derive(Clone, Debug, PartialEq)]
pub struct DraftPin {
    pub coords: GeoPoint,
    /// `None` until the user edits any field.
    pub content: Option<DraftContent>,
    pub submitting: bool,
    /// Why the last save failed, if it did.
    pub error: Option<ApiError>,
    generation: u64,
}

impl DraftPin {
    pub fn content_or_default(&self) -> DraftContent {
        self.content.clone().unwrap_or_default()
    }

    fn content_mut(&mut self) -> &mut DraftContent {
        self.content.get_or_insert_with(DraftContent::default)
    }

    /// Request body for this draft. Untouched fields go out empty and rating 0.
    pub fn to_new_pin(&self, author: &str) -> NewPin {
        let content = self.content_or_default();
        NewPin {
            username: author.to_string(),
            title: content.title,
            desc: content.desc,
            rating: content.rating,
            lat: self.coords.lat,
            long: self.coords.long,
        }
    }
}

/// Login and register panels; at most one is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthOverlay {
    Login,
    Register,
}

/// How a draft is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftPopup {
    Form,
    AuthPrompt,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitTicket(u64);

/// Result of applying a create response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Pin appended and its draft cleared.
    Saved,
    /// Pin appended; the draft had been replaced or dismissed meanwhile.
    SavedElsewhere,
    /// Draft kept with the error attached.
    Failed,
    /// Failure for a draft that no longer exists; nothing changed.
    Stale,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapController {
    viewport: Viewport,
    pins: Vec<Pin>,
    loading: bool,
    load_error: Option<ApiError>,
    load_generation: u64,
    selected: Option<String>,
    draft: Option<DraftPin>,
    draft_generation: u64,
    overlay: Option<AuthOverlay>,
}

impl MapController {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            pins: Vec::new(),
            loading: false,
            load_error: None,
            load_generation: 0,
            selected: None,
            draft: None,
            draft_generation: 0,
            overlay: None,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn load_error(&self) -> Option<&ApiError> {
        self.load_error.as_ref()
    }

    pub fn dismiss_load_error(&mut self) {
        self.load_error = None;
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        self.loading = true;
        LoadTicket(self.load_generation)
    }

    /// Apply a pin list response. Returns `false` when the ticket is stale.
    ///
    /// Pins created locally while the request was in flight and missing from the
    /// response are kept after the fetched ones.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<Pin>, ApiError>) -> bool {
        if ticket.0 != self.load_generation {
            tracing::debug!("Discarding stale pin list");
            return false;
        }
        self.loading = false;
        match result {
            Ok(fetched) => {
                let local: Vec<Pin> = self
                    .pins
                    .drain(..)
                    .filter(|pin| !fetched.iter().any(|f| f.id == pin.id))
                    .collect();
                self.pins = fetched;
                self.pins.extend(local);
                self.load_error = None;
                tracing::info!("Loaded {} pins", self.pins.len());
            }
            Err(e) => {
                tracing::error!("Failed to load pins: {}", e);
                self.load_error = Some(e);
            }
        }
        true
    }

    /// Open the card for `id` and center the map on it.
    pub fn select_pin(&mut self, id: &str) -> bool {
        let Some(pin) = self.pins.iter().find(|pin| pin.id == id) else {
            return false;
        };
        self.viewport.recenter(pin.position());
        self.selected = Some(pin.id.clone());
        true
    }

    pub fn close_pin(&mut self) {
        self.selected = None;
    }

    pub fn selected_pin(&self) -> Option<&Pin> {
        let id = self.selected.as_deref()?;
        self.pins.iter().find(|pin| pin.id == id)
    }

    /// Start a new draft at `coords`, discarding any earlier one.
    pub fn place_draft(&mut self, coords: GeoPoint) {
        self.draft_generation += 1;
        self.draft = Some(DraftPin {
            coords,
            content: None,
            submitting: false,
            error: None,
            generation: self.draft_generation,
        });
    }

    pub fn draft(&self) -> Option<&DraftPin> {
        self.draft.as_ref()
    }

    pub fn draft_popup(&self, session: &Session) -> Option<DraftPopup> {
        self.draft.as_ref()?;
        Some(if session.is_logged_in() {
            DraftPopup::Form
        } else {
            DraftPopup::AuthPrompt
        })
    }

    pub fn set_title(&mut self, title: String) {
        if let Some(draft) = self.draft.as_mut() {
            draft.content_mut().title = title;
        }
    }

    pub fn set_desc(&mut self, desc: String) {
        if let Some(draft) = self.draft.as_mut() {
            draft.content_mut().desc = desc;
        }
    }

    pub fn set_rating(&mut self, rating: u8) {
        if let Some(draft) = self.draft.as_mut() {
            draft.content_mut().rating = rating;
        }
    }

    pub fn dismiss_draft(&mut self) {
        self.draft = None;
    }

    /// Mark the draft as submitting and build its request body.
    ///
    /// Returns `None` without a draft or while a submission is already in flight.
    pub fn begin_submit(&mut self, author: &str) -> Option<(SubmitTicket, NewPin)> {
        let draft = self.draft.as_mut()?;
        if draft.submitting {
            return None;
        }
        draft.submitting = true;
        draft.error = None;
        Some((SubmitTicket(draft.generation), draft.to_new_pin(author)))
    }

    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<Pin, ApiError>,
    ) -> SubmitOutcome {
        let same_draft = self
            .draft
            .as_ref()
            .is_some_and(|draft| draft.generation == ticket.0);
        match result {
            Ok(pin) => {
                tracing::info!("Created pin {} ({})", pin.id, pin.title);
                // a reload that finished first may already have it
                if !self.pins.iter().any(|p| p.id == pin.id) {
                    self.pins.push(pin);
                }
                if same_draft {
                    self.draft = None;
                    SubmitOutcome::Saved
                } else {
                    SubmitOutcome::SavedElsewhere
                }
            }
            Err(e) => {
                tracing::error!("Failed to create pin: {}", e);
                match self.draft.as_mut().filter(|_| same_draft) {
                    Some(draft) => {
                        draft.submitting = false;
                        draft.error = Some(e);
                        SubmitOutcome::Failed
                    }
                    None => SubmitOutcome::Stale,
                }
            }
        }
    }

    pub fn overlay(&self) -> Option<AuthOverlay> {
        self.overlay
    }

    pub fn open_login(&mut self) {
        self.overlay = Some(AuthOverlay::Login);
    }

    pub fn open_register(&mut self) {
        self.overlay = Some(AuthOverlay::Register);
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }
}
